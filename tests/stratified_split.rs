use std::collections::HashSet;
use symgp::data::{DataSplitter, DatasetConnector, Record, SplitWriter, StratifiedSplitter};
use symgp::types::Diagnosis;

/// Synthetic dataset with the class balance of the Wisconsin data
fn dataset(benign: usize, malignant: usize) -> Vec<Record> {
    let mut records = Vec::new();
    for i in 0..benign {
        let v = (i % 10) as i32 + 1;
        records.push(Record::new(i as i64, &[v, 1, 1, 1, 2, 1, 3, 1, 1], 2).unwrap());
    }
    for i in 0..malignant {
        let v = (i % 10) as i32 + 1;
        records.push(Record::new((benign + i) as i64, &[8, v, 7, 10, 4, -1, 5, 9, 1], 4).unwrap());
    }
    records
}

fn ids(records: &[Record]) -> HashSet<i64> {
    records.iter().map(Record::id).collect()
}

#[test]
fn test_split_is_complete_and_disjoint() {
    let records = dataset(458, 241);
    let split = StratifiedSplitter::new(0.8).unwrap().with_seed(17).split(&records).unwrap();

    let training = ids(&split.training);
    let test = ids(&split.test);
    assert!(training.is_disjoint(&test));
    assert_eq!(training.len() + test.len(), records.len());
    assert_eq!(training.union(&test).count(), records.len());
}

#[test]
fn test_per_class_ratio_within_one_record() {
    let records = dataset(458, 241);
    for seed in 0..5 {
        let split = StratifiedSplitter::new(0.8).unwrap().with_seed(seed).split(&records).unwrap();
        let summary = split.summary();

        for label in [Diagnosis::Benign, Diagnosis::Malignant] {
            let counts = summary.classes[&label];
            let total = counts.total() as f64;
            assert!(
                (counts.training_fraction() - 0.8).abs() <= 1.0 / total,
                "{} training fraction {} out of bounds",
                label,
                counts.training_fraction()
            );
        }
    }
}

#[test]
fn test_small_buckets_round_down() {
    let records = dataset(3, 2);
    let split = StratifiedSplitter::new(0.8).unwrap().with_seed(1).split(&records).unwrap();
    let summary = split.summary();
    // floor(0.8 * 3) = 2, floor(0.8 * 2) = 1
    assert_eq!(summary.classes[&Diagnosis::Benign].training, 2);
    assert_eq!(summary.classes[&Diagnosis::Malignant].training, 1);
}

#[test]
fn test_persisted_split_reloads() {
    let records = dataset(20, 10);
    let split = StratifiedSplitter::new(0.7).unwrap().with_seed(3).split(&records).unwrap();

    let dir = std::env::temp_dir();
    let train_path = dir.join(format!("symgp-{}-train.data", std::process::id()));
    let test_path = dir.join(format!("symgp-{}-test.data", std::process::id()));
    SplitWriter::persist(&split, &train_path, &test_path).unwrap();

    let training = DatasetConnector::load(&train_path).unwrap();
    let test = DatasetConnector::load(&test_path).unwrap();
    assert_eq!(training, split.training);
    assert_eq!(test, split.test);

    std::fs::remove_file(&train_path).ok();
    std::fs::remove_file(&test_path).ok();
}

#[test]
fn test_ratio_must_be_open_interval() {
    for ratio in [0.0, 1.0, 1.5, -0.1] {
        assert!(StratifiedSplitter::new(ratio).is_err(), "ratio {} accepted", ratio);
    }
}
