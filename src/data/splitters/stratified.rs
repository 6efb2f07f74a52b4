use super::base::DataSplitter;
use super::types::{DataSplit, SplitConfig};
use crate::data::record::Record;
use crate::error::{Result, SymgpError};
use crate::types::Diagnosis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Splits records class by class so that every class keeps the configured
/// training ratio, whatever the overall class balance.
pub struct StratifiedSplitter {
    config: SplitConfig,
}

impl StratifiedSplitter {
    pub fn new(training_ratio: f64) -> Result<Self> {
        Self::with_config(SplitConfig {
            training_ratio,
            seed: None,
        })
    }

    pub fn with_config(config: SplitConfig) -> Result<Self> {
        if !(config.training_ratio > 0.0 && config.training_ratio < 1.0) {
            return Err(SymgpError::Configuration(format!(
                "Split ratio must be between 0 and 1, got {}",
                config.training_ratio
            )));
        }
        Ok(Self { config })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }
}

impl DataSplitter for StratifiedSplitter {
    fn split(&self, records: &[Record]) -> Result<DataSplit> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut buckets: BTreeMap<Diagnosis, Vec<Record>> = BTreeMap::new();
        for record in records {
            buckets.entry(record.label()).or_default().push(record.clone());
        }

        let mut training = Vec::with_capacity(records.len());
        let mut test = Vec::with_capacity(records.len());

        for (label, mut bucket) in buckets {
            bucket.shuffle(&mut rng);

            let n_training = (bucket.len() as f64 * self.config.training_ratio).floor() as usize;
            log::debug!(
                "{}: {} of {} records to training",
                label,
                n_training,
                bucket.len()
            );

            let remainder = bucket.split_off(n_training);
            training.extend(bucket);
            test.extend(remainder);
        }

        training.shuffle(&mut rng);
        test.shuffle(&mut rng);

        Ok(DataSplit { training, test })
    }

    fn config(&self) -> &SplitConfig {
        &self.config
    }
}
