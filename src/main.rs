use anyhow::{bail, Context};
use symgp::config::ConfigManager;
use symgp::engines::generation::LogProgressCallback;
use symgp::problems::{classification, regression};

const USAGE: &str = "usage: symgp <classify|regress|config> [config.toml]";

fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let command = args.next().context(USAGE)?;
    let config_path = args.next();

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = manager.get();

    // Effective configuration and what each field means
    if command == "config" {
        let dump = serde_json::json!({
            "config": config,
            "manifest": config.manifest(),
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let mut progress = LogProgressCallback::default();
    let report = match command.as_str() {
        "classify" => classification::run(&config.classification, &mut progress)
            .context("Classification run failed")?,
        "regress" => regression::run(&config.regression, &mut progress)
            .context("Regression run failed")?,
        other => bail!("Unknown command '{}'\n{}", other, USAGE),
    };

    println!("{}", report.to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
