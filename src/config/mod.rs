pub mod traits;
pub mod evolution;
pub mod classification;
pub mod regression;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use classification::ClassificationConfig;
pub use regression::RegressionConfig;
pub use traits::ConfigSection;
