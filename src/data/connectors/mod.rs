mod dataset;
mod regression;
mod types;
mod validator;

pub use dataset::DatasetConnector;
pub use regression::RegressionConnector;
pub use types::{
    DatasetMetadata,
    RegressionData,
    FEATURE_NAMES,
};
pub use validator::DataValidator;
