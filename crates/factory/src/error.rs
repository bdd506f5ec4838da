use mockwright_common::{FrameworkError, MockConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockFactoryError {
    #[error("{0}")]
    Config(#[from] MockConfigError),
    #[error("Mock framework error: {0}")]
    Framework(#[from] FrameworkError),
}
