use crate::error::DriverError;

pub mod clock;
pub mod error;
pub mod snapshot;

pub(crate) fn env(key: &str) -> Result<String, DriverError> {
    dotenvy::var(key).map_err(DriverError::from)
}
