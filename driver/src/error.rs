use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Io(io::Error),
    #[error(transparent)]
    Serde(serde_json::Error),
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error(transparent)]
    Conversion(anyhow::Error),
}

impl From<io::Error> for DriverError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}
