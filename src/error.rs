use thiserror::Error;

#[derive(Error, Debug)]
pub enum BwioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bandwidth: {0}")]
    InvalidBandwidth(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for BwioError {
    fn from(err: toml::de::Error) -> Self {
        BwioError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BwioError>;
