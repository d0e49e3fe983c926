use avro_types::ConvertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerdeError {
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("Schema registry error: {0}")]
    Registry(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SerdeError>;
