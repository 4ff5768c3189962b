use bytepi_math::BnError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The series reached a term index whose small factors no longer fit a machine word.
    #[error("Series overflow at term {0}")]
    SeriesOverflow(u64),

    #[error("Math error: {0}")]
    MathError(#[from] BnError),

    #[error("Config parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
