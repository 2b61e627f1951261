use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    #[error("series {name} is misaligned: {months} months but {values} values")]
    Misaligned {
        name: String,
        months: usize,
        values: usize,
    },
    #[error("unknown census profile: {0}")]
    UnknownProfile(String),
    #[error("unknown extraction mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
