use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
