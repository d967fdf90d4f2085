#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
