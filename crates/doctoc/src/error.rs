#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Malformed layout dump: {0}")]
    MalformedLayout(String),
}
