use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebUiError {
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Clipboard(String),

    #[error("store lock poisoned")]
    Lock,
}

pub type Result<T> = std::result::Result<T, WebUiError>;
