/// Core error type for the bot.
///
/// The adapter crate maps its transport-specific errors into this type so
/// the core can handle failures consistently (user-facing message vs fatal).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("word source load error: {0}")]
    Load(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("no words available")]
    EmptyCatalog,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
