#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("validation error: {reason}")]
    Validation { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
