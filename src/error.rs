use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UteroError {
    #[error("invalid date: {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u32 },
    #[error("date out of range")]
    DateOutOfRange,
    #[error("config error in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
