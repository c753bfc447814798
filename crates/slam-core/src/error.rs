use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Project context ──
    #[error("failed to read the current working directory")]
    CurrentDir { source: std::io::Error },

    #[error("cannot derive a project name from {path} — run slam from inside the project directory")]
    InvalidWorkingDirectory { path: PathBuf },

    // ── Interactive input ──
    #[error("no value entered for '{prompt}'")]
    InvalidInteractiveInput { prompt: String },

    #[error("failed to read answer for '{prompt}'")]
    PromptRead {
        prompt: String,
        source: std::io::Error,
    },
}
