use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("store app not found: {app_id}")]
    NotFound { app_id: String },
}

impl Error {
    #[must_use]
    pub fn not_found(app_id: impl Into<String>) -> Self {
        Self::NotFound {
            app_id: app_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
