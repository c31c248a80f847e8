pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("storage quota exceeded while writing {key}")]
    StorageQuota { key: String },
    #[error("storage is disabled")]
    StorageDisabled,
    #[error("failed to serialize value for {key}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("fetching {page} returned HTTP {status}")]
    FetchStatus { page: String, status: u16 },
    #[error("{page} has no #{region} content region")]
    MissingContentRegion { page: String, region: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn storage_quota(key: impl Into<String>) -> Self {
        Self::StorageQuota { key: key.into() }
    }

    pub fn serialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            key: key.into(),
            source,
        }
    }

    pub fn fetch_status(page: impl Into<String>, status: u16) -> Self {
        Self::FetchStatus {
            page: page.into(),
            status,
        }
    }

    pub fn missing_content_region(page: impl Into<String>, region: impl Into<String>) -> Self {
        Self::MissingContentRegion {
            page: page.into(),
            region: region.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
