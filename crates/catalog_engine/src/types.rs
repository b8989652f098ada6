use std::fmt;
use std::path::PathBuf;

use catalog_core::{RatingEntry, Record};

use crate::decode::DecodeError;

/// The two input collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Videos,
    Rating,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Videos => write!(f, "videos"),
            Resource::Rating => write!(f, "rating"),
        }
    }
}

/// Where a collection is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    /// `http(s)://` locations are fetched over HTTP; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Http(trimmed.to_string())
        } else {
            Source::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Locations of both collections for one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSources {
    pub videos: Source,
    pub rating: Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub location: String,
    pub final_location: String,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    NotFound,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Fatal initialization error; names the resource that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load {resource} from {location}: {source}")]
    Fetch {
        resource: Resource,
        location: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to decode {resource} from {location}: {source}")]
    Decode {
        resource: Resource,
        location: String,
        #[source]
        source: DecodeError,
    },
    #[error("engine unavailable: {0}")]
    Engine(String),
}

impl LoadError {
    pub fn resource(&self) -> Option<Resource> {
        match self {
            LoadError::Fetch { resource, .. } | LoadError::Decode { resource, .. } => {
                Some(*resource)
            }
            LoadError::Engine(_) => None,
        }
    }

    /// HTTP status of the failed request, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Fetch {
                source:
                    FetchError {
                        kind: FailureKind::HttpStatus(code),
                        ..
                    },
                ..
            } => Some(*code),
            _ => None,
        }
    }
}

/// Both collections, decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    pub records: Vec<Record>,
    pub rating: Vec<RatingEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    LoadStarted,
    CatalogLoaded(LoadedCatalog),
    LoadFailed(LoadError),
}
