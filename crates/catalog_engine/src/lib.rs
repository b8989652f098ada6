//! Catalog engine: loading of the video and rating collections.
mod decode;
mod engine;
mod fetch;
mod load;
mod types;

pub use decode::{decode_rating, decode_records, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use load::load_catalog;
pub use types::{
    CatalogSources, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, LoadError,
    LoadedCatalog, Resource, Source,
};
