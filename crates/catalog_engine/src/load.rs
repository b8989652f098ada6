use catalog_logging::{catalog_error, catalog_info};

use crate::decode::{decode_rating, decode_records, DecodeError};
use crate::fetch::Fetcher;
use crate::{CatalogSources, LoadError, LoadedCatalog, Resource, Source};

/// Fetches and decodes both collections concurrently. Either failure fails the
/// whole load; nothing is retried.
pub async fn load_catalog(
    fetcher: &dyn Fetcher,
    sources: &CatalogSources,
) -> Result<LoadedCatalog, LoadError> {
    let videos = load_resource(fetcher, Resource::Videos, &sources.videos, decode_records);
    let rating = load_resource(fetcher, Resource::Rating, &sources.rating, decode_rating);
    let (records, rating) = futures_util::future::try_join(videos, rating).await?;
    catalog_info!(
        "loaded {} records and {} rating rows",
        records.len(),
        rating.len()
    );
    Ok(LoadedCatalog { records, rating })
}

async fn load_resource<T>(
    fetcher: &dyn Fetcher,
    resource: Resource,
    source: &Source,
    decode: fn(&[u8]) -> Result<Vec<T>, DecodeError>,
) -> Result<Vec<T>, LoadError> {
    let location = source.to_string();
    catalog_info!("loading {} from {}", resource, location);
    let output = fetcher.fetch(source).await.map_err(|error| {
        catalog_error!("loading {} from {} failed: {}", resource, location, error);
        LoadError::Fetch {
            resource,
            location: location.clone(),
            source: error,
        }
    })?;
    decode(&output.bytes).map_err(|error| {
        catalog_error!("decoding {} from {} failed: {}", resource, location, error);
        LoadError::Decode {
            resource,
            location,
            source: error,
        }
    })
}
