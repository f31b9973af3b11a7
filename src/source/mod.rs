//! Record sources
//!
//! A source returns the full catalog or an error. No pagination and no
//! partial results. Whatever the source, materials come back in canonical
//! order (title ascending, case-insensitive).

pub mod rest;

use std::path::PathBuf;
use tokio::task;
use tracing::info;

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::state::data::{sort_canonical, Material};
use crate::state::library::Library;

/// Fetch the whole catalog from the configured source
pub async fn fetch_materials(source: Option<SourceConfig>) -> Result<Vec<Material>, FetchError> {
    let source = source.ok_or(FetchError::Unavailable)?;

    let mut materials = match source {
        SourceConfig::Supabase { url, anon_key, table } => {
            info!(%url, %table, "loading hosted catalog");
            rest::RestClient::new(&url, &anon_key)?
                .fetch_all(&table)
                .await?
        }
        SourceConfig::Sqlite { path } => read_local(path).await?,
    };

    sort_canonical(&mut materials);
    Ok(materials)
}

/// rusqlite is blocking, so read on the blocking pool
async fn read_local(path: PathBuf) -> Result<Vec<Material>, FetchError> {
    info!(path = %path.display(), "loading local catalog");

    if !path.is_file() {
        return Err(FetchError::CatalogMissing(path));
    }

    let materials = task::spawn_blocking(move || -> rusqlite::Result<Vec<Material>> {
        Library::open_read_only(&path)?.get_all_materials()
    })
    .await??;

    Ok(materials)
}
