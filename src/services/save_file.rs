//! Save file persistence for the timer record

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::{
    error::{PersistError, Result},
    state::SaveRecord,
};

/// Save file location, relative to the working directory
pub const DEFAULT_SAVE_FILE: &str = "latest.sav.txt";

/// Overwrite `path` with the JSON form of `record`
pub async fn save(path: &Path, record: &SaveRecord) -> Result<()> {
    // Four scalar fields always serialize; any failure here is reported as output-side IO.
    let contents = serde_json::to_string(record)
        .map_err(|e| PersistError::io(path, std::io::Error::other(e)))?;
    debug!("Writing {} to {}", contents, path.display());

    fs::write(path, contents)
        .await
        .map_err(|e| PersistError::io(path, e))
}

/// Read and parse the record stored at `path`
pub async fn load(path: &Path) -> Result<SaveRecord> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| PersistError::io(path, e))?;
    debug!("Read {} from {}", contents, path.display());

    serde_json::from_str(&contents).map_err(|e| PersistError::malformed(path, e))
}
