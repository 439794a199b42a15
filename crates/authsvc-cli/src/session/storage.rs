//! Location of the persisted session.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use authsvc_file::FileTokenStore;

/// Store key holding the base URL the session belongs to.
pub const SERVICE_URL_KEY: &str = "service_url";

/// Get the session file path, creating its directory.
pub fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "authsvc").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Open the token store at the session file path.
pub fn open_store() -> Result<FileTokenStore> {
    Ok(FileTokenStore::new(session_path()?))
}
