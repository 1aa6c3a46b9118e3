pub mod client_db;
pub mod database;
pub mod error;
pub mod server_db;

pub use client_db::ClientDatabase;
pub use error::{StoreError, StoreResult};
pub use server_db::MessageStore;

use std::fs;
use std::path::Path;

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
