//! Path resolution for folio directories.

use std::env;
use std::path::PathBuf;

/// Get XDG-compliant data directory for folio.
///
/// # Returns
/// Path to data directory: `~/.local/share/folio/`
///
/// # Panics
/// Panics if HOME environment variable is not set and XDG_DATA_HOME is also not set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".local/share")
        });

    data_home.join("folio")
}

/// Get database file path (data_dir/folio.db).
///
/// # Returns
/// Path to database file: `~/.local/share/folio/folio.db`
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("folio.db")
}
