//! Where the gym database lives.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the gym database.
///
/// Without a path the database is held in memory and disappears with the
/// process, which is what the test suites use.
///
/// ```
/// use gym_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// let scratch = SqliteConfig::default();
/// assert!(scratch.database_path.is_none());
///
/// let persistent = SqliteConfig {
///     database_path: Some(PathBuf::from("/var/lib/gym/gym.db")),
///     create_if_missing: false,
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// The database file holding users, gyms, mentors, and products
    pub database_path: Option<PathBuf>,

    /// Create an empty, migrated database when the file does not exist yet
    #[serde(default = "create_by_default")]
    pub create_if_missing: bool,
}

fn create_by_default() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: create_by_default(),
        }
    }
}
