//! Configuration types for seeding.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Service-account file used when nothing else is specified.
pub const DEFAULT_CREDENTIALS_FILE: &str = "service-account.json";

/// Firestore database id used when nothing else is specified.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Where store credentials come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialSource {
    /// An explicit service-account JSON file.
    File(PathBuf),
    /// Resolved from the process environment: `FIRESTORE_EMULATOR_HOST`
    /// first, then the file named by `GOOGLE_APPLICATION_CREDENTIALS`.
    Ambient,
}

/// Connection settings for the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub credentials: CredentialSource,

    /// Overrides the project id found in the credentials.
    pub project_id: Option<String>,

    /// Firestore database id.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialSource::File(PathBuf::from(DEFAULT_CREDENTIALS_FILE)),
            project_id: None,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// Parameters for the sample data written during setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Days until sample user and agency accounts expire.
    pub account_validity_days: i64,

    /// Visa validity assumed when back-dating sample client entry dates.
    pub visa_validity_days: i64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            account_validity_days: 90,
            visa_validity_days: 90,
        }
    }
}
