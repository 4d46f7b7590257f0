//! Database initialization and reset.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use residency::collections;
use residency::models::{AdminSettings, Client, Notification, User};

use crate::config::{SeedConfig, StoreConfig};
use crate::generators::{ADMIN_ID, SEEDED_LOGINS, SampleDataset};
use crate::store::{
    Document, DocumentStore, FirestoreStore, ResolvedCredentials, StoreError, resolve_credentials,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to connect to document store: {0}")]
    Connection(#[source] StoreError),
    #[error("Failed to read {collection}/{id}: {source}")]
    Read {
        collection: &'static str,
        id: String,
        source: StoreError,
    },
    #[error("Failed to write {collection}/{id}: {source}")]
    Write {
        collection: &'static str,
        id: String,
        source: StoreError,
    },
    #[error("Failed to list {collection}: {source}")]
    List {
        collection: &'static str,
        source: StoreError,
    },
    #[error("Failed to delete {collection}/{id}: {source}")]
    Delete {
        collection: &'static str,
        id: String,
        source: StoreError,
    },
}

/// Number of documents written per step of a setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_users: usize,
    pub settings: usize,
    pub sample_users: usize,
    pub clients: usize,
    pub notifications: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.admin_users + self.settings + self.sample_users + self.clients + self.notifications
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The sentinel document existed; nothing was written.
    AlreadyInitialized,
    Seeded(SeedReport),
}

/// Result of a reset: documents deleted per collection, then the re-seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    pub deleted: Vec<(&'static str, usize)>,
    pub setup: SetupOutcome,
}

impl ResetReport {
    pub fn total_deleted(&self) -> usize {
        self.deleted.iter().map(|(_, n)| n).sum()
    }
}

/// Seeds a document store with the initial application data.
///
/// Setup is guarded by the admin account: if `users/admin001` exists the
/// database is considered initialized and left untouched. There is no
/// transaction around the check and the writes, so only one seeder should run
/// against a database at a time.
pub struct Seeder<S> {
    store: S,
    config: SeedConfig,
}

impl Seeder<FirestoreStore> {
    /// Connects to Firestore using the configured credentials.
    pub async fn connect(config: &StoreConfig) -> Result<Self, SeedError> {
        let credentials = resolve_credentials(config).map_err(connection_error)?;
        Self::connect_with(credentials, &config.database).await
    }

    /// Connects with already resolved credentials.
    pub async fn connect_with(
        credentials: ResolvedCredentials,
        database: &str,
    ) -> Result<Self, SeedError> {
        let store = FirestoreStore::open(credentials, database)
            .await
            .map_err(connection_error)?;
        Ok(Self::new(store))
    }
}

fn connection_error(e: StoreError) -> SeedError {
    error!("Failed to connect to Firestore: {e}");
    SeedError::Connection(e)
}

impl<S: DocumentStore> Seeder<S> {
    /// Creates a seeder over an existing store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SeedConfig::default(),
        }
    }

    /// Sets the parameters used to generate sample data.
    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a reference to the store for inspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks whether the admin account exists.
    ///
    /// A failed read is logged and reported as `false`.
    pub async fn is_already_setup(&self) -> bool {
        match self.admin_exists().await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Error checking setup status: {e}");
                false
            }
        }
    }

    /// Writes the initial data unless the database is already initialized.
    ///
    /// A failed read of the admin account aborts setup without writing, since
    /// an existing database cannot be told apart from an empty one. On any
    /// failure the error is logged and returned. Documents written before a
    /// failed write are left in place.
    pub async fn setup_complete_database(&self) -> Result<SetupOutcome, SeedError> {
        match self.admin_exists().await {
            Ok(true) => {
                info!("Database already initialized");
                return Ok(SetupOutcome::AlreadyInitialized);
            }
            Ok(false) => {}
            Err(e) => {
                error!("Database setup failed: {e}");
                return Err(e);
            }
        }

        let dataset = SampleDataset::generate(self.config, OffsetDateTime::now_utc());
        info!(
            "Starting database initialization ({} documents)...",
            dataset.document_count()
        );

        let report = match self.seed_dataset(&dataset).await {
            Ok(report) => report,
            Err(e) => {
                error!("Database setup failed: {e}");
                return Err(e);
            }
        };

        info!("Database initialization completed successfully!");
        info!("Login credentials:");
        for login in SEEDED_LOGINS {
            info!("  {}: {} / {}", login.role.as_str(), login.username, login.password);
        }

        Ok(SetupOutcome::Seeded(report))
    }

    /// Deletes every document in the application's collections, then runs setup.
    ///
    /// Documents are deleted one at a time; a failure stops the reset before
    /// the database is re-seeded.
    pub async fn reset_database(&self) -> Result<ResetReport, SeedError> {
        warn!("Resetting database...");

        let mut deleted = Vec::with_capacity(collections::ALL.len());
        for collection in collections::ALL {
            match self.clear_collection(collection).await {
                Ok(count) => deleted.push((collection, count)),
                Err(e) => {
                    error!("Database reset failed: {e}");
                    return Err(e);
                }
            }
        }

        info!("Database reset completed");

        let setup = self.setup_complete_database().await?;
        Ok(ResetReport { deleted, setup })
    }

    async fn admin_exists(&self) -> Result<bool, SeedError> {
        self.store
            .get(collections::USERS, ADMIN_ID)
            .await
            .map(|admin| admin.is_some())
            .map_err(|source| SeedError::Read {
                collection: collections::USERS,
                id: ADMIN_ID.to_string(),
                source,
            })
    }

    async fn seed_dataset(&self, dataset: &SampleDataset) -> Result<SeedReport, SeedError> {
        Ok(SeedReport {
            admin_users: self.seed_admin_user(&dataset.admin).await?,
            settings: self.seed_admin_settings(&dataset.settings).await?,
            sample_users: self.seed_sample_users(&dataset.users).await?,
            clients: self.seed_sample_clients(&dataset.clients).await?,
            notifications: self.seed_sample_notifications(&dataset.notifications).await?,
        })
    }

    async fn seed_admin_user(&self, admin: &User) -> Result<usize, SeedError> {
        info!("Creating admin user...");
        self.put(collections::USERS, &admin.id, admin).await?;
        Ok(1)
    }

    async fn seed_admin_settings(&self, settings: &AdminSettings) -> Result<usize, SeedError> {
        info!("Setting up default configurations...");
        self.put(collections::ADMIN_SETTINGS, AdminSettings::DOCUMENT_ID, settings)
            .await?;
        Ok(1)
    }

    async fn seed_sample_users(&self, users: &[User]) -> Result<usize, SeedError> {
        info!("Creating {} sample users...", users.len());
        for user in users {
            self.put(collections::USERS, &user.id, user).await?;
        }
        Ok(users.len())
    }

    async fn seed_sample_clients(&self, clients: &[Client]) -> Result<usize, SeedError> {
        info!("Creating {} sample clients...", clients.len());
        for client in clients {
            self.put(collections::CLIENTS, &client.id, client).await?;
        }
        Ok(clients.len())
    }

    async fn seed_sample_notifications(
        &self,
        notifications: &[Notification],
    ) -> Result<usize, SeedError> {
        info!("Creating {} sample notifications...", notifications.len());
        for notification in notifications {
            self.put(collections::NOTIFICATIONS, &notification.id, notification)
                .await?;
        }
        Ok(notifications.len())
    }

    /// Serializes a model and writes it with create-or-replace semantics.
    async fn put<T: Serialize>(
        &self,
        collection: &'static str,
        id: &str,
        document: &T,
    ) -> Result<(), SeedError> {
        let write_error = |source| SeedError::Write {
            collection,
            id: id.to_string(),
            source,
        };

        let document = to_document(document).map_err(write_error)?;
        self.store
            .set(collection, id, document)
            .await
            .map_err(write_error)
    }

    async fn clear_collection(&self, collection: &'static str) -> Result<usize, SeedError> {
        let documents = self
            .store
            .list(collection)
            .await
            .map_err(|source| SeedError::List { collection, source })?;

        for (id, _) in &documents {
            self.store
                .delete(collection, id)
                .await
                .map_err(|source| SeedError::Delete {
                    collection,
                    id: id.clone(),
                    source,
                })?;
        }

        info!("Cleared {} documents from {}", documents.len(), collection);
        Ok(documents.len())
    }
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Codec(format!("expected an object, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use residency::models::ClientStatus;

    #[test]
    fn test_to_document() {
        let dataset = SampleDataset::generate(SeedConfig::default(), OffsetDateTime::now_utc());
        let document = to_document(&dataset.clients[1]).unwrap();

        assert_eq!(document["status"], ClientStatus::Red.as_str());
        assert_eq!(document["daysRemaining"], 3);
    }

    #[test]
    fn test_to_document_rejects_scalars() {
        assert!(matches!(to_document(&42), Err(StoreError::Codec(_))));
    }

    #[test]
    fn test_report_totals() {
        let report = SeedReport {
            admin_users: 1,
            settings: 1,
            sample_users: 2,
            clients: 3,
            notifications: 2,
        };
        assert_eq!(report.total(), 9);

        let reset = ResetReport {
            deleted: vec![("users", 3), ("clients", 3)],
            setup: SetupOutcome::Seeded(report),
        };
        assert_eq!(reset.total_deleted(), 6);
    }
}
