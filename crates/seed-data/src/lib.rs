//! Initial data for the residency tracker.
//!
//! This crate seeds a document database with the admin account, the default
//! admin settings, and sample users, clients and notifications for manual
//! testing. Setup is idempotent: it does nothing once the admin account
//! exists. Reset wipes the application's collections and seeds again.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let seeder = Seeder::connect(&StoreConfig::default()).await?;
//! seeder.setup_complete_database().await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod store;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{CredentialSource, SeedConfig, StoreConfig};
    pub use crate::db::{ResetReport, SeedError, SeedReport, Seeder, SetupOutcome};
    pub use crate::generators::{SEEDED_LOGINS, SampleDataset};
    pub use crate::store::{DocumentStore, FirestoreStore, MemoryStore};
}
