//! Database initialization for a fresh deployment.
//!
//! The [`Seeder`] writes the admin account, default settings and sample data
//! into a [`DocumentStore`](crate::store::DocumentStore), and can wipe the
//! application's collections and start over.

mod seeder;

pub use seeder::{ResetReport, SeedError, SeedReport, Seeder, SetupOutcome};
