//! Initial documents for a fresh database.
//!
//! - [`UserGenerator`]: the admin account plus a sample user and agency
//! - [`default_settings`]: the singleton admin configuration
//! - [`ClientGenerator`]: one sample client per status color
//! - [`sample_notifications`]: one client alert and one account notice
//!
//! [`SampleDataset`] collects all of them for a single point in time.

pub mod client;
pub mod notification;
pub mod settings;
pub mod user;

use time::OffsetDateTime;

use residency::models::{AdminSettings, Client, Notification, User};

use crate::config::SeedConfig;

pub use client::{ClientGenerator, CRITICAL_CLIENT_ID};
pub use notification::sample_notifications;
pub use settings::default_settings;
pub use user::{
    ADMIN_ID, LoginCredential, SAMPLE_AGENCY_ID, SAMPLE_USER_ID, SEEDED_LOGINS, UserGenerator,
};

/// Everything written by a first-time setup.
#[derive(Debug, Clone)]
pub struct SampleDataset {
    pub admin: User,
    pub settings: AdminSettings,
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub notifications: Vec<Notification>,
}

impl SampleDataset {
    /// Generates the dataset with all timestamps relative to `now`.
    pub fn generate(config: SeedConfig, now: OffsetDateTime) -> Self {
        let users = UserGenerator::new(config);

        Self {
            admin: users.admin(now),
            settings: default_settings(now),
            users: users.samples(now),
            clients: ClientGenerator::new(config).samples(now),
            notifications: sample_notifications(now),
        }
    }

    /// Total number of documents in the dataset.
    pub fn document_count(&self) -> usize {
        2 + self.users.len() + self.clients.len() + self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dataset_counts() {
        let dataset = SampleDataset::generate(SeedConfig::default(), OffsetDateTime::now_utc());

        assert_eq!(dataset.users.len(), 2);
        assert_eq!(dataset.clients.len(), 3);
        assert_eq!(dataset.notifications.len(), 2);
        assert_eq!(dataset.document_count(), 9);
    }

    #[test]
    fn test_references_resolve() {
        let dataset = SampleDataset::generate(SeedConfig::default(), OffsetDateTime::now_utc());

        let user_ids: HashSet<&str> = std::iter::once(&dataset.admin)
            .chain(&dataset.users)
            .map(|u| u.id.as_str())
            .collect();
        let client_ids: HashSet<&str> = dataset.clients.iter().map(|c| c.id.as_str()).collect();

        for client in &dataset.clients {
            assert!(user_ids.contains(client.created_by.as_str()));
        }
        for notification in &dataset.notifications {
            assert!(user_ids.contains(notification.target_user_id.as_str()));
            if let Some(client_id) = &notification.client_id {
                assert!(client_ids.contains(client_id.as_str()));
            }
        }
    }
}
