//! Shared document models for the residency tracker.
//!
//! The mobile application and the administrative tooling both read and write
//! these documents, so the serialized field names are part of the contract.

pub mod auth;
pub mod models;

use time::OffsetDateTime;

/// Collection names used by the application.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ADMIN_SETTINGS: &str = "adminSettings";
    pub const CLIENTS: &str = "clients";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const USER_SETTINGS: &str = "userSettings";

    /// Every collection the application owns, in reset order.
    pub const ALL: [&str; 5] = [USERS, CLIENTS, NOTIFICATIONS, ADMIN_SETTINGS, USER_SETTINGS];
}

/// Converts a timestamp to integer milliseconds since the Unix epoch.
pub fn epoch_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_epoch_millis() {
        assert_eq!(epoch_millis(OffsetDateTime::UNIX_EPOCH), 0);
        assert_eq!(
            epoch_millis(datetime!(2024-01-01 00:00:00.250 UTC)),
            1_704_067_200_250
        );
    }
}
