//! Admin and sample account generation.

use time::{Duration, OffsetDateTime};

use residency::auth::hash_password;
use residency::epoch_millis;
use residency::models::{Role, User};

use crate::config::SeedConfig;

/// Id of the admin account. Its existence marks the database as initialized.
pub const ADMIN_ID: &str = "admin001";
pub const SAMPLE_USER_ID: &str = "user001";
pub const SAMPLE_AGENCY_ID: &str = "agency001";

/// A username/password pair seeded for manual login testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginCredential {
    pub role: Role,
    pub username: &'static str,
    pub password: &'static str,
}

/// Every login the seeder creates.
pub const SEEDED_LOGINS: [LoginCredential; 3] = [
    LoginCredential {
        role: Role::Admin,
        username: "admin",
        password: "admin123",
    },
    LoginCredential {
        role: Role::User,
        username: "testuser",
        password: "test123",
    },
    LoginCredential {
        role: Role::Agency,
        username: "testagency",
        password: "test123",
    },
];

struct AccountSpec {
    id: &'static str,
    login: LoginCredential,
    name: &'static str,
    phone: &'static str,
    email: &'static str,
}

const SAMPLE_ACCOUNTS: [AccountSpec; 2] = [
    AccountSpec {
        id: SAMPLE_USER_ID,
        login: SEEDED_LOGINS[1],
        name: "محمد أحمد",
        phone: "966551234567",
        email: "user@example.com",
    },
    AccountSpec {
        id: SAMPLE_AGENCY_ID,
        login: SEEDED_LOGINS[2],
        name: "وكالة النور للسفر",
        phone: "966551234568",
        email: "agency@example.com",
    },
];

/// Builds the admin account and the sample user/agency accounts.
pub struct UserGenerator {
    config: SeedConfig,
}

impl UserGenerator {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// The admin account. Admins never expire, so no validation end date.
    pub fn admin(&self, now: OffsetDateTime) -> User {
        let login = SEEDED_LOGINS[0];
        User {
            id: ADMIN_ID.to_string(),
            username: login.username.to_string(),
            password_hash: hash_password(login.password),
            role: login.role,
            name: "المدير العام".to_string(),
            phone: "966501234567".to_string(),
            email: "admin@example.com".to_string(),
            is_active: true,
            is_frozen: false,
            validation_end_date: None,
            created_at: epoch_millis(now),
            created_by: "system".to_string(),
        }
    }

    /// A regular user and an agency, both created by the admin.
    pub fn samples(&self, now: OffsetDateTime) -> Vec<User> {
        let validation_end = now + Duration::days(self.config.account_validity_days);

        SAMPLE_ACCOUNTS
            .iter()
            .map(|spec| User {
                id: spec.id.to_string(),
                username: spec.login.username.to_string(),
                password_hash: hash_password(spec.login.password),
                role: spec.login.role,
                name: spec.name.to_string(),
                phone: spec.phone.to_string(),
                email: spec.email.to_string(),
                is_active: true,
                is_frozen: false,
                validation_end_date: Some(epoch_millis(validation_end)),
                created_at: epoch_millis(now),
                created_by: ADMIN_ID.to_string(),
            })
            .collect()
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new(SeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use residency::auth::verify_password;
    use time::macros::datetime;

    #[test]
    fn test_admin_account() {
        let now = datetime!(2024-03-01 12:00 UTC);
        let admin = UserGenerator::default().admin(now);

        assert_eq!(admin.id, ADMIN_ID);
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.validation_end_date, None);
        assert_eq!(admin.created_at, epoch_millis(now));
        assert!(verify_password("admin123", &admin.password_hash));
    }

    #[test]
    fn test_sample_accounts_expire_after_validity() {
        let now = datetime!(2024-03-01 12:00 UTC);
        let users = UserGenerator::default().samples(now);

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Role::User);
        assert_eq!(users[1].role, Role::Agency);

        let expected_end = epoch_millis(datetime!(2024-05-30 12:00 UTC));
        for user in &users {
            assert_eq!(user.validation_end_date, Some(expected_end));
            assert_eq!(user.created_by, ADMIN_ID);
            assert!(verify_password("test123", &user.password_hash));
        }
    }

    #[test]
    fn test_logins_match_accounts() {
        let users = UserGenerator::default().samples(OffsetDateTime::now_utc());
        for (user, login) in users.iter().zip(&SEEDED_LOGINS[1..]) {
            assert_eq!(user.username, login.username);
            assert_eq!(user.role, login.role);
        }
    }
}
