//! Documents stored in the application's collections.
//!
//! All timestamps are integer milliseconds since the Unix epoch, matching what
//! the mobile client writes.

use serde::{Deserialize, Serialize};

/// Account role. Admins manage everyone else; users and agencies own clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Agency,
}

impl Role {
    /// Returns the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Agency => "agency",
        }
    }
}

/// An account document in `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
    pub is_frozen: bool,
    /// Account expiry; only set for non-admin roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_end_date: Option<i64>,
    pub created_at: i64,
    pub created_by: String,
}

/// Remaining-days thresholds that map a client to a status color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatusSettings {
    pub green_days: i64,
    pub yellow_days: i64,
    pub red_days: i64,
}

/// One escalation level of a reminder schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTier {
    /// Days before expiry at which this tier starts.
    pub days: i64,
    /// Reminders per day while the tier is active.
    pub frequency: i64,
    pub message: String,
}

/// Three escalation tiers, from the earliest warning to the most urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTiers {
    pub first_tier: NotificationTier,
    pub second_tier: NotificationTier,
    pub third_tier: NotificationTier,
}

impl NotificationTiers {
    /// Tiers in escalation order.
    pub fn iter(&self) -> impl Iterator<Item = &NotificationTier> {
        [&self.first_tier, &self.second_tier, &self.third_tier].into_iter()
    }

    /// True when each tier fires strictly closer to expiry than the one before.
    pub fn is_escalating(&self) -> bool {
        self.first_tier.days > self.second_tier.days && self.second_tier.days > self.third_tier.days
    }
}

/// WhatsApp templates. `{clientName}` is substituted by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappMessages {
    pub client_message: String,
    pub user_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub auto_freeze: bool,
    pub notifications_enabled: bool,
    pub background_service_enabled: bool,
    pub last_updated: i64,
}

/// The singleton `adminSettings/config` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    pub client_status_settings: ClientStatusSettings,
    pub client_notification_settings: NotificationTiers,
    pub user_notification_settings: NotificationTiers,
    pub whatsapp_messages: WhatsappMessages,
    pub system_settings: SystemSettings,
}

impl AdminSettings {
    /// Document id of the singleton inside `adminSettings`.
    pub const DOCUMENT_ID: &'static str = "config";
}

/// Status color shown for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Green,
    Yellow,
    Red,
    /// The client has left the country.
    White,
}

impl ClientStatus {
    /// Returns the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Green => "green",
            ClientStatus::Yellow => "yellow",
            ClientStatus::Red => "red",
            ClientStatus::White => "white",
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    Umrah,
    Hajj,
    Visit,
}

/// A tracked visitor in `clients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub client_name: String,
    pub client_phone: String,
    pub phone_country: String,
    pub visa_type: VisaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    pub entry_date: i64,
    pub notes: String,
    pub status: ClientStatus,
    pub days_remaining: i64,
    pub has_exited: bool,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    ClientExpiring,
    UserValidationExpiring,
}

impl NotificationType {
    /// Whether notifications of this type point at a client document.
    pub fn concerns_client(&self) -> bool {
        matches!(self, NotificationType::ClientExpiring)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    High,
}

/// An in-app notification in `notifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub target_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub is_read: bool,
    pub priority: Priority,
    pub created_at: i64,
}
