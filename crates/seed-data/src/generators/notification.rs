//! Sample notifications.

use time::OffsetDateTime;

use residency::epoch_millis;
use residency::models::{Notification, NotificationType, Priority};

use super::client::CRITICAL_CLIENT_ID;
use super::user::{SAMPLE_AGENCY_ID, SAMPLE_USER_ID};

/// An expiring-visa alert for the agency and an account-expiry notice for the user.
pub fn sample_notifications(now: OffsetDateTime) -> Vec<Notification> {
    let created_at = epoch_millis(now);

    vec![
        Notification {
            id: "notif001".to_string(),
            kind: NotificationType::ClientExpiring,
            title: "تنبيه انتهاء تأشيرة".to_string(),
            message: "تنتهي تأشيرة العميل فاطمة أحمد اليمني خلال 3 أيام".to_string(),
            target_user_id: SAMPLE_AGENCY_ID.to_string(),
            client_id: Some(CRITICAL_CLIENT_ID.to_string()),
            is_read: false,
            priority: Priority::High,
            created_at,
        },
        Notification {
            id: "notif002".to_string(),
            kind: NotificationType::UserValidationExpiring,
            title: "تنبيه انتهاء صلاحية الحساب".to_string(),
            message: "ينتهي حسابك خلال 90 يوم".to_string(),
            target_user_id: SAMPLE_USER_ID.to_string(),
            client_id: None,
            is_read: false,
            priority: Priority::Low,
            created_at,
        },
    ]
}
