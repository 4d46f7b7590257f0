//! Default administrator configuration.

use time::OffsetDateTime;

use residency::epoch_millis;
use residency::models::{
    AdminSettings, ClientStatusSettings, NotificationTier, NotificationTiers, SystemSettings,
    WhatsappMessages,
};

fn tier(days: i64, frequency: i64, message: &str) -> NotificationTier {
    NotificationTier {
        days,
        frequency,
        message: message.to_string(),
    }
}

/// The settings document written on first setup.
pub fn default_settings(now: OffsetDateTime) -> AdminSettings {
    AdminSettings {
        client_status_settings: ClientStatusSettings {
            green_days: 30,
            yellow_days: 30,
            red_days: 1,
        },
        // Reminders get more frequent as the visa end approaches.
        client_notification_settings: NotificationTiers {
            first_tier: tier(10, 2, "تنبيه: تنتهي تأشيرة العميل {clientName} خلال 10 أيام"),
            second_tier: tier(5, 4, "تحذير: تنتهي تأشيرة العميل {clientName} خلال 5 أيام"),
            third_tier: tier(2, 8, "عاجل: تنتهي تأشيرة العميل {clientName} خلال يومين"),
        },
        user_notification_settings: NotificationTiers {
            first_tier: tier(10, 1, "تنبيه: ينتهي حسابك خلال 10 أيام"),
            second_tier: tier(5, 1, "تحذير: ينتهي حسابك خلال 5 أيام"),
            third_tier: tier(2, 1, "عاجل: ينتهي حسابك خلال يومين"),
        },
        whatsapp_messages: WhatsappMessages {
            client_message:
                "عزيزي العميل {clientName}، تنتهي صلاحية تأشيرتك قريباً. يرجى التواصل معنا."
                    .to_string(),
            user_message: "تنبيه: ينتهي حسابك قريباً. يرجى التجديد.".to_string(),
        },
        system_settings: SystemSettings {
            auto_freeze: true,
            notifications_enabled: true,
            background_service_enabled: true,
            last_updated: epoch_millis(now),
        },
    }
}
