//! Sample client generation.
//!
//! Status and remaining days are fixed per sample. Entry dates are back-dated
//! so that the configured visa validity minus the time since entry equals the
//! fixed remaining days.

use time::{Duration, OffsetDateTime};

use residency::epoch_millis;
use residency::models::{Client, ClientStatus, VisaType};

use super::user::{SAMPLE_AGENCY_ID, SAMPLE_USER_ID};
use crate::config::SeedConfig;

struct ClientSpec {
    id: &'static str,
    name: &'static str,
    phone: &'static str,
    phone_country: &'static str,
    visa_type: VisaType,
    agent: (&'static str, &'static str),
    notes: &'static str,
    status: ClientStatus,
    days_remaining: i64,
    has_exited: bool,
    created_by: &'static str,
}

const SAMPLE_CLIENTS: [ClientSpec; 3] = [
    ClientSpec {
        id: "client001",
        name: "عبدالله محمد السعدي",
        phone: "966551111111",
        phone_country: "saudi",
        visa_type: VisaType::Umrah,
        agent: ("أحمد الوكيل", "966552222222"),
        notes: "عميل مميز - تجديد التأشيرة",
        status: ClientStatus::Green,
        days_remaining: 70,
        has_exited: false,
        created_by: SAMPLE_USER_ID,
    },
    ClientSpec {
        id: "client002",
        name: "فاطمة أحمد اليمني",
        phone: "967771111111",
        phone_country: "yemen",
        visa_type: VisaType::Visit,
        agent: ("", ""),
        notes: "تحتاج متابعة عاجلة",
        status: ClientStatus::Red,
        days_remaining: 3,
        has_exited: false,
        created_by: SAMPLE_AGENCY_ID,
    },
    ClientSpec {
        id: "client003",
        name: "سعد عبدالرحمن",
        phone: "966553333333",
        phone_country: "saudi",
        visa_type: VisaType::Hajj,
        agent: ("مكتب الرحمة", "966554444444"),
        notes: "أكمل الحج بنجاح",
        status: ClientStatus::White,
        days_remaining: 60,
        has_exited: true,
        created_by: SAMPLE_USER_ID,
    },
];

/// Id of the sample client whose visa is about to expire.
pub const CRITICAL_CLIENT_ID: &str = "client002";

/// Builds the sample clients.
pub struct ClientGenerator {
    config: SeedConfig,
}

impl ClientGenerator {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// One client per status: healthy, about to expire, and already exited.
    pub fn samples(&self, now: OffsetDateTime) -> Vec<Client> {
        SAMPLE_CLIENTS
            .iter()
            .map(|spec| self.generate(spec, now))
            .collect()
    }

    fn generate(&self, spec: &ClientSpec, now: OffsetDateTime) -> Client {
        let days_since_entry = self.config.visa_validity_days - spec.days_remaining;
        let entry_date = now - Duration::days(days_since_entry);
        let (agent_name, agent_phone) = spec.agent;

        Client {
            id: spec.id.to_string(),
            client_name: spec.name.to_string(),
            client_phone: spec.phone.to_string(),
            phone_country: spec.phone_country.to_string(),
            visa_type: spec.visa_type,
            agent_name: Some(agent_name.to_string()),
            agent_phone: Some(agent_phone.to_string()),
            entry_date: epoch_millis(entry_date),
            notes: spec.notes.to_string(),
            status: spec.status,
            days_remaining: spec.days_remaining,
            has_exited: spec.has_exited,
            created_by: spec.created_by.to_string(),
            created_at: epoch_millis(now),
            updated_at: epoch_millis(now),
        }
    }
}

impl Default for ClientGenerator {
    fn default() -> Self {
        Self::new(SeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_sample_statuses() {
        let clients = ClientGenerator::default().samples(OffsetDateTime::now_utc());

        let statuses: Vec<ClientStatus> = clients.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            [ClientStatus::Green, ClientStatus::Red, ClientStatus::White]
        );

        let exited: Vec<bool> = clients.iter().map(|c| c.has_exited).collect();
        assert_eq!(exited, [false, false, true]);
    }

    #[test]
    fn test_entry_dates_back_dated() {
        let now = datetime!(2024-06-15 08:30 UTC);
        let now_ms = epoch_millis(now);
        let clients = ClientGenerator::default().samples(now);

        let offsets: Vec<i64> = clients
            .iter()
            .map(|c| (now_ms - c.entry_date) / DAY_MS)
            .collect();
        assert_eq!(offsets, [20, 87, 30]);

        for client in &clients {
            assert_eq!(client.created_at, now_ms);
            assert_eq!(client.updated_at, now_ms);
        }
    }

    #[test]
    fn test_entry_dates_follow_validity() {
        let now = datetime!(2024-06-15 08:30 UTC);
        let config = SeedConfig {
            visa_validity_days: 30,
            ..SeedConfig::default()
        };
        let clients = ClientGenerator::new(config).samples(now);

        let critical = clients.iter().find(|c| c.id == CRITICAL_CLIENT_ID).unwrap();
        assert_eq!(critical.days_remaining, 3);
        assert_eq!(epoch_millis(now) - critical.entry_date, 27 * DAY_MS);
    }

    #[test]
    fn test_critical_client_has_empty_agent() {
        let clients = ClientGenerator::default().samples(OffsetDateTime::now_utc());
        let critical = &clients[1];

        assert_eq!(critical.id, CRITICAL_CLIENT_ID);
        assert_eq!(critical.agent_name.as_deref(), Some(""));
        assert_eq!(critical.created_by, SAMPLE_AGENCY_ID);
    }
}
