use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use models::expense::{AmountField, Category, Model};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Authenticated user id attached to a request by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId(pub Uuid);

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Create request as sent by a client. Every field may be missing; presence is
/// checked by the service, shape and enum membership by the model layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExpenseInput {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountField>,
    #[serde(default)]
    pub category: Option<String>,
    /// RFC 3339 timestamp, or a bare `YYYY-MM-DD` day (midnight UTC)
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| serde::de::Error::custom(format!("`{raw}` is not a date")))
}

/// Stored expense (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Expense {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            amount: m.amount,
            category: m.category,
            date: m.date.with_timezone(&Utc),
            owner: m.owner_id,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
