//! Post data model.
//!
//! Ids are opaque snowflakes, totally ordered by recency (larger = newer).
//! A fetched history is newest-first and strictly descending by id; that
//! ordering is what the retention partition relies on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post in the user's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(with = "platform_date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
}

/// The platform's legacy timestamp format, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub(crate) mod platform_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&s, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
