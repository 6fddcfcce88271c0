use std::ops::Deref;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds, as used all over the Steam API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SteamTime {
    inner: DateTime<Utc>,
}

impl SteamTime {
    pub const fn into_inner(self) -> DateTime<Utc> {
        self.inner
    }
    pub fn timestamp(self) -> i64 {
        self.inner.timestamp()
    }
    /// Steam uses `0` for "never", e.g. for games that were never played
    pub fn is_epoch(self) -> bool {
        self.inner.timestamp() == 0
    }
}

impl Deref for SteamTime {
    type Target = DateTime<Utc>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

struct SteamTimeVisitor;

impl<'de> Visitor<'de> for SteamTimeVisitor {
    type Value = SteamTime;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("unix timestamp in seconds")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let inner = Utc
            .timestamp_opt(v, 0)
            .single()
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Signed(v), &self))?;
        Ok(SteamTime { inner })
    }
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let signed = i64::try_from(v)
            .map_err(|_| de::Error::invalid_value(Unexpected::Unsigned(v), &self))?;
        self.visit_i64(signed)
    }
}

impl<'de> Deserialize<'de> for SteamTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_i64(SteamTimeVisitor)
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use serde::Deserialize;

    use super::SteamTime;

    #[test]
    fn deserialize() {
        #[derive(Deserialize)]
        struct Test {
            time: SteamTime,
        }

        let json = serde_json::json!({ "time": 1681963569 }).to_string();
        let expected = Utc.with_ymd_and_hms(2023, 4, 20, 4, 6, 9).unwrap();

        let parsed: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.time.into_inner(), expected);
        assert!(!parsed.time.is_epoch());
    }

    #[test]
    fn zero_means_never() {
        let parsed: SteamTime = serde_json::from_str("0").unwrap();
        assert!(parsed.is_epoch());
    }
}
