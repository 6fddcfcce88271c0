use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

/// `profilestate` is `1` if the user has set up their community profile and
/// missing otherwise. Fields using this need `#[serde(default)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ProfileState {
    Configured,
    #[default]
    NotConfigured,
}

struct ProfileStateVisitor;

impl<'de> Visitor<'de> for ProfileStateVisitor {
    type Value = ProfileState;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("profile state as either null or the number 1")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ProfileState::NotConfigured)
    }
    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ProfileState::NotConfigured)
    }
    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_i64(ProfileStateVisitor)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            1 => Ok(ProfileState::Configured),
            _ => Err(de::Error::invalid_value(Unexpected::Signed(v), &self)),
        }
    }
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            1 => Ok(ProfileState::Configured),
            _ => Err(de::Error::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for ProfileState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_option(ProfileStateVisitor)
    }
}
