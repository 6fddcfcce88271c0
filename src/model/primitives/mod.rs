#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumError<T> {
    Unknown(T),
}

/// Enum that the Steam API sends as a plain integer.
macro_rules! integer_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($expecting:literal) {
            $($variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize)]
        pub enum $name {
            $($variant = $value,)+
        }

        impl TryFrom<i64> for $name {
            type Error = super::EnumError<i64>;
            fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(super::EnumError::Unknown(value)),
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                use ::serde::de::{Error, Unexpected};

                let value = i64::deserialize(deserializer)?;
                $name::try_from(value)
                    .map_err(|_| D::Error::invalid_value(Unexpected::Signed(value), &$expecting))
            }
        }
    };
}

mod community_visibility_state;
pub use community_visibility_state::CommunityVisibilityState;

mod economy_ban;
pub use economy_ban::EconomyBan;

mod loose;
pub use loose::Loose;

mod persona_state;
pub use persona_state::PersonaState;

mod profile_state;
pub use profile_state::ProfileState;

mod steam_time;
pub use steam_time::SteamTime;
