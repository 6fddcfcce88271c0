use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A value the Steam API sometimes sends as a number and sometimes as a string
/// (`"required_age": 0` vs `"required_age": "18"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Loose<T>(pub T);

impl<T> Loose<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Loose<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Value(T),
    Text(String),
}

impl<'de, T> Deserialize<'de> for Loose<T>
where
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(value) => Ok(Loose(value)),
            Repr::Text(text) => text
                .trim()
                .parse()
                .map(Loose)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Loose;

    #[test]
    fn accepts_numbers_and_strings() {
        let parsed: Vec<Loose<u32>> = serde_json::from_str(r#"[0, "18", " 7 "]"#).unwrap();
        assert_eq!(parsed, [Loose(0), Loose(18), Loose(7)]);

        let parsed: Loose<f64> = serde_json::from_str(r#""71.30000305175781""#).unwrap();
        assert!((parsed.into_inner() - 71.3).abs() < 1e-4);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Loose<u32>>(r#""eighteen""#).is_err());
        assert!(serde_json::from_str::<Loose<u32>>("true").is_err());
    }
}
