use serde::{Deserialize, Serialize};

/// Undocumented 👻
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomyBan {
    None,
    Probation,
    Banned,
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::EconomyBan;

    #[test]
    fn deserialize_economy_ban() {
        #[derive(Deserialize)]
        struct Test {
            economy_bans: Vec<EconomyBan>,
        }

        let json = serde_json::json!({
            "economy_bans": ["none", "probation", "banned"],
        })
        .to_string();

        let parsed: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.economy_bans,
            [EconomyBan::None, EconomyBan::Probation, EconomyBan::Banned]
        );
        assert!(serde_json::from_str::<EconomyBan>(r#""forever""#).is_err());
    }
}
