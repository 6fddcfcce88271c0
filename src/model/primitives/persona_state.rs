integer_enum! {
    /// <https://developer.valvesoftware.com/wiki/Steam_Web_API#Public_Data>
    pub enum PersonaState ("persona state as an integer in 0..=7") {
        Offline = 0,
        Online = 1,
        Busy = 2,
        Away = 3,
        Snooze = 4,
        LookingToTrade = 5,
        LookingToPlay = 6,
        Invisible = 7,
    }
}

impl PersonaState {
    /// Everything but [`PersonaState::Offline`]. Invisible users report
    /// themselves as offline, so [`PersonaState::Invisible`] is rarely seen.
    pub const fn is_online(self) -> bool {
        !matches!(self, PersonaState::Offline)
    }
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::PersonaState;

    #[test]
    fn deserialize_persona_state() {
        #[derive(Deserialize)]
        struct Test {
            persona_states: Vec<PersonaState>,
        }

        let json = serde_json::json!({
            "persona_states": [0, 1, 2, 3, 4, 5, 6, 7],
        })
        .to_string();

        let parsed: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.persona_states,
            [
                PersonaState::Offline,
                PersonaState::Online,
                PersonaState::Busy,
                PersonaState::Away,
                PersonaState::Snooze,
                PersonaState::LookingToTrade,
                PersonaState::LookingToPlay,
                PersonaState::Invisible,
            ]
        );
        assert!(!PersonaState::Offline.is_online());
        assert!(PersonaState::Snooze.is_online());
    }

    #[test]
    fn rejects_unknown_persona_state() {
        let res = serde_json::from_str::<PersonaState>("8");
        let err = res.unwrap_err().to_string();
        assert!(err.contains("persona state"), "{}", err);
    }
}
