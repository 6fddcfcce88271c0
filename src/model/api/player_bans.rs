use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::Client;
use crate::constants::{PLAYER_BANS_API, PLAYER_BANS_IDS_PER_REQUEST};
use crate::dispatcher::QueryParams;
use crate::model::steam_id::unique_ids;
use crate::model::{EconomyBan, SteamId, SteamIdQueryExt, SteamIdStr};

#[derive(Debug, Error)]
pub enum PlayerBanError {
    /// This API can only handle up to [`PLAYER_BANS_IDS_PER_REQUEST`] ids per request
    #[error("too many ids passed for request")]
    TooManyIds,

    #[error(transparent)]
    Request(#[from] crate::Error),
}
type Result<T> = std::result::Result<T, PlayerBanError>;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PlayerBan {
    #[serde(rename(deserialize = "SteamId"))]
    pub steam_id: SteamIdStr,
    #[serde(rename(deserialize = "CommunityBanned"))]
    pub community_banned: bool,
    #[serde(rename(deserialize = "VACBanned"))]
    pub vac_banned: bool,
    #[serde(rename(deserialize = "NumberOfVACBans"))]
    pub number_of_vac_bans: u32,
    #[serde(rename(deserialize = "DaysSinceLastBan"))]
    pub days_since_last_ban: u32,
    #[serde(rename(deserialize = "NumberOfGameBans"))]
    pub number_of_game_bans: u32,
    #[serde(rename(deserialize = "EconomyBan"))]
    pub economy_ban: EconomyBan,
}

impl PlayerBan {
    pub fn is_banned(&self) -> bool {
        self.vac_banned
            || self.community_banned
            || self.number_of_game_bans > 0
            || self.economy_ban == EconomyBan::Banned
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerBans {
    inner: HashMap<SteamId, PlayerBan>,
}

impl PlayerBans {
    pub fn into_inner(self) -> HashMap<SteamId, PlayerBan> {
        self.inner
    }
}

impl Deref for PlayerBans {
    type Target = HashMap<SteamId, PlayerBan>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Deserialize, Debug)]
struct Response {
    players: Vec<PlayerBan>,
}

impl From<Response> for PlayerBans {
    fn from(value: Response) -> Self {
        let map = value
            .players
            .into_iter()
            .map(|ban| (ban.steam_id.into(), ban))
            .collect();
        PlayerBans { inner: map }
    }
}

impl Client {
    /// Get the bans of the profiles with the given [`SteamId`]s
    ///
    /// Uses [`PLAYER_BANS_API`]
    pub async fn get_player_bans(&self, steam_id_chunk: Cow<'_, [SteamId]>) -> Result<PlayerBans> {
        let steam_ids = unique_ids(steam_id_chunk);
        if steam_ids.len() > PLAYER_BANS_IDS_PER_REQUEST {
            return Err(PlayerBanError::TooManyIds);
        }

        let mut params = QueryParams::new();
        params.push("steamids", steam_ids.iter().to_steam_id_string(","));

        let resp = self.get_json::<Response>(PLAYER_BANS_API, params).await?;
        Ok(resp.into())
    }

    /// Like [`Client::get_player_bans`] but for any number of ids
    pub async fn get_player_bans_bulk(&self, steam_ids: &[SteamId]) -> Result<PlayerBans> {
        let steam_ids = unique_ids(Cow::Borrowed(steam_ids));
        let requests = steam_ids
            .chunks(PLAYER_BANS_IDS_PER_REQUEST)
            .map(|chunk| self.get_player_bans(Cow::Borrowed(chunk)));

        let inner = futures::future::try_join_all(requests)
            .await?
            .into_iter()
            .flat_map(PlayerBans::into_inner)
            .collect();

        Ok(PlayerBans { inner })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{PlayerBans, Response};
    use crate::model::{EconomyBan, SteamId};
    use crate::test_util::{mock_client, MockTransport};

    #[test]
    fn parses() {
        let resp: Response = load_test_json!("player_bans.json");
        let bans: PlayerBans = resp.into();
        assert_eq!(bans.len(), 2);

        let clean = &bans[&SteamId(76561197960287930)];
        assert!(!clean.is_banned());

        let banned = &bans[&SteamId(76561198805665689)];
        assert!(banned.vac_banned);
        assert_eq!(banned.number_of_vac_bans, 2);
        assert_eq!(banned.days_since_last_ban, 1337);
        assert_eq!(banned.economy_ban, EconomyBan::Probation);
        assert!(banned.is_banned());
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_errors_reach_the_caller() {
        let mock = MockTransport::new();
        mock.respond("/ISteamUser/GetPlayerBans/v1/", 403, "<html>Forbidden</html>");
        let client = mock_client(&mock);

        let err = client
            .get_player_bans(Cow::Owned(vec![SteamId(76561197960287930)]))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("access denied"), "{}", err);
        assert_eq!(mock.calls().len(), 1);
    }
}
