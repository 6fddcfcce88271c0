use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::Client;
use crate::constants::{PLAYER_SUMMARIES_API, PLAYER_SUMMARIES_IDS_PER_REQUEST};
use crate::dispatcher::QueryParams;
use crate::model::steam_id::unique_ids;
use crate::model::{
    CommunityVisibilityState, PersonaState, ProfileState, SteamId, SteamIdQueryExt, SteamIdStr,
    SteamTime,
};

#[derive(Error, Debug)]
pub enum PlayerSummaryError {
    /// This API can only handle up to [`PLAYER_SUMMARIES_IDS_PER_REQUEST`] ids per request
    #[error("too many ids passed for request")]
    TooManyIds,

    #[error(transparent)]
    Request(#[from] crate::Error),
}
type Result<T> = std::result::Result<T, PlayerSummaryError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerSummary {
    #[serde(rename(deserialize = "steamid"))]
    pub steam_id: SteamIdStr,
    #[serde(rename(deserialize = "communityvisibilitystate"))]
    pub community_visibility_state: CommunityVisibilityState,
    #[serde(rename(deserialize = "profilestate"), default)]
    pub profile_state: ProfileState,
    #[serde(rename(deserialize = "personaname"))]
    pub persona_name: String,
    #[serde(rename(deserialize = "profileurl"))]
    pub profile_url: String,
    #[serde(rename(deserialize = "avatar"))]
    pub avatar: String,
    #[serde(rename(deserialize = "avatarmedium"))]
    pub avatar_medium: String,
    #[serde(rename(deserialize = "avatarfull"))]
    pub avatar_full: String,
    #[serde(rename(deserialize = "avatarhash"), default)]
    pub avatar_hash: String,
    #[serde(rename(deserialize = "lastlogoff"))]
    pub last_logoff: Option<SteamTime>,
    #[serde(rename(deserialize = "personastate"))]
    pub persona_state: PersonaState,
    #[serde(rename(deserialize = "realname"))]
    pub real_name: Option<String>,
    #[serde(rename(deserialize = "primaryclanid"))]
    pub primary_clan_id: Option<String>,
    #[serde(rename(deserialize = "timecreated"))]
    pub time_created: Option<SteamTime>,
    #[serde(rename(deserialize = "personastateflags"))]
    pub persona_state_flags: Option<u64>,
    #[serde(rename(deserialize = "loccountrycode"))]
    pub local_country_code: Option<String>,
    #[serde(rename(deserialize = "locstatecode"))]
    pub local_state_code: Option<String>,
    #[serde(rename(deserialize = "loccityid"))]
    pub local_city_id: Option<u64>,
    /// Set while the user is in a game
    #[serde(rename(deserialize = "gameid"))]
    pub game_id: Option<String>,
    #[serde(rename(deserialize = "gameextrainfo"))]
    pub game_extra_info: Option<String>,
}

/// Profiles that don't exist are missing from the map
#[derive(Debug, Clone, Default)]
pub struct PlayerSummaries {
    inner: HashMap<SteamId, PlayerSummary>,
}

impl PlayerSummaries {
    pub fn into_inner(self) -> HashMap<SteamId, PlayerSummary> {
        self.inner
    }
}

impl Deref for PlayerSummaries {
    type Target = HashMap<SteamId, PlayerSummary>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Deserialize, Debug)]
struct ResponseInner {
    players: Vec<PlayerSummary>,
}

#[derive(Deserialize, Debug)]
struct Response {
    response: ResponseInner,
}

impl From<Response> for PlayerSummaries {
    fn from(value: Response) -> Self {
        let map = value
            .response
            .players
            .into_iter()
            .map(|summary| (summary.steam_id.into(), summary))
            .collect();

        PlayerSummaries { inner: map }
    }
}

impl Client {
    /// Get the summaries of the profiles with the given [`SteamId`]s
    ///
    /// Uses [`PLAYER_SUMMARIES_API`]
    pub async fn get_player_summaries(
        &self,
        steam_id_chunk: Cow<'_, [SteamId]>,
    ) -> Result<PlayerSummaries> {
        let steam_ids = unique_ids(steam_id_chunk);
        if steam_ids.len() > PLAYER_SUMMARIES_IDS_PER_REQUEST {
            return Err(PlayerSummaryError::TooManyIds);
        }

        let mut params = QueryParams::new();
        params.push("steamids", steam_ids.iter().to_steam_id_string(","));

        let resp = self
            .get_json::<Response>(PLAYER_SUMMARIES_API, params)
            .await?;
        Ok(resp.into())
    }

    /// Like [`Client::get_player_summaries`] but for any number of ids.
    ///
    /// The ids are split into chunks of [`PLAYER_SUMMARIES_IDS_PER_REQUEST`]
    /// which are all queued at once.
    pub async fn get_player_summaries_bulk(
        &self,
        steam_ids: &[SteamId],
    ) -> Result<PlayerSummaries> {
        let steam_ids = unique_ids(Cow::Borrowed(steam_ids));
        let requests = steam_ids
            .chunks(PLAYER_SUMMARIES_IDS_PER_REQUEST)
            .map(|chunk| self.get_player_summaries(Cow::Borrowed(chunk)));

        let inner = futures::future::try_join_all(requests)
            .await?
            .into_iter()
            .flat_map(PlayerSummaries::into_inner)
            .collect();

        Ok(PlayerSummaries { inner })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{PlayerSummaries, PlayerSummaryError, Response};
    use crate::model::{CommunityVisibilityState, PersonaState, ProfileState, SteamId};
    use crate::test_util::{mock_client, MockTransport};

    const PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";

    #[test]
    fn parses() {
        let json: Response = load_test_json!("player_summaries.json");
        let summaries: PlayerSummaries = json.into();
        assert_eq!(summaries.len(), 2);

        let gabe = &summaries[&SteamId(76561197960287930)];
        assert_eq!(gabe.persona_name, "Rabscuttle");
        assert_eq!(gabe.community_visibility_state, CommunityVisibilityState::Public);
        assert_eq!(gabe.profile_state, ProfileState::Configured);
        assert_eq!(gabe.persona_state, PersonaState::Offline);
        assert_eq!(gabe.time_created.unwrap().timestamp(), 1063407589);

        let private = &summaries[&SteamId(76561197985607672)];
        assert_eq!(private.community_visibility_state, CommunityVisibilityState::Private);
        assert_eq!(private.profile_state, ProfileState::NotConfigured);
        assert!(private.real_name.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sends_sorted_unique_ids() {
        let mock = MockTransport::new();
        mock.respond(PATH, 200, test_resource_str!("player_summaries.json"));
        let client = mock_client(&mock);

        let ids = [SteamId(76561197985607672), SteamId(76561197960287930), SteamId(76561197985607672)];
        let summaries = client.get_player_summaries(Cow::Borrowed(&ids)).await.unwrap();
        assert_eq!(summaries.len(), 2);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].param("steamids").unwrap(),
            "76561197960287930,76561197985607672"
        );
        assert_eq!(calls[0].param("key").unwrap(), "SECRET");
    }

    #[tokio::test(start_paused = true)]
    async fn refuses_more_than_100_ids() {
        let mock = MockTransport::new();
        let client = mock_client(&mock);

        let ids: Vec<SteamId> = (0..101).map(SteamId).collect();
        let res = client.get_player_summaries(Cow::Owned(ids)).await;
        assert!(matches!(res, Err(PlayerSummaryError::TooManyIds)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn bulk_splits_into_chunks() {
        let mock = MockTransport::new();
        mock.respond(PATH, 200, test_resource_str!("player_summaries.json"));
        let client = mock_client(&mock);

        let ids: Vec<SteamId> = (0..250).map(SteamId).collect();
        let summaries = client.get_player_summaries_bulk(&ids).await.unwrap();
        assert_eq!(summaries.len(), 2);

        let sizes: Vec<usize> = mock
            .calls()
            .iter()
            .map(|c| c.param("steamids").unwrap().split(',').count())
            .collect();
        assert_eq!(sizes, [100, 100, 50]);
    }
}
