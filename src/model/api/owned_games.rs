use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::OWNED_GAMES_API;
use crate::dispatcher::QueryParams;
use crate::error::Result;
use crate::model::SteamId;

/// Optional flags for [`Client::get_owned_games`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedGamesParams {
    /// Fill in [`OwnedGame::name`] and the image hashes
    pub include_appinfo: bool,
    /// Also list free games the user has played
    pub include_played_free_games: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OwnedGame {
    #[serde(rename(deserialize = "appid"))]
    pub app_id: u64,
    pub name: Option<String>,
    /// Minutes played in the last two weeks
    #[serde(rename(deserialize = "playtime_2weeks"), default)]
    pub playtime_two_weeks: u32,
    /// Minutes played in total
    #[serde(default)]
    pub playtime_forever: u32,
    pub img_icon_url: Option<String>,
    pub img_logo_url: Option<String>,
    #[serde(default)]
    pub has_community_visible_stats: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OwnedGames {
    pub game_count: u32,
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

impl OwnedGames {
    pub fn get(&self, app_id: u64) -> Option<&OwnedGame> {
        self.games.iter().find(|game| game.app_id == app_id)
    }
}

#[derive(Deserialize, Debug)]
struct ResponseInner {
    game_count: Option<u32>,
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Deserialize, Debug)]
struct Response {
    response: ResponseInner,
}

impl From<Response> for Option<OwnedGames> {
    fn from(value: Response) -> Self {
        let ResponseInner { game_count, games } = value.response;
        game_count.map(|game_count| OwnedGames { game_count, games })
    }
}

impl Client {
    /// Get the games owned by the given [`SteamId`]
    ///
    /// Private profiles answer with an empty `response` object, which gives [`None`].
    pub async fn get_owned_games(
        &self,
        id: SteamId,
        options: OwnedGamesParams,
    ) -> Result<Option<OwnedGames>> {
        let mut params = QueryParams::new();
        params
            .push("steamid", id)
            .push("include_appinfo", options.include_appinfo)
            .push("include_played_free_games", options.include_played_free_games);

        let json = self.get_json::<Response>(OWNED_GAMES_API, params).await?;
        Ok(json.into())
    }
}
