use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::PLAYER_STEAM_LEVEL_API;
use crate::dispatcher::QueryParams;
use crate::error::Result;
use crate::model::SteamId;

/// [`None`] for deleted or private profiles
#[derive(Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct SteamLevel(Option<u64>);

impl SteamLevel {
    pub const fn lvl(self) -> Option<u64> {
        self.0
    }
    pub fn lvl_or(self, default: u64) -> u64 {
        self.0.unwrap_or(default)
    }
}

#[derive(Deserialize, Debug)]
struct ResponseInner {
    player_level: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct Response {
    response: ResponseInner,
}

impl From<Response> for SteamLevel {
    fn from(value: Response) -> Self {
        SteamLevel(value.response.player_level)
    }
}

impl Client {
    /// Get the Steam level of the given [`SteamId`]
    ///
    /// Uses [`PLAYER_STEAM_LEVEL_API`]
    pub async fn get_player_steam_level(&self, id: SteamId) -> Result<SteamLevel> {
        let mut params = QueryParams::new();
        params.push("steamid", id);

        let json = self
            .get_json::<Response>(PLAYER_STEAM_LEVEL_API, params)
            .await?;
        Ok(json.into())
    }
}
