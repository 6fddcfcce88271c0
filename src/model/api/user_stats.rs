use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::{GLOBAL_ACHIEVEMENTS_API, PLAYER_ACHIEVEMENTS_API};
use crate::dispatcher::QueryParams;
use crate::error::Result;
use crate::model::{Loose, SteamId, SteamIdStr, SteamTime};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Achievement {
    #[serde(rename(deserialize = "apiname"))]
    pub api_name: String,
    /// `1` if unlocked
    pub achieved: u8,
    #[serde(rename(deserialize = "unlocktime"))]
    pub unlock_time: Option<SteamTime>,
    /// Only sent when a language was requested
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Achievement {
    pub fn is_achieved(&self) -> bool {
        self.achieved != 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerStats {
    #[serde(rename(deserialize = "steamID"))]
    pub steam_id: SteamIdStr,
    #[serde(rename(deserialize = "gameName"))]
    pub game_name: String,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    pub success: bool,
}

impl PlayerStats {
    pub fn achieved(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.is_achieved())
    }
}

#[derive(Deserialize, Debug)]
struct PlayerStatsResponse {
    #[serde(rename = "playerstats")]
    player_stats: PlayerStats,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GlobalAchievement {
    pub name: String,
    /// Steam sends this as a string on newer versions of the endpoint
    pub percent: Loose<f64>,
}

#[derive(Deserialize, Debug)]
struct GlobalAchievementList {
    achievements: Vec<GlobalAchievement>,
}

#[derive(Deserialize, Debug)]
struct GlobalResponse {
    #[serde(rename = "achievementpercentages")]
    achievement_percentages: GlobalAchievementList,
}

impl Client {
    /// Achievements of a user in one game. `language` adds localized names and
    /// descriptions.
    pub async fn get_player_achievements(
        &self,
        id: SteamId,
        app_id: u64,
        language: Option<&str>,
    ) -> Result<PlayerStats> {
        let mut params = QueryParams::new();
        params
            .push("steamid", id)
            .push("appid", app_id)
            .push_opt("l", language);

        let json = self
            .get_json::<PlayerStatsResponse>(PLAYER_ACHIEVEMENTS_API, params)
            .await?;
        Ok(json.player_stats)
    }

    /// Percentage of players who unlocked each achievement of a game
    pub async fn get_global_achievement_percentages(
        &self,
        app_id: u64,
    ) -> Result<Vec<GlobalAchievement>> {
        let mut params = QueryParams::new();
        params.push("gameid", app_id);

        let json = self
            .get_json::<GlobalResponse>(GLOBAL_ACHIEVEMENTS_API, params)
            .await?;
        Ok(json.achievement_percentages.achievements)
    }
}
