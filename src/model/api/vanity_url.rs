use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::VANITY_API;
use crate::dispatcher::QueryParams;
use crate::error::Result;
use crate::model::{SteamId, SteamIdStr};

/// What kind of vanity url to resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VanityType {
    #[default]
    Individual = 1,
    Group = 2,
    OfficialGameGroup = 3,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VanityUrl {
    #[serde(rename = "steamid")]
    steam_id: Option<SteamIdStr>,
    /// `1` on success, `42` if nothing matched
    pub success: u32,
    pub message: Option<String>,
}

impl VanityUrl {
    pub fn steam_id(&self) -> Option<SteamId> {
        self.steam_id.map(SteamId::from)
    }
}

#[derive(Deserialize, Debug)]
struct Response {
    response: VanityUrl,
}

impl From<Response> for VanityUrl {
    fn from(value: Response) -> Self {
        value.response
    }
}

impl Client {
    /// Resolve a Vanity-URL using [`this endpoint`](https://partner.steamgames.com/doc/webapi/ISteamUser#ResolveVanityURL).
    pub async fn resolve_vanity_url(&self, vanity_url: &str, kind: VanityType) -> Result<VanityUrl> {
        let mut params = QueryParams::new();
        params
            .push("vanityurl", vanity_url)
            .push("url_type", kind as u8);

        let json = self.get_json::<Response>(VANITY_API, params).await?;
        Ok(json.into())
    }
}
