use std::collections::HashMap;
use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::PLAYER_FRIENDS_API;
use crate::dispatcher::QueryParams;
use crate::error::{Error, Result};
use crate::model::{SteamId, SteamIdStr, SteamTime};

/// Which relationships [`Client::get_player_friends`] returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relationship {
    #[default]
    Friend,
    All,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::Friend => f.write_str("friend"),
            Relationship::All => f.write_str("all"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Friend {
    #[serde(rename(deserialize = "steamid"))]
    pub steam_id: SteamIdStr,
    pub relationship: String,
    #[serde(rename(deserialize = "friend_since"))]
    pub friends_since: SteamTime,
}

#[derive(Debug, Clone)]
pub struct FriendsList {
    /// - [`None`], if the user has set their friends to **private**
    /// - [`Some`], if the user has set their friends to **public**
    ///
    /// The [`HashMap`] is empty, if the user has **no friends**
    inner: Option<HashMap<SteamId, Friend>>,
}

#[derive(Deserialize)]
struct ResponseInner {
    friends: Vec<Friend>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(rename(deserialize = "friendslist"))]
    friend_list: Option<ResponseInner>,
}

impl From<Response> for FriendsList {
    fn from(value: Response) -> Self {
        let Some(friends) = value.friend_list else {
            return FriendsList::private();
        };

        let map = friends
            .friends
            .into_iter()
            .map(|friend| (friend.steam_id.into(), friend))
            .collect();

        FriendsList { inner: Some(map) }
    }
}

impl FriendsList {
    const fn private() -> Self {
        FriendsList { inner: None }
    }
    pub const fn is_private(&self) -> bool {
        self.inner.is_none()
    }
    pub fn into_inner(self) -> Option<HashMap<SteamId, Friend>> {
        self.inner
    }
    pub const fn as_inner_ref(&self) -> Option<&HashMap<SteamId, Friend>> {
        self.inner.as_ref()
    }
}

impl Client {
    /// Get the friends of the profile with the given [`SteamId`]
    ///
    /// Private friend lists are answered with `401`, which is turned into a
    /// [`FriendsList`] without entries instead of an error.
    ///
    /// Uses [`PLAYER_FRIENDS_API`]
    pub async fn get_player_friends(
        &self,
        id: SteamId,
        relationship: Relationship,
    ) -> Result<FriendsList> {
        let mut params = QueryParams::new();
        params.push("steamid", id).push("relationship", relationship);

        match self.get_json::<Response>(PLAYER_FRIENDS_API, params).await {
            Ok(resp) => Ok(resp.into()),
            Err(Error::Api(err)) if err.status() == StatusCode::UNAUTHORIZED => {
                Ok(FriendsList::private())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FriendsList, Relationship, Response};
    use crate::model::SteamId;
    use crate::test_util::{mock_client, MockTransport};

    const PATH: &str = "/ISteamUser/GetFriendList/v1/";

    #[test]
    fn parses_private() {
        let resp: Response = load_test_json!("player_friends_private.json");
        let friends: FriendsList = resp.into();
        assert!(friends.is_private());
    }

    #[test]
    fn parses_public() {
        let resp: Response = load_test_json!("player_friends_public.json");
        let friends: FriendsList = resp.into();
        let map = friends.into_inner().unwrap();
        assert_eq!(map.len(), 3);

        let friend = &map[&SteamId(76561197960265731)];
        assert_eq!(friend.relationship, "friend");
        assert_eq!(friend.friends_since.timestamp(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_means_private() {
        let mock = MockTransport::new();
        mock.respond(PATH, 401, "<html>Unauthorized</html>");
        let client = mock_client(&mock);

        let friends = client
            .get_player_friends(SteamId(76561197960287930), Relationship::Friend)
            .await
            .unwrap();
        assert!(friends.is_private());

        let calls = mock.calls();
        assert_eq!(calls[0].param("steamid").unwrap(), "76561197960287930");
        assert_eq!(calls[0].param("relationship").unwrap(), "friend");
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_stay_errors() {
        let mock = MockTransport::new();
        mock.respond(PATH, 400, "bad request");
        let client = mock_client(&mock);

        let res = client
            .get_player_friends(SteamId(1), Relationship::All)
            .await;
        assert_eq!(res.unwrap_err().status().map(|s| s.as_u16()), Some(400));
    }
}
