//! Steam Web API client that sends every request through one throttled,
//! retrying queue.
//!
//! All requests of a [`Client`] (and its clones) are executed one at a time by
//! a single background task. An optional token bucket spaces them out, and
//! responses with status `500` or `503` are put back into the queue after a
//! cooldown instead of failing right away.
//!
//! # Current state
//!
//! Currently provides abstractions for the following endpoints:
//! - [x] [`api.steampowered.com/ISteamUser/ResolveVanityURL/v1/`]
//! - [x] [`api.steampowered.com/ISteamUser/GetPlayerSummaries/v2/`]
//! - [x] [`api.steampowered.com/ISteamUser/GetFriendList/v1/`]
//! - [x] [`api.steampowered.com/ISteamUser/GetPlayerBans/v1/`]
//! - [x] [`api.steampowered.com/IPlayerService/GetSteamLevel/v1/`]
//! - [x] [`api.steampowered.com/IPlayerService/GetOwnedGames/v1/`]
//! - [x] [`api.steampowered.com/ISteamApps/GetAppList/v2/`]
//! - [x] [`api.steampowered.com/ISteamNews/GetNewsForApp/v2/`]
//! - [x] [`api.steampowered.com/ISteamUserStats/GetPlayerAchievements/v1/`]
//! - [x] [`api.steampowered.com/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/`]
//! - [x] [`store.steampowered.com/api/appdetails/`]
//! - [x] [`store.steampowered.com/appreviews/`]
//!
//! [`api.steampowered.com/ISteamUser/ResolveVanityURL/v1/`]: https://api.steampowered.com/ISteamUser/ResolveVanityURL/v1/
//! [`api.steampowered.com/ISteamUser/GetPlayerSummaries/v2/`]: https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v2/
//! [`api.steampowered.com/ISteamUser/GetFriendList/v1/`]: https://api.steampowered.com/ISteamUser/GetFriendList/v1/
//! [`api.steampowered.com/ISteamUser/GetPlayerBans/v1/`]: https://api.steampowered.com/ISteamUser/GetPlayerBans/v1/
//! [`api.steampowered.com/IPlayerService/GetSteamLevel/v1/`]: https://api.steampowered.com/IPlayerService/GetSteamLevel/v1/
//! [`api.steampowered.com/IPlayerService/GetOwnedGames/v1/`]: https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/
//! [`api.steampowered.com/ISteamApps/GetAppList/v2/`]: https://api.steampowered.com/ISteamApps/GetAppList/v2/
//! [`api.steampowered.com/ISteamNews/GetNewsForApp/v2/`]: https://api.steampowered.com/ISteamNews/GetNewsForApp/v2/
//! [`api.steampowered.com/ISteamUserStats/GetPlayerAchievements/v1/`]: https://api.steampowered.com/ISteamUserStats/GetPlayerAchievements/v1/
//! [`api.steampowered.com/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/`]: https://api.steampowered.com/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/
//! [`store.steampowered.com/api/appdetails/`]: https://store.steampowered.com/api/appdetails/
//! [`store.steampowered.com/appreviews/`]: https://store.steampowered.com/appreviews/
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use steam_api_queued::{ClientOptions, SteamId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientOptions::new()
//!     .api_key("YOUR_API_KEY")
//!     .throttle(Duration::from_millis(500), 4)
//!     .build()?;
//!
//! let level = client.get_player_steam_level(SteamId(76561197960287930)).await?;
//! println!("{:?}", level.lvl());
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
#[macro_use]
mod test_util;

mod client;
pub use client::{Client, ClientOptions};

pub mod constants;

mod dispatcher;
pub use dispatcher::{Dispatcher, PendingReply, Query, QueryParams, RetryPolicy};

mod error;
pub use error::{redact_url, ApiError, Error, Result};

mod model;
pub use model::api::*;
pub use model::*;

mod token_bucket;
pub use token_bucket::{Throttle, TokenBucket};

mod transport;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
