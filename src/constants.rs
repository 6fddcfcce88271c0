use std::time::Duration;

/// Base of every Steam Web API endpoint
pub const API_BASE: &str = "https://api.steampowered.com/";
/// Base of the (undocumented) store endpoints
pub const STORE_BASE: &str = "https://store.steampowered.com/";

/// [`/ISteamUser/ResolveVanityURL/v1/`](https://partner.steamgames.com/doc/webapi/ISteamUser#:~:text=/ISteamUser/ResolveVanityURL/v1/)
pub const VANITY_API: &str = "ISteamUser/ResolveVanityURL/v1/";

/// [`/ISteamUser/GetPlayerSummaries/v2/`](https://partner.steamgames.com/doc/webapi/ISteamUser#:~:text=/ISteamUser/GetPlayerSummaries/v2/)
pub const PLAYER_SUMMARIES_API: &str = "ISteamUser/GetPlayerSummaries/v2/";
pub const PLAYER_SUMMARIES_IDS_PER_REQUEST: usize = 100;

/// [`/ISteamUser/GetFriendList/v1/`](https://partner.steamgames.com/doc/webapi/ISteamUser#:~:text=/ISteamUser/GetFriendList/v1/)
pub const PLAYER_FRIENDS_API: &str = "ISteamUser/GetFriendList/v1/";

/// [`/ISteamUser/GetPlayerBans/v1/`](https://partner.steamgames.com/doc/webapi/ISteamUser#:~:text=/ISteamUser/GetPlayerBans/v1/)
pub const PLAYER_BANS_API: &str = "ISteamUser/GetPlayerBans/v1/";
pub const PLAYER_BANS_IDS_PER_REQUEST: usize = 100;

/// [`/IPlayerService/GetSteamLevel/v1/`](https://partner.steamgames.com/doc/webapi/IPlayerService#GetOwnedGames:~:text=/IPlayerService/GetSteamLevel/v1/)
pub const PLAYER_STEAM_LEVEL_API: &str = "IPlayerService/GetSteamLevel/v1/";

/// [`/IPlayerService/GetOwnedGames/v1/`](https://partner.steamgames.com/doc/webapi/IPlayerService#GetOwnedGames)
pub const OWNED_GAMES_API: &str = "IPlayerService/GetOwnedGames/v1/";

/// [`/ISteamApps/GetAppList/v2/`](https://wiki.teamfortress.com/wiki/WebAPI/GetAppList)
pub const APP_LIST_API: &str = "ISteamApps/GetAppList/v2/";

/// [`/ISteamNews/GetNewsForApp/v2/`](https://partner.steamgames.com/doc/webapi/ISteamNews#GetNewsForApp)
pub const NEWS_FOR_APP_API: &str = "ISteamNews/GetNewsForApp/v2/";

/// [`/ISteamUserStats/GetPlayerAchievements/v1/`](https://partner.steamgames.com/doc/webapi/ISteamUserStats#GetPlayerAchievements)
pub const PLAYER_ACHIEVEMENTS_API: &str = "ISteamUserStats/GetPlayerAchievements/v1/";

/// [`/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/`](https://partner.steamgames.com/doc/webapi/ISteamUserStats#GetGlobalAchievementPercentagesForApp)
pub const GLOBAL_ACHIEVEMENTS_API: &str =
    "ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/";

/// Not documented, see <https://wiki.teamfortress.com/wiki/User:RJackson/StorefrontAPI#appdetails>
pub const STORE_APP_DETAILS_API: &str = "api/appdetails/";

/// [`/appreviews/<appid>`](https://partner.steamgames.com/doc/store/getreviews), the app id is appended
pub const STORE_APP_REVIEWS_API: &str = "appreviews/";

/// How long a query waits before it is re-queued after a `500` or `503`
pub const RETRY_DELAY: Duration = Duration::from_secs(30);
/// How often a single query is re-queued before its error is handed back
pub const DEFAULT_MAX_RETRIES: u32 = 5;
/// Number of queries that can wait in the dispatcher queue before callers
/// have to wait for a free slot
pub const QUEUE_CAPACITY: usize = 256;
