mod app_list;
pub use app_list::*;

mod news;
pub use news::*;

mod owned_games;
pub use owned_games::*;

mod player_bans;
pub use player_bans::*;

mod player_friends;
pub use player_friends::*;

mod player_summary;
pub use player_summary::*;

mod steam_level;
pub use steam_level::*;

mod store;
pub use store::*;

mod user_stats;
pub use user_stats::*;

mod vanity_url;
pub use vanity_url::*;
