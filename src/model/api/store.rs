//! Storefront endpoints on `store.steampowered.com`.
//!
//! These are undocumented and loosely typed: numbers arrive as strings, empty
//! objects arrive as empty arrays. Fields that may be missing default to
//! empty values instead of failing the whole response.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::client::Client;
use crate::constants::{STORE_APP_DETAILS_API, STORE_APP_REVIEWS_API};
use crate::dispatcher::QueryParams;
use crate::model::{Loose, SteamIdStr, SteamTime};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Request(#[from] crate::Error),

    /// The store answered `200` but flagged the request as failed
    #[error("store request was not successful (success = {0})")]
    Unsuccessful(u32),
}
type Result<T> = std::result::Result<T, StoreError>;

/// Genre id of games in Early Access
pub const EARLY_ACCESS: &str = "70";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Requirements {
    pub minimum: String,
    pub recommended: Option<String>,
}

/// Steam sends `[]` instead of an object when there are no requirements
fn requirements_or_empty<'de, D>(deserializer: D) -> std::result::Result<Option<Requirements>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        #[allow(dead_code)]
        Empty(Vec<serde::de::IgnoredAny>),
        Requirements(Requirements),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Requirements(req)) => Some(req),
        Some(Repr::Empty(_)) | None => None,
    })
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Price {
    pub currency: String,
    /// In cents
    pub initial: u64,
    /// In cents
    #[serde(rename(deserialize = "final"))]
    pub final_price: u64,
    pub discount_percent: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Sub {
    #[serde(rename(deserialize = "packageid"))]
    pub package_id: Loose<u64>,
    pub percent_savings_text: String,
    pub percent_savings: i32,
    pub option_text: String,
    pub option_description: String,
    pub can_get_free_license: String,
    pub is_free_license: bool,
    pub price_in_cents_with_discount: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PackageGroup {
    pub name: String,
    pub title: String,
    pub description: String,
    pub selection_text: String,
    pub save_text: String,
    pub is_recurring_subscription: String,
    pub subs: Vec<Sub>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(default)]
pub struct Platforms {
    pub windows: bool,
    pub mac: bool,
    pub linux: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MetaCritic {
    pub score: u32,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    pub id: u32,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Genre {
    pub id: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Screenshot {
    pub id: u32,
    pub path_thumbnail: String,
    pub path_full: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Webm {
    #[serde(rename = "480")]
    pub low: String,
    pub max: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Movie {
    pub id: u64,
    pub name: String,
    pub thumbnail: String,
    #[serde(default)]
    pub webm: Webm,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Recommendations {
    pub total: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HighlightedAchievement {
    pub name: String,
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Achievements {
    pub total: u32,
    pub highlighted: Vec<HighlightedAchievement>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ReleaseDate {
    pub coming_soon: bool,
    /// Free text, formatted according to the requested language
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SupportInfo {
    pub url: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppData {
    /// `game`, `dlc`, `demo`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(rename(deserialize = "steam_appid"))]
    pub app_id: u64,
    pub required_age: Loose<u32>,
    pub is_free: bool,
    pub controller_support: Option<String>,
    pub dlc: Vec<u64>,
    pub detailed_description: String,
    pub about_the_game: String,
    pub short_description: String,
    pub supported_languages: String,
    pub reviews: Option<String>,
    pub header_image: String,
    pub website: Option<String>,
    #[serde(deserialize_with = "requirements_or_empty")]
    pub pc_requirements: Option<Requirements>,
    #[serde(deserialize_with = "requirements_or_empty")]
    pub mac_requirements: Option<Requirements>,
    #[serde(deserialize_with = "requirements_or_empty")]
    pub linux_requirements: Option<Requirements>,
    pub legal_notice: Option<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    /// Missing for free apps
    pub price_overview: Option<Price>,
    pub packages: Vec<Loose<u64>>,
    pub package_groups: Vec<PackageGroup>,
    pub platforms: Platforms,
    pub metacritic: Option<MetaCritic>,
    pub categories: Vec<Category>,
    pub genres: Vec<Genre>,
    pub screenshots: Vec<Screenshot>,
    pub movies: Vec<Movie>,
    pub recommendations: Recommendations,
    pub achievements: Achievements,
    pub release_date: ReleaseDate,
    pub support_info: SupportInfo,
    pub background: String,
}

impl AppData {
    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genres.iter().any(|genre| genre.id == genre_id)
    }
    pub fn is_early_access(&self) -> bool {
        self.has_genre(EARLY_ACCESS)
    }
}

/// Region and language of [`Client::get_app_details`]
#[derive(Debug, Clone, Default)]
pub struct AppDetailsParams {
    /// Country code, decides currency and availability
    pub cc: Option<String>,
    /// Language of the descriptions, e.g. `english`
    pub l: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AppDetailsEntry {
    success: bool,
    data: Option<AppData>,
}

type AppDetailsResponse = HashMap<String, AppDetailsEntry>;

fn take_app_data(mut resp: AppDetailsResponse, app_id: u64) -> Option<AppData> {
    let entry = resp.remove(&app_id.to_string())?;
    if entry.success {
        entry.data
    } else {
        None
    }
}

/// Which reviews [`Client::get_app_reviews`] returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Recent,
    Updated,
}

impl fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewFilter::All => f.write_str("all"),
            ReviewFilter::Recent => f.write_str("recent"),
            ReviewFilter::Updated => f.write_str("updated"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppReviewsParams {
    pub filter: Option<ReviewFilter>,
    /// `all` or a Steam language name
    pub language: Option<String>,
    /// Up to 100, Steam defaults to 20
    pub num_per_page: Option<u32>,
    /// [`AppReviews::cursor`] of the previous page, `*` for the first one
    pub cursor: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct QuerySummary {
    pub num_reviews: u32,
    pub review_score: u32,
    #[serde(rename(deserialize = "review_score_desc"))]
    pub review_score_description: String,
    pub total_positive: u64,
    pub total_negative: u64,
    pub total_reviews: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewAuthor {
    #[serde(rename(deserialize = "steamid"))]
    pub steam_id: SteamIdStr,
    #[serde(default)]
    pub num_games_owned: u32,
    #[serde(default)]
    pub num_reviews: u32,
    /// Minutes
    #[serde(default)]
    pub playtime_forever: u64,
    /// Minutes
    #[serde(default)]
    pub playtime_last_two_weeks: u64,
    pub last_played: Option<SteamTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Review {
    #[serde(rename(deserialize = "recommendationid"))]
    pub id: String,
    pub author: ReviewAuthor,
    pub language: String,
    pub review: String,
    pub timestamp_created: SteamTime,
    pub timestamp_updated: SteamTime,
    pub voted_up: bool,
    pub votes_up: u64,
    #[serde(default)]
    pub votes_down: u64,
    pub votes_funny: u64,
    pub weighted_vote_score: Loose<f64>,
    pub comment_count: Loose<u64>,
    pub steam_purchase: bool,
    pub received_for_free: bool,
    #[serde(rename(deserialize = "written_during_early_access"))]
    pub early_access: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppReviews {
    pub success: u32,
    #[serde(default)]
    pub query_summary: QuerySummary,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Pass this as [`AppReviewsParams::cursor`] to get the next page
    pub cursor: Option<String>,
}

impl Client {
    /// Store page data of an app, [`None`] if the store doesn't know it.
    pub async fn get_app_details(
        &self,
        app_id: u64,
        options: &AppDetailsParams,
    ) -> Result<Option<AppData>> {
        let mut params = QueryParams::new();
        params
            .push("appids", app_id)
            .push_opt("cc", options.cc.as_deref())
            .push_opt("l", options.l.as_deref());

        let resp = self
            .get_store_json::<AppDetailsResponse>(STORE_APP_DETAILS_API, params)
            .await?;
        Ok(take_app_data(resp, app_id))
    }

    /// One page of user reviews of an app
    pub async fn get_app_reviews(
        &self,
        app_id: u64,
        options: &AppReviewsParams,
    ) -> Result<AppReviews> {
        let mut params = QueryParams::new();
        params
            .push("json", 1)
            .push_opt("filter", options.filter)
            .push_opt("language", options.language.as_deref())
            .push_opt("num_per_page", options.num_per_page)
            .push_opt("cursor", options.cursor.as_deref());

        let path = format!("{}{}", STORE_APP_REVIEWS_API, app_id);
        let reviews = self.get_store_json::<AppReviews>(&path, params).await?;
        if reviews.success != 1 {
            return Err(StoreError::Unsuccessful(reviews.success));
        }
        Ok(reviews)
    }
}
