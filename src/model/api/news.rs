use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::NEWS_FOR_APP_API;
use crate::dispatcher::QueryParams;
use crate::error::Result;
use crate::model::SteamTime;

/// Parameters of [`Client::get_news_for_app`], everything but `app_id` is optional
#[derive(Debug, Clone, Default)]
pub struct NewsParams {
    pub app_id: u64,
    /// Truncate `contents` to this many characters, `0` means full content
    pub max_length: Option<u32>,
    /// Only news posted before this unix timestamp
    pub end_date: Option<i64>,
    /// Number of items, Steam defaults to 20
    pub count: Option<u32>,
    /// Only these feed names
    pub feeds: Vec<String>,
}

impl NewsParams {
    pub fn new(app_id: u64) -> Self {
        Self {
            app_id,
            ..Default::default()
        }
    }

    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("appid", self.app_id)
            .push_opt("maxlength", self.max_length)
            .push_opt("enddate", self.end_date)
            .push_opt("count", self.count);
        if !self.feeds.is_empty() {
            params.push("feeds", self.feeds.join(","));
        }
        params
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewsItem {
    pub gid: String,
    pub title: String,
    pub url: String,
    pub is_external_url: bool,
    pub author: String,
    pub contents: String,
    #[serde(rename(deserialize = "feedlabel"))]
    pub feed_label: String,
    pub date: SteamTime,
    #[serde(rename(deserialize = "feedname"))]
    pub feed_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppNews {
    #[serde(rename(deserialize = "appid"))]
    pub app_id: u64,
    #[serde(rename(deserialize = "newsitems"), default)]
    pub news_items: Vec<NewsItem>,
    /// Total number of news items for the app, not just the returned ones
    pub count: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct Response {
    #[serde(rename = "appnews")]
    app_news: AppNews,
}

impl Client {
    /// Latest news of an app
    pub async fn get_news_for_app(&self, params: &NewsParams) -> Result<AppNews> {
        let json = self
            .get_json::<Response>(NEWS_FOR_APP_API, params.to_query())
            .await?;
        Ok(json.app_news)
    }
}
