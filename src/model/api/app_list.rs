use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::constants::APP_LIST_API;
use crate::dispatcher::QueryParams;
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct App {
    #[serde(rename(deserialize = "appid"))]
    pub app_id: u64,
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct AppList {
    apps: Vec<App>,
}

#[derive(Deserialize, Debug)]
struct Response {
    #[serde(rename = "applist")]
    app_list: AppList,
}

impl Client {
    /// Every app on Steam. The response is large, a few megabytes.
    pub async fn get_app_list(&self) -> Result<Vec<App>> {
        let json = self
            .get_json::<Response>(APP_LIST_API, QueryParams::new())
            .await?;
        Ok(json.app_list.apps)
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Response};
    use crate::test_util::{mock_client, MockTransport};

    #[test]
    fn parses() {
        let json: Response = load_test_json!("app_list.json");
        let apps = json.app_list.apps;
        assert_eq!(apps.len(), 4);
        assert_eq!(
            apps[0],
            App {
                app_id: 440,
                name: "Team Fortress 2".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn only_sends_the_key() {
        let mock = MockTransport::new();
        mock.respond("/ISteamApps/GetAppList/v2/", 200, test_resource_str!("app_list.json"));
        let client = mock_client(&mock);

        let apps = client.get_app_list().await.unwrap();
        assert_eq!(apps.len(), 4);

        let call = &mock.calls()[0];
        assert_eq!(call.params.len(), 1);
        assert_eq!(call.param("key").unwrap(), "SECRET");
    }
}
