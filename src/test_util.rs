macro_rules! load_test_json {
    ($filename:literal) => {{
        let mut path = ::std::path::PathBuf::from(::std::env!("CARGO_MANIFEST_DIR"));
        path.push("test_resources");
        path.push($filename);
        let file = match ::std::fs::OpenOptions::new().read(true).open(path) {
            Err(err) => {
                println!("couldn't open test resource file `{}`", $filename);
                panic!("{:?}", err);
            }
            Ok(file) => file,
        };
        match ::serde_json::from_reader(file) {
            Err(err) => {
                println!(
                    "couldn't parse json from test resource file `{}`",
                    $filename
                );
                panic!("{:?}", err);
            }
            Ok(v) => v,
        }
    }};
}

macro_rules! test_resource_str {
    ($filename:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/test_resources/", $filename))
    };
}

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tokio::time::Instant;
use url::Url;

use crate::transport::{HttpResponse, Transport, TransportError};

/// A request the [`MockTransport`] has seen
#[derive(Debug, Clone)]
pub struct Call {
    pub at: Instant,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(StatusCode, String),
    Fail(String),
}

/// Answers requests from a script per url path.
///
/// Scripted answers are used up in order, the last one for a path is repeated
/// forever. Unknown paths get a `404`.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.push(path, Scripted::Respond(status, body.to_string()));
    }

    pub fn fail(&self, path: &str, msg: &str) {
        self.push(path, Scripted::Fail(msg.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, path: &str) -> Option<Scripted> {
        let mut script = self.script.lock().unwrap();
        let queue = script.get_mut(path)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            at: Instant::now(),
            path: url.path().to_string(),
            params: params.to_vec(),
        });

        let mut full_url = url.clone();
        full_url.query_pairs_mut().extend_pairs(params);

        let (status, body) = match self.next(url.path()) {
            Some(Scripted::Respond(status, body)) => (status, body),
            Some(Scripted::Fail(msg)) => return Err(TransportError::Other(msg)),
            None => (StatusCode::NOT_FOUND, String::new()),
        };

        Ok(HttpResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::from(body),
            url: full_url,
        })
    }
}

/// [`crate::Client`] with api-key `SECRET` that sends everything to `mock`
pub fn mock_client(mock: &Arc<MockTransport>) -> crate::Client {
    crate::ClientOptions::new()
        .api_key("SECRET")
        .transport(mock.clone())
        .build()
        .unwrap()
}
