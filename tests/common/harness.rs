use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use retrieval::config::Config;
use retrieval::credentials::StaticCredential;
use retrieval::RetrievalClient;

pub const TEST_API_KEY: &str = "pk-test-0000";
pub const TEST_INDEX: &str = "docs";

/// A wiremock server standing in for both Pinecone planes.
pub struct MockPinecone {
    pub server: MockServer,
}

impl MockPinecone {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Config pointing at the mock with the data-plane host pinned, so no
    /// control-plane lookup happens.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.index.name = TEST_INDEX.to_string();
        config.index.host = Some(self.uri());
        config.pinecone.controller_url = self.uri();
        config
    }

    pub fn client(&self) -> RetrievalClient {
        self.client_with(self.config())
    }

    pub fn client_with(&self, config: Config) -> RetrievalClient {
        RetrievalClient::from_config(&config, None, &StaticCredential::new(TEST_API_KEY))
            .expect("client builds against mock")
    }

    pub async fn mock_query(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("Api-Key", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_stats(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/describe_index_stats"))
            .and(header("Api-Key", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_failure(&self, route: &str, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request the mock received on `route`.
    pub async fn bodies_for(&self, route: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == route)
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }
}
