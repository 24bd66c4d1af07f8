//! Authenticated collection fetches.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthSession;
use crate::config::Config;
use crate::models::{Hero, Transformation};

use super::client::ApiClient;
use super::transport::ApiRequest;
use super::ApiError;

/// Collection endpoint for all heroes.
const HEROES_PATH: &str = "/api/heros/all";

/// Collection endpoint for the transformations of one hero.
/// The spelling is the server's, not ours.
const TRANSFORMATIONS_PATH: &str = "/api/heros/tranformations";

/// Client for the authenticated collection endpoints.
///
/// Reads the current token from the [`AuthSession`]. It never logs in
/// on its own: a missing token fails immediately, and a stale token
/// surfaces as `StatusCode(401)` for the caller to handle.
pub struct ResourceClient {
    client: ApiClient,
    session: Arc<AuthSession>,
    config: Config,
}

impl ResourceClient {
    pub fn new(client: ApiClient, session: Arc<AuthSession>, config: Config) -> Self {
        Self {
            client,
            session,
            config,
        }
    }

    /// Fetch all heroes.
    pub async fn heroes(&self) -> Result<Vec<Hero>, ApiError> {
        self.fetch_collection(HEROES_PATH, &json!({ "name": "" }))
            .await
    }

    /// Fetch the transformations of one hero.
    pub async fn transformations(&self, hero: &Hero) -> Result<Vec<Transformation>, ApiError> {
        self.fetch_collection(TRANSFORMATIONS_PATH, &json!({ "id": hero.id }))
            .await
    }

    /// POST `body` to `path` with the current bearer token and decode
    /// the response as a collection of `T`.
    ///
    /// Fails with `Unknown` before touching the transport when no
    /// token is held. No caching, no pagination, no retry.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<Vec<T>, ApiError> {
        let Some(token) = self.session.token() else {
            debug!(path, "collection fetch without a token");
            return Err(ApiError::Unknown);
        };

        let url = self.config.api_url(path)?;
        let body = serde_json::to_vec(body).map_err(|_| ApiError::Unknown)?;

        let request = ApiRequest::post(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json; charset=utf-8")
            .body(body);

        self.client.request_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::api::transport::MockTransport;
    use crate::auth::CredentialStore;

    use super::*;

    fn client_stack(mock: &MockTransport, dir: &TempDir) -> ResourceClient {
        let client = ApiClient::new(Arc::new(mock.clone()));
        let session = Arc::new(AuthSession::new(
            client.clone(),
            CredentialStore::new(dir.path().to_path_buf()),
            Config::default(),
        ));
        ResourceClient::new(client, session, Config::default())
    }

    async fn logged_in_stack(mock: &MockTransport, dir: &TempDir, token: &str) -> ResourceClient {
        let resources = client_stack(mock, dir);
        mock.enqueue_response(200, token);
        assert!(resources.session.login("user", "pass").await);
        resources
    }

    fn hero(id: &str) -> Hero {
        Hero {
            id: id.to_string(),
            name: "Goku".to_string(),
            description: "Raised on Earth".to_string(),
            photo: "https://cdn.example.com/goku.jpg".to_string(),
            favorite: false,
        }
    }

    #[tokio::test]
    async fn fetch_without_token_fails_with_zero_transport_calls() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let resources = client_stack(&mock, &dir);

        let result = resources.heroes().await;

        assert_eq!(result, Err(ApiError::Unknown));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn heroes_request_carries_bearer_token_and_list_all_body() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let resources = logged_in_stack(&mock, &dir, "t").await;

        mock.enqueue_response(200, "[]");
        let heroes = resources.heroes().await.unwrap();
        assert!(heroes.is_empty());

        // Request 0 was the login; request 1 is the collection fetch.
        let request = &mock.requests()[1];
        assert_eq!(request.url.path(), "/api/heros/all");
        assert_eq!(request.header_value("Authorization"), Some("Bearer t"));
        assert_eq!(
            request.header_value("Content-Type"),
            Some("application/json; charset=utf-8")
        );
        let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "" }));
    }

    #[tokio::test]
    async fn transformations_request_is_keyed_by_hero_id() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let resources = logged_in_stack(&mock, &dir, "t").await;

        mock.enqueue_response(200, "[]");
        resources.transformations(&hero("hero-42")).await.unwrap();

        let request = &mock.requests()[1];
        assert_eq!(request.url.path(), "/api/heros/tranformations");
        let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "id": "hero-42" }));
    }

    #[tokio::test]
    async fn hero_payload_decodes_into_records() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let resources = logged_in_stack(&mock, &dir, "t").await;

        mock.enqueue_response(
            200,
            r#"[{
                "id": "D13A40E5-4418-4223-9CE6-D2F9A28EBE94",
                "name": "Goku",
                "description": "Sobran las presentaciones cuando se habla de Goku.",
                "photo": "https://cdn.alfabetajuega.com/alfabetajuega/2020/12/goku1.jpg",
                "favorite": false
            }]"#,
        );
        let heroes = resources.heroes().await.unwrap();

        assert_eq!(heroes.len(), 1);
        assert_eq!(heroes[0].name, "Goku");
        assert!(!heroes[0].favorite);
    }

    #[tokio::test]
    async fn fetch_after_logout_fails_again_with_no_transport_call() {
        let dir = TempDir::new().unwrap();
        let mock = MockTransport::new();
        let resources = logged_in_stack(&mock, &dir, "t").await;

        resources.session.logout();
        let result = resources.heroes().await;

        assert_eq!(result, Err(ApiError::Unknown));
        assert_eq!(mock.request_count(), 1); // just the login
    }
}
