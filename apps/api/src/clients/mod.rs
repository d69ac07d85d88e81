//! Portal API clients — the single point of contact with the remote career
//! portal (profile plus the four entity collections).
//!
//! The portal owns persistence; this service only reconciles against it.
//! Authentication is external: an optional bearer token is attached to every
//! request, and the acting user travels as a `user_id` query parameter.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::PersonalInfo;
use crate::sync::{Collection, Profile, SyncedItem};

const API_PREFIX: &str = "/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ────────────────────────────────────────────────────────────────────────────
// Error type
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("portal API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("portal API contract violation: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct PortalErrorBody {
    error: PortalErrorDetail,
}

#[derive(Debug, Deserialize)]
struct PortalErrorDetail {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Base client
// ────────────────────────────────────────────────────────────────────────────

/// Shared HTTP plumbing for all portal calls.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            base_url,
            token,
        }
    }

    fn request(&self, method: Method, path: &str, user: Uuid) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .request(method, format!("{}{}{}", self.base_url, API_PREFIX, path))
            .query(&[("user_id", user.to_string())]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Maps non-success statuses to `ApiError::Status`, parsing the portal's
    /// `{"error": {"message"}}` body when present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PortalErrorBody>(&body)
            .map(|parsed| parsed.error.message)
            .unwrap_or(body);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collections
// ────────────────────────────────────────────────────────────────────────────

/// REST-backed collection for one entity kind. The resource path is derived
/// from `T::KIND` (`/api/v1/projects`, …).
pub struct RestCollection<T> {
    api: ApiClient,
    _kind: PhantomData<fn() -> T>,
}

impl<T> RestCollection<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Collection<T> for RestCollection<T>
where
    T: SyncedItem + DeserializeOwned,
{
    async fn get_all(&self, user: Uuid) -> Result<Vec<T>, ApiError> {
        let response = self
            .api
            .request(Method::GET, &format!("/{}", T::KIND), user)
            .send()
            .await?;
        Ok(ApiClient::check(response).await?.json().await?)
    }

    async fn create(&self, user: Uuid, item: &T) -> Result<T, ApiError> {
        let response = self
            .api
            .request(Method::POST, &format!("/{}", T::KIND), user)
            .json(&item.payload())
            .send()
            .await?;
        Ok(ApiClient::check(response).await?.json().await?)
    }

    async fn update(&self, user: Uuid, id: Uuid, item: &T) -> Result<T, ApiError> {
        let response = self
            .api
            .request(Method::PUT, &format!("/{}/{id}", T::KIND), user)
            .json(&item.payload())
            .send()
            .await?;
        Ok(ApiClient::check(response).await?.json().await?)
    }

    async fn delete(&self, user: Uuid, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .api
            .request(Method::DELETE, &format!("/{}/{id}", T::KIND), user)
            .send()
            .await?;
        ApiClient::check(response).await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

pub struct ProfileClient {
    api: ApiClient,
}

impl ProfileClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Profile for ProfileClient {
    async fn get(&self, user: Uuid) -> Result<PersonalInfo, ApiError> {
        let response = self.api.request(Method::GET, "/profile", user).send().await?;
        Ok(ApiClient::check(response).await?.json().await?)
    }

    async fn update(&self, user: Uuid, info: &PersonalInfo) -> Result<PersonalInfo, ApiError> {
        let response = self
            .api
            .request(Method::PUT, "/profile", user)
            .json(info)
            .send()
            .await?;
        Ok(ApiClient::check(response).await?.json().await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Project;
    use mockito::Matcher;
    use serde_json::json;

    fn make_client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(server.url(), Some("test-token".to_string()))
    }

    #[tokio::test]
    async fn test_get_all_fetches_collection_for_user() {
        let mut server = mockito::Server::new_async().await;
        let user = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mock = server
            .mock("GET", "/api/v1/projects")
            .match_query(Matcher::UrlEncoded("user_id".into(), user.to_string()))
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{"id": id, "title": "Tracker", "description": "A tool", "technologies": ["React"]}])
                    .to_string(),
            )
            .create_async()
            .await;

        let collection = RestCollection::<Project>::new(make_client(&server));
        let items = collection.get_all(user).await.expect("get_all");

        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(id));
        assert_eq!(items[0].title, "Tracker");
    }

    #[tokio::test]
    async fn test_create_posts_payload_without_identity_fields() {
        let mut server = mockito::Server::new_async().await;
        let user = Uuid::new_v4();
        let assigned = Uuid::new_v4();
        let item = Project {
            title: "Tracker".to_string(),
            description: "A tool".to_string(),
            technologies: vec!["React".to_string(), "Node".to_string()],
            ..Project::blank()
        };
        let mock = server
            .mock("POST", "/api/v1/projects")
            .match_query(Matcher::UrlEncoded("user_id".into(), user.to_string()))
            .match_body(Matcher::Json(item.payload()))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"id": assigned, "title": "Tracker", "description": "A tool",
                       "technologies": ["React", "Node"]})
                .to_string(),
            )
            .create_async()
            .await;

        let collection = RestCollection::<Project>::new(make_client(&server));
        let created = collection.create(user, &item).await.expect("create");

        mock.assert_async().await;
        assert_eq!(created.id, Some(assigned));
    }

    #[tokio::test]
    async fn test_delete_hits_item_path() {
        let mut server = mockito::Server::new_async().await;
        let user = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mock = server
            .mock("DELETE", format!("/api/v1/projects/{id}").as_str())
            .match_query(Matcher::UrlEncoded("user_id".into(), user.to_string()))
            .with_status(204)
            .create_async()
            .await;

        let collection = RestCollection::<Project>::new(make_client(&server));
        collection.delete(user, id).await.expect("delete");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_parses_portal_error_body() {
        let mut server = mockito::Server::new_async().await;
        let user = Uuid::new_v4();
        server
            .mock("GET", "/api/v1/projects")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(json!({"error": {"code": "NOT_FOUND", "message": "no such user"}}).to_string())
            .create_async()
            .await;

        let collection = RestCollection::<Project>::new(make_client(&server));
        let err = collection.get_all(user).await.expect_err("404");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such user");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let user = Uuid::new_v4();
        server
            .mock("GET", "/api/v1/profile")
            .match_query(Matcher::UrlEncoded("user_id".into(), user.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"name": "Asha Rao", "branch": "CSE"}).to_string())
            .create_async()
            .await;
        let update_mock = server
            .mock("PUT", "/api/v1/profile")
            .match_query(Matcher::UrlEncoded("user_id".into(), user.to_string()))
            .match_body(Matcher::PartialJson(json!({"name": "Asha Rao"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"name": "Asha Rao", "branch": "CSE"}).to_string())
            .create_async()
            .await;

        let profile = ProfileClient::new(make_client(&server));
        let info = profile.get(user).await.expect("get");
        assert_eq!(info.name.as_deref(), Some("Asha Rao"));

        profile.update(user, &info).await.expect("update");
        update_mock.assert_async().await;
    }
}
