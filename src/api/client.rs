//! Session client for the remote platform
//!
//! Owns the HTTP client, the API root, and (after `authenticate`) the bearer
//! token plus the caller's own profile. All remote operations live here; no
//! other module talks to the network.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::error::ApiError;
use super::profile::{Profile, PROFILE_FIELDS};

/// The token endpoint refuses requests with an obvious non-browser agent.
const LOGIN_USER_AGENT: &str = "Mozilla/5.0";

/// Authenticated calls have to look like the mobile app.
const API_USER_AGENT: &str = "Happn/19.1.0 AndroidSDK/19";

/// Fields requested from the crossings listing; `notifier` carries the other
/// user's profile, `nb_times` the crossing count.
const CROSSING_FIELDS: &str = "nb_times,notifier";

/// Credentials for the assertion exchange.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub facebook_auth_token: String,
}

/// One entry from the crossings listing, in the order the API returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossing {
    pub id: String,
    pub nb_times: u32,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user_id: String,
    access_token: String,
    #[serde(default)]
    is_new: bool,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CrossingEntry {
    #[serde(default)]
    nb_times: u32,
    notifier: Notifier,
}

#[derive(Debug, Deserialize)]
struct Notifier {
    id: String,
}

/// Authenticated session against the platform API.
pub struct SessionClient {
    http: Client,
    root: Url,
    token: Option<String>,
    me: Option<Profile>,
}

impl SessionClient {
    /// Build an unauthenticated client. `timeout` is the per-request deadline.
    pub fn new(root_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let root = Url::parse(root_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            root,
            token: None,
            me: None,
        })
    }

    /// Own profile, available after `authenticate`.
    pub fn me(&self) -> Option<&Profile> {
        self.me.as_ref()
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Exchange the third-party assertion token for a bearer token, then fetch
    /// our own profile with the identifier the token endpoint reports.
    pub async fn authenticate(&mut self, creds: &Credentials) -> Result<&Profile, ApiError> {
        let url = self.root.join("connect/oauth/token/")?;
        let form = [
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("grant_type", "assertion"),
            ("assertion_type", "facebook_access_token"),
            ("assertion", creds.facebook_auth_token.as_str()),
            ("scope", "mobile_app"),
        ];

        let response = self
            .http
            .post(url)
            .header(reqwest::header::USER_AGENT, LOGIN_USER_AGENT)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Auth {
                status: response.status(),
            });
        }

        let token: TokenResponse = response.json().await?;
        self.token = Some(token.access_token);

        let me = self.fetch_profile(&token.user_id).await?;
        tracing::info!(id = %me.id, "logged in as platform user");
        if token.is_new {
            tracing::info!("Welcome, {}!", me);
        } else {
            tracing::info!("Welcome back, {}!", me);
        }
        Ok(&*self.me.insert(me))
    }

    /// Fetch one user's profile, narrowed to the declared field set.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Profile, ApiError> {
        let url = self.root.join(&format!("api/users/{}/", user_id))?;
        let token = self.token()?;

        let response = self
            .http
            .get(url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("OAuth=\"{}\"", token))
            .header(reqwest::header::USER_AGENT, API_USER_AGENT)
            .query(&[("fields", PROFILE_FIELDS)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Remote {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let envelope: DataEnvelope<Profile> = response.json().await?;
        Ok(envelope.data)
    }

    /// List who the authenticated user crossed paths with, most recent first
    /// as the API orders them, capped at `limit` entries when given.
    pub async fn fetch_crossings(
        &self,
        self_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Crossing>, ApiError> {
        let url = self.root.join(&format!("api/users/{}/crossings/", self_id))?;
        let token = self.token()?;

        let mut request = self
            .http
            .get(url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("OAuth=\"{}\"", token))
            .header(reqwest::header::USER_AGENT, API_USER_AGENT)
            .query(&[("fields", CROSSING_FIELDS)]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Remote {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let envelope: DataEnvelope<Vec<CrossingEntry>> = response.json().await?;
        Ok(envelope
            .data
            .into_iter()
            .map(|entry| Crossing {
                id: entry.notifier.id,
                nb_times: entry.nb_times,
            })
            .collect())
    }

    /// Like `target_id` on behalf of the authenticated user.
    pub async fn like(&self, self_id: &str, target_id: &str) -> Result<(), ApiError> {
        self.action(self_id, "accepted", target_id).await
    }

    /// Dislike `target_id` on behalf of the authenticated user.
    pub async fn dislike(&self, self_id: &str, target_id: &str) -> Result<(), ApiError> {
        self.action(self_id, "rejected", target_id).await
    }

    /// POST to a per-target action endpoint. No response body is consumed.
    async fn action(&self, self_id: &str, verb: &str, target_id: &str) -> Result<(), ApiError> {
        let url = self
            .root
            .join(&format!("api/users/{}/{}/{}/", self_id, verb, target_id))?;
        let token = self.token()?;

        let response = self
            .http
            .post(url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("OAuth=\"{}\"", token))
            .header(reqwest::header::USER_AGENT, API_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Remote {
                status: response.status(),
                url: url.to_string(),
            });
        }

        Ok(())
    }
}
