//! Bearer token verification.
//!
//! Clients authenticate against an external identity provider and pass the
//! issued ID token as a bearer token. The token is resolved back into an
//! account through the provider's account lookup API.

use async_trait::async_trait;
use derive_more::{Display, Error, From};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config;

/// Errors returned by a [`TokenVerifier`].
#[derive(Debug, Display, From, Error)]
pub enum IdentityError {
    /// Transport-level or response decoding failure.
    Http(reqwest::Error),

    /// Provider rejected the token.
    #[display(fmt = "invalid token")]
    InvalidToken,
}

/// Identity resolved from a verified token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-side account identifier.
    pub uid: String,

    /// Account email, if the account has one.
    pub email: Option<String>,
}

/// Token verification capability.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token, returning the identity it belongs to.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

/// [`TokenVerifier`] backed by the Firebase identity toolkit account lookup.
pub struct FirebaseVerifier {
    client: Client,
    key: String,
    endpoint: String,
}

impl FirebaseVerifier {
    /// Create new [`FirebaseVerifier`] from the provided [`Identity`] configuration.
    ///
    /// [`Identity`]: config::Identity
    pub fn new(config: &config::Identity) -> Self {
        Self {
            client: Client::new(),
            key: config.key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:lookup", self.endpoint))
            .query(&[("key", &self.key)])
            .json(&LookupRequest { id_token: token })
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "token lookup rejected");
            return Err(IdentityError::InvalidToken);
        }

        let user = response
            .json::<LookupResponse>()
            .await?
            .users
            .into_iter()
            .next()
            .ok_or(IdentityError::InvalidToken)?;

        Ok(VerifiedIdentity {
            uid: user.local_id,
            email: user.email,
        })
    }
}
