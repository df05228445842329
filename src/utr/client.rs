//! Player profile lookups against the rating provider's HTTP API
//!
//! The session credential is handed to the client at construction time as
//! part of [`UtrSettings`]; the client never reads process environment.

use crate::config::UtrSettings;
use crate::error::{LineupError, Result};
use anyhow::{anyhow, Context};
use reqwest::Url;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Source of raw player profile documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerProfileProvider: Send + Sync {
    /// Fetch the profile JSON for a player id
    async fn get_player(&self, player_id: &str) -> Result<serde_json::Value>;
}

/// HTTP client for `GET /v1/player/{id}/profile`
#[derive(Debug, Clone)]
pub struct UtrClient {
    base_url: Url,
    jwt: String,
    http_client: reqwest::Client,
}

impl UtrClient {
    /// Create a client from settings; a JWT credential is required
    pub fn new(settings: &UtrSettings) -> Result<Self> {
        let jwt = settings
            .jwt
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| LineupError::MissingCredential {
                name: "UTR_JWT".to_string(),
            })?;

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            LineupError::ConfigurationError {
                message: format!("Invalid UTR base URL {:?}: {}", settings.base_url, e),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LineupError::ConfigurationError {
                message: format!("UTR base URL {:?} cannot hold a path", settings.base_url),
            }
            .into());
        }

        Ok(Self {
            base_url,
            jwt,
            http_client: reqwest::Client::new(),
        })
    }

    /// Profile URL for a player; the id is encoded as a single path segment
    pub fn profile_url(&self, player_id: &str) -> Result<Url> {
        if player_id.is_empty() || player_id == "." || player_id == ".." {
            return Err(LineupError::InvalidPlayerId {
                player_id: player_id.to_string(),
            }
            .into());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("UTR base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(["v1", "player", player_id, "profile"]);
        Ok(url)
    }

    fn cookie(&self) -> String {
        format!("jwt={};", self.jwt)
    }
}

#[async_trait]
impl PlayerProfileProvider for UtrClient {
    async fn get_player(&self, player_id: &str) -> Result<serde_json::Value> {
        let url = self.profile_url(player_id)?;
        debug!("Fetching player profile: {}", url);

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::COOKIE, self.cookie())
            .send()
            .await
            .with_context(|| format!("Failed to send profile request for player {}", player_id))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                "Profile request for player {} failed with status {}",
                player_id, status
            );
            return Err(LineupError::ProfileRequestFailed {
                player_id: player_id.to_string(),
                message: format!("status {}: {}", status, error_text),
            }
            .into());
        }

        response
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("Failed to parse profile response for player {}", player_id))
    }
}
