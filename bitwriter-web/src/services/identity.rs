use std::cell::RefCell;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{AuthenticatedSession, ExchangeError, IdentityProvider, SessionToken, UserIdentity};
use tracing::debug;

const APP_ID_HEADER: &str = "app-id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    public_profile: PublicProfile,
}

#[derive(Debug, Deserialize)]
struct PublicProfile {
    handle: String,
    paymail: String,
}

/// HandCash Connect client: resolves redirect tokens into profiles and holds
/// the token of the signed-in account.
#[derive(Debug)]
pub struct HandCashClient {
    client: Client,
    profile_url: String,
    app_id: Option<String>,
    active_token: RefCell<Option<SessionToken>>,
}

impl HandCashClient {
    pub fn new(profile_url: &str, app_id: Option<String>) -> Self {
        Self {
            client: Client::new(),
            profile_url: profile_url.to_string(),
            app_id,
            active_token: RefCell::new(None),
        }
    }

    #[cfg(test)]
    fn active_token(&self) -> Option<SessionToken> {
        self.active_token.borrow().clone()
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HandCashClient {
    async fn exchange(&self, token: &SessionToken) -> Result<UserIdentity, ExchangeError> {
        let app_id = self.app_id.as_deref().ok_or(ExchangeError::NotConfigured)?;
        let response = self
            .client
            .get(&self.profile_url)
            .header(APP_ID_HEADER, app_id)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ExchangeError::Rejected(response.status().to_string()));
            }
            status => return Err(ExchangeError::Transport(format!("profile request failed: {status}"))),
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|err| ExchangeError::InvalidProfile(err.to_string()))?;
        debug!(handle = %profile.public_profile.handle, "profile resolved");
        *self.active_token.borrow_mut() = Some(token.clone());
        Ok(UserIdentity::new(
            profile.public_profile.handle,
            profile.public_profile.paymail,
        ))
    }

    fn resume(&self, session: &AuthenticatedSession) {
        *self.active_token.borrow_mut() = Some(session.token.clone());
    }

    fn sign_out(&self) -> Result<(), ExchangeError> {
        let held = self.active_token.borrow_mut().take();
        debug!(had_token = held.is_some(), "dropped HandCash session handle");
        Ok(())
    }
}
