//! Account endpoints.

use tracing::{debug, instrument};

use crate::Result;
use crate::session::{RequestOptions, SessionManager};

use super::endpoints::{
    CHANGE_PASSWORD, ChangePasswordRequest, PROFILE, SESSIONS, VERIFY_ACCESS, VerifyAccessRequest,
};
use super::types::{
    MessageResponse, ProfileUpdate, SessionListBody, UserProfile, UserSession,
    VerifyAccessResponse,
};

impl SessionManager {
    /// Fetch the profile of the logged-in user.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        debug!("Fetching profile");
        self.dispatch(PROFILE, RequestOptions::get()).await
    }

    /// Update profile fields; unset fields keep their current value.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        debug!("Updating profile");
        self.dispatch(PROFILE, RequestOptions::put().json(update)?).await
    }

    /// Change the account password.
    ///
    /// The confirmation field is filled with `new_password`.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse> {
        debug!("Changing password");
        let request = ChangePasswordRequest {
            old_password,
            new_password,
            new_password2: new_password,
        };
        self.dispatch(CHANGE_PASSWORD, RequestOptions::post().json(&request)?)
            .await
    }

    /// Check whether the user may use a website.
    #[instrument(skip(self))]
    pub async fn verify_access(&self, website_id: &str) -> Result<VerifyAccessResponse> {
        debug!("Verifying website access");
        let request = VerifyAccessRequest { website_id };
        self.dispatch(VERIFY_ACCESS, RequestOptions::post().json(&request)?)
            .await
    }

    /// List the user's tracked website sessions.
    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Result<Vec<UserSession>> {
        debug!("Listing sessions");
        let body: SessionListBody = self.dispatch(SESSIONS, RequestOptions::get()).await?;
        Ok(body.into_sessions())
    }
}
