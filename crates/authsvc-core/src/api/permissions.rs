//! Permission endpoints.

use tracing::{debug, instrument};

use crate::Result;
use crate::session::{RequestOptions, SessionManager};

use super::endpoints::{CHECK_PERMISSION, CheckPermissionRequest, MY_PERMISSIONS};
use super::types::{PermissionCheck, PermissionsSummary};

impl SessionManager {
    /// Fetch all effective permissions of the current user.
    ///
    /// With `website_id`, local permissions are those granted on that website.
    #[instrument(skip(self))]
    pub async fn permissions(&self, website_id: Option<&str>) -> Result<PermissionsSummary> {
        debug!("Fetching permissions");
        let mut options = RequestOptions::get();
        if let Some(website_id) = website_id {
            options = options.query("website_id", website_id);
        }
        self.dispatch(MY_PERMISSIONS, options).await
    }

    /// Check a single permission codename.
    #[instrument(skip(self))]
    pub async fn check_permission(
        &self,
        permission_codename: &str,
        website_id: Option<&str>,
    ) -> Result<bool> {
        debug!("Checking permission");
        let request = CheckPermissionRequest {
            permission_codename,
            website_id,
        };
        let check: PermissionCheck = self
            .dispatch(CHECK_PERMISSION, RequestOptions::post().json(&request)?)
            .await?;
        Ok(check.has_permission)
    }
}
