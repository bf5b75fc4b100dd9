// Collaboration endpoints
//
// Roster management for a project: invitations, access changes,
// ownership transfer, and the combined collaborators-with-owner read.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AccessLevelDto, TeamDto, UserDto};

impl ApiClient {
    /// Invite a user to a project by email.
    ///
    /// `POST /api/v1/projects/{projectId}/collaborators` with
    /// `{"email": ..., "access": ...}`. The server resolves the email
    /// to an account and returns it, so the caller can merge the new
    /// member into the roster without a reload.
    pub async fn invite_collaborator(
        &self,
        project_id: &str,
        email: &str,
        access: AccessLevelDto,
    ) -> Result<UserDto, Error> {
        let url = self.api_url(&format!("projects/{project_id}/collaborators"));
        debug!(project_id, email, "inviting collaborator");
        self.post(url, &json!({ "email": email, "access": access }))
            .await
    }

    /// Transfer project ownership to the member with this email.
    ///
    /// `POST /api/v1/projects/{projectId}/owner` with `{"email": ...}`
    pub async fn transfer_ownership(&self, project_id: &str, email: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("projects/{project_id}/owner"));
        debug!(project_id, email, "transferring ownership");
        self.post_unit(url, &json!({ "email": email })).await
    }

    /// Set one collaborator's access level.
    ///
    /// `PUT /api/v1/projects/{projectId}/collaborators/{userId}` with
    /// `{"access": ...}`
    pub async fn set_collaborator_access(
        &self,
        project_id: &str,
        user_id: &str,
        access: AccessLevelDto,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("projects/{project_id}/collaborators/{user_id}"));
        debug!(project_id, user_id, "changing collaborator access");
        self.put_unit(url, &json!({ "access": access })).await
    }

    /// Revoke one collaborator's membership.
    ///
    /// `DELETE /api/v1/projects/{projectId}/collaborators/{userId}`
    pub async fn remove_collaborator(&self, project_id: &str, user_id: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("projects/{project_id}/collaborators/{user_id}"));
        debug!(project_id, user_id, "removing collaborator");
        self.delete_unit(url).await
    }

    /// Fetch the full roster with the owner resolved.
    ///
    /// `GET /api/v1/projects/{projectId}/collaborators?authorId={authorId}`
    ///
    /// `author_id` lets the server resolve the owner account even when
    /// the collaborator list is empty.
    pub async fn collaborators_with_owner(
        &self,
        project_id: &str,
        author_id: &str,
    ) -> Result<TeamDto, Error> {
        let mut url = self.api_url(&format!("projects/{project_id}/collaborators"));
        url.query_pairs_mut().append_pair("authorId", author_id);
        debug!(project_id, "loading collaborators");
        self.get(url).await
    }
}
