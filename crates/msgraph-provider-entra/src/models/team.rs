//! Microsoft Teams shapes reachable from a group.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, AdditionalData};

/// The team backing a group, present when `team` is expanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub channels: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub classification: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub fun_settings: Option<TeamFunSettings>,
    #[serde(deserialize_with = "lenient")]
    pub group: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub guest_settings: Option<TeamGuestSettings>,
    #[serde(deserialize_with = "lenient")]
    pub installed_apps: Option<Vec<TeamsAppInstallation>>,
    #[serde(deserialize_with = "lenient")]
    pub internal_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub is_archived: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub member_settings: Option<TeamMemberSettings>,
    #[serde(deserialize_with = "lenient")]
    pub members: Option<Vec<ConversationMember>>,
    #[serde(deserialize_with = "lenient")]
    pub messaging_settings: Option<TeamMessagingSettings>,
    #[serde(deserialize_with = "lenient")]
    pub operations: Option<Vec<TeamsAsyncOperation>>,
    #[serde(deserialize_with = "lenient")]
    pub primary_channel: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub schedule: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub specialization: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub template: Option<TeamsTemplate>,
    #[serde(deserialize_with = "lenient")]
    pub visibility: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub web_url: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamFunSettings {
    #[serde(deserialize_with = "lenient")]
    pub allow_custom_memes: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_giphy: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_stickers_and_memes: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub giphy_content_rating: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamGuestSettings {
    #[serde(deserialize_with = "lenient")]
    pub allow_create_update_channels: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_delete_channels: Option<bool>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMemberSettings {
    #[serde(deserialize_with = "lenient")]
    pub allow_add_remove_apps: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_create_private_channels: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_create_update_channels: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_create_update_remove_connectors: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_create_update_remove_tabs: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_delete_channels: Option<bool>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMessagingSettings {
    #[serde(deserialize_with = "lenient")]
    pub allow_channel_mentions: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_owner_delete_messages: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_team_mentions: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_user_delete_messages: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub allow_user_edit_messages: Option<bool>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsTemplate {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// An app installed in a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsAppInstallation {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub teams_app: Option<TeamsApp>,
    #[serde(deserialize_with = "lenient")]
    pub teams_app_definition: Option<TeamsAppDefinition>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsApp {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub distribution_method: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub external_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub app_definitions: Option<Vec<TeamsAppDefinition>>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// One published version of a Teams app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsAppDefinition {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub bot: Option<TeamworkBot>,
    #[serde(deserialize_with = "lenient")]
    pub created_by: Option<IdentitySet>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub last_modified_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub publishing_state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub short_description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub teams_app_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamworkBot {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentitySet {
    #[serde(deserialize_with = "lenient")]
    pub application: Option<Identity>,
    #[serde(deserialize_with = "lenient")]
    pub device: Option<Identity>,
    #[serde(deserialize_with = "lenient")]
    pub user: Option<Identity>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Member of a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationMember {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub roles: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub visible_history_start_date_time: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Long-running team operation (archive, clone, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamsAsyncOperation {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub attempts_count: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub created_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub error: Option<OperationError>,
    #[serde(deserialize_with = "lenient")]
    pub last_action_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub operation_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub target_resource_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub target_resource_location: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationError {
    #[serde(deserialize_with = "lenient")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_installation_with_definitions() {
        let installation: TeamsAppInstallation = serde_json::from_value(json!({
            "id": "inst-1",
            "teamsApp": {
                "id": "app-1",
                "displayName": "Planner",
                "distributionMethod": "store",
                "appDefinitions": [
                    {"id": "def-1", "version": "1.0", "createdBy": {"user": {"id": "u1", "displayName": "Megan"}}},
                    {"id": "def-2", "version": "1.1"}
                ]
            }
        }))
        .unwrap();

        let app = installation.teams_app.unwrap();
        assert_eq!(app.distribution_method.as_deref(), Some("store"));
        let definitions = app.app_definitions.unwrap();
        assert_eq!(definitions.len(), 2);
        let user = definitions[0]
            .created_by
            .as_ref()
            .and_then(|c| c.user.as_ref())
            .unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Megan"));
    }

    #[test]
    fn test_operation_error() {
        let operation: TeamsAsyncOperation = serde_json::from_value(json!({
            "id": "op-1",
            "attemptsCount": 2,
            "operationType": "archiveTeam",
            "status": "failed",
            "error": {"code": "Forbidden", "message": "denied"}
        }))
        .unwrap();

        assert_eq!(operation.attempts_count, Some(2));
        let error = operation.error.unwrap();
        assert_eq!(error.code.as_deref(), Some("Forbidden"));
    }
}
