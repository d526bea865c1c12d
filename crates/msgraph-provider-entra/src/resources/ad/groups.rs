//! The `msgraph_ad_groups` table.

use async_trait::async_trait;
use msgraph_provider::{
    emit, Column, ColumnType, FetchResolver, ProviderError, ProviderResult, Resource, Table,
};
use tokio::sync::mpsc;
use tracing::debug;

use super::group_relations;
use crate::client::{resolve_tenant_id, Client};
use crate::models::GraphObject;
use crate::resources::{path, GraphColumn, GraphTable};

pub const GROUPS_TABLE: &str = "msgraph_ad_groups";

/// Directory groups of the tenant with their expanded relations.
pub fn groups() -> GraphTable {
    Table::fetched(GROUPS_TABLE, GraphObject::GROUP, FetchGroups)
        .with_description("Microsoft 365 groups and security groups of the directory")
        .with_primary_keys(vec!["tenant_id", "id"])
        .with_columns(group_columns())
        .with_columns(team_columns())
        .with_relations(group_relations::relations())
}

/// Fetches every group, following `@odata.nextLink` until the last page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchGroups;

#[async_trait]
impl FetchResolver<Client, GraphObject> for FetchGroups {
    async fn fetch(
        &self,
        client: &Client,
        _parent: Option<&Resource<GraphObject>>,
        tx: mpsc::Sender<GraphObject>,
    ) -> ProviderResult<()> {
        let service = &client.services().groups;
        let mut next_link: Option<String> = None;
        let mut page: u32 = 0;

        loop {
            let response = service
                .list(next_link.as_deref())
                .await
                .map_err(|e| ProviderError::fetch(GROUPS_TABLE, e))?;
            page += 1;
            debug!(
                page,
                items = response.value.len(),
                has_next = response.next_link.is_some(),
                "Fetched groups page"
            );

            emit(
                GROUPS_TABLE,
                &tx,
                response.value.into_iter().map(GraphObject::from),
            )
            .await?;

            match response.next_link {
                Some(link) if !link.is_empty() => next_link = Some(link),
                _ => break,
            }
        }

        Ok(())
    }
}

fn group_columns() -> Vec<GraphColumn> {
    use ColumnType::{Bool, Int, Json, String, StringArray, Timestamp};

    vec![
        Column::new("tenant_id", String)
            .with_description("Azure AD tenant the group was read from")
            .func(resolve_tenant_id),
        path("entity_additional_data", Json, "additionalData").with_description(
            "Stores additional data not described in the OpenAPI description found when deserializing",
        ),
        path("id", String, "id").with_description("Unique identifier of the group"),
        path("deleted_date_time", Timestamp, "deletedDateTime"),
        path("allow_external_senders", Bool, "allowExternalSenders").with_description(
            "Indicates if people external to the organization can send messages to the group",
        ),
        path("auto_subscribe_new_members", Bool, "autoSubscribeNewMembers"),
        path("calendar", Json, "calendar"),
        path("calendar_view", Json, "calendarView"),
        path("classification", String, "classification"),
        path("conversations", Json, "conversations"),
        path("created_date_time", Timestamp, "createdDateTime"),
        path(
            "created_on_behalf_of_entity_additional_data",
            Json,
            "createdOnBehalfOf.additionalData",
        ),
        path("created_on_behalf_of_id", String, "createdOnBehalfOf.id"),
        path(
            "created_on_behalf_of_deleted_date_time",
            Timestamp,
            "createdOnBehalfOf.deletedDateTime",
        ),
        path("description", String, "description"),
        path("display_name", String, "displayName"),
        path("drive", Json, "drive"),
        path("drives", Json, "drives"),
        path("events", Json, "events"),
        path("expiration_date_time", Timestamp, "expirationDateTime"),
        path("extensions", Json, "extensions"),
        path("group_types", StringArray, "groupTypes")
            .with_description("Group type and membership; Unified marks a Microsoft 365 group"),
        path(
            "has_members_with_license_errors",
            Bool,
            "hasMembersWithLicenseErrors",
        ),
        path("hide_from_address_lists", Bool, "hideFromAddressLists"),
        path("hide_from_outlook_clients", Bool, "hideFromOutlookClients"),
        path("is_archived", Bool, "isArchived"),
        path("is_assignable_to_role", Bool, "isAssignableToRole"),
        path("is_subscribed_by_mail", Bool, "isSubscribedByMail"),
        path(
            "license_processing_state_additional_data",
            Json,
            "licenseProcessingState.additionalData",
        ),
        path(
            "license_processing_state_state",
            String,
            "licenseProcessingState.state",
        ),
        path("mail", String, "mail"),
        path("mail_enabled", Bool, "mailEnabled"),
        path("mail_nickname", String, "mailNickname"),
        path("membership_rule", String, "membershipRule"),
        path(
            "membership_rule_processing_state",
            String,
            "membershipRuleProcessingState",
        ),
        path("onenote", Json, "onenote"),
        path("on_premises_domain_name", String, "onPremisesDomainName"),
        path(
            "on_premises_last_sync_date_time",
            Timestamp,
            "onPremisesLastSyncDateTime",
        ),
        path("on_premises_net_bios_name", String, "onPremisesNetBiosName"),
        path(
            "on_premises_sam_account_name",
            String,
            "onPremisesSamAccountName",
        ),
        path(
            "on_premises_security_identifier",
            String,
            "onPremisesSecurityIdentifier",
        ),
        path("on_premises_sync_enabled", Bool, "onPremisesSyncEnabled"),
        path("photo_entity_additional_data", Json, "photo.additionalData"),
        path("photo_entity_id", String, "photo.id"),
        path("photo_height", Int, "photo.height"),
        path("photo_width", Int, "photo.width"),
        path("planner", Json, "planner"),
        path("preferred_data_location", String, "preferredDataLocation"),
        path("preferred_language", String, "preferredLanguage"),
        path("proxy_addresses", StringArray, "proxyAddresses"),
        path("renewed_date_time", Timestamp, "renewedDateTime"),
        path("security_enabled", Bool, "securityEnabled"),
        path("security_identifier", String, "securityIdentifier"),
        path("sites", Json, "sites"),
        path("theme", String, "theme"),
        path("threads", Json, "threads"),
        path("unseen_count", Int, "unseenCount"),
        path("visibility", String, "visibility"),
    ]
}

/// Columns read from the expanded `team`; all null when the group has no team.
fn team_columns() -> Vec<GraphColumn> {
    use ColumnType::{Bool, Json, String, Timestamp};

    vec![
        path("team_entity_additional_data", Json, "team.additionalData"),
        path("team_entity_id", String, "team.id"),
        path("team_channels", Json, "team.channels"),
        path("team_classification", String, "team.classification"),
        path("team_created_date_time", Timestamp, "team.createdDateTime"),
        path("team_description", String, "team.description"),
        path("team_display_name", String, "team.displayName"),
        path(
            "teamfun_settings_additional_data",
            Json,
            "team.funSettings.additionalData",
        ),
        path(
            "teamfun_settings_allow_custom_memes",
            Bool,
            "team.funSettings.allowCustomMemes",
        ),
        path(
            "teamfun_settings_allow_giphy",
            Bool,
            "team.funSettings.allowGiphy",
        ),
        path(
            "teamfun_settings_allow_stickers_and_memes",
            Bool,
            "team.funSettings.allowStickersAndMemes",
        ),
        path(
            "teamfun_settings_giphy_content_rating",
            String,
            "team.funSettings.giphyContentRating",
        ),
        path("team_group", Json, "team.group"),
        path(
            "teamguest_settings_additional_data",
            Json,
            "team.guestSettings.additionalData",
        ),
        path(
            "teamguest_settings_allow_create_update_channels",
            Bool,
            "team.guestSettings.allowCreateUpdateChannels",
        ),
        path(
            "teamguest_settings_allow_delete_channels",
            Bool,
            "team.guestSettings.allowDeleteChannels",
        ),
        path("team_internal_id", String, "team.internalId"),
        path("team_is_archived", Bool, "team.isArchived"),
        path(
            "teammember_settings_additional_data",
            Json,
            "team.memberSettings.additionalData",
        ),
        path(
            "teammember_settings_allow_add_remove_apps",
            Bool,
            "team.memberSettings.allowAddRemoveApps",
        ),
        path(
            "teammember_settings_allow_create_private_channels",
            Bool,
            "team.memberSettings.allowCreatePrivateChannels",
        ),
        path(
            "teammember_settings_allow_create_update_channels",
            Bool,
            "team.memberSettings.allowCreateUpdateChannels",
        ),
        path(
            "teammember_settings_allow_create_update_remove_connectors",
            Bool,
            "team.memberSettings.allowCreateUpdateRemoveConnectors",
        ),
        path(
            "teammember_settings_allow_create_update_remove_tabs",
            Bool,
            "team.memberSettings.allowCreateUpdateRemoveTabs",
        ),
        path(
            "teammember_settings_allow_delete_channels",
            Bool,
            "team.memberSettings.allowDeleteChannels",
        ),
        path(
            "teammessaging_settings_additional_data",
            Json,
            "team.messagingSettings.additionalData",
        ),
        path(
            "teammessaging_settings_allow_channel_mentions",
            Bool,
            "team.messagingSettings.allowChannelMentions",
        ),
        path(
            "teammessaging_settings_allow_owner_delete_messages",
            Bool,
            "team.messagingSettings.allowOwnerDeleteMessages",
        ),
        path(
            "teammessaging_settings_allow_team_mentions",
            Bool,
            "team.messagingSettings.allowTeamMentions",
        ),
        path(
            "teammessaging_settings_allow_user_delete_messages",
            Bool,
            "team.messagingSettings.allowUserDeleteMessages",
        ),
        path(
            "teammessaging_settings_allow_user_edit_messages",
            Bool,
            "team.messagingSettings.allowUserEditMessages",
        ),
        path("team_primary_channel", Json, "team.primaryChannel"),
        path("team_schedule", Json, "team.schedule"),
        path("team_specialization", String, "team.specialization"),
        path(
            "teamtemplate_entity_additional_data",
            Json,
            "team.template.additionalData",
        ),
        path("teamtemplate_entity_id", String, "team.template.id"),
        path("team_visibility", String, "team.visibility"),
        path("team_web_url", String, "team.webUrl"),
    ]
}

/// Names of the columns read from the group's team.
#[must_use]
pub fn team_column_names() -> Vec<&'static str> {
    team_columns().iter().map(|c| c.name).collect()
}
