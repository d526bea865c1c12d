//! Child tables of `msgraph_ad_groups`.
//!
//! Every relation reads a collection already present on the parent item
//! (expanded by the groups query). Nothing is fetched here: an absent
//! collection yields no rows, and entries keep the API's order.

use msgraph_provider::{ColumnType, ColumnValue, ExtractFn, ProviderResult, Resource, Table};
use serde_json::{Map, Value};

use crate::client::Client;
use crate::models::{Group, GraphObject, TeamsAppInstallation};
use crate::resources::{parent_id, path, GraphColumn, GraphTable};

pub const ACCEPTED_SENDERS_TABLE: &str = "msgraph_ad_group_accepted_senders";
pub const APP_ROLE_ASSIGNMENTS_TABLE: &str = "msgraph_ad_group_app_role_assignments";
pub const ASSIGNED_LABELS_TABLE: &str = "msgraph_ad_group_assigned_labels";
pub const ASSIGNED_LICENSES_TABLE: &str = "msgraph_ad_group_assigned_licenses";
pub const LIFECYCLE_POLICIES_TABLE: &str = "msgraph_ad_group_lifecycle_policies";
pub const MEMBER_OF_TABLE: &str = "msgraph_ad_group_member_of";
pub const MEMBERS_TABLE: &str = "msgraph_ad_group_members";
pub const MEMBERS_WITH_LICENSE_ERRORS_TABLE: &str = "msgraph_ad_group_members_with_license_errors";
pub const ON_PREMISES_PROVISIONING_ERRORS_TABLE: &str =
    "msgraph_ad_group_on_premises_provisioning_errors";
pub const OWNERS_TABLE: &str = "msgraph_ad_group_owners";
pub const PERMISSION_GRANTS_TABLE: &str = "msgraph_ad_group_permission_grants";
pub const PHOTOS_TABLE: &str = "msgraph_ad_group_photos";
pub const REJECTED_SENDERS_TABLE: &str = "msgraph_ad_group_rejected_senders";
pub const SETTINGS_TABLE: &str = "msgraph_ad_group_settings";
pub const TEAM_INSTALLED_APPS_TABLE: &str = "msgraph_ad_group_team_installed_apps";
pub const TEAM_APP_DEFINITIONS_TABLE: &str =
    "msgraph_ad_group_team_installed_app_teams_app_app_definitions";
pub const TEAM_MEMBERS_TABLE: &str = "msgraph_ad_group_team_members";
pub const TEAM_OPERATIONS_TABLE: &str = "msgraph_ad_group_team_operations";
pub const TRANSITIVE_MEMBER_OF_TABLE: &str = "msgraph_ad_group_transitive_member_of";
pub const TRANSITIVE_MEMBERS_TABLE: &str = "msgraph_ad_group_transitive_members";

const GROUP_FK: &str = "group_cq_id";
const INSTALLED_APP_FK: &str = "group_team_installed_app_cq_id";

pub(super) fn relations() -> Vec<GraphTable> {
    vec![
        directory_objects(ACCEPTED_SENDERS_TABLE, accepted_senders)
            .with_description("Users and groups allowed to post to the group"),
        app_role_assignments(),
        assigned_labels(),
        assigned_licenses(),
        lifecycle_policies(),
        directory_objects(MEMBER_OF_TABLE, member_of)
            .with_description("Groups and administrative units the group is a direct member of"),
        directory_objects(MEMBERS_TABLE, members)
            .with_description("Direct members of the group"),
        directory_objects(MEMBERS_WITH_LICENSE_ERRORS_TABLE, members_with_license_errors),
        on_premises_provisioning_errors(),
        directory_objects(OWNERS_TABLE, owners).with_description("Owners of the group"),
        permission_grants(),
        photos(),
        directory_objects(REJECTED_SENDERS_TABLE, rejected_senders),
        settings(),
        team_installed_apps(),
        team_members(),
        team_operations(),
        directory_objects(TRANSITIVE_MEMBER_OF_TABLE, transitive_member_of),
        directory_objects(TRANSITIVE_MEMBERS_TABLE, transitive_members),
    ]
}

/// Wrap each entry of an optional collection as a row item.
fn collect<T: Clone>(items: Option<&Vec<T>>, wrap: fn(T) -> GraphObject) -> Vec<GraphObject> {
    items.into_iter().flatten().cloned().map(wrap).collect()
}

fn parent_group<'a>(table: &str, parent: &'a Resource<GraphObject>) -> ProviderResult<&'a Group> {
    parent.item().as_group(table)
}

fn parent_installation<'a>(
    table: &str,
    parent: &'a Resource<GraphObject>,
) -> ProviderResult<&'a TeamsAppInstallation> {
    parent.item().as_teams_app_installation(table)
}

// Directory object collections

fn directory_objects(name: &'static str, extract: ExtractFn<Client, GraphObject>) -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(name, GraphObject::DIRECTORY_OBJECT, extract).with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("deleted_date_time", Timestamp, "deletedDateTime"),
    ])
}

macro_rules! directory_object_extractor {
    ($name:ident, $table:expr, $field:ident) => {
        fn $name(
            _client: &Client,
            parent: &Resource<GraphObject>,
        ) -> ProviderResult<Vec<GraphObject>> {
            let group = parent_group($table, parent)?;
            Ok(collect(
                group.$field.as_ref(),
                GraphObject::DirectoryObject,
            ))
        }
    };
}

directory_object_extractor!(accepted_senders, ACCEPTED_SENDERS_TABLE, accepted_senders);
directory_object_extractor!(member_of, MEMBER_OF_TABLE, member_of);
directory_object_extractor!(members, MEMBERS_TABLE, members);
directory_object_extractor!(
    members_with_license_errors,
    MEMBERS_WITH_LICENSE_ERRORS_TABLE,
    members_with_license_errors
);
directory_object_extractor!(owners, OWNERS_TABLE, owners);
directory_object_extractor!(rejected_senders, REJECTED_SENDERS_TABLE, rejected_senders);
directory_object_extractor!(
    transitive_member_of,
    TRANSITIVE_MEMBER_OF_TABLE,
    transitive_member_of
);
directory_object_extractor!(
    transitive_members,
    TRANSITIVE_MEMBERS_TABLE,
    transitive_members
);

// Group-owned collections

fn app_role_assignments() -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(
        APP_ROLE_ASSIGNMENTS_TABLE,
        GraphObject::APP_ROLE_ASSIGNMENT,
        |_, parent| {
            let group = parent_group(APP_ROLE_ASSIGNMENTS_TABLE, parent)?;
            Ok(collect(
                group.app_role_assignments.as_ref(),
                GraphObject::AppRoleAssignment,
            ))
        },
    )
    .with_description("App roles granted to the group")
    .with_columns([
        parent_id(GROUP_FK),
        path("directory_object_entity_additional_data", Json, "additionalData"),
        path("directory_object_entity_id", String, "id"),
        path("directory_object_deleted_date_time", Timestamp, "deletedDateTime"),
        path("app_role_id", String, "appRoleId"),
        path("created_date_time", Timestamp, "createdDateTime"),
        path("principal_display_name", String, "principalDisplayName"),
        path("principal_id", String, "principalId"),
        path("principal_type", String, "principalType"),
        path("resource_display_name", String, "resourceDisplayName"),
        path("resource_id", String, "resourceId"),
    ])
}

fn assigned_labels() -> GraphTable {
    use ColumnType::{Json, String};

    Table::extracted(
        ASSIGNED_LABELS_TABLE,
        GraphObject::ASSIGNED_LABEL,
        |_, parent| {
            let group = parent_group(ASSIGNED_LABELS_TABLE, parent)?;
            Ok(collect(
                group.assigned_labels.as_ref(),
                GraphObject::AssignedLabel,
            ))
        },
    )
    .with_description("Sensitivity labels assigned to the group")
    .with_columns([
        parent_id(GROUP_FK),
        path("additional_data", Json, "additionalData"),
        path("display_name", String, "displayName"),
        path("label_id", String, "labelId"),
    ])
}

fn assigned_licenses() -> GraphTable {
    use ColumnType::{Json, String, StringArray};

    Table::extracted(
        ASSIGNED_LICENSES_TABLE,
        GraphObject::ASSIGNED_LICENSE,
        |_, parent| {
            let group = parent_group(ASSIGNED_LICENSES_TABLE, parent)?;
            Ok(collect(
                group.assigned_licenses.as_ref(),
                GraphObject::AssignedLicense,
            ))
        },
    )
    .with_columns([
        parent_id(GROUP_FK),
        path("additional_data", Json, "additionalData"),
        path("disabled_plans", StringArray, "disabledPlans"),
        path("sku_id", String, "skuId"),
    ])
}

fn lifecycle_policies() -> GraphTable {
    use ColumnType::{Int, Json, String};

    Table::extracted(
        LIFECYCLE_POLICIES_TABLE,
        GraphObject::GROUP_LIFECYCLE_POLICY,
        |_, parent| {
            let group = parent_group(LIFECYCLE_POLICIES_TABLE, parent)?;
            Ok(collect(
                group.group_lifecycle_policies.as_ref(),
                GraphObject::GroupLifecyclePolicy,
            ))
        },
    )
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path(
            "alternate_notification_emails",
            String,
            "alternateNotificationEmails",
        ),
        path("group_lifetime_in_days", Int, "groupLifetimeInDays"),
        path("managed_group_types", String, "managedGroupTypes"),
    ])
}

fn on_premises_provisioning_errors() -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(
        ON_PREMISES_PROVISIONING_ERRORS_TABLE,
        GraphObject::ON_PREMISES_PROVISIONING_ERROR,
        |_, parent| {
            let group = parent_group(ON_PREMISES_PROVISIONING_ERRORS_TABLE, parent)?;
            Ok(collect(
                group.on_premises_provisioning_errors.as_ref(),
                GraphObject::OnPremisesProvisioningError,
            ))
        },
    )
    .with_description("Errors raised while synchronizing the group from on-premises AD")
    .with_columns([
        parent_id(GROUP_FK),
        path("additional_data", Json, "additionalData"),
        path("category", String, "category"),
        path("occurred_date_time", Timestamp, "occurredDateTime"),
        path("property_causing_error", String, "propertyCausingError"),
        path("value", String, "value"),
    ])
}

fn permission_grants() -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(
        PERMISSION_GRANTS_TABLE,
        GraphObject::RESOURCE_SPECIFIC_PERMISSION_GRANT,
        |_, parent| {
            let group = parent_group(PERMISSION_GRANTS_TABLE, parent)?;
            Ok(collect(
                group.permission_grants.as_ref(),
                GraphObject::ResourceSpecificPermissionGrant,
            ))
        },
    )
    .with_columns([
        parent_id(GROUP_FK),
        path("directory_object_entity_additional_data", Json, "additionalData"),
        path("directory_object_entity_id", String, "id"),
        path("directory_object_deleted_date_time", Timestamp, "deletedDateTime"),
        path("client_app_id", String, "clientAppId"),
        path("client_id", String, "clientId"),
        path("permission", String, "permission"),
        path("permission_type", String, "permissionType"),
        path("resource_app_id", String, "resourceAppId"),
    ])
}

fn photos() -> GraphTable {
    use ColumnType::{Int, Json, String};

    Table::extracted(PHOTOS_TABLE, GraphObject::PROFILE_PHOTO, |_, parent| {
        let group = parent_group(PHOTOS_TABLE, parent)?;
        Ok(collect(group.photos.as_ref(), GraphObject::ProfilePhoto))
    })
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("height", Int, "height"),
        path("width", Int, "width"),
    ])
}

fn settings() -> GraphTable {
    use ColumnType::{Json, String};

    Table::extracted(SETTINGS_TABLE, GraphObject::GROUP_SETTING, |_, parent| {
        let group = parent_group(SETTINGS_TABLE, parent)?;
        Ok(collect(group.settings.as_ref(), GraphObject::GroupSetting))
    })
    .with_description("Directory settings applied to the group")
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("display_name", String, "displayName"),
        path("template_id", String, "templateId"),
        GraphColumn::new("values", Json)
            .with_description("Setting values keyed by name")
            .func(resolve_setting_values),
    ])
}

/// Collapse `[{name, value}, ...]` into `{name: value}`.
///
/// Entries without a name are skipped; a missing value maps to null.
fn resolve_setting_values(
    _client: &Client,
    resource: &Resource<GraphObject>,
) -> ProviderResult<ColumnValue> {
    let setting = resource.item().as_group_setting(SETTINGS_TABLE)?;
    let values: Map<std::string::String, Value> = setting
        .values
        .iter()
        .flatten()
        .filter_map(|v| {
            let name = v.name.clone()?;
            Some((name, v.value.clone().map_or(Value::Null, Value::String)))
        })
        .collect();
    Ok(ColumnValue::Json(Value::Object(values)))
}

// Team collections; a group without a team has none of these.

fn team_installed_apps() -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(
        TEAM_INSTALLED_APPS_TABLE,
        GraphObject::TEAMS_APP_INSTALLATION,
        |_, parent| {
            let group = parent_group(TEAM_INSTALLED_APPS_TABLE, parent)?;
            Ok(collect(
                group.team.as_ref().and_then(|t| t.installed_apps.as_ref()),
                GraphObject::TeamsAppInstallation,
            ))
        },
    )
    .with_description("Apps installed in the group's team")
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("teams_app_entity_additional_data", Json, "teamsApp.additionalData"),
        path("teams_app_entity_id", String, "teamsApp.id"),
        path("teams_app_display_name", String, "teamsApp.displayName"),
        path(
            "teams_app_distribution_method",
            String,
            "teamsApp.distributionMethod",
        ),
        path("teams_app_external_id", String, "teamsApp.externalId"),
        path(
            "teams_app_definition_entity_additional_data",
            Json,
            "teamsAppDefinition.additionalData",
        ),
        path(
            "teams_app_definition_entity_id",
            String,
            "teamsAppDefinition.id",
        ),
        path(
            "teams_app_definitionbot_entity_additional_data",
            Json,
            "teamsAppDefinition.bot.additionalData",
        ),
        path(
            "teams_app_definitionbot_entity_id",
            String,
            "teamsAppDefinition.bot.id",
        ),
        path(
            "teams_app_definitioncreated_by_additional_data",
            Json,
            "teamsAppDefinition.createdBy.additionalData",
        ),
        path(
            "teams_app_definitioncreated_byapplication_additional_data",
            Json,
            "teamsAppDefinition.createdBy.application.additionalData",
        ),
        path(
            "teams_app_definitioncreated_byapplication_display_name",
            String,
            "teamsAppDefinition.createdBy.application.displayName",
        ),
        path(
            "teams_app_definitioncreated_byapplication_id",
            String,
            "teamsAppDefinition.createdBy.application.id",
        ),
        path(
            "teams_app_definitioncreated_bydevice_additional_data",
            Json,
            "teamsAppDefinition.createdBy.device.additionalData",
        ),
        path(
            "teams_app_definitioncreated_bydevice_display_name",
            String,
            "teamsAppDefinition.createdBy.device.displayName",
        ),
        path(
            "teams_app_definitioncreated_bydevice_id",
            String,
            "teamsAppDefinition.createdBy.device.id",
        ),
        path(
            "teams_app_definitioncreated_byuser_additional_data",
            Json,
            "teamsAppDefinition.createdBy.user.additionalData",
        ),
        path(
            "teams_app_definitioncreated_byuser_display_name",
            String,
            "teamsAppDefinition.createdBy.user.displayName",
        ),
        path(
            "teams_app_definitioncreated_byuser_id",
            String,
            "teamsAppDefinition.createdBy.user.id",
        ),
        path(
            "teams_app_definition_description",
            String,
            "teamsAppDefinition.description",
        ),
        path(
            "teams_app_definition_display_name",
            String,
            "teamsAppDefinition.displayName",
        ),
        path(
            "teams_app_definition_last_modified_date_time",
            Timestamp,
            "teamsAppDefinition.lastModifiedDateTime",
        ),
        path(
            "teams_app_definition_publishing_state",
            String,
            "teamsAppDefinition.publishingState",
        ),
        path(
            "teams_app_definition_short_description",
            String,
            "teamsAppDefinition.shortDescription",
        ),
        path(
            "teams_app_definition_teams_app_id",
            String,
            "teamsAppDefinition.teamsAppId",
        ),
        path(
            "teams_app_definition_version",
            String,
            "teamsAppDefinition.version",
        ),
    ])
    .with_relation(team_app_definitions())
}

/// Every published definition of an installed app.
fn team_app_definitions() -> GraphTable {
    use ColumnType::{Json, String, Timestamp};

    Table::extracted(
        TEAM_APP_DEFINITIONS_TABLE,
        GraphObject::TEAMS_APP_DEFINITION,
        |_, parent| {
            let installation = parent_installation(TEAM_APP_DEFINITIONS_TABLE, parent)?;
            Ok(collect(
                installation
                    .teams_app
                    .as_ref()
                    .and_then(|app| app.app_definitions.as_ref()),
                GraphObject::TeamsAppDefinition,
            ))
        },
    )
    .with_columns([
        parent_id(INSTALLED_APP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("bot_entity_additional_data", Json, "bot.additionalData"),
        path("bot_entity_id", String, "bot.id"),
        path("created_by_additional_data", Json, "createdBy.additionalData"),
        path(
            "created_byapplication_additional_data",
            Json,
            "createdBy.application.additionalData",
        ),
        path(
            "created_byapplication_display_name",
            String,
            "createdBy.application.displayName",
        ),
        path("created_byapplication_id", String, "createdBy.application.id"),
        path(
            "created_bydevice_additional_data",
            Json,
            "createdBy.device.additionalData",
        ),
        path(
            "created_bydevice_display_name",
            String,
            "createdBy.device.displayName",
        ),
        path("created_bydevice_id", String, "createdBy.device.id"),
        path(
            "created_byuser_additional_data",
            Json,
            "createdBy.user.additionalData",
        ),
        path(
            "created_byuser_display_name",
            String,
            "createdBy.user.displayName",
        ),
        path("created_byuser_id", String, "createdBy.user.id"),
        path("description", String, "description"),
        path("display_name", String, "displayName"),
        path("last_modified_date_time", Timestamp, "lastModifiedDateTime"),
        path("publishing_state", String, "publishingState"),
        path("short_description", String, "shortDescription"),
        path("teams_app_id", String, "teamsAppId"),
        path("version", String, "version"),
    ])
}

fn team_members() -> GraphTable {
    use ColumnType::{Json, String, StringArray, Timestamp};

    Table::extracted(
        TEAM_MEMBERS_TABLE,
        GraphObject::CONVERSATION_MEMBER,
        |_, parent| {
            let group = parent_group(TEAM_MEMBERS_TABLE, parent)?;
            Ok(collect(
                group.team.as_ref().and_then(|t| t.members.as_ref()),
                GraphObject::ConversationMember,
            ))
        },
    )
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("display_name", String, "displayName"),
        path("roles", StringArray, "roles"),
        path(
            "visible_history_start_date_time",
            Timestamp,
            "visibleHistoryStartDateTime",
        ),
    ])
}

fn team_operations() -> GraphTable {
    use ColumnType::{Int, Json, String, Timestamp};

    Table::extracted(
        TEAM_OPERATIONS_TABLE,
        GraphObject::TEAMS_ASYNC_OPERATION,
        |_, parent| {
            let group = parent_group(TEAM_OPERATIONS_TABLE, parent)?;
            Ok(collect(
                group.team.as_ref().and_then(|t| t.operations.as_ref()),
                GraphObject::TeamsAsyncOperation,
            ))
        },
    )
    .with_description("Long-running operations run on the group's team")
    .with_columns([
        parent_id(GROUP_FK),
        path("entity_additional_data", Json, "additionalData"),
        path("entity_id", String, "id"),
        path("attempts_count", Int, "attemptsCount"),
        path("created_date_time", Timestamp, "createdDateTime"),
        path("error_additional_data", Json, "error.additionalData"),
        path("error_code", String, "error.code"),
        path("error_message", String, "error.message"),
        path("last_action_date_time", Timestamp, "lastActionDateTime"),
        path("operation_type", String, "operationType"),
        path("status", String, "status"),
        path("target_resource_id", String, "targetResourceId"),
        path("target_resource_location", String, "targetResourceLocation"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::{GroupSetting, SettingValue};
    use crate::services::Services;

    #[derive(Debug)]
    struct Unused;

    #[async_trait::async_trait]
    impl crate::services::GroupsService for Unused {
        async fn list(
            &self,
            _next_link: Option<&str>,
        ) -> crate::EntraResult<crate::graph_client::ODataResponse<Group>> {
            Err(crate::EntraError::Config("not called".into()))
        }
    }

    fn client() -> Client {
        Client::new("contoso", Services::new(std::sync::Arc::new(Unused)))
    }

    fn group_row(document: Value) -> Resource<GraphObject> {
        let group: Group = serde_json::from_value(document).unwrap();
        Resource::new("msgraph_ad_groups", GraphObject::from(group), None)
    }

    fn extract(table: &GraphTable, parent: &Resource<GraphObject>) -> Vec<GraphObject> {
        match table.resolver {
            msgraph_provider::TableResolver::Extract(f) => f(&client(), parent).unwrap(),
            msgraph_provider::TableResolver::Fetch(_) => panic!("relation must extract"),
        }
    }

    #[test]
    fn test_relation_names() {
        let names: Vec<_> = relations().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 19);
        assert!(names.contains(&MEMBERS_TABLE));
        assert!(names.contains(&TEAM_INSTALLED_APPS_TABLE));
        assert!(!names.contains(&TEAM_APP_DEFINITIONS_TABLE));
    }

    #[test]
    fn test_members_keep_api_order() {
        let parent = group_row(json!({
            "id": "g1",
            "members": [{"id": "m1"}, {"id": "m2"}, {"id": "m3"}]
        }));
        let table = directory_objects(MEMBERS_TABLE, members);
        let ids: Vec<_> = extract(&table, &parent)
            .into_iter()
            .map(|item| match item {
                GraphObject::DirectoryObject(o) => o.id.unwrap_or_default(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_absent_collections_yield_nothing() {
        let parent = group_row(json!({"id": "g1", "members": []}));
        for table in relations() {
            assert!(
                extract(&table, &parent).is_empty(),
                "{} should be empty",
                table.name
            );
        }
    }

    #[test]
    fn test_wrong_parent_kind_is_type_mismatch() {
        let parent = Resource::new(
            SETTINGS_TABLE,
            GraphObject::GroupSetting(GroupSetting::default()),
            None,
        );
        let table = directory_objects(OWNERS_TABLE, owners);
        let err = match table.resolver {
            msgraph_provider::TableResolver::Extract(f) => f(&client(), &parent).unwrap_err(),
            msgraph_provider::TableResolver::Fetch(_) => unreachable!(),
        };
        assert!(err.is_contract_violation());
        assert_eq!(err.table(), Some(OWNERS_TABLE));
    }

    #[test]
    fn test_setting_values_map() {
        let setting = GroupSetting {
            id: Some("s1".into()),
            values: Some(vec![
                SettingValue {
                    name: Some("AllowToAddGuests".into()),
                    value: Some("false".into()),
                    ..SettingValue::default()
                },
                SettingValue {
                    name: Some("CustomBlockedWordsList".into()),
                    value: None,
                    ..SettingValue::default()
                },
                SettingValue {
                    name: None,
                    value: Some("orphan".into()),
                    ..SettingValue::default()
                },
            ]),
            ..GroupSetting::default()
        };
        let resource = Resource::new(SETTINGS_TABLE, GraphObject::GroupSetting(setting), None);

        let value = resolve_setting_values(&client(), &resource).unwrap();
        assert_eq!(
            value.as_json(),
            Some(&json!({"AllowToAddGuests": "false", "CustomBlockedWordsList": null}))
        );
    }

    #[test]
    fn test_app_definitions_without_teams_app() {
        let installation = TeamsAppInstallation {
            id: Some("inst-1".into()),
            ..Default::default()
        };
        let parent = Resource::new(
            TEAM_INSTALLED_APPS_TABLE,
            GraphObject::TeamsAppInstallation(installation),
            None,
        );
        assert!(extract(&team_app_definitions(), &parent).is_empty());
    }

    #[test]
    fn test_app_definitions_read_installed_app() {
        let installation: TeamsAppInstallation = serde_json::from_value(json!({
            "id": "inst-1",
            "teamsApp": {"id": "app-1", "appDefinitions": [{"id": "def-1"}, {"id": "def-2"}]}
        }))
        .unwrap();
        let parent = Resource::new(
            TEAM_INSTALLED_APPS_TABLE,
            GraphObject::TeamsAppInstallation(installation),
            None,
        );
        assert_eq!(extract(&team_app_definitions(), &parent).len(), 2);

        let group = group_row(json!({"id": "g1"}));
        let err = match team_app_definitions().resolver {
            msgraph_provider::TableResolver::Extract(f) => f(&client(), &group).unwrap_err(),
            msgraph_provider::TableResolver::Fetch(_) => unreachable!(),
        };
        assert!(err.is_contract_violation());
        assert_eq!(err.table(), Some(TEAM_APP_DEFINITIONS_TABLE));
    }
}
