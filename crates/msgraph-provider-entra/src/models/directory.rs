//! Group and directory object shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, AdditionalData, Team};

/// A Microsoft 365 group or security group.
///
/// Timestamps are kept as the strings Graph returns; projection parses them
/// and yields null for anything that is not RFC 3339.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub deleted_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub allow_external_senders: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub auto_subscribe_new_members: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub calendar: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub calendar_view: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub classification: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub conversations: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub created_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_on_behalf_of: Option<DirectoryObject>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub drive: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub drives: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub events: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub expiration_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub extensions: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub group_types: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub has_members_with_license_errors: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub hide_from_address_lists: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub hide_from_outlook_clients: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub is_archived: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub is_assignable_to_role: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub is_subscribed_by_mail: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub license_processing_state: Option<LicenseProcessingState>,
    #[serde(deserialize_with = "lenient")]
    pub mail: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mail_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub mail_nickname: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub membership_rule: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub membership_rule_processing_state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub onenote: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_domain_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_last_sync_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_net_bios_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_sam_account_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_security_identifier: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_sync_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub photo: Option<ProfilePhoto>,
    #[serde(deserialize_with = "lenient")]
    pub planner: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub preferred_data_location: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub preferred_language: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub proxy_addresses: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub renewed_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub security_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub security_identifier: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sites: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub team: Option<Team>,
    #[serde(deserialize_with = "lenient")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub threads: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub unseen_count: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub visibility: Option<String>,

    // Navigation collections, present only when expanded.
    #[serde(deserialize_with = "lenient")]
    pub accepted_senders: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub app_role_assignments: Option<Vec<AppRoleAssignment>>,
    #[serde(deserialize_with = "lenient")]
    pub assigned_labels: Option<Vec<AssignedLabel>>,
    #[serde(deserialize_with = "lenient")]
    pub assigned_licenses: Option<Vec<AssignedLicense>>,
    #[serde(deserialize_with = "lenient")]
    pub group_lifecycle_policies: Option<Vec<GroupLifecyclePolicy>>,
    #[serde(deserialize_with = "lenient")]
    pub member_of: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub members: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub members_with_license_errors: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub on_premises_provisioning_errors: Option<Vec<OnPremisesProvisioningError>>,
    #[serde(deserialize_with = "lenient")]
    pub owners: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub permission_grants: Option<Vec<ResourceSpecificPermissionGrant>>,
    #[serde(deserialize_with = "lenient")]
    pub photos: Option<Vec<ProfilePhoto>>,
    #[serde(deserialize_with = "lenient")]
    pub rejected_senders: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub settings: Option<Vec<GroupSetting>>,
    #[serde(deserialize_with = "lenient")]
    pub transitive_member_of: Option<Vec<DirectoryObject>>,
    #[serde(deserialize_with = "lenient")]
    pub transitive_members: Option<Vec<DirectoryObject>>,

    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Any directory object (user, group, device, service principal, ...).
///
/// The concrete type is in `additionalData["@odata.type"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectoryObject {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub deleted_date_time: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppRoleAssignment {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub deleted_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub app_role_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub principal_display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub principal_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub principal_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub resource_display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub resource_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Sensitivity label assigned to a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignedLabel {
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub label_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignedLicense {
    #[serde(deserialize_with = "lenient")]
    pub disabled_plans: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub sku_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupLifecyclePolicy {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alternate_notification_emails: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub group_lifetime_in_days: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub managed_group_types: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Group-based licensing state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseProcessingState {
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Error synchronizing the group from on-premises Active Directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnPremisesProvisioningError {
    #[serde(deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub occurred_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub property_causing_error: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSpecificPermissionGrant {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub deleted_date_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub client_app_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub client_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub permission: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub permission_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub resource_app_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePhoto {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<i32>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

/// Directory setting applied to a group, instantiated from a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSetting {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub template_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub values: Option<Vec<SettingValue>>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingValue {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_deserialize() {
        let group: Group = serde_json::from_value(json!({
            "id": "02bd9fd6-8f93-4758-87c3-1fb73740a315",
            "displayName": "HR Taskforce",
            "groupTypes": ["Unified"],
            "mailEnabled": true,
            "unseenCount": 3,
            "createdOnBehalfOf": {"id": "u1"},
            "photo": {"id": "default", "height": 64, "width": 64},
            "members": [{"id": "m1"}, {"id": "m2"}],
            "resourceProvisioningOptions": ["Team"]
        }))
        .unwrap();

        assert_eq!(group.display_name.as_deref(), Some("HR Taskforce"));
        assert_eq!(group.group_types, Some(vec!["Unified".to_string()]));
        assert_eq!(group.unseen_count, Some(3));
        assert_eq!(group.photo.as_ref().and_then(|p| p.height), Some(64));
        assert_eq!(group.members.as_ref().map(Vec::len), Some(2));
        assert!(group.team.is_none());
        assert_eq!(
            group.additional_data.get("resourceProvisioningOptions"),
            Some(&json!(["Team"]))
        );
    }

    #[test]
    fn test_malformed_properties_become_none() {
        let group: Group = serde_json::from_value(json!({
            "id": "g2",
            "displayName": 42,
            "unseenCount": "many",
            "photo": {"id": "default", "height": "tall", "width": 48},
            "team": {"id": "g2", "funSettings": {"allowGiphy": "yes", "allowStickersAndMemes": true}},
            "members": [{"id": "m1", "deletedDateTime": false}]
        }))
        .unwrap();

        assert_eq!(group.id.as_deref(), Some("g2"));
        assert!(group.display_name.is_none());
        assert!(group.unseen_count.is_none());

        let photo = group.photo.unwrap();
        assert_eq!(photo.id.as_deref(), Some("default"));
        assert!(photo.height.is_none());
        assert_eq!(photo.width, Some(48));

        let fun = group.team.unwrap().fun_settings.unwrap();
        assert!(fun.allow_giphy.is_none());
        assert_eq!(fun.allow_stickers_and_memes, Some(true));

        let members = group.members.unwrap();
        assert_eq!(members[0].id.as_deref(), Some("m1"));
        assert!(members[0].deleted_date_time.is_none());
    }

    #[test]
    fn test_null_properties_become_none() {
        let group: Group = serde_json::from_value(json!({
            "id": "g3",
            "team": null,
            "groupTypes": null
        }))
        .unwrap();

        assert!(group.team.is_none());
        assert!(group.group_types.is_none());
    }

    #[test]
    fn test_group_serializes_camel_case_paths() {
        let group = Group {
            on_premises_net_bios_name: Some("CONTOSO".into()),
            license_processing_state: Some(LicenseProcessingState {
                state: Some("ProcessingComplete".into()),
                ..LicenseProcessingState::default()
            }),
            ..Group::default()
        };
        let document = serde_json::to_value(&group).unwrap();

        assert_eq!(document["onPremisesNetBiosName"], "CONTOSO");
        assert_eq!(
            document["licenseProcessingState"]["state"],
            "ProcessingComplete"
        );
        assert_eq!(document["licenseProcessingState"]["additionalData"], json!({}));
        assert!(document["team"].is_null());
    }

    #[test]
    fn test_setting_values() {
        let setting: GroupSetting = serde_json::from_value(json!({
            "id": "s1",
            "displayName": "Group.Unified.Guest",
            "templateId": "08d542b9-071f-4e16-94b0-74abb372e3d9",
            "values": [{"name": "AllowToAddGuests", "value": "false"}]
        }))
        .unwrap();

        let values = setting.values.unwrap();
        assert_eq!(values[0].name.as_deref(), Some("AllowToAddGuests"));
        assert_eq!(values[0].value.as_deref(), Some("false"));
    }
}
