//! Microsoft Graph resource shapes.
//!
//! Every model keeps the properties it does not declare in an
//! [`AdditionalData`] map, which serializes under the `additionalData` key so
//! columns can address it with a field path.
//!
//! [`GraphObject`] is the single item type flowing through the tables: one
//! variant per resource shape, with one dispatch point for the variant name
//! and one for the JSON document.

mod directory;
mod team;

pub use directory::{
    AppRoleAssignment, AssignedLabel, AssignedLicense, DirectoryObject, Group,
    GroupLifecyclePolicy, GroupSetting, LicenseProcessingState, OnPremisesProvisioningError,
    ProfilePhoto, ResourceSpecificPermissionGrant, SettingValue,
};
pub use team::{
    ConversationMember, Identity, IdentitySet, OperationError, Team, TeamFunSettings,
    TeamGuestSettings, TeamMemberSettings, TeamMessagingSettings, TeamsApp, TeamsAppDefinition,
    TeamsAppInstallation, TeamsAsyncOperation, TeamsTemplate, TeamworkBot,
};

use msgraph_provider::{Item, ProviderError, ProviderResult};
use serde::ser::SerializeMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Field path of the undeclared-properties map.
pub const ADDITIONAL_DATA_KEY: &str = "additionalData";

/// Properties of a Graph object that its model does not declare
/// (`@odata.type`, new API fields, ...).
///
/// Used as a `#[serde(flatten)]` field: it collects every unknown key when
/// deserializing and writes them back as one nested `additionalData` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalData(pub Map<String, Value>);

impl AdditionalData {
    /// Get an undeclared property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether no undeclared property was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for AdditionalData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(ADDITIONAL_DATA_KEY, &self.0)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AdditionalData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(AdditionalData)
    }
}

/// Deserialize an optional model field, yielding `None` when the value does
/// not fit the field's type.
///
/// The column reading a dropped property projects to null.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::debug!(error = %e, "Dropping malformed Graph property");
            Ok(None)
        }
    }
}

/// Every object kind that becomes a table row.
#[derive(Debug, Clone)]
pub enum GraphObject {
    Group(Box<Group>),
    DirectoryObject(DirectoryObject),
    AppRoleAssignment(AppRoleAssignment),
    AssignedLabel(AssignedLabel),
    AssignedLicense(AssignedLicense),
    GroupLifecyclePolicy(GroupLifecyclePolicy),
    OnPremisesProvisioningError(OnPremisesProvisioningError),
    ResourceSpecificPermissionGrant(ResourceSpecificPermissionGrant),
    ProfilePhoto(ProfilePhoto),
    GroupSetting(GroupSetting),
    TeamsAppInstallation(TeamsAppInstallation),
    TeamsAppDefinition(TeamsAppDefinition),
    ConversationMember(ConversationMember),
    TeamsAsyncOperation(TeamsAsyncOperation),
}

impl GraphObject {
    /// Variant name of [`GraphObject::Group`].
    pub const GROUP: &'static str = "Group";
    pub const DIRECTORY_OBJECT: &'static str = "DirectoryObject";
    pub const APP_ROLE_ASSIGNMENT: &'static str = "AppRoleAssignment";
    pub const ASSIGNED_LABEL: &'static str = "AssignedLabel";
    pub const ASSIGNED_LICENSE: &'static str = "AssignedLicense";
    pub const GROUP_LIFECYCLE_POLICY: &'static str = "GroupLifecyclePolicy";
    pub const ON_PREMISES_PROVISIONING_ERROR: &'static str = "OnPremisesProvisioningError";
    pub const RESOURCE_SPECIFIC_PERMISSION_GRANT: &'static str = "ResourceSpecificPermissionGrant";
    pub const PROFILE_PHOTO: &'static str = "ProfilePhoto";
    pub const GROUP_SETTING: &'static str = "GroupSetting";
    pub const TEAMS_APP_INSTALLATION: &'static str = "TeamsAppInstallation";
    pub const TEAMS_APP_DEFINITION: &'static str = "TeamsAppDefinition";
    pub const CONVERSATION_MEMBER: &'static str = "ConversationMember";
    pub const TEAMS_ASYNC_OPERATION: &'static str = "TeamsAsyncOperation";

    /// Borrow the group, or fail with a type mismatch attributed to `table`.
    pub fn as_group(&self, table: &str) -> ProviderResult<&Group> {
        match self {
            GraphObject::Group(group) => Ok(group),
            other => Err(ProviderError::type_mismatch(table, Self::GROUP, other.kind())),
        }
    }

    /// Borrow the group setting, or fail with a type mismatch attributed to `table`.
    pub fn as_group_setting(&self, table: &str) -> ProviderResult<&GroupSetting> {
        match self {
            GraphObject::GroupSetting(setting) => Ok(setting),
            other => Err(ProviderError::type_mismatch(
                table,
                Self::GROUP_SETTING,
                other.kind(),
            )),
        }
    }

    /// Borrow the app installation, or fail with a type mismatch attributed to `table`.
    pub fn as_teams_app_installation(&self, table: &str) -> ProviderResult<&TeamsAppInstallation> {
        match self {
            GraphObject::TeamsAppInstallation(installation) => Ok(installation),
            other => Err(ProviderError::type_mismatch(
                table,
                Self::TEAMS_APP_INSTALLATION,
                other.kind(),
            )),
        }
    }
}

impl Item for GraphObject {
    fn kind(&self) -> &'static str {
        match self {
            GraphObject::Group(_) => Self::GROUP,
            GraphObject::DirectoryObject(_) => Self::DIRECTORY_OBJECT,
            GraphObject::AppRoleAssignment(_) => Self::APP_ROLE_ASSIGNMENT,
            GraphObject::AssignedLabel(_) => Self::ASSIGNED_LABEL,
            GraphObject::AssignedLicense(_) => Self::ASSIGNED_LICENSE,
            GraphObject::GroupLifecyclePolicy(_) => Self::GROUP_LIFECYCLE_POLICY,
            GraphObject::OnPremisesProvisioningError(_) => Self::ON_PREMISES_PROVISIONING_ERROR,
            GraphObject::ResourceSpecificPermissionGrant(_) => {
                Self::RESOURCE_SPECIFIC_PERMISSION_GRANT
            }
            GraphObject::ProfilePhoto(_) => Self::PROFILE_PHOTO,
            GraphObject::GroupSetting(_) => Self::GROUP_SETTING,
            GraphObject::TeamsAppInstallation(_) => Self::TEAMS_APP_INSTALLATION,
            GraphObject::TeamsAppDefinition(_) => Self::TEAMS_APP_DEFINITION,
            GraphObject::ConversationMember(_) => Self::CONVERSATION_MEMBER,
            GraphObject::TeamsAsyncOperation(_) => Self::TEAMS_ASYNC_OPERATION,
        }
    }

    fn document(&self) -> ProviderResult<Value> {
        let document = match self {
            GraphObject::Group(v) => serde_json::to_value(v),
            GraphObject::DirectoryObject(v) => serde_json::to_value(v),
            GraphObject::AppRoleAssignment(v) => serde_json::to_value(v),
            GraphObject::AssignedLabel(v) => serde_json::to_value(v),
            GraphObject::AssignedLicense(v) => serde_json::to_value(v),
            GraphObject::GroupLifecyclePolicy(v) => serde_json::to_value(v),
            GraphObject::OnPremisesProvisioningError(v) => serde_json::to_value(v),
            GraphObject::ResourceSpecificPermissionGrant(v) => serde_json::to_value(v),
            GraphObject::ProfilePhoto(v) => serde_json::to_value(v),
            GraphObject::GroupSetting(v) => serde_json::to_value(v),
            GraphObject::TeamsAppInstallation(v) => serde_json::to_value(v),
            GraphObject::TeamsAppDefinition(v) => serde_json::to_value(v),
            GraphObject::ConversationMember(v) => serde_json::to_value(v),
            GraphObject::TeamsAsyncOperation(v) => serde_json::to_value(v),
        };
        Ok(document?)
    }
}

impl From<Group> for GraphObject {
    fn from(group: Group) -> Self {
        GraphObject::Group(Box::new(group))
    }
}
