//! Azure Active Directory tables.

mod group_relations;
mod groups;

pub use group_relations::{
    ACCEPTED_SENDERS_TABLE, APP_ROLE_ASSIGNMENTS_TABLE, ASSIGNED_LABELS_TABLE,
    ASSIGNED_LICENSES_TABLE, LIFECYCLE_POLICIES_TABLE, MEMBERS_TABLE,
    MEMBERS_WITH_LICENSE_ERRORS_TABLE, MEMBER_OF_TABLE, ON_PREMISES_PROVISIONING_ERRORS_TABLE,
    OWNERS_TABLE, PERMISSION_GRANTS_TABLE, PHOTOS_TABLE, REJECTED_SENDERS_TABLE, SETTINGS_TABLE,
    TEAM_APP_DEFINITIONS_TABLE, TEAM_INSTALLED_APPS_TABLE, TEAM_MEMBERS_TABLE,
    TEAM_OPERATIONS_TABLE, TRANSITIVE_MEMBERS_TABLE, TRANSITIVE_MEMBER_OF_TABLE,
};
pub use groups::{groups, team_column_names, FetchGroups, GROUPS_TABLE};
