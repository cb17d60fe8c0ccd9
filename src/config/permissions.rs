use serde::Deserialize;

use crate::commands::CommandSource;

/// Decides who may run a command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Nobody may run it.
    Deny,
    /// Everybody may run it.
    Allow,
    /// Only sources that hold the command's permission node.
    #[default]
    Permission,
}

impl PermissionState {
    #[must_use]
    pub fn has_permission<S: CommandSource + ?Sized>(self, source: &S, node: &str) -> bool {
        match self {
            Self::Deny => false,
            Self::Allow => true,
            Self::Permission => source.has_permission(node),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Permissions {
    /// **Environment variables**:
    /// - `WARDEN_PERMISSIONS_FORCE_REGISTER`
    pub force_register: PermissionState,
}
