/// Signed-in user and role-based view access
///
/// The user record is held by the session (see
/// [`LocalWorkspace::login`](crate::local::LocalWorkspace::login)), not by the
/// row store. Access to a view is decided by [`User::can_view`]:
///
/// - Admin: every view
/// - Member: the dashboard plus the views listed in `permissions`
///
/// # Example
///
/// ```
/// use vena_shared::models::user::{User, UserRole};
/// use vena_shared::navigation::ViewType;
///
/// let user = User {
///     id: "u-2".to_string(),
///     email: "staff@vena.test".to_string(),
///     full_name: "Staff".to_string(),
///     role: UserRole::Member,
///     permissions: Some(vec![ViewType::Clients]),
/// };
///
/// assert!(user.can_view(ViewType::Clients));
/// assert!(user.can_view(ViewType::Dashboard));
/// assert!(!user.can_view(ViewType::Finance));
/// ```

use crate::navigation::ViewType;
use serde::{Deserialize, Serialize};

/// Application role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Unrestricted access
    Admin,

    /// Access limited to the permission list
    Member,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Member => "Member",
        }
    }
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub email: String,

    pub full_name: String,

    pub role: UserRole,

    /// Views a member may open besides the dashboard
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::navigation::lenient_views"
    )]
    pub permissions: Option<Vec<ViewType>>,
}

impl User {
    /// Checks whether this user may open `view`
    pub fn can_view(&self, view: ViewType) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Member => {
                view == ViewType::Dashboard
                    || self
                        .permissions
                        .as_ref()
                        .is_some_and(|permissions| permissions.contains(&view))
            }
        }
    }
}
