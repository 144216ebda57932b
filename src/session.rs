use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Session - non-verifying sign-in
// ============================================================================
//
// Anyone who types a display name is signed in with the role they pick.
// There are no credentials to check.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Staff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}

/// Returns `None` when the display name is blank
pub fn sign_in(name: &str, role: UserRole) -> Option<User> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some(User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        role,
    })
}
