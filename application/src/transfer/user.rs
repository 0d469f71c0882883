use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, Role, User};

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub role_detail: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser { id, name, role, .. } = value.into_destruct();
        let label = role.label().to_string();
        let role_detail = match role {
            Role::Student { grade } => grade,
            Role::Faculty { department } => department,
            Role::Librarian { staff_code } => staff_code,
        };
        Self {
            id: id.into(),
            name: name.into(),
            role: label,
            role_detail,
        }
    }
}

#[derive(Debug)]
pub struct CreateUserDto {
    /// None lets the service mint a fresh id.
    pub id: Option<Uuid>,
    pub name: String,
    pub password: String,
    pub role: String,
    pub role_detail: String,
}

#[derive(Debug)]
pub struct RemoveUserDto {
    pub user_id: Uuid,
    pub acting_user: Uuid,
}
