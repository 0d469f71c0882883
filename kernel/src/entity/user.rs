mod id;
mod name;
mod password;
mod role;

pub use self::{id::*, name::*, password::*, role::*};
use destructure::Destructure;

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct User {
    id: UserId,
    name: UserName,
    password: Password,
    role: Role,
}

impl User {
    pub fn new(id: UserId, name: UserName, password: Password, role: Role) -> Self {
        Self {
            id,
            name,
            password,
            role,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}
