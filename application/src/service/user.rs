use error_stack::Report;
use uuid::Uuid;

use kernel::prelude::catalog::Catalog;
use kernel::prelude::entity::{Password, Role, User, UserId, UserName};
use kernel::CatalogError;

use crate::transfer::{CreateUserDto, RemoveUserDto, UserDto};

pub trait UserService: 'static {
    fn add_user(
        &self,
        catalog: &Catalog,
        dto: CreateUserDto,
    ) -> error_stack::Result<(Catalog, UserDto), CatalogError> {
        let role = match dto.role.as_str() {
            "student" => Role::Student {
                grade: dto.role_detail,
            },
            "faculty" => Role::Faculty {
                department: dto.role_detail,
            },
            "librarian" => Role::Librarian {
                staff_code: dto.role_detail,
            },
            other => {
                return Err(Report::new(CatalogError::InvalidInput)
                    .attach_printable(format!("unknown role {other}")))
            }
        };
        let id = dto.id.unwrap_or_else(Uuid::new_v4);
        let user = User::new(
            UserId::new(id),
            UserName::new(dto.name),
            Password::new(dto.password),
            role,
        );
        let receipt = UserDto::from(user.clone());
        Ok((catalog.add_user(user), receipt))
    }

    fn remove_user(
        &self,
        catalog: &Catalog,
        dto: RemoveUserDto,
    ) -> error_stack::Result<Catalog, CatalogError> {
        catalog.remove_user(&UserId::new(dto.user_id), &UserId::new(dto.acting_user))
    }

    fn list_users(&self, catalog: &Catalog) -> Vec<UserDto> {
        let mut users: Vec<UserDto> = catalog
            .users()
            .values()
            .cloned()
            .map(UserDto::from)
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }
}

impl<T> UserService for T where T: 'static {}
