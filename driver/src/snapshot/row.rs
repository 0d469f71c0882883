use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kernel::prelude::entity::{
    Book, BookAuthors, BookGenre, BookId, BookTitle, DestructBook, DestructUser, Password,
    PublishedYear, Role, User, UserId, UserName,
};

use crate::error::DriverError;

/// Flat book record as stored in `books.json`.
#[derive(Debug, Serialize, Deserialize)]
pub(in crate::snapshot) struct BookRow {
    pub(in crate::snapshot) id: String,
    pub(in crate::snapshot) title: String,
    pub(in crate::snapshot) authors: Vec<String>,
    pub(in crate::snapshot) year: i32,
    pub(in crate::snapshot) genre: String,
    pub(in crate::snapshot) available: bool,
}

impl From<Book> for BookRow {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            authors,
            year,
            genre,
            available,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            authors: authors.into(),
            year: year.into(),
            genre: genre.into(),
            available,
        }
    }
}

impl TryFrom<BookRow> for Book {
    type Error = DriverError;

    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        let authors = BookAuthors::new(value.authors)
            .map_err(|report| DriverError::Conversion(anyhow!("book {}: {report:?}", value.id)))?;
        Ok(Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            authors,
            PublishedYear::new(value.year),
            BookGenre::new(value.genre),
            value.available,
        ))
    }
}

/// Flat user record as stored in `users.json`. The role tag and its
/// payload field sit inline next to the shared columns.
#[derive(Debug, Serialize, Deserialize)]
pub(in crate::snapshot) struct UserRow {
    pub(in crate::snapshot) id: Uuid,
    pub(in crate::snapshot) name: String,
    pub(in crate::snapshot) password: String,
    #[serde(flatten)]
    pub(in crate::snapshot) role: Role,
}

impl From<User> for UserRow {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            password,
            role,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
            role,
        }
    }
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        User::new(
            UserId::new(value.id),
            UserName::new(value.name),
            Password::new(value.password),
            value.role,
        )
    }
}
