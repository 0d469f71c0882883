use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub genre: String,
    pub available: bool,
}

impl From<Book> for BookDto {
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

#[derive(Debug)]
pub struct CreateBookDto {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub genre: String,
}

#[derive(Debug)]
pub struct RemoveBookDto {
    pub book_id: String,
    pub acting_user: Uuid,
}
