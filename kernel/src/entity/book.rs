mod authors;
mod genre;
mod id;
mod title;
mod year;

pub use self::{authors::*, genre::*, id::*, title::*, year::*};
use destructure::{Destructure, Mutation};

#[derive(Debug, Clone, Eq, PartialEq, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    authors: BookAuthors,
    year: PublishedYear,
    genre: BookGenre,
    /// Single source of truth for "can be loaned right now". Kept in sync
    /// with the ledger by the loan/return operations.
    available: bool,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        authors: BookAuthors,
        year: PublishedYear,
        genre: BookGenre,
        available: bool,
    ) -> Self {
        Self {
            id,
            title,
            authors,
            year,
            genre,
            available,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn authors(&self) -> &BookAuthors {
        &self.authors
    }

    pub fn year(&self) -> &PublishedYear {
        &self.year
    }

    pub fn genre(&self) -> &BookGenre {
        &self.genre
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
