use kernel::prelude::catalog::Catalog;
use kernel::prelude::entity::{
    Book, BookAuthors, BookGenre, BookId, BookTitle, PublishedYear, UserId,
};
use kernel::CatalogError;

use crate::transfer::{BookDto, CreateBookDto, RemoveBookDto};

pub trait BookService: 'static {
    /// New books go on the shelf available; a colliding id replaces the
    /// prior entry outright.
    fn add_book(
        &self,
        catalog: &Catalog,
        dto: CreateBookDto,
    ) -> error_stack::Result<Catalog, CatalogError> {
        let authors = BookAuthors::new(dto.authors)?;
        let book = Book::new(
            BookId::new(dto.id),
            BookTitle::new(dto.title),
            authors,
            PublishedYear::new(dto.year),
            BookGenre::new(dto.genre),
            true,
        );
        Ok(catalog.add_book(book))
    }

    fn remove_book(
        &self,
        catalog: &Catalog,
        dto: RemoveBookDto,
    ) -> error_stack::Result<Catalog, CatalogError> {
        catalog.remove_book(&BookId::new(dto.book_id), &UserId::new(dto.acting_user))
    }

    fn list_books(&self, catalog: &Catalog) -> Vec<BookDto> {
        let mut books: Vec<BookDto> = catalog
            .books()
            .values()
            .cloned()
            .map(BookDto::from)
            .collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        books
    }
}

impl<T> BookService for T where T: 'static {}
