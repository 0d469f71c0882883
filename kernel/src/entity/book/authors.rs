use error_stack::Report;

use crate::CatalogError;

/// Author list. A book always names at least one author; blank entries are
/// dropped before the check.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookAuthors(Vec<String>);

impl BookAuthors {
    pub fn new(authors: impl Into<Vec<String>>) -> error_stack::Result<Self, CatalogError> {
        let authors: Vec<String> = authors
            .into()
            .into_iter()
            .filter(|author| !author.trim().is_empty())
            .collect();
        if authors.is_empty() {
            return Err(Report::new(CatalogError::InvalidInput)
                .attach_printable("a book needs at least one author"));
        }
        Ok(Self(authors))
    }
}

impl AsRef<[String]> for BookAuthors {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl From<BookAuthors> for Vec<String> {
    fn from(value: BookAuthors) -> Self {
        value.0
    }
}
