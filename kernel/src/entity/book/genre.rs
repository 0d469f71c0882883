#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookGenre(String);

impl BookGenre {
    pub fn new(genre: impl Into<String>) -> Self {
        Self(genre.into())
    }
}

impl AsRef<str> for BookGenre {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BookGenre> for String {
    fn from(value: BookGenre) -> Self {
        value.0
    }
}
