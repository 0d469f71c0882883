#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}

impl AsRef<str> for BookTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BookTitle> for String {
    fn from(value: BookTitle) -> Self {
        value.0
    }
}
