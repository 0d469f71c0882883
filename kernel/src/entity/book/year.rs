use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublishedYear(i32);

impl PublishedYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}

impl AsRef<i32> for PublishedYear {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl From<PublishedYear> for i32 {
    fn from(value: PublishedYear) -> Self {
        value.0
    }
}
