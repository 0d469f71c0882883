mod json;
mod row;

pub use self::json::*;
