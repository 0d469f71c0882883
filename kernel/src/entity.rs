mod book;
mod transaction;
mod user;

pub use self::{book::*, transaction::*, user::*};
