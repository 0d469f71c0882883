pub use crate::error::*;

mod availability;
mod catalog;
mod clock;
mod entity;
mod error;
mod ledger;
mod store;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod catalog {
        pub use crate::catalog::*;
        pub use crate::ledger::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod availability {
        pub use crate::availability::*;
    }
    pub mod clock {
        pub use crate::clock::*;
    }
    pub mod store {
        pub use crate::store::*;
    }
}
