use std::fmt::Display;

use error_stack::Context;

/// Broad failure families. The interactive layer dispatches on this when it
/// only needs to decide between re-prompting, refusing, or giving up.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    StateConflict,
    InputInvalid,
    PermissionDenied,
    Internal,
}

#[derive(Debug)]
pub enum CatalogError {
    BookNotFound,
    UserNotFound,
    BookUnavailable,
    LoanLimitExceeded,
    NoActiveLoan,
    ReservationNotAllowed,
    NoAvailability,
    DateNotAvailable,
    PeriodTooShort,
    BookOnLoan,
    UserHasActiveLoans,
    PermissionDenied,
    InvalidInput,
    Internal,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::BookNotFound | CatalogError::UserNotFound => ErrorKind::NotFound,
            CatalogError::BookUnavailable
            | CatalogError::LoanLimitExceeded
            | CatalogError::NoActiveLoan
            | CatalogError::ReservationNotAllowed
            | CatalogError::NoAvailability
            | CatalogError::DateNotAvailable
            | CatalogError::BookOnLoan
            | CatalogError::UserHasActiveLoans => ErrorKind::StateConflict,
            CatalogError::PeriodTooShort | CatalogError::InvalidInput => ErrorKind::InputInvalid,
            CatalogError::PermissionDenied => ErrorKind::PermissionDenied,
            CatalogError::Internal => ErrorKind::Internal,
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::BookNotFound => write!(f, "Book not found"),
            CatalogError::UserNotFound => write!(f, "User not found"),
            CatalogError::BookUnavailable => write!(f, "Book is not available for loan"),
            CatalogError::LoanLimitExceeded => write!(f, "Loan limit reached"),
            CatalogError::NoActiveLoan => write!(f, "No active loan for this book and user"),
            CatalogError::ReservationNotAllowed => write!(f, "This role cannot reserve books"),
            CatalogError::NoAvailability => write!(f, "No availability within the horizon"),
            CatalogError::DateNotAvailable => write!(f, "Requested date is not available"),
            CatalogError::PeriodTooShort => write!(f, "Reservation period is shorter than a day"),
            CatalogError::BookOnLoan => write!(f, "Book is currently on loan"),
            CatalogError::UserHasActiveLoans => write!(f, "User still has active loans"),
            CatalogError::PermissionDenied => write!(f, "Operation requires a librarian"),
            CatalogError::InvalidInput => write!(f, "Invalid input"),
            CatalogError::Internal => write!(f, "Internal catalog error"),
        }
    }
}

impl Context for CatalogError {}
