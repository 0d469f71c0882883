use std::collections::HashMap;

use destructure::Destructure;
use error_stack::Report;
use time::{Duration, OffsetDateTime};

use crate::availability;
use crate::entity::{Book, BookId, Transaction, User, UserId};
use crate::ledger::Ledger;
use crate::CatalogError;

/// A reservation never spans more than this, however long the free period
/// containing its start date runs.
const MAX_RESERVATION_SPAN: Duration = Duration::days(30);

/// The whole catalog as one immutable value. Mutating operations clone,
/// apply, and hand back a fresh catalog; on failure the caller keeps their
/// value untouched together with the reason nothing happened.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Catalog {
    books: HashMap<BookId, Book>,
    users: HashMap<UserId, User>,
    ledger: Ledger,
}

/// Result of a successful loan: the new catalog plus the advisory facts the
/// interactive layer may want to show.
#[derive(Debug, Destructure)]
pub struct Loaned {
    catalog: Catalog,
    due_date: Option<OffsetDateTime>,
    previous_borrower: Option<UserId>,
}

impl Loaned {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn due_date(&self) -> Option<OffsetDateTime> {
        self.due_date
    }

    pub fn previous_borrower(&self) -> Option<&UserId> {
        self.previous_borrower.as_ref()
    }
}

#[derive(Debug, Destructure)]
pub struct Reserved {
    catalog: Catalog,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
}

impl Reserved {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn start_date(&self) -> OffsetDateTime {
        self.start_date
    }

    pub fn end_date(&self) -> OffsetDateTime {
        self.end_date
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot. Transactions are expected newest first.
    pub fn from_parts(books: Vec<Book>, users: Vec<User>, transactions: Vec<Transaction>) -> Self {
        Self {
            books: books.into_iter().map(|b| (b.id().clone(), b)).collect(),
            users: users.into_iter().map(|u| (u.id().clone(), u)).collect(),
            ledger: Ledger::from_entries(transactions),
        }
    }

    pub fn books(&self) -> &HashMap<BookId, Book> {
        &self.books
    }

    pub fn users(&self) -> &HashMap<UserId, User> {
        &self.users
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn book(&self, book_id: &BookId) -> Option<&Book> {
        self.books.get(book_id)
    }

    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Upsert by id; a colliding id fully replaces the prior book.
    pub fn add_book(&self, book: Book) -> Catalog {
        let mut next = self.clone();
        next.books.insert(book.id().clone(), book);
        next
    }

    /// Upsert by id, same replacement semantics as [`Catalog::add_book`].
    pub fn add_user(&self, user: User) -> Catalog {
        let mut next = self.clone();
        next.users.insert(user.id().clone(), user);
        next
    }

    pub fn loan_book(
        &self,
        book_id: &BookId,
        user_id: &UserId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Loaned, CatalogError> {
        let book = self.lookup_book(book_id)?;
        let user = self.lookup_user(user_id)?;
        if !book.is_available() {
            return Err(Report::new(CatalogError::BookUnavailable)
                .attach_printable(format!("book {}", book_id.as_ref())));
        }
        if let Some(max) = user.role().max_loans() {
            if self.ledger.active_loans_for(user_id) >= max {
                return Err(Report::new(CatalogError::LoanLimitExceeded)
                    .attach_printable(format!("limit {max}")));
            }
        }

        let previous_borrower = self.ledger.last_loaned_by(book_id).cloned();
        let due_date = user.role().loan_period().map(|period| now + period);

        let mut book = book.clone();
        book.substitute(|b| *b.available = false);

        let mut next = self.clone();
        next.books.insert(book_id.clone(), book);
        next.ledger = next.ledger.record(Transaction::loan(
            book_id.clone(),
            user_id.clone(),
            now,
            due_date,
        ));

        Ok(Loaned {
            catalog: next,
            due_date,
            previous_borrower,
        })
    }

    pub fn return_book(
        &self,
        book_id: &BookId,
        user_id: &UserId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Catalog, CatalogError> {
        let book = self.lookup_book(book_id)?;
        self.lookup_user(user_id)?;
        if !self.ledger.has_open_loan(book_id, user_id) {
            return Err(Report::new(CatalogError::NoActiveLoan)
                .attach_printable(format!("book {}", book_id.as_ref())));
        }

        let mut book = book.clone();
        book.substitute(|b| *b.available = true);

        let mut next = self.clone();
        next.books.insert(book_id.clone(), book);
        next.ledger =
            next.ledger
                .record(Transaction::returned(book_id.clone(), user_id.clone(), now));
        Ok(next)
    }

    /// Validates and commits a reservation starting on `start_date`. The
    /// window is advisory: it never blocks an explicit later loan, it only
    /// makes future availability computations treat it as busy.
    pub fn reserve_book(
        &self,
        book_id: &BookId,
        user_id: &UserId,
        start_date: OffsetDateTime,
        now: OffsetDateTime,
    ) -> error_stack::Result<Reserved, CatalogError> {
        self.lookup_book(book_id)?;
        let user = self.lookup_user(user_id)?;
        if !user.role().can_reserve() {
            return Err(Report::new(CatalogError::ReservationNotAllowed)
                .attach_printable(format!("role {}", user.role().label())));
        }

        let periods = availability::availability_periods(&self.ledger, book_id, now);
        if periods.is_empty() {
            return Err(Report::new(CatalogError::NoAvailability));
        }
        if !availability::is_date_available(start_date, &periods) {
            return Err(Report::new(CatalogError::DateNotAvailable));
        }

        let max_end = availability::max_reservation_end(start_date, &periods);
        let end_date = max_end.min(start_date + MAX_RESERVATION_SPAN);
        if (end_date - start_date).whole_days() < 1 {
            return Err(Report::new(CatalogError::PeriodTooShort));
        }

        let mut next = self.clone();
        next.ledger = next.ledger.record(Transaction::reservation(
            book_id.clone(),
            user_id.clone(),
            now,
            start_date,
            end_date,
        ));
        Ok(Reserved {
            catalog: next,
            start_date,
            end_date,
        })
    }

    /// Librarian-only. The book must be on the shelf; its transactions are
    /// retained for history.
    pub fn remove_book(
        &self,
        book_id: &BookId,
        acting_user: &UserId,
    ) -> error_stack::Result<Catalog, CatalogError> {
        self.require_librarian(acting_user)?;
        let book = self.lookup_book(book_id)?;
        if !book.is_available() {
            return Err(Report::new(CatalogError::BookOnLoan)
                .attach_printable(format!("book {}", book_id.as_ref())));
        }
        let mut next = self.clone();
        next.books.remove(book_id);
        Ok(next)
    }

    /// Librarian-only. Blocked while the user still holds a loan; their
    /// transactions are retained for history.
    pub fn remove_user(
        &self,
        user_id: &UserId,
        acting_user: &UserId,
    ) -> error_stack::Result<Catalog, CatalogError> {
        self.require_librarian(acting_user)?;
        self.lookup_user(user_id)?;
        if self.ledger.active_loans_for(user_id) > 0 {
            return Err(Report::new(CatalogError::UserHasActiveLoans));
        }
        let mut next = self.clone();
        next.users.remove(user_id);
        Ok(next)
    }

    pub fn active_loans_for(&self, user_id: &UserId) -> usize {
        self.ledger.active_loans_for(user_id)
    }

    pub fn overdue_loans_for(&self, user_id: &UserId, now: OffsetDateTime) -> usize {
        self.ledger.overdue_loans_for(user_id, now)
    }

    /// Whole-day truncation between due date and now, at the role's daily
    /// rate, summed over every overdue open loan.
    pub fn overdue_fees(&self, user_id: &UserId, now: OffsetDateTime) -> f64 {
        let Some(user) = self.users.get(user_id) else {
            return 0.0;
        };
        let rate = user.role().overdue_fee_per_day();
        self.ledger
            .open_loans_for(user_id)
            .filter_map(Transaction::due_date)
            .filter(|due| *due < now)
            .map(|due| (now - due).whole_days() as f64 * rate)
            .sum()
    }

    pub fn last_loaned_by(&self, book_id: &BookId) -> Option<&UserId> {
        self.ledger.last_loaned_by(book_id)
    }

    fn lookup_book(&self, book_id: &BookId) -> error_stack::Result<&Book, CatalogError> {
        self.books.get(book_id).ok_or_else(|| {
            Report::new(CatalogError::BookNotFound)
                .attach_printable(format!("book {}", book_id.as_ref()))
        })
    }

    fn lookup_user(&self, user_id: &UserId) -> error_stack::Result<&User, CatalogError> {
        self.users.get(user_id).ok_or_else(|| {
            Report::new(CatalogError::UserNotFound)
                .attach_printable(format!("user {}", user_id.as_ref()))
        })
    }

    fn require_librarian(&self, acting_user: &UserId) -> error_stack::Result<(), CatalogError> {
        let acting = self.lookup_user(acting_user)?;
        if !acting.role().is_librarian() {
            return Err(Report::new(CatalogError::PermissionDenied)
                .attach_printable(format!("user {}", acting_user.as_ref())));
        }
        Ok(())
    }
}
