use time::OffsetDateTime;

use crate::entity::{BookId, Transaction, TransactionKind, UserId};

/// Append-only transaction log, newest first. The log is the system of
/// record: every derived fact below is a pure fold over it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Ledger(Vec<Transaction>);

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are expected newest first, matching the on-disk snapshot.
    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.0
    }

    /// Returns a new ledger with the transaction prepended.
    pub fn record(&self, transaction: Transaction) -> Self {
        let mut entries = Vec::with_capacity(self.0.len() + 1);
        entries.push(transaction);
        entries.extend(self.0.iter().cloned());
        Self(entries)
    }

    /// Most recent borrower of the book. The log is newest first, so the
    /// first loan entry is the latest one.
    pub fn last_loaned_by(&self, book_id: &BookId) -> Option<&UserId> {
        self.0
            .iter()
            .find(|t| t.is_loan() && t.book_id() == book_id)
            .map(Transaction::user_id)
    }

    /// A loan stays open until a later-recorded return for the same
    /// book/user pair. Borrow, return, re-borrow cycles only count the
    /// latest cycle.
    pub(crate) fn is_loan_open(&self, loan: &Transaction) -> bool {
        !self.0.iter().any(|t| {
            matches!(t.kind(), TransactionKind::Return)
                && t.book_id() == loan.book_id()
                && t.user_id() == loan.user_id()
                && t.recorded_at() > loan.recorded_at()
        })
    }

    pub fn open_loans_for<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.0
            .iter()
            .filter(move |t| t.is_loan() && t.user_id() == user_id && self.is_loan_open(t))
    }

    pub fn active_loans_for(&self, user_id: &UserId) -> usize {
        self.open_loans_for(user_id).count()
    }

    pub fn has_open_loan(&self, book_id: &BookId, user_id: &UserId) -> bool {
        self.0
            .iter()
            .any(|t| t.is_loan() && t.book_id() == book_id && t.user_id() == user_id && self.is_loan_open(t))
    }

    pub fn open_loans_of_book<'a>(
        &'a self,
        book_id: &'a BookId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.0
            .iter()
            .filter(move |t| t.is_loan() && t.book_id() == book_id && self.is_loan_open(t))
    }

    pub fn reservations_of_book<'a>(
        &'a self,
        book_id: &'a BookId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.0.iter().filter(move |t| {
            matches!(t.kind(), TransactionKind::Reservation { .. }) && t.book_id() == book_id
        })
    }

    /// Open loans of the user whose due date has passed.
    pub fn overdue_loans_for(&self, user_id: &UserId, now: OffsetDateTime) -> usize {
        self.open_loans_for(user_id)
            .filter_map(Transaction::due_date)
            .filter(|due| *due < now)
            .count()
    }
}
