use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entity::{BookId, UserId};

/// One immutable ledger entry. Every entry names the book and user involved
/// and the instant it was recorded; the kind carries the variant payload.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    book_id: BookId,
    user_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    recorded_at: OffsetDateTime,
    #[serde(flatten)]
    kind: TransactionKind,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Loan {
        /// None for roles whose loans never fall due.
        #[serde(default, with = "time::serde::rfc3339::option")]
        due_date: Option<OffsetDateTime>,
    },
    Return,
    Reservation {
        #[serde(with = "time::serde::rfc3339")]
        start_date: OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        end_date: OffsetDateTime,
    },
}

impl Transaction {
    pub fn loan(
        book_id: BookId,
        user_id: UserId,
        recorded_at: OffsetDateTime,
        due_date: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            book_id,
            user_id,
            recorded_at,
            kind: TransactionKind::Loan { due_date },
        }
    }

    pub fn returned(book_id: BookId, user_id: UserId, recorded_at: OffsetDateTime) -> Self {
        Self {
            book_id,
            user_id,
            recorded_at,
            kind: TransactionKind::Return,
        }
    }

    pub fn reservation(
        book_id: BookId,
        user_id: UserId,
        recorded_at: OffsetDateTime,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
    ) -> Self {
        Self {
            book_id,
            user_id,
            recorded_at,
            kind: TransactionKind::Reservation {
                start_date,
                end_date,
            },
        }
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn recorded_at(&self) -> OffsetDateTime {
        self.recorded_at
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn is_loan(&self) -> bool {
        matches!(self.kind, TransactionKind::Loan { .. })
    }

    /// Due date of a loan entry; None for non-loans and undated loans.
    pub fn due_date(&self) -> Option<OffsetDateTime> {
        match self.kind {
            TransactionKind::Loan { due_date } => due_date,
            _ => None,
        }
    }
}
