use serde::{Deserialize, Serialize};
use time::Duration;

/// Closed set of roles. Loan rules dispatch exhaustively on this, so a new
/// role is a compile-visible change everywhere a rule is derived.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Student { grade: String },
    Faculty { department: String },
    Librarian { staff_code: String },
}

impl Role {
    /// Concurrent loan cap. None means no cap.
    pub fn max_loans(&self) -> Option<usize> {
        match self {
            Role::Student { .. } => Some(5),
            Role::Faculty { .. } => Some(10),
            Role::Librarian { .. } => None,
        }
    }

    /// None means loans never fall due.
    pub fn loan_period(&self) -> Option<Duration> {
        match self {
            Role::Student { .. } => Some(Duration::days(30)),
            Role::Faculty { .. } => Some(Duration::days(90)),
            Role::Librarian { .. } => None,
        }
    }

    pub fn can_reserve(&self) -> bool {
        match self {
            Role::Student { .. } | Role::Faculty { .. } => true,
            Role::Librarian { .. } => false,
        }
    }

    pub fn overdue_fee_per_day(&self) -> f64 {
        match self {
            Role::Student { .. } => 0.50,
            Role::Faculty { .. } => 0.25,
            Role::Librarian { .. } => 0.0,
        }
    }

    pub fn is_librarian(&self) -> bool {
        matches!(self, Role::Librarian { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student { .. } => "student",
            Role::Faculty { .. } => "faculty",
            Role::Librarian { .. } => "librarian",
        }
    }
}
