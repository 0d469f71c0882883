use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug)]
pub struct LoanBookDto {
    pub book_id: String,
    pub user_id: Uuid,
}

#[derive(Debug)]
pub struct ReturnBookDto {
    pub book_id: String,
    pub user_id: Uuid,
}

/// Advisory facts surfaced by a successful loan; the interactive layer
/// decides what to show.
#[derive(Debug)]
pub struct LoanReceiptDto {
    pub due_date: Option<OffsetDateTime>,
    pub previous_borrower: Option<String>,
}

#[derive(Debug)]
pub struct LoanStatusDto {
    pub active: usize,
    pub overdue: usize,
    pub fees: f64,
}
