use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::availability::Period;

#[derive(Debug)]
pub struct ReserveBookDto {
    pub book_id: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Copy)]
pub struct PeriodDto {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl From<Period> for PeriodDto {
    fn from(value: Period) -> Self {
        Self {
            start: value.start(),
            end: value.end(),
        }
    }
}

#[derive(Debug)]
pub struct CommitReservationDto {
    pub book_id: String,
    pub user_id: Uuid,
    pub start_date: OffsetDateTime,
}

#[derive(Debug)]
pub struct ReservationReceiptDto {
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
}

#[derive(Debug)]
pub struct SlotQueryDto {
    pub book_id: String,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}
