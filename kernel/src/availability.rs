use time::{Duration, OffsetDateTime};

use crate::entity::{BookId, TransactionKind};
use crate::ledger::Ledger;

/// Free window of a book. Half-open for point queries: `start` is
/// available, `end` is not.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Period {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl Period {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn contains(&self, date: OffsetDateTime) -> bool {
        self.start <= date && date < self.end
    }

    pub fn overlaps(&self, other: &Period) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

/// A returned book is not handed over again on the hour; the next window
/// opens a full day after the previous one closes.
const HANDOFF_BUFFER: Duration = Duration::days(1);

const LONG_HORIZON: Duration = Duration::days(365 * 10);
const LONG_MINIMUM_GAP: Duration = Duration::days(1);

const SLOT_HORIZON: Duration = Duration::days(30);
const SLOT_MINIMUM_GAP: Duration = Duration::days(7);
/// Busy windows opening further out than this do not affect the short
/// slot listing.
const SLOT_LOOKAHEAD: Duration = Duration::days(60);

/// Windows during which the book cannot be handed out: open loans with a
/// future due date, and reservations that have not ended yet.
fn busy_windows(ledger: &Ledger, book_id: &BookId, now: OffsetDateTime) -> Vec<Period> {
    let mut windows: Vec<Period> = ledger
        .open_loans_of_book(book_id)
        .filter_map(|loan| {
            loan.due_date()
                .filter(|due| *due > now)
                .map(|due| Period::new(loan.recorded_at(), due))
        })
        .chain(ledger.reservations_of_book(book_id).filter_map(|t| {
            match t.kind() {
                TransactionKind::Reservation {
                    start_date,
                    end_date,
                } if *end_date > now => Some(Period::new(*start_date, *end_date)),
                _ => None,
            }
        }))
        .collect();
    windows.sort_by_key(Period::start);
    windows
}

/// Left-to-right sweep over the busy windows, emitting the gaps between
/// them. Gaps shorter than `minimum_gap` are discarded.
fn sweep(
    busy: &[Period],
    now: OffsetDateTime,
    horizon_end: OffsetDateTime,
    minimum_gap: Duration,
) -> Vec<Period> {
    let mut free = Vec::new();
    let mut cursor = now;
    for window in busy {
        if cursor < window.start() {
            free.push(Period::new(cursor, window.start()));
        }
        let released = window.end() + HANDOFF_BUFFER;
        if released > cursor {
            cursor = released;
        }
    }
    if cursor < horizon_end {
        free.push(Period::new(cursor, horizon_end));
    }
    free.retain(|gap| gap.length() >= minimum_gap);
    free
}

/// Every window within the next ten years in which the book could be
/// reserved, down to single free days.
pub fn availability_periods(
    ledger: &Ledger,
    book_id: &BookId,
    now: OffsetDateTime,
) -> Vec<Period> {
    let busy = busy_windows(ledger, book_id, now);
    sweep(&busy, now, now + LONG_HORIZON, LONG_MINIMUM_GAP)
}

/// Near-term slot picker: week-or-longer gaps within the next month.
pub fn reservation_slots(ledger: &Ledger, book_id: &BookId, now: OffsetDateTime) -> Vec<Period> {
    let busy: Vec<Period> = busy_windows(ledger, book_id, now)
        .into_iter()
        .filter(|window| window.start() < now + SLOT_LOOKAHEAD)
        .collect();
    sweep(&busy, now, now + SLOT_HORIZON, SLOT_MINIMUM_GAP)
}

pub fn is_date_available(date: OffsetDateTime, periods: &[Period]) -> bool {
    periods.iter().any(|period| period.contains(date))
}

/// True when `[start, end)` touches no loan-implied or reservation window.
pub fn is_slot_available(
    ledger: &Ledger,
    book_id: &BookId,
    start: OffsetDateTime,
    end: OffsetDateTime,
    now: OffsetDateTime,
) -> bool {
    let slot = Period::new(start, end);
    busy_windows(ledger, book_id, now)
        .iter()
        .all(|window| !window.overlaps(&slot))
}

/// The day after the last busy window ends, or now if nothing is pending.
pub fn next_available_date(
    ledger: &Ledger,
    book_id: &BookId,
    now: OffsetDateTime,
) -> OffsetDateTime {
    busy_windows(ledger, book_id, now)
        .iter()
        .map(Period::end)
        .max()
        .map(|end| end + HANDOFF_BUFFER)
        .unwrap_or(now)
}

/// End of the free period containing `start_date`. Falling through means
/// the caller passed a date outside every period; give them a single day.
pub fn max_reservation_end(start_date: OffsetDateTime, periods: &[Period]) -> OffsetDateTime {
    periods
        .iter()
        .find(|period| period.contains(start_date))
        .map(Period::end)
        .unwrap_or(start_date + Duration::days(1))
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;

    use crate::entity::{BookId, Transaction, UserId};
    use crate::ledger::Ledger;

    use super::*;

    fn book() -> BookId {
        BookId::new("b-001")
    }

    fn user() -> UserId {
        UserId::new(uuid::Uuid::from_u128(1))
    }

    #[test]
    fn empty_ledger_is_one_long_window() {
        let now = datetime!(2024-01-01 12:00 UTC);
        let periods = availability_periods(&Ledger::new(), &book(), now);
        assert_eq!(periods, vec![Period::new(now, now + Duration::days(3650))]);
    }

    #[test]
    fn open_loan_pushes_first_window_past_due_date() {
        let now = datetime!(2024-01-01 12:00 UTC);
        let due = now + Duration::days(10);
        let ledger =
            Ledger::new().record(Transaction::loan(book(), user(), now, Some(due)));

        let periods = availability_periods(&ledger, &book(), now);
        // due date + one day handoff buffer, out to the ten year horizon
        assert_eq!(
            periods,
            vec![Period::new(due + Duration::days(1), now + Duration::days(3650))]
        );
    }

    #[test]
    fn returned_loan_no_longer_blocks() {
        let now = datetime!(2024-01-01 12:00 UTC);
        let loaned = now - Duration::days(3);
        let ledger = Ledger::new()
            .record(Transaction::loan(
                book(),
                user(),
                loaned,
                Some(loaned + Duration::days(30)),
            ))
            .record(Transaction::returned(book(), user(), now - Duration::days(1)));

        let periods = availability_periods(&ledger, &book(), now);
        assert_eq!(periods.first().map(Period::start), Some(now));
    }

    #[test]
    fn free_windows_are_disjoint_and_sorted() {
        let now = datetime!(2024-01-01 00:00 UTC);
        let ledger = Ledger::new()
            .record(Transaction::reservation(
                book(),
                user(),
                now,
                now + Duration::days(5),
                now + Duration::days(8),
            ))
            .record(Transaction::reservation(
                book(),
                user(),
                now,
                now + Duration::days(20),
                now + Duration::days(25),
            ));

        let periods = availability_periods(&ledger, &book(), now);
        for pair in periods.windows(2) {
            assert!(pair[0].end() <= pair[1].start());
            assert!(!pair[0].overlaps(&pair[1]));
        }
        assert!(periods.iter().all(|p| p.length() >= Duration::days(1)));
    }

    #[test]
    fn slot_listing_drops_gaps_under_a_week() {
        let now = datetime!(2024-01-01 00:00 UTC);
        // busy from day 3 to day 27 leaves a 3 day head gap and a short tail
        let ledger = Ledger::new().record(Transaction::reservation(
            book(),
            user(),
            now,
            now + Duration::days(3),
            now + Duration::days(27),
        ));

        let slots = reservation_slots(&ledger, &book(), now);
        assert!(slots.iter().all(|p| p.length() >= Duration::days(7)));
        assert!(slots.is_empty());
    }

    #[test]
    fn slot_listing_ignores_far_future_windows() {
        let now = datetime!(2024-01-01 00:00 UTC);
        let ledger = Ledger::new().record(Transaction::reservation(
            book(),
            user(),
            now,
            now + Duration::days(90),
            now + Duration::days(120),
        ));

        let slots = reservation_slots(&ledger, &book(), now);
        assert_eq!(slots, vec![Period::new(now, now + Duration::days(30))]);
    }

    #[test]
    fn date_availability_is_half_open() {
        let now = datetime!(2024-01-01 00:00 UTC);
        let periods = vec![Period::new(now, now + Duration::days(5))];
        assert!(is_date_available(now, &periods));
        assert!(is_date_available(now + Duration::days(4), &periods));
        assert!(!is_date_available(now + Duration::days(5), &periods));
    }

    #[test]
    fn slot_overlap_test_matches_boundaries() {
        let now = datetime!(2024-01-01 00:00 UTC);
        let ledger = Ledger::new().record(Transaction::reservation(
            book(),
            user(),
            now,
            now + Duration::days(10),
            now + Duration::days(20),
        ));

        // ends exactly where the busy window starts: allowed
        assert!(is_slot_available(
            &ledger,
            &book(),
            now,
            now + Duration::days(10),
            now
        ));
        // one day into the window: rejected
        assert!(!is_slot_available(
            &ledger,
            &book(),
            now + Duration::days(5),
            now + Duration::days(11),
            now
        ));
    }

    #[test]
    fn next_available_date_clears_every_window() {
        let now = datetime!(2024-01-01 00:00 UTC);
        assert_eq!(next_available_date(&Ledger::new(), &book(), now), now);

        let ledger = Ledger::new()
            .record(Transaction::loan(
                book(),
                user(),
                now,
                Some(now + Duration::days(10)),
            ))
            .record(Transaction::reservation(
                book(),
                UserId::new(uuid::Uuid::from_u128(2)),
                now,
                now + Duration::days(12),
                now + Duration::days(18),
            ));
        assert_eq!(
            next_available_date(&ledger, &book(), now),
            now + Duration::days(19)
        );
    }

    #[test]
    fn max_end_falls_back_to_one_day() {
        let now = datetime!(2024-01-01 00:00 UTC);
        let periods = vec![Period::new(now, now + Duration::days(5))];
        assert_eq!(
            max_reservation_end(now + Duration::days(2), &periods),
            now + Duration::days(5)
        );
        // outside every period: caller error, give a single day
        assert_eq!(
            max_reservation_end(now + Duration::days(30), &periods),
            now + Duration::days(31)
        );
    }
}
