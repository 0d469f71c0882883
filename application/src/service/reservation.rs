use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::availability;
use kernel::interface::clock::{Clock, DependOnClock};
use kernel::prelude::catalog::{Catalog, DestructReserved};
use kernel::prelude::entity::{BookId, UserId};
use kernel::CatalogError;

use crate::transfer::{
    CommitReservationDto, PeriodDto, ReservationReceiptDto, ReserveBookDto, SlotQueryDto,
};

/// Reservation runs in two phases around the user-supplied start date:
/// `begin_reservation` checks eligibility and computes the free periods the
/// interactive layer shows; `commit_reservation` revalidates the chosen
/// date against the ledger and records the transaction. Cancelling between
/// the phases simply means never calling commit.
pub trait ReservationService: DependOnClock {
    fn begin_reservation(
        &self,
        catalog: &Catalog,
        dto: ReserveBookDto,
    ) -> error_stack::Result<Vec<PeriodDto>, CatalogError> {
        let now = self.clock().now();
        let book_id = BookId::new(dto.book_id);
        let user_id = UserId::new(dto.user_id);

        catalog.book(&book_id).ok_or_else(|| {
            Report::new(CatalogError::BookNotFound)
                .attach_printable(format!("book {}", book_id.as_ref()))
        })?;
        let user = catalog.user(&user_id).ok_or_else(|| {
            Report::new(CatalogError::UserNotFound)
                .attach_printable(format!("user {}", user_id.as_ref()))
        })?;
        if !user.role().can_reserve() {
            return Err(Report::new(CatalogError::ReservationNotAllowed)
                .attach_printable(format!("role {}", user.role().label())));
        }

        let periods = availability::availability_periods(catalog.ledger(), &book_id, now);
        if periods.is_empty() {
            return Err(Report::new(CatalogError::NoAvailability));
        }
        Ok(periods.into_iter().map(PeriodDto::from).collect())
    }

    fn commit_reservation(
        &self,
        catalog: &Catalog,
        dto: CommitReservationDto,
    ) -> error_stack::Result<(Catalog, ReservationReceiptDto), CatalogError> {
        let now = self.clock().now();
        let reserved = catalog.reserve_book(
            &BookId::new(dto.book_id),
            &UserId::new(dto.user_id),
            dto.start_date,
            now,
        )?;
        let DestructReserved {
            catalog,
            start_date,
            end_date,
        } = reserved.into_destruct();
        Ok((
            catalog,
            ReservationReceiptDto {
                start_date,
                end_date,
            },
        ))
    }

    /// Week-or-longer openings within the next month.
    fn reservation_slots(
        &self,
        catalog: &Catalog,
        book_id: String,
    ) -> error_stack::Result<Vec<PeriodDto>, CatalogError> {
        let now = self.clock().now();
        let book_id = self.known_book(catalog, book_id)?;
        Ok(
            availability::reservation_slots(catalog.ledger(), &book_id, now)
                .into_iter()
                .map(PeriodDto::from)
                .collect(),
        )
    }

    /// Full free-window calendar out to the long horizon.
    fn availability_calendar(
        &self,
        catalog: &Catalog,
        book_id: String,
    ) -> error_stack::Result<Vec<PeriodDto>, CatalogError> {
        let now = self.clock().now();
        let book_id = self.known_book(catalog, book_id)?;
        Ok(
            availability::availability_periods(catalog.ledger(), &book_id, now)
                .into_iter()
                .map(PeriodDto::from)
                .collect(),
        )
    }

    fn next_available_date(
        &self,
        catalog: &Catalog,
        book_id: String,
    ) -> error_stack::Result<OffsetDateTime, CatalogError> {
        let now = self.clock().now();
        let book_id = self.known_book(catalog, book_id)?;
        Ok(availability::next_available_date(
            catalog.ledger(),
            &book_id,
            now,
        ))
    }

    fn is_slot_available(
        &self,
        catalog: &Catalog,
        dto: SlotQueryDto,
    ) -> error_stack::Result<bool, CatalogError> {
        let now = self.clock().now();
        let book_id = self.known_book(catalog, dto.book_id)?;
        Ok(availability::is_slot_available(
            catalog.ledger(),
            &book_id,
            dto.start,
            dto.end,
            now,
        ))
    }

    fn known_book(
        &self,
        catalog: &Catalog,
        book_id: String,
    ) -> error_stack::Result<BookId, CatalogError> {
        let book_id = BookId::new(book_id);
        catalog.book(&book_id).ok_or_else(|| {
            Report::new(CatalogError::BookNotFound)
                .attach_printable(format!("book {}", book_id.as_ref()))
        })?;
        Ok(book_id)
    }
}

impl<T> ReservationService for T where T: DependOnClock {}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use kernel::interface::clock::FixedClock;
    use kernel::prelude::catalog::Catalog;
    use kernel::prelude::entity::{
        Book, BookAuthors, BookGenre, BookId, BookTitle, Password, PublishedYear, Role, User,
        UserId, UserName,
    };
    use kernel::CatalogError;

    use crate::service::{LoanService, ReservationService};
    use crate::transfer::{CommitReservationDto, LoanBookDto, ReserveBookDto};

    fn seeded_catalog() -> (Catalog, Uuid, Uuid) {
        let borrower = Uuid::from_u128(1);
        let reserver = Uuid::from_u128(2);
        let catalog = Catalog::new()
            .add_book(Book::new(
                BookId::new("b-1"),
                BookTitle::new("Piranesi"),
                BookAuthors::new(vec!["Susanna Clarke".to_string()]).unwrap(),
                PublishedYear::new(2020),
                BookGenre::new("fantasy"),
                true,
            ))
            .add_user(User::new(
                UserId::new(borrower),
                UserName::new("Noor"),
                Password::new("pw"),
                Role::Student {
                    grade: "2".to_string(),
                },
            ))
            .add_user(User::new(
                UserId::new(reserver),
                UserName::new("Sam"),
                Password::new("pw"),
                Role::Faculty {
                    department: "History".to_string(),
                },
            ));
        (catalog, borrower, reserver)
    }

    #[test]
    fn begin_then_commit_stays_inside_an_offered_period() {
        let now = datetime!(2024-05-01 09:00 UTC);
        let clock = FixedClock::new(now);
        let (catalog, borrower, reserver) = seeded_catalog();

        let (catalog, _receipt) = clock
            .loan_book(
                &catalog,
                LoanBookDto {
                    book_id: "b-1".to_string(),
                    user_id: borrower,
                },
            )
            .unwrap();

        let periods = clock
            .begin_reservation(
                &catalog,
                ReserveBookDto {
                    book_id: "b-1".to_string(),
                    user_id: reserver,
                },
            )
            .unwrap();
        // the loan due date pushes the first offer out past the buffer
        assert_eq!(periods[0].start, now + Duration::days(31));

        let start = periods[0].start;
        let (_catalog, receipt) = clock
            .commit_reservation(
                &catalog,
                CommitReservationDto {
                    book_id: "b-1".to_string(),
                    user_id: reserver,
                    start_date: start,
                },
            )
            .unwrap();
        assert!(periods
            .iter()
            .any(|p| p.start <= receipt.start_date && receipt.end_date <= p.end));
    }

    #[test]
    fn committing_an_unavailable_date_is_rejected() {
        let now = datetime!(2024-05-01 09:00 UTC);
        let clock = FixedClock::new(now);
        let (catalog, borrower, reserver) = seeded_catalog();

        let (catalog, _) = clock
            .loan_book(
                &catalog,
                LoanBookDto {
                    book_id: "b-1".to_string(),
                    user_id: borrower,
                },
            )
            .unwrap();

        let err = clock
            .commit_reservation(
                &catalog,
                CommitReservationDto {
                    book_id: "b-1".to_string(),
                    user_id: reserver,
                    start_date: now + Duration::days(3),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            CatalogError::DateNotAvailable
        ));
    }

    #[test]
    fn unknown_book_aborts_before_any_period_math() {
        let now = datetime!(2024-05-01 09:00 UTC);
        let clock = FixedClock::new(now);
        let (catalog, _, reserver) = seeded_catalog();

        let err = clock
            .begin_reservation(
                &catalog,
                ReserveBookDto {
                    book_id: "missing".to_string(),
                    user_id: reserver,
                },
            )
            .unwrap_err();
        assert!(matches!(err.current_context(), CatalogError::BookNotFound));
    }
}
