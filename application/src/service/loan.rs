use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::prelude::catalog::{Catalog, DestructLoaned};
use kernel::prelude::entity::{BookId, UserId};
use kernel::CatalogError;

use crate::transfer::{LoanBookDto, LoanReceiptDto, LoanStatusDto, ReturnBookDto};

pub trait LoanService: DependOnClock {
    fn loan_book(
        &self,
        catalog: &Catalog,
        dto: LoanBookDto,
    ) -> error_stack::Result<(Catalog, LoanReceiptDto), CatalogError> {
        let now = self.clock().now();
        let book_id = BookId::new(dto.book_id);
        let user_id = UserId::new(dto.user_id);

        let loaned = catalog.loan_book(&book_id, &user_id, now)?;
        let previous_borrower = loaned
            .previous_borrower()
            .and_then(|id| catalog.user(id))
            .map(|user| user.name().as_ref().to_string());
        let DestructLoaned {
            catalog, due_date, ..
        } = loaned.into_destruct();
        Ok((
            catalog,
            LoanReceiptDto {
                due_date,
                previous_borrower,
            },
        ))
    }

    fn return_book(
        &self,
        catalog: &Catalog,
        dto: ReturnBookDto,
    ) -> error_stack::Result<Catalog, CatalogError> {
        let now = self.clock().now();
        catalog.return_book(&BookId::new(dto.book_id), &UserId::new(dto.user_id), now)
    }

    fn loan_status(&self, catalog: &Catalog, user_id: Uuid) -> LoanStatusDto {
        let now = self.clock().now();
        let user_id = UserId::new(user_id);
        LoanStatusDto {
            active: catalog.active_loans_for(&user_id),
            overdue: catalog.overdue_loans_for(&user_id, now),
            fees: catalog.overdue_fees(&user_id, now),
        }
    }
}

impl<T> LoanService for T where T: DependOnClock {}
