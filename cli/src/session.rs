use std::io::{self, Write};

use error_stack::{Report, ResultExt};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::service::{BookService, LoanService, ReservationService, UserService};
use application::transfer::{
    CommitReservationDto, CreateBookDto, CreateUserDto, LoanBookDto, PeriodDto, RemoveBookDto,
    RemoveUserDto, ReserveBookDto, ReturnBookDto, SlotQueryDto,
};
use kernel::interface::store::{CatalogStore, DependOnCatalogStore};
use kernel::prelude::catalog::Catalog;
use kernel::{CatalogError, ErrorKind};

use crate::command::{Command, USAGE};
use crate::handler::AppModule;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const CANCEL: &str = "q";

/// One interactive run over one catalog value. Every accepted mutation
/// swaps the held catalog for the new one; rejections leave it alone.
pub struct Session {
    module: AppModule,
    catalog: Catalog,
}

impl Session {
    pub fn new(module: AppModule, catalog: Catalog) -> Self {
        Self { module, catalog }
    }

    pub fn run(&mut self) -> error_stack::Result<(), CatalogError> {
        println!("shelfmark catalog ledger. `help` lists commands.");
        loop {
            let Some(line) = read_input("> ")? else {
                break;
            };
            if line.is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Err(message) => println!("{message}"),
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command)?,
            }
        }
        self.module.catalog_store().save(&self.catalog)?;
        println!("catalog saved");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> error_stack::Result<(), CatalogError> {
        match command {
            Command::Help => println!("{USAGE}"),
            Command::ListBooks => Session::list_books(self),
            Command::ListUsers => Session::list_users(self),
            Command::AddBook => self.add_book()?,
            Command::AddUser => self.add_user()?,
            Command::Loan { book_id, user_id } => self.loan(book_id, user_id),
            Command::Return { book_id, user_id } => self.take_back(book_id, user_id),
            Command::Reserve { book_id, user_id } => self.reserve(book_id, user_id)?,
            Command::Slots { book_id } => self.slots(book_id),
            Command::Calendar { book_id } => self.calendar(book_id),
            Command::Next { book_id } => self.next_available(book_id),
            Command::Check {
                book_id,
                start,
                end,
            } => self.check(book_id, start, end),
            Command::Fees { user_id } => self.fees(user_id),
            Command::RemoveBook {
                book_id,
                acting_user,
            } => self.remove_book(book_id, acting_user),
            Command::RemoveUser {
                user_id,
                acting_user,
            } => self.remove_user(user_id, acting_user),
            Command::Quit => {}
        }
        Ok(())
    }

    fn list_books(&self) {
        let books = self.module.list_books(&self.catalog);
        if books.is_empty() {
            println!("no books");
            return;
        }
        for book in books {
            println!(
                "{} | {} | {} | {} | {} | {}",
                book.id,
                book.title,
                book.authors.join(", "),
                book.year,
                book.genre,
                if book.available { "available" } else { "out" }
            );
        }
    }

    fn list_users(&self) {
        let users = self.module.list_users(&self.catalog);
        if users.is_empty() {
            println!("no users");
            return;
        }
        for user in users {
            println!(
                "{} | {} | {} ({})",
                user.id, user.name, user.role, user.role_detail
            );
        }
    }

    fn add_book(&mut self) -> error_stack::Result<(), CatalogError> {
        let Some(id) = read_input("book id: ")? else {
            return Ok(());
        };
        let Some(title) = read_input("title: ")? else {
            return Ok(());
        };
        let Some(authors) = read_input("authors (comma separated): ")? else {
            return Ok(());
        };
        let Some(year) = read_input("year: ")? else {
            return Ok(());
        };
        let Ok(year) = year.parse::<i32>() else {
            println!("`{year}` is not a year");
            return Ok(());
        };
        let Some(genre) = read_input("genre: ")? else {
            return Ok(());
        };

        let dto = CreateBookDto {
            id,
            title,
            authors: authors.split(',').map(|a| a.trim().to_string()).collect(),
            year,
            genre,
        };
        match self.module.add_book(&self.catalog, dto) {
            Ok(catalog) => {
                self.catalog = catalog;
                println!("book added");
            }
            Err(report) => render_failure(&report),
        }
        Ok(())
    }

    fn add_user(&mut self) -> error_stack::Result<(), CatalogError> {
        let Some(name) = read_input("name: ")? else {
            return Ok(());
        };
        let Some(role) = read_input("role (student/faculty/librarian): ")? else {
            return Ok(());
        };
        let detail_prompt = match role.as_str() {
            "student" => "grade: ",
            "faculty" => "department: ",
            "librarian" => "staff code: ",
            other => {
                println!("unknown role `{other}`");
                return Ok(());
            }
        };
        let Some(role_detail) = read_input(detail_prompt)? else {
            return Ok(());
        };
        let Some(password) = read_input("password: ")? else {
            return Ok(());
        };

        let dto = CreateUserDto {
            id: None,
            name,
            password,
            role,
            role_detail,
        };
        match self.module.add_user(&self.catalog, dto) {
            Ok((catalog, receipt)) => {
                self.catalog = catalog;
                println!("user added with id {}", receipt.id);
            }
            Err(report) => render_failure(&report),
        }
        Ok(())
    }

    fn loan(&mut self, book_id: String, user_id: Uuid) {
        match self.module.loan_book(&self.catalog, LoanBookDto { book_id, user_id }) {
            Ok((catalog, receipt)) => {
                self.catalog = catalog;
                match receipt.due_date {
                    Some(due) => println!("loaned, due back {}", fmt_date(due)),
                    None => println!("loaned, no due date"),
                }
                if let Some(previous) = receipt.previous_borrower {
                    println!("previously borrowed by {previous}");
                }
            }
            Err(report) => render_failure(&report),
        }
    }

    fn take_back(&mut self, book_id: String, user_id: Uuid) {
        match self
            .module
            .return_book(&self.catalog, ReturnBookDto { book_id, user_id })
        {
            Ok(catalog) => {
                self.catalog = catalog;
                println!("returned");
            }
            Err(report) => render_failure(&report),
        }
    }

    fn reserve(&mut self, book_id: String, user_id: Uuid) -> error_stack::Result<(), CatalogError> {
        let periods = match self.module.begin_reservation(
            &self.catalog,
            ReserveBookDto {
                book_id: book_id.clone(),
                user_id,
            },
        ) {
            Ok(periods) => periods,
            Err(report) => {
                render_failure(&report);
                return Ok(());
            }
        };

        println!("free windows:");
        print_periods(&periods);
        let Some(raw) = read_input("start date YYYY-MM-DD (q to cancel): ")? else {
            return Ok(());
        };
        if raw == CANCEL {
            println!("reservation cancelled");
            return Ok(());
        }
        let start_date = match parse_date(&raw) {
            Ok(date) => date,
            Err(message) => {
                println!("{message}");
                return Ok(());
            }
        };

        match self.module.commit_reservation(
            &self.catalog,
            CommitReservationDto {
                book_id,
                user_id,
                start_date,
            },
        ) {
            Ok((catalog, receipt)) => {
                self.catalog = catalog;
                println!(
                    "reserved {} through {}",
                    fmt_date(receipt.start_date),
                    fmt_date(receipt.end_date)
                );
            }
            Err(report) => render_failure(&report),
        }
        Ok(())
    }

    fn slots(&self, book_id: String) {
        match self.module.reservation_slots(&self.catalog, book_id) {
            Ok(periods) if periods.is_empty() => println!("no near-term openings"),
            Ok(periods) => print_periods(&periods),
            Err(report) => render_failure(&report),
        }
    }

    fn calendar(&self, book_id: String) {
        match self.module.availability_calendar(&self.catalog, book_id) {
            Ok(periods) if periods.is_empty() => println!("fully booked"),
            Ok(periods) => print_periods(&periods),
            Err(report) => render_failure(&report),
        }
    }

    fn next_available(&self, book_id: String) {
        match self.module.next_available_date(&self.catalog, book_id) {
            Ok(date) => println!("next available {}", fmt_date(date)),
            Err(report) => render_failure(&report),
        }
    }

    fn check(&self, book_id: String, start: String, end: String) {
        let (start, end) = match (parse_date(&start), parse_date(&end)) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(message), _) | (_, Err(message)) => {
                println!("{message}");
                return;
            }
        };
        match self
            .module
            .is_slot_available(&self.catalog, SlotQueryDto { book_id, start, end })
        {
            Ok(true) => println!("window is free"),
            Ok(false) => println!("window overlaps an existing loan or reservation"),
            Err(report) => render_failure(&report),
        }
    }

    fn fees(&self, user_id: Uuid) {
        let status = self.module.loan_status(&self.catalog, user_id);
        println!(
            "active {} | overdue {} | owed {:.2}",
            status.active, status.overdue, status.fees
        );
    }

    fn remove_book(&mut self, book_id: String, acting_user: Uuid) {
        match self.module.remove_book(
            &self.catalog,
            RemoveBookDto {
                book_id,
                acting_user,
            },
        ) {
            Ok(catalog) => {
                self.catalog = catalog;
                println!("book removed");
            }
            Err(report) => render_failure(&report),
        }
    }

    fn remove_user(&mut self, user_id: Uuid, acting_user: Uuid) {
        match self.module.remove_user(
            &self.catalog,
            RemoveUserDto {
                user_id,
                acting_user,
            },
        ) {
            Ok(catalog) => {
                self.catalog = catalog;
                println!("user removed, their history is retained");
            }
            Err(report) => render_failure(&report),
        }
    }
}

fn read_input(prompt: &str) -> error_stack::Result<Option<String>, CatalogError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .change_context(CatalogError::Internal)?;
    let mut buf = String::new();
    let read = io::stdin()
        .read_line(&mut buf)
        .change_context(CatalogError::Internal)?;
    if read == 0 {
        // EOF ends the session the same way `quit` does
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn parse_date(raw: &str) -> Result<OffsetDateTime, String> {
    Date::parse(raw, DATE_FORMAT)
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| format!("`{raw}` is not a YYYY-MM-DD date"))
}

fn fmt_date(ts: OffsetDateTime) -> String {
    ts.date().to_string()
}

fn print_periods(periods: &[PeriodDto]) {
    for (n, period) in periods.iter().enumerate() {
        println!(
            "  {}. {} to {}",
            n + 1,
            fmt_date(period.start),
            fmt_date(period.end)
        );
    }
}

fn render_failure(report: &Report<CatalogError>) {
    let reason = report.current_context();
    match reason.kind() {
        ErrorKind::Internal => tracing::error!("{report:?}"),
        _ => tracing::debug!("{report:?}"),
    }
    println!("rejected: {reason}");
}
