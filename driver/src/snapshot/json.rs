use std::fs;
use std::io;
use std::path::PathBuf;

use error_stack::ResultExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use kernel::interface::store::CatalogStore;
use kernel::prelude::catalog::Catalog;
use kernel::prelude::entity::Transaction;
use kernel::CatalogError;

use crate::error::DriverError;
use crate::snapshot::row::{BookRow, UserRow};

const DATA_DIR_ENV: &str = "LEDGER_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./data";

const BOOKS_FILE: &str = "books.json";
const USERS_FILE: &str = "users.json";
const TRANSACTIONS_FILE: &str = "transactions.json";

/// Snapshot store keeping books, users, and transactions as three
/// independent JSON files under one directory. A missing or empty file
/// reads as an empty collection; a malformed one is an error.
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_env() -> Self {
        let dir = crate::env(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    fn read_rows<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, DriverError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(file, "snapshot file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(DriverError::from(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_rows<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<(), DriverError> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(rows)?;
        fs::write(self.dir.join(file), raw)?;
        Ok(())
    }
}

impl CatalogStore for JsonSnapshotStore {
    fn load(&self) -> error_stack::Result<Catalog, CatalogError> {
        let books = self
            .read_rows::<BookRow>(BOOKS_FILE)
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("reading {BOOKS_FILE}"))?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, DriverError>>()
            .change_context_lazy(|| CatalogError::Internal)?;

        let users = self
            .read_rows::<UserRow>(USERS_FILE)
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("reading {USERS_FILE}"))?
            .into_iter()
            .map(Into::into)
            .collect();

        let transactions = self
            .read_rows::<Transaction>(TRANSACTIONS_FILE)
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("reading {TRANSACTIONS_FILE}"))?;

        tracing::info!(
            books = books.len(),
            transactions = transactions.len(),
            "snapshot loaded"
        );
        Ok(Catalog::from_parts(books, users, transactions))
    }

    fn save(&self, catalog: &Catalog) -> error_stack::Result<(), CatalogError> {
        let mut books: Vec<BookRow> = catalog
            .books()
            .values()
            .cloned()
            .map(BookRow::from)
            .collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        let mut users: Vec<UserRow> = catalog
            .users()
            .values()
            .cloned()
            .map(UserRow::from)
            .collect();
        users.sort_by_key(|row| row.id);

        self.write_rows(BOOKS_FILE, &books)
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("writing {BOOKS_FILE}"))?;
        self.write_rows(USERS_FILE, &users)
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("writing {USERS_FILE}"))?;
        self.write_rows(TRANSACTIONS_FILE, catalog.ledger().entries())
            .change_context_lazy(|| CatalogError::Internal)
            .attach_printable_lazy(|| format!("writing {TRANSACTIONS_FILE}"))?;

        tracing::info!(dir = %self.dir.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use kernel::interface::store::CatalogStore;
    use kernel::prelude::catalog::Catalog;
    use kernel::prelude::entity::{
        Book, BookAuthors, BookGenre, BookId, BookTitle, Password, PublishedYear, Role,
        Transaction, TransactionKind, User, UserId, UserName,
    };

    use super::JsonSnapshotStore;

    fn temp_store() -> JsonSnapshotStore {
        let dir = std::env::temp_dir().join(format!("ledger-snapshot-{}", rand::random::<u32>()));
        JsonSnapshotStore::new(dir)
    }

    fn seeded_catalog() -> Catalog {
        let now = datetime!(2024-04-01 12:00 UTC);
        let student = UserId::new(Uuid::from_u128(7));
        let staff = UserId::new(Uuid::from_u128(8));
        let books = vec![
            Book::new(
                BookId::new("b-1"),
                BookTitle::new("Annihilation"),
                BookAuthors::new(vec!["Jeff VanderMeer".to_string()]).unwrap(),
                PublishedYear::new(2014),
                BookGenre::new("science fiction"),
                false,
            ),
            Book::new(
                BookId::new("b-2"),
                BookTitle::new("Borne"),
                BookAuthors::new(vec!["Jeff VanderMeer".to_string()]).unwrap(),
                PublishedYear::new(2017),
                BookGenre::new("science fiction"),
                true,
            ),
        ];
        let users = vec![
            User::new(
                UserId::new(Uuid::from_u128(7)),
                UserName::new("Iris"),
                Password::new("pw"),
                Role::Student {
                    grade: "1".to_string(),
                },
            ),
            User::new(
                UserId::new(Uuid::from_u128(8)),
                UserName::new("Odile"),
                Password::new("pw"),
                Role::Librarian {
                    staff_code: "L-2".to_string(),
                },
            ),
        ];
        // newest first: reservation, undated loan, dated loan
        let transactions = vec![
            Transaction::reservation(
                BookId::new("b-1"),
                student.clone(),
                now + Duration::days(2),
                now + Duration::days(40),
                now + Duration::days(50),
            ),
            Transaction::loan(BookId::new("b-2"), staff, now + Duration::days(1), None),
            Transaction::loan(
                BookId::new("b-1"),
                student,
                now,
                Some(now + Duration::days(30)),
            ),
        ];
        Catalog::from_parts(books, users, transactions)
    }

    #[test]
    fn absent_files_load_as_an_empty_catalog() {
        let store = temp_store();
        let catalog = store.load().unwrap();
        assert!(catalog.books().is_empty());
        assert!(catalog.users().is_empty());
        assert!(catalog.ledger().entries().is_empty());
    }

    #[test]
    fn round_trip_preserves_shapes() {
        let store = temp_store();
        let catalog = seeded_catalog();
        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.books(), catalog.books());
        assert_eq!(loaded.users(), catalog.users());
        assert_eq!(loaded.ledger(), catalog.ledger());

        // tagged shapes survive: optional due dates and reservation spans
        let kinds: Vec<_> = loaded
            .ledger()
            .entries()
            .iter()
            .map(Transaction::kind)
            .collect();
        assert!(matches!(kinds[0], TransactionKind::Reservation { .. }));
        assert!(matches!(kinds[1], TransactionKind::Loan { due_date: None }));
        assert!(matches!(
            kinds[2],
            TransactionKind::Loan { due_date: Some(_) }
        ));
    }

    #[test]
    fn malformed_file_is_an_error_not_an_empty_catalog() {
        let store = temp_store();
        store.save(&seeded_catalog()).unwrap();

        std::fs::write(store.dir.join("books.json"), "{ not json").unwrap();
        assert!(store.load().is_err());
    }
}
