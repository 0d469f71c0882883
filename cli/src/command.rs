use uuid::Uuid;

/// Free-text menu input, parsed into a typed command before anything else
/// looks at it. The session owns all rendering; this module owns none.
#[derive(Debug)]
pub enum Command {
    Help,
    ListBooks,
    ListUsers,
    AddBook,
    AddUser,
    Loan { book_id: String, user_id: Uuid },
    Return { book_id: String, user_id: Uuid },
    Reserve { book_id: String, user_id: Uuid },
    Slots { book_id: String },
    Calendar { book_id: String },
    Next { book_id: String },
    Check { book_id: String, start: String, end: String },
    Fees { user_id: Uuid },
    RemoveBook { book_id: String, acting_user: Uuid },
    RemoveUser { user_id: Uuid, acting_user: Uuid },
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(String::from("try `help`"));
        };
        let args: Vec<&str> = parts.collect();
        match (head, args.as_slice()) {
            ("help", []) => Ok(Self::Help),
            ("books", []) => Ok(Self::ListBooks),
            ("users", []) => Ok(Self::ListUsers),
            ("add-book", []) => Ok(Self::AddBook),
            ("add-user", []) => Ok(Self::AddUser),
            ("loan", [book, user]) => Ok(Self::Loan {
                book_id: (*book).to_string(),
                user_id: parse_user(user)?,
            }),
            ("return", [book, user]) => Ok(Self::Return {
                book_id: (*book).to_string(),
                user_id: parse_user(user)?,
            }),
            ("reserve", [book, user]) => Ok(Self::Reserve {
                book_id: (*book).to_string(),
                user_id: parse_user(user)?,
            }),
            ("slots", [book]) => Ok(Self::Slots {
                book_id: (*book).to_string(),
            }),
            ("calendar", [book]) => Ok(Self::Calendar {
                book_id: (*book).to_string(),
            }),
            ("next", [book]) => Ok(Self::Next {
                book_id: (*book).to_string(),
            }),
            ("check", [book, start, end]) => Ok(Self::Check {
                book_id: (*book).to_string(),
                start: (*start).to_string(),
                end: (*end).to_string(),
            }),
            ("fees", [user]) => Ok(Self::Fees {
                user_id: parse_user(user)?,
            }),
            ("remove-book", [book, acting]) => Ok(Self::RemoveBook {
                book_id: (*book).to_string(),
                acting_user: parse_user(acting)?,
            }),
            ("remove-user", [user, acting]) => Ok(Self::RemoveUser {
                user_id: parse_user(user)?,
                acting_user: parse_user(acting)?,
            }),
            ("quit" | "exit", []) => Ok(Self::Quit),
            _ => Err(format!("unrecognized command `{line}`, try `help`")),
        }
    }
}

fn parse_user(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| format!("`{raw}` is not a user id"))
}

pub const USAGE: &str = "\
commands:
  books | users                 list the catalog
  add-book | add-user           interactive entry
  loan <book> <user>            loan a book out
  return <book> <user>          take a book back
  reserve <book> <user>         reserve with a start date prompt
  slots <book>                  near-term openings (next month)
  calendar <book>               all free windows
  next <book>                   first date the book is free
  check <book> <start> <end>    is the window free (dates YYYY-MM-DD)
  fees <user>                   active/overdue loans and owed fees
  remove-book <book> <acting>   librarian only
  remove-user <user> <acting>   librarian only
  quit                          save and exit";
