use std::process::{ExitCode, Termination};

use error_stack::Report;
use kernel::CatalogError;

#[derive(Debug)]
pub struct StackTrace(Report<CatalogError>);

impl From<Report<CatalogError>> for StackTrace {
    fn from(e: Report<CatalogError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        eprintln!("{:?}", self.0);
        ExitCode::FAILURE
    }
}
