//! Shared trait for everything that can become a [`Statement`].

use crate::error::DbResult;
use crate::statement::Statement;

/// Anything that can be assembled into an executable [`Statement`].
///
/// Assembly errors (`Arity`, `Validation`) are returned here, before a
/// connection is touched.
pub trait ToStatement {
    fn to_statement(&self) -> DbResult<Statement>;
}

impl ToStatement for Statement {
    fn to_statement(&self) -> DbResult<Statement> {
        Ok(self.clone())
    }
}

impl<T: ToStatement + ?Sized> ToStatement for &T {
    fn to_statement(&self) -> DbResult<Statement> {
        (**self).to_statement()
    }
}
