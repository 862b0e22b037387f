//! Explicit repositories over prepared statements.
//!
//! Where a row belongs to a user, the owner id is a mandatory argument of
//! every function rather than an optional filter, so a call site cannot
//! forget the tenancy scope.

pub mod todos;
pub mod tokens;
pub mod users;
