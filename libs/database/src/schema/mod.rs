//! Forum tables and their record types
//!
//! Each table module holds the declaration (`TABLE`) next to two explicit
//! record types: the select shape, as a row is read back, and the insert
//! shape, carrying only what an insert has to supply.

use crate::table::Table;

pub mod posts;
pub mod users;

pub use posts::{NewPost, Post};
pub use users::{NewUser, User};

/// Every declared table, in dependency order
pub static TABLES: [&Table; 2] = [&users::TABLE, &posts::TABLE];
