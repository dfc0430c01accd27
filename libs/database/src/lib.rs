//! Database schema for the Forum application
//!
//! This crate declares the `users` and `posts` tables together with the
//! record types read from and written to them. It carries no query logic;
//! statements are built by whatever access layer consumes the declarations.
//!
//! ```rust
//! use database::schema::{posts, users};
//!
//! assert_eq!(users::TABLE.required_insert_columns(), ["name", "email"]);
//! assert_eq!(
//!     posts::TABLE.column("author_id").and_then(|c| c.references),
//!     Some(database::table::ForeignKey::new("users", "id")),
//! );
//! ```

pub mod schema;
pub mod table;

pub use schema::{NewPost, NewUser, Post, TABLES, User};
pub use table::{Column, ColumnDefault, ColumnType, ForeignKey, Table};

/// Package name of this crate, as consumers refer to it in build tooling
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
