//! `posts` table

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::table::{Column, ColumnType, Table};

const COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::Serial).primary_key(),
    Column::new("title", ColumnType::Varchar { length: 500 }).not_null(),
    Column::new("body", ColumnType::Text).not_null(),
    Column::new("author_id", ColumnType::Integer)
        .not_null()
        .references("users", "id"),
    Column::new("created_at", ColumnType::Timestamp)
        .default_now()
        .not_null(),
    Column::new("updated_at", ColumnType::Timestamp)
        .default_now()
        .not_null(),
];

/// Declaration of the `posts` table
///
/// `author_id` must name an existing user; the storage engine rejects the
/// write otherwise.
pub static TABLE: Table = Table::new("posts", COLUMNS);

/// Post row as read from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New post insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub title: String,
    pub body: String,
    pub author_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i32) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            author_id,
            created_at: None,
            updated_at: None,
        }
    }
}
