//! `users` table

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::table::{Column, ColumnType, Table};

const COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::Serial).primary_key(),
    Column::new("name", ColumnType::Varchar { length: 255 }).not_null(),
    Column::new("email", ColumnType::Varchar { length: 255 })
        .not_null()
        .unique(),
    Column::new("created_at", ColumnType::Timestamp)
        .default_now()
        .not_null(),
    Column::new("updated_at", ColumnType::Timestamp)
        .default_now()
        .not_null(),
];

/// Declaration of the `users` table
///
/// `email` uniqueness is enforced by the storage engine.
pub static TABLE: Table = Table::new("users", COLUMNS);

/// User row as read from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New user insert payload
///
/// `id` and the timestamps are filled in by the storage engine when left
/// out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnDefault;

    #[test]
    fn test_users_declaration() {
        assert_eq!(TABLE.name, "users");
        assert_eq!(
            TABLE.column_names(),
            ["id", "name", "email", "created_at", "updated_at"]
        );
        assert_eq!(TABLE.primary_key().map(|c| c.name), Some("id"));
    }

    #[test]
    fn test_email_is_unique_and_bounded() {
        let email = TABLE.column("email").expect("email column");
        assert!(email.unique);
        assert!(email.not_null);
        assert_eq!(email.column_type, ColumnType::Varchar { length: 255 });
    }

    #[test]
    fn test_timestamps_default_to_now() {
        for name in ["created_at", "updated_at"] {
            let column = TABLE.column(name).expect("timestamp column");
            assert_eq!(column.default, Some(ColumnDefault::Now));
            assert!(column.not_null);
        }
    }

    #[test]
    fn test_insert_shape_requires_name_and_email() {
        assert_eq!(TABLE.required_insert_columns(), ["name", "email"]);
        assert_eq!(
            TABLE.optional_insert_columns(),
            ["id", "created_at", "updated_at"]
        );
    }

    #[test]
    fn test_new_user_leaves_generated_fields_empty() {
        let user = NewUser::new("Ada", "ada@example.com");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.id.is_none());
        assert!(user.created_at.is_none());
        assert!(user.updated_at.is_none());
    }
}
