//! Integration tests tying the record types to the table declarations
//!
//! The insert payloads are written out by hand, so these tests check that
//! their required fields match what the declarations say an insert must
//! supply.

use database::schema::{posts, users};
use database::{NewPost, NewUser, Post, Table};
use serde_json::{Value, json};

fn camel_case(column: &str) -> String {
    let mut out = String::new();
    let mut upper = false;
    for c in column.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn serialized_keys(value: Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .expect("insert payload serializes to an object")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    keys
}

fn required_keys(table: &Table) -> Vec<String> {
    let mut keys: Vec<String> = table
        .required_insert_columns()
        .into_iter()
        .map(camel_case)
        .collect();
    keys.sort();
    keys
}

#[test]
fn test_minimal_new_user_carries_exactly_the_required_columns() {
    let user = NewUser::new("Grace", "grace@example.com");
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(serialized_keys(value), required_keys(&users::TABLE));
}

#[test]
fn test_minimal_new_post_carries_exactly_the_required_columns() {
    let post = NewPost::new("Hello", "First post", 1);
    let value = serde_json::to_value(&post).unwrap();
    assert_eq!(serialized_keys(value), required_keys(&posts::TABLE));
}

#[test]
fn test_new_user_accepts_payload_without_generated_fields() {
    let user: NewUser =
        serde_json::from_value(json!({ "name": "Grace", "email": "grace@example.com" })).unwrap();
    assert_eq!(user, NewUser::new("Grace", "grace@example.com"));
}

#[test]
fn test_new_user_rejects_payload_without_email() {
    let result: Result<NewUser, _> = serde_json::from_value(json!({ "name": "Grace" }));
    assert!(result.is_err());
}

#[test]
fn test_new_post_rejects_payload_without_author() {
    let result: Result<NewPost, _> =
        serde_json::from_value(json!({ "title": "Hello", "body": "First post" }));
    assert!(result.is_err());
}

#[test]
fn test_post_row_uses_camel_case_on_the_wire() {
    let post: Post = serde_json::from_value(json!({
        "id": 7,
        "title": "Hello",
        "body": "First post",
        "authorId": 3,
        "createdAt": "2024-05-01T10:00:00",
        "updatedAt": "2024-05-01T10:00:00",
    }))
    .unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.author_id, 3);
    assert_eq!(post.created_at, post.updated_at);
}
