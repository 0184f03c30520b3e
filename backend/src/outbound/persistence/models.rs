//! Row types mapping the `users` table to Rust.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::User;

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.name, row.created_at, row.updated_at)
    }
}

/// Row inserted into `users`; timestamps come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
}
