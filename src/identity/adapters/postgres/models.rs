//! Diesel row models for account persistence.

use super::schema::{sessions, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Normalized email address.
    pub email: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Phone number.
    pub phone: String,
    /// PHC password hash.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Normalized email address.
    pub email: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Phone number.
    pub phone: String,
    /// PHC password hash.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert model for session records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionRow {
    /// Credential digest.
    pub digest: String,
    /// Session owner.
    pub email: String,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
