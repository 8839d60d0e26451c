//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered visitors, one row per distinct email.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Most recently registered name.
        name -> Text,
        /// Unique, normalised email address.
        email -> Text,
        /// First registration time; never updated.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only visitor feedback.
    ///
    /// Text columns are nullable: tables created before these migrations
    /// hold NULL for omitted fields.
    feedback (id) {
        id -> Int4,
        name -> Nullable<Text>,
        email -> Nullable<Text>,
        message -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, feedback);
