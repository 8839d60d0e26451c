//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **mail**: SMTP relay delivery via `lettre`
//! - **identity**: Google ID token verification via `jsonwebtoken`
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod identity;
pub mod mail;
pub mod persistence;
