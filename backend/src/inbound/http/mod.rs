//! HTTP inbound adapter: server-rendered pages plus the small JSON surface
//! used by the client widgets.

pub mod chat;
pub mod contact;
pub mod error;
pub mod feedback;
pub mod health;
pub mod pages;
pub mod registration;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub(crate) mod views;

pub use error::ApiResult;
