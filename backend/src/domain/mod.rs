//! Domain primitives, services and ports.
//!
//! Purpose: hold the registration flow and its thin collaborators (feedback,
//! contact, destinations, chat) independent of HTTP and storage. Adapters
//! talk to this layer only through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Registrant / User: validated registration input and stored user.
//! - RegistrationService, FeedbackService, ContactService: driving port
//!   implementations.
//! - MailDispatcher: best-effort transactional mail.
//! - DestinationCatalogue, CannedChatResponder: static collaborators.

pub mod chat;
pub mod contact;
pub mod destination;
pub mod error;
pub mod feedback;
pub mod feedback_service;
pub mod mail;
pub mod ports;
pub mod registration;
pub mod trace_id;
pub mod user;

pub use self::chat::{CannedChatResponder, ChatMessage, ChatValidationError};
pub use self::contact::{CONTACT_STATUS, ContactMessage, ContactService};
pub use self::destination::{Destination, DestinationCatalogue};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::feedback::{FeedbackEntry, NewFeedback, sort_newest_first};
pub use self::feedback_service::FeedbackService;
pub use self::mail::{
    DeliveryStatus, MailDispatcher, MailRecipient, OutboundEmail, WELCOME_SUBJECT,
    contact_subject,
};
pub use self::registration::RegistrationService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, Registrant, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tripsync::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
