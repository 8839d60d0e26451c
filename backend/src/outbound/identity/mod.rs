//! Identity provider adapters.

mod google;

pub use google::{
    GOOGLE_CERTS_URL, GoogleIdentityConfig, GoogleIdentityVerifier, verify_with_key_set,
};
