//! Outbound calls to the two collaborators.
//!
//! Both clients share the awc client shape: one client per service with the
//! configured request timeout, bodies read as bytes and parsed with serde.

pub mod postal_lookup_service;
pub mod submission_service;

use std::sync::Once;
use std::time::Duration;

use awc::{error::SendRequestError, Client};

pub use postal_lookup_service::{AddressLookup, PostalLookupClient};
pub use submission_service::{RegistrationSubmitter, SubmissionClient, SubmissionOutcome};

static CRYPTO_PROVIDER: Once = Once::new();

/// awc client whose requests give up after `timeout`.
///
/// TLS needs a process-level rustls provider before the connector is built.
/// `ring` is installed once; a provider the host process already installed
/// is kept.
pub fn http_client(timeout: Duration) -> Client {
    CRYPTO_PROVIDER.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
    Client::builder().timeout(timeout).finish()
}

pub(crate) fn is_timeout(err: &SendRequestError) -> bool {
    matches!(err, SendRequestError::Timeout)
}
