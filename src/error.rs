//! Error taxonomy for the registration form.
//!
//! Every variant renders as the exact text shown in the form's error alert,
//! so the controller can surface any failure with `to_string()`. Technical
//! details (transport error text) travel alongside for logging only.

use thiserror::Error;

use crate::{constants, models::registration::Field};

pub type ServiceResult<T> = Result<T, FormError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field failed a local check; never reaches the network.
    #[error("{message}")]
    LocalValidation { field: Field, message: String },

    #[error("{}", constants::MESSAGE_CEP_NOT_FOUND)]
    LookupNotFound,

    #[error("{}", constants::MESSAGE_CEP_TRANSPORT)]
    LookupTransport(String),

    /// Backend answered 400; the payload is already the display string.
    #[error("{0}")]
    SubmissionValidationRejected(String),

    #[error("{}", constants::MESSAGE_SERVER_ERROR)]
    SubmissionServerError,

    #[error("{}", constants::MESSAGE_TIMEOUT)]
    SubmissionTimeout,

    #[error("{}", constants::MESSAGE_REGISTRATION_FAILED)]
    SubmissionTransport(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FormError {
    pub fn local_validation(field: Field, message: impl Into<String>) -> Self {
        FormError::LocalValidation {
            field,
            message: message.into(),
        }
    }

    /// Text for the error alert region.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Diagnostic detail that must not be shown to the user.
    pub fn detail(&self) -> Option<&str> {
        match self {
            FormError::LookupTransport(detail) | FormError::SubmissionTransport(detail) => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_details_stay_out_of_the_message() {
        let err = FormError::LookupTransport("connection refused (os error 111)".to_string());
        assert_eq!(err.user_message(), constants::MESSAGE_CEP_TRANSPORT);
        assert_eq!(err.detail(), Some("connection refused (os error 111)"));

        let err = FormError::SubmissionTransport("dns failure".to_string());
        assert_eq!(err.user_message(), constants::MESSAGE_REGISTRATION_FAILED);
    }

    #[test]
    fn rejection_message_is_shown_verbatim() {
        let err = FormError::SubmissionValidationRejected("Email já cadastrado".to_string());
        assert_eq!(err.user_message(), "Email já cadastrado");
        assert!(err.detail().is_none());
    }

    #[test]
    fn local_validation_carries_field() {
        let err = FormError::local_validation(Field::PostalCode, constants::MESSAGE_CEP_INVALID);
        assert_eq!(err.user_message(), constants::MESSAGE_CEP_INVALID);
        assert!(matches!(err, FormError::LocalValidation { field: Field::PostalCode, .. }));
    }
}
