//! Registration submission against the backend `POST /usuarios` endpoint.

use async_trait::async_trait;
use awc::Client;
use itertools::Itertools;
use log::{error, info, warn};
use serde_json::Value;

use crate::{
    config::FormConfig,
    constants,
    error::{FormError, ServiceResult},
    models::registration::{RegisteredUser, ValidatedForm},
    services::{http_client, is_timeout},
    utils::{display_value, is_truthy},
};

/// How a submission ended, from the user's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(RegisteredUser),
    /// HTTP 400; carries the text to display.
    ValidationRejected(String),
    /// HTTP 500.
    ServerError,
    TimedOut,
    /// Transport failure, unexpected status or unreadable body.
    Failed(String),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }

    pub fn into_result(self) -> ServiceResult<RegisteredUser> {
        match self {
            SubmissionOutcome::Accepted(user) => Ok(user),
            SubmissionOutcome::ValidationRejected(message) => {
                Err(FormError::SubmissionValidationRejected(message))
            }
            SubmissionOutcome::ServerError => Err(FormError::SubmissionServerError),
            SubmissionOutcome::TimedOut => Err(FormError::SubmissionTimeout),
            SubmissionOutcome::Failed(detail) => Err(FormError::SubmissionTransport(detail)),
        }
    }

    /// Text for the alert region.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Accepted(user) => user.success_message(),
            other => other.clone().into_result().err().map(|e| e.user_message()).unwrap_or_default(),
        }
    }
}

/// Sends a validated registration. Only a [`ValidatedForm`] is accepted, so
/// nothing reaches the backend without passing the field rules first.
#[async_trait(?Send)]
pub trait RegistrationSubmitter {
    async fn submit(&self, form: &ValidatedForm) -> SubmissionOutcome;
}

pub struct SubmissionClient {
    client: Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            client: http_client(config.request_timeout()),
            endpoint: config.registration_endpoint(),
        }
    }
}

#[async_trait(?Send)]
impl RegistrationSubmitter for SubmissionClient {
    async fn submit(&self, form: &ValidatedForm) -> SubmissionOutcome {
        info!("Submitting registration to {}", self.endpoint);

        let mut response = match self.client.post(self.endpoint.as_str()).send_json(form).await {
            Ok(response) => response,
            Err(e) if is_timeout(&e) => {
                warn!("Registration request timed out");
                return SubmissionOutcome::TimedOut;
            }
            Err(e) => {
                error!("Registration request failed: {}", e);
                return SubmissionOutcome::Failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = match response.body().await {
            Ok(body) => body,
            Err(e) => {
                error!("Could not read registration response ({}): {}", status, e);
                return SubmissionOutcome::Failed(format!("reading body: {}", e));
            }
        };

        let outcome = map_response(status, &body);
        match &outcome {
            SubmissionOutcome::Accepted(user) => info!("Registration accepted with id {}", user.id),
            other => warn!("Registration not accepted ({}): {:?}", status, other),
        }
        outcome
    }
}

/// Map a backend answer to an outcome.
pub fn map_response(status: u16, body: &[u8]) -> SubmissionOutcome {
    match status {
        200..=299 => serde_json::from_slice::<RegisteredUser>(body)
            .map(SubmissionOutcome::Accepted)
            .unwrap_or_else(|e| SubmissionOutcome::Failed(format!("malformed success body: {}", e))),
        400 => match rejection_message(body) {
            Some(message) => SubmissionOutcome::ValidationRejected(message),
            None => SubmissionOutcome::Failed("unreadable 400 body".to_string()),
        },
        500 => SubmissionOutcome::ServerError,
        other => SubmissionOutcome::Failed(format!("unexpected status {}", other)),
    }
}

/// Display text for a 400 body: a truthy aggregate `erro` entry verbatim,
/// otherwise every value joined with `", "` in body order. `None` when the
/// body is not a JSON object/array or yields nothing to show.
///
/// This mirrors what the backend has been observed to send (field map from
/// bean validation, or `{"erro": ...}` from business checks); it is an
/// integration assumption rather than a documented contract.
pub fn rejection_message(body: &[u8]) -> Option<String> {
    let values: Vec<Value> = match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) => {
            if let Some(aggregate) = map
                .get(constants::REJECTION_AGGREGATE_KEY)
                .filter(|value| is_truthy(value))
            {
                return Some(display_value(aggregate));
            }
            map.into_iter().map(|(_, value)| value).collect()
        }
        Value::Array(items) => items,
        _ => return None,
    };

    let message = values.iter().map(display_value).join(constants::REJECTION_SEPARATOR);
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}
