//! Address lookup against the ViaCEP postal code service.

use async_trait::async_trait;
use awc::Client;
use log::{debug, info, warn};

use crate::{
    config::FormConfig,
    error::{FormError, ServiceResult},
    models::address::{AddressLookupResult, PostalCode, ViaCepResponse},
    services::{http_client, is_timeout},
};

/// Resolves a postal code into address parts. One request per call; every
/// failure is folded into the returned [`AddressLookupResult`].
#[async_trait(?Send)]
pub trait AddressLookup {
    async fn lookup(&self, postal_code: &PostalCode) -> AddressLookupResult;
}

pub struct PostalLookupClient {
    client: Client,
    config: FormConfig,
}

impl PostalLookupClient {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            client: http_client(config.request_timeout()),
            config: config.clone(),
        }
    }

    /// Lookup from what the user typed. A code that does not reduce to
    /// eight digits fails with [`FormError::LocalValidation`] and no request
    /// is made.
    pub async fn lookup_raw(&self, raw: &str) -> ServiceResult<AddressLookupResult> {
        let postal_code = PostalCode::parse(raw)?;
        Ok(self.lookup(&postal_code).await)
    }

    async fn fetch(&self, postal_code: &PostalCode) -> ServiceResult<ViaCepResponse> {
        let endpoint = self.config.lookup_endpoint(postal_code);
        debug!("GET {}", endpoint);

        let mut response = self
            .client
            .get(endpoint.as_str())
            .insert_header(("Accept", "application/json"))
            .send()
            .await
            .map_err(|e| {
                let detail = if is_timeout(&e) {
                    format!("timed out after {:?}", self.config.request_timeout())
                } else {
                    e.to_string()
                };
                FormError::LookupTransport(detail)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormError::LookupTransport(format!(
                "unexpected status {}",
                status
            )));
        }

        let body = response
            .body()
            .await
            .map_err(|e| FormError::LookupTransport(format!("reading body: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| FormError::LookupTransport(format!("malformed payload: {}", e)))
    }
}

#[async_trait(?Send)]
impl AddressLookup for PostalLookupClient {
    async fn lookup(&self, postal_code: &PostalCode) -> AddressLookupResult {
        info!("Looking up postal code {}", postal_code.formatted());

        match self.fetch(postal_code).await {
            Ok(payload) => {
                let result = AddressLookupResult::from(payload);
                if result == AddressLookupResult::NotFound {
                    info!("Postal code {} not found", postal_code.formatted());
                }
                result
            }
            Err(err) => {
                let detail = err.detail().unwrap_or_default().to_string();
                warn!(
                    "Postal code lookup for {} failed: {}",
                    postal_code.formatted(),
                    detail
                );
                AddressLookupResult::TransportError(detail)
            }
        }
    }
}
