//! Controller configuration.
//!
//! Service addresses and timing are explicit values handed to the
//! controller at construction; nothing is read from ambient globals after
//! that point.

use std::env;
use std::time::Duration;

use log::warn;
use url::Url;

use crate::{
    constants,
    error::{FormError, ServiceResult},
    models::address::PostalCode,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    postal_lookup_url: Url,
    backend_url: Url,
    request_timeout: Duration,
    reset_delay: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            postal_lookup_url: parse_static(constants::DEFAULT_VIACEP_URL),
            backend_url: parse_static(constants::DEFAULT_BACKEND_URL),
            request_timeout: Duration::from_millis(constants::DEFAULT_API_TIMEOUT_MS),
            reset_delay: Duration::from_millis(constants::DEFAULT_RESET_DELAY_MS),
        }
    }
}

fn parse_static(url: &str) -> Url {
    Url::parse(url).unwrap()
}

fn parse_url(key: &str, value: &str) -> ServiceResult<Url> {
    Url::parse(value.trim())
        .map_err(|e| FormError::Config(format!("{} is not a valid address ({}): {}", key, value, e)))
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|value| match value.trim().parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                warn!("Ignoring {}={:?}: expected milliseconds", key, value);
                None
            }
        })
        .unwrap_or(default);
    Duration::from_millis(millis)
}

impl FormConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> ServiceResult<Self> {
        dotenv::dotenv().ok();

        let postal_lookup_url = match env::var(constants::ENV_VIACEP_URL) {
            Ok(value) => parse_url(constants::ENV_VIACEP_URL, &value)?,
            Err(_) => parse_static(constants::DEFAULT_VIACEP_URL),
        };
        let backend_url = match env::var(constants::ENV_BACKEND_URL) {
            Ok(value) => parse_url(constants::ENV_BACKEND_URL, &value)?,
            Err(_) => parse_static(constants::DEFAULT_BACKEND_URL),
        };

        Ok(Self {
            postal_lookup_url,
            backend_url,
            request_timeout: millis_from_env(
                constants::ENV_API_TIMEOUT_MS,
                constants::DEFAULT_API_TIMEOUT_MS,
            ),
            reset_delay: millis_from_env(
                constants::ENV_RESET_DELAY_MS,
                constants::DEFAULT_RESET_DELAY_MS,
            ),
        })
    }

    pub fn with_postal_lookup_url(mut self, url: &str) -> ServiceResult<Self> {
        self.postal_lookup_url = parse_url("postal lookup url", url)?;
        Ok(self)
    }

    pub fn with_backend_url(mut self, url: &str) -> ServiceResult<Self> {
        self.backend_url = parse_url("backend url", url)?;
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn postal_lookup_url(&self) -> &Url {
        &self.postal_lookup_url
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    /// Shared by both outbound calls.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    /// `GET {viacep}/{cep}/json/`
    pub fn lookup_endpoint(&self, postal_code: &PostalCode) -> String {
        format!(
            "{}/{}/json/",
            self.postal_lookup_url.as_str().trim_end_matches('/'),
            postal_code
        )
    }

    /// `POST {backend}/usuarios`
    pub fn registration_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.backend_url.as_str().trim_end_matches('/'),
            constants::REGISTRATION_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_services() {
        let config = FormConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_millis(5000));
        assert_eq!(config.reset_delay(), Duration::from_millis(2000));

        let cep = PostalCode::parse("01001-000").unwrap();
        assert_eq!(
            config.lookup_endpoint(&cep),
            "https://viacep.com.br/ws/01001000/json/"
        );
        assert_eq!(
            config.registration_endpoint(),
            "http://localhost:8080/api/usuarios"
        );
    }

    #[test]
    fn trailing_slashes_do_not_double_up() {
        let config = FormConfig::default()
            .with_backend_url("http://127.0.0.1:9000/")
            .unwrap()
            .with_postal_lookup_url("http://127.0.0.1:9001/ws/")
            .unwrap();
        let cep = PostalCode::parse("20040002").unwrap();

        assert_eq!(config.registration_endpoint(), "http://127.0.0.1:9000/usuarios");
        assert_eq!(
            config.lookup_endpoint(&cep),
            "http://127.0.0.1:9001/ws/20040002/json/"
        );
    }

    #[test]
    fn invalid_address_is_a_config_error() {
        let err = FormConfig::default().with_backend_url("not a url").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn builder_overrides_timing() {
        let config = FormConfig::default()
            .with_request_timeout(Duration::from_millis(150))
            .with_reset_delay(Duration::from_millis(10));
        assert_eq!(config.request_timeout(), Duration::from_millis(150));
        assert_eq!(config.reset_delay(), Duration::from_millis(10));
    }
}
