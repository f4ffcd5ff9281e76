//! Postal code handling and the ViaCEP address payload.

use std::fmt;

use serde_derive::Deserialize;
use serde_json::Value;

use crate::{
    constants,
    error::{FormError, ServiceResult},
    models::registration::Field,
    utils::is_truthy,
};

/// A Brazilian postal code (CEP) reduced to exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Strip everything that is not an ASCII digit.
    pub fn normalize(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }

    /// Normalize and require eight digits. Fails locally, before any
    /// request could be issued.
    pub fn parse(raw: &str) -> ServiceResult<Self> {
        let digits = Self::normalize(raw);
        if digits.len() == constants::POSTAL_CODE_DIGITS {
            Ok(PostalCode(digits))
        } else {
            Err(FormError::local_validation(
                Field::PostalCode,
                constants::MESSAGE_CEP_INVALID,
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `00000-000`
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input mask applied while the user types: digits only, and a hyphen after
/// the fifth digit once there are more than five. Digits past the eighth
/// are dropped.
pub fn mask_postal_code(raw: &str) -> String {
    let digits = PostalCode::normalize(raw);
    if digits.len() > 5 {
        let end = digits.len().min(constants::POSTAL_CODE_DIGITS);
        format!("{}-{}", &digits[..5], &digits[5..end])
    } else {
        digits
    }
}

/// Body of `GET {viacep}/{cep}/json/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub erro: Option<Value>,
}

impl ViaCepResponse {
    /// ViaCEP answers 200 with an `erro` flag for unknown codes; the flag
    /// has been both a boolean and the string `"true"`.
    pub fn is_not_found(&self) -> bool {
        self.erro.as_ref().is_some_and(is_truthy)
    }

    pub fn into_address(self) -> Address {
        Address {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
        }
    }
}

/// Address parts filled in from a lookup. Missing parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressLookupResult {
    Found(Address),
    NotFound,
    TransportError(String),
}

impl AddressLookupResult {
    pub fn into_result(self) -> ServiceResult<Address> {
        match self {
            AddressLookupResult::Found(address) => Ok(address),
            AddressLookupResult::NotFound => Err(FormError::LookupNotFound),
            AddressLookupResult::TransportError(detail) => Err(FormError::LookupTransport(detail)),
        }
    }
}

impl From<ViaCepResponse> for AddressLookupResult {
    fn from(payload: ViaCepResponse) -> Self {
        if payload.is_not_found() {
            AddressLookupResult::NotFound
        } else {
            AddressLookupResult::Found(payload.into_address())
        }
    }
}
