//! Registration Module
//!
//! The record the form collects, the names of its inputs, and the user
//! record the backend answers with once a registration is accepted.

use std::fmt;

use chrono::NaiveDateTime;
use derive_more::Display;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::{constants, models::address::Address};

pub mod validators;

/// Named inputs of the registration form. `Display` yields the input name,
/// which is also the JSON key the backend expects.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    #[display(fmt = "nome")]
    FirstName,
    #[display(fmt = "sobrenome")]
    LastName,
    #[display(fmt = "email")]
    Email,
    #[display(fmt = "senha")]
    Password,
    #[display(fmt = "cep")]
    PostalCode,
    #[display(fmt = "rua")]
    Street,
    #[display(fmt = "numero")]
    Number,
    #[display(fmt = "complemento")]
    Complement,
    #[display(fmt = "bairro")]
    Neighborhood,
    #[display(fmt = "cidade")]
    City,
    #[display(fmt = "estado")]
    State,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Password,
        Field::PostalCode,
        Field::Street,
        Field::Number,
        Field::Complement,
        Field::Neighborhood,
        Field::City,
        Field::State,
    ];

    /// Fields filled in by a postal code lookup.
    pub const ADDRESS: [Field; 4] = [
        Field::Street,
        Field::Neighborhood,
        Field::City,
        Field::State,
    ];

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.to_string() == name)
    }

    pub fn is_optional(self) -> bool {
        self == Field::Complement
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
}

impl RegistrationForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::PostalCode => &self.postal_code,
            Field::Street => &self.street,
            Field::Number => &self.number,
            Field::Complement => &self.complement,
            Field::Neighborhood => &self.neighborhood,
            Field::City => &self.city,
            Field::State => &self.state,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::PostalCode => &mut self.postal_code,
            Field::Street => &mut self.street,
            Field::Number => &mut self.number,
            Field::Complement => &mut self.complement,
            Field::Neighborhood => &mut self.neighborhood,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn clear(&mut self) {
        *self = RegistrationForm::default();
    }

    pub fn apply_address(&mut self, address: &Address) {
        self.street = address.street.clone();
        self.neighborhood = address.neighborhood.clone();
        self.city = address.city.clone();
        self.state = address.state.clone();
    }

    pub fn clear_address(&mut self) {
        for field in Field::ADDRESS {
            self.slot(field).clear();
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"********")
            .field("postal_code", &self.postal_code)
            .field("street", &self.street)
            .field("number", &self.number)
            .field("complement", &self.complement)
            .field("neighborhood", &self.neighborhood)
            .field("city", &self.city)
            .field("state", &self.state)
            .finish()
    }
}

/// A form that passed every field rule. Only the registration validator
/// hands these out, so holding one proves the submission precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedForm(RegistrationForm);

impl ValidatedForm {
    pub(crate) fn new(form: RegistrationForm) -> Self {
        ValidatedForm(form)
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.0
    }

    pub fn into_inner(self) -> RegistrationForm {
        self.0
    }
}

/// User record returned by `POST /usuarios`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    #[serde(default, rename = "nome")]
    pub first_name: Option<String>,
    #[serde(default, rename = "sobrenome")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "cep")]
    pub postal_code: Option<String>,
    #[serde(default, rename = "rua")]
    pub street: Option<String>,
    #[serde(default, rename = "numero")]
    pub number: Option<String>,
    #[serde(default, rename = "complemento")]
    pub complement: Option<String>,
    #[serde(default, rename = "bairro")]
    pub neighborhood: Option<String>,
    #[serde(default, rename = "cidade")]
    pub city: Option<String>,
    #[serde(default, rename = "estado")]
    pub state: Option<String>,
    #[serde(default, rename = "dataCriacao")]
    created_at: Option<Value>,
}

impl RegisteredUser {
    pub fn success_message(&self) -> String {
        format!("{}{}", constants::MESSAGE_REGISTRATION_SUCCESS, self.id)
    }

    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `rua, numero[ - complemento] - bairro - cidade/estado - cep`
    pub fn full_address(&self) -> String {
        let part = |value: &Option<String>| value.as_deref().unwrap_or_default().to_string();

        let mut address = format!("{}, {}", part(&self.street), part(&self.number));
        if let Some(complement) = self.complement.as_deref().filter(|c| !c.is_empty()) {
            address.push_str(" - ");
            address.push_str(complement);
        }
        address.push_str(&format!(
            " - {} - {}/{} - {}",
            part(&self.neighborhood),
            part(&self.city),
            part(&self.state),
            part(&self.postal_code)
        ));
        address
    }

    /// Creation timestamp, accepting both ISO strings and the
    /// `[year, month, day, hour, minute, second, nanos]` array form.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        match self.created_at.as_ref()? {
            Value::String(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok(),
            Value::Array(parts) => {
                let nums: Vec<u32> = parts
                    .iter()
                    .map(|part| part.as_u64().and_then(|n| u32::try_from(n).ok()))
                    .collect::<Option<_>>()?;
                let (year, rest) = nums.split_first()?;
                let date = chrono::NaiveDate::from_ymd_opt(
                    i32::try_from(*year).ok()?,
                    *rest.first()?,
                    *rest.get(1)?,
                )?;
                date.and_hms_nano_opt(
                    rest.get(2).copied().unwrap_or(0),
                    rest.get(3).copied().unwrap_or(0),
                    rest.get(4).copied().unwrap_or(0),
                    rest.get(5).copied().unwrap_or(0),
                )
            }
            _ => None,
        }
    }
}
