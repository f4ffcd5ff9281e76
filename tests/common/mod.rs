//! Shared setup: a config pointing both collaborators at wiremock servers
//! and a form that passes every field rule.

#![allow(dead_code)]

use std::time::Duration;

use cadastro::{models::registration::Field, FormConfig, FormController};
use wiremock::MockServer;

pub const VALID_FORM: [(Field, &str); 11] = [
    (Field::FirstName, "Maria"),
    (Field::LastName, "Silva"),
    (Field::Email, "maria@example.com"),
    (Field::Password, "segredo1"),
    (Field::PostalCode, "01001000"),
    (Field::Street, "Praça da Sé"),
    (Field::Number, "100"),
    (Field::Complement, ""),
    (Field::Neighborhood, "Sé"),
    (Field::City, "São Paulo"),
    (Field::State, "SP"),
];

pub fn config_for(viacep: &MockServer, backend: &MockServer) -> FormConfig {
    FormConfig::default()
        .with_postal_lookup_url(&format!("{}/ws", viacep.uri()))
        .unwrap()
        .with_backend_url(&format!("{}/api", backend.uri()))
        .unwrap()
        .with_request_timeout(Duration::from_millis(500))
        .with_reset_delay(Duration::from_millis(100))
}

pub fn fill_valid_form(controller: &FormController) {
    for (field, value) in VALID_FORM {
        controller.input(field, value);
    }
}

pub fn se_payload() -> serde_json::Value {
    serde_json::json!({
        "cep": "01001-000",
        "logradouro": "Praça da Sé",
        "complemento": "lado ímpar",
        "bairro": "Sé",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308"
    })
}
