use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants,
    functional::{
        validation_engine::{FieldReport, ValidationReport, Validator},
        validation_rules::{self, CEP_REGEX, DIGITS_REGEX, EMAIL_REGEX, NAME_REGEX, UF_REGEX},
    },
    models::registration::{Field, RegistrationForm, ValidatedForm},
};

/// Declarative constraints for one input. Each constraint carries the
/// message shown when it is the first one violated; evaluation order is
/// required, then minimum length, then pattern.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub required: Option<&'static str>,
    pub min_length: Option<(usize, &'static str)>,
    pub pattern: Option<(&'static Lazy<Regex>, &'static str)>,
}

impl FieldRule {
    fn validator(&self) -> Validator<str> {
        let mut validator = Validator::new();
        if let Some(message) = self.required {
            validator = validator.rule(validation_rules::required(self.field, message));
        }
        if let Some((min, message)) = self.min_length {
            validator = validator.rule(validation_rules::min_length(self.field, min, message));
        }
        if let Some((regex, message)) = self.pattern {
            validator = validator.rule(validation_rules::pattern(self.field, regex, message));
        }
        validator
    }
}

static FIELD_RULES: [FieldRule; 10] = [
    FieldRule {
        field: Field::FirstName,
        required: Some(constants::MESSAGE_NOME_REQUIRED),
        min_length: Some((3, constants::MESSAGE_NOME_MIN_LENGTH)),
        pattern: Some((&NAME_REGEX, constants::MESSAGE_NOME_PATTERN)),
    },
    FieldRule {
        field: Field::LastName,
        required: Some(constants::MESSAGE_SOBRENOME_REQUIRED),
        min_length: Some((3, constants::MESSAGE_SOBRENOME_MIN_LENGTH)),
        pattern: Some((&NAME_REGEX, constants::MESSAGE_SOBRENOME_PATTERN)),
    },
    FieldRule {
        field: Field::Email,
        required: Some(constants::MESSAGE_EMAIL_REQUIRED),
        min_length: None,
        pattern: Some((&EMAIL_REGEX, constants::MESSAGE_EMAIL_PATTERN)),
    },
    FieldRule {
        field: Field::Password,
        required: Some(constants::MESSAGE_SENHA_REQUIRED),
        min_length: Some((6, constants::MESSAGE_SENHA_MIN_LENGTH)),
        pattern: None,
    },
    FieldRule {
        field: Field::PostalCode,
        required: Some(constants::MESSAGE_CEP_REQUIRED),
        min_length: None,
        pattern: Some((&CEP_REGEX, constants::MESSAGE_CEP_PATTERN)),
    },
    FieldRule {
        field: Field::Street,
        required: Some(constants::MESSAGE_RUA_REQUIRED),
        min_length: Some((3, constants::MESSAGE_RUA_MIN_LENGTH)),
        pattern: None,
    },
    FieldRule {
        field: Field::Number,
        required: Some(constants::MESSAGE_NUMERO_REQUIRED),
        min_length: None,
        pattern: Some((&DIGITS_REGEX, constants::MESSAGE_NUMERO_PATTERN)),
    },
    FieldRule {
        field: Field::Neighborhood,
        required: Some(constants::MESSAGE_BAIRRO_REQUIRED),
        min_length: Some((2, constants::MESSAGE_BAIRRO_MIN_LENGTH)),
        pattern: None,
    },
    FieldRule {
        field: Field::City,
        required: Some(constants::MESSAGE_CIDADE_REQUIRED),
        min_length: Some((2, constants::MESSAGE_CIDADE_MIN_LENGTH)),
        pattern: None,
    },
    FieldRule {
        field: Field::State,
        required: Some(constants::MESSAGE_ESTADO_REQUIRED),
        min_length: None,
        pattern: Some((&UF_REGEX, constants::MESSAGE_ESTADO_PATTERN)),
    },
];

/// The fixed rule table, in form order. Complement has no rule.
pub fn field_rules() -> &'static [FieldRule] {
    &FIELD_RULES
}

/// Evaluates every ruled field of a [`RegistrationForm`]. Built once per
/// controller; evaluation never mutates the form and can be repeated.
pub struct RegistrationValidator {
    fields: Vec<(Field, Validator<str>)>,
}

impl RegistrationValidator {
    pub fn new() -> Self {
        Self::from_rules(field_rules())
    }

    pub fn from_rules(rules: &[FieldRule]) -> Self {
        Self {
            fields: rules
                .iter()
                .map(|rule| (rule.field, rule.validator()))
                .collect(),
        }
    }

    pub fn validate_field(&self, field: Field, value: &str) -> FieldReport {
        let error = self
            .fields
            .iter()
            .find(|(ruled, _)| *ruled == field)
            .and_then(|(_, validator)| validator.validate(value).err());
        FieldReport { field, error }
    }

    pub fn validate(&self, form: &RegistrationForm) -> ValidationReport {
        ValidationReport::new(
            self.fields
                .iter()
                .map(|(field, validator)| FieldReport {
                    field: *field,
                    error: validator.validate(form.get(*field)).err(),
                })
                .collect(),
        )
    }

    /// Promote the form to a [`ValidatedForm`], or hand back the report
    /// describing what is wrong with it.
    pub fn validate_form(
        &self,
        form: RegistrationForm,
    ) -> Result<(ValidatedForm, ValidationReport), ValidationReport> {
        let report = self.validate(&form);
        if report.is_valid() {
            Ok((ValidatedForm::new(form), report))
        } else {
            Err(report)
        }
    }
}

impl Default for RegistrationValidator {
    fn default() -> Self {
        Self::new()
    }
}
