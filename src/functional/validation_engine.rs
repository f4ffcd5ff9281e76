//! Validation Engine
//!
//! A fail-fast [`Validator`] chains rules for a single value in priority
//! order and reports the first violation. [`ValidationReport`] collects one
//! [`FieldReport`] per evaluated field so callers can both decide overall
//! validity and style each field individually.

use std::marker::PhantomData;

use crate::{
    functional::validation_rules::{ValidationError, ValidationResult},
    models::registration::Field,
};

/// Functional validation combinator
pub struct Validator<T: ?Sized> {
    rules: Vec<Box<dyn Fn(&T) -> ValidationResult<()> + Send + Sync>>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Validator<T> {
    /// Create a new empty validator
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add a validation rule; rules run in insertion order
    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> ValidationResult<()> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run the rules and stop at the first violation
    pub fn validate(&self, input: &T) -> ValidationResult<()> {
        for rule in &self.rules {
            rule(input)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: Field,
    pub error: Option<ValidationError>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_str())
    }
}

/// Per-field outcomes of one evaluation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    fields: Vec<FieldReport>,
}

impl ValidationReport {
    pub fn new(fields: Vec<FieldReport>) -> Self {
        Self { fields }
    }

    /// Conjunction of every field outcome.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldReport::is_valid)
    }

    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    pub fn get(&self, field: Field) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.field == field)
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldReport::message)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|report| !report.is_valid())
            .map(|report| report.field)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> + '_ {
        self.fields.iter().filter_map(|report| report.error.as_ref())
    }
}
