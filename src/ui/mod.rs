//! Headless model of the registration page.
//!
//! [`FormView`] holds everything the page shows: input values, per-field
//! styling and inline messages, the alert region, the two buttons, the
//! password visibility toggle and the focused input. Only the controller
//! writes to it.

pub mod alert;
pub mod control;

use std::collections::HashMap;

use derive_more::Display;

use crate::{
    functional::validation_engine::ValidationReport,
    models::{
        address::Address,
        registration::{Field, RegistrationForm},
    },
};

pub use alert::Alert;
pub use control::{BusyGuard, Control, ControlKind, Icon};

/// Validation styling of an input, as its CSS class.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldStyle {
    #[default]
    #[display(fmt = "")]
    Neutral,
    #[display(fmt = "is-valid")]
    Valid,
    #[display(fmt = "is-invalid")]
    Invalid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordVisibility {
    #[default]
    Masked,
    Plain,
}

impl PasswordVisibility {
    pub fn toggled(self) -> Self {
        match self {
            PasswordVisibility::Masked => PasswordVisibility::Plain,
            PasswordVisibility::Plain => PasswordVisibility::Masked,
        }
    }

    /// `type` attribute of the password input.
    pub fn input_type(self) -> &'static str {
        match self {
            PasswordVisibility::Masked => "password",
            PasswordVisibility::Plain => "text",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            PasswordVisibility::Masked => Icon::Eye,
            PasswordVisibility::Plain => Icon::EyeSlash,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormView {
    values: RegistrationForm,
    styles: HashMap<Field, FieldStyle>,
    errors: HashMap<Field, String>,
    alert: Alert,
    lookup_control: Control,
    submit_control: Control,
    password: PasswordVisibility,
    focused: Option<Field>,
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

impl FormView {
    pub fn new() -> Self {
        Self {
            values: RegistrationForm::default(),
            styles: HashMap::new(),
            errors: HashMap::new(),
            alert: Alert::Hidden,
            lookup_control: Control::new(ControlKind::Lookup),
            submit_control: Control::new(ControlKind::Submit),
            password: PasswordVisibility::Masked,
            focused: None,
        }
    }

    pub fn values(&self) -> &RegistrationForm {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn style(&self, field: Field) -> FieldStyle {
        self.styles.get(&field).copied().unwrap_or_default()
    }

    pub fn set_style(&mut self, field: Field, style: FieldStyle) {
        if style == FieldStyle::Neutral {
            self.styles.remove(&field);
        } else {
            self.styles.insert(field, style);
        }
    }

    /// Inline message under an input, if any.
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Style every evaluated field and place or remove its inline message.
    pub fn apply_report(&mut self, report: &ValidationReport) {
        for field_report in report.fields() {
            match field_report.message() {
                Some(message) => {
                    self.set_style(field_report.field, FieldStyle::Invalid);
                    self.errors.insert(field_report.field, message.to_string());
                }
                None => {
                    self.set_style(field_report.field, FieldStyle::Valid);
                    self.errors.remove(&field_report.field);
                }
            }
        }
    }

    /// Write looked-up address parts, mark them valid and move focus to the
    /// number input.
    pub fn fill_address(&mut self, address: &Address) {
        self.values.apply_address(address);
        for field in Field::ADDRESS {
            self.set_style(field, FieldStyle::Valid);
            self.errors.remove(&field);
        }
        self.focused = Some(Field::Number);
    }

    pub fn clear_address(&mut self) {
        self.values.clear_address();
        for field in Field::ADDRESS {
            self.set_style(field, FieldStyle::Neutral);
            self.errors.remove(&field);
        }
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.alert = Alert::Success(message.into());
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.alert = Alert::Error(message.into());
    }

    pub fn hide_alert(&mut self) {
        self.alert = Alert::Hidden;
    }

    pub fn control(&self, kind: ControlKind) -> &Control {
        match kind {
            ControlKind::Lookup => &self.lookup_control,
            ControlKind::Submit => &self.submit_control,
        }
    }

    pub(crate) fn control_mut(&mut self, kind: ControlKind) -> &mut Control {
        match kind {
            ControlKind::Lookup => &mut self.lookup_control,
            ControlKind::Submit => &mut self.submit_control,
        }
    }

    pub fn password_visibility(&self) -> PasswordVisibility {
        self.password
    }

    pub fn toggle_password(&mut self) -> PasswordVisibility {
        self.password = self.password.toggled();
        self.password
    }

    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    /// Back to a pristine form: empty values, no styling, no inline
    /// messages, no alert. Buttons and the password toggle are left alone.
    pub fn reset(&mut self) {
        self.values.clear();
        self.styles.clear();
        self.errors.clear();
        self.alert = Alert::Hidden;
        self.focused = None;
    }

    pub fn is_pristine(&self) -> bool {
        self.values == RegistrationForm::default()
            && self.styles.is_empty()
            && self.errors.is_empty()
            && !self.alert.is_visible()
    }
}
