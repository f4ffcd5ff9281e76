//! Event dispatcher for the registration form.
//!
//! [`FormController`] owns the page model and both collaborators. Handlers
//! take `&self` so a lookup and a submission can be in flight at the same
//! time; each only ever holds the busy state of its own control. The
//! controller must run inside an actix-rt system, since the delayed reset
//! after an accepted registration is a spawned local task.

use std::cell::{Cell, Ref};

use itertools::Itertools;
use log::{debug, info, warn};
use tokio::time::sleep;

use crate::{
    api::{
        controller_context::{ControllerContext, ServiceContext, ViewContext},
        state::{LookupPhase, LookupSignal, PhaseReset, SubmitPhase, SubmitSignal},
    },
    config::FormConfig,
    constants,
    error::{FormError, ServiceResult},
    functional::validation_engine::ValidationReport,
    models::{
        address::{mask_postal_code, AddressLookupResult, PostalCode},
        registration::{validators::RegistrationValidator, Field},
    },
    services::SubmissionOutcome,
    ui::{ControlKind, FormView, PasswordVisibility},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Everything the page can report to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    /// Click on the lookup control.
    LookupRequested,
    KeyPressed { field: Field, key: Key },
    Input { field: Field, value: String },
    TogglePasswordVisibility,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitReport {
    /// Submit control disabled or a submission already running.
    Ignored,
    Invalid(ValidationReport),
    Completed(SubmissionOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupReport {
    Ignored,
    /// Refused locally; no request was made.
    Rejected(FormError),
    Completed(AddressLookupResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventReport {
    Submit(SubmitReport),
    Lookup(LookupReport),
    Updated,
    PasswordToggled(PasswordVisibility),
    Ignored,
}

pub struct FormController {
    context: ControllerContext,
    validator: RegistrationValidator,
    submit_phase: Cell<SubmitPhase>,
    lookup_phase: Cell<LookupPhase>,
}

impl FormController {
    /// Controller talking to the configured services over HTTP.
    pub fn new(config: FormConfig) -> Self {
        let services = ServiceContext::from_config(&config);
        Self::with_services(config, services)
    }

    pub fn from_env() -> ServiceResult<Self> {
        Ok(Self::new(FormConfig::from_env()?))
    }

    pub fn with_services(config: FormConfig, services: ServiceContext) -> Self {
        info!(
            "Registration form initialised (postal lookup: {}, backend: {})",
            config.postal_lookup_url(),
            config.registration_endpoint()
        );
        Self {
            context: ControllerContext::new(config, services),
            validator: RegistrationValidator::new(),
            submit_phase: Cell::new(SubmitPhase::Idle),
            lookup_phase: Cell::new(LookupPhase::Idle),
        }
    }

    pub fn config(&self) -> &FormConfig {
        self.context.config()
    }

    pub fn view(&self) -> Ref<'_, FormView> {
        self.context.view().view()
    }

    pub fn view_context(&self) -> &ViewContext {
        self.context.view()
    }

    pub fn submit_phase(&self) -> SubmitPhase {
        self.submit_phase.get()
    }

    pub fn lookup_phase(&self) -> LookupPhase {
        self.lookup_phase.get()
    }

    pub async fn dispatch(&self, event: FormEvent) -> EventReport {
        match event {
            FormEvent::Submit => EventReport::Submit(self.submit().await),
            FormEvent::LookupRequested => EventReport::Lookup(self.request_lookup().await),
            FormEvent::KeyPressed {
                field: Field::PostalCode,
                key: Key::Enter,
            } => EventReport::Lookup(self.request_lookup().await),
            FormEvent::KeyPressed { .. } => EventReport::Ignored,
            FormEvent::Input { field, value } => {
                self.input(field, &value);
                EventReport::Updated
            }
            FormEvent::TogglePasswordVisibility => {
                EventReport::PasswordToggled(self.toggle_password())
            }
        }
    }

    /// Store typed text. The postal code field is masked as `00000-000`.
    pub fn input(&self, field: Field, value: &str) {
        let value = match field {
            Field::PostalCode => mask_postal_code(value),
            _ => value.to_string(),
        };
        self.context.view().update(|view| view.set_value(field, value));
    }

    pub fn toggle_password(&self) -> PasswordVisibility {
        self.context.view().update(FormView::toggle_password)
    }

    /// Validate, and when every field passes, send the registration.
    pub async fn submit(&self) -> SubmitReport {
        let views = self.context.view();
        let disabled = views.view().control(ControlKind::Submit).is_disabled();
        if disabled || !self.submit_phase.get().is_idle() {
            debug!("Submit ignored: submission already in progress");
            return SubmitReport::Ignored;
        }
        self.advance_submit(SubmitSignal::Submit);
        let _phase = PhaseReset::new(&self.submit_phase);

        let form = views.view().values().clone();
        let validated = match self.validator.validate_form(form) {
            Ok((validated, report)) => {
                views.update(|view| view.apply_report(&report));
                self.advance_submit(SubmitSignal::ValidationPassed);
                validated
            }
            Err(report) => {
                views.update(|view| view.apply_report(&report));
                warn!(
                    "Registration form has invalid fields: {}",
                    report.invalid_fields().join(", ")
                );
                self.advance_submit(SubmitSignal::ValidationFailed);
                self.advance_submit(SubmitSignal::Settled);
                return SubmitReport::Invalid(report);
            }
        };

        let Some(busy) = views.busy(ControlKind::Submit) else {
            return SubmitReport::Ignored;
        };
        self.advance_submit(SubmitSignal::RequestSent);

        let outcome = self.context.services().submitter().submit(&validated).await;

        match &outcome {
            SubmissionOutcome::Accepted(user) => {
                views.update(|view| view.show_success(user.success_message()));
                self.advance_submit(SubmitSignal::Accepted);
                self.schedule_reset();
            }
            other => {
                views.update(|view| view.show_error(other.message()));
                self.advance_submit(SubmitSignal::Rejected);
            }
        }

        drop(busy);
        self.advance_submit(SubmitSignal::Settled);
        SubmitReport::Completed(outcome)
    }

    /// Look up the postal code currently in the form and fill the address.
    pub async fn request_lookup(&self) -> LookupReport {
        let views = self.context.view();
        let disabled = views.view().control(ControlKind::Lookup).is_disabled();
        if disabled || !self.lookup_phase.get().is_idle() {
            debug!("Lookup ignored: lookup already in progress");
            return LookupReport::Ignored;
        }

        let raw = views.view().value(Field::PostalCode).to_string();
        let postal_code = match PostalCode::parse(&raw) {
            Ok(postal_code) => postal_code,
            Err(err) => {
                debug!("Postal code {:?} rejected locally", raw);
                views.update(|view| view.show_error(err.user_message()));
                return LookupReport::Rejected(err);
            }
        };

        let Some(busy) = views.busy(ControlKind::Lookup) else {
            return LookupReport::Ignored;
        };
        self.advance_lookup(LookupSignal::Start);
        let _phase = PhaseReset::new(&self.lookup_phase);
        views.update(FormView::hide_alert);

        let result = self.context.services().lookup().lookup(&postal_code).await;

        match &result {
            AddressLookupResult::Found(address) => {
                views.update(|view| {
                    view.fill_address(address);
                    view.show_success(constants::MESSAGE_CEP_FOUND);
                });
                self.advance_lookup(LookupSignal::Found);
            }
            failure => {
                let message = failure
                    .clone()
                    .into_result()
                    .err()
                    .map(|e| e.user_message())
                    .unwrap_or_default();
                views.update(|view| {
                    view.clear_address();
                    view.show_error(message);
                });
                self.advance_lookup(match failure {
                    AddressLookupResult::NotFound => LookupSignal::NotFound,
                    _ => LookupSignal::TransportError,
                });
            }
        }

        drop(busy);
        self.advance_lookup(LookupSignal::Settled);
        LookupReport::Completed(result)
    }

    fn schedule_reset(&self) {
        let view = self.context.view().handle();
        let delay = self.config().reset_delay();
        debug!("Form reset scheduled in {:?}", delay);

        actix_rt::spawn(async move {
            sleep(delay).await;
            match view.try_borrow_mut() {
                Ok(mut view) => {
                    view.reset();
                    info!("Registration form reset");
                }
                Err(_) => warn!("Form reset skipped: view is borrowed"),
            }
        });
    }

    fn advance_submit(&self, signal: SubmitSignal) {
        let current = self.submit_phase.get();
        match current.on(signal) {
            Some(next) => {
                debug!("Submit phase {:?} -> {:?}", current, next);
                self.submit_phase.set(next);
            }
            None => warn!("Signal {:?} not valid in submit phase {:?}", signal, current),
        }
    }

    fn advance_lookup(&self, signal: LookupSignal) {
        let current = self.lookup_phase.get();
        match current.on(signal) {
            Some(next) => {
                debug!("Lookup phase {:?} -> {:?}", current, next);
                self.lookup_phase.set(next);
            }
            None => warn!("Signal {:?} not valid in lookup phase {:?}", signal, current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::{
        models::{address::Address, registration::ValidatedForm},
        services::{AddressLookup, RegistrationSubmitter},
        ui::{BusyGuard, FieldStyle, Icon},
    };

    /// When `hang` is set, the next call never answers.
    struct FakeLookup {
        result: AddressLookupResult,
        calls: Cell<usize>,
        hang: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl AddressLookup for FakeLookup {
        async fn lookup(&self, _postal_code: &PostalCode) -> AddressLookupResult {
            self.calls.set(self.calls.get() + 1);
            if self.hang.replace(false) {
                std::future::pending::<()>().await;
            }
            self.result.clone()
        }
    }

    struct FakeSubmitter {
        outcome: SubmissionOutcome,
        calls: Cell<usize>,
        hang: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl RegistrationSubmitter for FakeSubmitter {
        async fn submit(&self, _form: &ValidatedForm) -> SubmissionOutcome {
            self.calls.set(self.calls.get() + 1);
            if self.hang.replace(false) {
                std::future::pending::<()>().await;
            }
            self.outcome.clone()
        }
    }

    fn se() -> Address {
        Address {
            street: "Praça da Sé".into(),
            neighborhood: "Sé".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        }
    }

    fn accepted(id: i64) -> SubmissionOutcome {
        SubmissionOutcome::Accepted(serde_json::from_value(json!({ "id": id })).unwrap())
    }

    fn build(
        lookup: AddressLookupResult,
        outcome: SubmissionOutcome,
    ) -> (FormController, Rc<FakeLookup>, Rc<FakeSubmitter>) {
        let lookup = Rc::new(FakeLookup {
            result: lookup,
            calls: Cell::new(0),
            hang: Cell::new(false),
        });
        let submitter = Rc::new(FakeSubmitter {
            outcome,
            calls: Cell::new(0),
            hang: Cell::new(false),
        });
        let config = FormConfig::default().with_reset_delay(Duration::from_millis(20));
        let services = ServiceContext::new(lookup.clone(), submitter.clone());
        (FormController::with_services(config, services), lookup, submitter)
    }

    fn fill_valid_form(controller: &FormController) {
        for (field, value) in [
            (Field::FirstName, "Maria"),
            (Field::LastName, "Silva"),
            (Field::Email, "maria@example.com"),
            (Field::Password, "segredo1"),
            (Field::PostalCode, "01001000"),
            (Field::Street, "Praça da Sé"),
            (Field::Number, "100"),
            (Field::Neighborhood, "Sé"),
            (Field::City, "São Paulo"),
            (Field::State, "SP"),
        ] {
            controller.input(field, value);
        }
    }

    #[actix_rt::test]
    async fn invalid_form_is_never_sent() {
        let (controller, _, submitter) = build(AddressLookupResult::NotFound, accepted(1));
        controller.input(Field::FirstName, "Maria");
        controller.input(Field::Email, "maria@");

        let report = controller.submit().await;

        let report = match report {
            SubmitReport::Invalid(report) => report,
            other => panic!("expected an invalid report, got {:?}", other),
        };
        assert!(!report.is_valid());
        assert_eq!(submitter.calls.get(), 0);
        assert_eq!(controller.submit_phase(), SubmitPhase::Idle);

        let view = controller.view();
        assert_eq!(view.style(Field::FirstName), FieldStyle::Valid);
        assert_eq!(view.style(Field::Email), FieldStyle::Invalid);
        assert_eq!(view.error(Field::Email), Some(constants::MESSAGE_EMAIL_PATTERN));
        assert!(!view.alert().is_visible());
    }

    #[actix_rt::test]
    async fn accepted_submission_shows_id_then_resets() {
        let (controller, _, submitter) = build(AddressLookupResult::NotFound, accepted(42));
        fill_valid_form(&controller);

        let report = controller.submit().await;
        assert_eq!(report, SubmitReport::Completed(accepted(42)));
        assert_eq!(submitter.calls.get(), 1);
        {
            let view = controller.view();
            assert!(view.alert().is_success());
            assert!(view.alert().message().unwrap_or_default().contains("42"));
            assert!(!view.control(ControlKind::Submit).is_disabled());
            assert_eq!(view.control(ControlKind::Submit).icon(), Icon::UserPlus);
        }

        sleep(Duration::from_millis(80)).await;
        let view = controller.view();
        assert!(view.is_pristine());
        assert_eq!(view.value(Field::FirstName), "");
    }

    #[actix_rt::test]
    async fn rejected_submission_keeps_the_form() {
        let (controller, _, _) = build(
            AddressLookupResult::NotFound,
            SubmissionOutcome::ValidationRejected("invalid".into()),
        );
        fill_valid_form(&controller);

        controller.submit().await;
        sleep(Duration::from_millis(40)).await;

        let view = controller.view();
        assert_eq!(view.alert().message(), Some("invalid"));
        assert!(view.alert().is_error());
        assert_eq!(view.value(Field::FirstName), "Maria");
        assert_eq!(controller.submit_phase(), SubmitPhase::Idle);
    }

    #[actix_rt::test]
    async fn submit_is_ignored_while_control_is_busy() {
        let (controller, _, submitter) = build(AddressLookupResult::NotFound, accepted(1));
        fill_valid_form(&controller);

        let busy = BusyGuard::acquire(&controller.view_context().handle(), ControlKind::Submit);
        assert_eq!(
            controller.dispatch(FormEvent::Submit).await,
            EventReport::Submit(SubmitReport::Ignored)
        );
        drop(busy);

        assert_eq!(submitter.calls.get(), 0);
        assert!(controller.submit().await != SubmitReport::Ignored);
    }

    #[actix_rt::test]
    async fn short_postal_code_is_refused_without_a_request() {
        let (controller, lookup, _) = build(AddressLookupResult::Found(se()), accepted(1));
        controller.input(Field::PostalCode, "0100");

        let report = controller.request_lookup().await;

        assert!(matches!(report, LookupReport::Rejected(FormError::LocalValidation { .. })));
        assert_eq!(lookup.calls.get(), 0);
        assert_eq!(
            controller.view().alert().message(),
            Some(constants::MESSAGE_CEP_INVALID)
        );
    }

    #[actix_rt::test]
    async fn found_address_fills_fields_and_focuses_number() {
        let (controller, lookup, _) = build(AddressLookupResult::Found(se()), accepted(1));
        controller.input(Field::PostalCode, "01001000");
        assert_eq!(controller.view().value(Field::PostalCode), "01001-000");

        let report = controller.request_lookup().await;

        assert_eq!(report, LookupReport::Completed(AddressLookupResult::Found(se())));
        assert_eq!(lookup.calls.get(), 1);
        assert_eq!(controller.lookup_phase(), LookupPhase::Idle);

        let view = controller.view();
        assert_eq!(view.value(Field::Street), "Praça da Sé");
        assert_eq!(view.value(Field::State), "SP");
        assert_eq!(view.style(Field::City), FieldStyle::Valid);
        assert_eq!(view.focused(), Some(Field::Number));
        assert_eq!(view.alert().message(), Some(constants::MESSAGE_CEP_FOUND));
        assert_eq!(view.control(ControlKind::Lookup).icon(), Icon::Search);
    }

    #[actix_rt::test]
    async fn failed_lookups_clear_the_address() {
        for (result, message) in [
            (AddressLookupResult::NotFound, constants::MESSAGE_CEP_NOT_FOUND),
            (
                AddressLookupResult::TransportError("timed out".into()),
                constants::MESSAGE_CEP_TRANSPORT,
            ),
        ] {
            let (controller, _, _) = build(result, accepted(1));
            controller.input(Field::Street, "Rua Antiga");
            controller.input(Field::PostalCode, "99999999");

            controller
                .dispatch(FormEvent::KeyPressed {
                    field: Field::PostalCode,
                    key: Key::Enter,
                })
                .await;

            let view = controller.view();
            assert_eq!(view.value(Field::Street), "");
            assert_eq!(view.style(Field::Street), FieldStyle::Neutral);
            assert!(view.alert().is_error());
            assert_eq!(view.alert().message(), Some(message));
            assert!(!view.control(ControlKind::Lookup).is_disabled());
        }
    }

    #[actix_rt::test]
    async fn other_keys_do_not_trigger_lookup() {
        let (controller, lookup, _) = build(AddressLookupResult::Found(se()), accepted(1));
        controller.input(Field::PostalCode, "01001000");

        for event in [
            FormEvent::KeyPressed { field: Field::PostalCode, key: Key::Other },
            FormEvent::KeyPressed { field: Field::Number, key: Key::Enter },
        ] {
            assert_eq!(controller.dispatch(event).await, EventReport::Ignored);
        }
        assert_eq!(lookup.calls.get(), 0);
    }

    #[actix_rt::test]
    async fn password_toggle_leaves_the_value_alone() {
        let (controller, _, _) = build(AddressLookupResult::NotFound, accepted(1));
        controller
            .dispatch(FormEvent::Input {
                field: Field::Password,
                value: "segredo1".into(),
            })
            .await;

        let report = controller.dispatch(FormEvent::TogglePasswordVisibility).await;

        assert_eq!(report, EventReport::PasswordToggled(PasswordVisibility::Plain));
        assert_eq!(controller.view().value(Field::Password), "segredo1");
        assert_eq!(controller.toggle_password(), PasswordVisibility::Masked);
    }

    #[actix_rt::test]
    async fn abandoned_submission_leaves_the_form_usable() {
        let (controller, _, submitter) = build(AddressLookupResult::NotFound, accepted(9));
        fill_valid_form(&controller);
        submitter.hang.set(true);

        let abandoned = tokio::time::timeout(Duration::from_millis(30), controller.submit()).await;

        assert!(abandoned.is_err());
        assert_eq!(controller.submit_phase(), SubmitPhase::Idle);
        assert!(!controller.view().control(ControlKind::Submit).is_disabled());

        let retry = controller.submit().await;
        assert_eq!(retry, SubmitReport::Completed(accepted(9)));
        assert_eq!(submitter.calls.get(), 2);
    }

    #[actix_rt::test]
    async fn abandoned_lookup_leaves_the_form_usable() {
        let (controller, lookup, _) = build(AddressLookupResult::Found(se()), accepted(1));
        controller.input(Field::PostalCode, "01001000");
        lookup.hang.set(true);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(30), controller.request_lookup()).await;

        assert!(abandoned.is_err());
        assert_eq!(controller.lookup_phase(), LookupPhase::Idle);
        assert!(!controller.view().control(ControlKind::Lookup).is_disabled());

        let retry = controller.request_lookup().await;
        assert_eq!(retry, LookupReport::Completed(AddressLookupResult::Found(se())));
        assert_eq!(lookup.calls.get(), 2);
    }
}
