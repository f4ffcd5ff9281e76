//! Phase transitions for the two independent workflows of the form.
//!
//! Each phase type exposes a pure `on(signal)` function; an unexpected
//! signal for the current phase yields `None` and the caller keeps its
//! phase.

use std::cell::Cell;
use std::fmt::Debug;

use log::warn;

/// Submission workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Valid,
    Submitting,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSignal {
    Submit,
    ValidationFailed,
    ValidationPassed,
    RequestSent,
    Accepted,
    Rejected,
    /// Terminal phases hand control back to `Idle`.
    Settled,
}

impl SubmitPhase {
    pub fn on(self, signal: SubmitSignal) -> Option<SubmitPhase> {
        use SubmitPhase as P;
        use SubmitSignal as S;

        match (self, signal) {
            (P::Idle, S::Submit) => Some(P::Validating),
            (P::Validating, S::ValidationFailed) => Some(P::Invalid),
            (P::Validating, S::ValidationPassed) => Some(P::Valid),
            (P::Valid, S::RequestSent) => Some(P::Submitting),
            (P::Submitting, S::Accepted) => Some(P::Accepted),
            (P::Submitting, S::Rejected) => Some(P::Rejected),
            (P::Invalid | P::Accepted | P::Rejected, S::Settled) => Some(P::Idle),
            _ => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == SubmitPhase::Idle
    }
}

/// Postal code lookup workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPhase {
    #[default]
    Idle,
    LookingUp,
    Found,
    NotFound,
    TransportError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSignal {
    Start,
    Found,
    NotFound,
    TransportError,
    Settled,
}

impl LookupPhase {
    pub fn on(self, signal: LookupSignal) -> Option<LookupPhase> {
        use LookupPhase as P;
        use LookupSignal as S;

        match (self, signal) {
            (P::Idle, S::Start) => Some(P::LookingUp),
            (P::LookingUp, S::Found) => Some(P::Found),
            (P::LookingUp, S::NotFound) => Some(P::NotFound),
            (P::LookingUp, S::TransportError) => Some(P::TransportError),
            (P::Found | P::NotFound | P::TransportError, S::Settled) => Some(P::Idle),
            _ => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == LookupPhase::Idle
    }
}

/// Puts a workflow back to its idle phase when dropped. Handlers hold one
/// for as long as they run, so a handler future dropped mid-request still
/// leaves the form ready for another attempt.
pub(crate) struct PhaseReset<'a, P>
where
    P: Copy + Default + PartialEq + Debug,
{
    phase: &'a Cell<P>,
}

impl<'a, P> PhaseReset<'a, P>
where
    P: Copy + Default + PartialEq + Debug,
{
    pub(crate) fn new(phase: &'a Cell<P>) -> Self {
        Self { phase }
    }
}

impl<P> Drop for PhaseReset<'_, P>
where
    P: Copy + Default + PartialEq + Debug,
{
    fn drop(&mut self) {
        let current = self.phase.get();
        if current != P::default() {
            warn!("Workflow abandoned in phase {:?}", current);
            self.phase.set(P::default());
        }
    }
}
