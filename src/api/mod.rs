pub mod controller_context;
pub mod form_controller;
pub mod state;

pub use controller_context::{ControllerContext, ServiceContext, ViewContext};
pub use form_controller::{EventReport, FormController, FormEvent, Key, LookupReport, SubmitReport};
pub use state::{LookupPhase, SubmitPhase};
