use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::{
    config::FormConfig,
    services::{AddressLookup, PostalLookupClient, RegistrationSubmitter, SubmissionClient},
    ui::{BusyGuard, ControlKind, FormView},
};

/// Shared handle to the page model. Cloning shares the same view.
#[derive(Clone, Default)]
pub struct ViewContext {
    view: Rc<RefCell<FormView>>,
}

impl ViewContext {
    pub fn new(view: FormView) -> Self {
        Self {
            view: Rc::new(RefCell::new(view)),
        }
    }

    pub fn view(&self) -> Ref<'_, FormView> {
        self.view.borrow()
    }

    pub fn handle(&self) -> Rc<RefCell<FormView>> {
        Rc::clone(&self.view)
    }

    /// Run `f` with exclusive access to the view. Borrows never cross an
    /// await point.
    pub fn update<T>(&self, f: impl FnOnce(&mut FormView) -> T) -> T {
        f(&mut self.view.borrow_mut())
    }

    pub fn busy(&self, kind: ControlKind) -> Option<BusyGuard> {
        BusyGuard::acquire(&self.view, kind)
    }
}

/// The two outbound collaborators.
#[derive(Clone)]
pub struct ServiceContext {
    lookup: Rc<dyn AddressLookup>,
    submitter: Rc<dyn RegistrationSubmitter>,
}

impl ServiceContext {
    pub fn new(lookup: Rc<dyn AddressLookup>, submitter: Rc<dyn RegistrationSubmitter>) -> Self {
        Self { lookup, submitter }
    }

    /// awc-backed clients for the configured addresses.
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(
            Rc::new(PostalLookupClient::new(config)),
            Rc::new(SubmissionClient::new(config)),
        )
    }

    pub fn lookup(&self) -> &dyn AddressLookup {
        self.lookup.as_ref()
    }

    pub fn submitter(&self) -> &dyn RegistrationSubmitter {
        self.submitter.as_ref()
    }
}

pub struct ControllerContext {
    config: FormConfig,
    view: ViewContext,
    services: ServiceContext,
}

impl ControllerContext {
    pub fn new(config: FormConfig, services: ServiceContext) -> Self {
        Self {
            config,
            view: ViewContext::default(),
            services,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewContext {
        &self.view
    }

    pub fn services(&self) -> &ServiceContext {
        &self.services
    }
}
