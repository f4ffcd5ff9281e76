use std::cell::RefCell;
use std::rc::Rc;

use derive_more::Display;
use log::error;

use crate::ui::FormView;

/// Icon classes shown on the form's buttons.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    #[display(fmt = "fa-search")]
    Search,
    #[display(fmt = "fa-user-plus")]
    UserPlus,
    #[display(fmt = "fa-spinner fa-spin")]
    Spinner,
    #[display(fmt = "fa-eye")]
    Eye,
    #[display(fmt = "fa-eye-slash")]
    EyeSlash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Triggers the postal code lookup.
    Lookup,
    Submit,
}

impl ControlKind {
    pub fn idle_icon(self) -> Icon {
        match self {
            ControlKind::Lookup => Icon::Search,
            ControlKind::Submit => Icon::UserPlus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    kind: ControlKind,
    disabled: bool,
    icon: Icon,
}

impl Control {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            disabled: false,
            icon: kind.idle_icon(),
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_busy(&self) -> bool {
        self.disabled && self.icon == Icon::Spinner
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    fn mark_busy(&mut self) {
        self.disabled = true;
        self.icon = Icon::Spinner;
    }

    fn restore(&mut self) {
        self.disabled = false;
        self.icon = self.kind.idle_icon();
    }
}

/// Busy state of one control for the lifetime of the guard: disabled with a
/// spinner on acquisition, restored on drop, whichever way the owning scope
/// is left.
pub struct BusyGuard {
    view: Rc<RefCell<FormView>>,
    kind: ControlKind,
}

impl BusyGuard {
    /// `None` when the control is already disabled.
    pub fn acquire(view: &Rc<RefCell<FormView>>, kind: ControlKind) -> Option<Self> {
        {
            let mut form = view.borrow_mut();
            let control = form.control_mut(kind);
            if control.is_disabled() {
                return None;
            }
            control.mark_busy();
        }

        Some(Self {
            view: Rc::clone(view),
            kind,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        match self.view.try_borrow_mut() {
            Ok(mut form) => form.control_mut(self.kind).restore(),
            Err(_) => error!("Could not restore {:?} control: view is borrowed", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_control_on_drop() {
        let view = Rc::new(RefCell::new(FormView::new()));

        {
            let _guard = BusyGuard::acquire(&view, ControlKind::Lookup).unwrap();
            let form = view.borrow();
            assert!(form.control(ControlKind::Lookup).is_busy());
            assert_eq!(form.control(ControlKind::Lookup).icon().to_string(), "fa-spinner fa-spin");
            assert!(!form.control(ControlKind::Submit).is_disabled());
        }

        let form = view.borrow();
        assert!(!form.control(ControlKind::Lookup).is_disabled());
        assert_eq!(form.control(ControlKind::Lookup).icon(), Icon::Search);
    }

    #[test]
    fn second_acquisition_is_refused() {
        let view = Rc::new(RefCell::new(FormView::new()));
        let first = BusyGuard::acquire(&view, ControlKind::Submit);
        assert!(first.is_some());
        assert!(BusyGuard::acquire(&view, ControlKind::Submit).is_none());
        // the lookup control is independent
        assert!(BusyGuard::acquire(&view, ControlKind::Lookup).is_some());

        drop(first);
        assert_eq!(view.borrow().control(ControlKind::Submit).icon(), Icon::UserPlus);
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn bail_out(view: &Rc<RefCell<FormView>>) -> Result<(), &'static str> {
            let _guard = BusyGuard::acquire(view, ControlKind::Submit).ok_or("busy")?;
            Err("request failed")
        }

        let view = Rc::new(RefCell::new(FormView::new()));
        assert!(bail_out(&view).is_err());
        assert!(!view.borrow().control(ControlKind::Submit).is_disabled());
    }
}
