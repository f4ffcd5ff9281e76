/// The two alert regions of the form. Modelled as one value so that at most
/// one of them can ever be visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Alert {
    #[default]
    Hidden,
    Success(String),
    Error(String),
}

impl Alert {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Alert::Hidden)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Alert::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Alert::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Alert::Hidden => None,
            Alert::Success(message) | Alert::Error(message) => Some(message),
        }
    }
}
