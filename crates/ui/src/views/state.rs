#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    SignInFailed,
    LoadFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::SignInFailed => "Sign-in did not complete. Please try again.",
            ViewError::LoadFailed => "Could not load quiz questions.",
        }
    }
}
