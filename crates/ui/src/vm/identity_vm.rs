use quiz_core::model::Session;

/// Static identity text shown on the quiz screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityVm {
    pub signed_in_label: String,
    pub email: Option<String>,
    /// Who the results line talks about.
    pub subject: String,
}

#[must_use]
pub fn map_identity(session: Option<&Session>) -> IdentityVm {
    let Some(session) = session else {
        return IdentityVm {
            signed_in_label: "Not signed in".to_string(),
            email: None,
            subject: "You".to_string(),
        };
    };

    let signed_in_label = session
        .display_name()
        .map_or_else(|| "Signed in".to_string(), |name| format!("Signed in as {name}"));
    let email = session.email().map(str::to_string);
    let subject = email.clone().unwrap_or_else(|| "You".to_string());

    IdentityVm {
        signed_in_label,
        email,
        subject,
    }
}
