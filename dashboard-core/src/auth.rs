use std::{fmt, sync::Arc};
use tracing::{info, warn};

use crate::{DashboardError, Notification, SessionStore, WeatherBackend};

const EMPTY_FIELDS_MESSAGE: &str = "Please fill in all fields";
const AUTH_FAILED_MESSAGE: &str = "Authentication failed";
const BUSY_MESSAGE: &str = "Please wait for the current request to finish";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    Login,
    Register,
}

impl AuthIntent {
    pub fn label(&self) -> &'static str {
        match self {
            AuthIntent::Login => "Sign In",
            AuthIntent::Register => "Sign Up",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            AuthIntent::Login => "Sign In",
            AuthIntent::Register => "Create Account",
        }
    }
}

/// Username/password form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn with_username(self, username: impl Into<String>) -> Self {
        Self { username: username.into(), ..self }
    }

    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self { password: password.into(), ..self }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(DashboardError::Validation(EMPTY_FIELDS_MESSAGE.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Logged in; the token is already in the session store.
    Authenticated,
    /// Account created. The user still has to log in.
    Registered,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthReport {
    pub outcome: AuthOutcome,
    pub notification: Notification,
}

impl AuthReport {
    fn rejected(err: &DashboardError) -> Self {
        Self {
            outcome: AuthOutcome::Rejected,
            notification: Notification::from_error(err, AUTH_FAILED_MESSAGE),
        }
    }
}

/// Submits login and registration forms and stores the issued token.
#[derive(Debug)]
pub struct AuthGateway {
    backend: Arc<dyn WeatherBackend>,
    session: Arc<dyn SessionStore>,
    submitting: bool,
}

impl AuthGateway {
    pub fn new(backend: Arc<dyn WeatherBackend>, session: Arc<dyn SessionStore>) -> Self {
        Self { backend, session, submitting: false }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Label of the submit control; it reads "Please wait..." while a request is out.
    pub fn submit_label(&self, intent: AuthIntent) -> &'static str {
        if self.submitting { "Please wait..." } else { intent.submit_label() }
    }

    /// Validates and submits in one go.
    pub async fn submit(&mut self, intent: AuthIntent, form: &AuthForm) -> AuthReport {
        if let Err(report) = self.begin(form) {
            return report;
        }

        let result = self.send(intent, form).await;
        self.finish(intent, result)
    }

    /// Validates the form and marks a submission as in progress.
    ///
    /// While submitting, further submissions are refused and `submit_label`
    /// reads "Please wait...". Every successful `begin` must be followed by
    /// `finish`, or by `cancel` if the request is abandoned.
    pub fn begin(&mut self, form: &AuthForm) -> Result<(), AuthReport> {
        if self.submitting {
            return Err(AuthReport::rejected(&DashboardError::Validation(
                BUSY_MESSAGE.to_string(),
            )));
        }

        form.validate().map_err(|err| AuthReport::rejected(&err))?;
        self.submitting = true;
        Ok(())
    }

    /// Clears the in-progress flag and turns the request result into a report.
    pub fn finish(
        &mut self,
        intent: AuthIntent,
        result: Result<AuthReport, DashboardError>,
    ) -> AuthReport {
        self.submitting = false;

        match result {
            Ok(report) => report,
            Err(err) => {
                warn!(?intent, error = %err, "authentication request failed");
                AuthReport::rejected(&err)
            }
        }
    }

    /// Drops an in-progress submission without a result.
    pub fn cancel(&mut self) {
        self.submitting = false;
    }

    /// Posts the credentials and, for a login, stores the issued token.
    pub async fn send(&self, intent: AuthIntent, form: &AuthForm) -> Result<AuthReport, DashboardError> {
        match intent {
            AuthIntent::Login => {
                let token = self.backend.login(&form.username, &form.password).await?;
                self.session.store_token(&token.access_token).map_err(DashboardError::Session)?;
                info!(username = %form.username, "logged in");

                Ok(AuthReport {
                    outcome: AuthOutcome::Authenticated,
                    notification: Notification::success("Logged in successfully!"),
                })
            }
            AuthIntent::Register => {
                self.backend.register(&form.username, &form.password).await?;
                info!(username = %form.username, "account registered");

                Ok(AuthReport {
                    outcome: AuthOutcome::Registered,
                    notification: Notification::success("Account created! Please log in."),
                })
            }
        }
    }
}
