use anyhow::Result;
use dashboard_core::{AuthForm, AuthIntent};
use inquire::{InquireError, Password, Select, Text};

/// Turns a cancelled prompt (Esc / Ctrl-C) into `None`.
pub fn cancellable<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fills in whatever the command line did not provide.
pub fn auth_form(
    intent: AuthIntent,
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<AuthForm>> {
    let username = match username {
        Some(u) => u,
        None => match cancellable(Text::new("Username:").prompt())? {
            Some(u) => u,
            None => return Ok(None),
        },
    };

    let password = match password {
        Some(p) => p,
        None => {
            // Registration asks twice.
            let prompt = Password::new("Password:");
            let prompt = match intent {
                AuthIntent::Login => prompt.without_confirmation(),
                AuthIntent::Register => prompt,
            };
            match cancellable(prompt.prompt())? {
                Some(p) => p,
                None => return Ok(None),
            }
        }
    };

    Ok(Some(AuthForm::new(username, password)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChoice {
    Intent(AuthIntent),
    Quit,
}

impl std::fmt::Display for AuthChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthChoice::Intent(intent) => f.write_str(intent.label()),
            AuthChoice::Quit => f.write_str("Quit"),
        }
    }
}

pub fn auth_menu() -> Result<AuthChoice> {
    let options = vec![
        AuthChoice::Intent(AuthIntent::Login),
        AuthChoice::Intent(AuthIntent::Register),
        AuthChoice::Quit,
    ];

    Ok(cancellable(Select::new("Weather App", options).prompt())?.unwrap_or(AuthChoice::Quit))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardInput {
    Search(String),
    Logout,
    Quit,
}

impl DashboardInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":logout" => DashboardInput::Logout,
            ":quit" | ":q" => DashboardInput::Quit,
            other => DashboardInput::Search(other.to_string()),
        }
    }
}

pub fn dashboard_input() -> Result<DashboardInput> {
    let line = cancellable(
        Text::new("City:")
            .with_placeholder("Enter city name...")
            .with_help_message(":logout to sign out, :quit to exit")
            .prompt(),
    )?;

    Ok(line.map(|l| DashboardInput::parse(&l)).unwrap_or(DashboardInput::Quit))
}
