use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dashboard_core::{
    AppRoot, AppState, AuthForm, AuthGateway, AuthIntent, AuthReport, Config,
    DashboardController, FileSessionStore, Notification, SessionStore, WeatherBackend,
    backend_from_config,
};
use inquire::Text;
use std::sync::Arc;
use tracing::debug;

use crate::prompt::{self, AuthChoice, DashboardInput};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Backend URL, overriding the configured one for this run.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend URL and the default city.
    Configure,

    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account.
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session.
    Logout,

    /// Show weather for one city and exit.
    Show {
        /// City name.
        city: String,
    },

    /// Interactive dashboard: sign in if needed, then search cities.
    Dashboard,
}

/// Shared services for one run.
struct Services {
    config: Config,
    backend: Arc<dyn WeatherBackend>,
    session: Arc<dyn SessionStore>,
}

impl Services {
    fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            backend: backend_from_config(&config)?,
            session: Arc::new(FileSessionStore::open_default()?),
            config,
        })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(url) = &self.api_url {
            config.set_api_base_url(url)?;
        }
        debug!(api = %config.api_base_url, city = %config.default_city, "configuration loaded");

        match self.command {
            Command::Configure => configure(config),
            Command::Login { username, password } => {
                let services = Services::new(config)?;
                authenticate(&services, AuthIntent::Login, username, password).await
            }
            Command::Register { username, password } => {
                let services = Services::new(config)?;
                authenticate(&services, AuthIntent::Register, username, password).await
            }
            Command::Logout => {
                FileSessionStore::open_default()?.clear()?;
                print_notification(&Notification::logged_out());
                Ok(())
            }
            Command::Show { city } => show(&Services::new(config)?, &city).await,
            Command::Dashboard => interactive(&Services::new(config)?).await,
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let url = Text::new("Backend URL:").with_default(&config.api_base_url).prompt()?;
    config.set_api_base_url(&url)?;

    let city = Text::new("Default city:").with_default(&config.default_city).prompt()?;
    config.set_default_city(&city)?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn authenticate(
    ctx: &Services,
    intent: AuthIntent,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let Some(form) = prompt::auth_form(intent, username, password)? else {
        return Ok(());
    };

    let mut gateway = AuthGateway::new(ctx.backend.clone(), ctx.session.clone());
    let report = submit_with_progress(&mut gateway, intent, &form).await;

    fail_on_error(&report.notification)
}

/// Submits the form, printing the busy label while the request is out.
async fn submit_with_progress(
    gateway: &mut AuthGateway,
    intent: AuthIntent,
    form: &AuthForm,
) -> AuthReport {
    if let Err(report) = gateway.begin(form) {
        return report;
    }

    println!("{}", gateway.submit_label(intent));
    let result = gateway.send(intent, form).await;
    gateway.finish(intent, result)
}

async fn show(ctx: &Services, city: &str) -> anyhow::Result<()> {
    if !ctx.session.has_token()? {
        return Err(anyhow!("Not logged in. Hint: run `weather-dashboard login` first."));
    }

    let mut dashboard =
        DashboardController::new(ctx.backend.clone(), ctx.session.clone(), &ctx.config.default_city);
    let notification = dashboard.search(city).await;
    fail_on_error(&notification)?;

    println!();
    println!("{}", dashboard.render());
    Ok(())
}

async fn interactive(ctx: &Services) -> anyhow::Result<()> {
    let mut root = AppRoot::start(ctx.session.as_ref()).context("Failed to read session")?;

    loop {
        match root.state() {
            AppState::Unauthenticated => {
                let intent = match prompt::auth_menu()? {
                    AuthChoice::Intent(intent) => intent,
                    AuthChoice::Quit => return Ok(()),
                };

                let Some(form) = prompt::auth_form(intent, None, None)? else {
                    continue;
                };

                let mut gateway = AuthGateway::new(ctx.backend.clone(), ctx.session.clone());
                let report = submit_with_progress(&mut gateway, intent, &form).await;
                print_notification(&report.notification);
                root.on_auth(&report.outcome);
            }
            AppState::Authenticated => match run_dashboard(ctx).await? {
                DashboardExit::Logout => root.on_logout(),
                DashboardExit::Quit => return Ok(()),
            },
        }
    }
}

enum DashboardExit {
    Logout,
    Quit,
}

async fn run_dashboard(ctx: &Services) -> anyhow::Result<DashboardExit> {
    let mut dashboard =
        DashboardController::new(ctx.backend.clone(), ctx.session.clone(), &ctx.config.default_city);

    let notification = dashboard.mount().await;
    print_notification(&notification);
    println!("{}\n", dashboard.render());

    loop {
        match prompt::dashboard_input()? {
            DashboardInput::Search(city) => {
                dashboard.set_search_text(city);
                let notification = dashboard.submit_search().await;
                print_notification(&notification);
                println!("{}\n", dashboard.render());
            }
            DashboardInput::Logout => match dashboard.logout() {
                Ok(notification) => {
                    print_notification(&notification);
                    return Ok(DashboardExit::Logout);
                }
                Err(err) => {
                    print_notification(&Notification::from_error(&err, "Logout failed"));
                }
            },
            DashboardInput::Quit => return Ok(DashboardExit::Quit),
        }
    }
}

fn print_notification(notification: &Notification) {
    if notification.is_error() {
        eprintln!("{notification}");
    } else {
        println!("{notification}");
    }
}

/// Prints successes; turns an error notification into a failing exit.
fn fail_on_error(notification: &Notification) -> anyhow::Result<()> {
    if notification.is_error() {
        return Err(anyhow!("{}", notification.description));
    }

    print_notification(notification);
    Ok(())
}
