use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::trivia::OpenTdbConfig;
use services::{AppConfig, AppServices, AuthService, Clock, QuizService, parse_batch_size};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(services::ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<services::ConfigError> for ArgsError {
    fn from(err: services::ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--trivia-url <url>] [--amount <1-50>] [--identity local|firebase]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --trivia-url https://opentdb.com/api.php");
    eprintln!("  --amount 10");
    eprintln!("  --identity local");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_TRIVIA_URL, QUIZ_BATCH_SIZE, QUIZ_IDENTITY");
    eprintln!("  QUIZ_DISPLAY_NAME, QUIZ_EMAIL                     (local identity)");
    eprintln!("  QUIZ_FIREBASE_API_KEY, QUIZ_FIREBASE_AUTH_URL,");
    eprintln!("  QUIZ_IDP_ID_TOKEN                                 (firebase identity)");
    eprintln!("  RUST_LOG                                          (default: info)");
}

/// Command-line flags layered over the environment.
fn parse_args(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Option<AppConfig>, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trivia-url" => {
                let value = require_value(args, "--trivia-url")?;
                config.trivia = OpenTdbConfig::from_url(&value)?;
            }
            "--amount" => {
                let value = require_value(args, "--amount")?;
                config.batch_size = parse_batch_size(&value)?;
            }
            "--identity" => {
                let value = require_value(args, "--identity")?;
                config.identity = value.parse()?;
            }
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Some(config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let env_config = AppConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let Some(config) = parse_args(env_config, &mut argv).inspect_err(|_| print_usage())? else {
        print_usage();
        return Ok(());
    };

    tracing::info!(
        trivia = %config.trivia.endpoint,
        batch_size = config.batch_size,
        identity = %config.identity,
        "starting quiz app"
    );

    let services = AppServices::new(&config, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top; turn it off.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz App")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
