use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{QuestionSourceKind, QuizLoopService, TriviaConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trivia_core::model::{CategoryId, Difficulty, QueryError, QuestionKind, QuestionQuery};
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "info,services=debug";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAmount { raw: String },
    InvalidCategory { raw: String },
    Query(QueryError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAmount { raw } => write!(f, "invalid --amount value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw}"),
            ArgsError::Query(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<QueryError> for ArgsError {
    fn from(err: QueryError) -> Self {
        ArgsError::Query(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    fixture_mode: bool,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn fixture_mode(&self) -> bool {
        self.fixture_mode
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    fixture: bool,
    query: QuestionQuery,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  trivia-quiz [--fixture] [--amount <1-50>] [--difficulty <easy|medium|hard|any>]");
    eprintln!("              [--type <multiple|boolean|any>] [--category <id|any>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --amount 10 --difficulty medium");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_FIXTURE, TRIVIA_AMOUNT, TRIVIA_DIFFICULTY, TRIVIA_TYPE, TRIVIA_CATEGORY");
    eprintln!("  TRIVIA_API_URL, TRIVIA_TOKEN_URL, TRIVIA_CATEGORY_URL");
    eprintln!("  TRIVIA_MAX_RETRIES, TRIVIA_BACKOFF_MS, TRIVIA_COOLDOWN_MS, RUST_LOG");
}

impl Args {
    /// Environment first, then flags on top.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut fixture = env("TRIVIA_FIXTURE").is_some_and(|value| is_truthy(&value));
        let mut amount = env("TRIVIA_AMOUNT");
        let mut difficulty = env("TRIVIA_DIFFICULTY");
        let mut kind = env("TRIVIA_TYPE");
        let mut category = env("TRIVIA_CATEGORY");

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixture" => fixture = true,
                "--amount" => amount = Some(require_value(args, "--amount")?),
                "--difficulty" => difficulty = Some(require_value(args, "--difficulty")?),
                "--type" => kind = Some(require_value(args, "--type")?),
                "--category" => category = Some(require_value(args, "--category")?),
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let defaults = QuestionQuery::default();
        let amount = match amount {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ArgsError::InvalidAmount { raw: raw.clone() })?,
            None => defaults.amount(),
        };
        let query = QuestionQuery::new(amount)?
            .with_difficulty(parse_filter::<Difficulty>(difficulty, defaults.difficulty())?)
            .with_kind(parse_filter::<QuestionKind>(kind, defaults.kind())?)
            .with_category(parse_category(category)?);

        Ok(Parsed::Run(Self { fixture, query }))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_filter<T>(raw: Option<String>, default: Option<T>) -> Result<Option<T>, ArgsError>
where
    T: std::str::FromStr<Err = QueryError>,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some("any") => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

fn parse_category(raw: Option<String>) -> Result<Option<CategoryId>, ArgsError> {
    match raw.as_deref().map(str::trim) {
        None | Some("" | "any") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ArgsError::InvalidCategory {
                raw: value.to_string(),
            }),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    let source_kind = if args.fixture {
        QuestionSourceKind::Fixture
    } else {
        QuestionSourceKind::Live(TriviaConfig::from_env())
    };
    info!(
        fixture = source_kind.is_fixture(),
        amount = args.query.amount(),
        "starting trivia quiz"
    );
    let fixture_mode = source_kind.is_fixture();
    let source = source_kind.build()?;
    let quiz_loop = Arc::new(QuizLoopService::new(source).with_default_query(args.query));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop,
        fixture_mode,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia Quiz")
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
