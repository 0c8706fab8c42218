use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use practice_core::model::{ExerciseKind, Problem, VisualAid};
use practice_core::{Catalog, Clock};
use services::{AnswerOutcome, SessionLoopService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidExercise { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidExercise { raw } => write!(f, "invalid --exercise value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--exercise <kind>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:practice.sqlite3");
    eprintln!("  --exercise asked interactively");
    eprintln!();
    eprintln!("Exercise kinds:");
    for kind in ExerciseKind::ALL {
        eprintln!("  {:<24} {}", kind.as_str(), kind.label());
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRACTICE_DB_URL, PRACTICE_EXERCISE");
}

struct Args {
    db_url: String,
    exercise: Option<ExerciseKind>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PRACTICE_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://practice.sqlite3".into(), normalize_sqlite_url);
        let mut exercise = std::env::var("PRACTICE_EXERCISE")
            .ok()
            .and_then(|value| value.parse::<ExerciseKind>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--exercise" => {
                    let value = require_value(args, "--exercise")?;
                    let parsed = value
                        .parse::<ExerciseKind>()
                        .map_err(|_| ArgsError::InvalidExercise { raw: value.clone() })?;
                    exercise = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, exercise })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn print_problem(problem: &Problem) {
    println!();
    println!("{}", problem.question());
    if let Some(VisualAid::Choices(options)) = problem.visual() {
        for (index, option) in options.iter().enumerate() {
            println!("  {}) {option}", index + 1);
        }
    }
    print!("> ");
    let _ = io::stdout().flush();
}

fn pick_exercise(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<ExerciseKind> {
    loop {
        println!("Pick an exercise:");
        for (index, kind) in ExerciseKind::ALL.iter().enumerate() {
            println!("  {}) {}", index + 1, kind.label());
        }
        print!("> ");
        let _ = io::stdout().flush();

        let Some(line) = lines.next() else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        };
        let input = line?;
        if let Ok(choice) = input.trim().parse::<usize>()
            && (1..=ExerciseKind::ALL.len()).contains(&choice)
        {
            return Ok(ExerciseKind::ALL[choice - 1]);
        }
        println!("Please answer with a number between 1 and {}.", ExerciseKind::ALL.len());
    }
}

async fn print_round_banner(
    service: &SessionLoopService,
    session: &services::PracticeSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(summary) = session.round_summary() else {
        return Ok(());
    };

    println!();
    println!("Round complete!");
    println!(
        "  {} correct out of {}, {} points.",
        summary.correct(),
        summary.total_answered(),
        summary.score()
    );
    println!("  Next round continues at level {}.", session.level());

    let standings = service.standings().await?;
    if !standings.is_empty() {
        println!();
        println!("Standings:");
        for totals in standings {
            println!(
                "  {:<24} {:>4} pts  ({} correct / {} answered over {} rounds)",
                totals.kind.label(),
                totals.score,
                totals.correct,
                totals.total_answered,
                totals.rounds
            );
        }
    }

    println!();
    println!("Press Enter for the next round, or type 'quit'.");
    Ok(())
}

async fn practice_loop(
    service: &SessionLoopService,
    kind: ExerciseKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut session = service.start_session(kind).await?;
    println!(
        "Practicing: {} at level {}. Answer, or type 'next' to skip and 'quit' to exit.",
        kind.label(),
        session.level()
    );
    print_problem(session.current_problem());

    while let Some(line) = lines.next() {
        let line = line?;
        let input = line.trim();

        if session.is_round_complete() {
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                break;
            }
            service.acknowledge_round(&mut session)?;
            print_problem(session.current_problem());
            continue;
        }

        match input.to_ascii_lowercase().as_str() {
            "quit" | "q" => break,
            "next" | "n" | "skip" => {
                service.advance(&mut session)?;
                print_problem(session.current_problem());
            }
            _ => {
                let shown = session.current_problem().clone();
                let result = service.answer_current(&mut session, input).await?;
                match result.outcome {
                    AnswerOutcome::NoAnswer => {
                        println!("No answer given. Type one, or 'next' to skip.");
                        print!("> ");
                        let _ = io::stdout().flush();
                    }
                    AnswerOutcome::Graded(graded) => {
                        if graded.correct {
                            println!(
                                "Correct! +{} points (streak {}).",
                                graded.points, graded.streak
                            );
                        } else {
                            println!(
                                "Not quite. The answer is {}. {}",
                                shown.answer(),
                                shown.explanation()
                            );
                        }

                        if result.is_round_complete {
                            print_round_banner(service, &session).await?;
                        } else if graded.correct {
                            service.advance(&mut session)?;
                            print_problem(session.current_problem());
                        } else {
                            println!("Try again, or type 'next' for another problem.");
                            print!("> ");
                            let _ = io::stdout().flush();
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    tracing::debug!(db = %parsed.db_url, "storage ready");

    let service = SessionLoopService::new(
        Clock::default_clock(),
        Arc::new(Catalog::standard()),
        &storage,
    );

    let kind = match parsed.exercise {
        Some(kind) => kind,
        None => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            pick_exercise(&mut lines)?
        }
    };

    practice_loop(&service, kind).await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
