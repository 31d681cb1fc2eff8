//! Headless dashboard entry point.
//!
//! # Responsibility
//! - Provide a minimal executable over `dashboard_core` for local sanity checks.
//! - Map CLI flags and environment variables onto `DashboardConfig`.

use clap::{Parser, Subcommand};
use dashboard_core::{
    default_log_level, init_logging, DashboardApp, DashboardConfig, DashboardError,
    DashboardSummary, LogNotifier, Mood, PomodoroMode, StaticConfirmer, UiAction,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "dashboard", version, about = "Personal dashboard, headless")]
struct Cli {
    /// SQLite file holding dashboard state. In-memory when unset.
    #[arg(long, env = "DASHBOARD_DB_PATH")]
    db_path: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "DASHBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. No file logs when unset.
    #[arg(long, env = "DASHBOARD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Answer yes to delete confirmations.
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compact dashboard cards (default)
    Summary,
    /// Print core linkage info
    Ping,
    /// Add a to-do
    AddTodo {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Flip a to-do between done and pending
    ToggleTodo {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// Delete a to-do (needs --yes)
    DeleteTodo {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// Add a goal
    AddGoal {
        #[arg(value_name = "TEXT")]
        text: String,
        #[arg(value_name = "PROGRESS", default_value_t = 0, allow_negative_numbers = true)]
        progress: i64,
    },
    /// Add a note dated today
    AddNote {
        #[arg(value_name = "CONTENT")]
        content: String,
    },
    /// List notes, newest first
    Notes,
    /// Log a mood: happy|neutral|sad|stressed|productive
    LogMood {
        #[arg(value_name = "MOOD")]
        mood: Mood,
    },
    /// Run the elapsed tracker for a number of seconds
    Track {
        #[arg(value_name = "SECONDS")]
        seconds: u64,
    },
    /// Run a pomodoro countdown for a number of seconds
    Focus {
        #[arg(value_name = "SECONDS")]
        seconds: u64,
        #[arg(long, default_value = "pomodoro")]
        mode: PomodoroMode,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dashboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig {
        db_path: cli.db_path,
        log_level: cli
            .log_level
            .unwrap_or_else(|| default_log_level().to_string()),
        log_dir: cli.log_dir,
        ..DashboardConfig::default()
    };
    config.validate()?;
    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)?;
    }

    let mut app = DashboardApp::open(
        &config,
        Rc::new(LogNotifier),
        Rc::new(StaticConfirmer(cli.yes)),
    )?;

    match cli.command.unwrap_or(Command::Summary) {
        Command::Summary => print_summary(&app.summary()),
        Command::Ping => {
            println!("dashboard_core ping={}", dashboard_core::ping());
            println!("dashboard_core version={}", dashboard_core::core_version());
        }
        Command::AddTodo { text } => {
            app.dispatch(UiAction::AddTodo { text })?;
            print_todos(&app);
        }
        Command::ToggleTodo { id } => {
            app.dispatch(UiAction::ToggleTodo { id })?;
            print_todos(&app);
        }
        Command::DeleteTodo { id } => {
            app.dispatch(UiAction::DeleteTodo { id })?;
            print_todos(&app);
        }
        Command::AddGoal { text, progress } => {
            app.dispatch(UiAction::AddGoal { text, progress })?;
            for goal in app.goals().items() {
                println!("{:>3}  {:>3}%  {}", goal.id, goal.progress, goal.text);
            }
        }
        Command::AddNote { content } => {
            app.dispatch(UiAction::AddNote { content })?;
            print_notes(&app);
        }
        Command::Notes => print_notes(&app),
        Command::LogMood { mood } => {
            app.dispatch(UiAction::SelectMood(mood))?;
            app.dispatch(UiAction::LogMood)?;
            print_moods(&app.summary());
        }
        Command::Track { seconds } => {
            app.dispatch(UiAction::StartTracker)?;
            drive(&mut app, Duration::from_secs(seconds), |app| {
                println!("{}", app.tracker().display());
            })?;
            app.dispatch(UiAction::PauseTracker)?;
        }
        Command::Focus { seconds, mode } => {
            app.dispatch(UiAction::SelectPomodoroMode(mode))?;
            app.dispatch(UiAction::StartPomodoro)?;
            drive(&mut app, Duration::from_secs(seconds), |app| {
                println!("{} {}", app.pomodoro().mode(), app.pomodoro().display());
            })?;
            app.dispatch(UiAction::PausePomodoro)?;
        }
    }
    Ok(())
}

/// Pumps scheduler ticks until `budget` has elapsed, calling `render` after
/// each batch.
fn drive(
    app: &mut DashboardApp,
    budget: Duration,
    render: impl Fn(&DashboardApp),
) -> Result<(), DashboardError> {
    let deadline = Instant::now() + budget;
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        if app.pump_ticks_timeout(deadline - now)? > 0 {
            render(app);
        }
    }
    info!("event=cli_drive module=cli status=ok budget_s={}", budget.as_secs());
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    println!("{}  {}", summary.clock.time, summary.clock.date);
    println!();
    println!("Pending tasks:");
    if summary.pending_todos.is_empty() {
        println!("  (none)");
    }
    for todo in &summary.pending_todos {
        println!("  [{}] {}", todo.id, todo.text);
    }
    match &summary.current_goal {
        Some(goal) => println!("Current goal: {} ({}%)", goal.text, goal.progress),
        None => println!("Current goal: (none)"),
    }
    println!("Tracker: {}", summary.tracker_display);
    println!(
        "Pomodoro: {} {}",
        summary.pomodoro.mode, summary.pomodoro_display
    );
    print_moods(summary);
}

fn print_moods(summary: &DashboardSummary) {
    println!("Recent moods:");
    for entry in &summary.recent_moods {
        println!("  {} {}  {}", entry.mood.emoji(), entry.mood.label(), entry.time);
    }
}

fn print_todos(app: &DashboardApp) {
    for todo in app.todos().items() {
        let mark = if todo.completed { "x" } else { " " };
        println!("{:>3} [{mark}] {}", todo.id, todo.text);
    }
}

fn print_notes(app: &DashboardApp) {
    for note in app.notes().sorted_by_date_desc() {
        println!("{}  {}", note.date.format("%b %-d, %Y"), note.content);
    }
}
