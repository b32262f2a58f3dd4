//! CLI entry point.
//!
//! # Responsibility
//! - Build a board from the demo seed and print its dashboard as JSON.
//! - Exercise the core end to end: seeding, mutation with notification,
//!   reference audit and statistics.

mod demo;

use log::{info, warn};
use opsboard_core::{
    core_version, init_logging, AuthConfig, AuthSession, Board, BoardConfig, ChangeEvent, Clock,
    LogLevel, SystemClock, TaskDraft,
};
use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

const ENV_LOG_LEVEL: &str = "OPSBOARD_LOG_LEVEL";
const ENV_LOG_DIR: &str = "OPSBOARD_LOG_DIR";
const ENV_CONFIG: &str = "OPSBOARD_CONFIG";
const DEMO_EMAIL: &str = "john@company.com";

fn main() -> ExitCode {
    start_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("opsboard: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = load_config()?;
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let seed = demo::seed(clock.now());
    let mut board = Board::from_seed(seed, config, clock).map_err(|err| err.to_string())?;

    let mut session = AuthSession::new(board.managers().clone(), AuthConfig::default());
    let manager_id = session
        .login(DEMO_EMAIL, &AuthConfig::default().shared_password)
        .map_err(|err| err.to_string())?
        .id
        .clone();
    info!(
        "event=cli_start module=cli status=ok version={} managers={}",
        core_version(),
        board.managers().len()
    );

    let created = Rc::new(Cell::new(0usize));
    let subscription = {
        let created = Rc::clone(&created);
        board.tasks().subscribe(move |event: &ChangeEvent| {
            created.set(created.get() + 1);
            info!(
                "event=cli_task_change module=cli kind={} change={}",
                event.entity,
                event.change.as_str()
            );
        })
    };

    let today = board.now().date_naive();
    let mut draft = TaskDraft::new("Prepare Sprint Demo", today, manager_id);
    draft.description = "Collect highlights for the sprint review".to_string();
    draft.assigned_employee_ids = vec!["2".into()];
    board
        .create_task_for_quest(&"1".into(), draft)
        .map_err(|err| err.to_string())?;
    subscription.unsubscribe();

    let dangling = board.resolver().dangling_references();
    if !dangling.is_empty() {
        warn!(
            "event=cli_audit module=cli status=dangling count={}",
            dangling.len()
        );
    }

    let summary = board.dashboard();
    let rendered = serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?;
    println!("{rendered}");
    println!(
        "tasks_created={} dangling_references={}",
        created.get(),
        dangling.len()
    );

    session.logout();
    Ok(())
}

fn load_config() -> Result<BoardConfig, String> {
    let Ok(path) = std::env::var(ENV_CONFIG) else {
        return Ok(BoardConfig::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| format!("cannot read config `{path}`: {err}"))?;
    BoardConfig::from_json_str(&raw).map_err(|err| err.to_string())
}

/// File logging starts only when a log directory is configured.
fn start_logging() {
    let Ok(dir) = std::env::var(ENV_LOG_DIR) else {
        return;
    };
    let level = std::env::var(ENV_LOG_LEVEL)
        .unwrap_or_else(|_| LogLevel::build_default().as_str().to_string());
    if let Err(err) = init_logging(&level, &dir) {
        eprintln!("opsboard: logging disabled: {err}");
    }
}
