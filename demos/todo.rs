//! TODO Example - The widget in a terminal
//!
//! Mounts a `TodoList` into the document body and runs the terminal host.
//! An optional argument names a TOML config file.
//!
//! Run with: cargo run --example todo -- [config.toml]
//!
//! Logs go to stderr, filtered by `RUST_LOG` (e.g. `RUST_LOG=todo_widget=debug`).
//! Redirect stderr to a file to keep them off the screen.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use todo_widget::{mount_to_body, host, TerminalOptions, TodoConfig, TodoList};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TodoConfig::load(path)?,
        None => TodoConfig::default(),
    };

    let list = TodoList::new(config);
    mount_to_body(&list)?;

    host::run(TerminalOptions::default())?;

    let tasks = list.borrow();
    println!("{} task(s) left:", tasks.tasks().len());
    for task in tasks.tasks() {
        let mark = if task.is_completed { "x" } else { " " };
        println!("  [{mark}] {}", task.name);
    }
    Ok(())
}
