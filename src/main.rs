use clap::Parser;
use colored::Colorize;
use eyre::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use tasktrack::{TaskStore, TrackerError};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "Personal task tracker - prioritized tasks persisted to a flat file")]
struct Cli {
    /// Path to the task file
    #[arg(short, long, default_value = "tasks.json")]
    file: PathBuf,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // A corrupt or unreadable task file aborts here; only caller-input
    // errors are caught inside the loop.
    let mut store = TaskStore::open(&cli.file)?;

    loop {
        println!();
        println!("{}", "Task Tracker".bold().cyan());
        println!("1. Add Task");
        println!("2. Show Tasks");
        println!("3. Complete Task");
        println!("4. Next Task");
        println!("5. Exit");

        let Some(choice) = prompt("Choose an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                if add_task(&mut store)?.is_none() {
                    break;
                }
            }
            "2" => show_tasks(&store),
            "3" => {
                let Some(name) = prompt("Task name to complete: ")? else {
                    break;
                };
                report(store.complete(name.trim()), "Task completed successfully.")?;
            }
            "4" => next_task(&store),
            "5" => break,
            _ => println!("Invalid option. Please try again."),
        }
    }

    Ok(())
}

/// Prompt for the three task fields and add the task. `None` means stdin
/// reached EOF and the caller should exit the loop.
fn add_task(store: &mut TaskStore) -> Result<Option<()>> {
    let Some(name) = prompt("Task name: ")? else {
        return Ok(None);
    };

    let Some(input) = prompt("Priority (lower number = higher priority): ")? else {
        return Ok(None);
    };
    let priority = match parse_priority(&input) {
        Ok(p) => p,
        Err(e) => {
            println!("{} {}", "Error:".red(), e);
            return Ok(Some(()));
        }
    };

    let Some(input) = prompt("Dependencies (comma-separated): ")? else {
        return Ok(None);
    };
    let dependencies = parse_dependencies(&input);

    report(store.add(&name, priority, dependencies), "Task added successfully.")?;
    Ok(Some(()))
}

fn show_tasks(store: &TaskStore) {
    if store.is_empty() {
        println!("No tasks available.");
        return;
    }
    for task in store.list() {
        println!(
            "Priority: {}, Name: {}, Dependencies: [{}]",
            task.priority,
            task.name.bold(),
            task.dependencies.join(", ")
        );
    }
}

fn next_task(store: &TaskStore) {
    match store.peek_next() {
        Some(task) => println!(
            "Next Task: {} (priority {}, dependencies [{}])",
            task.name.bold(),
            task.priority,
            task.dependencies.join(", ")
        ),
        None => println!("No tasks available."),
    }
}

/// Print the outcome of a store operation. Recoverable errors are reported
/// and the menu loop continues; anything else propagates and aborts.
fn report(result: tasktrack::Result<()>, success: &str) -> Result<()> {
    match result {
        Ok(()) => {
            println!("{}", success.green());
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            println!("{} {}", "Error:".red(), e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Read one line of input; `None` on EOF.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn parse_priority(input: &str) -> tasktrack::Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| TrackerError::validation("Priority must be an integer."))
}

/// Split comma-separated dependencies, trimming each item and dropping
/// empty ones. Duplicates are kept as typed.
fn parse_dependencies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority("3").unwrap(), 3);
        assert_eq!(parse_priority(" -5 ").unwrap(), -5);

        assert!(matches!(
            parse_priority("1.5").unwrap_err(),
            TrackerError::Validation(_)
        ));
        assert!(matches!(
            parse_priority("high").unwrap_err(),
            TrackerError::Validation(_)
        ));
        assert!(matches!(
            parse_priority("").unwrap_err(),
            TrackerError::Validation(_)
        ));
    }

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(
            parse_dependencies("a, b ,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert_eq!(parse_dependencies(" , ,"), Vec::<String>::new());
        assert_eq!(parse_dependencies(""), Vec::<String>::new());
        // Duplicates are not collapsed
        assert_eq!(parse_dependencies("a,a"), vec!["a".to_string(), "a".to_string()]);
    }
}
