/*!
 * Task Core CLI - task list with keyword classification
 *
 * Runs the interactive task manager, or performs a single add/classify/list
 * operation for scripting. `--json` output is one JSON document on stdout.
 */

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use task_core::interactive::{format_task, Session};
use task_core::{
    classify_and_build, AddOutcome, Config, FileLearningStore, LearningStore, TaskList,
};

#[derive(Parser)]
#[command(name = "task_cli")]
#[command(about = "Task Core - task list manager with adaptive categories", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long, env = "TASK_CORE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Task list JSON file
    #[arg(long, env = "TASK_CORE_TASKS_FILE", global = true)]
    tasks_file: Option<PathBuf>,

    /// Learning store JSON file
    #[arg(long, env = "TASK_CORE_LEARNING_FILE", global = true)]
    learning_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive command loop (default)
    Interactive,

    /// Classify a task, append it to the task list and save
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[arg(short, long)]
        json: bool,
    },

    /// Classify a task without touching the task list
    Classify {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[arg(short, long)]
        json: bool,
    },

    /// Show the task list, highest priority first
    List {
        #[arg(short, long)]
        json: bool,
    },

    /// Show the learning store
    Learned {
        #[arg(short, long)]
        json: bool,
    },

    /// Set the count at which a learned word becomes a category keyword
    Threshold {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        value: u64,
    },

    /// Show version information
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?
        .with_overrides(cli.tasks_file, cli.learning_file);
    let store = FileLearningStore::new(&config.learning_file);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let mut list = TaskList::new();
            if !config.tasks_file.exists() {
                println!("Your calendar is empty");
            }
            list.load_from_file(&config.tasks_file)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(
                list,
                &store,
                &config.tasks_file,
                stdin.lock(),
                stdout.lock(),
            );
            session.run()
        }
        Commands::Add { text, json } => {
            let mut list = TaskList::new();
            list.load_from_file(&config.tasks_file)?;

            let task = classify_and_build(&store, &text.join(" "))?;
            // a second copy would be dropped again by the next load
            if let AddOutcome::Duplicate(task) = list.add(task.clone()) {
                bail!("task '{}' already exists", task.task_name);
            }
            list.sort();
            list.save_to_file(&config.tasks_file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!(
                    "Task: '{}' Added! [Priority: {}, Category: {}]",
                    task.task_name, task.priority, task.category
                );
            }
            Ok(())
        }
        Commands::Classify { text, json } => {
            let task = classify_and_build(&store, &text.join(" "))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!(
                    "{} | Priority: {} | Category: {}",
                    task.task_name, task.priority, task.category
                );
            }
            Ok(())
        }
        Commands::List { json } => {
            let mut list = TaskList::new();
            list.load_from_file(&config.tasks_file)?;
            list.sort();

            if json {
                println!("{}", serde_json::to_string_pretty(list.tasks())?);
            } else if list.is_empty() {
                println!("No Tasks on the calendar");
            } else {
                for (i, task) in list.tasks().iter().enumerate() {
                    println!("{}", format_task(i + 1, task));
                }
            }
            Ok(())
        }
        Commands::Learned { json } => {
            let (data, _) = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            let threshold = data.threshold();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "Threshold: {}", threshold)?;
            for (category, words) in &data.learned_categories {
                writeln!(out, "{} ({} words)", category, words.len())?;
                for (word, count) in words {
                    let marker = if *count >= threshold { " *" } else { "" };
                    writeln!(out, "  {}: {}{}", word, count, marker)?;
                }
            }
            Ok(())
        }
        Commands::Threshold { value } => {
            store.modify(&mut |data| data.settings.threshold = value)?;
            println!("Threshold set to {}", value);
            Ok(())
        }
        Commands::Version => {
            println!("task_cli v{}", env!("CARGO_PKG_VERSION"));
            println!("Task Core - task list manager with adaptive categories");
            Ok(())
        }
    }
}
