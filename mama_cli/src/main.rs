use clap::Parser;
use mama_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mama")]
#[command(about = "Personal health journal for meals, workouts, milk, weight and more", long_about = None)]
struct Cli {
    /// Override the journal data file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress the greeting and prompt (useful when piping commands)
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    mama_core::logging::init_with_level(&config.logging.level);

    let data_file = cli.data_file.unwrap_or_else(|| config.data.data_file.clone());
    let storage = Storage::new(data_file);
    let mut list = storage.load()?;
    tracing::info!(
        "Loaded {} entries from {:?}",
        list.full_size(),
        storage.path()
    );

    if !cli.quiet {
        println!("Welcome to mama! Type 'help' to see all commands.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if !cli.quiet {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            // End of input behaves like `bye` without the farewell
            storage.save(&list)?;
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let mut ctx = Context {
            list: &mut list,
            storage: &storage,
            now: mama_core::datetime::now(),
        };
        match command.execute(&mut ctx) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    return Ok(());
                }
            }
            Err(e) if e.is_recoverable() => println!("{}", e),
            Err(e) => return Err(e),
        }
    }
}
