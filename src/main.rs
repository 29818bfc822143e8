use clap::{Parser, Subcommand};
use siriql::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "siriql")]
#[command(about = "SiriQL - parse and validate queries for the SiriDB time series database")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a SiriQL query
    Check {
        /// The query to check (reads from stdin if not provided)
        query: Option<String>,

        /// Print the parse tree as JSON
        #[arg(short, long)]
        tree: bool,

        /// Pretty-print the parse tree
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { query, tree, pretty } => run_check(query, tree, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(query: Option<String>, tree: bool, pretty: bool) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            buffer.trim_end().to_string()
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions { query, tree, pretty };

    match cli::execute_check(&options) {
        Ok(CheckResult::Valid) => {
            println!("Syntax is valid");
            Ok(())
        }
        Ok(CheckResult::Tree(json)) => {
            println!("{}", json);
            Ok(())
        }
        Err(CliError::Syntax(e)) => {
            eprintln!("{}", cli::render_error(&options.query, &e));
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}
