use clap::{Parser as ClapParser, Subcommand};
use jimongo::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "jimongo")]
#[command(about = "jimongo - compile JSONPath-style queries with MongoDB-flavored filters")]
#[command(version)]
struct Cli {
    /// Log compiler internals to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of a query
    Check {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the AST of a query as JSON
    Ast {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the token stream of a query
    Tokens {
        /// The query to scan (reads from stdin if not provided)
        query: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { query } => run_check(query),
        Commands::Ast { query, pretty } => run_ast(query, pretty),
        Commands::Tokens { query } => run_tokens(query),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "jimongo=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(query: Option<String>) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        syntax_only: true,
    };

    cli::execute_check(&options)?;
    println!("Syntax is valid");
    Ok(())
}

fn run_ast(query: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        syntax_only: false,
    };

    if let CheckResult::Ast(ast) = cli::execute_check(&options)? {
        let json = if pretty {
            format!("{:#}", ast)
        } else {
            ast.to_string()
        };
        println!("{}", json);
    }
    Ok(())
}

fn run_tokens(query: Option<String>) -> Result<(), CliError> {
    let query = read_query(query)?;
    let tokens = cli::list_tokens(&query)?;
    print!("{}", cli::format_tokens(&tokens));
    Ok(())
}
