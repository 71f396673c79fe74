use clap::{ArgAction, Parser as ClapParser, Subcommand};
use qs_grammar::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use qs_grammar::{DEFAULT_MAX_DEPTH, Grammar, ParseOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "qsg")]
#[command(about = "qsg - parse bracketed, list-aware query strings")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query string and print the result
    Parse {
        /// The query string, starting with '?' (reads from stdin if not provided)
        query: Option<String>,

        /// Grammar to parse with
        #[arg(short, long, env = "QSG_GRAMMAR", default_value_t = Grammar::Extended)]
        grammar: Grammar,

        /// Maximum bracket nesting depth
        #[arg(long, env = "QSG_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Output format: tree, flat or canonical
        #[arg(short, long, default_value = "tree")]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the result
        #[arg(long)]
        syntax_only: bool,
    },

    /// Show the grammar reference
    Grammar {
        #[arg(short, long, env = "QSG_GRAMMAR", default_value_t = Grammar::Extended)]
        grammar: Grammar,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("QSG_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            query,
            grammar,
            max_depth,
            format,
            pretty,
            syntax_only,
        } => run_parse(query, grammar, max_depth, format, pretty, syntax_only),
        Commands::Grammar { grammar } => {
            print!("{}", cli::get_grammar_reference(grammar));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_parse(
    query: Option<String>,
    grammar: Grammar,
    max_depth: usize,
    format: OutputFormat,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => Some(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        parse: ParseOptions::new()
            .with_grammar(grammar)
            .with_max_depth(max_depth),
        format,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => println!("{}", output),
    }
    Ok(())
}
