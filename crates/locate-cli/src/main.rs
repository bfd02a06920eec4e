#![forbid(unsafe_code)]

mod card;
mod cmd;
mod http;
mod output;
mod project;

use clap::{CommandFactory, Parser, Subcommand};
use locate_core::config;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lt: utility locate ticket tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides --json, FORMAT and the user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, env, and the user config.
    fn output_mode(&self, user_output: Option<&str>) -> OutputMode {
        output::resolve_output_mode(self.format, self.json, user_output)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize a locate tracker",
        long_about = "Create .locate/ in the current directory with a default config and the demo tickets.",
        after_help = "EXAMPLES:\n    # Initialize with demo tickets\n    lt init\n\n    # Start with an empty list\n    lt init --empty"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "Create a ticket",
        long_about = "Validate and add a ticket to the top of the list.",
        after_help = "EXAMPLES:\n    # Minimal ticket\n    lt create --id FM-2331 --location \"Hendry St\" --description \"Gas service locate\"\n\n    # Urgent fiber locate\n    lt create --id FM-2332 -l \"Main St\" -d \"Fiber near pad\" -p urgent --type Fiber"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "Edit a ticket",
        long_about = "Change fields of an existing ticket. The id and list position stay the same.",
        after_help = "EXAMPLES:\n    # Resolve a ticket\n    lt update FM-2320 --status resolved\n\n    # Reassign and add notes\n    lt update FM-2318 --owner \"J. Patel\" --notes \"Splice diagram uploaded\""
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "Delete a ticket",
        after_help = "EXAMPLES:\n    lt delete FM-2324"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one ticket",
        after_help = "EXAMPLES:\n    lt show FM-2317\n\n    # Emit machine-readable output\n    lt show FM-2317 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List and search tickets",
        long_about = "List tickets newest first. The search matches id, location, description and utility type.",
        after_help = "EXAMPLES:\n    # Everything\n    lt list\n\n    # Search\n    lt list water\n\n    # Urgent tickets still open\n    lt list --priority urgent --status open"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show dashboard counters",
        after_help = "EXAMPLES:\n    lt summary\n\n    lt summary fiber --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Read",
        about = "Export tickets as CSV",
        after_help = "EXAMPLES:\n    # To stdout\n    lt export\n\n    # Filtered, to a file\n    lt export --query gas --output gas.csv"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Server",
        about = "Serve the HTTP API",
        after_help = "EXAMPLES:\n    lt serve\n\n    # Demo data only, nothing written\n    lt serve --ephemeral --bind 127.0.0.1:8080"
    )]
    Serve(cmd::serve::ServeArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    lt completions bash > ~/.local/share/bash-completion/completions/lt"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("LOCATE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "locate_core=debug,lt=debug,info"
        } else {
            "locate_core=info,lt=info,warn"
        })
    });

    let format = env::var("LOCATE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let user_config = config::load_user_config().unwrap_or_else(|err| {
        warn!(error = %format!("{err:#}"), "ignoring unreadable user config");
        config::UserConfig::default()
    });
    let output = cli.output_mode(user_config.output.as_deref());
    debug!(?output, "resolved output mode");

    let command_result = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|project_root| match cli.command {
            Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
            Commands::Create(ref args) => cmd::create::run_create(args, output, &project_root),
            Commands::Update(ref args) => cmd::update::run_update(args, output, &project_root),
            Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &project_root),
            Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
            Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
            Commands::Summary(ref args) => {
                cmd::summary::run_summary(args, output, &project_root)
            }
            Commands::Export(ref args) => cmd::export::run_export(args, output, &project_root),
            Commands::Serve(ref args) => cmd::serve::run_serve(args, &project_root),
            Commands::Completions(ref args) => {
                let mut command = Cli::command();
                cmd::completions::run_completions(args.shell, &mut command)
            }
        });

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if let Err(render_err) = render_error(output, &CliError::from_anyhow(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["lt", "--json", "list"]);
        assert!(cli.json);
        assert!(cli.output_mode(None).is_json());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["lt", "list", "--json"]);
        assert!(cli.output_mode(None).is_json());
    }

    #[test]
    fn format_flag_beats_json_flag() {
        let cli = Cli::parse_from(["lt", "--json", "--format", "text", "summary"]);
        assert_eq!(cli.output_mode(Some("pretty")), OutputMode::Text);
    }

    #[test]
    fn quiet_flag_parsed() {
        let cli = Cli::parse_from(["lt", "-q", "list"]);
        assert!(cli.quiet);
    }

    #[test]
    fn list_query_is_positional() {
        let cli = Cli::parse_from(["lt", "list", "fowler"]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.query.as_deref(), Some("fowler"));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["lt", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["lt", "init"],
            vec!["lt", "create", "--id", "FM-1", "-l", "x", "-d", "y"],
            vec!["lt", "update", "FM-1", "--status", "resolved"],
            vec!["lt", "delete", "FM-1"],
            vec!["lt", "show", "FM-1"],
            vec!["lt", "list"],
            vec!["lt", "summary"],
            vec!["lt", "export", "--output", "out.csv"],
            vec!["lt", "serve", "--ephemeral"],
            vec!["lt", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "failed to parse {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
