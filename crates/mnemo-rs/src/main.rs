//! `mnemo` command-line tool: validate memory configuration files.

use clap::{Args, Parser, Subcommand};
use log::debug;
use mnemo_rs::config::{LayeredConfigOptions, Validator};
use mnemo_rs::init_logging;
use mnemo_rs::report::{Outcome, check_files, provider_table, report_result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line options.
#[derive(Parser)]
#[command(name = "mnemo", version, about = "Validate mnemo memory configurations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one or more JSON5 config files independently
    Validate {
        /// Config files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Merge base, user, and override files, then validate the result
    Layered {
        /// Base config file
        #[arg(long)]
        base: Option<PathBuf>,
        /// User config file (defaults to ~/.mnemo/mnemo.json5)
        #[arg(long)]
        user: Option<PathBuf>,
        /// Skip the user config layer entirely
        #[arg(long, conflicts_with = "user")]
        no_user: bool,
        /// Override files applied last, in order
        #[arg(long = "override")]
        overrides: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List accepted provider names for each section
    Providers,
}

#[derive(Args)]
struct OutputArgs {
    /// Reject unknown keys on closed objects
    #[arg(long)]
    strict: bool,
    /// Print the validated config as JSON
    #[arg(long)]
    print: bool,
}

impl OutputArgs {
    fn validator(&self) -> Validator {
        Validator::new().strict_unknown_keys(self.strict)
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    ExitCode::from(run(cli).exit_code())
}

/// Worst outcome across every checked source.
fn run(cli: Cli) -> Outcome {
    match cli.command {
        Command::Validate { files, output } => {
            check_files(&output.validator(), &files, output.print)
                .into_iter()
                .max()
                .unwrap_or(Outcome::Valid)
        }
        Command::Layered {
            base,
            user,
            no_user,
            overrides,
            output,
        } => {
            let mut options = LayeredConfigOptions::new();
            options.base_path = base;
            if no_user {
                options.user_config_path = None;
            } else if let Some(user) = user {
                options.user_config_path = Some(user);
            }
            options.runtime_paths = overrides;
            debug!("layered options: {:?}", options);

            let result = output
                .validator()
                .load_layered(&options)
                .map(|layered| layered.config);
            report_result("effective config", result, output.print)
        }
        Command::Providers => {
            println!("{}", provider_table());
            Outcome::Valid
        }
    }
}
