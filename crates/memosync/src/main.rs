// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! memosync - terminal client for the memo service.
//!
//! This is the binary entry point.

mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;
use memosync_config::MemosyncConfig;
use memosync_core::{generate_access_token, AccessToken};

/// memosync - browse and edit memos from the terminal.
#[derive(Parser, Debug)]
#[command(name = "memosync", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive memo shell (default).
    Shell,
    /// Generate or check access tokens.
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Print a fresh random access token.
    Generate,
    /// Check whether a token has the expected format.
    Check { token: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Some(Commands::Token { action }) => run_token(action),
        Some(Commands::Config) => match load_config() {
            Some(config) => print_config(&config),
            None => 1,
        },
        Some(Commands::Shell) | None => match load_config() {
            Some(config) => {
                init_tracing(&config.logging.level);
                match shell::run_shell(config).await {
                    Ok(()) => 0,
                    Err(e) => {
                        eprintln!("{}: {e}", "error".red());
                        1
                    }
                }
            }
            None => 1,
        },
    };
    std::process::exit(code);
}

/// Loads and validates the configuration, rendering diagnostics on failure.
/// Only commands that talk to the backend or print the config need it.
fn load_config() -> Option<MemosyncConfig> {
    match memosync_config::load_and_validate() {
        Ok(config) => Some(config),
        Err(errors) => {
            memosync_config::render_errors(&errors);
            None
        }
    }
}

fn run_token(action: TokenCommand) -> i32 {
    match action {
        TokenCommand::Generate => {
            println!("{}", generate_access_token().as_str());
            0
        }
        TokenCommand::Check { token } => match AccessToken::parse(&token) {
            Ok(token) => {
                println!("{} ({})", "valid".green(), token.fingerprint());
                0
            }
            Err(e) => {
                eprintln!("{}: {}", "invalid".red(), e.user_message());
                1
            }
        },
    }
}

fn print_config(config: &MemosyncConfig) -> i32 {
    match toml::to_string_pretty(config) {
        Ok(rendered) => {
            print!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("{}: failed to render configuration: {e}", "error".red());
            1
        }
    }
}

/// Logs go to stderr so they do not interleave with shell output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("memosync={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
