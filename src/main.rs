use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use release_announcer::cli::{self, GenerateArgs, SendArgs};
use release_announcer::config;
use release_announcer::index::PyPiClient;
use release_announcer::logging;
use release_announcer::send::SystemInteraction;
use release_announcer::ui;

#[derive(Parser)]
#[command(
    name = "release-announcer",
    version,
    about = "Generate and send release announcements for a package published on PyPI"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the announcements for a release and record them in announcements.json
    Announcements {
        #[arg(help = "Release version as published on PyPI")]
        version: String,

        #[arg(long, default_value = ".", help = "Directory containing the dependency file")]
        data_dir: PathBuf,

        #[arg(long, help = "Dependency file name [default: <package>-<version>.deps]")]
        deps_file: Option<String>,

        #[arg(long, default_value = ".", help = "Directory to write announcements to")]
        output_dir: PathBuf,

        #[arg(long, help = "Verify the sdist and wheel in this directory against PyPI")]
        dist_dir: Option<PathBuf>,

        #[arg(long = "eol", help = "This is the last release of its major version")]
        end_of_life: bool,

        #[arg(long, help = "Send the announcements right after generating them")]
        send: bool,
    },

    /// Interactively send announcements created by the announcements command
    SendAnnouncements {
        #[arg(default_value = ".", help = "Directory containing announcements.json")]
        announcements_dir: PathBuf,

        #[arg(long = "action", value_parser = ["forum", "matrix"], help = "Delivery action to run (repeatable) [default: all]")]
        actions: Vec<String>,

        #[arg(long, help = "Print the matrix message instead of copying it")]
        no_clipboard: bool,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;
    let mut interaction = SystemInteraction::new();

    match args.command {
        Command::Announcements {
            version,
            data_dir,
            deps_file,
            output_dir,
            dist_dir,
            end_of_life,
            send,
        } => {
            let generate = GenerateArgs {
                version,
                data_dir,
                deps_file,
                output_dir,
                dist_dir,
                end_of_life,
                send,
            };
            let index = PyPiClient::from_config(&config.index);
            let result = cli::run_generate(&generate, &config, &index, &mut interaction)?;
            if let Some(report) = &result.sent {
                ui::display_send_report(report);
            }
        }
        Command::SendAnnouncements {
            announcements_dir,
            actions,
            no_clipboard,
        } => {
            let send = SendArgs {
                announcements_dir,
                actions,
                clipboard: !no_clipboard,
            };
            let report = cli::run_send(&send, &config, &mut interaction)?;
            ui::display_send_report(&report);
        }
    }

    Ok(())
}
