use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod providers;
mod tracker;

#[derive(Parser)]
#[command(name = "yt-live-views")]
#[command(author, version, about = "Track live YouTube view counts over five minutes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a video at 0, 1, 3 and 5 minutes
    Track {
        /// Video ID (prompted for when omitted)
        video_id: Option<String>,

        /// Do not write the CSV record file
        #[arg(long)]
        no_log: bool,

        /// Path of the CSV record file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the current total view count of a video
    Views {
        video_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            init_logging();
            cli::track::run(None, false, None).await
        }
        Some(Commands::Track {
            video_id,
            no_log,
            output,
        }) => {
            init_logging();
            cli::track::run(video_id, no_log, output).await
        }
        Some(Commands::Views { video_id, json }) => {
            init_logging();
            cli::views::run(video_id, json).await
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_prompt() {
        let cli = Cli::try_parse_from(["yt-live-views"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_track_args() {
        let cli =
            Cli::try_parse_from(["yt-live-views", "track", "abc123", "--no-log", "-o", "x.csv"])
                .unwrap();
        match cli.command {
            Some(Commands::Track {
                video_id,
                no_log,
                output,
            }) => {
                assert_eq!(video_id.as_deref(), Some("abc123"));
                assert!(no_log);
                assert_eq!(output, Some(PathBuf::from("x.csv")));
            }
            _ => panic!("expected track command"),
        }
    }
}
