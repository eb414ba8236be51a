//! Command-line arguments and command execution.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pushko::{Client, Payload, PushkoConfig, TriggerOptions, TriggerOutcome, DEFAULT_PROFILE};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Command-line client for hosted push-messaging.
#[derive(Debug, Parser)]
#[command(name = "pushko", version, about)]
pub struct Cli {
    /// Config file (defaults to the first of ./pushko.toml,
    /// /etc/pushko/pushko.toml, ~/.config/pushko/pushko.toml)
    #[arg(long, global = true, env = "PUSHKO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(long, global = true, env = "PUSHKO_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trigger an event on one or more channels
    Trigger {
        /// Target channel (repeat for several)
        #[arg(short, long = "channel", required = true)]
        channels: Vec<String>,

        /// Event name
        #[arg(short, long)]
        event: String,

        /// Event data, sent verbatim
        #[arg(short, long, default_value = "")]
        data: String,

        /// Connection to exclude
        #[arg(long)]
        socket_id: Option<String>,

        /// Print the raw response body
        #[arg(long)]
        debug: bool,
    },

    /// List occupied channels
    Channels,

    /// Show statistics for a channel
    Stats {
        /// Channel name
        channel: String,
    },

    /// Sign a private channel subscription
    Auth {
        /// Channel name
        channel: String,

        /// Connection id, as `digits.digits`
        socket_id: String,

        /// Extra channel data, signed verbatim
        #[arg(long)]
        data: Option<String>,
    },

    /// Sign a presence channel subscription
    PresenceAuth {
        /// Channel name
        channel: String,

        /// Connection id, as `digits.digits`
        socket_id: String,

        /// User id
        user_id: String,

        /// User info as a JSON object
        #[arg(long)]
        info: Option<String>,
    },
}

/// Load configuration and build the client for the selected profile.
fn client(cli: &Cli) -> Result<Client> {
    let config = match &cli.config {
        Some(path) => PushkoConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PushkoConfig::load().context("Failed to load config")?,
    };

    debug!(profile = %cli.profile, "Using profile");
    Client::from_profile(&config, &cli.profile)
        .with_context(|| format!("Failed to create client for profile '{}'", cli.profile))
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if the client cannot be built, a call fails, or an
/// event is not accepted.
pub async fn run(cli: Cli) -> Result<()> {
    let client = client(&cli)?;

    match cli.command {
        Command::Trigger {
            channels,
            event,
            data,
            socket_id,
            debug,
        } => {
            let mut options = TriggerOptions::new().debug(debug);
            if let Some(socket_id) = socket_id {
                options = options.exclude(socket_id);
            }

            match client.trigger(&channels[..], &event, data, options).await? {
                TriggerOutcome::Accepted => info!(event = %event, "Event accepted"),
                TriggerOutcome::Raw(body) => print!("{}", body),
                TriggerOutcome::Rejected { status } => {
                    bail!("Event '{}' not accepted (status {})", event, status)
                }
            }
        }
        Command::Channels => match client.get_channels().await? {
            Some(channels) => {
                for channel in channels {
                    println!("{}", channel);
                }
            }
            None => warn!("Channel list not available"),
        },
        Command::Stats { channel } => match client.get_channel_stats(&channel).await? {
            Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
            None => warn!(channel = %channel, "Channel stats not available"),
        },
        Command::Auth {
            channel,
            socket_id,
            data,
        } => {
            let token = client.socket_auth(&channel, &socket_id, data.map(Payload::Raw))?;
            println!("{}", token.to_json()?);
        }
        Command::PresenceAuth {
            channel,
            socket_id,
            user_id,
            info,
        } => {
            let info: Option<serde_json::Value> = info
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .context("User info is not valid JSON")?;
            let token = client.presence_auth(&channel, &socket_id, user_id, info)?;
            println!("{}", token.to_json()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_trigger() {
        let cli = Cli::try_parse_from([
            "pushko", "trigger", "-c", "a", "-c", "b", "-e", "greet", "-d", "hi", "--profile",
            "staging",
        ])
        .unwrap();

        assert_eq!(cli.profile, "staging");
        match cli.command {
            Command::Trigger {
                channels,
                event,
                data,
                socket_id,
                debug,
            } => {
                assert_eq!(channels, vec!["a", "b"]);
                assert_eq!(event, "greet");
                assert_eq!(data, "hi");
                assert_eq!(socket_id, None);
                assert!(!debug);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_trigger_requires_channel() {
        assert!(Cli::try_parse_from(["pushko", "trigger", "-e", "greet"]).is_err());
    }

    #[test]
    fn test_parse_presence_auth() {
        let cli = Cli::try_parse_from([
            "pushko",
            "presence-auth",
            "presence-room",
            "123.456",
            "42",
            "--info",
            r#"{"name":"Ada"}"#,
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::PresenceAuth { ref user_id, info: Some(_), .. } if user_id == "42"
        ));
    }
}
