use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reels")]
#[command(about = "A terminal short-video feed", long_about = None)]
pub struct Cli {
    /// Video page endpoint (overrides the settings file)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Force dark mode (overrides auto-detection)
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Force light mode (overrides auto-detection)
    #[arg(long, conflicts_with = "dark")]
    pub light: bool,

    /// Custom config directory (default: ~/.config/reels)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable verbose logging (prints log path, sets DEBUG level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or create the configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective feed configuration
    Show {
        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: OutputFormat,
    },
    /// Write a settings file with the default endpoint if none exists
    Init,
    /// Show the settings file path
    Path,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'toml' or 'json'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_and_verbose() {
        let cli = Cli::parse_from(["reels", "-e", "http://x/videos", "-v"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://x/videos"));
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn dark_and_light_conflict() {
        assert!(Cli::try_parse_from(["reels", "--dark", "--light"]).is_err());
    }

    #[test]
    fn config_show_json() {
        let cli = Cli::parse_from(["reels", "config", "show", "--format", "json"]);
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                command: ConfigCommands::Show { format },
            })) => assert_eq!(format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_unknown() {
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!("TOML".parse::<OutputFormat>(), Ok(OutputFormat::Toml));
    }
}
