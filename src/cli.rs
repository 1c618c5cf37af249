use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vpsetup")]
#[command(author = "vpsetup contributors")]
#[command(version)]
#[command(about = "Interactive provisioning for a fresh VPS", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to ~/.config/vpsetup/config.toml)
    #[arg(short, long, env = "VPSETUP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Without a command, the interactive setup menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_menu() {
        let cli = Cli::try_parse_from(["vpsetup", "--dry-run", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["vpsetup", "config", "show", "--config", "/tmp/v.toml"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Show))
        ));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/v.toml")));

        let cli = Cli::try_parse_from(["vpsetup", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Path))
        ));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["vpsetup", "deploy"]).is_err());
    }
}
