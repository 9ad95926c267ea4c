use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{AuthCommand, CompletionsCommand, ConfigureCommand, WebCommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gognito", version, about = "Temporary AWS credentials via Google sign-in and Cognito identity pools", long_about = None, arg_required_else_help = false)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        global = true,
        default_value = "default",
        help = "AWS profile name"
    )]
    pub profile: String,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Sign in with Google and fetch temporary AWS credentials")]
    Auth(AuthCommand),
    #[command(about = "Configure Google sign-in and Cognito identity pool settings")]
    Configure(ConfigureCommand),
    #[command(about = "Open AWS Management Console in browser")]
    Web(WebCommand),
    #[command(about = "Generate shell completion scripts for gognito")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let profile = self.profile;
        let command = self
            .command
            .unwrap_or(Commands::Auth(AuthCommand { token: None }));

        match command {
            Commands::Auth(cmd) => cmd.execute(&profile).await,
            Commands::Configure(cmd) => cmd.execute(&profile).await,
            Commands::Web(cmd) => cmd.execute(&profile).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}
