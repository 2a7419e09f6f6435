pub mod client;
pub mod commands;
pub mod utils;

use clap::Parser;
use serde::{Deserialize, Serialize};

use client::DronesClient;

#[derive(Parser)]
#[command(name = "drones")]
#[command(about = "Skysail drones CLI - admin client for the drones catalog API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "DRONES_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the drones API"
    )]
    pub url: String,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: commands::drones::DroneCommands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = DronesClient::new(&cli.url)?;

    commands::drones::handle(cli.command, &client, output_format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_selects_json_output() {
        let cli = Cli::try_parse_from(["drones", "--json", "list"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        let cli = Cli::try_parse_from(["drones", "list", "--text"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }
}
