use clap::{Args, Subcommand};

use crate::cli::client::DronesClient;
use crate::cli::utils::{output_drones, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum DroneCommands {
    #[command(about = "List drones, newest first")]
    List {
        #[arg(long, help = "Case-insensitive text matched against name, brand and type")]
        search: Option<String>,
        #[arg(long = "type", help = "Exact drone type")]
        drone_type: Option<String>,
    },

    #[command(about = "Create a drone")]
    Create {
        #[command(flatten)]
        fields: DroneFields,
    },

    #[command(about = "Overwrite every field of a drone")]
    Update {
        #[arg(help = "Drone ID to update")]
        id: i64,
        #[command(flatten)]
        fields: DroneFields,
    },

    #[command(about = "Delete a drone")]
    Delete {
        #[arg(help = "Drone ID to delete")]
        id: i64,
    },
}

/// Field set sent for create and update. Price and stock go to the server
/// as typed, which validates them.
#[derive(Debug, Clone, Args)]
pub struct DroneFields {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type")]
    pub drone_type: String,
    #[arg(long)]
    pub price: String,
    #[arg(long)]
    pub stock: String,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
}

impl DroneFields {
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("name", self.name.clone()),
            ("type", self.drone_type.clone()),
            ("price", self.price.clone()),
            ("stock", self.stock.clone()),
        ];
        let optional = [
            ("brand", &self.brand),
            ("description", &self.description),
            ("image", &self.image),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs
    }
}

pub async fn handle(
    cmd: DroneCommands,
    client: &DronesClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        DroneCommands::List { search, drone_type } => {
            let envelope = client.list(search.as_deref(), drone_type.as_deref()).await?;
            output_drones(output_format, &envelope)
        }
        DroneCommands::Create { fields } => {
            let envelope = client.post("create", &fields.form_pairs()).await?;
            output_success(output_format, &envelope)
        }
        DroneCommands::Update { id, fields } => {
            let mut pairs = vec![("id_drone", id.to_string())];
            pairs.extend(fields.form_pairs());
            let envelope = client.post("update", &pairs).await?;
            output_success(output_format, &envelope)
        }
        DroneCommands::Delete { id } => {
            let envelope = client.post("delete", &[("id_drone", id.to_string())]).await?;
            output_success(output_format, &envelope)
        }
    }
}
