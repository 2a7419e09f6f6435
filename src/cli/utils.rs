use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success envelope: pretty JSON, or its message as text
pub fn output_success(output_format: OutputFormat, envelope: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(envelope)?);
        }
        OutputFormat::Text => {
            let message = envelope.get("message").and_then(Value::as_str).unwrap_or("Done");
            match envelope.get("id_drone") {
                Some(id) => println!("✓ {} (id_drone: {})", message, id),
                None => println!("✓ {}", message),
            }
        }
    }
    Ok(())
}

/// Output a list envelope: pretty JSON, or one line per drone plus the types
pub fn output_drones(output_format: OutputFormat, envelope: &Value) -> anyhow::Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(envelope)?);
        return Ok(());
    }

    let drones = envelope.get("drones").and_then(Value::as_array);
    match drones {
        Some(drones) if !drones.is_empty() => {
            for drone in drones {
                println!("{}", drone_line(drone));
            }
        }
        _ => println!("No drones found"),
    }

    if let Some(types) = envelope.get("types").and_then(Value::as_array) {
        let types: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
        println!("Types: {}", types.join(", "));
    }
    Ok(())
}

fn drone_line(drone: &Value) -> String {
    let text = |key: &str| drone.get(key).and_then(Value::as_str).unwrap_or("");
    let id = drone.get("id_drone").map(Value::to_string).unwrap_or_default();
    let stock = drone.get("stock").map(Value::to_string).unwrap_or_default();

    let mut line = format!("#{} {} [{}]", id, text("name"), text("type"));
    if !text("brand").is_empty() {
        line.push_str(&format!(" by {}", text("brand")));
    }
    line.push_str(&format!(" - {} ({} in stock)", text("price"), stock));
    line
}
