use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `drones` catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Drone {
    pub id_drone: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub drone_type: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub brand: Option<String>,
    pub stock: i32,
}

impl Drone {
    /// Build the stored row for `input` under a store-assigned identifier.
    pub fn from_input(id_drone: i64, input: DroneInput) -> Self {
        Self {
            id_drone,
            name: input.name,
            drone_type: input.drone_type,
            image: Some(input.image),
            description: Some(input.description),
            price: input.price,
            brand: Some(input.brand),
            stock: input.stock,
        }
    }
}

/// Validated field set for create and update. Every mutable column is
/// written, so optional text fields carry an empty string rather than `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneInput {
    pub name: String,
    pub drone_type: String,
    pub brand: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
}

/// List criteria. Both parts are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DroneFilter {
    /// Case-insensitive substring matched against name, brand and type.
    pub search: Option<String>,
    /// Exact type match.
    pub drone_type: Option<String>,
}

impl DroneFilter {
    pub fn new(search: Option<&str>, drone_type: Option<&str>) -> Self {
        fn present(value: Option<&str>) -> Option<String> {
            value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
        }

        Self {
            search: present(search),
            drone_type: present(drone_type),
        }
    }

    /// `%term%` with LIKE metacharacters escaped, so the search is a plain
    /// substring match. Uses `\` as the escape character.
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }

    pub fn matches(&self, drone: &Drone) -> bool {
        if let Some(drone_type) = &self.drone_type {
            if &drone.drone_type != drone_type {
                return false;
            }
        }

        match &self.search {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                let contains = |field: Option<&str>| {
                    field.map_or(false, |f| f.to_lowercase().contains(&needle))
                };
                contains(Some(&drone.name))
                    || contains(drone.brand.as_deref())
                    || contains(Some(&drone.drone_type))
            }
        }
    }
}
