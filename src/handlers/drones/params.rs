// handlers/drones/params.rs - Request parameters shared by every catalog action
//
// Query strings and form bodies are read leniently: a repeated key keeps its
// last value, unknown keys are ignored and numbers are taken from the leading
// numeric part of a value.

use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use rust_decimal::Decimal;
use tracing::warn;

use crate::database::models::{DroneFilter, DroneInput};
use crate::error::ApiError;

const REQUIRED_FIELDS: &str = "Name, type, price and stock are required.";
const INVALID_ID: &str = "Invalid drone ID.";

/// Raw query-string or form-body parameters. Every field is optional here;
/// each action decides what it requires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroneParams {
    pub action: Option<String>,
    pub search: Option<String>,
    pub drone_type: Option<String>,
    pub id_drone: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub image: Option<String>,
}

impl DroneParams {
    /// Record one `key=value` pair. Later values replace earlier ones.
    pub fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "action" => &mut self.action,
            "search" => &mut self.search,
            "type" => &mut self.drone_type,
            "id_drone" => &mut self.id_drone,
            "name" => &mut self.name,
            "brand" => &mut self.brand,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "stock" => &mut self.stock,
            "image" => &mut self.image,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Parse an `application/x-www-form-urlencoded` string (a query string
    /// or a form body).
    pub fn from_urlencoded(input: &[u8]) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(input) {
            params.set(&key, value.into_owned());
        }
        params
    }

    /// Read form parameters from a request body. Urlencoded and multipart
    /// bodies are understood; file parts and any other content type are
    /// ignored. A body that cannot be read counts as empty.
    pub async fn from_body(request: Request) -> Self {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|mime| mime.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match content_type.as_str() {
            "application/x-www-form-urlencoded" => match Bytes::from_request(request, &()).await {
                Ok(body) => Self::from_urlencoded(&body),
                Err(e) => {
                    warn!("Unreadable form body: {}", e);
                    Self::default()
                }
            },
            "multipart/form-data" => match Self::from_multipart(request).await {
                Ok(params) => params,
                Err(e) => {
                    warn!("Unreadable multipart body: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    async fn from_multipart(request: Request) -> Result<Self, String> {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| e.to_string())?;
        let mut params = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some() {
                continue;
            }
            let value = field.text().await.map_err(|e| e.to_string())?;
            params.set(&name, value);
        }
        Ok(params)
    }

    pub fn filter(&self) -> DroneFilter {
        DroneFilter::new(self.search.as_deref(), self.drone_type.as_deref())
    }

    /// Positive `id_drone`, read as an integer the loose way (`"3.0"` is 3,
    /// `"abc"` is 0).
    pub fn drone_id(&self) -> Result<i64, ApiError> {
        let id = self.id_drone.as_deref().map(loose_int).unwrap_or(0);

        if id <= 0 {
            return Err(ApiError::unprocessable_entity(INVALID_ID));
        }
        Ok(id)
    }

    /// Field set for create and update. Text fields are trimmed; name, type,
    /// price and stock must be non-empty. Price and stock are coerced, never
    /// rejected: a value with no leading number reads as 0.
    pub fn drone_input(&self) -> Result<DroneInput, ApiError> {
        let name = trimmed(&self.name);
        let drone_type = trimmed(&self.drone_type);
        let price = trimmed(&self.price);
        let stock = trimmed(&self.stock);

        if name.is_empty() || drone_type.is_empty() || price.is_empty() || stock.is_empty() {
            return Err(ApiError::unprocessable_entity(REQUIRED_FIELDS));
        }

        Ok(DroneInput {
            name,
            drone_type,
            brand: trimmed(&self.brand),
            description: trimmed(&self.description),
            price: loose_decimal(&price),
            stock: loose_int(&stock).clamp(i32::MIN.into(), i32::MAX.into()) as i32,
            image: trimmed(&self.image),
        })
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Leading number of `raw` in canonical form (`-12.5`, `0.5`, `3e-2`), or
/// `None` when `raw` does not start with one.
fn numeric_prefix(raw: &str) -> Option<String> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        let len = bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        start + len
    };

    let mut number = String::new();
    let mut i = 0;
    if let Some(sign @ (b'+' | b'-')) = bytes.first() {
        if *sign == b'-' {
            number.push('-');
        }
        i = 1;
    }

    let int_end = digits_from(i);
    let int_digits = &s[i..int_end];
    i = int_end;

    let mut frac_digits = "";
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        frac_digits = &s[i + 1..frac_end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            i = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }
    number.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        number.push('.');
        number.push_str(frac_digits);
    }

    if let Some(b'e' | b'E') = bytes.get(i) {
        let mut j = i + 1;
        let negative = bytes.get(j) == Some(&b'-');
        if let Some(b'+' | b'-') = bytes.get(j) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            number.push('e');
            if negative {
                number.push('-');
            }
            number.push_str(&s[j..exp_end]);
        }
    }

    Some(number)
}

/// Integer value of a loosely typed form value: the leading number with any
/// fraction truncated, 0 when there is none. Out-of-range values saturate.
fn loose_int(raw: &str) -> i64 {
    match numeric_prefix(raw) {
        None => 0,
        Some(number) if number.contains(['.', 'e']) => {
            number.parse::<f64>().map_or(0, |value| value as i64)
        }
        Some(number) => number.parse::<i64>().unwrap_or(if number.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }),
    }
}

/// Decimal value of a loosely typed form value, 0 when there is none.
fn loose_decimal(raw: &str) -> Decimal {
    let Some(number) = numeric_prefix(raw) else {
        return Decimal::ZERO;
    };
    let parsed = if number.contains('e') {
        Decimal::from_scientific(&number)
    } else {
        Decimal::from_str(&number)
    };
    parsed.unwrap_or(Decimal::ZERO)
}
