use anyhow::{anyhow, bail, Context};
use reqwest::StatusCode;
use serde_json::Value;

/// HTTP client for the drones endpoint. Every call returns the decoded
/// success envelope; `{success: false}` envelopes become errors carrying the
/// server's message.
#[derive(Debug, Clone)]
pub struct DronesClient {
    http: reqwest::Client,
    endpoint: String,
}

impl DronesClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = url::Url::parse(base_url).with_context(|| format!("invalid API URL: {}", base_url))?;
        let endpoint = base
            .join("api/drones")
            .with_context(|| format!("invalid API URL: {}", base_url))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn list(&self, search: Option<&str>, drone_type: Option<&str>) -> anyhow::Result<Value> {
        let mut query = vec![("action", "list")];
        if let Some(search) = search {
            query.push(("search", search));
        }
        if let Some(drone_type) = drone_type {
            query.push(("type", drone_type));
        }

        let response = self.http.get(&self.endpoint).query(&query).send().await?;
        Self::envelope(response).await
    }

    /// POST `fields` as a form body for `action`
    pub async fn post(&self, action: &str, fields: &[(&str, String)]) -> anyhow::Result<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("action", action)])
            .form(fields)
            .send()
            .await?;
        Self::envelope(response).await
    }

    async fn envelope(response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("server returned a non-JSON response ({})", status))?;

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if status == StatusCode::OK && success {
            return Ok(body);
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("request failed with status {}", status))?;
        bail!("{} ({})", message, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let client = DronesClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/drones");

        let client = DronesClient::new("https://admin.example.com/skysail/").unwrap();
        assert_eq!(client.endpoint(), "https://admin.example.com/skysail/api/drones");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(DronesClient::new("not a url").is_err());
    }
}
