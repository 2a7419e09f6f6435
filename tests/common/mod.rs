#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

pub const ALLOWED_ORIGIN: &str = "https://ennoid-jpg.github.io";

/// The server binary running on its own port with a fresh in-memory store.
/// Killed on drop.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_skysail-drones"));
        cmd.env("DRONES_API_PORT", port.to_string())
            .env("DRONES_API_HOST", "127.0.0.1")
            .env("DRONES_STORE", "memory")
            .env("SECURITY_ALLOWED_ORIGIN", ALLOWED_ORIGIN)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn drones_url(&self) -> String {
        format!("{}/api/drones", self.base_url)
    }

    /// POST a form to the drones endpoint with `action` in the query string
    pub async fn post_action(&self, action: &str, form: &[(&str, &str)]) -> Result<(StatusCode, Value)> {
        let res = reqwest::Client::new()
            .post(self.drones_url())
            .query(&[("action", action)])
            .form(form)
            .send()
            .await?;
        let status = res.status();
        Ok((status, res.json::<Value>().await?))
    }

    /// GET the drones list with extra query parameters
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        let res = reqwest::Client::new()
            .get(self.drones_url())
            .query(query)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
