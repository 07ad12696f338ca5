//! HTTP client for the quackd API.

use anyhow::{anyhow, Context, Result};
use quack_common::rpc::{
    HealthResponse, LearnRequest, LearnResponse, PromptRequest, PromptResponse,
};
use quack_common::DEFAULT_LISTEN_ADDR;
use std::time::Duration;

/// Client for the quackd HTTP API.
pub struct QuackClient {
    addr: String,
    http: reqwest::Client,
}

impl QuackClient {
    /// Discover the daemon address with a fallback chain
    ///
    /// Priority:
    /// 1. Explicit --addr flag (passed as argument)
    /// 2. $QUACKD_ADDR environment variable
    /// 3. Built-in default (loopback)
    pub fn discover_addr(explicit_addr: Option<&str>) -> String {
        if let Some(addr) = explicit_addr {
            return addr.to_string();
        }

        if let Ok(addr) = std::env::var("QUACKD_ADDR") {
            return addr;
        }

        DEFAULT_LISTEN_ADDR.to_string()
    }

    pub fn new(explicit_addr: Option<&str>) -> Result<Self> {
        let addr = Self::discover_addr(explicit_addr);

        // External lookups on the daemon side can take several seconds;
        // leave room before giving up on the whole request.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { addr, http })
    }

    pub async fn ask(&self, prompt: &str) -> Result<PromptResponse> {
        let response = self
            .http
            .post(self.url("/v1/ask"))
            .json(&PromptRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| unreachable_daemon(&self.addr, e))?;

        Self::check_status(&response)?;
        Ok(response.json().await?)
    }

    pub async fn learn(&self, requests: &[LearnRequest]) -> Result<LearnResponse> {
        let response = self
            .http
            .post(self.url("/v1/learn"))
            .json(&requests)
            .send()
            .await
            .map_err(|e| unreachable_daemon(&self.addr, e))?;

        Self::check_status(&response)?;
        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(self.url("/v1/health"))
            .send()
            .await
            .map_err(|e| unreachable_daemon(&self.addr, e))?;

        Self::check_status(&response)?;
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(anyhow!("daemon returned {}", response.status()));
        }
        Ok(())
    }
}

fn unreachable_daemon(addr: &str, e: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "Cannot reach the quack daemon at {} ({})\n\n\
         Is quackd running? Start it with:\n\
           systemctl start quackd\n\
         or point me elsewhere with --addr / $QUACKD_ADDR",
        addr,
        e
    )
}
