use crate::domain::HttpProbe;
use anyhow::{Context, Result};
use std::time::Duration;

/// Blocking HTTP probe backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: reqwest::blocking::Client,
}

impl ReqwestProbe {
    /// `timeout` bounds a single request so one hung attempt cannot eat the budget
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("creating HTTP client")?;

        Ok(Self { client })
    }
}

impl HttpProbe for ReqwestProbe {
    fn get_status(&self, url: &str) -> Result<u16> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {url}"))?;

        Ok(response.status().as_u16())
    }
}
