use crate::core::Fetcher;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (+info@example.com)";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}
