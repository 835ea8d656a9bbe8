use anyhow::{Context, Result};
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and body of a completed request. Non-2xx statuses are not errors
/// here; callers decide what a given status means.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

// --- Transport trait ---

pub trait HttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)], query: &[(&str, &str)]) -> Result<HttpReply>;

    fn post_form(&self, url: &str, query: &[(&str, &str)], form: &[(&str, &str)]) -> Result<HttpReply>;
}

// --- reqwest implementation ---

#[derive(Debug)]
pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response.text().context("Failed to read response body")?;
        Ok(HttpReply { status, body })
    }
}

impl HttpClient for BlockingHttp {
    fn get(&self, url: &str, headers: &[(&str, &str)], query: &[(&str, &str)]) -> Result<HttpReply> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .with_context(|| format!("GET {} failed", url))?;
        Self::finish(response)
    }

    fn post_form(&self, url: &str, query: &[(&str, &str)], form: &[(&str, &str)]) -> Result<HttpReply> {
        let response = self
            .client
            .post(url)
            .query(query)
            .form(form)
            .send()
            .with_context(|| format!("POST {} failed", url))?;
        Self::finish(response)
    }
}

// --- Scripted client for tests ---
