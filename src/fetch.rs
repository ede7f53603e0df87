use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::error::DaisyError;
use crate::settings::Settings;

/// What a source needs retrieved. Sources build these; the fetcher runs them.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Get { url: String },
    PostJson { url: String, body: serde_json::Value },
}

impl FetchRequest {
    pub fn url(&self) -> &str {
        match self {
            FetchRequest::Get { url } | FetchRequest::PostJson { url, .. } => url,
        }
    }
}

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self, DaisyError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(DaisyError::Client)?;
        Ok(Fetcher { client })
    }

    /// Run a request and return the response body. No retries: a failed
    /// request fails the whole run.
    pub async fn retrieve(&self, request: &FetchRequest) -> Result<String, DaisyError> {
        let url = request.url().to_string();
        let builder = match request {
            FetchRequest::Get { url } => self.client.get(url),
            FetchRequest::PostJson { url, body } => self.client.post(url).json(body),
        };

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Fetching {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));

        let start = Instant::now();
        let result = async {
            let response = builder
                .send()
                .await
                .map_err(|source| DaisyError::Retrieval { url: url.clone(), source })?;
            let status = response.status();
            if !status.is_success() {
                return Err(DaisyError::Status { url: url.clone(), status: status.as_u16() });
            }
            response
                .text()
                .await
                .map_err(|source| DaisyError::Retrieval { url: url.clone(), source })
        }
        .await;
        pb.finish_and_clear();

        let body = result?;
        info!("Fetched {} ({} bytes) in {}ms", url, body.len(), start.elapsed().as_millis());
        debug!("{} body starts with {:?}", url, body.chars().take(80).collect::<String>());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url() {
        let get = FetchRequest::Get { url: "https://dmoj.ca/problem/a".into() };
        assert_eq!(get.url(), "https://dmoj.ca/problem/a");
        let post = FetchRequest::PostJson {
            url: "https://leetcode.com/graphql".into(),
            body: serde_json::json!({ "query": "{}" }),
        };
        assert_eq!(post.url(), "https://leetcode.com/graphql");
    }

    #[test]
    fn client_build_failure_has_own_message() {
        let settings = Settings { user_agent: "bad\nagent".into(), ..Settings::default() };
        let err = Fetcher::new(&settings).err().unwrap();
        assert!(matches!(err, DaisyError::Client(_)));
        assert_eq!(err.to_string(), "could not build HTTP client");
    }
}
