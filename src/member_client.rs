use actix_web::web::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use std::time;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// HTTP client the gateway uses to reach the member service.
pub struct MemberServiceClient {
    http_client: Client,
    base_url: String,
}

/// Response relayed back to the gateway's caller as is.
#[derive(Debug)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl MemberServiceClient {
    pub fn new(
        base_url: String,
        timeout: Option<time::Duration>,
    ) -> Result<MemberServiceClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(MemberServiceClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends the request to `{base_url}{path_and_query}`. Only transport failures
    /// (unreachable host, timeout) are errors; 4xx and 5xx are returned as responses.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> Result<DownstreamResponse, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let mut request = self.http_client.request(method, &url);

        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;

        Ok(DownstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
