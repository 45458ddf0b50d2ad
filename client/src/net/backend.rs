//! Transport for prepared backend requests.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails; backend data is only fetched in the
//! browser.

#![allow(clippy::unused_async)]

use social::ApiError;
use social::rest::RestRequest;

/// Status, body, and the pagination header of a finished request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub content_range: Option<String>,
}

impl RawResponse {
    /// Body of a 2xx response, or the classified backend error.
    pub fn into_body(self) -> Result<String, ApiError> {
        social::rest::check_status(self.status, &self.body)?;
        Ok(self.body)
    }
}

/// Send `request` and collect the response.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the request cannot be sent or read.
pub async fn send(request: RestRequest) -> Result<RawResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::{Method, RequestBuilder};
        use social::rest::Method as RestMethod;

        let method = match request.method {
            RestMethod::Get => Method::GET,
            RestMethod::Post => Method::POST,
            RestMethod::Patch => Method::PATCH,
            RestMethod::Delete => Method::DELETE,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let content_range = resp.headers().get("content-range");
        let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(RawResponse { status, body, content_range })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Network("not available on server".to_owned()))
    }
}
