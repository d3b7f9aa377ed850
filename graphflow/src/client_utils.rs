use crate::GenerationError;
use reqwest::{
    header::{self, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on non 2xx status code.
///
/// The `Content-Type: application/json` header is always set; caller
/// headers are merged in but cannot override it.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<R, GenerationError> {
    let mut headers = headers;
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let response = client.post(url).headers(headers).json(data).send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(GenerationError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
