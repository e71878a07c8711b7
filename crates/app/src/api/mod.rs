mod error;

pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

/// A typed request against an HTTP API rooted at `base_url`.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;
}

/// Send `request` and decode its JSON body.
pub async fn call<T: ApiRequest>(
    base_url: &Url,
    client: &Client,
    request: T,
) -> Result<T::Response, ApiError> {
    let response = execute(base_url, client, request).await?;
    Ok(response.json::<T::Response>().await?)
}

/// Send `request`, only checking the status; for endpoints without a body.
pub async fn execute<T: ApiRequest>(
    base_url: &Url,
    client: &Client,
    request: T,
) -> Result<Response, ApiError> {
    let response = request.build_request(base_url, client).send().await?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await?;
        Err(ApiError::from_body(status, &body))
    }
}

/// `base` with `segments` appended to its path, whether or not `base` ends
/// in a slash.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("https://api.pinata.cloud/psa").unwrap();
        assert_eq!(
            endpoint(&base, &["pins", "abc"]).as_str(),
            "https://api.pinata.cloud/psa/pins/abc"
        );

        let base = Url::parse("https://api.pinata.cloud/psa/").unwrap();
        assert_eq!(
            endpoint(&base, &["pins"]).as_str(),
            "https://api.pinata.cloud/psa/pins"
        );

        let base = Url::parse("http://127.0.0.1:5001").unwrap();
        assert_eq!(
            endpoint(&base, &["api", "v0", "resolve"]).as_str(),
            "http://127.0.0.1:5001/api/v0/resolve"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let base = Url::parse("https://example.com").unwrap();
        assert_eq!(
            endpoint(&base, &["pins", "a/b"]).as_str(),
            "https://example.com/pins/a%2Fb"
        );
    }
}
