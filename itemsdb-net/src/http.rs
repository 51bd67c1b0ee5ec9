//! HTTP transport built on hyper

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use hyper::Uri;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use tracing::{debug, error};

use crate::{decode_body, Request, Result, Transport, TransportError};

const JSON: &str = "application/json";

/// Blocking HTTP/1 transport
///
/// Owns a current-thread tokio runtime and blocks on each request, so it
/// must not be used from inside another runtime.
pub struct HttpTransport {
    base_url: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    client: Client<HttpConnector, Full<Bytes>>,
    runtime: tokio::runtime::Runtime,
}

impl HttpTransport {
    /// Create a transport for the service rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        let uri: Uri = base_url
            .parse()
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if uri.scheme_str() != Some("http") || uri.authority().is_none() {
            return Err(TransportError::InvalidUrl(format!(
                "{}: expected an absolute http:// URL",
                base_url
            )));
        }
        if uri.query().is_some() {
            return Err(TransportError::InvalidUrl(format!(
                "{}: base URL must not carry a query",
                base_url
            )));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = Client::builder(TokioExecutor::new()).build_http();

        Ok(HttpTransport {
            base_url,
            headers: Vec::new(),
            client,
            runtime,
        })
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        self.headers.push((name, value));
        Ok(self)
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a service-relative path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_request(&self, request: &Request) -> Result<hyper::Request<Full<Bytes>>> {
        let url = self.url_for(&request.path);
        let uri: Uri = url
            .parse()
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut builder = hyper::Request::builder()
            .method(request.verb().method())
            .uri(uri)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);

        if let Some(locale) = &request.locale {
            let value = HeaderValue::from_str(locale)
                .map_err(|e| TransportError::InvalidHeader(format!("locale {}: {}", locale, e)))?;
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        let body = request
            .options
            .body
            .clone()
            .map(Bytes::from)
            .unwrap_or_default();

        builder
            .body(Full::new(body))
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> Result<Value> {
        let http_request = self.build_request(&request)?;
        let method = http_request.method().clone();
        let path = request.path;

        self.runtime.block_on(async {
            let response = self.client.request(http_request).await.map_err(|e| {
                error!("{} {} failed: {}", method, path, e);
                TransportError::Connection(e.to_string())
            })?;

            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| TransportError::Connection(e.to_string()))?
                .to_bytes();

            debug!("{} {} -> {} ({} bytes)", method, path, status, body.len());

            if !status.is_success() {
                error!("{} {} returned {}", method, path, status);
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }

            decode_body(&body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verb;
    use serde_json::json;

    #[test]
    fn test_base_url_validation() {
        assert!(HttpTransport::new("http://127.0.0.1:8080").is_ok());
        assert!(HttpTransport::new("http://localhost/api/").is_ok());

        assert!(matches!(HttpTransport::new("not a url"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(HttpTransport::new("/relative"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(HttpTransport::new("ftp://host/"), Err(TransportError::InvalidUrl(_))));
        assert!(matches!(
            HttpTransport::new("http://host/?a=1"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_join() {
        let with_path = HttpTransport::new("http://host/api").unwrap();
        assert_eq!(with_path.base_url(), "http://host/api/");
        assert_eq!(with_path.url_for("items/books"), "http://host/api/items/books");

        let bare = HttpTransport::new("http://host:9000/").unwrap();
        assert_eq!(bare.url_for("/items"), "http://host:9000/items");
    }

    #[test]
    fn test_build_request() {
        let transport = HttpTransport::new("http://host/v1")
            .unwrap()
            .with_header("authorization", "Bearer t0k3n")
            .unwrap();

        let request = Request::new("items/books/search", Verb::Default)
            .with_locale(Some("de-DE".to_string()))
            .with_json(&json!({"query": "lamp"}))
            .unwrap();
        let built = transport.build_request(&request).unwrap();

        assert_eq!(built.method(), hyper::Method::POST);
        assert_eq!(built.uri().to_string(), "http://host/v1/items/books/search");
        assert_eq!(built.headers()[ACCEPT_LANGUAGE], "de-DE");
        assert_eq!(built.headers()[CONTENT_TYPE], JSON);
        assert_eq!(built.headers()["authorization"], "Bearer t0k3n");
    }

    #[test]
    fn test_invalid_headers_rejected() {
        let transport = HttpTransport::new("http://host/").unwrap();
        assert!(matches!(
            transport.with_header("bad header", "x"),
            Err(TransportError::InvalidHeader(_))
        ));

        let transport = HttpTransport::new("http://host/").unwrap();
        let request = Request::new("items", Verb::Read).with_locale(Some("de\n".to_string()));
        assert!(matches!(
            transport.build_request(&request),
            Err(TransportError::InvalidHeader(_))
        ));
    }
}
