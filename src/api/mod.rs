//! Client for the platform's REST API server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TkctlError};

/// Version information reported by the API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server version, e.g. `1.16.3`.
    pub version: String,
    /// Git commit the server was built from.
    #[serde(default)]
    pub commit: String,
}

/// Blocking HTTP client for the API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_uri: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    /// Create a client for `base_uri` with the given request timeout.
    pub fn new(base_uri: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tkctl/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TkctlError::ApiRequest {
                url: base_uri.to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URI without a trailing slash.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_uri, path)
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TkctlError::ApiRequest {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TkctlError::ApiRequest {
                url,
                message: format!("HTTP {}", response.status()),
            });
        }

        Ok(response)
    }

    /// Check that the server answers its health endpoint.
    pub fn health(&self) -> Result<()> {
        self.get("/health").map(|_| ())
    }

    /// Fetch the server's version information.
    pub fn server_info(&self) -> Result<ServerInfo> {
        let url = self.url("/v1/info");
        self.get("/v1/info")?
            .json::<ServerInfo>()
            .map_err(|e| TkctlError::ApiRequest {
                url,
                message: format!("failed to parse server info: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8088/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_uri(), "http://localhost:8088");
    }

    #[test]
    fn health_succeeds_on_200() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).body("OK");
        });

        assert!(client(&server).health().is_ok());
        mock.assert();
    }

    #[test]
    fn health_fails_on_503() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        });

        let err = client(&server).health().unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn server_info_parses_version() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/info");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"version":"v1.16.3","commit":"abc123","namespace":"testkube"}"#);
        });

        let info = client(&server).server_info().unwrap();
        assert_eq!(info.version, "v1.16.3");
        assert_eq!(info.commit, "abc123");
    }

    #[test]
    fn server_info_rejects_bad_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/info");
            then.status(200).body("not json");
        });

        let err = client(&server).server_info().unwrap_err();
        assert!(matches!(err, TkctlError::ApiRequest { .. }));
        assert!(err.to_string().contains("failed to parse server info"));
    }

    #[test]
    fn server_info_fails_on_503_with_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/info");
            then.status(503);
        });

        let err = client(&server).server_info().unwrap_err();
        match err {
            TkctlError::ApiRequest { url, message } => {
                assert_eq!(url, server.url("/v1/info"));
                assert!(message.contains("503"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
