//! Endpoint configuration: where the log stream and control API live

use serde::Deserialize;

/// Host plus the two paths the console talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `host[:port]`, no scheme
    pub host: String,
    /// Use wss:// and https:// instead of ws:// and http://
    pub secure: bool,
    pub stream_path: String,
    pub api_base: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:8080".to_string(),
            secure: false,
            stream_path: "/ws/logs".to_string(),
            api_base: "/api".to_string(),
        }
    }
}

/// [endpoint] as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileEndpoint {
    pub host: Option<String>,
    pub secure: Option<bool>,
    pub stream_path: Option<String>,
    pub api_base: Option<String>,
}

/// Leading slash, no trailing slash ("" stays "")
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

impl Endpoint {
    pub fn from_file(file: Option<FileEndpoint>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            host: file.host.unwrap_or(defaults.host),
            secure: file.secure.unwrap_or(defaults.secure),
            stream_path: file.stream_path.unwrap_or(defaults.stream_path),
            api_base: file.api_base.unwrap_or(defaults.api_base),
        }
    }

    /// `ws://host/ws/logs`, or `wss://` when secure
    pub fn stream_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!(
            "{}://{}{}",
            scheme,
            self.host,
            normalize_path(&self.stream_path)
        )
    }

    /// Control API path prefix, e.g. `/api`
    pub fn api_path(&self) -> String {
        normalize_path(&self.api_base)
    }

    /// `http://host/api`, or `https://` when secure
    pub fn api_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}{}", scheme, self.host, self.api_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_urls_by_default() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.stream_url(), "ws://127.0.0.1:8080/ws/logs");
        assert_eq!(endpoint.api_url(), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn secure_switches_both_schemes() {
        let endpoint = Endpoint {
            host: "console.example.com".to_string(),
            secure: true,
            ..Endpoint::default()
        };
        assert_eq!(endpoint.stream_url(), "wss://console.example.com/ws/logs");
        assert_eq!(endpoint.api_url(), "https://console.example.com/api");
    }

    #[test]
    fn paths_are_normalized() {
        let endpoint = Endpoint {
            stream_path: "ws/logs/".to_string(),
            api_base: "/api/".to_string(),
            ..Endpoint::default()
        };
        assert_eq!(endpoint.stream_url(), "ws://127.0.0.1:8080/ws/logs");
        assert_eq!(endpoint.api_path(), "/api");
    }
}
