// Control module - start/stop commands for the remote service
//
// Each command is a single `POST {base}/{name}` with an empty body. The
// response body is free-form text. A network failure (refused, DNS, reset,
// unreadable body) is an error here; an HTTP non-success status is not, it
// comes back as a `ControlResponse` for the caller to classify.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Commands the control service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Stop,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}' (expected 'start' or 'stop')")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            _ => Err(UnknownCommand(s.to_string())),
        }
    }
}

/// What the control service answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlResponse {
    pub status: u16,
    pub body: String,
}

impl ControlResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// The request never produced a readable response
    #[error("{0}")]
    Unreachable(String),
}

/// Settled result of one control request, as delivered back to an event loop
#[derive(Debug)]
pub struct CommandOutcome {
    pub command: Command,
    pub result: Result<ControlResponse, ControlError>,
}

/// Anything that can carry a command to the remote service
pub trait ControlService {
    fn invoke(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<ControlResponse, ControlError>> + Send;
}

/// HTTP implementation over reqwest
#[derive(Debug, Clone)]
pub struct HttpControlClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpControlClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8080/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn command_url(&self, command: Command) -> String {
        format!("{}/{}", self.base_url, command.as_str())
    }
}

impl ControlService for HttpControlClient {
    async fn invoke(&self, command: Command) -> Result<ControlResponse, ControlError> {
        let url = self.command_url(command);
        tracing::debug!(%command, %url, "Sending control request");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ControlError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ControlError::Unreachable(e.to_string()))?;

        tracing::debug!(%command, status, "Control request settled");
        Ok(ControlResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use tokio::net::TcpListener;

    async fn spawn_control_server() -> String {
        let app = Router::new()
            .route("/api/start", post(|| async { "Server started (PID: 4242)" }))
            .route(
                "/api/stop",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "no server running") }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    #[test]
    fn parse_commands() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!(" STOP ".parse::<Command>(), Ok(Command::Stop));
        assert_eq!(
            "restart".parse::<Command>(),
            Err(UnknownCommand("restart".to_string()))
        );
    }

    #[test]
    fn command_url_joins_base() {
        let client = HttpControlClient::new("http://localhost:8080/api/");
        assert_eq!(
            client.command_url(Command::Stop),
            "http://localhost:8080/api/stop"
        );
    }

    #[test]
    fn success_is_any_2xx() {
        let ok = |status| ControlResponse {
            status,
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(302).is_success());
        assert!(!ok(500).is_success());
    }

    #[tokio::test]
    async fn start_returns_body_verbatim() {
        let client = HttpControlClient::new(spawn_control_server().await);
        let response = client.invoke(Command::Start).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, "Server started (PID: 4242)");
    }

    #[tokio::test]
    async fn non_success_status_is_a_response_not_an_error() {
        let client = HttpControlClient::new(spawn_control_server().await);
        let response = client.invoke(Command::Stop).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "no server running");
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpControlClient::new(format!("http://{}/api", addr));
        let result = client.invoke(Command::Start).await;
        assert!(matches!(result, Err(ControlError::Unreachable(_))));
    }
}
