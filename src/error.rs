use std::fmt;

use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
};

#[derive(Debug)]
pub enum UpstreamError {
    Transport(reqwest::Error),
    Status(u16),
    MalformedBody(serde_json::Error),
}

impl UpstreamError {
    /// The status we answer with when the upstream lets us down.
    pub fn http_status(&self) -> Status {
        match self {
            Self::Transport(error) if error.is_timeout() => Status::GatewayTimeout,
            _ => Status::BadGateway,
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(error) => write!(f, "search request failed: {error}"),
            Self::Status(code) => write!(f, "search provider answered HTTP {code}"),
            Self::MalformedBody(error) => write!(f, "search provider sent invalid JSON: {error}"),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Status(_) => None,
            Self::MalformedBody(error) => Some(error),
        }
    }
}

impl<'r> Responder<'r, 'static> for UpstreamError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        log::error!("{self}");
        (self.http_status(), self.to_string()).respond_to(request)
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error)
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedBody(error)
    }
}
