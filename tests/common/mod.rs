use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use meme_search::{
    build_rocket,
    client::{SearchClient, parse_upstream_body},
    error::UpstreamError,
    model::UpstreamResult,
};
use rocket::local::blocking::Client;

pub type Calls = Arc<Mutex<Vec<String>>>;

/// Answers every search with the same raw upstream body.
pub struct CannedUpstream {
    body: &'static str,
    status: Option<u16>,
    calls: Calls,
}

#[async_trait]
impl SearchClient for CannedUpstream {
    async fn search(&self, term: &str) -> Result<UpstreamResult, UpstreamError> {
        self.calls.lock().unwrap().push(term.to_owned());
        match self.status {
            Some(code) => Err(UpstreamError::Status(code)),
            None => parse_upstream_body(self.body.as_bytes()),
        }
    }
}

pub fn client_answering(body: &'static str) -> (Client, Calls) {
    client_with(CannedUpstream {
        body,
        status: None,
        calls: Calls::default(),
    })
}

pub fn client_failing_with(status: u16) -> (Client, Calls) {
    client_with(CannedUpstream {
        body: "",
        status: Some(status),
        calls: Calls::default(),
    })
}

fn client_with(upstream: CannedUpstream) -> (Client, Calls) {
    let calls = upstream.calls.clone();
    let rocket = build_rocket(
        rocket::Config::figment(),
        Box::new(upstream),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"),
    );

    (Client::untracked(rocket).unwrap(), calls)
}

pub const CAT_AND_DOG: &str = r#"[
    {"id": "1", "meme": {"name": "Cat", "url": "http://x/1", "image": {"medium": "http://x/1.png"}}},
    {"id": "2", "meme": {"name": "Dog", "url": "http://x/2"}}
]"#;
