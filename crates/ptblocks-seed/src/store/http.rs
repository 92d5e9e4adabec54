//! Sanity mutation API over blocking HTTP.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{ContentStore, Patch};
use crate::config::SanityConfig;
use crate::error::{Result, SeedError};

/// Writes documents through `POST /data/mutate/<dataset>`. Every call is one
/// transaction; nothing is retried.
pub struct HttpStore {
    client: Client,
    url: String,
    token: String,
}

#[derive(Serialize)]
struct MutateRequest<'a> {
    mutations: Vec<Mutation<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Mutation<'a> {
    Create(&'a Value),
    Patch(&'a Patch),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutateResponse {
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: Option<String>,
}

impl HttpStore {
    /// Build a store for `config`. Fails when the token or endpoint is missing.
    pub fn new(config: &SanityConfig) -> Result<Self> {
        let token = config.require_token()?.to_string();
        let url = config.mutate_url()?;
        let client = Client::builder()
            .user_agent(concat!("ptblocks-seed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url, token })
    }

    fn mutate(&self, mutation: Mutation<'_>) -> Result<MutateResponse> {
        let request = MutateRequest {
            mutations: vec![mutation],
        };
        debug!(url = %self.url, "sending mutation");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|err| format!("<unreadable response body: {err}>"));
            return Err(SeedError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response: MutateResponse = response.json()?;
        debug!(transaction_id = %response.transaction_id, "mutation committed");
        Ok(response)
    }
}

impl ContentStore for HttpStore {
    fn create(&mut self, document: Value) -> Result<String> {
        let response = self.mutate(Mutation::Create(&document))?;
        response
            .results
            .into_iter()
            .find_map(|result| result.id)
            .ok_or(SeedError::MissingDocumentId)
    }

    fn commit(&mut self, patch: Patch) -> Result<()> {
        self.mutate(Mutation::Patch(&patch))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use serde_json::json;
    use std::thread::{self, JoinHandle};
    use tiny_http::{Header, Response, Server};

    /// What the fake CMS saw: (url, authorization header, body)
    type Seen = Vec<(String, Option<String>, Value)>;

    /// Serve one canned `(status, body)` response per request
    fn fake_cms(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Seen>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let mut request = server.recv().unwrap();
                let mut content = String::new();
                request.as_reader().read_to_string(&mut content).unwrap();
                let auth = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                seen.push((
                    request.url().to_string(),
                    auth,
                    serde_json::from_str(&content).unwrap(),
                ));

                let header =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                request.respond(response).unwrap();
            }
            seen
        });

        (format!("http://127.0.0.1:{port}"), handle)
    }

    fn config(host: &str) -> SanityConfig {
        SanityConfig {
            project_id: None,
            dataset: "test".to_string(),
            token: Some("sk-test".to_string()),
            api_version: "2024-01-01".to_string(),
            api_host: Some(host.to_string()),
        }
    }

    #[test]
    fn test_create_sends_mutation_and_returns_id() {
        let (host, cms) = fake_cms(vec![(
            200,
            r#"{"transactionId":"tx1","results":[{"id":"post-123","operation":"create"}]}"#,
        )]);
        let mut store = HttpStore::new(&config(&host)).unwrap();

        let id = store.create(json!({"_type": "post", "title": "Hi"})).unwrap();
        assert_eq!(id, "post-123");

        let seen = cms.join().unwrap();
        assert_eq!(seen.len(), 1);
        let (url, auth, body) = &seen[0];
        assert_eq!(url, "/v2024-01-01/data/mutate/test?returnIds=true");
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(
            body,
            &json!({"mutations": [{"create": {"_type": "post", "title": "Hi"}}]})
        );
    }

    #[test]
    fn test_patch_sends_set_mutation() {
        let (host, cms) = fake_cms(vec![(
            200,
            r#"{"transactionId":"tx2","results":[{"id":"a","operation":"update"}]}"#,
        )]);
        let mut store = HttpStore::new(&config(&host)).unwrap();

        store
            .patch("a")
            .set("translation", json!({"_type": "reference", "_ref": "b"}))
            .commit()
            .unwrap();

        let seen = cms.join().unwrap();
        assert_eq!(
            seen[0].2,
            json!({"mutations": [{"patch": {
                "id": "a",
                "set": {"translation": {"_type": "reference", "_ref": "b"}}
            }}]})
        );
    }

    #[test]
    fn test_api_error_status() {
        let (host, cms) = fake_cms(vec![(401, r#"{"error":"Unauthorized"}"#)]);
        let mut store = HttpStore::new(&config(&host)).unwrap();

        let err = store.create(json!({"_type": "post"})).unwrap_err();
        assert!(
            matches!(&err, SeedError::Api { status: 401, body } if body.contains("Unauthorized"))
        );
        cms.join().unwrap();
    }

    #[test]
    fn test_create_without_id() {
        let (host, cms) = fake_cms(vec![(200, r#"{"transactionId":"tx3","results":[]}"#)]);
        let mut store = HttpStore::new(&config(&host)).unwrap();

        let err = store.create(json!({"_type": "post"})).unwrap_err();
        assert!(matches!(err, SeedError::MissingDocumentId));
        cms.join().unwrap();
    }

    #[test]
    fn test_missing_token() {
        let mut config = config("http://127.0.0.1:1");
        config.token = None;
        assert!(matches!(
            HttpStore::new(&config),
            Err(SeedError::Config(ConfigError::Missing(_)))
        ));
    }
}
