//! Best-effort delivery of encoded outputs to subscriber endpoints.
//!
//! # Responsibilities
//! - POST each successful output payload to every configured URL
//! - Isolate per-target failures: one bad subscriber never blocks the rest
//! - Keep forwarding invisible to the original caller
//!
//! # Design Decisions
//! - Targets are validated once at startup; entries that do not parse as
//!   absolute URIs are skipped with a warning, matching the permissive
//!   handling of the settings artifact they come from
//! - Delivery is sequential and inline with the request; no retries, no
//!   inspection of the subscriber response beyond its status class

use axum::body::{Body, Bytes};
use axum::http::{header, Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::model::CodecMode;
use crate::observability::metrics;

/// Outcome of one delivery attempt, only used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Rejected,
    Unreachable,
}

/// Fan-out sender for downstream subscribers.
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    targets: Vec<Uri>,
    content_type: &'static str,
}

impl Forwarder {
    /// Build a forwarder from configured target URLs.
    pub fn new(targets: &[String], mode: CodecMode) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let targets = targets
            .iter()
            .filter_map(|raw| match raw.parse::<Uri>() {
                Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => Some(uri),
                _ => {
                    tracing::warn!(url = %raw, "Skipping invalid downstream url");
                    None
                }
            })
            .collect();
        let content_type = match mode {
            CodecMode::Binary => "application/octet-stream",
            CodecMode::Json => "application/json",
        };
        Self {
            client,
            targets,
            content_type,
        }
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Attempt delivery of the payload to every target.
    ///
    /// Every target gets exactly one attempt regardless of earlier outcomes.
    /// Failures are logged and counted, never raised.
    pub async fn fan_out(&self, payload: &Bytes) -> Vec<Delivery> {
        let mut outcomes = Vec::with_capacity(self.targets.len());
        for url in &self.targets {
            let outcome = self.deliver(url, payload.clone()).await;
            if outcome != Delivery::Delivered {
                metrics::record_downstream_failure(&url.to_string());
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn deliver(&self, url: &Uri, payload: Bytes) -> Delivery {
        let request = match Request::post(url.clone())
            .header(header::CONTENT_TYPE, self.content_type)
            .body(Body::from(payload))
        {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to build downstream request");
                return Delivery::Unreachable;
            }
        };

        match self.client.request(request).await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(url = %url, status = %response.status(), "Delivered to downstream url");
                Delivery::Delivered
            }
            Ok(response) => {
                tracing::warn!(url = %url, status = %response.status(), "Downstream url rejected payload");
                Delivery::Rejected
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to publish to downstream url");
                Delivery::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_targets_are_skipped() {
        let forwarder = Forwarder::new(
            &[
                "http://127.0.0.1:9001/hook".to_string(),
                "not a url".to_string(),
                "/relative/only".to_string(),
            ],
            CodecMode::Json,
        );
        assert_eq!(forwarder.target_count(), 1);
    }

    #[test]
    fn test_duplicate_targets_are_kept() {
        let forwarder = Forwarder::new(
            &[
                "http://127.0.0.1:9001/hook".to_string(),
                "http://127.0.0.1:9001/hook".to_string(),
            ],
            CodecMode::Binary,
        );
        assert_eq!(forwarder.target_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_target_list_is_a_no_op() {
        let forwarder = Forwarder::new(&[], CodecMode::Json);
        let outcomes = forwarder.fan_out(&Bytes::from_static(b"{}")).await;
        assert!(outcomes.is_empty());
    }
}
