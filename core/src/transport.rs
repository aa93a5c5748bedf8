//! The I/O seam between the request builder and the network.
//!
//! # Design
//! A `Transport` performs exactly one HTTP call per `send` and hands back the
//! decoded JSON body or its own error type. The client never inspects or
//! rewraps that error, so callers always see what the HTTP stack reported.
//! Timeouts, cancellation and connection pooling belong to the implementor.

use std::sync::Arc;

use serde_json::Value;

use crate::http::{HttpMethod, HttpRequest};

pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `request`, JSON-encoding its body (if any) and JSON-decoding
    /// the response body.
    fn send(&self, request: &HttpRequest) -> Result<Value, Self::Error>;

    fn get(&self, url: &str) -> Result<Value, Self::Error> {
        self.send(&HttpRequest::get(url))
    }

    fn post(&self, url: &str, body: Option<Value>) -> Result<Value, Self::Error> {
        self.send(&HttpRequest::new(HttpMethod::Post, url, body))
    }

    fn delete(&self, url: &str, body: Option<Value>) -> Result<Value, Self::Error> {
        self.send(&HttpRequest::new(HttpMethod::Delete, url, body))
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn send(&self, request: &HttpRequest) -> Result<Value, Self::Error> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    type Error = T::Error;

    fn send(&self, request: &HttpRequest) -> Result<Value, Self::Error> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn send(&self, request: &HttpRequest) -> Result<Value, Self::Error> {
        (**self).send(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use serde_json::Value;

    use super::Transport;
    use crate::http::{HttpMethod, HttpRequest};

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// Non-2xx responses come back as `ureq::Error::StatusCode`, and bodies
    /// that are not JSON as `ureq::Error::Json`, both straight from ureq.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        /// Use a caller-configured agent (timeouts, proxies, TLS).
        pub fn with_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }

        pub fn agent(&self) -> &ureq::Agent {
            &self.agent
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::with_agent(ureq::Agent::new_with_defaults())
        }
    }

    impl std::fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UreqTransport").finish_non_exhaustive()
        }
    }

    fn with_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    impl Transport for UreqTransport {
        type Error = ureq::Error;

        fn send(&self, request: &HttpRequest) -> Result<Value, ureq::Error> {
            let url = request.url.as_str();
            let headers = request.headers.as_slice();
            let mut response = match (request.method, &request.body) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(url), headers).send_json(body)
                }
                (HttpMethod::Post, None) => {
                    with_headers(self.agent.post(url), headers).send_empty()
                }
                (HttpMethod::Delete, Some(body)) => {
                    with_headers(self.agent.delete(url), headers)
                        .force_send_body()
                        .send_json(body)
                }
                (HttpMethod::Delete, None) => with_headers(self.agent.delete(url), headers).call(),
            }?;
            response.body_mut().read_json::<Value>()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("unreachable")]
    struct Unreachable;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Recorder {
        type Error = Unreachable;

        fn send(&self, request: &HttpRequest) -> Result<Value, Unreachable> {
            self.sent.borrow_mut().push(request.clone());
            Ok(json!({ "method": request.method.as_str() }))
        }
    }

    #[test]
    fn provided_methods_build_requests() {
        let recorder = Recorder::default();
        assert_eq!(recorder.get("http://x/a").unwrap(), json!({"method": "GET"}));
        recorder.post("http://x/b", Some(json!({"a": 1}))).unwrap();
        recorder.delete("http://x/c", None).unwrap();

        let sent = recorder.sent.borrow();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert!(sent[0].body.is_none());
        assert_eq!(sent[1].method, HttpMethod::Post);
        assert_eq!(sent[1].body, Some(json!({"a": 1})));
        assert_eq!(sent[2].method, HttpMethod::Delete);
        assert_eq!(sent[2].url, "http://x/c");
    }

    #[test]
    fn references_and_boxes_are_transports() {
        let recorder = Recorder::default();
        let by_ref: &Recorder = &recorder;
        by_ref.get("http://x/1").unwrap();

        let boxed: Box<dyn Transport<Error = Unreachable>> = Box::new(Recorder::default());
        assert_eq!(boxed.get("http://x/2").unwrap(), json!({"method": "GET"}));

        let shared = Arc::new(Recorder::default());
        shared.get("http://x/3").unwrap();
        assert_eq!(shared.sent.borrow().len(), 1);
        assert_eq!(recorder.sent.borrow().len(), 1);
    }
}
