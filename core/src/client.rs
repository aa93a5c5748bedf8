//! Facade over the Forvo operation catalog.
//!
//! # Design
//! `ForvoClient` holds only its `ApiConfig` and a transport; nothing mutable
//! survives between calls. Each operation validates and builds the URL first,
//! so a bad parameter set never reaches the network, then runs one transport
//! call and returns its result untouched.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ForvoError, ValidationError};
use crate::http::HttpRequest;
use crate::operation::Operation;
use crate::params::Params;
use crate::request;
use crate::transport::Transport;

/// Result of a client call: the decoded body, or a validation/transport error.
pub type CallResult<T> = Result<Value, ForvoError<<T as Transport>::Error>>;

#[derive(Debug, Clone)]
pub struct ForvoClient<T> {
    config: ApiConfig,
    transport: T,
}

#[cfg(feature = "ureq")]
impl ForvoClient<crate::transport::UreqTransport> {
    /// Client for the public endpoint using a default ureq agent.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self::new(ApiConfig::new(key), crate::transport::UreqTransport::default())
    }
}

impl<T: Transport> ForvoClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `operation` without sending it.
    pub fn build_request(
        &self,
        operation: Operation,
        params: &Params,
    ) -> Result<HttpRequest, ValidationError> {
        request::build_request(&self.config, operation, params)
    }

    /// Validate, build and send one request.
    pub fn call(&self, operation: Operation, params: &Params) -> CallResult<T> {
        let request = self.build_request(operation, params)?;
        debug!(
            action = operation.action(),
            method = request.method.as_str(),
            "sending forvo request"
        );
        self.transport.send(&request).map_err(|err| {
            warn!(action = operation.action(), error = %err, "forvo request failed");
            ForvoError::Transport(err)
        })
    }

    /// `call` for loosely-typed parameters. Anything but a JSON object (or
    /// `null`) fails with "Parameters should be an object".
    pub fn call_json(&self, operation: Operation, params: &Value) -> CallResult<T> {
        let params = Params::from_json(params)?;
        self.call(operation, &params)
    }

    /// All pronunciations of `word`.
    ///
    /// Optional: `language`, `country` (alpha-3), `username`, `sex` (`m`/`f`),
    /// `rate`, `order` (`date-desc`, `date-asc`, `rate-desc`, `rate-asc`),
    /// `limit`, `groupInLanguages`.
    pub fn word_pronunciations(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::WordPronunciations, params)
    }

    /// Top-rated pronunciation of `word`. Optional: `language`.
    pub fn standard_pronunciation(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::StandardPronunciation, params)
    }

    /// Languages available on Forvo.
    ///
    /// Optional: `language` (a code, or `native`), `order` (`name`/`code`),
    /// `minPronunciations`.
    pub fn language_list(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::LanguageList, params)
    }

    /// Most popular languages. Optional: `language`, `order`, `limit`.
    pub fn popular_languages(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::PopularLanguages, params)
    }

    /// Words starting with `search` that have at least one pronunciation,
    /// alphabetically. Optional: `language`, `pagesize` (1-100), `page`.
    pub fn pronounced_words_search(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::PronouncedWordsSearch, params)
    }

    /// Words starting with `search`, alphabetically. Optional: `language`,
    /// `pagesize`, `page`.
    pub fn words_search(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::WordsSearch, params)
    }

    /// Most popular words with at least one pronunciation. Optional:
    /// `language`, `limit`.
    pub fn popular_pronounced_words(&self, params: &Params) -> CallResult<T> {
        self.call(Operation::PopularPronouncedWords, params)
    }
}
