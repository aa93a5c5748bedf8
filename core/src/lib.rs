//! Synchronous client for the Forvo pronunciation API.
//!
//! # Overview
//! Forvo encodes every call in the URL path:
//! `https://apifree.forvo.com/key/<key>/format/json/action/<action>/<name>/<value>...`.
//! This crate validates per-call parameters, builds that URL, and runs it
//! through a pluggable `Transport`, returning the decoded JSON untouched.
//!
//! ```no_run
//! use forvo_core::{ForvoClient, Params};
//!
//! let forvo = ForvoClient::with_key("your api key");
//! let body = forvo
//!     .word_pronunciations(&Params::new().with("word", "Apfel").with("language", "de"))
//!     .unwrap();
//! println!("{body}");
//! ```
//!
//! # Design
//! - `Operation` is a closed catalog; each variant carries its action id and
//!   required parameters as data.
//! - `Params` keeps insertion order, which fixes the order of optional
//!   segments in the URL.
//! - Validation happens before any I/O. Transport errors are passed through
//!   as-is inside `ForvoError::Transport`.
//! - `UreqTransport` (feature `ureq`, on by default) is the bundled
//!   transport; hosts can implement `Transport` for any other HTTP stack.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod operation;
pub mod params;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{CallResult, ForvoClient};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ForvoError, ValidationError};
pub use http::{HttpMethod, HttpRequest};
pub use operation::Operation;
pub use params::{ParamValue, Params};
pub use request::{build_request, build_url, dash_case};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{decode, Attributes, Language, Listing, Pronunciation, Word};
