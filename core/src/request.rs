//! Path-segment URL builder for the Forvo API.
//!
//! # Design
//! Every call is encoded as `/name/value` pairs appended to the base URL:
//! `key`, `format`, `action`, the required parameters in declared order, then
//! the optional ones in insertion order. There is no query string.
//!
//! The casing and sanitizing rules are undocumented by the service and kept
//! exactly as-is: names are dash-cased, text values have spaces turned into
//! underscores and are lowercased, nothing is percent-encoded.

use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ValidationError;
use crate::http::HttpRequest;
use crate::operation::Operation;
use crate::params::{url_safe, ParamValue, Params};

const FORMAT: &str = "json";

/// `otherParam` -> `other-param`. A dash goes between an ASCII lowercase
/// letter and the ASCII uppercase letter after it, then everything is
/// lowercased.
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('-');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

/// Fail on the first required parameter, in declared order, that is missing
/// or falsy.
pub fn check_required(operation: Operation, params: &Params) -> Result<(), ValidationError> {
    for &name in operation.required_params() {
        if !params.get(name).is_some_and(ParamValue::is_truthy) {
            return Err(ValidationError::MissingParameter(name.to_string()));
        }
    }
    Ok(())
}

/// Build the full request URL for `operation`.
pub fn build_url(
    config: &ApiConfig,
    operation: Operation,
    params: &Params,
) -> Result<String, ValidationError> {
    check_required(operation, params)?;

    let required = operation.required_params();
    let mut segments: Vec<(String, String)> = vec![
        ("key".to_string(), url_safe(config.key())),
        ("format".to_string(), FORMAT.to_string()),
        ("action".to_string(), url_safe(operation.action())),
    ];
    for &name in required {
        if let Some(value) = params.get(name) {
            segments.push((dash_case(name), value.to_segment()));
        }
    }

    let mut undocumented = Vec::new();
    for (name, value) in params.iter().filter(|(name, _)| !required.contains(name)) {
        if !operation.is_known_param(name) {
            undocumented.push(name);
        }
        segments.push((dash_case(name), value.to_segment()));
    }

    debug!(
        action = operation.action(),
        segments = segments.len(),
        ?undocumented,
        "built forvo url"
    );

    let mut url = config.base_url().to_string();
    for (name, value) in &segments {
        url.push('/');
        url.push_str(name);
        url.push('/');
        url.push_str(value);
    }
    Ok(url)
}

/// Same as `build_url`, wrapped in a bodiless GET.
pub fn build_request(
    config: &ApiConfig,
    operation: Operation,
    params: &Params,
) -> Result<HttpRequest, ValidationError> {
    build_url(config, operation, params).map(HttpRequest::get)
}
