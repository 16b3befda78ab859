//! Steps of the [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html).
//!
//! Every function here is pure: same inputs, same outputs, no I/O.

use std::fmt::{Display, Formatter};

use http::Method;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use sigv4_auth_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use sigv4_auth_core::time::{format_date, format_iso8601, DateTime};
use sigv4_auth_core::{Error, Result, SignableRequest};

use crate::constants::{
    ALGORITHM, AWS4_REQUEST, AWS_URI_ENCODE_SET, EMPTY_STRING_SHA256, SIGNED_HEADERS, X_AMZ_DATE,
};

/// The instant a request is signed at.
///
/// Both `timestamp` and `date_stamp` are derived from the same instant, so the
/// `x-amz-date` header can never disagree with the credential scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningMoment {
    timestamp: String,
    date_stamp: String,
}

impl SigningMoment {
    /// Derive the signing moment from given time.
    pub fn new(time: DateTime) -> Self {
        Self {
            timestamp: format_iso8601(time),
            date_stamp: format_date(time),
        }
    }

    /// Timestamp in `20220313T072004Z` form.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Date in `20220313` form.
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }
}

/// How the request path is URI encoded in the canonical request.
///
/// The path on the wire is already encoded once. AWS services encode it once
/// more, except s3 which signs the path as sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathEncoding {
    /// URI encode the path as sent, so `%20` becomes `%2520`.
    Double,
    /// Use the path as sent.
    Single,
}

impl PathEncoding {
    /// Path encoding used by given service.
    pub fn for_service(service: &str) -> Self {
        match service {
            "s3" | "s3express" => PathEncoding::Single,
            _ => PathEncoding::Double,
        }
    }
}

/// CanonicalRequest is the normalized form of a request that gets hashed.
///
/// ```text
/// GET
/// /details
/// username=tstark&team=avengers
/// host:www.example.com
/// x-amz-date:20200420T203030Z
///
/// host;x-amz-date
/// e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method.
    pub method: Method,
    /// URI encoded path.
    pub path: String,
    /// Query string, exactly as it will be sent.
    pub query: String,
    /// Value of the `host` header.
    pub host: String,
    /// Value of the `x-amz-date` header.
    pub timestamp: String,
    /// Hex encoded SHA256 of the payload.
    pub payload_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical request from given request at given moment.
    pub fn build(
        req: &impl SignableRequest,
        moment: &SigningMoment,
        encoding: PathEncoding,
    ) -> Result<Self> {
        let uri = req.uri()?;

        let host = uri
            .host()
            .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;
        // Same as the host header sent by http clients: no userinfo, no default port.
        let host = match uri.port_u16() {
            Some(port) if !is_default_port(uri.scheme_str(), port) => format!("{host}:{port}"),
            _ => host.to_string(),
        };

        Ok(CanonicalRequest {
            method: req.method().clone(),
            path: canonical_path(uri.path(), encoding),
            query: uri.query().unwrap_or_default().to_string(),
            host,
            timestamp: moment.timestamp().to_string(),
            payload_hash: match req.body() {
                Some(body) => hex_sha256(body),
                None => EMPTY_STRING_SHA256.to_string(),
            },
        })
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        // Signed headers are fixed and already sorted.
        writeln!(f, "host:{}", self.host)?;
        writeln!(f, "{X_AMZ_DATE}:{}", self.timestamp)?;
        writeln!(f)?;
        writeln!(f, "{SIGNED_HEADERS}")?;
        write!(f, "{}", self.payload_hash)
    }
}

fn is_default_port(scheme: Option<&str>, port: u16) -> bool {
    matches!((scheme, port), (Some("http"), 80) | (Some("https"), 443))
}

/// Canonical form of the path as sent.
///
/// The path is never decoded, so `%2F` stays inside its segment. `.` and `..`
/// are not resolved.
fn canonical_path(path: &str, encoding: PathEncoding) -> String {
    let path = if path.is_empty() { "/" } else { path };

    match encoding {
        PathEncoding::Double => utf8_percent_encode(path, &AWS_URI_ENCODE_SET).to_string(),
        PathEncoding::Single => path.to_string(),
    }
}

/// Scope: `20220313/<region>/<service>/aws4_request`
pub fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{date_stamp}/{region}/{service}/{AWS4_REQUEST}")
}

/// StringToSign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(timestamp: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key scoped to date, region and service.
///
/// The key changes every day, so it must not be reused across date stamps.
pub fn generate_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(&sign_date, region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(&sign_region, service.as_bytes());
    // Sign request
    hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())
}

/// Lowercase hex encoded signature of string to sign.
pub fn calculate_signature(signing_key: &[u8], string_to_sign: &str) -> String {
    hex_hmac_sha256(signing_key, string_to_sign.as_bytes())
}

/// Format the value of `Authorization` header.
pub fn format_authorization_header(access_key: &str, scope: &str, signature: &str) -> String {
    format!(
        "{ALGORITHM} Credential={access_key}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}"
    )
}
