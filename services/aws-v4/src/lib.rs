//! AWS SigV4 signer.
//!
//! Sign http requests with [Signature Version 4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
//! by attaching `x-amz-date`, `authorization` and, for temporary credentials,
//! `x-amz-security-token` headers.
//!
//! # Example
//!
//! ```
//! use sigv4_auth::Signer;
//! use sigv4_auth::time::parse_rfc3339;
//!
//! # fn main() -> sigv4_auth::Result<()> {
//! let signer = Signer::builder()
//!     .access_key("AccessKeyId")
//!     .secret_key("SecretAccessKey")
//!     .service("execute-api")
//!     .region("us-east-1")
//!     .build()?;
//!
//! let mut req = http::Request::get("https://www.example.com/details?username=tstark&team=avengers")
//!     .body("")?;
//!
//! // Use `sign_now` to sign with the current time.
//! signer.sign(&mut req, parse_rfc3339("2020-04-20T20:30:30Z")?)?;
//!
//! assert_eq!(req.headers()["x-amz-date"], "20200420T203030Z");
//! assert!(req.headers().contains_key("authorization"));
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! - Only header based signing, no presigned urls.
//! - Only `host` and `x-amz-date` are signed.
//! - The query string is signed exactly as it will be sent. Callers must
//!   provide parameters in canonical (sorted) order when the target service
//!   requires it.
//! - The path is encoded once more before signing, except for `s3` which
//!   signs it as sent. Use [`Signer::with_path_encoding`] to override.
//! - Dot segments in the path are not resolved.
//! - No chunked payload signing.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::Builder;
pub use config::Config;

mod credential;
pub use credential::Credential;

pub mod sign_request;
pub use sign_request::PathEncoding;

mod signer;
pub use signer::SignedOutput;
pub use signer::Signer;

mod constants;

pub use sigv4_auth_core::time;
pub use sigv4_auth_core::{Error, ErrorKind, Result, SignableRequest};
