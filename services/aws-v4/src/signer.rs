use std::fmt::{Debug, Formatter};

use http::header;
use http::HeaderValue;
use log::debug;
use sigv4_auth_core::time::{self, DateTime};
use sigv4_auth_core::{Error, Result, SignableRequest};

use crate::config::{Builder, Config};
use crate::constants::{X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::sign_request::{
    calculate_signature, credential_scope, format_authorization_header, generate_signing_key,
    string_to_sign, CanonicalRequest, PathEncoding, SigningMoment,
};
use crate::Credential;

/// Signer that implements AWS SigV4 with header based signing.
///
/// Only `host` and `x-amz-date` are signed. Signer holds no mutable state,
/// so it can be shared between threads and used concurrently.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Clone)]
pub struct Signer {
    credential: Credential,
    service: String,
    region: String,
    path_encoding: PathEncoding,
}

impl Signer {
    /// Create a new signer for given service and region.
    ///
    /// Returns a `ConfigInvalid` error if any of the inputs is empty. An empty
    /// session token is treated as no token.
    pub fn new(service: &str, region: &str, mut credential: Credential) -> Result<Self> {
        if service.is_empty() {
            return Err(Error::config_invalid("service is required"));
        }
        if region.is_empty() {
            return Err(Error::config_invalid("region is required"));
        }
        credential.check()?;
        credential.session_token = credential.session_token.filter(|v| !v.is_empty());

        Ok(Self {
            credential,
            service: service.to_string(),
            region: region.to_string(),
            path_encoding: PathEncoding::for_service(service),
        })
    }

    /// Override the path encoding picked from the service name.
    pub fn with_path_encoding(mut self, encoding: PathEncoding) -> Self {
        self.path_encoding = encoding;
        self
    }

    /// Create a builder of signer.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Create a signer from config.
    pub fn from_config(cfg: Config) -> Result<Self> {
        cfg.build()
    }

    /// Service signing name of this signer.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region of this signer.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Path encoding of this signer.
    pub fn path_encoding(&self) -> PathEncoding {
        self.path_encoding
    }

    /// Calculate the signature of request at given time without touching it.
    pub fn calculate(&self, req: &impl SignableRequest, now: DateTime) -> Result<SignedOutput> {
        let moment = SigningMoment::new(now);

        let creq = CanonicalRequest::build(req, &moment, self.path_encoding)?.to_string();
        debug!("calculated canonical request: {creq}");

        let scope = credential_scope(moment.date_stamp(), &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(moment.timestamp(), &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &self.credential.secret_access_key,
            moment.date_stamp(),
            &self.region,
            &self.service,
        );
        let signature = calculate_signature(&signing_key, &string_to_sign);
        let authorization =
            format_authorization_header(&self.credential.access_key_id, &scope, &signature);

        Ok(SignedOutput {
            timestamp: moment.timestamp().to_string(),
            scope,
            signature,
            authorization,
        })
    }

    /// Apply the signed output to the request.
    ///
    /// Existing `authorization` and `x-amz-date` headers are replaced. The
    /// request is left untouched if any header value is invalid.
    pub fn apply(&self, output: &SignedOutput, req: &mut impl SignableRequest) -> Result<()> {
        let date = HeaderValue::from_str(&output.timestamp)?;

        let mut authorization = HeaderValue::from_str(&output.authorization).map_err(|e| {
            Error::request_invalid("authorization is not a valid header value").with_source(e)
        })?;
        authorization.set_sensitive(true);

        let token = match &self.credential.session_token {
            Some(token) => {
                let mut value = HeaderValue::from_str(token).map_err(|e| {
                    Error::request_invalid("session token is not a valid header value")
                        .with_source(e)
                })?;
                // Set token value sensitive to avoid leaking.
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let headers = req.headers_mut();
        headers.insert(X_AMZ_DATE, date);
        headers.insert(header::AUTHORIZATION, authorization);
        if let Some(token) = token {
            headers.insert(X_AMZ_SECURITY_TOKEN, token);
        }

        Ok(())
    }

    /// Sign the request at given time.
    ///
    /// The time is taken as a parameter so that signing stays deterministic;
    /// use [`Signer::sign_now`] to sign with the current time.
    pub fn sign(&self, req: &mut impl SignableRequest, now: DateTime) -> Result<()> {
        let output = self.calculate(req, now)?;
        self.apply(&output, req)
    }

    /// Sign the request with the current time.
    pub fn sign_now(&self, req: &mut impl SignableRequest) -> Result<()> {
        self.sign(req, time::now())
    }
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credential", &self.credential)
            .field("service", &self.service)
            .field("region", &self.region)
            .field("path_encoding", &self.path_encoding)
            .finish()
    }
}

/// Output of [`Signer::calculate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOutput {
    timestamp: String,
    scope: String,
    signature: String,
    authorization: String,
}

impl SignedOutput {
    /// Value of `x-amz-date` header.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Credential scope: `20220313/<region>/<service>/aws4_request`.
    pub fn credential_scope(&self) -> &str {
        &self.scope
    }

    /// Lowercase hex encoded signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Value of `authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}
