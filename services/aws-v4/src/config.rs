// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::sign_request::PathEncoding;
use crate::{Credential, Signer};
use serde::Deserialize;
use sigv4_auth_core::utils::Redact;
use sigv4_auth_core::Error;
use std::fmt::{Debug, Formatter};

/// Config for AWS SigV4 signing.
///
/// Config can be deserialized from any serde format. Loading it from
/// files or environment variables is up to the caller.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `access_key_id` will be used as the access key of the credential.
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be used as the secret key of the credential.
    pub secret_access_key: Option<String>,
    /// `session_token` will be sent in `x-amz-security-token` if set and not empty.
    pub session_token: Option<String>,
    /// `service` is the signing name of the target service, like `execute-api`.
    pub service: Option<String>,
    /// `region` is the region of the target service, like `us-east-1`.
    pub region: Option<String>,
    /// `path_encoding` overrides the path encoding picked from `service`.
    ///
    /// - `double`: encode the path once more, used by most services.
    /// - `single`: sign the path as sent, used by s3.
    pub path_encoding: Option<PathEncoding>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("service", &self.service)
            .field("region", &self.region)
            .field("path_encoding", &self.path_encoding)
            .finish()
    }
}

impl Config {
    /// Build a [`Signer`] from this config.
    ///
    /// Returns a `ConfigInvalid` error if any required field is missing or empty.
    pub fn build(self) -> sigv4_auth_core::Result<Signer> {
        let service = required(self.service, "service")?;
        let region = required(self.region, "region")?;
        let credential = Credential {
            access_key_id: required(self.access_key_id, "access key id")?,
            secret_access_key: required(self.secret_access_key, "secret access key")?,
            session_token: self.session_token.filter(|v| !v.is_empty()),
        };

        let signer = Signer::new(&service, &region, credential)?;
        Ok(match self.path_encoding {
            Some(encoding) => signer.with_path_encoding(encoding),
            None => signer,
        })
    }
}

fn required(v: Option<String>, name: &str) -> sigv4_auth_core::Result<String> {
    v.ok_or_else(|| Error::config_invalid(format!("{name} is required")))
}

/// Builder for [`Signer`].
#[derive(Default, Clone, Debug)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Set the access key id.
    pub fn access_key(&mut self, access_key: &str) -> &mut Self {
        self.config.access_key_id = Some(access_key.to_string());
        self
    }

    /// Set the secret access key.
    pub fn secret_key(&mut self, secret_key: &str) -> &mut Self {
        self.config.secret_access_key = Some(secret_key.to_string());
        self
    }

    /// Set the session token of temporary credentials.
    ///
    /// An empty token is treated as no token.
    pub fn session_token(&mut self, token: &str) -> &mut Self {
        self.config.session_token = Some(token.to_string());
        self
    }

    /// Set the service signing name.
    pub fn service(&mut self, service: &str) -> &mut Self {
        self.config.service = Some(service.to_string());
        self
    }

    /// Set the region.
    pub fn region(&mut self, region: &str) -> &mut Self {
        self.config.region = Some(region.to_string());
        self
    }

    /// Set the path encoding instead of picking it from service.
    pub fn path_encoding(&mut self, encoding: PathEncoding) -> &mut Self {
        self.config.path_encoding = Some(encoding);
        self
    }

    /// Build the signer, failing fast on missing or empty fields.
    pub fn build(&mut self) -> sigv4_auth_core::Result<Signer> {
        self.config.clone().build()
    }
}
