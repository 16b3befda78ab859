use http::request::Parts;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::Result;

/// SignableRequest is the boundary between signers and http clients.
///
/// Signers only read the method, uri and body of the request, and write
/// back headers. Constructing and sending the request is never their job.
pub trait SignableRequest {
    /// HTTP method of this request.
    fn method(&self) -> &Method;

    /// Full uri of this request, including scheme, authority, path and
    /// the query string in the encoded form that will be sent.
    fn uri(&self) -> Result<Uri>;

    /// Mutable headers of this request.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Body of this request.
    ///
    /// Returns `None` if the request carries no body, or the body is not
    /// available in memory.
    fn body(&self) -> Option<&[u8]>;
}

impl<T: AsRef<[u8]>> SignableRequest for http::Request<T> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn uri(&self) -> Result<Uri> {
        Ok(http::Request::uri(self).clone())
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        http::Request::headers_mut(self)
    }

    fn body(&self) -> Option<&[u8]> {
        let body = http::Request::body(self).as_ref();
        (!body.is_empty()).then_some(body)
    }
}

impl SignableRequest for Parts {
    fn method(&self) -> &Method {
        &self.method
    }

    fn uri(&self) -> Result<Uri> {
        Ok(self.uri.clone())
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn body(&self) -> Option<&[u8]> {
        None
    }
}

#[cfg(feature = "reqwest")]
impl SignableRequest for reqwest::Request {
    fn method(&self) -> &Method {
        reqwest::Request::method(self)
    }

    fn uri(&self) -> Result<Uri> {
        Ok(self.url().as_str().parse()?)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        reqwest::Request::headers_mut(self)
    }

    fn body(&self) -> Option<&[u8]> {
        reqwest::Request::body(self)
            .and_then(|b| b.as_bytes())
            .filter(|b| !b.is_empty())
    }
}
