use crate::error::GatewayError;

/// A fully built gateway request, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    /// Endpoint the body is posted to.
    pub url: String,
    /// Extra HTTP headers, such as the content type.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl GatewayRequest {
    pub fn new<U: Into<String>, B: Into<String>>(url: U, body: B) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value named `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The capability to post a request and return the raw response body.
///
/// Implementations own their timeout and TLS policy and report any network or
/// HTTP level failure as [`GatewayError::Transport`].
pub trait Transport {
    fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, request: &GatewayRequest) -> Result<String, GatewayError> {
        (**self).post(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let request = GatewayRequest::new("https://example.test", "a=1")
            .header("Content-Type", "text/xml");

        assert_eq!(request.header_value("content-type"), Some("text/xml"));
        assert_eq!(request.header_value("accept"), None);
    }
}
