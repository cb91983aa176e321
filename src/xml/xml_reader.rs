use crate::error::GatewayError;
use log::debug;
use quick_xml::de::from_str;
use serde::de::DeserializeOwned;

/// Reads a whole XML document into a deserializable type.
///
/// Before parsing, the reader drops a leading byte order mark and every
/// configured namespace declaration, so relative namespace URIs never reach the
/// parser. Unknown elements and attributes are ignored by the deserializer.
///
/// # Examples
///
/// ```
/// use authorizenet::xml::XmlDocumentReaderBuilder;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Reply {
///     ref_id: String,
/// }
///
/// let reader = XmlDocumentReaderBuilder::new()
///     .strip_namespace("urn:example")
///     .build();
///
/// let reply: Reply = reader
///     .read("<reply xmlns=\"urn:example\"><refId>42</refId></reply>")
///     .unwrap();
///
/// assert_eq!(reply.ref_id, "42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlDocumentReader {
    namespaces: Vec<String>,
}

impl XmlDocumentReader {
    /// Returns the document with the byte order mark and namespace declarations removed.
    pub fn clean(&self, document: &str) -> String {
        let mut cleaned = document.trim_start_matches('\u{feff}').to_string();
        for namespace in &self.namespaces {
            cleaned = cleaned.replace(&format!("xmlns=\"{}\"", namespace), "");
        }
        cleaned
    }

    pub fn read<T: DeserializeOwned>(&self, document: &str) -> Result<T, GatewayError> {
        let cleaned = self.clean(document);
        if cleaned.trim().is_empty() {
            return Err(GatewayError::MalformedResponse("Empty XML document".to_string()));
        }

        from_str(&cleaned).map_err(|e| {
            debug!("Unparseable XML document ({}): {}", e, cleaned);
            GatewayError::MalformedResponse(format!("Failed to parse XML document: {}", e))
        })
    }
}

/// Builder for [`XmlDocumentReader`].
#[derive(Debug, Default)]
pub struct XmlDocumentReaderBuilder {
    namespaces: Vec<String>,
}

impl XmlDocumentReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `xmlns="<namespace>"` declarations before parsing.
    pub fn strip_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    pub fn build(self) -> XmlDocumentReader {
        XmlDocumentReader {
            namespaces: self.namespaces,
        }
    }
}
