use crate::error::GatewayError;
use log::debug;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::node::XmlNode;
use super::tree::{ElementId, XmlTree};

/// A writer that turns an [`XmlNode`] structure into XML text.
///
/// The output is UTF-8, indented and starts with an XML declaration unless
/// disabled on the builder.
///
/// # Examples
///
/// ```
/// use authorizenet::xml::{XmlNode, XmlTreeWriterBuilder};
///
/// let writer = XmlTreeWriterBuilder::new()
///     .root_attribute("xmlns", "urn:example")
///     .build();
///
/// let node = XmlNode::named([
///     ("refId", XmlNode::from("ORDER-1")),
///     ("tag", XmlNode::repeated(["gold", "monthly"])),
/// ]);
///
/// let xml = writer.serialize(&node, "request").unwrap();
///
/// assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
/// assert!(xml.contains("<request xmlns=\"urn:example\">"));
/// assert!(xml.contains("<tag>gold</tag>"));
/// assert!(xml.contains("<tag>monthly</tag>"));
/// ```
#[derive(Debug, Clone)]
pub struct XmlTreeWriter {
    indent: usize,
    declaration: bool,
    root_attributes: Vec<(String, String)>,
}

impl XmlTreeWriter {
    /// Serializes `node` into a root element named `root_tag`.
    pub fn serialize(&self, node: &XmlNode, root_tag: &str) -> Result<String, GatewayError> {
        let mut tree = XmlTree::from_node(node, root_tag);
        for (name, value) in &self.root_attributes {
            tree.set_attribute(tree.root(), name, value);
        }
        debug!(
            "Serialized <{}> into a tree of {} elements",
            root_tag,
            tree.len()
        );
        self.render(&tree)
    }

    /// Renders an already built tree.
    pub fn render(&self, tree: &XmlTree) -> Result<String, GatewayError> {
        let mut writer = if self.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.indent)
        } else {
            Writer::new(Vec::new())
        };

        if self.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(|e| {
                    GatewayError::Serialization(format!("Failed to write XML declaration: {}", e))
                })?;
        }

        Self::write_element(&mut writer, tree, tree.root())?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| GatewayError::Serialization(format!("Invalid UTF-8 in XML: {}", e)))?;
        xml.push('\n');
        Ok(xml)
    }

    fn write_element(
        writer: &mut Writer<Vec<u8>>,
        tree: &XmlTree,
        id: ElementId,
    ) -> Result<(), GatewayError> {
        let element = tree.element(id);
        let mut start = BytesStart::new(element.name.as_str());
        for (name, value) in &element.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if element.text.is_empty() && element.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(|e| {
                GatewayError::Serialization(format!("Failed to write <{}/>: {}", element.name, e))
            });
        }

        writer.write_event(Event::Start(start)).map_err(|e| {
            GatewayError::Serialization(format!("Failed to write <{}>: {}", element.name, e))
        })?;

        if !element.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&element.text)))
                .map_err(|e| {
                    GatewayError::Serialization(format!(
                        "Failed to write text of <{}>: {}",
                        element.name, e
                    ))
                })?;
        }

        for child in &element.children {
            Self::write_element(writer, tree, *child)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))
            .map_err(|e| {
                GatewayError::Serialization(format!("Failed to write </{}>: {}", element.name, e))
            })
    }
}

/// Builder for creating XML tree writers.
///
/// # Examples
///
/// ```
/// use authorizenet::xml::{XmlNode, XmlTreeWriterBuilder};
///
/// let writer = XmlTreeWriterBuilder::new()
///     .indent(0)
///     .declaration(false)
///     .build();
///
/// let xml = writer
///     .serialize(&XmlNode::named([("amount", XmlNode::from("9.99"))]), "subscription")
///     .unwrap();
///
/// assert_eq!(xml, "<subscription><amount>9.99</amount></subscription>\n");
/// ```
#[derive(Debug, Clone)]
pub struct XmlTreeWriterBuilder {
    indent: usize,
    declaration: bool,
    root_attributes: Vec<(String, String)>,
}

impl Default for XmlTreeWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlTreeWriterBuilder {
    /// Creates a builder with two-space indentation and an XML declaration.
    pub fn new() -> Self {
        Self {
            indent: 2,
            declaration: true,
            root_attributes: Vec::new(),
        }
    }

    /// Sets the indentation width; `0` writes everything on one line.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Toggles the leading `<?xml ...?>` declaration.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Adds an attribute to every root element written, such as a schema namespace.
    pub fn root_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.root_attributes.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> XmlTreeWriter {
        XmlTreeWriter {
            indent: self.indent,
            declaration: self.declaration,
            root_attributes: self.root_attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> XmlTreeWriter {
        XmlTreeWriterBuilder::new()
            .indent(0)
            .declaration(false)
            .build()
    }

    #[test]
    fn repeated_field_under_node() {
        let node = XmlNode::named([("field", XmlNode::repeated(["hello", "world"]))]);

        let xml = compact().serialize(&node, "node").unwrap();

        assert_eq!(xml, "<node><field>hello</field><field>world</field></node>\n");
    }

    #[test]
    fn nested_sequences() {
        let node = XmlNode::named([(
            "node",
            XmlNode::Repeated(vec![
                XmlNode::from("text"),
                XmlNode::named([("field", XmlNode::repeated(["hello", "world"]))]),
            ]),
        )]);

        let xml = compact().serialize(&node, "nodes").unwrap();

        assert_eq!(
            xml,
            "<nodes><node>text</node><node><field>hello</field>\
             <field>world</field></node></nodes>\n"
        );
    }

    #[test]
    fn empty_mapping_is_self_closed() {
        let node = XmlNode::named([
            ("subscriptionId", XmlNode::from("100")),
            ("subscription", XmlNode::empty()),
        ]);

        let xml = compact().serialize(&node, "request").unwrap();

        assert_eq!(
            xml,
            "<request><subscriptionId>100</subscriptionId><subscription/></request>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        let node = XmlNode::named([("name", XmlNode::from("Smith & <Sons>"))]);

        let xml = compact().serialize(&node, "billTo").unwrap();

        assert!(xml.contains("Smith &amp; &lt;Sons&gt;"));
    }

    #[test]
    fn root_attribute_is_written() {
        let writer = XmlTreeWriterBuilder::new()
            .indent(0)
            .declaration(false)
            .root_attribute("xmlns", "AnetApi/xml/v1/schema/AnetApiSchema.xsd")
            .build();

        let xml = writer
            .serialize(
                &XmlNode::named([("refId", XmlNode::from("1"))]),
                "ARBCancelSubscriptionRequest",
            )
            .unwrap();

        assert!(xml.starts_with(
            "<ARBCancelSubscriptionRequest xmlns=\"AnetApi/xml/v1/schema/AnetApiSchema.xsd\">"
        ));
    }

    #[test]
    fn pretty_output_has_declaration_and_indentation() {
        let node = XmlNode::named([(
            "merchantAuthentication",
            XmlNode::named([("name", XmlNode::from("login"))]),
        )]);

        let xml = XmlTreeWriterBuilder::new().build().serialize(&node, "request").unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("\n  <merchantAuthentication>"));
        assert!(xml.contains("\n    <name>login</name>"));
        assert!(xml.trim_end().ends_with("</request>"));
    }
}
