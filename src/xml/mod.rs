//! XML support for gateway requests and responses.
//!
//! Requests are described with [`XmlNode`], a small closed set of node shapes,
//! and written through [`XmlTreeWriter`]. Responses are read into serde types
//! with [`XmlDocumentReader`]. Both sides use `quick-xml`.
//!
//! # Repeated elements
//!
//! APIs in this family represent a repeated field as same-named siblings rather
//! than as children of a wrapper element. A [`XmlNode::Repeated`] sequence
//! follows that convention: its first entry fills the element it is written
//! into, and each further entry adds a sibling with the same name.
//!
//! ```
//! use authorizenet::xml::{XmlNode, XmlTreeWriterBuilder};
//!
//! let node = XmlNode::named([(
//!     "nodes",
//!     XmlNode::named([(
//!         "node",
//!         XmlNode::Repeated(vec![
//!             XmlNode::from("text"),
//!             XmlNode::named([("field", XmlNode::repeated(["hello", "world"]))]),
//!         ]),
//!     )]),
//! )]);
//!
//! let writer = XmlTreeWriterBuilder::new().indent(0).declaration(false).build();
//! let xml = writer.serialize(&node, "response").unwrap();
//!
//! assert_eq!(
//!     xml.trim_end(),
//!     "<response><nodes><node>text</node><node><field>hello</field>\
//!      <field>world</field></node></nodes></response>"
//! );
//! ```

pub mod node;
pub mod tree;
pub mod xml_reader;
pub mod xml_writer;

pub use node::XmlNode;
pub use tree::{XmlElement, XmlTree};
pub use xml_reader::{XmlDocumentReader, XmlDocumentReaderBuilder};
pub use xml_writer::{XmlTreeWriter, XmlTreeWriterBuilder};
