use indexmap::IndexMap;

/// Structured input for the XML tree writer.
///
/// A node is either a scalar (element text), a named mapping (one child
/// element per key) or a repeated sequence whose entries share the name of the
/// element they are written into.
///
/// # Examples
///
/// ```
/// use authorizenet::xml::XmlNode;
///
/// let node = XmlNode::named([
///     ("name", XmlNode::from("Gym membership")),
///     ("tag", XmlNode::repeated(["gold", "monthly"])),
/// ]);
///
/// assert!(!node.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Scalar(String),
    Named(IndexMap<String, XmlNode>),
    Repeated(Vec<XmlNode>),
}

impl XmlNode {
    /// Builds a `Named` node from `(name, node)` pairs, keeping their order.
    ///
    /// A name given twice keeps its first position and takes the last value.
    pub fn named<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, XmlNode)>,
    {
        XmlNode::Named(
            entries
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Builds a `Repeated` node from anything convertible into nodes.
    pub fn repeated<N, I>(items: I) -> Self
    where
        N: Into<XmlNode>,
        I: IntoIterator<Item = N>,
    {
        XmlNode::Repeated(items.into_iter().map(Into::into).collect())
    }

    /// An empty mapping, rendered as a self-closed element.
    pub fn empty() -> Self {
        XmlNode::Named(IndexMap::new())
    }

    /// Inserts a child entry when `self` is a `Named` node.
    ///
    /// Returns `false` and leaves the node untouched for scalars and sequences.
    pub fn insert<K: Into<String>>(&mut self, name: K, node: XmlNode) -> bool {
        match self {
            XmlNode::Named(entries) => {
                entries.insert(name.into(), node);
                true
            }
            _ => false,
        }
    }

    /// Looks up a direct child of a `Named` node.
    pub fn get(&self, name: &str) -> Option<&XmlNode> {
        match self {
            XmlNode::Named(entries) => entries.get(name),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            XmlNode::Scalar(text) => text.is_empty(),
            XmlNode::Named(entries) => entries.is_empty(),
            XmlNode::Repeated(items) => items.is_empty(),
        }
    }
}

impl From<&str> for XmlNode {
    fn from(value: &str) -> Self {
        XmlNode::Scalar(value.to_string())
    }
}

impl From<String> for XmlNode {
    fn from(value: String) -> Self {
        XmlNode::Scalar(value)
    }
}

impl From<&String> for XmlNode {
    fn from(value: &String) -> Self {
        XmlNode::Scalar(value.clone())
    }
}

impl From<bool> for XmlNode {
    fn from(value: bool) -> Self {
        XmlNode::Scalar(value.to_string())
    }
}

macro_rules! scalar_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for XmlNode {
                fn from(value: $ty) -> Self {
                    XmlNode::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_number!(u8, u16, u32, u64, i32, i64, f64);
