use log::debug;

use super::node::XmlNode;

/// Index of an element inside an [`XmlTree`].
pub type ElementId = usize;

/// One element of an [`XmlTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
}

impl XmlElement {
    fn new(name: &str, parent: Option<ElementId>) -> Self {
        Self {
            name: name.to_string(),
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }
}

/// An ordered element tree stored as an arena; the root is always element `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlTree {
    elements: Vec<XmlElement>,
}

impl XmlTree {
    /// Creates a tree holding a single, empty root element.
    pub fn new(root_name: &str) -> Self {
        Self {
            elements: vec![XmlElement::new(root_name, None)],
        }
    }

    /// Builds the tree for `node` written into a root element named `root_name`.
    ///
    /// Mappings add one child per entry. Inside a sequence, the entry at
    /// position 0 fills the element the sequence is written into and every later
    /// entry gets a new element with the same name, appended to that element's
    /// parent. `{"tag": ["a", "b"]}` therefore yields two `<tag>` siblings.
    pub fn from_node(node: &XmlNode, root_name: &str) -> Self {
        let mut tree = Self::new(root_name);
        tree.populate(node, tree.root());
        tree
    }

    pub fn root(&self) -> ElementId {
        0
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn element(&self, id: ElementId) -> &XmlElement {
        &self.elements[id]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds an attribute to an existing element, replacing a previous value.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let attributes = &mut self.elements[id].attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Direct children of `id` named `name`, in document order.
    pub fn children_named<'a>(
        &'a self,
        id: ElementId,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements[id]
            .children
            .iter()
            .map(|child| &self.elements[*child])
            .filter(move |child| child.name == name)
    }

    /// Resolves a `/` separated path of element names from the root, following
    /// the first matching child at each step.
    pub fn find(&self, path: &str) -> Option<&XmlElement> {
        let mut current = self.root();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            current = *self.elements[current]
                .children
                .iter()
                .find(|child| self.elements[**child].name == segment)?;
        }
        Some(&self.elements[current])
    }

    fn append_child(&mut self, parent: ElementId, name: &str) -> ElementId {
        let id = self.elements.len();
        self.elements.push(XmlElement::new(name, Some(parent)));
        self.elements[parent].children.push(id);
        id
    }

    fn append_sibling(&mut self, current: ElementId) -> ElementId {
        let name = self.elements[current].name.clone();
        match self.elements[current].parent {
            Some(parent) => self.append_child(parent, &name),
            None => {
                // The root has no parent to hold a sibling.
                debug!("Repeated entry written under root <{}>", name);
                self.append_child(current, &name)
            }
        }
    }

    fn populate(&mut self, node: &XmlNode, current: ElementId) {
        match node {
            XmlNode::Scalar(text) => self.elements[current].text.push_str(text),
            XmlNode::Named(entries) => {
                for (name, value) in entries {
                    let child = self.append_child(current, name);
                    self.populate(value, child);
                }
            }
            XmlNode::Repeated(items) => {
                for (position, item) in items.iter().enumerate() {
                    let target = if position == 0 {
                        current
                    } else {
                        self.append_sibling(current)
                    };
                    self.populate(item, target);
                }
            }
        }
    }
}
