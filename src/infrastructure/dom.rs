// Element tree - Arena of elements backing the console surface
//
// Structural changes and style patches are recorded in a mutation log so
// callers can observe exactly what a render touched. Building an element
// (tag, classes, attributes, text) before it is attached is not logged.
use std::collections::BTreeMap;
use std::fmt::Write;

/// Handle to an element in a [`Dom`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A change applied to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A style property was set (`Some`) or removed (`None`).
    Style {
        node: NodeId,
        property: String,
        value: Option<String>,
    },
    Append { parent: NodeId, child: NodeId },
    Detach { node: NodeId },
    Reorder { parent: NodeId },
}

#[derive(Debug)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input"];

#[derive(Debug, Default)]
pub struct Dom {
    nodes: Vec<Option<Element>>,
    mutations: Vec<Mutation>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }));
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        let element = self.nodes.get_mut(node.0).and_then(Option::as_mut);
        if element.is_none() {
            tracing::debug!(?node, "ignoring operation on a destroyed element");
        }
        element
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.text = Some(text.to_string());
        }
    }

    /// Sets a style property, or removes it when `value` is `None`.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        match value {
            Some(value) => element.style.insert(property.to_string(), value.to_string()),
            None => element.style.remove(property),
        };
        self.mutations.push(Mutation::Style {
            node,
            property: property.to_string(),
            value: value.map(str::to_string),
        });
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)?.style.get(property).map(String::as_str)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node)
            .map(|element| element.children.as_slice())
            .unwrap_or_default()
    }

    /// Appends `child` as the last child of `parent`, moving it out of its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.unlink(child);
        if let Some(element) = self.element_mut(parent) {
            element.children.push(child);
        }
        if let Some(element) = self.element_mut(child) {
            element.parent = Some(parent);
        }
        self.mutations.push(Mutation::Append { parent, child });
    }

    /// Removes `node` from its parent. Detaching an orphan is a no-op.
    pub fn detach(&mut self, node: NodeId) {
        if self.unlink(node) {
            self.mutations.push(Mutation::Detach { node });
        }
    }

    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.element_mut(node).and_then(|element| element.parent.take()) else {
            return false;
        };
        if let Some(element) = self.element_mut(parent) {
            element.children.retain(|child| *child != node);
        }
        true
    }

    /// Detaches `node` and frees it together with its whole subtree.
    pub fn destroy(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        let mut pending = vec![node];
        while let Some(next) = pending.pop() {
            if let Some(element) = self.nodes.get_mut(next.0).and_then(Option::take) {
                pending.extend(element.children);
            }
        }
    }

    /// Moves the listed children of `parent` to the end of its child list, in
    /// the given order. Nodes that are not children of `parent` are skipped.
    pub fn reorder_children(&mut self, parent: NodeId, order: &[NodeId]) {
        let Some(element) = self.element_mut(parent) else {
            return;
        };
        let moved: Vec<NodeId> = order
            .iter()
            .copied()
            .filter(|node| element.children.contains(node))
            .collect();
        element.children.retain(|child| !moved.contains(child));
        element.children.extend(moved);
        self.mutations.push(Mutation::Reorder { parent });
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Drains the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.element(node) else {
            return;
        };
        let _ = write!(out, "<{}", element.tag);
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        for (name, value) in &element.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !element.style.is_empty() {
            let style = element
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }
        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for child in &element.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_moves_between_parents() {
        let mut dom = Dom::new();
        let a = dom.create_element("div");
        let b = dom.create_element("div");
        let child = dom.create_element("span");

        dom.append_child(a, child);
        dom.append_child(b, child);

        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), &[child]);
        assert_eq!(dom.parent(child), Some(b));
        assert_eq!(dom.mutations().len(), 2);
    }

    #[test]
    fn test_destroy_frees_subtree_and_detaches() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let item = dom.create_element("div");
        let image = dom.create_element("img");
        dom.append_child(item, image);
        dom.append_child(root, item);
        dom.take_mutations();

        dom.destroy(item);

        assert!(dom.children(root).is_empty());
        assert!(!dom.contains(item));
        assert!(!dom.contains(image));
        assert_eq!(dom.take_mutations(), vec![Mutation::Detach { node: item }]);

        // Destroying again touches nothing.
        dom.destroy(item);
        assert!(dom.mutations().is_empty());
    }

    #[test]
    fn test_style_patches_are_logged() {
        let mut dom = Dom::new();
        let node = dom.create_element("div");

        dom.set_style(node, "width", Some("10px"));
        dom.set_style(node, "width", None);

        assert_eq!(dom.style(node, "width"), None);
        assert_eq!(
            dom.take_mutations(),
            vec![
                Mutation::Style { node, property: "width".into(), value: Some("10px".into()) },
                Mutation::Style { node, property: "width".into(), value: None },
            ]
        );
    }

    #[test]
    fn test_reorder_children() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let foreign = dom.create_element("p");
        let a = dom.create_element("div");
        let b = dom.create_element("div");
        let c = dom.create_element("div");
        for node in [a, foreign, b, c] {
            dom.append_child(root, node);
        }

        dom.reorder_children(root, &[c, a, b]);

        assert_eq!(dom.children(root), &[foreign, c, a, b]);
    }

    #[test]
    fn test_to_html_escapes() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        dom.add_class(root, "visual-console-container");
        dom.set_style(root, "background-color", Some("#fff"));
        let image = dom.create_element("img");
        dom.set_attribute(image, "src", "a.png?x=1&y=\"2\"");
        let label = dom.create_element("span");
        dom.set_text(label, "<b>");
        dom.append_child(root, image);
        dom.append_child(root, label);

        assert_eq!(
            dom.to_html(root),
            "<div class=\"visual-console-container\" style=\"background-color: #fff\">\
             <img src=\"a.png?x=1&amp;y=&quot;2&quot;\">\
             <span>&lt;b&gt;</span></div>"
        );
    }
}
