use crate::dom::builder::Fragment;

/// Handle to an element inside a `Document`.
///
/// Handles stay valid after the element is removed; a removed element is
/// simply no longer connected to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];
const BOOLEAN_ATTRS: &[&str] = &["required", "disabled", "selected", "checked", "readonly"];
const CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];

/// Headless element tree standing in for the host page.
///
/// Nodes live in an arena for the lifetime of the document; removal detaches
/// a subtree from its parent without freeing it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document whose root is an empty `<form>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("form")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // ── Tree structure ──────────────────────────────────────────────────────

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Instantiates `fragment` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, fragment: &Fragment) -> NodeId {
        let id = self.create_element(fragment.tag());
        {
            let node = self.node_mut(id);
            node.attrs = fragment.attrs().to_vec();
            node.text = fragment.text_content().unwrap_or_default().to_string();
        }
        for child in fragment.child_nodes() {
            self.append(id, child);
        }
        self.append_child(parent, id);
        id
    }

    /// Detaches `node` from its parent. No-op for the root or a detached node.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != node);
        }
    }

    /// Detaches every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors(node).last() == Some(&self.root)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// `node` followed by its ancestors, innermost first.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(node).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    // ── Attributes and text ─────────────────────────────────────────────────

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.node_mut(node).attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.node_mut(node).attrs.retain(|(n, _)| n != name);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.node(node).text
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.node_mut(node).text = text.to_string();
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// First connected element carrying `id`, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn elements_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    // ── Form controls ───────────────────────────────────────────────────────

    /// `<option>` children of a select, in order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.children(select)
            .iter()
            .copied()
            .filter(|c| self.tag(*c) == "option")
            .collect()
    }

    /// An option's submitted value: its `value` attribute, else its text.
    pub fn option_value(&self, option: NodeId) -> &str {
        self.attr(option, "value").unwrap_or_else(|| self.text(option))
    }

    /// Current value of a control. For a select this is the value of the
    /// option carrying `selected` (the last one, if several do), or empty
    /// when none does.
    pub fn value(&self, node: NodeId) -> String {
        if self.tag(node) == "select" {
            return self
                .options(node)
                .into_iter()
                .filter(|o| self.has_attr(*o, "selected"))
                .last()
                .map(|o| self.option_value(o).to_string())
                .unwrap_or_default();
        }
        self.attr(node, "value").unwrap_or_default().to_string()
    }

    /// Sets a control's value. For a select, the first option whose value
    /// matches becomes selected; when none matches nothing stays selected
    /// and `false` is returned.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> bool {
        if self.tag(node) != "select" {
            self.set_attr(node, "value", value);
            return true;
        }
        let options = self.options(node);
        for option in &options {
            self.remove_attr(*option, "selected");
        }
        match options.into_iter().find(|o| self.option_value(*o) == value) {
            Some(option) => {
                self.set_attr(option, "selected", "");
                true
            }
            None => false,
        }
    }

    /// Named, enabled controls as `(name, value)` pairs in document order.
    pub fn form_data(&self) -> Vec<(String, String)> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| CONTROL_TAGS.contains(&self.tag(*n)) && !self.has_attr(*n, "disabled"))
            .filter_map(|n| {
                self.attr(n, "name")
                    .map(|name| (name.to_string(), self.value(n)))
            })
            .collect()
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    /// Serializes the whole document as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_into(self.root, &mut out);
        out
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.render_into(node, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attrs {
            out.push(' ');
            out.push_str(name);
            if value.is_empty() && BOOLEAN_ATTRS.contains(&name.as_str()) {
                continue;
            }
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }
        out.push_str(&escape(&node.text));
        for child in &node.children {
            self.render_into(*child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::{option, placeholder_option};

    fn select_doc() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let select = doc.append(
            root,
            &Fragment::new("select")
                .id("country")
                .attr("name", "country")
                .child(placeholder_option("Select Country"))
                .child(option("Philippines", "Philippines"))
                .child(option("Japan", "Japan")),
        );
        (doc, select)
    }

    #[test]
    fn test_element_by_id_finds_connected_only() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append(root, &Fragment::new("div").id("box"));
        assert_eq!(doc.element_by_id("box"), Some(div));
        doc.remove(div);
        assert_eq!(doc.element_by_id("box"), None);
        assert!(!doc.is_connected(div));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append(
            root,
            &Fragment::new("div")
                .id("a")
                .child(Fragment::new("span").id("b").child(Fragment::new("i").id("c")))
                .child(Fragment::new("span").id("d")),
        );
        let ids: Vec<_> = doc
            .descendants(outer)
            .into_iter()
            .map(|n| doc.attr(n, "id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_closest_is_inclusive() {
        let mut doc = Document::new();
        let root = doc.root();
        let group = doc.append(
            root,
            &Fragment::new("div")
                .class("entry")
                .child(Fragment::new("button").class("remove")),
        );
        let button = doc.children(group)[0];
        assert_eq!(doc.closest(button, "entry"), Some(group));
        assert_eq!(doc.closest(group, "entry"), Some(group));
        assert_eq!(doc.closest(button, "missing"), None);
    }

    #[test]
    fn test_select_value_follows_selected_option() {
        let (mut doc, select) = select_doc();
        assert_eq!(doc.value(select), "");
        assert!(doc.set_value(select, "Japan"));
        assert_eq!(doc.value(select), "Japan");
    }

    #[test]
    fn test_select_unknown_value_clears_selection() {
        let (mut doc, select) = select_doc();
        doc.set_value(select, "Philippines");
        assert!(!doc.set_value(select, "Atlantis"));
        assert_eq!(doc.value(select), "");
    }

    #[test]
    fn test_clear_children_detaches_options() {
        let (mut doc, select) = select_doc();
        let first = doc.options(select)[0];
        doc.clear_children(select);
        assert!(doc.options(select).is_empty());
        assert_eq!(doc.parent(first), None);
    }

    #[test]
    fn test_form_data_skips_disabled_and_unnamed() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(root, &Fragment::new("input").attr("name", "fullName").attr("value", "Ana"));
        doc.append(root, &Fragment::new("input").attr("name", "skip").flag("disabled"));
        doc.append(root, &Fragment::new("input").attr("value", "anonymous"));
        assert_eq!(
            doc.form_data(),
            vec![("fullName".to_string(), "Ana".to_string())]
        );
    }

    #[test]
    fn test_render_escapes_and_handles_void_tags() {
        let mut doc = Document::new();
        let root = doc.root();
        let label = doc.append(root, &Fragment::new("label").text("<b>\"Name\"</b>"));
        let input = doc.append(
            root,
            &Fragment::new("input").attr("value", "a&b").flag("required"),
        );
        assert_eq!(
            doc.render(label),
            "<label>&lt;b&gt;&quot;Name&quot;&lt;/b&gt;</label>"
        );
        assert_eq!(doc.render(input), "<input value=\"a&amp;b\" required>");
    }

    #[test]
    fn test_placeholder_keeps_empty_value_attribute() {
        let (doc, select) = select_doc();
        let placeholder = doc.options(select)[0];
        assert_eq!(
            doc.render(placeholder),
            "<option value=\"\" disabled selected>Select Country</option>"
        );
    }
}
