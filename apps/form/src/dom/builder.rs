//! Typed fragment builder.
//!
//! New entry groups are described as a `Fragment` tree and instantiated into a
//! `Document`, never assembled from interpolated markup strings. Attribute and
//! text values are escaped only when the document is rendered.

/// A detached element description: tag, ordered attributes, text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Fragment>,
}

impl Fragment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Boolean attribute such as `required`, `disabled` or `selected`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn flag_if(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Appends a class to the `class` attribute.
    pub fn class(self, class: &str) -> Self {
        let joined = match self.attr_value("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attr("class", joined)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Fragment) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Fragment>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_nodes(&self) -> &[Fragment] {
        &self.children
    }

    pub(crate) fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }
}

/// `<option value="..">label</option>`
pub fn option(value: &str, label: &str) -> Fragment {
    Fragment::new("option").attr("value", value).text(label)
}

/// Empty-valued, disabled, pre-selected option shown before any choice is made.
pub fn placeholder_option(label: &str) -> Fragment {
    Fragment::new("option")
        .attr("value", "")
        .flag("disabled")
        .flag("selected")
        .text(label)
}
