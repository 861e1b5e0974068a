use tracing::debug;

use crate::dom::{Document, Fragment, NodeId};
use crate::repeater::reindex::replace_first_index;

/// Which control tags take part in renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKinds {
    inputs: bool,
    selects: bool,
}

impl FieldKinds {
    pub const INPUTS: FieldKinds = FieldKinds {
        inputs: true,
        selects: false,
    };
    pub const SELECTS: FieldKinds = FieldKinds {
        inputs: false,
        selects: true,
    };
    pub const BOTH: FieldKinds = FieldKinds {
        inputs: true,
        selects: true,
    };

    pub fn includes(self, tag: &str) -> bool {
        match tag {
            "input" => self.inputs,
            "select" => self.selects,
            _ => false,
        }
    }
}

/// Everything that distinguishes one repeated section from another.
#[derive(Debug, Clone)]
pub struct RepeaterConfig {
    /// Submission-name prefix, e.g. `education`.
    pub section: &'static str,
    pub container_id: &'static str,
    pub add_button_id: &'static str,
    pub group_class: &'static str,
    pub remove_class: &'static str,
    pub field_kinds: FieldKinds,
    /// Builds a new group whose field names embed the given index.
    pub template: fn(usize) -> Fragment,
}

/// Manages one homogeneous list of entry groups inside a container element.
///
/// Holds no counter: the next index is always the number of groups currently
/// in the container, so it cannot drift from the document.
#[derive(Debug, Clone)]
pub struct RepeaterController {
    config: RepeaterConfig,
    container: NodeId,
    add_button: Option<NodeId>,
}

impl RepeaterController {
    /// Binds to the configured container. Returns `None` when the container
    /// is absent. Groups already present are renumbered once so the section
    /// starts out contiguous.
    pub fn bind(document: &mut Document, config: RepeaterConfig) -> Option<Self> {
        let Some(container) = document.element_by_id(config.container_id) else {
            debug!(
                section = config.section,
                container = config.container_id,
                "Container not found; section not wired"
            );
            return None;
        };
        let add_button = document.element_by_id(config.add_button_id);
        if add_button.is_none() {
            debug!(
                section = config.section,
                button = config.add_button_id,
                "Add button not found; entries can only be removed"
            );
        }

        let controller = Self {
            config,
            container,
            add_button,
        };
        controller.reindex_entries(document);
        Some(controller)
    }

    pub fn config(&self) -> &RepeaterConfig {
        &self.config
    }

    pub fn section(&self) -> &'static str {
        self.config.section
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn add_button(&self) -> Option<NodeId> {
        self.add_button
    }

    /// Group roots in document order.
    pub fn entries(&self, document: &Document) -> Vec<NodeId> {
        document.elements_by_class(self.container, self.config.group_class)
    }

    pub fn next_index(&self, document: &Document) -> usize {
        self.entries(document).len()
    }

    /// Appends a new group rendered for the next index.
    pub fn add_entry(&self, document: &mut Document) -> NodeId {
        let index = self.next_index(document);
        let group = document.append(self.container, &(self.config.template)(index));
        debug!(section = self.config.section, index, "Entry added");
        group
    }

    /// Removes `group` and renumbers the survivors. Returns `false` when
    /// `group` is not an entry of this section.
    pub fn remove_entry(&self, document: &mut Document, group: NodeId) -> bool {
        if !document.has_class(group, self.config.group_class)
            || !document.contains(self.container, group)
            || group == self.container
        {
            return false;
        }
        document.remove(group);
        self.reindex_entries(document);
        debug!(
            section = self.config.section,
            remaining = self.next_index(document),
            "Entry removed"
        );
        true
    }

    /// Delegated click handler for the container: removes the enclosing group
    /// when the click landed on (or inside) a remove trigger.
    pub fn handle_click(&self, document: &mut Document, target: NodeId) -> bool {
        let Some(trigger) = document.closest(target, self.config.remove_class) else {
            return false;
        };
        if !document.contains(self.container, trigger) {
            return false;
        }
        match document.closest(trigger, self.config.group_class) {
            Some(group) => self.remove_entry(document, group),
            None => false,
        }
    }

    /// Renumbers every group to its position, rewriting the first bracketed
    /// index of each participating field's `name` and `id`, and of any label
    /// in the same group whose `for` pointed at that field.
    pub fn reindex_entries(&self, document: &mut Document) {
        for (position, group) in self.entries(document).into_iter().enumerate() {
            document.set_attr(group, "data-index", &position.to_string());

            let descendants = document.descendants(group);
            let fields: Vec<NodeId> = descendants
                .iter()
                .copied()
                .filter(|n| self.config.field_kinds.includes(document.tag(*n)))
                .collect();
            let labels: Vec<NodeId> = descendants
                .iter()
                .copied()
                .filter(|n| document.tag(*n) == "label")
                .collect();

            for field in fields {
                let Some(old_name) = document.attr(field, "name").map(str::to_string) else {
                    continue;
                };
                let Some(new_name) = replace_first_index(&old_name, position) else {
                    continue;
                };
                document.set_attr(field, "name", &new_name);

                let old_id = document.attr(field, "id").map(str::to_string);
                if let Some(old_id) = &old_id {
                    if let Some(new_id) = replace_first_index(old_id, position) {
                        document.set_attr(field, "id", &new_id);
                    }
                }

                for label in &labels {
                    let Some(target) = document.attr(*label, "for").map(str::to_string) else {
                        continue;
                    };
                    if target != old_name && Some(&target) != old_id.as_ref() {
                        continue;
                    }
                    if let Some(new_for) = replace_first_index(&target, position) {
                        document.set_attr(*label, "for", &new_for);
                    }
                }
            }
        }
    }

    /// Indices currently embedded in each group's field names, in document
    /// order. Fields without an index are skipped.
    pub fn field_indices(&self, document: &Document) -> Vec<Vec<usize>> {
        self.entries(document)
            .into_iter()
            .map(|group| {
                document
                    .descendants(group)
                    .into_iter()
                    .filter(|n| self.config.field_kinds.includes(document.tag(*n)))
                    .filter_map(|n| document.attr(n, "name"))
                    .filter_map(crate::repeater::reindex::embedded_index)
                    .collect()
            })
            .collect()
    }
}
