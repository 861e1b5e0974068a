use std::collections::HashMap;

use crate::dom::document::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Blur,
}

impl EventKind {
    /// Blur is delivered to its target only; the others bubble to ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::Blur)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
        }
    }

    pub fn change(target: NodeId) -> Self {
        Self {
            kind: EventKind::Change,
            target,
        }
    }

    pub fn blur(target: NodeId) -> Self {
        Self {
            kind: EventKind::Blur,
            target,
        }
    }
}

/// Listener table keyed by element and event kind.
///
/// Handlers are plain values (usually an enum naming the operation to run),
/// so one registration on a container serves every element added to it later.
#[derive(Debug, Clone)]
pub struct Listeners<H> {
    table: HashMap<(NodeId, EventKind), Vec<H>>,
}

impl<H> Default for Listeners<H> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<H: Clone> Listeners<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, node: NodeId, kind: EventKind, handler: H) {
        self.table.entry((node, kind)).or_default().push(handler);
    }

    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handlers an event reaches, paired with the element each was registered
    /// on, in delivery order: target first, then ancestors when it bubbles.
    pub fn route(&self, document: &Document, event: Event) -> Vec<(NodeId, H)> {
        let path = if event.kind.bubbles() {
            document.ancestors(event.target)
        } else {
            vec![event.target]
        };
        path.into_iter()
            .filter_map(|node| self.table.get(&(node, event.kind)).map(|hs| (node, hs)))
            .flat_map(|(node, hs)| hs.iter().cloned().map(move |h| (node, h)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::Fragment;

    fn nested() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let container = doc.append(
            root,
            &Fragment::new("div")
                .id("container")
                .child(Fragment::new("button").id("inner")),
        );
        let inner = doc.children(container)[0];
        (doc, container, inner)
    }

    #[test]
    fn test_click_bubbles_to_container() {
        let (doc, container, inner) = nested();
        let mut listeners = Listeners::new();
        listeners.on(container, EventKind::Click, "delegate");
        listeners.on(inner, EventKind::Click, "direct");
        let routed = listeners.route(&doc, Event::click(inner));
        assert_eq!(routed, vec![(inner, "direct"), (container, "delegate")]);
    }

    #[test]
    fn test_blur_does_not_bubble() {
        let (doc, container, inner) = nested();
        let mut listeners = Listeners::new();
        listeners.on(container, EventKind::Blur, "container");
        assert!(listeners.route(&doc, Event::blur(inner)).is_empty());
    }

    #[test]
    fn test_kind_must_match() {
        let (doc, container, inner) = nested();
        let mut listeners = Listeners::new();
        listeners.on(container, EventKind::Change, 1);
        assert!(listeners.route(&doc, Event::click(inner)).is_empty());
        assert_eq!(listeners.len(), 1);
    }
}
