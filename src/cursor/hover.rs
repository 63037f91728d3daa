//! Hover classification: which elements grow the marker, and whether the
//! pointer (or keyboard focus) is currently on one of them.

/// Position of an element in its [`InteractiveElementSet`].
pub type ElementId = usize;

/// Comma-joined selector list, matched in one DOM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    joined: String,
}

impl SelectorList {
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Self {
        let joined = selectors
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        Self { joined }
    }

    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }
}

/// A page element that can be tested against selectors.
///
/// Implemented for `web_sys::Element` by the browser driver and by fake
/// nodes in tests.
pub trait InteractiveNode: Clone + PartialEq {
    /// Whether this element itself matches `selector`.
    fn matches_selector(&self, selector: &str) -> bool;

    /// Descendants matching `selector`, in document order.
    fn descendants_matching(&self, selector: &str) -> Vec<Self>;

    /// Still attached to the document.
    fn is_connected(&self) -> bool;
}

/// Elements that already carry hover bindings.
///
/// Only grows. A removed element keeps its entry; its listeners simply
/// never fire again.
#[derive(Debug, Clone)]
pub struct InteractiveElementSet<N> {
    selectors: SelectorList,
    bound: Vec<N>,
}

impl<N: InteractiveNode> InteractiveElementSet<N> {
    pub fn new(selectors: SelectorList) -> Self {
        Self {
            selectors,
            bound: Vec::new(),
        }
    }

    pub fn selectors(&self) -> &SelectorList {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.bound.contains(node)
    }

    pub fn id_of(&self, node: &N) -> Option<ElementId> {
        self.bound.iter().position(|bound| bound == node)
    }

    pub fn get(&self, id: ElementId) -> Option<&N> {
        self.bound.get(id)
    }

    /// Whether the element behind `id` is still in the document.
    pub fn is_live(&self, id: ElementId) -> bool {
        self.get(id).map_or(false, InteractiveNode::is_connected)
    }

    /// Scan `roots` (each root and all of its descendants) and record every
    /// match not seen before. Returns the newly recorded elements with their
    /// ids; the caller attaches listeners to them.
    pub fn extend_from<'a, I>(&mut self, roots: I) -> Vec<(ElementId, N)>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut added = Vec::new();
        if self.selectors.is_empty() {
            return added;
        }
        let selector = self.selectors.as_str().to_string();

        for root in roots {
            let mut candidates = Vec::new();
            if root.matches_selector(&selector) {
                candidates.push(root.clone());
            }
            candidates.extend(root.descendants_matching(&selector));

            for node in candidates {
                if !self.bound.contains(&node) {
                    let id = self.bound.len();
                    self.bound.push(node.clone());
                    added.push((id, node));
                }
            }
        }
        added
    }
}

/// Elements the pointer is inside, plus the focused one.
///
/// Nested matched elements (a `.card-projeto` containing an `a`) each send
/// their own enter/leave, so a single flag would clear too early when the
/// inner one is left. Tracking ids instead of a count lets entries for
/// removed elements be dropped with [`HoverTracker::retain`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTracker {
    entered: Vec<ElementId>,
    focused: Option<ElementId>,
}

impl HoverTracker {
    pub fn pointer_enter(&mut self, id: ElementId) {
        if !self.entered.contains(&id) {
            self.entered.push(id);
        }
    }

    pub fn pointer_leave(&mut self, id: ElementId) {
        self.entered.retain(|entered| *entered != id);
    }

    pub fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    /// Blur of an element other than the focused one changes nothing.
    pub fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// The pointer left the viewport, so it is inside no element.
    pub fn reset_pointer(&mut self) {
        self.entered.clear();
    }

    /// Keep only entries for which `live` holds.
    pub fn retain(&mut self, live: impl Fn(ElementId) -> bool) {
        self.entered.retain(|id| live(*id));
        if self.focused.map_or(false, |id| !live(id)) {
            self.focused = None;
        }
    }

    pub fn depth(&self) -> usize {
        self.entered.len()
    }

    pub fn is_hovering(&self) -> bool {
        !self.entered.is_empty() || self.focused.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_list_join() {
        let list = SelectorList::new(&["a", " button ", "", "label[for]"]);
        assert_eq!(list.as_str(), "a,button,label[for]");
        assert!(SelectorList::new::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_nested_leave_keeps_hover() {
        let mut hover = HoverTracker::default();
        hover.pointer_enter(0); // card
        hover.pointer_enter(1); // link inside card
        hover.pointer_leave(1); // back to card
        assert!(hover.is_hovering());
        hover.pointer_leave(0);
        assert!(!hover.is_hovering());
    }

    #[test]
    fn test_repeated_events_do_not_stack() {
        let mut hover = HoverTracker::default();
        hover.pointer_enter(3);
        hover.pointer_enter(3);
        hover.pointer_leave(3);
        assert!(!hover.is_hovering());
        hover.pointer_leave(3);
        assert_eq!(hover.depth(), 0);
    }

    #[test]
    fn test_focus_independent_of_pointer() {
        let mut hover = HoverTracker::default();
        hover.focus(2);
        hover.pointer_enter(0);
        hover.pointer_leave(0);
        assert!(hover.is_hovering());
        hover.blur(5);
        assert!(hover.is_hovering());
        hover.blur(2);
        assert!(!hover.is_hovering());
    }

    #[test]
    fn test_reset_pointer() {
        let mut hover = HoverTracker::default();
        hover.pointer_enter(0);
        hover.pointer_enter(1);
        hover.reset_pointer();
        assert!(!hover.is_hovering());
    }

    #[test]
    fn test_retain_drops_removed_entries() {
        let mut hover = HoverTracker::default();
        hover.pointer_enter(0);
        hover.focus(0);
        hover.pointer_enter(1);
        hover.retain(|id| id != 0);
        assert_eq!(hover.depth(), 1);
        hover.pointer_leave(1);
        assert!(!hover.is_hovering());
    }
}
