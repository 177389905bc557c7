//! Hierarchical widget identity

/// Sequence of ids from the outermost container down to one widget
///
/// Two widgets with the same local id are distinct when their parents
/// differ. Paths compare by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetPath(Vec<u32>);

impl WidgetPath {
    /// Empty path (the root)
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Descend into a child container
    pub fn push(&mut self, id: u32) {
        self.0.push(id);
    }

    /// Leave the innermost container
    pub fn pop(&mut self) -> Option<u32> {
        self.0.pop()
    }

    /// This path extended by one id
    pub fn child(&self, id: u32) -> Self {
        let mut path = self.clone();
        path.push(id);
        path
    }

    /// Number of ids in the path
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Ids from outermost to innermost
    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    /// Whether `self` is `other` or one of its ancestors
    pub fn contains(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Whether `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.contains(other)
    }
}

impl From<&[u32]> for WidgetPath {
    fn from(ids: &[u32]) -> Self {
        Self(ids.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_under_different_parents_differs() {
        let a = WidgetPath::from(&[1u32, 7][..]);
        let b = WidgetPath::from(&[2u32, 7][..]);
        assert_ne!(a, b);
        assert!(!a.contains(&b));
    }

    #[test]
    fn test_ancestor_prefix_matching() {
        let parent = WidgetPath::from(&[3u32][..]);
        let child = parent.child(4);
        assert!(parent.is_ancestor_of(&child));
        assert!(parent.contains(&child));
        assert!(child.contains(&child));
        assert!(!child.is_ancestor_of(&child));
        assert!(!child.contains(&parent));
        assert!(WidgetPath::new().contains(&child));
    }

    #[test]
    fn test_push_pop() {
        let mut path = WidgetPath::new();
        path.push(1);
        path.push(2);
        assert_eq!(path.ids(), &[1, 2]);
        assert_eq!(path.pop(), Some(2));
        assert_eq!(path.depth(), 1);
    }
}
