use std::collections::BTreeSet;

/// Selected slots of the current point set. Membership only changes through
/// [`SelectionState::set_selection`] and [`SelectionState::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    indices: BTreeSet<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection; duplicates collapse.
    pub fn set_selection<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        self.indices = indices.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// The selected index when exactly one point is selected.
    pub fn primary(&self) -> Option<usize> {
        if self.indices.len() == 1 {
            self.indices.first().copied()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
    pub fn contains(&self, idx: usize) -> bool {
        self.indices.contains(&idx)
    }
    /// Ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
