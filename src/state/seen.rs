use std::collections::HashSet;

/// Ids already accepted during one crawl
///
/// The set only ever grows; it gates which products of a page are appended to
/// the aggregate.
#[derive(Debug, Default, Clone)]
pub struct SeenIdSet {
    ids: HashSet<u64>,
}

impl SeenIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id, returning true if it had not been seen before
    pub fn insert(&mut self, id: u64) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
