use crate::models::Source;
use std::collections::{HashMap, HashSet};

/// References already announced, partitioned by source name.
/// Grows for the lifetime of the process and is lost on restart.
#[derive(Debug, Default)]
pub struct DedupStore {
    partitions: HashMap<String, HashSet<String>>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty partition per configured source
    pub fn for_sources(sources: &[Source]) -> Self {
        let partitions = sources
            .iter()
            .map(|source| (source.name.clone(), HashSet::new()))
            .collect();

        Self { partitions }
    }

    /// Marks `reference` as seen for `source`. Returns true the first time only.
    pub fn observe(&mut self, source: &str, reference: &str) -> bool {
        if !self.partitions.contains_key(source) {
            self.partitions.insert(source.to_string(), HashSet::new());
        }

        match self.partitions.get_mut(source) {
            Some(seen) if !seen.contains(reference) => seen.insert(reference.to_string()),
            _ => false,
        }
    }

    pub fn seen_count(&self, source: &str) -> usize {
        self.partitions.get(source).map_or(0, HashSet::len)
    }
}
