//! Immutable link graph
//!
//! Provides a read-only, dense, integer-indexed view of a page -> outgoing
//! links mapping for algorithm execution.
//!
//! Pages are assigned indices `0..N` in ascending identifier order. That
//! order is frozen at construction and is the fixed page ordering used by
//! cumulative-distribution sampling, so seeded runs are reproducible.

use crate::error::{RankError, RankResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Opaque page identifier.
///
/// Anything hashable and totally ordered works: file names, URLs, numeric ids.
pub trait PageId: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T> PageId for T where T: Clone + Eq + Hash + Ord + fmt::Debug {}

/// A directed link graph.
///
/// Every link target is also a page of the graph and self-links are dropped.
/// A page without outgoing links is *dangling*.
#[derive(Debug, Clone)]
pub struct LinkGraph<P> {
    /// Mapping from dense index (0..N) back to the page
    index_to_page: Vec<P>,
    /// Mapping from page to dense index
    page_to_index: HashMap<P, usize>,
    /// Outgoing links: index -> sorted target indices
    outgoing: Vec<Vec<usize>>,
    /// Incoming links: index -> sorted source indices
    incoming: Vec<Vec<usize>>,
}

impl<P: PageId> LinkGraph<P> {
    /// Build a graph from an adjacency mapping.
    ///
    /// Repeated keys are merged and duplicate targets collapse. A target that
    /// is not itself a key fails with [`RankError::UnknownPage`].
    pub fn from_adjacency<I, T>(adjacency: I) -> RankResult<Self, P>
    where
        I: IntoIterator<Item = (P, T)>,
        T: IntoIterator<Item = P>,
    {
        // 1. Order pages so indices follow identifier order
        let mut links: BTreeMap<P, BTreeSet<P>> = BTreeMap::new();
        for (page, targets) in adjacency {
            links.entry(page).or_default().extend(targets);
        }

        // 2. Build index mappings
        let index_to_page: Vec<P> = links.keys().cloned().collect();
        let page_to_index: HashMap<P, usize> = index_to_page
            .iter()
            .enumerate()
            .map(|(idx, page)| (page.clone(), idx))
            .collect();

        let node_count = index_to_page.len();
        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];
        let mut self_links = 0usize;

        // 3. Build adjacency lists (sorted, since both maps iterate in order)
        for (u_idx, targets) in links.values().enumerate() {
            for target in targets {
                let v_idx = *page_to_index
                    .get(target)
                    .ok_or_else(|| RankError::UnknownPage(target.clone()))?;
                if v_idx == u_idx {
                    self_links += 1;
                    continue;
                }
                outgoing[u_idx].push(v_idx);
                incoming[v_idx].push(u_idx);
            }
        }

        let graph = Self {
            index_to_page,
            page_to_index,
            outgoing,
            incoming,
        };

        debug!(
            "Built link graph: {} pages, {} links, {} dangling, {} self-links dropped",
            graph.page_count(),
            graph.link_count(),
            graph.dangling_count(),
            self_links
        );

        Ok(graph)
    }

    /// Total number of pages (N)
    pub fn page_count(&self) -> usize {
        self.index_to_page.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_page.is_empty()
    }

    /// Total number of links
    pub fn link_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Pages in the fixed ordering
    pub fn pages(&self) -> &[P] {
        &self.index_to_page
    }

    pub fn contains(&self, page: &P) -> bool {
        self.page_to_index.contains_key(page)
    }

    /// Dense index of a page
    pub fn index_of(&self, page: &P) -> RankResult<usize, P> {
        self.page_to_index
            .get(page)
            .copied()
            .ok_or_else(|| RankError::UnknownPage(page.clone()))
    }

    /// Page stored at a dense index
    pub fn page(&self, idx: usize) -> &P {
        &self.index_to_page[idx]
    }

    /// Pages linked from `page`, in the fixed ordering
    pub fn outlinks(&self, page: &P) -> RankResult<Vec<&P>, P> {
        let idx = self.index_of(page)?;
        Ok(self.successors(idx).iter().map(|&v| self.page(v)).collect())
    }

    /// Whether `page` has no outgoing links
    pub fn is_dangling(&self, page: &P) -> RankResult<bool, P> {
        self.index_of(page).map(|idx| self.is_dangling_index(idx))
    }

    /// All dangling pages, in the fixed ordering
    pub fn dangling_pages(&self) -> Vec<&P> {
        (0..self.page_count())
            .filter(|&idx| self.is_dangling_index(idx))
            .map(|idx| self.page(idx))
            .collect()
    }

    pub fn dangling_count(&self) -> usize {
        (0..self.page_count())
            .filter(|&idx| self.is_dangling_index(idx))
            .count()
    }
}

impl<P> LinkGraph<P> {
    /// The one dangling check every algorithm goes through
    pub(crate) fn is_dangling_index(&self, idx: usize) -> bool {
        self.outgoing[idx].is_empty()
    }

    /// Get the out-degree of a page (by index)
    pub(crate) fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    /// Get outgoing neighbors of a page (by index), sorted
    pub(crate) fn successors(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Get incoming neighbors of a page (by index), sorted
    pub(crate) fn predecessors(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn corpus(edges: &[(&str, &[&str])]) -> LinkGraph<String> {
        let adjacency: HashMap<String, HashSet<String>> = edges
            .iter()
            .map(|(page, links)| {
                (
                    page.to_string(),
                    links.iter().map(|l| l.to_string()).collect(),
                )
            })
            .collect();
        LinkGraph::from_adjacency(adjacency).unwrap()
    }

    #[test]
    fn test_graph_projection() {
        // 1 -> 2 -> 3, 3 dangling
        let graph = corpus(&[("1.html", &["2.html"]), ("2.html", &["3.html"]), ("3.html", &[])]);

        assert_eq!(graph.page_count(), 3);
        assert_eq!(graph.link_count(), 2);

        let n1 = graph.index_of(&"1.html".to_string()).unwrap();
        let n2 = graph.index_of(&"2.html".to_string()).unwrap();
        let n3 = graph.index_of(&"3.html".to_string()).unwrap();

        // Indices follow identifier order
        assert_eq!((n1, n2, n3), (0, 1, 2));
        assert_eq!(graph.successors(n1), &[n2]);
        assert_eq!(graph.predecessors(n3), &[n2]);
        assert_eq!(graph.out_degree(n2), 1);

        assert!(!graph.is_dangling(&"1.html".to_string()).unwrap());
        assert!(graph.is_dangling(&"3.html".to_string()).unwrap());
        assert_eq!(graph.dangling_pages(), vec![&"3.html".to_string()]);
    }

    #[test]
    fn test_outlinks_are_ordered() {
        let graph = corpus(&[("a", &["c", "b"]), ("b", &[]), ("c", &["a"])]);
        let links = graph.outlinks(&"a".to_string()).unwrap();
        assert_eq!(links, vec![&"b".to_string(), &"c".to_string()]);
    }

    #[test]
    fn test_self_links_dropped() {
        let graph = LinkGraph::from_adjacency(vec![(1u64, vec![1, 2]), (2, vec![2])]).unwrap();
        assert_eq!(graph.outlinks(&1).unwrap(), vec![&2]);
        assert!(graph.is_dangling(&2).unwrap());
    }

    #[test]
    fn test_unknown_link_target() {
        let result = LinkGraph::from_adjacency(vec![(1u64, vec![7])]);
        assert!(matches!(result, Err(RankError::UnknownPage(7))));
    }

    #[test]
    fn test_unknown_page_lookup() {
        let graph = corpus(&[("a", &[])]);
        let missing = "z".to_string();
        assert!(!graph.contains(&missing));
        assert!(matches!(graph.is_dangling(&missing), Err(RankError::UnknownPage(p)) if p == "z"));
        assert!(graph.outlinks(&missing).is_err());
    }

    #[test]
    fn test_empty_graph() {
        let graph: LinkGraph<u64> = LinkGraph::from_adjacency(Vec::<(u64, Vec<u64>)>::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.page_count(), 0);
        assert!(graph.dangling_pages().is_empty());
    }
}
