use siteplan_core::{Edge, PageId};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Direct children of `page`, in edge-list order.
pub fn children_of<'a>(page: &PageId, edges: &'a [Edge]) -> Vec<&'a PageId> {
    edges
        .iter()
        .filter(|edge| &edge.source == page)
        .map(|edge| &edge.target)
        .collect()
}

/// Every page transitively reachable from `page` via outgoing edges.
///
/// Breadth-first with a visited set, so it terminates on the cyclic or
/// multi-parent edge sets a file import can smuggle in. The start page is
/// never part of the result; unknown ids yield the empty set. Returning an
/// ordered set keeps the result independent of edge-list order.
pub fn descendant_ids(page: &PageId, edges: &[Edge]) -> BTreeSet<PageId> {
    let mut children: HashMap<&PageId, Vec<&PageId>> = HashMap::new();
    for edge in edges {
        children.entry(&edge.source).or_default().push(&edge.target);
    }

    let mut found: BTreeSet<PageId> = BTreeSet::new();
    let mut queue: VecDeque<&PageId> = VecDeque::new();
    queue.push_back(page);

    while let Some(current) = queue.pop_front() {
        let Some(targets) = children.get(current) else {
            continue;
        };
        for &target in targets {
            if target != page && !found.contains(target) {
                found.insert(target.clone());
                queue.push_back(target);
            }
        }
    }

    found
}
