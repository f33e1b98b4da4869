use siteplan_core::{Anchor, Edge, PageId, PageNode, Position, ROOT_PAGE_ID};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Width of a rendered page card.
pub const NODE_WIDTH: f64 = 250.0;
/// Height of a rendered page card.
pub const NODE_HEIGHT: f64 = 160.0;
/// Horizontal spacing between cards in one layer.
pub const NODE_GAP: f64 = 60.0;
/// Vertical spacing between layers.
pub const LAYER_GAP: f64 = 80.0;

/// Positions every page on a layered grid: rank = BFS depth from the home
/// page, one horizontal row per rank, each row centered against the widest.
/// Every output node gets its edges anchored bottom (outgoing) and top
/// (incoming).
///
/// Pure: inputs stay untouched, identical inputs give bit-identical output,
/// and running it on its own output changes nothing. Edges only steer the
/// ranking; the caller keeps them as they are.
pub fn layout(nodes: &[PageNode], edges: &[Edge]) -> Vec<PageNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let ranks = assign_ranks(nodes, edges);
    let layers = build_layers(nodes, &ranks);
    let positions = place_layers(&layers);

    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let mut placed = node.clone();
            if let Some(&position) = positions.get(&index) {
                placed.position = position;
            }
            placed.source_position = Some(Anchor::Bottom);
            placed.target_position = Some(Anchor::Top);
            placed
        })
        .collect()
}

/// BFS depth from the root. The first visit wins, so a multi-parent page
/// takes its shortest distance. Pages the walk never reaches stay unranked
/// here and fall back to rank 0 during layering.
fn assign_ranks(nodes: &[PageNode], edges: &[Edge]) -> HashMap<PageId, u32> {
    let mut children: HashMap<&PageId, Vec<&PageId>> = HashMap::new();
    for edge in edges {
        children.entry(&edge.source).or_default().push(&edge.target);
    }

    let root = PageId::from(ROOT_PAGE_ID);
    let mut ranks: HashMap<PageId, u32> = HashMap::new();
    let mut queue: VecDeque<PageId> = VecDeque::new();

    if nodes.iter().any(|node| node.id == root) {
        ranks.insert(root.clone(), 0);
        queue.push_back(root);
    }

    while let Some(current) = queue.pop_front() {
        let rank = ranks[&current];
        let Some(targets) = children.get(&current) else {
            continue;
        };
        for &target in targets {
            if !ranks.contains_key(target) {
                ranks.insert(target.clone(), rank + 1);
                queue.push_back(target.clone());
            }
        }
    }

    ranks
}

/// Groups node indices by rank, keeping the input order within one layer.
/// Unreachable pages are appended to rank 0 after its reachable members, so
/// they never disturb the ranks of the proper tree.
fn build_layers(nodes: &[PageNode], ranks: &HashMap<PageId, u32>) -> BTreeMap<u32, Vec<usize>> {
    let mut layers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    let mut unreachable: Vec<usize> = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        match ranks.get(&node.id) {
            Some(&rank) => layers.entry(rank).or_default().push(index),
            None => unreachable.push(index),
        }
    }

    if !unreachable.is_empty() {
        tracing::warn!(
            count = unreachable.len(),
            "pages unreachable from the root placed at rank 0"
        );
        layers.entry(0).or_default().extend(unreachable);
    }

    layers
}

fn layer_extent(len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    len as f64 * NODE_WIDTH + (len - 1) as f64 * NODE_GAP
}

/// Packs each layer left to right and centers it against the widest layer.
fn place_layers(layers: &BTreeMap<u32, Vec<usize>>) -> HashMap<usize, Position> {
    let widest = layers
        .values()
        .map(|layer| layer_extent(layer.len()))
        .fold(0.0_f64, f64::max);

    let mut positions = HashMap::new();
    for (&rank, layer) in layers {
        let y = f64::from(rank) * (NODE_HEIGHT + LAYER_GAP);
        let x_start = (widest - layer_extent(layer.len())) / 2.0;
        for (slot, &index) in layer.iter().enumerate() {
            let x = x_start + slot as f64 * (NODE_WIDTH + NODE_GAP);
            positions.insert(index, Position::new(x, y));
        }
    }

    positions
}
