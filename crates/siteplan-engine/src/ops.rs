//! Copy-on-write transforms over the whole document. Every function leaves
//! its input untouched and hands back the next document, so the store can
//! swap states wholesale and failed validations change nothing.

use siteplan_core::{Edge, GraphError, HierarchyDocument, PageId, PageNode};
use siteplan_graph::{descendant_ids, generate_id, sections};
use std::collections::BTreeSet;

/// Icon stamped on pages created through the editor.
const DEFAULT_PAGE_ICON: &str = "Default";

/// Creates a page under `parent` with a slug id derived from `name`, the
/// parent link, and an empty sections entry.
pub fn add_page(
    doc: &HierarchyDocument,
    parent: &PageId,
    name: &str,
) -> Result<(HierarchyDocument, PageId), GraphError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GraphError::EmptyName);
    }
    if !doc.contains_page(parent) {
        return Err(GraphError::UnknownPage(parent.clone()));
    }
    let slug = generate_id(trimmed);
    if doc.nodes.iter().any(|node| node.id.as_str() == slug) {
        return Err(GraphError::DuplicateId(slug));
    }

    let id = PageId::new(slug);
    let mut next = doc.clone();
    next.nodes.push(PageNode::new(id.clone(), trimmed, DEFAULT_PAGE_ICON));
    next.edges.push(Edge::link(
        free_edge_id(doc, parent, &id),
        parent.clone(),
        id.clone(),
    ));
    next.sections_map.entry(id.clone()).or_default();
    Ok((next, id))
}

/// Removes `id`, every page transitively reachable from it, every edge
/// touching the removed set, and the removed pages' section entries.
/// Returns the next document plus the removed ids, deleted page first.
pub fn delete_page(
    doc: &HierarchyDocument,
    id: &PageId,
) -> Result<(HierarchyDocument, Vec<PageId>), GraphError> {
    if id.is_root() {
        return Err(GraphError::RootDeletion);
    }
    if !doc.contains_page(id) {
        return Err(GraphError::UnknownPage(id.clone()));
    }

    let mut removed = descendant_ids(id, &doc.edges);
    removed.insert(id.clone());

    let mut next = doc.clone();
    next.nodes.retain(|node| !removed.contains(&node.id));
    next.edges
        .retain(|edge| !removed.contains(&edge.source) && !removed.contains(&edge.target));
    next.sections_map.retain(|page, _| !removed.contains(page));

    let mut removed_ids = vec![id.clone()];
    removed_ids.extend(removed.into_iter().filter(|removed_id| removed_id != id));
    Ok((next, removed_ids))
}

/// Adds a free-form edge between two existing pages. Multi-parent links are
/// fine; anything that would break the rooted shape is refused.
pub fn connect(
    doc: &HierarchyDocument,
    source: &PageId,
    target: &PageId,
) -> Result<HierarchyDocument, GraphError> {
    if !doc.contains_page(source) {
        return Err(GraphError::UnknownPage(source.clone()));
    }
    if !doc.contains_page(target) {
        return Err(GraphError::UnknownPage(target.clone()));
    }
    if target.is_root() {
        return Err(GraphError::RootTarget);
    }
    if source == target {
        return Err(GraphError::SelfLink);
    }
    let exists = doc
        .edges
        .iter()
        .any(|edge| &edge.source == source && &edge.target == target);
    if exists {
        return Err(GraphError::DuplicateEdge {
            source: source.clone(),
            target: target.clone(),
        });
    }
    if descendant_ids(target, &doc.edges).contains(source) {
        return Err(GraphError::CycleDetected {
            source: source.clone(),
            target: target.clone(),
        });
    }

    let mut next = doc.clone();
    next.edges.push(Edge::link(
        free_edge_id(doc, source, target),
        source.clone(),
        target.clone(),
    ));
    Ok(next)
}

/// Appends a section to an existing page. Returns the next document plus
/// the new section id.
pub fn add_section(
    doc: &HierarchyDocument,
    page: &PageId,
    name: &str,
) -> Result<(HierarchyDocument, String), GraphError> {
    if !doc.contains_page(page) {
        return Err(GraphError::UnknownPage(page.clone()));
    }
    let sections_map = sections::add_section(&doc.sections_map, page, name)?;
    let section_id = generate_id(name.trim());
    let next = HierarchyDocument {
        nodes: doc.nodes.clone(),
        edges: doc.edges.clone(),
        sections_map,
    };
    Ok((next, section_id))
}

/// Drops one section; absent pages or sections leave the document equal.
pub fn delete_section(doc: &HierarchyDocument, page: &PageId, section_id: &str) -> HierarchyDocument {
    HierarchyDocument {
        nodes: doc.nodes.clone(),
        edges: doc.edges.clone(),
        sections_map: sections::delete_section(&doc.sections_map, page, section_id),
    }
}

/// Moves a section within its page, array-move semantics.
pub fn reorder_sections(
    doc: &HierarchyDocument,
    page: &PageId,
    from: usize,
    to: usize,
) -> HierarchyDocument {
    HierarchyDocument {
        nodes: doc.nodes.clone(),
        edges: doc.edges.clone(),
        sections_map: sections::reorder_sections(&doc.sections_map, page, from, to),
    }
}

/// Repairs a document arriving from storage or a file so the store's
/// invariants hold again: duplicate page ids collapse to their first
/// occurrence, dangling edges and edges into the root go away, every page
/// gets a sections entry, and entries for unknown pages are pruned.
pub fn normalize(doc: &HierarchyDocument) -> HierarchyDocument {
    let mut next = doc.clone();

    let mut seen: BTreeSet<PageId> = BTreeSet::new();
    let before = next.nodes.len();
    next.nodes.retain(|node| seen.insert(node.id.clone()));
    if next.nodes.len() < before {
        tracing::warn!(
            dropped = before - next.nodes.len(),
            "dropping pages with duplicate ids"
        );
    }

    let before = next.edges.len();
    next.edges.retain(|edge| {
        seen.contains(&edge.source) && seen.contains(&edge.target) && !edge.target.is_root()
    });
    if next.edges.len() < before {
        tracing::warn!(
            dropped = before - next.edges.len(),
            "dropping edges that violate the hierarchy"
        );
    }

    next.sections_map.retain(|page, _| seen.contains(page));
    for node in &next.nodes {
        next.sections_map.entry(node.id.clone()).or_default();
    }

    next
}

/// Derived edge ids follow `e-{source}-{target}`; on a collision with
/// foreign data a numeric suffix finds the next free id.
fn free_edge_id(doc: &HierarchyDocument, source: &PageId, target: &PageId) -> String {
    let base = format!("e-{source}-{target}");
    if doc.edges.iter().all(|edge| edge.id != base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if doc.edges.iter().all(|edge| edge.id != candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap;
    use siteplan_core::{PAGE_NODE_KIND, Section};

    fn pid(id: &str) -> PageId {
        PageId::from(id)
    }

    /// The cascade fixture: home -> about, home -> services,
    /// services -> service-detail-1.
    fn small_site() -> HierarchyDocument {
        let mut doc = HierarchyDocument::default();
        for (id, label) in [
            ("home", "Home"),
            ("about", "About Us"),
            ("services", "Services"),
            ("service-detail-1", "Service Detail 1"),
        ] {
            doc.nodes.push(PageNode::new(pid(id), label, "Default"));
            doc.sections_map.insert(pid(id), Vec::new());
        }
        doc.edges.push(Edge::link("e-home-about", pid("home"), pid("about")));
        doc.edges.push(Edge::link("e-home-services", pid("home"), pid("services")));
        doc.edges.push(Edge::link(
            "e-services-detail-1",
            pid("services"),
            pid("service-detail-1"),
        ));
        doc
    }

    #[test]
    fn test_add_page_creates_node_edge_and_sections_entry() -> Result<(), GraphError> {
        let (next, id) = add_page(&small_site(), &pid("home"), "  My Node Name ")?;

        assert_eq!(id, pid("my-node-name"));
        let node = next.page(&id).unwrap();
        assert_eq!(node.data.label, "My Node Name");
        assert_eq!(node.data.icon.as_deref(), Some("Default"));
        assert_eq!(node.kind.as_deref(), Some(PAGE_NODE_KIND));

        let edge = next.edges.last().unwrap();
        assert_eq!(edge.id, "e-home-my-node-name");
        assert_eq!(edge.source, pid("home"));
        assert_eq!(edge.target, id);
        assert_eq!(next.sections_map[&id], Vec::new());
        Ok(())
    }

    #[test]
    fn test_add_page_validations() {
        let doc = small_site();
        assert_eq!(add_page(&doc, &pid("home"), "   "), Err(GraphError::EmptyName));
        assert_eq!(
            add_page(&doc, &pid("ghost"), "New"),
            Err(GraphError::UnknownPage(pid("ghost")))
        );
        assert_eq!(
            add_page(&doc, &pid("home"), "About Us"),
            Err(GraphError::DuplicateId("about-us".into()))
        );
        assert_eq!(
            add_page(&doc, &pid("home"), " Services  "),
            Err(GraphError::DuplicateId("services".into()))
        );
    }

    #[test]
    fn test_delete_cascades_to_exactly_the_reachable_set() -> Result<(), GraphError> {
        let (next, removed) = delete_page(&small_site(), &pid("services"))?;

        assert_eq!(removed, vec![pid("services"), pid("service-detail-1")]);

        let ids: Vec<&str> = next.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "about"]);

        let edge_ids: Vec<&str> = next.edges.iter().map(|edge| edge.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["e-home-about"]);

        assert!(!next.sections_map.contains_key(&pid("services")));
        assert!(next.sections_map.contains_key(&pid("about")));
        Ok(())
    }

    #[test]
    fn test_delete_reaches_through_shared_children() -> Result<(), GraphError> {
        let mut doc = small_site();
        // about also links to service-detail-1; deleting about still takes
        // the shared child with it, and the edge from services goes too.
        doc = connect(&doc, &pid("about"), &pid("service-detail-1"))?;
        let (next, removed) = delete_page(&doc, &pid("about"))?;

        assert_eq!(removed, vec![pid("about"), pid("service-detail-1")]);
        assert!(next.edges.iter().all(|edge| edge.id != "e-services-detail-1"));
        Ok(())
    }

    #[test]
    fn test_delete_guards() {
        let doc = small_site();
        assert_eq!(delete_page(&doc, &pid("home")).unwrap_err(), GraphError::RootDeletion);
        assert_eq!(
            delete_page(&doc, &pid("ghost")).unwrap_err(),
            GraphError::UnknownPage(pid("ghost"))
        );
    }

    #[test]
    fn test_connect_adds_a_styled_edge() -> Result<(), GraphError> {
        let next = connect(&small_site(), &pid("about"), &pid("service-detail-1"))?;
        let edge = next.edges.last().unwrap();
        assert_eq!(edge.id, "e-about-service-detail-1");
        assert_eq!(edge.animated, Some(true));
        assert!(edge.style.is_some());
        Ok(())
    }

    #[test]
    fn test_connect_validations() {
        let doc = small_site();
        assert_eq!(
            connect(&doc, &pid("ghost"), &pid("about")).unwrap_err(),
            GraphError::UnknownPage(pid("ghost"))
        );
        assert_eq!(
            connect(&doc, &pid("about"), &pid("home")).unwrap_err(),
            GraphError::RootTarget
        );
        assert_eq!(
            connect(&doc, &pid("about"), &pid("about")).unwrap_err(),
            GraphError::SelfLink
        );
        assert_eq!(
            connect(&doc, &pid("home"), &pid("about")).unwrap_err(),
            GraphError::DuplicateEdge {
                source: pid("home"),
                target: pid("about")
            }
        );
        assert_eq!(
            connect(&doc, &pid("service-detail-1"), &pid("services")).unwrap_err(),
            GraphError::CycleDetected {
                source: pid("service-detail-1"),
                target: pid("services")
            }
        );
    }

    #[test]
    fn test_edge_ids_get_a_suffix_on_collision() -> Result<(), GraphError> {
        let mut doc = small_site();
        // A foreign edge already squats on the derived id.
        doc.edges.push(Edge::link(
            "e-about-service-detail-1",
            pid("services"),
            pid("service-detail-1"),
        ));
        let next = connect(&doc, &pid("about"), &pid("service-detail-1"))?;
        assert_eq!(next.edges.last().unwrap().id, "e-about-service-detail-1-2");
        Ok(())
    }

    #[test]
    fn test_add_section_requires_the_page_to_exist() {
        assert_eq!(
            add_section(&small_site(), &pid("ghost"), "Hero").unwrap_err(),
            GraphError::UnknownPage(pid("ghost"))
        );
    }

    #[test]
    fn test_add_section_returns_the_new_id() -> Result<(), GraphError> {
        let (next, section_id) = add_section(&small_site(), &pid("home"), "  Hero  ")?;
        assert_eq!(section_id, "hero");
        assert_eq!(next.sections_map[&pid("home")], vec![Section::new("hero", "Hero")]);
        Ok(())
    }

    #[test]
    fn test_section_removal_and_reorder_pass_through() -> Result<(), GraphError> {
        let (doc, _) = add_section(&small_site(), &pid("home"), "Hero")?;
        let (doc, _) = add_section(&doc, &pid("home"), "Footer")?;

        let reordered = reorder_sections(&doc, &pid("home"), 1, 0);
        let ids: Vec<&str> = reordered.sections_map[&pid("home")]
            .iter()
            .map(|section| section.id.as_str())
            .collect();
        assert_eq!(ids, vec!["footer", "hero"]);

        let trimmed = delete_section(&reordered, &pid("home"), "footer");
        assert_eq!(trimmed.sections_map[&pid("home")], vec![Section::new("hero", "Hero")]);

        let unchanged = delete_section(&trimmed, &pid("home"), "ghost");
        assert_eq!(unchanged, trimmed);
        Ok(())
    }

    #[test]
    fn test_normalize_repairs_a_foreign_document() {
        let mut doc = small_site();
        doc.nodes.push(PageNode::new(pid("about"), "Shadow", "Default"));
        doc.edges.push(Edge::link("e-about-ghost", pid("about"), pid("ghost")));
        doc.edges.push(Edge::link("e-about-home", pid("about"), pid("home")));
        doc.sections_map.insert(pid("ghost"), vec![Section::new("hero", "Hero")]);
        doc.sections_map.remove(&pid("about"));

        let repaired = normalize(&doc);

        assert_eq!(repaired.nodes.len(), 4);
        assert_eq!(repaired.page(&pid("about")).unwrap().data.label, "About Us");
        assert!(repaired.edges.iter().all(|edge| edge.target != pid("ghost")));
        assert!(repaired.edges.iter().all(|edge| !edge.target.is_root()));
        assert!(!repaired.sections_map.contains_key(&pid("ghost")));
        assert_eq!(repaired.sections_map[&pid("about")], Vec::new());
    }

    #[test]
    fn test_normalize_keeps_a_well_formed_document_equal() {
        let doc = bootstrap::initial_document();
        assert_eq!(normalize(&doc), doc);
    }
}
