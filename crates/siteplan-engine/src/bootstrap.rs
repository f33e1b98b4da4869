use siteplan_core::{Edge, HierarchyDocument, PageId, PageNode, Section, SectionsMap};

fn home_sections() -> Vec<Section> {
    vec![
        Section::new("hero", "Hero"),
        Section::new("features", "Features"),
        Section::new("testimonials", "Testimonials"),
        Section::new("cta", "Call to Action"),
        Section::new("footer", "Footer"),
    ]
}

/// The starter site every fresh install begins from: a home page with a
/// small marketing site fanned out underneath it. Positions are all zero
/// here; layout places them on install.
pub fn initial_document() -> HierarchyDocument {
    let nodes = vec![
        PageNode::new(PageId::from("home"), "Home", "Home"),
        PageNode::new(PageId::from("about"), "About Us", "Users"),
        PageNode::new(PageId::from("services"), "Services", "Cog"),
        PageNode::new(PageId::from("blog"), "Blog", "Newspaper"),
        PageNode::new(PageId::from("contact"), "Contact", "Mail"),
        PageNode::new(PageId::from("service-detail-1"), "Service Detail 1", "Info"),
        PageNode::new(PageId::from("service-detail-2"), "Service Detail 2", "Info"),
    ];

    let edges = vec![
        Edge::link("e-home-about", PageId::from("home"), PageId::from("about")),
        Edge::link("e-home-services", PageId::from("home"), PageId::from("services")),
        Edge::link("e-home-contact", PageId::from("home"), PageId::from("contact")),
        Edge::link("e-home-blog", PageId::from("home"), PageId::from("blog")),
        Edge::link(
            "e-services-detail-1",
            PageId::from("services"),
            PageId::from("service-detail-1"),
        ),
        Edge::link(
            "e-services-detail-2",
            PageId::from("services"),
            PageId::from("service-detail-2"),
        ),
    ];

    let mut sections_map = SectionsMap::new();
    for node in &nodes {
        sections_map.insert(node.id.clone(), Vec::new());
    }
    sections_map.insert(PageId::from("home"), home_sections());

    HierarchyDocument {
        nodes,
        edges,
        sections_map,
    }
}
