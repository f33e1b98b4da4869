use crate::slug::generate_id;
use siteplan_core::{GraphError, PageId, Section, SectionsMap};

/// Appends a section named `name` to `page`'s list.
///
/// The id is derived from the trimmed name and must be unique within that
/// page only. Returns a fresh map; the input is untouched.
pub fn add_section(
    map: &SectionsMap,
    page: &PageId,
    name: &str,
) -> Result<SectionsMap, GraphError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GraphError::EmptyName);
    }

    let id = generate_id(trimmed);
    let taken = map
        .get(page)
        .is_some_and(|sections| sections.iter().any(|section| section.id == id));
    if taken {
        return Err(GraphError::DuplicateId(id));
    }

    let mut next = map.clone();
    next.entry(page.clone())
        .or_default()
        .push(Section::new(id, trimmed));
    Ok(next)
}

/// Removes `section_id` from `page`'s list. Absent pages or sections are a
/// no-op; the returned map then equals the input.
pub fn delete_section(map: &SectionsMap, page: &PageId, section_id: &str) -> SectionsMap {
    let mut next = map.clone();
    if let Some(sections) = next.get_mut(page) {
        sections.retain(|section| section.id != section_id);
    }
    next
}

/// Moves the section at `from` to position `to`, keeping every other
/// relative order intact. An out-of-range `from` is a no-op; `to` clamps to
/// the end of the list.
pub fn reorder_sections(map: &SectionsMap, page: &PageId, from: usize, to: usize) -> SectionsMap {
    let mut next = map.clone();
    if let Some(sections) = next.get_mut(page) {
        array_move(sections, from, to);
    }
    next
}

/// In-place array move: remove at `from`, reinsert at `to`.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
