/// Derives a page or section id from a human-entered name: trim, lowercase,
/// collapse every whitespace run to a single hyphen.
///
/// Pure and idempotent; input already in slug form comes back unchanged.
pub fn generate_id(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
