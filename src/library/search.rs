use super::model::Track;

/// Catalog tracks followed by user imports whose title or artist contains
/// `query`, ignoring case.
///
/// Returns `None` for a blank query, meaning "show the default view".
pub fn search<'a>(catalog: &'a [Track], imports: &'a [Track], query: &str) -> Option<Vec<&'a Track>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let query_lower = query.to_lowercase();
    Some(
        catalog
            .iter()
            .chain(imports.iter())
            .filter(|t| t.matches_lower(&query_lower))
            .collect(),
    )
}
