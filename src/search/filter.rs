//! Title filtering

use crate::models::Titled;

/// Outcome of a filtering pass
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered<T> {
    /// At least one record matched
    Matches(Vec<T>),
    /// Nothing matched; callers render their empty state
    Empty,
}

impl<T> Filtered<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            Filtered::Empty
        } else {
            Filtered::Matches(items)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filtered::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Filtered::Matches(items) => items.len(),
            Filtered::Empty => 0,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Filtered::Matches(items) => items,
            Filtered::Empty => Vec::new(),
        }
    }
}

/// Records whose title contains `query`, ignoring case
///
/// An empty query matches everything.
pub fn filter_titles<T: Titled + Clone>(items: &[T], query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.title().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;

    #[test]
    fn test_case_insensitive_substring() {
        let index = fixtures::search_index();
        let hits = filter_titles(&index, "DARK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Dark Knight");
    }

    #[test]
    fn test_empty_query_matches_all() {
        let movies = fixtures::all_movies();
        assert_eq!(filter_titles(&movies, "").len(), movies.len());
    }

    #[test]
    fn test_filtered_signal() {
        let index = fixtures::search_index();
        assert!(Filtered::from_vec(filter_titles(&index, "zzz")).is_empty());

        let found = Filtered::from_vec(filter_titles(&index, "i"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_unicode_title() {
        let movies = fixtures::upcoming_movies();
        let hits = filter_titles(&movies, "FOLIE À");
        assert_eq!(hits.len(), 1);
    }
}
