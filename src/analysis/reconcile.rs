use crate::model::{ProcessResult, ProcessResultItem};
use std::collections::HashSet;

/// Merges result envelopes into one list with duplicate runs removed.
///
/// Envelopes with `success == false` contribute nothing, whatever their data.
/// Runs are keyed by the exact `(process_label, created_at)` strings; the first
/// occurrence in input order is kept and relative order is preserved.
pub fn merge_results<'a, I>(sources: I) -> Vec<&'a ProcessResultItem>
where
    I: IntoIterator<Item = &'a ProcessResult>,
{
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    sources
        .into_iter()
        .filter(|envelope| envelope.success)
        .flat_map(|envelope| envelope.data.iter())
        .filter(|item| seen.insert((item.process_label.as_str(), item.created_at.as_str())))
        .collect()
}

/// Results to render for the selected email.
pub fn reconcile(existing: Option<&ProcessResult>) -> Vec<&ProcessResultItem> {
    merge_results(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{envelope, process_item};

    fn ids(items: &[&ProcessResultItem]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let existing = envelope(
            true,
            vec![
                process_item(1, "x", "2024-05-01T10:00:00Z"),
                process_item(2, "y", "2024-05-01T11:00:00Z"),
                process_item(3, "x", "2024-05-01T10:00:00Z"),
            ],
        );
        assert_eq!(ids(&reconcile(Some(&existing))), [1, 2]);
    }

    #[test]
    fn timestamps_compare_as_strings() {
        let existing = envelope(
            true,
            vec![
                process_item(1, "x", "2024-05-01T10:00:00Z"),
                process_item(2, "x", "2024-05-01T10:00:00.000Z"),
            ],
        );
        assert_eq!(ids(&reconcile(Some(&existing))), [1, 2]);
    }

    #[test]
    fn same_label_different_time_are_distinct() {
        let existing = envelope(
            true,
            vec![
                process_item(4, "x", "2024-05-02T09:00:00Z"),
                process_item(5, "x", "2024-05-01T09:00:00Z"),
            ],
        );
        assert_eq!(ids(&reconcile(Some(&existing))), [4, 5]);
    }

    #[test]
    fn unsuccessful_envelope_is_empty() {
        let existing = envelope(false, vec![process_item(1, "x", "2024-05-01T10:00:00Z")]);
        assert!(reconcile(Some(&existing)).is_empty());
        assert!(reconcile(None).is_empty());
    }

    #[test]
    fn later_sources_only_add_new_runs() {
        let existing = envelope(true, vec![process_item(1, "x", "t1")]);
        let fresh = envelope(true, vec![process_item(9, "x", "t1"), process_item(10, "z", "t2")]);
        let failed = envelope(false, vec![process_item(11, "w", "t3")]);
        let merged = merge_results([&existing, &failed, &fresh]);
        assert_eq!(ids(&merged), [1, 10]);
    }
}
