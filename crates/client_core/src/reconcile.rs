//! Pure snapshot rewrites used to reconcile a submission into the list.
//! Matching is by title equality; titles are unique within a session.

use shared::domain::Item;

use crate::list::ListEntry;

/// Prepends a provisional `saving = true` entry. A prior entry with the
/// same title is removed first: last write wins by title, not timestamp.
pub fn insert_pending(mut snapshot: Vec<ListEntry>, item: Item) -> Vec<ListEntry> {
    snapshot.retain(|entry| entry.item.title != item.title);
    snapshot.insert(0, ListEntry::pending(item));
    snapshot
}

/// Replaces the title-matched entry with the server-confirmed item,
/// keeping its position. If no entry matches (the provisional entry was
/// lost to a reload), the confirmed item is prepended instead; either way
/// exactly one entry with the title remains.
pub fn confirm_pending(mut snapshot: Vec<ListEntry>, confirmed: Item) -> Vec<ListEntry> {
    match snapshot
        .iter()
        .position(|entry| entry.item.title == confirmed.title)
    {
        Some(idx) => snapshot[idx] = ListEntry::confirmed(confirmed),
        None => snapshot.insert(0, ListEntry::confirmed(confirmed)),
    }
    snapshot
}

/// Drops the provisional entry with the given title. Confirmed entries
/// are left alone even on a title match.
pub fn remove_pending(mut snapshot: Vec<ListEntry>, title: &str) -> Vec<ListEntry> {
    snapshot.retain(|entry| !(entry.saving && entry.item.title == title));
    snapshot
}

/// Prepends a confirmed item without touching the rest of the snapshot.
pub fn prepend_confirmed(mut snapshot: Vec<ListEntry>, item: Item) -> Vec<ListEntry> {
    snapshot.insert(0, ListEntry::confirmed(item));
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> Item {
        Item::new(
            title,
            vec!["a paragraph".to_string()],
            "https://example.com/a.jpg",
            "alt text",
        )
    }

    fn confirmed(title: &str) -> ListEntry {
        ListEntry::confirmed(item(title))
    }

    fn titles(snapshot: &[ListEntry]) -> Vec<&str> {
        snapshot
            .iter()
            .map(|entry| entry.item.title.as_str())
            .collect()
    }

    #[test]
    fn insert_pending_prepends_with_saving_flag() {
        let snapshot = insert_pending(vec![confirmed("A"), confirmed("B")], item("X"));
        assert_eq!(titles(&snapshot), ["X", "A", "B"]);
        assert!(snapshot[0].saving);
        assert!(!snapshot[1].saving);
    }

    #[test]
    fn insert_pending_replaces_duplicate_title() {
        let snapshot = insert_pending(vec![confirmed("A"), confirmed("X")], item("X"));
        assert_eq!(titles(&snapshot), ["X", "A"]);
        assert!(snapshot[0].saving);
    }

    #[test]
    fn confirm_pending_clears_saving_in_place() {
        let snapshot = insert_pending(vec![confirmed("A")], item("X"));
        let snapshot = confirm_pending(snapshot, item("X"));
        assert_eq!(titles(&snapshot), ["X", "A"]);
        assert!(!snapshot[0].saving);
    }

    #[test]
    fn confirm_pending_prepends_when_provisional_entry_is_gone() {
        let snapshot = confirm_pending(vec![confirmed("A")], item("X"));
        assert_eq!(titles(&snapshot), ["X", "A"]);
        assert!(!snapshot[0].saving);
    }

    #[test]
    fn remove_pending_leaves_confirmed_entries_alone() {
        let snapshot = insert_pending(vec![confirmed("A")], item("X"));
        let snapshot = remove_pending(snapshot, "X");
        assert_eq!(titles(&snapshot), ["A"]);

        let untouched = remove_pending(vec![confirmed("A")], "A");
        assert_eq!(titles(&untouched), ["A"]);
    }

    #[test]
    fn prepend_confirmed_keeps_order() {
        let snapshot = prepend_confirmed(vec![confirmed("A"), confirmed("B")], item("X"));
        assert_eq!(titles(&snapshot), ["X", "A", "B"]);
    }
}
