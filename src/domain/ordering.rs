//! Order helpers shared by the board store and the drag session.

/// Reorders `items` so each element sits at the index of its key within
/// `ordered_ids`.
///
/// Elements whose key is missing from `ordered_ids` are ranked as index -1 and
/// therefore collapse toward the front; callers should pass a full permutation
/// of the item keys. Returns an empty vector when either input is empty.
///
/// # Examples
/// ```
/// use kanban_dnd_core::domain::ordering::reorder_by_key;
///
/// let items = vec![("a", 1), ("b", 2), ("c", 3)];
/// let order = vec!["c", "a", "b"];
///
/// let sorted = reorder_by_key(&items, &order, |item| &item.0);
/// assert_eq!(sorted, vec![("c", 3), ("a", 1), ("b", 2)]);
/// ```
pub fn reorder_by_key<T, K, F>(items: &[T], ordered_ids: &[K], key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> &K,
{
    if items.is_empty() || ordered_ids.is_empty() {
        return Vec::new();
    }

    let rank = |item: &T| -> isize {
        let wanted = key(item);
        ordered_ids
            .iter()
            .position(|id| id == wanted)
            .map_or(-1, |index| index as isize)
    };

    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| rank(item));
    sorted
}

/// Returns a copy of `items` with the element at `from` moved to `to`.
///
/// `to` is clamped to the end of the list; an out-of-range `from` returns the
/// items unchanged.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    let to = to.min(moved.len());
    moved.insert(to, item);
    moved
}

/// Uppercases the first character of a display string
pub fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
    }

    fn items(ids: &[&'static str]) -> Vec<Item> {
        ids.iter().map(|id| Item { id }).collect()
    }

    fn ids(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_reorder_by_full_permutation() {
        let input = items(&["a", "b", "c", "d"]);
        let order = vec!["d", "b", "a", "c"];

        let sorted = reorder_by_key(&input, &order, |item| &item.id);
        assert_eq!(ids(&sorted), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let input = items(&["x", "y", "z"]);
        let order = vec!["z", "x", "y"];

        let once = reorder_by_key(&input, &order, |item| &item.id);
        let twice = reorder_by_key(&input, &order, |item| &item.id);
        assert_eq!(once, twice);

        let again = reorder_by_key(&once, &order, |item| &item.id);
        assert_eq!(once, again);
    }

    #[test]
    fn test_missing_keys_collapse_to_front() {
        let input = items(&["a", "b", "stray"]);
        let order = vec!["b", "a"];

        let sorted = reorder_by_key(&input, &order, |item| &item.id);
        assert_eq!(ids(&sorted), vec!["stray", "b", "a"]);
    }

    #[test]
    fn test_empty_inputs_return_empty() {
        let input = items(&["a"]);
        let empty_order: Vec<&str> = Vec::new();
        assert!(reorder_by_key(&input, &empty_order, |item| &item.id).is_empty());

        let no_items: Vec<Item> = Vec::new();
        assert!(reorder_by_key(&no_items, &["a"], |item| &item.id).is_empty());
    }

    #[test]
    fn test_array_move_forward_and_back() {
        let list = vec![1, 2, 3, 4];
        assert_eq!(array_move(&list, 0, 2), vec![2, 3, 1, 4]);
        assert_eq!(array_move(&list, 3, 0), vec![4, 1, 2, 3]);
        assert_eq!(array_move(&list, 1, 1), list);
    }

    #[test]
    fn test_array_move_clamps_destination() {
        let list = vec!["a", "b", "c"];
        assert_eq!(array_move(&list, 0, 10), vec!["b", "c", "a"]);
        assert_eq!(array_move(&list, 5, 0), list);
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("todo"), "Todo");
        assert_eq!(capitalize_first_letter("Done"), "Done");
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(capitalize_first_letter("ébauche"), "Ébauche");
    }
}
