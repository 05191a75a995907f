// List helpers shared across the applications.
use std::collections::BTreeMap;

/// Moves the element at `origin` so that it lands just before the element
/// originally at `target` (`target == list.len()` moves it to the end).
///
/// `target == origin` and `target == origin + 1` leave the list untouched,
/// as do out of range indices. Every other element keeps its relative order.
pub fn move_item<T>(origin: usize, target: usize, mut list: Vec<T>) -> Vec<T> {
    if target == origin || target == origin + 1 {
        return list;
    }
    if origin >= list.len() || target > list.len() {
        return list;
    }
    let item = list.remove(origin);
    // removing `origin` shifted every later index down by one
    let insert_at = if origin < target { target - 1 } else { target };
    list.insert(insert_at, item);
    list
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem<T> {
    pub value: T,
    pub title: String,
}

/// Turns a label table into select entries. When `sort` is set, the
/// default ("none") value comes first and the rest follow by title.
pub fn select_items<T>(labels: &BTreeMap<T, String>, sort: bool) -> Vec<SelectItem<T>>
where
    T: Ord + Clone + Default,
{
    let mut out: Vec<SelectItem<T>> = labels
        .iter()
        .map(|(value, title)| SelectItem { value: value.clone(), title: title.clone() })
        .collect();
    if sort {
        let zero = T::default();
        out.sort_by(|a, b| {
            (b.value == zero)
                .cmp(&(a.value == zero))
                .then_with(|| a.title.cmp(&b.title))
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<char> {
        vec!['a', 'b', 'c', 'd', 'e']
    }

    #[test]
    fn test_move_item_noop() {
        for i in 0..5 {
            assert_eq!(move_item(i, i, letters()), letters());
            assert_eq!(move_item(i, i + 1, letters()), letters());
        }
    }

    #[test]
    fn test_move_item_forward() {
        assert_eq!(move_item(0, 3, letters()), vec!['b', 'c', 'a', 'd', 'e']);
        assert_eq!(move_item(1, 5, letters()), vec!['a', 'c', 'd', 'e', 'b']);
    }

    #[test]
    fn test_move_item_backward() {
        assert_eq!(move_item(4, 0, letters()), vec!['e', 'a', 'b', 'c', 'd']);
        assert_eq!(move_item(3, 1, letters()), vec!['a', 'd', 'b', 'c', 'e']);
    }

    #[test]
    fn test_move_item_out_of_range() {
        assert_eq!(move_item(7, 0, letters()), letters());
        assert_eq!(move_item(0, 9, letters()), letters());
    }

    #[test]
    fn test_move_item_preserves_elements() {
        let len = letters().len();
        for origin in 0..len {
            for target in 0..=len {
                let mut moved = move_item(origin, target, letters());
                assert_eq!(moved.len(), len);
                moved.sort();
                assert_eq!(moved, letters());
            }
        }
    }

    #[test]
    fn test_select_items_sorted() {
        let labels = BTreeMap::from([
            (0u8, "Aucun".to_string()),
            (1, "Zèbre".to_string()),
            (2, "Abeille".to_string()),
        ]);
        let items = select_items(&labels, true);
        let values: Vec<u8> = items.iter().map(|i| i.value).collect();
        assert_eq!(values, vec![0, 2, 1]);

        let unsorted = select_items(&labels, false);
        assert_eq!(unsorted.len(), 3);
        assert_eq!(unsorted[0].title, "Aucun");
    }
}
