//! Newest-first bounded collections.

/// Inserts `item` at index 0 and truncates the tail to `cap` entries.
pub fn prepend_bounded<T>(items: &mut Vec<T>, item: T, cap: usize) {
    items.insert(0, item);
    items.truncate(cap);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_capped() {
        let mut items = Vec::new();
        for i in 0..10 {
            prepend_bounded(&mut items, i, 3);
        }
        assert_eq!(items, vec![9, 8, 7]);
    }
}
