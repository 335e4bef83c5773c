// src/model/join.rs

//! Explicit key joins between typed record collections.
//!
//! Instead of producing null-filled rows, a join reports which left rows
//! found a partner and which keys on either side stayed unmatched.

use std::collections::BTreeMap;

#[derive(Debug)]
pub struct JoinOutcome<'a, L, R> {
    /// Left rows paired with the right row sharing their key, in left order.
    pub matched: Vec<(&'a L, &'a R)>,
    /// Left rows whose key has no right row.
    pub left_only: Vec<&'a L>,
    /// Right rows no left row referenced, in right order.
    pub right_only: Vec<&'a R>,
}

/// Many-to-one join: each left row looks up at most one right row by key.
///
/// Right keys are expected to be unique; if a key repeats, the first right
/// row wins and later duplicates are reported as `right_only`.
pub fn join_on<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> JoinOutcome<'a, L, R>
where
    K: Ord,
    FL: Fn(&L) -> K,
    FR: Fn(&R) -> K,
{
    let mut index: BTreeMap<K, usize> = BTreeMap::new();
    for (i, row) in right.iter().enumerate() {
        index.entry(right_key(row)).or_insert(i);
    }

    let mut used = vec![false; right.len()];
    let mut matched = Vec::new();
    let mut left_only = Vec::new();

    for row in left {
        match index.get(&left_key(row)) {
            Some(&i) => {
                used[i] = true;
                matched.push((row, &right[i]));
            }
            None => left_only.push(row),
        }
    }

    let right_only = right
        .iter()
        .zip(used)
        .filter(|(_, was_used)| !was_used)
        .map(|(row, _)| row)
        .collect();

    JoinOutcome {
        matched,
        left_only,
        right_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_matched_and_unmatched_keys() {
        let products = vec![("P1", "S1"), ("P2", "S9"), ("P3", "S1")];
        let suppliers = vec![("S1", 10.0), ("S2", 12.0)];

        let outcome = join_on(&products, &suppliers, |p| p.1, |s| s.0);

        assert_eq!(outcome.matched.len(), 2);
        assert_eq!(outcome.matched[0].0 .0, "P1");
        assert_eq!(outcome.matched[1].0 .0, "P3");
        assert_eq!(outcome.left_only, vec![&("P2", "S9")]);
        assert_eq!(outcome.right_only, vec![&("S2", 12.0)]);
    }

    #[test]
    fn duplicate_right_keys_keep_first() {
        let left = vec!["K"];
        let right = vec![("K", 1), ("K", 2)];

        let outcome = join_on(&left, &right, |l| *l, |r| r.0);

        assert_eq!(outcome.matched[0].1 .1, 1);
        assert_eq!(outcome.right_only, vec![&("K", 2)]);
    }
}
