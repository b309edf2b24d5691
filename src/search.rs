use crate::card::{Card, Pattern};

/// All orderings of `0..n`, one at a time. Heap's algorithm: each step is a
/// single swap, and nothing close to n! is ever materialized. Restart by
/// calling `permutations` again.
pub fn permutations(n: usize) -> Permutations {
    Permutations {
        items: (0..n).collect(),
        counters: vec![0; n],
        depth: 1,
        started: false,
    }
}

#[derive(Debug, Clone)]
pub struct Permutations {
    items: Vec<usize>,
    counters: Vec<usize>,
    depth: usize,
    started: bool,
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }
        while self.depth < self.items.len() {
            if self.counters[self.depth] < self.depth {
                if self.depth % 2 == 0 {
                    self.items.swap(0, self.depth);
                } else {
                    self.items.swap(self.counters[self.depth], self.depth);
                }
                self.counters[self.depth] += 1;
                self.depth = 1;
                return Some(self.items.clone());
            } else {
                self.counters[self.depth] = 0;
                self.depth += 1;
            }
        }
        None
    }
}

/// Try every combination of quarter turns for the cards that `perm` places
/// in each cell, invoking `leaf` exactly once per fully-specified
/// combination. `cells` is the single scratch buffer for the whole search:
/// position `pos` is overwritten on every branch before anything deeper can
/// observe it, so no rotation state leaks between branches.
pub(crate) fn spin_cards<P: Pattern>(
    deck: &[Card<P>],
    perm: &[usize],
    cells: &mut [Card<P>],
    turns: &mut [u8],
    pos: usize,
    leaf: &mut impl FnMut(&[Card<P>], &[u8]),
) {
    if pos == perm.len() {
        leaf(cells, turns);
        return;
    }
    let base = deck[perm[pos]];
    for t in 0..4u8 {
        cells[pos] = base.rotated_by(t as usize);
        turns[pos] = t;
        spin_cards(deck, perm, cells, turns, pos + 1, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Edge, Face};
    use std::collections::HashSet;

    #[test]
    fn test_permutation_counts() {
        // 0! = 1: the empty ordering.
        assert_eq!(permutations(0).count(), 1);
        assert_eq!(permutations(1).count(), 1);
        assert_eq!(permutations(2).count(), 2);
        assert_eq!(permutations(3).count(), 6);
        assert_eq!(permutations(4).count(), 24);
        assert_eq!(permutations(5).count(), 120);
    }

    #[test]
    fn test_permutations_distinct_and_complete() {
        for n in 0..6 {
            let seen: HashSet<Vec<usize>> = permutations(n).collect();
            assert_eq!(seen.len(), (1..=n).product::<usize>().max(1));
            for perm in &seen {
                let mut sorted = perm.clone();
                sorted.sort();
                assert_eq!(sorted, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_permutations_restartable() {
        let first: Vec<_> = permutations(4).collect();
        let second: Vec<_> = permutations(4).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_spin_visits_every_combination_once() {
        let card = Card::new([
            Edge::new(0u32, Face::Front),
            Edge::new(1, Face::Front),
            Edge::new(2, Face::Front),
            Edge::new(3, Face::Front),
        ]);
        let deck = vec![card; 3];
        let perm = vec![0, 1, 2];
        let mut cells = deck.clone();
        let mut turns = vec![0u8; 3];

        let mut seen = HashSet::new();
        spin_cards(&deck, &perm, &mut cells, &mut turns, 0, &mut |_, turns| {
            assert!(seen.insert(turns.to_vec()), "combination visited twice");
        });
        assert_eq!(seen.len(), 4usize.pow(3));
    }

    #[test]
    fn test_spin_applies_rotations_to_cells() {
        let card = Card::new([
            Edge::new('b', Face::Front),
            Edge::new('r', Face::Front),
            Edge::new('t', Face::Front),
            Edge::new('l', Face::Front),
        ]);
        let deck = vec![card, card.rotated()];
        let perm = vec![1, 0];
        let mut cells = deck.clone();
        let mut turns = vec![0u8; 2];

        spin_cards(&deck, &perm, &mut cells, &mut turns, 0, &mut |cells, turns| {
            assert_eq!(cells[0], deck[1].rotated_by(turns[0] as usize));
            assert_eq!(cells[1], deck[0].rotated_by(turns[1] as usize));
        });
    }
}
