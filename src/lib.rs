//! Brute-force solver for edge-matching card puzzles.
//!
//! The puzzle: nine square cards, each edge bearing half of a picture. Lay
//! them out 3x3 so that every shared edge between neighboring cards
//! completes its picture — the front half of an image against the back half
//! of the same image. Cards may be rotated freely.
//!
//! The solver does the obvious, honest thing: it tries every placement of
//! the cards into the grid (9! arrangements) and, for each placement, every
//! combination of quarter turns (4^9), checking the twelve interior seams
//! each time. Nothing is skipped and nothing is deduplicated: rotations and
//! reflections of a solution are found again in their own right. The only
//! pruning is inside the seam check itself, which gives up on the first
//! seam that fails. With the full 3x3 board that is still on the order of
//! 10^11 leaves, so there is a `parallel` config switch to spread the
//! arrangement stream over all cores.
//!
//! ## Solving a small board
//!
//! Boards other than 3x3 exist mostly so that tests and docs don't have to
//! chew through 95 billion leaves. Here is a 2x2 board, using `char` as the
//! pattern type:
//!
//! ```
//! use scramble_squares::{Card, Edge, Face, Layout, Solver};
//!
//! fn card(edges: [(char, Face); 4]) -> Card<char> {
//!     Card::new(edges.map(|(pattern, face)| Edge::new(pattern, face)))
//! }
//!
//! // Edges are given bottom, right, top, left. Cells are numbered
//! // row-major:
//! //   0 1
//! //   2 3
//! // Interior seams: 'a' between 0|1, 'b' between 0|2, 'c' between 1|3,
//! // 'd' between 2|3. 'x' only ever appears front-side, so outer edges
//! // can't accidentally pair up.
//! use Face::{Back, Front};
//! let deck = vec![
//!     card([('b', Front), ('a', Front), ('x', Front), ('x', Front)]),
//!     card([('c', Front), ('x', Front), ('x', Front), ('a', Back)]),
//!     card([('x', Front), ('d', Front), ('b', Back), ('x', Front)]),
//!     card([('x', Front), ('x', Front), ('c', Back), ('d', Back)]),
//! ];
//!
//! let mut solver = Solver::new(Layout::rect(2, 2), deck);
//! solver.config().progress_interval = 0;
//!
//! let solutions = solver.solve();
//! assert!(!solutions.0.is_empty());
//! println!("{}", solutions);
//! ```
//!
//! For streaming solutions as they are found (the 3x3 run takes a while),
//! implement [`Reporter`] and use [`Solver::solve_with`] — that's what the
//! command-line binary does.

mod card;
mod layout;
mod report;
mod search;

pub use card::{Card, Edge, Face, Pattern, Side};
pub use layout::{Layout, Seam};
pub use report::{Reporter, Solution, SolutionSet};
pub use search::{permutations, Permutations};

use rayon::iter::{ParallelBridge, ParallelIterator};
use search::spin_cards;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/************************
 *     Config           *
 ************************/

// When running the binary, this is loaded from command line args.
// See `Options` in `main.rs`.
/// Configuration options. Set these using `Solver::config()`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log a progress marker every this many arrangements (0 disables)
    pub progress_interval: u64,
    /// Log how long the whole search took
    pub log_elapsed: bool,
    /// Log the run's counters when the search finishes
    pub log_stats: bool,
    /// Split the arrangement stream across a rayon thread pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            progress_interval: 1000,
            log_elapsed: false,
            log_stats: false,
            parallel: false,
        }
    }
}

/************************
 *     Stats            *
 ************************/

/// Counters for one run. `leaves` counts every fully-specified
/// (arrangement, rotation combination) pair examined; an unpruned run over
/// a deck of n cards always has `permutations` = n! and `leaves` = n!·4^n.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub permutations: u64,
    pub leaves: u64,
    pub solutions: u64,
}

/************************
 *     Solver           *
 ************************/

/// The search engine: owns the board shape and the deck, enumerates every
/// arrangement and rotation combination, and streams valid boards to a
/// [`Reporter`].
pub struct Solver<P: Pattern> {
    layout: Layout,
    deck: Vec<Card<P>>,
    config: Config,
}

impl<P: Pattern> Solver<P> {
    /// The deck must have exactly one card per board cell; anything else is
    /// a configuration error, caught here.
    pub fn new(layout: Layout, deck: Vec<Card<P>>) -> Solver<P> {
        if deck.len() != layout.cells() {
            panic!(
                "Board has {} cells but the deck has {} cards",
                layout.cells(),
                deck.len()
            );
        }
        Solver {
            layout,
            deck,
            config: Config::default(),
        }
    }

    pub fn config(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn deck(&self) -> &[Card<P>] {
        &self.deck
    }

    /// Run the whole search, collecting every solution. Convenient for
    /// small boards; for the 3x3 deck prefer [`Solver::solve_with`] so
    /// solutions appear as they are found.
    pub fn solve(&self) -> SolutionSet<P> {
        let mut solutions = SolutionSet(Vec::new());
        self.solve_with(&mut solutions);
        solutions
    }

    /// Run the whole search, handing each valid board to `reporter` at the
    /// moment it is found. Every arrangement and every rotation combination
    /// is examined exactly once; the returned [`Stats`] say how many.
    pub fn solve_with<R: Reporter<P> + Send + ?Sized>(&self, reporter: &mut R) -> Stats {
        if self.config.parallel {
            self.solve_parallel(reporter)
        } else {
            self.solve_sequential(reporter)
        }
    }

    fn solve_sequential<R: Reporter<P> + ?Sized>(&self, reporter: &mut R) -> Stats {
        let start = Instant::now();
        let n = self.layout.cells();
        let interval = self.config.progress_interval;

        let mut stats = Stats::default();
        let mut cells = self.deck.clone();
        let mut turns = vec![0u8; n];

        for perm in permutations(n) {
            if interval > 0 && stats.permutations % interval == 0 {
                eprintln!("{} arrangements searched", stats.permutations);
            }
            let mut leaves = 0;
            let mut solutions = 0;
            spin_cards(&self.deck, &perm, &mut cells, &mut turns, 0, &mut |cells, turns| {
                leaves += 1;
                if self.layout.is_valid(cells) {
                    solutions += 1;
                    reporter.solution(&self.make_solution(cells, &perm, turns));
                }
            });
            stats.leaves += leaves;
            stats.solutions += solutions;
            stats.permutations += 1;
        }

        self.log_finished(start, &stats);
        stats
    }

    /// Same search, with the arrangement stream partitioned across a rayon
    /// pool. Each worker spins rotations in its own board buffer; the
    /// reporter is the one shared resource, so calls to it are serialized.
    fn solve_parallel<R: Reporter<P> + Send + ?Sized>(&self, reporter: &mut R) -> Stats {
        let start = Instant::now();
        let n = self.layout.cells();
        let interval = self.config.progress_interval;

        let reporter = Mutex::new(reporter);
        let permutations_done = AtomicU64::new(0);
        let leaves = AtomicU64::new(0);
        let solutions = AtomicU64::new(0);

        permutations(n).par_bridge().for_each(|perm| {
            let mut cells = self.deck.clone();
            let mut turns = vec![0u8; n];
            let mut local_leaves = 0;

            spin_cards(&self.deck, &perm, &mut cells, &mut turns, 0, &mut |cells, turns| {
                local_leaves += 1;
                if self.layout.is_valid(cells) {
                    solutions.fetch_add(1, Ordering::Relaxed);
                    let solution = self.make_solution(cells, &perm, turns);
                    reporter.lock().unwrap().solution(&solution);
                }
            });

            leaves.fetch_add(local_leaves, Ordering::Relaxed);
            let done = permutations_done.fetch_add(1, Ordering::Relaxed) + 1;
            if interval > 0 && done % interval == 0 {
                eprintln!("{} arrangements searched", done);
            }
        });

        let stats = Stats {
            permutations: permutations_done.load(Ordering::Relaxed),
            leaves: leaves.load(Ordering::Relaxed),
            solutions: solutions.load(Ordering::Relaxed),
        };
        self.log_finished(start, &stats);
        stats
    }

    fn make_solution(&self, cells: &[Card<P>], perm: &[usize], turns: &[u8]) -> Solution<P> {
        Solution {
            width: self.layout.width(),
            cells: cells.to_vec(),
            placement: perm.iter().copied().zip(turns.iter().copied()).collect(),
        }
    }

    fn log_finished(&self, start: Instant, stats: &Stats) {
        if self.config.log_stats {
            eprintln!(
                "{} arrangements, {} rotation combinations, {} solutions",
                stats.permutations, stats.leaves, stats.solutions
            );
        }
        if self.config.log_elapsed {
            eprintln!("elapsed: {}ms", start.elapsed().as_millis());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::solved_deck;

    fn quiet_solver(layout: Layout, deck: Vec<Card<u32>>) -> Solver<u32> {
        let mut solver = Solver::new(layout, deck);
        solver.config().progress_interval = 0;
        solver
    }

    #[test]
    fn test_exhaustive_leaf_count() {
        let layout = Layout::rect(2, 2);
        let solver = quiet_solver(layout.clone(), solved_deck(&layout));

        let mut found = SolutionSet(Vec::new());
        let stats = solver.solve_with(&mut found);

        assert_eq!(stats.permutations, 24);
        assert_eq!(stats.leaves, 24 * 4u64.pow(4));
        assert_eq!(stats.solutions, found.0.len() as u64);
    }

    #[test]
    fn test_solvable_board_is_found_and_revalidates() {
        let layout = Layout::rect(2, 2);
        let deck = solved_deck(&layout);
        let solver = quiet_solver(layout.clone(), deck.clone());

        let found = solver.solve();
        assert!(!found.0.is_empty());

        for solution in &found.0 {
            // Every reported board really satisfies the seam table.
            assert!(layout.is_valid(&solution.cells));
            // And the recorded placement reconstructs exactly that board.
            for (cell, (card, turns)) in solution.placement.iter().enumerate() {
                assert_eq!(solution.cells[cell], deck[*card].rotated_by(*turns as usize));
            }
        }
    }

    #[test]
    fn test_incompatible_deck_has_no_solutions() {
        let deck: Vec<Card<u32>> = (0..4usize)
            .map(|cell| {
                Card::new(std::array::from_fn(|i| {
                    Edge::new((cell * 4 + i) as u32, Face::Front)
                }))
            })
            .collect();
        let solver = quiet_solver(Layout::rect(2, 2), deck);

        let stats = solver.solve_with(&mut SolutionSet(Vec::new()));
        assert_eq!(stats.solutions, 0);
        // An unsolvable deck still gets the full enumeration.
        assert_eq!(stats.leaves, 24 * 4u64.pow(4));
    }

    #[test]
    fn test_rotated_deck_still_solved() {
        // Pre-rotate each card of a solvable deck. Solutions now require
        // non-identity rotations, which the seam short-circuit must not
        // skip over.
        let layout = Layout::rect(2, 2);
        let deck: Vec<Card<u32>> = solved_deck(&layout)
            .into_iter()
            .enumerate()
            .map(|(i, card)| card.rotated_by(i % 4))
            .collect();
        let solver = quiet_solver(layout, deck);

        let found = solver.solve();
        assert!(!found.0.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let layout = Layout::rect(2, 2);
        let deck = solved_deck(&layout);

        let sequential = quiet_solver(layout.clone(), deck.clone());
        let mut sequential_found = SolutionSet(Vec::new());
        let sequential_stats = sequential.solve_with(&mut sequential_found);

        let mut parallel = quiet_solver(layout, deck);
        parallel.config().parallel = true;
        let mut parallel_found = SolutionSet(Vec::new());
        let parallel_stats = parallel.solve_with(&mut parallel_found);

        assert_eq!(parallel_stats, sequential_stats);
        assert_eq!(parallel_found.0.len(), sequential_found.0.len());
    }

    #[test]
    #[should_panic]
    fn test_wrong_deck_size_rejected() {
        let layout = Layout::rect(2, 2);
        let mut deck = solved_deck(&layout);
        deck.pop();
        Solver::new(layout, deck);
    }
}
