//! Command-line front end: solves the one hardcoded 9-card deck.
//!
//! Run with no arguments for the reference behavior: progress markers on
//! stderr, every solution printed to stdout as it is found, exit status 0
//! whether or not anything was found. Replace `deck()` with your own
//! puzzle's cards to solve a different deck.

use argh::FromArgs;
use scramble_squares::{Card, Edge, Face, Layout, Reporter, Solution, Solver};
use std::fmt;

/************************
 *     Deck             *
 ************************/

/// The images printed on this particular puzzle's cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Image {
    Corn,
    Orange,
    Burr,
    Chalice,
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Image::Corn => write!(f, "corn"),
            Image::Orange => write!(f, "orange"),
            Image::Burr => write!(f, "burr"),
            Image::Chalice => write!(f, "chalice"),
        }
    }
}

/// The nine physical cards. Each line is one card, edges in bottom, right,
/// top, left order.
fn deck() -> Vec<Card<Image>> {
    use Face::{Back, Front};
    use Image::{Burr, Chalice, Corn, Orange};

    let card = |edges: [(Image, Face); 4]| {
        Card::new(edges.map(|(pattern, face)| Edge::new(pattern, face)))
    };

    vec![
        card([(Burr, Front), (Corn, Back), (Chalice, Back), (Corn, Front)]),
        card([(Chalice, Front), (Orange, Back), (Burr, Back), (Orange, Front)]),
        card([(Chalice, Back), (Orange, Back), (Corn, Back), (Burr, Back)]),
        card([(Chalice, Back), (Burr, Back), (Corn, Back), (Orange, Back)]),
        card([(Burr, Back), (Orange, Front), (Chalice, Front), (Corn, Back)]),
        card([(Burr, Back), (Corn, Front), (Chalice, Front), (Orange, Back)]),
        card([(Chalice, Back), (Burr, Front), (Orange, Back), (Corn, Front)]),
        card([(Orange, Front), (Burr, Front), (Corn, Back), (Chalice, Back)]),
        card([(Burr, Back), (Corn, Front), (Chalice, Front), (Orange, Back)]),
    ]
}

/************************
 *     Reporter         *
 ************************/

/// Prints each solution the moment the search finds it.
struct ConsoleReporter {
    count: u64,
}

impl Reporter<Image> for ConsoleReporter {
    fn solution(&mut self, solution: &Solution<Image>) {
        self.count += 1;
        println!("solution {}:", self.count);
        println!("{}", solution);
    }
}

/************************
 *     Main             *
 ************************/

/// Brute-force solver for a 3x3 edge-matching card puzzle.
#[derive(Debug, Clone, FromArgs)]
struct Options {
    /// search arrangements in parallel across all cores
    #[argh(switch, short = 'p')]
    parallel: bool,

    /// arrangements between progress markers (0 disables)
    #[argh(option, default = "1000")]
    progress: u64,

    /// log how long the search took
    #[argh(switch, long = "log-elapsed")]
    log_elapsed: bool,

    /// don't log anything besides the solutions
    #[argh(switch, short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() {
    let options = argh::from_env::<Options>();

    let mut solver = Solver::new(Layout::square3(), deck());
    solver.config().parallel = options.parallel;
    solver.config().progress_interval = if options.quiet { 0 } else { options.progress };
    solver.config().log_elapsed = options.log_elapsed && !options.quiet;
    solver.config().log_stats = !options.quiet;

    let mut reporter = ConsoleReporter { count: 0 };
    let stats = solver.solve_with(&mut reporter);

    // No solutions is an answer too, not a failure.
    if stats.solutions == 0 {
        println!("no solutions");
    }
}
