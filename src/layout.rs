use crate::card::{Card, Pattern, Side};

/// One interior boundary between two adjacent cells: the edge at `a` must
/// match the edge at `b`. Each endpoint is a (cell index, card side) pair,
/// with cells numbered row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seam {
    pub a: (usize, Side),
    pub b: (usize, Side),
}

/// The shape of a board: its dimensions plus the full table of interior
/// seams that a filled board must satisfy. The outer boundary of the board
/// is never constrained.
#[derive(Debug, Clone)]
pub struct Layout {
    width: usize,
    height: usize,
    seams: Vec<Seam>,
}

impl Layout {
    /// The 3x3 board, with its 12 seams spelled out in a tuned order: the
    /// four seams around the center cell first (one shared card across all
    /// four checks, so failures prune fastest), then the top, left, right,
    /// and bottom pairs.
    ///
    /// Cell numbering:
    ///
    /// ```text
    /// 0 1 2
    /// 3 4 5
    /// 6 7 8
    /// ```
    pub fn square3() -> Layout {
        use Side::{Bottom, Left, Right, Top};

        let seams = vec![
            // center
            Seam { a: (4, Top), b: (1, Bottom) },
            Seam { a: (4, Right), b: (5, Left) },
            Seam { a: (4, Bottom), b: (7, Top) },
            Seam { a: (4, Left), b: (3, Right) },
            // top row
            Seam { a: (1, Left), b: (0, Right) },
            Seam { a: (1, Right), b: (2, Left) },
            // left column
            Seam { a: (3, Top), b: (0, Bottom) },
            Seam { a: (3, Bottom), b: (6, Top) },
            // right column
            Seam { a: (5, Top), b: (2, Bottom) },
            Seam { a: (5, Bottom), b: (8, Top) },
            // bottom row
            Seam { a: (7, Left), b: (6, Right) },
            Seam { a: (7, Right), b: (8, Left) },
        ];
        Layout {
            width: 3,
            height: 3,
            seams,
        }
    }

    /// An arbitrary rectangular board with its seams generated row-major.
    /// Seam order only affects how early a bad board is rejected, never
    /// whether it is rejected, so the generated order is fine for the small
    /// boards this is used for.
    pub fn rect(width: usize, height: usize) -> Layout {
        if width * height == 0 {
            panic!("Empty board: {}x{}", width, height);
        }
        let mut seams = Vec::new();
        for row in 0..height {
            for col in 0..width {
                let cell = row * width + col;
                if col + 1 < width {
                    seams.push(Seam {
                        a: (cell, Side::Right),
                        b: (cell + 1, Side::Left),
                    });
                }
                if row + 1 < height {
                    seams.push(Seam {
                        a: (cell, Side::Bottom),
                        b: (cell + width, Side::Top),
                    });
                }
            }
        }
        Layout {
            width,
            height,
            seams,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, which is also the number of cards a deck must have.
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    /// `true` iff every seam of the board is completed by the cards
    /// currently in `cells` (in their current rotations). Stops at the
    /// first seam that fails.
    pub fn is_valid<P: Pattern>(&self, cells: &[Card<P>]) -> bool {
        assert_eq!(
            cells.len(),
            self.cells(),
            "Board has {} cells but {} cards were placed",
            self.cells(),
            cells.len()
        );
        self.seams
            .iter()
            .all(|seam| cells[seam.a.0].edge(seam.a.1).matches(cells[seam.b.0].edge(seam.b.1)))
    }
}

/// A deck that solves `layout` with every card in place and unrotated: seam
/// `k` gets pattern `k` (front on one side, back on the other) and every
/// unconstrained edge gets its own private pattern.
#[cfg(test)]
pub(crate) fn solved_deck(layout: &Layout) -> Vec<Card<u32>> {
    use crate::card::{Edge, Face};

    let mut edges: Vec<[Edge<u32>; 4]> = (0..layout.cells())
        .map(|cell| std::array::from_fn(|i| Edge::new(1000 + (cell * 4 + i) as u32, Face::Front)))
        .collect();
    for (k, seam) in layout.seams().iter().enumerate() {
        edges[seam.a.0][seam.a.1.index()] = Edge::new(k as u32, Face::Front);
        edges[seam.b.0][seam.b.1.index()] = Edge::new(k as u32, Face::Back);
    }
    edges.into_iter().map(Card::new).collect()
}

#[test]
fn test_square3_seams() {
    let square3 = Layout::square3();
    assert_eq!(square3.cells(), 9);
    assert_eq!(square3.seams().len(), 12);

    // Modulo endpoint order, the hand-tuned table must be exactly the seams
    // a generated 3x3 board has.
    fn seam_set(layout: &Layout) -> std::collections::HashSet<[(usize, usize); 2]> {
        layout
            .seams()
            .iter()
            .map(|seam| {
                let mut pair = [(seam.a.0, seam.a.1.index()), (seam.b.0, seam.b.1.index())];
                pair.sort();
                pair
            })
            .collect()
    }

    let generated = seam_set(&Layout::rect(3, 3));
    assert_eq!(generated.len(), 12);
    assert_eq!(seam_set(&square3), generated);
}

#[test]
fn test_rect_seam_counts() {
    assert_eq!(Layout::rect(1, 1).seams().len(), 0);
    assert_eq!(Layout::rect(2, 1).seams().len(), 1);
    assert_eq!(Layout::rect(2, 2).seams().len(), 4);
    assert_eq!(Layout::rect(3, 3).seams().len(), 12);
}

#[test]
#[should_panic]
fn test_empty_board_rejected() {
    Layout::rect(3, 0);
}

#[test]
fn test_validator_accepts_solved_board() {
    let layout = Layout::square3();
    let deck = solved_deck(&layout);
    assert!(layout.is_valid(&deck));
}

#[test]
fn test_validator_rejects_each_single_violation() {
    use crate::card::{Edge, Face};

    let layout = Layout::square3();
    for broken in 0..layout.seams().len() {
        let mut cells = solved_deck(&layout);
        let seam = layout.seams()[broken];

        // Flip the far side of one seam to the same face: that seam (and
        // only that seam) no longer matches.
        let (cell, side) = seam.b;
        let mut edges: [Edge<u32>; 4] =
            std::array::from_fn(|i| cells[cell].edge(Side::ALL[i]));
        edges[side.index()] = Edge::new(edges[side.index()].pattern, Face::Front);
        cells[cell] = Card::new(edges);

        assert!(!layout.is_valid(&cells), "seam {} still validated", broken);
    }
}
