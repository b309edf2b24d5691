use std::fmt;

/// Anything usable as a pattern identifier: the image whose two halves are
/// printed on matching card edges. A deck will typically use a small enum,
/// but any cheap comparable type works (tests use `char`).
pub trait Pattern: fmt::Debug + Copy + Eq + Send + Sync + 'static {}

impl<T: fmt::Debug + Copy + Eq + Send + Sync + 'static> Pattern for T {}

/// Which half of a pattern's image an edge carries. Two edges only line up
/// when one shows the front half and the other the back half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Face::Front => write!(f, "front"),
            Face::Back => write!(f, "back"),
        }
    }
}

/// One side of a card: half of one pattern's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<P: Pattern> {
    pub pattern: P,
    pub face: Face,
}

impl<P: Pattern> Edge<P> {
    pub fn new(pattern: P, face: Face) -> Edge<P> {
        Edge { pattern, face }
    }

    /// `true` when the two edges complete one image: same pattern, opposite
    /// halves. Symmetric, and never true for an edge against itself.
    pub fn matches(self, other: Edge<P>) -> bool {
        self.pattern == other.pattern && self.face != other.face
    }
}

/// A position on a card's boundary. The numbering (bottom = 0, right = 1,
/// top = 2, left = 3) is what makes rotation a plain index shift; it must
/// stay consistent across the deck, the seam tables, and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    pub fn index(self) -> usize {
        match self {
            Side::Bottom => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Left => 3,
        }
    }
}

/// One physical card: exactly four edges in bottom/right/top/left order.
/// A card's identity is its edge sequence; which rotation is "currently
/// applied" is search state, represented by constructing a rotated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card<P: Pattern>([Edge<P>; 4]);

impl<P: Pattern> Card<P> {
    /// The four-element array makes a wrong edge count unrepresentable.
    pub fn new(edges: [Edge<P>; 4]) -> Card<P> {
        Card(edges)
    }

    pub fn edge(self, side: Side) -> Edge<P> {
        self.0[side.index()]
    }

    /// One quarter turn: the edge at index `i` becomes what was at index
    /// `i + 1`. Applying this four times is the identity.
    pub fn rotated(self) -> Card<P> {
        self.rotated_by(1)
    }

    /// `turns` quarter turns at once. Equivalent to `rotated` iterated, but
    /// the search calls this with each of 0..4 against the same base card.
    pub fn rotated_by(self, turns: usize) -> Card<P> {
        Card(std::array::from_fn(|i| self.0[(i + turns) % 4]))
    }
}

#[test]
fn test_edge_matches() {
    let front = Edge::new('a', Face::Front);
    let back = Edge::new('a', Face::Back);
    let other = Edge::new('b', Face::Back);

    assert!(front.matches(back));
    assert!(back.matches(front));

    // Same pattern, same half: the physical picture doesn't line up.
    assert!(!front.matches(front));
    assert!(!back.matches(back));

    // Different patterns never match, whatever the faces.
    assert!(!front.matches(other));
    assert!(!Edge::new('b', Face::Front).matches(front));
}

#[test]
fn test_rotation_shifts_edges() {
    let card = Card::new([
        Edge::new('b', Face::Front),
        Edge::new('r', Face::Back),
        Edge::new('t', Face::Front),
        Edge::new('l', Face::Back),
    ]);

    let once = card.rotated();
    assert_eq!(once.edge(Side::Bottom), card.edge(Side::Right));
    assert_eq!(once.edge(Side::Right), card.edge(Side::Top));
    assert_eq!(once.edge(Side::Top), card.edge(Side::Left));
    assert_eq!(once.edge(Side::Left), card.edge(Side::Bottom));
}

#[test]
fn test_rotation_closure() {
    let card = Card::new([
        Edge::new('b', Face::Front),
        Edge::new('r', Face::Back),
        Edge::new('t', Face::Front),
        Edge::new('l', Face::Back),
    ]);

    assert_eq!(card.rotated().rotated().rotated().rotated(), card);
    assert_eq!(card.rotated_by(4), card);
    assert_eq!(card.rotated_by(3), card.rotated().rotated().rotated());
    assert_eq!(card.rotated_by(0), card);
}

#[test]
fn test_rotation_preserves_edge_multiset() {
    let card = Card::new([
        Edge::new('x', Face::Front),
        Edge::new('x', Face::Front),
        Edge::new('y', Face::Back),
        Edge::new('z', Face::Front),
    ]);

    for turns in 0..4 {
        let rotated = card.rotated_by(turns);
        for side in Side::ALL {
            let edge = card.edge(side);
            let count = |c: Card<char>| Side::ALL.iter().filter(|s| c.edge(**s) == edge).count();
            assert_eq!(count(rotated), count(card));
        }
    }
}
