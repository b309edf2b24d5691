use crate::card::{Card, Pattern, Side};
use std::fmt;

/// Horizontal space between solutions printed side by side.
const GUTTER: usize = 4;

/// Where found solutions go. The search hands over one fully-placed,
/// fully-rotated board per call, as soon as it is found; it knows nothing
/// about how (or whether) the solution is shown.
pub trait Reporter<P: Pattern> {
    fn solution(&mut self, solution: &Solution<P>);
}

/// One valid board: the cards in their final positions and rotations,
/// row-major. `placement` records how it was built from the original deck,
/// as (deck index, quarter turns) per cell.
#[derive(Debug, Clone)]
pub struct Solution<P: Pattern> {
    pub width: usize,
    pub cells: Vec<Card<P>>,
    pub placement: Vec<(usize, u8)>,
}

/// All solutions of one run, in discovery order. Exists mostly for its
/// `Display`, which packs the boards side by side as far as the terminal
/// width allows.
pub struct SolutionSet<P: Pattern>(pub Vec<Solution<P>>);

impl<P: Pattern> Reporter<P> for SolutionSet<P> {
    fn solution(&mut self, solution: &Solution<P>) {
        self.0.push(solution.clone());
    }
}

fn terminal_width() -> usize {
    termsize::get().map(|size| size.cols as usize).unwrap_or(90)
}

impl<P: Pattern + fmt::Display> fmt::Display for Solution<P> {
    /// Each card is drawn as a box with its four edge labels in their
    /// physical positions: top edge on the first line, left and right on
    /// the middle line, bottom on the last. Boxes in a board row are
    /// separated by a single space.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = |card: Card<P>, side: Side| {
            let edge = card.edge(side);
            format!("{} {}", edge.pattern, edge.face)
        };

        let label_width = self
            .cells
            .iter()
            .flat_map(|card| Side::ALL.map(|side| label(*card, side).chars().count()))
            .max()
            .unwrap_or(0);
        let inner = 2 * label_width + 2;
        let border = format!("+{}+", "-".repeat(inner));

        let height = self.cells.len() / self.width;
        for row in 0..height {
            let cards = &self.cells[row * self.width..(row + 1) * self.width];

            let mut lines = vec![String::new(); 5];
            for (col, card) in cards.iter().enumerate() {
                let sep = if col == 0 { "" } else { " " };
                lines[0].push_str(&format!("{}{}", sep, border));
                lines[1].push_str(&format!(
                    "{}|{:^inner$}|",
                    sep,
                    label(*card, Side::Top),
                    inner = inner
                ));
                lines[2].push_str(&format!(
                    "{}|{:<lw$}  {:>lw$}|",
                    sep,
                    label(*card, Side::Left),
                    label(*card, Side::Right),
                    lw = label_width
                ));
                lines[3].push_str(&format!(
                    "{}|{:^inner$}|",
                    sep,
                    label(*card, Side::Bottom),
                    inner = inner
                ));
                lines[4].push_str(&format!("{}{}", sep, border));
            }
            for line in lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl<P: Pattern + fmt::Display> fmt::Display for SolutionSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max_width = terminal_width();

        let mut row: Vec<Vec<String>> = Vec::new();
        let mut row_width = 0;
        for solution in &self.0 {
            let block: Vec<String> = solution.to_string().lines().map(str::to_owned).collect();
            let block_width = block.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            if !row.is_empty() && row_width + GUTTER + block_width > max_width {
                write_block_row(f, &row)?;
                writeln!(f)?;
                row.clear();
                row_width = 0;
            }
            row_width += if row.is_empty() {
                block_width
            } else {
                GUTTER + block_width
            };
            row.push(block);
        }
        if !row.is_empty() {
            write_block_row(f, &row)?;
        }
        Ok(())
    }
}

/// Print multi-line blocks next to each other, top-aligned.
fn write_block_row(f: &mut fmt::Formatter, blocks: &[Vec<String>]) -> fmt::Result {
    let height = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();

    for line_index in 0..height {
        let mut line = String::new();
        for (block, width) in blocks.iter().zip(&widths) {
            if !line.is_empty() {
                line.push_str(&" ".repeat(GUTTER));
            }
            let text = block.get(line_index).map(String::as_str).unwrap_or("");
            line.push_str(&format!("{:<width$}", text, width = width));
        }
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Edge, Face};

    fn card(names: [char; 4]) -> Card<char> {
        Card::new(names.map(|name| Edge::new(name, Face::Front)))
    }

    #[test]
    fn test_solution_display_positions() {
        let solution = Solution {
            width: 2,
            cells: vec![card(['b', 'r', 't', 'l']); 4],
            placement: vec![(0, 0), (1, 0), (2, 0), (3, 0)],
        };
        let text = format!("{}", solution);
        let lines: Vec<&str> = text.lines().collect();

        // Two board rows of five lines each.
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with('+'));
        assert!(lines[1].contains("t front"));
        assert!(lines[2].contains("l front"));
        assert!(lines[2].contains("r front"));
        assert!(lines[3].contains("b front"));
        // Single-space gutter between the two boxes in a row.
        assert!(lines[0].contains("+ +"));
    }

    #[test]
    fn test_solution_set_collects_and_displays() {
        let solution = Solution {
            width: 1,
            cells: vec![card(['b', 'r', 't', 'l'])],
            placement: vec![(0, 0)],
        };
        let mut set = SolutionSet(Vec::new());
        set.solution(&solution);
        set.solution(&solution);
        assert_eq!(set.0.len(), 2);

        let text = format!("{}", set);
        assert!(text.contains("t front"));
    }
}
