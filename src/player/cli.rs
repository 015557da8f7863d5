use std::io::{self, BufRead, Write};

use anyhow::bail;
use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::Point;
use crate::ship::Direction;

use super::Player;

/// Interactive player reading `row col` pairs from a line-oriented input.
pub struct HumanPlayer {
    name: String,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

/// Reader over stdin that never buffers past the byte it was asked for,
/// so several of them can take turns on the same input.
pub fn stdin_lines() -> io::BufReader<io::Stdin> {
    io::BufReader::with_capacity(1, io::stdin())
}

/// Parse a line holding exactly two integers.
fn parse_point(line: &str) -> Option<Point> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Point::new(row, col))
}

fn parse_direction(line: &str) -> Option<Direction> {
    match line.trim() {
        "h" | "H" => Some(Direction::Horizontal),
        "v" | "V" => Some(Direction::Vertical),
        _ => None,
    }
}

impl HumanPlayer {
    pub fn new(name: &str, input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self {
            name: name.to_string(),
            input,
            output,
        }
    }

    /// Player bound to the process's stdin and stdout.
    pub fn stdio(name: &str) -> Self {
        Self::new(name, Box::new(stdin_lines()), Box::new(io::stdout()))
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for {}", self.name);
        }
        Ok(line)
    }

    fn read_point(&mut self, text: &str) -> anyhow::Result<Point> {
        loop {
            let line = self.prompt(text)?;
            match parse_point(&line) {
                Some(p) => return Ok(p),
                None => writeln!(self.output, "You must enter 2 integers")?,
            }
        }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_fleet(&mut self, _rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "{} must place {} ships",
            self.name,
            board.fleet().len()
        )?;
        for id in 0..board.fleet().len() {
            write!(self.output, "{}", board.view(false))?;
            let (ship_name, length) = {
                let spec = &board.fleet()[id];
                (spec.name().to_string(), spec.length())
            };
            let dir = loop {
                let line = self.prompt(&format!(
                    "Enter h or v for direction of {} (length {}): ",
                    ship_name, length
                ))?;
                match parse_direction(&line) {
                    Some(d) => break d,
                    None => writeln!(self.output, "Direction must be h or v.")?,
                }
            };
            loop {
                let origin = self.read_point("Enter row and column of leftmost cell (e.g. 3 5): ")?;
                match board.place_ship(origin, id, dir) {
                    Ok(()) => break,
                    Err(e) => writeln!(self.output, "The ship can not be placed there: {}.", e)?,
                }
            }
        }
        Ok(())
    }

    fn next_attack_point(&mut self, _rng: &mut SmallRng) -> anyhow::Result<Point> {
        self.read_point("Enter the row and column to attack (e.g. 3 5): ")
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::grid::Cell;
    use rand::SeedableRng;

    fn scripted(script: &str) -> HumanPlayer {
        HumanPlayer::new(
            "Hal",
            Box::new(io::Cursor::new(script.as_bytes().to_vec())),
            Box::new(io::sink()),
        )
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("3 5\n"), Some(Point::new(3, 5)));
        assert_eq!(parse_point("  -1   0 "), Some(Point::new(-1, 0)));
        assert_eq!(parse_point("3"), None);
        assert_eq!(parse_point("a b"), None);
        assert_eq!(parse_point("1 2 3"), None);
    }

    #[test]
    fn placement_retries_until_legal() {
        let cfg = MatchConfig::new(3, 3)
            .and_then(|c| c.with_ship(3, 'A', "a"))
            .and_then(|c| c.with_ship(2, 'B', "b"))
            .unwrap();
        let mut board = Board::new(&cfg);
        let mut rng = SmallRng::seed_from_u64(0);
        // bad direction, bad numbers, off-grid, overlap
        let mut p = scripted("x\nh\nfoo\n0 1\n0 0\nv\n0 0\n1 2\n");
        p.place_fleet(&mut rng, &mut board).unwrap();
        assert_eq!(board.cell(Point::new(0, 2)), Some(Cell::Ship(0)));
        assert_eq!(board.cell(Point::new(2, 2)), Some(Cell::Ship(1)));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = scripted("nope\n");
        assert!(p.next_attack_point(&mut rng).is_err());
    }

    #[test]
    fn reads_attack_points() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = scripted("4 7\n");
        assert_eq!(p.next_attack_point(&mut rng).unwrap(), Point::new(4, 7));
    }
}
