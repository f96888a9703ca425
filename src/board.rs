use std::fmt;

use crate::types::{Cell, Outcome, Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const DIRECTIONS: [Position; 8] = [
    Position::new(-1, -1),
    Position::new(-1, 0),
    Position::new(-1, 1),
    Position::new(0, -1),
    Position::new(0, 1),
    Position::new(1, -1),
    Position::new(1, 0),
    Position::new(1, 1),
];

pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Result of [`Board::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Placed,
    /// The move was not legal; the mover lost the game on the spot.
    Forfeit,
}

/// Othello board with cached legal moves for the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    side_to_move: Side,
    /// Indexed by [`Cell::code`]: empty, black, white.
    disc_count: [u8; 3],
    legal: Vec<Position>,
    finished: bool,
    winner: Option<Outcome>,
    forfeit: bool,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white, black to move.
    pub fn new() -> Self {
        let mut board = Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            side_to_move: Side::Black,
            disc_count: [0; 3],
            legal: Vec::new(),
            finished: false,
            winner: None,
            forfeit: false,
        };
        board.reset();
        board
    }

    pub fn reset(&mut self) {
        self.grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.grid[3][4] = Cell::Black;
        self.grid[4][3] = Cell::Black;
        self.grid[3][3] = Cell::White;
        self.grid[4][4] = Cell::White;
        self.side_to_move = Side::Black;
        self.disc_count = [NUM_SQUARES as u8 - 4, 2, 2];
        self.legal = self.compute_legal_moves();
        self.finished = false;
        self.winner = None;
        self.forfeit = false;
    }

    /// Seeds a board from a grid and the side to move only.
    ///
    /// Tallies are recounted from `grid`; finished/winner come solely from the
    /// pass and termination check run here, never from another board.
    pub fn from_position(grid: Grid, side_to_move: Side) -> Self {
        let mut disc_count = [0u8; 3];
        for cell in grid.iter().flatten() {
            disc_count[cell.code() as usize] += 1;
        }

        let mut board = Self {
            grid,
            side_to_move,
            disc_count,
            legal: Vec::new(),
            finished: false,
            winner: None,
            forfeit: false,
        };
        board.resolve_turn();
        board
    }

    /// Copies grid and side to move into a fresh board and plays `pos` on it.
    pub fn successor(&self, pos: Position) -> Self {
        let mut next = Self::from_position(self.grid, self.side_to_move);
        next.apply_move(pos);
        next
    }

    /// Legal moves for the side to move, row-major.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal
    }

    /// Recomputes the legal moves from the grid and side to move.
    pub fn compute_legal_moves(&self) -> Vec<Position> {
        let mut legal = Vec::new();
        for row in 0..BOARD_SIZE as i32 {
            for col in 0..BOARD_SIZE as i32 {
                let pos = Position::new(row, col);
                if self.is_spot_valid(pos) {
                    legal.push(pos);
                }
            }
        }
        legal
    }

    /// Places a disc for the side to move and flips captured discs.
    ///
    /// An illegal `pos` ends the game in favour of the opponent and leaves the
    /// grid untouched.
    pub fn apply_move(&mut self, pos: Position) -> MoveOutcome {
        if !self.legal.contains(&pos) {
            self.winner = Some(Outcome::Winner(self.side_to_move.opponent()));
            self.finished = true;
            self.forfeit = true;
            return MoveOutcome::Forfeit;
        }

        let me = self.side_to_move.cell();
        let opp = self.side_to_move.opponent().cell();

        let mut flips = [0usize; 8];
        for (run, dir) in flips.iter_mut().zip(DIRECTIONS) {
            *run = self.bounded_run(pos, dir);
        }

        self.set(pos, me);
        self.disc_count[me.code() as usize] += 1;
        self.disc_count[Cell::Empty.code() as usize] -= 1;

        for (run, dir) in flips.into_iter().zip(DIRECTIONS) {
            let mut p = pos;
            for _ in 0..run {
                p = p + dir;
                self.set(p, me);
            }
            self.disc_count[me.code() as usize] += run as u8;
            self.disc_count[opp.code() as usize] -= run as u8;
        }

        self.side_to_move = self.side_to_move.opponent();
        self.resolve_turn();
        MoveOutcome::Placed
    }

    /// Cell at `pos`, or `None` off the board.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if in_bounds(pos) {
            Some(self.grid[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn disc_count(&self, cell: Cell) -> u8 {
        self.disc_count[cell.code() as usize]
    }

    /// Returns `[empty, black, white]`.
    pub fn tally(&self) -> [u8; 3] {
        self.disc_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `None` while the game is still running.
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// `true` when the game ended on an illegal move attempt.
    pub fn is_forfeit(&self) -> bool {
        self.forfeit
    }

    /// 1-based index of the next move, counted from the opening position.
    pub fn timestep(&self) -> u32 {
        (NUM_SQUARES as u32 - 4).saturating_sub(self.disc_count(Cell::Empty) as u32) + 1
    }

    /// Converts the grid to row-major codes where 0=empty, 1=black, 2=white.
    pub fn to_codes(&self) -> Vec<u8> {
        self.grid.iter().flatten().map(|cell| cell.code()).collect()
    }

    /// Encodes the position in the harness protocol: side, grid rows,
    /// legal-move count, then one `row col` line per legal move.
    pub fn encode_state(&self) -> String {
        let mut out = format!("{}\n", self.side_to_move.code());
        for row in &self.grid {
            let line: Vec<String> = row.iter().map(|cell| cell.code().to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out.push_str(&format!("{}\n", self.legal.len()));
        for pos in &self.legal {
            out.push_str(&format!("{} {}\n", pos.row, pos.col));
        }
        out
    }

    /// Applies the pass rule and the termination check for `side_to_move`.
    fn resolve_turn(&mut self) {
        self.legal = self.compute_legal_moves();
        if !self.legal.is_empty() {
            return;
        }

        self.side_to_move = self.side_to_move.opponent();
        self.legal = self.compute_legal_moves();
        if !self.legal.is_empty() {
            return;
        }

        self.finished = true;
        let black = self.disc_count(Cell::Black);
        let white = self.disc_count(Cell::White);
        self.winner = Some(if black > white {
            Outcome::Winner(Side::Black)
        } else if white > black {
            Outcome::Winner(Side::White)
        } else {
            Outcome::Draw
        });
    }

    fn is_spot_valid(&self, pos: Position) -> bool {
        if self.cell(pos) != Some(Cell::Empty) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.bounded_run(pos, dir) > 0)
    }

    /// Number of opponent discs between `origin` and the nearest own disc
    /// along `dir`; 0 when the run is not closed by an own disc.
    fn bounded_run(&self, origin: Position, dir: Position) -> usize {
        let me = self.side_to_move.cell();
        let opp = self.side_to_move.opponent().cell();

        let mut p = origin + dir;
        let mut run = 0;
        while let Some(cell) = self.cell(p) {
            if cell == opp {
                run += 1;
                p = p + dir;
            } else if cell == me {
                return run;
            } else {
                return 0;
            }
        }
        0
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        self.grid[pos.row as usize][pos.col as usize] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timestep #{}", self.timestep())?;
        writeln!(
            f,
            "O: {}; X: {}",
            self.disc_count(Cell::Black),
            self.disc_count(Cell::White)
        )?;
        match self.winner {
            Some(Outcome::Winner(side)) if self.forfeit => writeln!(
                f,
                "Winner is {} (Opponent performed invalid move)",
                side.symbol()
            )?,
            Some(Outcome::Winner(side)) => writeln!(f, "Winner is {}", side.symbol())?,
            Some(Outcome::Draw) => writeln!(f, "Draw")?,
            None => writeln!(f, "{}'s turn", self.side_to_move.symbol())?,
        }

        writeln!(f, "+---------------+")?;
        for (row, cells) in self.grid.iter().enumerate() {
            let glyphs: Vec<&str> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let pos = Position::new(row as i32, col as i32);
                    match cell {
                        Cell::Black => "O",
                        Cell::White => "X",
                        Cell::Empty if self.legal.contains(&pos) => ".",
                        Cell::Empty => " ",
                    }
                })
                .collect();
            writeln!(f, "|{}|", glyphs.join(" "))?;
        }
        writeln!(f, "+---------------+")?;

        let moves: Vec<String> = self
            .legal
            .iter()
            .map(|p| format!("({},{})", p.row, p.col))
            .collect();
        writeln!(f, "{} valid moves: {{{}}}", self.legal.len(), moves.join(", "))?;
        write!(f, "=================")
    }
}

fn in_bounds(pos: Position) -> bool {
    (0..BOARD_SIZE as i32).contains(&pos.row) && (0..BOARD_SIZE as i32).contains(&pos.col)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a grid by calling `f(row, col)` for every square.
    pub(crate) fn grid_from(f: impl Fn(usize, usize) -> Cell) -> Grid {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = f(row, col);
            }
        }
        grid
    }

    fn occupied_on_grid(board: &Board) -> usize {
        board
            .grid()
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = vec![
            Position::new(2, 3),
            Position::new(3, 2),
            Position::new(4, 5),
            Position::new(5, 4),
        ];

        assert_eq!(board.side_to_move(), Side::Black);
        assert_eq!(board.legal_moves(), expected.as_slice());
        assert_eq!(board.tally(), [60, 2, 2]);
        assert!(!board.is_finished());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn legal_moves_are_stable_across_recomputation() {
        let mut board = Board::new();
        board.apply_move(Position::new(2, 3));

        let first = board.compute_legal_moves();
        let second = board.compute_legal_moves();

        assert_eq!(first, second);
        assert_eq!(first.as_slice(), board.legal_moves());
    }

    #[test]
    fn place_flips_opponent_disc_and_updates_counts() {
        let mut board = Board::new();

        let outcome = board.apply_move(Position::new(2, 3));

        assert_eq!(outcome, MoveOutcome::Placed);
        assert_eq!(board.cell(Position::new(3, 3)), Some(Cell::Black));
        assert_eq!(board.cell(Position::new(2, 3)), Some(Cell::Black));
        assert_eq!(board.cell(Position::new(4, 4)), Some(Cell::White));
        assert_eq!(board.tally(), [59, 4, 1]);
        assert_eq!(board.side_to_move(), Side::White);
    }

    #[test]
    fn flips_every_bounded_direction_at_once() {
        // From (2,2): east run closed at (2,5), south-east run closed at (4,4),
        // south run (3,2) left open.
        let grid = grid_from(|row, col| match (row, col) {
            (2, 5) | (4, 4) => Cell::Black,
            (2, 3) | (2, 4) | (3, 3) | (3, 2) => Cell::White,
            _ => Cell::Empty,
        });
        let mut board = Board::from_position(grid, Side::Black);
        assert!(board.legal_moves().contains(&Position::new(2, 2)));

        board.apply_move(Position::new(2, 2));

        assert_eq!(board.cell(Position::new(2, 3)), Some(Cell::Black));
        assert_eq!(board.cell(Position::new(2, 4)), Some(Cell::Black));
        assert_eq!(board.cell(Position::new(3, 3)), Some(Cell::Black));
        assert_eq!(board.cell(Position::new(3, 2)), Some(Cell::White));
        assert_eq!(board.tally(), [57, 6, 1]);
    }

    #[test]
    fn side_with_no_moves_passes_on_construction() {
        // (0,0) empty, (0,1) black, everything else white.
        let grid = grid_from(|row, col| match (row, col) {
            (0, 0) => Cell::Empty,
            (0, 1) => Cell::Black,
            _ => Cell::White,
        });

        let board = Board::from_position(grid, Side::Black);

        assert!(!board.is_finished());
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.legal_moves(), &[Position::new(0, 0)]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn pass_after_move_keeps_mover_on_turn() {
        // Empty corners (0,0) and (7,7), white at (0,1) and (7,6), rest black.
        let grid = grid_from(|row, col| match (row, col) {
            (0, 0) | (7, 7) => Cell::Empty,
            (0, 1) | (7, 6) => Cell::White,
            _ => Cell::Black,
        });
        let mut board = Board::from_position(grid, Side::Black);
        assert_eq!(
            board.legal_moves(),
            &[Position::new(0, 0), Position::new(7, 7)]
        );

        board.apply_move(Position::new(0, 0));

        // White cannot close a line through (7,7), so it passes.
        assert!(!board.is_finished());
        assert_eq!(board.side_to_move(), Side::Black);
        assert_eq!(board.legal_moves(), &[Position::new(7, 7)]);
    }

    #[test]
    fn full_board_finishes_with_strict_majority_winner() {
        // 33 black (first 33 squares), 31 white.
        let grid = grid_from(|row, col| {
            if row * BOARD_SIZE + col < 33 {
                Cell::Black
            } else {
                Cell::White
            }
        });

        let board = Board::from_position(grid, Side::White);

        assert!(board.is_finished());
        assert_eq!(board.tally(), [0, 33, 31]);
        assert_eq!(board.winner(), Some(Outcome::Winner(Side::Black)));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn full_board_with_equal_tallies_is_a_draw() {
        let grid = grid_from(|row, _| if row < 4 { Cell::White } else { Cell::Black });

        let board = Board::from_position(grid, Side::Black);

        assert!(board.is_finished());
        assert_eq!(board.winner(), Some(Outcome::Draw));
    }

    #[test]
    fn both_sides_stuck_finishes_before_board_is_full() {
        let grid = grid_from(|row, col| {
            if (row, col) == (0, 0) {
                Cell::Empty
            } else {
                Cell::Black
            }
        });

        let board = Board::from_position(grid, Side::Black);

        assert!(board.is_finished());
        assert_eq!(board.tally(), [1, 63, 0]);
        assert_eq!(board.winner(), Some(Outcome::Winner(Side::Black)));
    }

    #[test]
    fn illegal_move_forfeits_without_touching_grid() {
        let mut board = Board::new();
        let before = *board.grid();

        let outcome = board.apply_move(Position::new(0, 0));

        assert_eq!(outcome, MoveOutcome::Forfeit);
        assert!(board.is_finished());
        assert!(board.is_forfeit());
        assert_eq!(board.winner(), Some(Outcome::Winner(Side::White)));
        assert_eq!(board.grid(), &before);
        assert_eq!(board.tally(), [60, 2, 2]);
    }

    #[test]
    fn successor_does_not_inherit_finished_state() {
        let mut forfeited = Board::new();
        forfeited.apply_move(Position::new(7, 7));
        assert!(forfeited.is_finished());

        let next = forfeited.successor(Position::new(2, 3));

        assert!(!next.is_finished());
        assert_eq!(next.winner(), None);
        assert_eq!(next.tally(), [59, 4, 1]);
        assert_eq!(next.side_to_move(), Side::White);
    }

    #[test]
    fn tallies_are_conserved_through_a_full_game() {
        let mut board = Board::new();

        for _ in 0..NUM_SQUARES {
            let [empty, black, white] = board.tally();
            assert_eq!(empty as usize + black as usize + white as usize, NUM_SQUARES);
            assert_eq!(occupied_on_grid(&board), black as usize + white as usize);

            if board.is_finished() {
                break;
            }
            let mv = board.legal_moves()[0];
            assert_eq!(board.apply_move(mv), MoveOutcome::Placed);
        }

        assert!(board.is_finished());
        assert!(board.winner().is_some());
        assert!(!board.is_forfeit());
    }

    #[test]
    fn encode_state_lists_side_grid_and_moves() {
        let text = Board::new().encode_state();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "1");
        assert_eq!(lines[4], "0 0 0 2 1 0 0 0");
        assert_eq!(lines[5], "0 0 0 1 2 0 0 0");
        assert_eq!(lines[9], "4");
        assert_eq!(&lines[10..], &["2 3", "3 2", "4 5", "5 4"]);
    }

    #[test]
    fn display_marks_turn_counts_and_legal_squares() {
        let rendered = Board::new().to_string();

        assert!(rendered.starts_with("Timestep #1\nO: 2; X: 2\nO's turn\n"));
        assert!(rendered.contains("\n|    . X O      |\n"));
        assert!(rendered.contains("4 valid moves: {(2,3), (3,2), (4,5), (5,4)}"));
    }

    #[test]
    fn display_reports_forfeit_winner() {
        let mut board = Board::new();
        board.apply_move(Position::new(0, 0));

        assert!(
            board
                .to_string()
                .contains("Winner is X (Opponent performed invalid move)")
        );
    }
}
