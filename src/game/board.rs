use std::fmt;
use std::str::FromStr;

use super::Player;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

/// The 8 index triples that win: rows, columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// A 3x3 grid stored row-major, index 0 top-left, index 8 bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("cell index {0} is outside the board")]
    OutOfRange(usize),
    #[error("cell {0} is already occupied")]
    Occupied(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("unexpected character {0:?} in board")]
    InvalidChar(char),
    #[error("expected 9 cells, found {0}")]
    WrongLength(usize),
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Get the cell at `index`, or `None` past the last cell
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Place a mark on an empty cell
    pub fn place(&mut self, index: usize, cell: Cell) -> Result<(), PlaceError> {
        match self.cells.get_mut(index) {
            None => Err(PlaceError::OutOfRange(index)),
            Some(slot) if *slot != Cell::Empty => Err(PlaceError::Occupied(index)),
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
        }
    }

    /// Copy of this board with `index` set to `cell`, or `None` past the last
    /// cell. Used by search so the original never changes.
    pub fn with(&self, index: usize, cell: Cell) -> Option<Board> {
        let mut next = *self;
        *next.cells.get_mut(index)? = cell;
        Some(next)
    }

    /// Indices of the empty cells, in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// True when `player` owns all three cells of some win line
    pub fn check_win(&self, player: Player) -> bool {
        let cell = player.to_cell();
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&index| self.cells[index] == cell))
    }

    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.check_win(player))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(SIZE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse nine cells from `X`, `O` and `.`/`_`/`-` for empty. Whitespace
    /// and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELLS);
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::X,
                'O' | 'o' => Cell::O,
                '.' | '_' | '-' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(BoardParseError::InvalidChar(c)),
            };
            cells.push(cell);
        }

        let cells: [Cell; CELLS] = cells
            .try_into()
            .map_err(|rest: Vec<Cell>| BoardParseError::WrongLength(rest.len()))?;
        Ok(Board { cells })
    }
}
