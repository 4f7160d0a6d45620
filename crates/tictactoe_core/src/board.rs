//! N×N board storage and comparison.

use crate::types::{Cell, Coord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Errors raised while constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Board size must be at least 1.
    #[display("Board size must be positive")]
    ZeroSize,

    /// Rows do not form an N×N grid.
    #[display("Expected a {}x{} grid, row {} has {} cells", size, size, row, len)]
    NotSquare {
        /// Number of rows supplied.
        size: usize,
        /// Offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// Coordinate lies outside the board.
    #[display("Coordinate {} is outside the board", _0)]
    OutOfBounds(Coord),

    /// A cell symbol was not one of `X`, `O` or `-`.
    #[display("Unknown cell symbol {:?} at {}", symbol, at)]
    UnknownSymbol {
        /// The unparsed symbol.
        symbol: String,
        /// Where it was found.
        at: Coord,
    },
}

impl std::error::Error for BoardError {}

/// Square tic-tac-toe board of side `size`.
///
/// Cells are stored in row-major order; every coordinate in
/// `[0, size) × [0, size)` holds exactly one [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if raw.size.checked_mul(raw.size) != Some(raw.cells.len()) {
            return Err(BoardError::NotSquare {
                size: raw.size,
                row: raw.cells.len() / raw.size,
                len: raw.cells.len() % raw.size,
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Creates a board with every cell empty.
    #[instrument]
    pub fn init_empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Builds a board from rows of wire symbols.
    ///
    /// The grid must be square and every symbol must parse with
    /// [`Cell::from_symbol`]. The shape is checked before any cell is
    /// stored, so storage never exceeds the number of supplied symbols.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if let Some((row, line)) = rows.iter().enumerate().find(|(_, line)| line.len() != size) {
            return Err(BoardError::NotSquare {
                size,
                row,
                len: line.len(),
            });
        }

        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .map(move |(col, symbol)| (Coord::new(row, col), symbol.as_ref()))
            })
            .map(|(at, symbol)| {
                Cell::from_symbol(symbol).ok_or_else(|| BoardError::UnknownSymbol {
                    symbol: symbol.to_string(),
                    at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { size, cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `coord`, or `None` if out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Overwrites the cell at `coord`.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), BoardError> {
        let i = self.index(coord).ok_or(BoardError::OutOfBounds(coord))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Iterates every coordinate with its cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (Coord::new(i / self.size, i % self.size), *cell))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Rows rendered as wire symbols.
    pub fn to_symbol_rows(&self) -> Vec<Vec<String>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.symbol().to_string()).collect())
            .collect()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Coordinates where `self` and `other` differ.
    ///
    /// Boards of different sizes are compared over the overlapping
    /// prefix of cells only; callers check sizes first.
    #[instrument(skip_all, fields(size = self.size))]
    pub fn diff(&self, other: &Board) -> Vec<Coord> {
        self.cells()
            .zip(other.cells.iter())
            .filter(|((_, a), b)| a != *b)
            .map(|((coord, _), _)| coord)
            .collect()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.size && coord.col < self.size {
            Some(coord.row * self.size + coord.col)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}
