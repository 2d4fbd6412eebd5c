use crate::game::Cell;

const BITS_PER_CELL: usize = 2;
const CELLS_PER_WORD: usize = u64::BITS as usize / BITS_PER_CELL;

/// Canonical, collision-free key for a board state.
///
/// Every cell takes a fixed 2-bit slot (`00` empty, `01` black, `10` white),
/// packed 32 cells per word in row-major order. The cell count is part of the
/// key so boards of different scales never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    cells: usize,
    words: Box<[u64]>,
}

impl StateKey {
    /// Encode a row-major state vector.
    pub fn encode(cells: &[Cell]) -> Self {
        let mut words = vec![0u64; cells.len().div_ceil(CELLS_PER_WORD)];
        for (index, cell) in cells.iter().enumerate() {
            let code = match cell {
                Cell::Empty => 0b00,
                Cell::Black => 0b01,
                Cell::White => 0b10,
            };
            let shift = (index % CELLS_PER_WORD) * BITS_PER_CELL;
            words[index / CELLS_PER_WORD] |= code << shift;
        }
        StateKey {
            cells: cells.len(),
            words: words.into_boxed_slice(),
        }
    }

    /// Recover the state vector this key was built from.
    pub fn decode(&self) -> Vec<Cell> {
        (0..self.cells)
            .map(|index| {
                let shift = (index % CELLS_PER_WORD) * BITS_PER_CELL;
                match (self.words[index / CELLS_PER_WORD] >> shift) & 0b11 {
                    0b01 => Cell::Black,
                    0b10 => Cell::White,
                    _ => Cell::Empty,
                }
            })
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.cells
    }
}
