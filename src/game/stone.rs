use super::board::Cell;

/// Stone color assigned to a player. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// Get the opposing color
    pub fn other(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Convert stone to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }

    /// Get stone name for display
    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_stone() {
        assert_eq!(Stone::Black.other(), Stone::White);
        assert_eq!(Stone::White.other(), Stone::Black);
    }

    #[test]
    fn test_stone_to_cell() {
        assert_eq!(Stone::Black.to_cell(), Cell::Black);
        assert_eq!(Stone::White.to_cell(), Cell::White);
    }

    #[test]
    fn test_stone_name() {
        assert_eq!(Stone::Black.name(), "Black");
        assert_eq!(Stone::White.to_string(), "White");
    }
}
