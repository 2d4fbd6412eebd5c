use crate::game::Cell;

/// Index of the highest score, first one on ties. NaN scores never win.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Argmax after forcing every occupied cell to negative infinity.
///
/// Returns `None` when the board is full, when `scores` does not have one
/// entry per cell, or when no empty cell has a score above negative infinity.
pub fn masked_argmax(scores: &[f32], cells: &[Cell]) -> Option<usize> {
    if scores.len() != cells.len() {
        return None;
    }
    let masked: Vec<f32> = scores
        .iter()
        .zip(cells)
        .map(|(&score, cell)| if cell.is_empty() { score } else { f32::NEG_INFINITY })
        .collect();
    argmax(&masked).filter(|&index| masked[index] > f32::NEG_INFINITY)
}
