//! Horizontal wall kicks
//!
//! When a rotation collides, the piece is nudged sideways by increments of
//! +1, -2, +3, -4, ... applied cumulatively, so the net shifts tried are
//! +1, -1, +2, -2, ... The search stops as soon as the next increment would
//! exceed the rotated matrix width, before the current shift is tested.

/// Net column shifts to try, in order, for a rotated matrix of `width` columns
pub fn kick_shifts(width: usize) -> impl Iterator<Item = i32> {
    let width = width as i32;
    let mut step = 1i32;
    let mut shift = 0i32;
    std::iter::from_fn(move || {
        shift += step;
        let next = -(step + step.signum());
        if next > width {
            return None;
        }
        step = next;
        Some(shift)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_only_tries_right() {
        assert_eq!(kick_shifts(2).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_three_wide_shifts() {
        assert_eq!(kick_shifts(3).collect::<Vec<_>>(), vec![1, -1, 2]);
    }

    #[test]
    fn test_four_wide_shifts() {
        // The left side never gets its second step
        assert_eq!(kick_shifts(4).collect::<Vec<_>>(), vec![1, -1, 2]);
    }

    #[test]
    fn test_wider_matrix_keeps_alternating() {
        assert_eq!(kick_shifts(5).collect::<Vec<_>>(), vec![1, -1, 2, -2, 3]);
    }
}
