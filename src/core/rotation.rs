//! Quarter-turn coordinate rotation
//!
//! A player's egocentric view of the board is the canonical board turned by
//! `rotation` quarter turns. `rotate` takes a point expressed in some frame of
//! size `(height, width)` and returns the matching point in the frame turned
//! by `turns` quarter turns. The size is always the size of the frame the
//! point currently lives in; for odd turns the returned point lives in a frame
//! whose height and width are swapped (see [`rotated_size`]).

/// `(height, width)` of a rectangular frame.
pub type Size = (usize, usize);

/// Size of a frame after `turns` quarter turns.
#[inline]
pub fn rotated_size(size: Size, turns: u8) -> Size {
    if turns % 2 == 0 { size } else { (size.1, size.0) }
}

/// Rotate `point` (row, col) living in a frame of `size` by `turns` quarter turns.
///
/// `turns` is taken modulo 4. `turns == 2` is the point reflection through
/// the board centre.
pub fn rotate(size: Size, point: (i32, i32), turns: u8) -> (i32, i32) {
    let (row, col) = point;
    let flipped_row = size.0 as i32 - row - 1;
    let flipped_col = size.1 as i32 - col - 1;

    match turns % 4 {
        0 => point,
        1 => (col, flipped_row),
        2 => (flipped_row, flipped_col),
        _ => (flipped_col, row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(rotate((3, 5), (1, 4), 0), (1, 4));
        assert_eq!(rotate((3, 5), (1, 4), 4), (1, 4));
    }

    #[test]
    fn test_half_turn_is_point_reflection() {
        assert_eq!(rotate((8, 8), (0, 0), 2), (7, 7));
        assert_eq!(rotate((3, 1), (0, 0), 2), (2, 0));
    }

    #[test]
    fn test_quarter_turn_swaps_frame() {
        // 2 rows x 3 cols; (0, 2) is the top right corner
        let p = rotate((2, 3), (0, 2), 1);
        assert_eq!(p, (2, 1));
        assert_eq!(rotated_size((2, 3), 1), (3, 2));
        assert_eq!(rotate((3, 2), p, 3), (0, 2));
    }
}
