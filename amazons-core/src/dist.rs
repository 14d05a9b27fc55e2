//! Multi-source BFS distance maps over empty squares

use crate::board::{coords, square, Board, Cell, Side, AMAZONS_PER_SIDE, BOARD_SIZE, NUM_SQUARES};

/// Sentinel for blocked or unreachable squares
pub const UNREACHABLE: u8 = 99;

/// Fill `out` with the minimum number of king steps from the closest amazon
/// of `side` to each empty square, moving over empty squares only.
///
/// Seed squares hold 0; every other occupied square and every cut-off empty
/// square holds [`UNREACHABLE`]. This is the standard king-distance
/// approximation of queen distance and is relied on by the evaluator.
///
/// The 64-slot ring queue never overflows: each square is enqueued at most
/// once.
pub fn distances(board: &Board, side: Side, out: &mut [u8; NUM_SQUARES]) {
    out.fill(UNREACHABLE);

    let mut queue = [0u8; NUM_SQUARES];
    let mut head = 0usize;
    let mut tail = 0usize;

    let mut seeds = [0u8; AMAZONS_PER_SIDE];
    let n = board.amazons(side, &mut seeds);
    for &seed in &seeds[..n] {
        out[seed as usize] = 0;
        queue[tail] = seed;
        tail += 1;
    }

    while head < tail {
        let sq = queue[head];
        head += 1;
        let next = out[sq as usize] + 1;
        let (r, c) = coords(sq);
        for &(dr, dc) in &crate::board::DIRECTIONS {
            let nr = r + dr;
            let nc = c + dc;
            if !(0..BOARD_SIZE).contains(&nr) || !(0..BOARD_SIZE).contains(&nc) {
                continue;
            }
            let nsq = square(nr, nc);
            if board.cell(nsq) == Cell::Empty && out[nsq as usize] == UNREACHABLE {
                out[nsq as usize] = next;
                queue[tail] = nsq;
                tail += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{square, Board, Cell, Side};

    #[test]
    fn test_seeds_are_zero_and_neighbors_one() {
        let board = Board::new();
        let mut map = [0u8; NUM_SQUARES];
        distances(&board, Side::Black, &mut map);

        assert_eq!(map[square(0, 2) as usize], 0);
        assert_eq!(map[square(0, 3) as usize], 1);
        assert_eq!(map[square(1, 1) as usize], 1);
    }

    #[test]
    fn test_occupied_squares_hold_sentinel() {
        let board = Board::new();
        let mut map = [0u8; NUM_SQUARES];
        distances(&board, Side::Black, &mut map);

        // Opposing amazons are barriers, not seeds
        assert_eq!(map[square(0, 5) as usize], UNREACHABLE);
        assert_eq!(map[square(7, 5) as usize], UNREACHABLE);
    }

    #[test]
    fn test_walls_lengthen_paths() {
        let mut board = Board::empty();
        board.set(square(0, 0), Cell::Amazon(Side::White));
        // Wall across row 1, leaving a gap at column 7
        for c in 0..7 {
            board.set(square(1, c), Cell::Arrow);
        }
        let mut map = [0u8; NUM_SQUARES];
        distances(&board, Side::White, &mut map);

        assert_eq!(map[square(0, 7) as usize], 7);
        assert_eq!(map[square(1, 7) as usize], 7);
        // Detour through the gap to reach the far side of the wall
        assert_eq!(map[square(2, 7) as usize], 8);
        assert_eq!(map[square(2, 0) as usize], 14);
    }

    #[test]
    fn test_sealed_region_is_unreachable() {
        let mut board = Board::empty();
        board.set(square(0, 0), Cell::Amazon(Side::Black));
        for c in 0..8 {
            board.set(square(3, c), Cell::Arrow);
        }
        let mut map = [0u8; NUM_SQUARES];
        distances(&board, Side::Black, &mut map);

        assert!(map[square(2, 4) as usize] < UNREACHABLE);
        assert_eq!(map[square(4, 4) as usize], UNREACHABLE);
        assert_eq!(map[square(7, 7) as usize], UNREACHABLE);
    }

    #[test]
    fn test_multi_source_takes_closest_seed() {
        let mut board = Board::empty();
        board.set(square(0, 0), Cell::Amazon(Side::Black));
        board.set(square(7, 7), Cell::Amazon(Side::Black));
        let mut map = [0u8; NUM_SQUARES];
        distances(&board, Side::Black, &mut map);

        assert_eq!(map[square(0, 1) as usize], 1);
        assert_eq!(map[square(7, 6) as usize], 1);
        assert_eq!(map[square(4, 4) as usize], 3);
    }
}
