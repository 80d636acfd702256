//! Perft (performance test) for move generation correctness.

use crate::board::Position;
use std::time::Instant;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(usize, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: Position::STARTPOS,
        depths: &[(1, 44), (2, 1920), (3, 79666)],
    },
    TestPosition {
        name: "Bare Generals",
        fen: "3k5/9/9/9/9/9/9/9/9/4K4 w",
        depths: &[(1, 2)],
    },
];

#[test]
fn test_all_perft_positions() {
    for position in TEST_POSITIONS {
        let mut pos = Position::from_fen(position.fen);

        for &(depth, expected) in position.depths {
            let start = Instant::now();
            let nodes = pos.perft(depth);
            let duration = start.elapsed();

            println!("  Depth {}: {} nodes in {:?}", depth, nodes, duration);

            assert_eq!(
                nodes, expected,
                "Perft failed for position '{}' at depth {}. Expected: {}, Got: {}",
                position.name, depth, expected, nodes
            );
        }
    }
}

#[test]
fn test_perft_leaves_position_untouched() {
    let mut pos = Position::new();
    let before = pos.clone();
    pos.perft(2);
    assert_eq!(pos, before);
    assert_eq!(pos.history_len(), 0);
}
