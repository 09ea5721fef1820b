//! Invariants that must hold for any board, piece or counter value.

use blocktris::collision::is_valid_position;
use blocktris::config::DEFAULT_LINES_PER_LEVEL;
use blocktris::lines::clear_completed_lines;
use blocktris::score::{MIN_DROP_INTERVAL_MS, calculate_level, calculate_score, drop_speed};
use blocktris::{
    Action, BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Engine, EngineConfig, Piece, Position,
    SeededRandom, TetrominoType,
};
use proptest::prelude::*;

fn any_type() -> impl Strategy<Value = TetrominoType> {
    prop::sample::select(TetrominoType::ALL.to_vec())
}

/// Drops dominate so generated games reach placements and game over
fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => Just(Action::MoveLeft),
        2 => Just(Action::MoveRight),
        2 => Just(Action::Rotate),
        3 => Just(Action::SoftDrop),
        4 => Just(Action::HardDrop),
        1 => Just(Action::TogglePause),
    ]
}

/// A piece of any type in any of its four orientations
fn any_piece() -> impl Strategy<Value = Piece> {
    (any_type(), 0usize..4).prop_map(|(piece_type, turns)| {
        (0..turns).fold(Piece::new(piece_type), |piece, _| piece.rotated())
    })
}

/// Boards with random placed cells; `full_rows` forces some rows complete
fn any_board() -> impl Strategy<Value = Board> {
    (
        prop::collection::vec(any::<bool>(), BOARD_WIDTH * BOARD_HEIGHT),
        prop::collection::vec(0..BOARD_HEIGHT, 0..6),
    )
        .prop_map(|(cells, full_rows)| {
            let mut board = Board::new();
            for (i, placed) in cells.into_iter().enumerate() {
                if placed {
                    board.set((i / BOARD_WIDTH) as i32, (i % BOARD_WIDTH) as i32, Cell::Placed);
                }
            }
            for row in full_rows {
                for col in 0..BOARD_WIDTH as i32 {
                    board.set(row as i32, col, Cell::Placed);
                }
            }
            board
        })
}

#[test]
fn empty_boards_are_independent() {
    let mut first = Board::new();
    let second = Board::new();
    assert_eq!(first.rows().len(), BOARD_HEIGHT);
    assert!(first.rows().iter().all(|row| row.len() == BOARD_WIDTH));
    assert!(first.is_empty());

    first.set(5, 5, Cell::Placed);
    assert!(second.is_empty());
    assert_eq!(Board::new(), second);
}

proptest! {
    #[test]
    fn four_rotations_are_identity(piece in any_piece()) {
        let mut turned = piece;
        for _ in 0..4 {
            let next = turned.rotated();
            prop_assert_eq!(next.shape.filled_count(), turned.shape.filled_count());
            turned = next;
        }
        prop_assert_eq!(turned.shape, piece.shape);
        prop_assert_eq!(turned.shape.filled_count(), 4);
    }

    #[test]
    fn off_board_positions_are_invalid(
        board in any_board(),
        piece in any_piece(),
        x in -8i32..18,
        y in -4i32..26,
    ) {
        let candidate = Position::new(x, y);
        let escapes = piece.cells_at(candidate).any(|cell| {
            cell.x < 0 || cell.x >= BOARD_WIDTH as i32 || cell.y >= BOARD_HEIGHT as i32
        });
        if escapes {
            prop_assert!(!is_valid_position(&board, &piece, candidate));
        }
    }

    #[test]
    fn line_clear_keeps_dimensions_and_counts(board in any_board()) {
        let full_before = board.rows().iter().filter(|row| Board::is_row_full(row)).count();
        let (cleared, lines) = clear_completed_lines(&board);

        prop_assert_eq!(cleared.rows().len(), BOARD_HEIGHT);
        prop_assert!(lines <= BOARD_HEIGHT);
        prop_assert_eq!(lines, full_before);
        prop_assert!(!cleared.rows().iter().any(|row| Board::is_row_full(row)));
        prop_assert_eq!(
            cleared.placed_count(),
            board.placed_count() - lines * BOARD_WIDTH
        );
        if full_before == 0 {
            prop_assert_eq!(cleared, board);
        }
    }

    #[test]
    fn score_is_monotonic(lines in -10i64..10, level in -50i64..1000) {
        let score = calculate_score(lines, level);
        prop_assert!(calculate_score(lines + 1, level) >= score);
        prop_assert!(calculate_score(lines, level + 1) >= score);
    }

    #[test]
    fn level_is_monotonic(total in -100i64..100_000, per_level in 0u32..50) {
        prop_assert!(calculate_level(total + 1, per_level) >= calculate_level(total, per_level));
    }

    #[test]
    fn drop_speed_falls_to_floor(
        level in 0u32..10_000,
        base in 0u32..5000,
        decrement in 0u32..500,
    ) {
        let speed = drop_speed(level, base, decrement);
        prop_assert!(speed >= MIN_DROP_INTERVAL_MS);
        prop_assert!(drop_speed(level + 1, base, decrement) <= speed);
    }

    #[test]
    fn counters_never_decrease_during_play(
        seed in any::<u64>(),
        actions in prop::collection::vec(any_action(), 1..300),
    ) {
        let mut engine = Engine::new(
            EngineConfig::default().with_random_source(SeededRandom::new(seed)),
        );
        let mut state = engine.start();

        for action in actions {
            let next = engine.apply(&state, action);

            prop_assert!(next.score >= state.score);
            prop_assert!(next.lines >= state.lines);
            prop_assert!(next.level >= state.level);
            prop_assert_eq!(
                next.level,
                calculate_level(i64::from(next.lines), DEFAULT_LINES_PER_LEVEL)
            );
            prop_assert_eq!(next.board.rows().len(), BOARD_HEIGHT);
            prop_assert!(next.board.rows().iter().all(|row| row.len() == BOARD_WIDTH));
            prop_assert!(!next.board.rows().iter().any(|row| Board::is_row_full(row)));
            if state.game_over {
                prop_assert_eq!(&next, &state);
            }

            state = next;
        }
    }
}
