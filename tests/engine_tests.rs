//! Engine Module Tests
//!
//! Tests for move generation, the rule validator and evaluation.

use rotachess::core::{Board, Color, Layout, Move, Piece, PlayerSequence, Role, Square};
use rotachess::engine::eval::{evaluate, material, piece_value};
use rotachess::engine::movegen::MoveGen;
use rotachess::engine::rules::{IllegalMove, check_move, is_defeated, is_valid_move};

fn parse_board(text: &str) -> (PlayerSequence, Board) {
    let layout = Layout::from_brd(text).unwrap();
    (layout.sequence, layout.board)
}

fn white_first() -> PlayerSequence {
    PlayerSequence::two_player(Color::White, Color::Black)
}

const MIDGAME: &str = "0w01b2
rw,--,--,kw,--,bw,--,rw
pw,pw,--,--,qw,pw,pw,pw
--,--,nw,pw,--,--,--,--
--,--,bw,--,pw,--,--,--
--,--,--,pb,pb,--,nb,--
--,--,nb,--,--,qb,--,--
pb,pb,pb,--,--,pb,pb,pb
rb,--,bb,kb,--,bb,--,rb
";

// ============================================================================
// Move Generation Tests
// ============================================================================

#[test]
fn test_standard_opening_move_count() {
    let layout = Layout::default();
    // 8 single pawn pushes and 4 knight moves
    assert_eq!(MoveGen::generate(&layout.board, Color::White).len(), 12);
    let black_view = layout.board.rotated(2);
    assert_eq!(MoveGen::generate(&black_view, Color::Black).len(), 12);
}

#[test]
fn test_never_lands_on_own_piece() {
    let (_, board) = parse_board(MIDGAME);
    for color in [Color::White, Color::Black] {
        for mv in MoveGen::generate(&board, color).ordered() {
            let target = board.piece_at(mv.to);
            assert!(target.is_none_or(|p| p.color != color), "{} lands on own piece", mv);
        }
    }
}

#[test]
fn test_slider_stops_at_own_blocker() {
    let (_, board) = parse_board("0w01b2\nrw,--,--,pw,--\n--,--,--,--,--\n--,--,--,--,--\n--,--,--,--,--\n--,--,--,--,--\n");
    let dests = MoveGen::destinations(&board, Square::new(0, 0));
    assert!(dests.contains(&Square::new(0, 1)));
    assert!(dests.contains(&Square::new(0, 2)));
    assert!(!dests.contains(&Square::new(0, 3)));
    assert!(!dests.contains(&Square::new(0, 4)));
}

#[test]
fn test_slider_captures_enemy_blocker() {
    let (_, board) = parse_board("0w01b2\nrw,--,--,pb,--\n--,--,--,--,--\n--,--,--,--,--\n--,--,--,--,--\n--,--,--,--,--\n");
    let list = MoveGen::piece_moves(&board, Square::new(0, 0));
    assert_eq!(list.captures, vec![(Move::from(((0, 0), (0, 3))), 1)]);
    assert!(!list.contains(Move::from(((0, 0), (0, 4)))));
}

#[test]
fn test_slide_range_is_height_minus_one() {
    // 3 rows, 8 columns: a rook reaches at most two squares sideways
    let (_, board) = parse_board("0w01b2\nrw,--,--,--,--,--,--,--\n--,--,--,--,--,--,--,--\n--,--,--,--,--,--,--,--\n");
    let dests = MoveGen::destinations(&board, Square::new(0, 0));
    assert_eq!(dests.len(), 4);
    assert!(dests.contains(&Square::new(0, 2)));
    assert!(!dests.contains(&Square::new(0, 3)));
}

#[test]
fn test_capture_order_by_value() {
    let (_, board) = parse_board(
        "0w01b2
--,--,--,--,--
--,--,pb,--,--
--,nb,qw,qb,--
--,--,rb,--,--
--,--,--,--,--
",
    );
    let list = MoveGen::generate(&board, Color::White);
    let values: Vec<i32> = list.captures.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![9, 5, 3, 1]);
    assert_eq!(list.captures[0].0, Move::from(((2, 2), (2, 3))));

    let again = MoveGen::generate(&board, Color::White);
    assert_eq!(again.ordered(), list.ordered());
}

#[test]
fn test_ordering_promotions_first() {
    let (_, board) = parse_board("0w01b2\n--,--,--\nnw,pw,--\n--,--,rb\n");
    let ordered = MoveGen::generate(&board, Color::White).ordered();
    // push and capture onto the last row are both promotions
    assert_eq!(ordered[0], Move::from(((1, 1), (2, 1))));
    assert_eq!(ordered[1], Move::from(((1, 1), (2, 2))));
}

#[test]
fn test_pawn_diagonal_capture_two_by_two() {
    let (_, board) = parse_board("0w01b2\npw,--\n--,pb\n");
    let list = MoveGen::generate(&board, Color::White);
    let capture = Move::from(((0, 0), (1, 1)));
    assert!(list.promotions.contains(&capture));
    assert!(list.captures.is_empty());
    assert!(list.ordered().iter().all(|m| m.from == Square::new(0, 0)));
}

#[test]
fn test_pawn_no_capture_of_own_piece() {
    let (_, board) = parse_board("0w01b2\n--,pw,--\nnw,--,pb\n--,--,--\n");
    let list = MoveGen::piece_moves(&board, Square::new(0, 1));
    assert!(list.contains(Move::from(((0, 1), (1, 1)))));
    assert!(list.contains(Move::from(((0, 1), (1, 2)))));
    assert!(!list.contains(Move::from(((0, 1), (1, 0)))));
}

#[test]
fn test_team_predicate_protects_teammates() {
    let seq: PlayerSequence = "0w01b20y1".parse().unwrap();
    let (_, board) = parse_board("0w01b2\nrw,ky,--,kb\n--,--,--,--\n");
    let list = MoveGen::generate_with(&board, Color::White, |c| !seq.same_team(c, Color::White));
    assert!(list.captures.is_empty());

    let all_enemies = MoveGen::generate(&board, Color::White);
    assert_eq!(all_enemies.captures.len(), 1);
}

// ============================================================================
// Rule Validator Tests
// ============================================================================

#[test]
fn test_validator_accepts_generated_moves() {
    let (seq, board) = parse_board(MIDGAME);
    let white = MoveGen::generate(&board, Color::White).ordered();
    assert!(!white.is_empty());
    for mv in white {
        assert!(is_valid_move(&seq, mv, &board), "{} rejected", mv);
    }

    let black_seq = seq.advanced();
    let black_view = board.rotated(black_seq.mover().rotation);
    for mv in MoveGen::generate(&black_view, Color::Black).ordered() {
        assert!(is_valid_move(&black_seq, mv, &black_view), "{} rejected", mv);
    }
}

#[test]
fn test_validator_bounds_and_ownership() {
    let seq = white_first();
    let (_, board) = parse_board("0w01b2\npw,--\n--,pb\n");

    assert_eq!(
        check_move(&seq, Move::from(((0, 0), (-1, 0))), &board),
        Err(IllegalMove::OutOfBounds(Square::new(-1, 0)))
    );
    assert_eq!(
        check_move(&seq, Move::from(((0, 1), (1, 1))), &board),
        Err(IllegalMove::NoPiece(Square::new(0, 1)))
    );
    assert_eq!(
        check_move(&seq, Move::from(((1, 1), (0, 1))), &board),
        Err(IllegalMove::WrongColor {
            square: Square::new(1, 1),
            expected: Color::White,
            found: Color::Black,
        })
    );
}

#[test]
fn test_validator_pawn() {
    let seq = white_first();
    let (_, board) = parse_board("0w01b2\n--,pw,--\n--,pb,--\n--,--,--\n");
    // blocked straight ahead, no diagonal target
    assert!(!is_valid_move(&seq, Move::from(((0, 1), (1, 1))), &board));
    assert!(!is_valid_move(&seq, Move::from(((0, 1), (1, 2))), &board));
    assert!(!is_valid_move(&seq, Move::from(((0, 1), (2, 1))), &board));

    let (_, open) = parse_board("0w01b2\n--,pw,--\n--,--,pb\n--,--,--\n");
    assert!(is_valid_move(&seq, Move::from(((0, 1), (1, 1))), &open));
    assert!(is_valid_move(&seq, Move::from(((0, 1), (1, 2))), &open));
}

#[test]
fn test_validator_sliders() {
    let seq = white_first();
    let (_, board) = parse_board(
        "0w01b2
qw,--,--,--
--,--,--,--
pw,--,pb,--
--,--,--,--
",
    );
    let queen = Square::new(0, 0);
    assert!(is_valid_move(&seq, Move::new(queen, Square::new(2, 2)), &board));
    assert!(is_valid_move(&seq, Move::new(queen, Square::new(0, 3)), &board));
    assert!(is_valid_move(&seq, Move::new(queen, Square::new(1, 0)), &board));
    // own pawn in the way, own pawn as target, knight-like jump
    assert!(!is_valid_move(&seq, Move::new(queen, Square::new(3, 0)), &board));
    assert!(!is_valid_move(&seq, Move::new(queen, Square::new(2, 0)), &board));
    assert!(!is_valid_move(&seq, Move::new(queen, Square::new(2, 1)), &board));
    assert_eq!(
        check_move(&seq, Move::new(queen, queen), &board),
        Err(IllegalMove::Movement(Role::Queen))
    );
}

#[test]
fn test_validator_knight_and_king() {
    let seq = white_first();
    let (_, board) = parse_board("0w01b2\nnw,kw,--\n--,--,--\n--,pb,--\n");
    assert!(is_valid_move(&seq, Move::from(((0, 0), (2, 1))), &board));
    assert!(!is_valid_move(&seq, Move::from(((0, 0), (2, 2))), &board));
    assert!(is_valid_move(&seq, Move::from(((0, 1), (1, 2))), &board));
    assert!(!is_valid_move(&seq, Move::from(((0, 1), (0, 0))), &board));
    assert!(!is_valid_move(&seq, Move::from(((0, 1), (2, 1))), &board));
}

#[test]
fn test_validator_teams() {
    let seq: PlayerSequence = "0w01b20y1".parse().unwrap();
    let (_, board) = parse_board("0w01b2\nrw,ky,--,--\n--,--,--,--\nkb,--,--,--\nkr,--,--,--\n");
    assert_eq!(
        check_move(&seq, Move::from(((0, 0), (0, 1))), &board),
        Err(IllegalMove::Movement(Role::Rook))
    );
    assert!(is_valid_move(&seq, Move::from(((0, 0), (2, 0))), &board));

    let (_, open) = parse_board("0w01b2\nrw,ky,--,--\n--,--,--,--\n--,--,--,--\nkr,--,--,--\n");
    // red is not seated and can be captured
    assert!(is_valid_move(&seq, Move::from(((0, 0), (3, 0))), &open));
}

#[test]
fn test_moving_into_capture_is_legal() {
    let seq = white_first();
    let (_, board) = parse_board("0w01b2\nkw,--\n--,--\n--,rb\n");
    assert!(is_valid_move(&seq, Move::from(((0, 0), (0, 1))), &board));
}

#[test]
fn test_is_defeated() {
    let (_, board) = parse_board("0w01b2\nkw,pb\n");
    assert!(!is_defeated(Color::White, &board));
    assert!(is_defeated(Color::Black, &board));
}

// ============================================================================
// Evaluation Tests
// ============================================================================

#[test]
fn test_piece_values() {
    assert_eq!(piece_value(Role::Pawn), 1);
    assert_eq!(piece_value(Role::Knight), 3);
    assert_eq!(piece_value(Role::Bishop), 3);
    assert_eq!(piece_value(Role::Rook), 5);
    assert_eq!(piece_value(Role::Queen), 9);
    // the king outweighs a full army
    assert!(piece_value(Role::King) > material(&Layout::default().board, Color::White) - piece_value(Role::King));
}

#[test]
fn test_evaluate_material() {
    let seq = white_first();
    let mut board = Layout::default().board;
    assert_eq!(evaluate(&board, &seq, Color::White), 0);

    board.remove(Square::new(7, 4));
    assert_eq!(evaluate(&board, &seq, Color::White), 9);
    assert_eq!(evaluate(&board, &seq, Color::Black), -9);
}

#[test]
fn test_evaluate_teams() {
    let seq: PlayerSequence = "0w01b20y1".parse().unwrap();
    let mut board = Board::empty(2, 2);
    board.put(Square::new(0, 0), Piece::new(Role::Rook, Color::White));
    board.put(Square::new(0, 1), Piece::new(Role::Knight, Color::Yellow));
    board.put(Square::new(1, 0), Piece::new(Role::Queen, Color::Black));
    board.put(Square::new(1, 1), Piece::new(Role::Queen, Color::Red));
    assert_eq!(evaluate(&board, &seq, Color::White), 5 + 3 - 9);
}
