use rotachess::core::{Layout, Move, PlayerSequence, Square};
use rotachess::engine::search::{SearchLimits, Searcher};
use std::time::{Duration, Instant};

fn load(text: &str) -> Layout {
    Layout::from_brd(text).unwrap()
}

fn search(layout: &Layout, budget: Duration) -> (Move, Searcher) {
    let mut searcher = Searcher::new(SearchLimits::with_budget(budget));
    let view = layout.board.rotated(layout.sequence.mover().rotation);
    let mv = searcher.search(&layout.sequence, &view);
    (mv, searcher)
}

#[test]
fn test_search_single_pawn_push() {
    let layout = load("0w01b2\npw\n--\npb\n");
    let (mv, searcher) = search(&layout, Duration::from_secs(1));
    assert_eq!(mv, Move::from(((0, 0), (1, 0))));
    // the game tree is two plies deep
    assert!(searcher.stats().exhausted);
    assert_eq!(searcher.stats().depth, 2);
}

#[test]
fn test_search_blocked_pawn_stays() {
    let layout = load("0w01b2\n--\npw\npb\n");
    let (mv, _) = search(&layout, Duration::from_secs(1));
    assert_eq!(mv, Move::from(((1, 0), (1, 0))));
}

#[test]
fn test_search_no_pieces() {
    let layout = load("0w01b2\n--,pb\n--,--\n");
    let (mv, _) = search(&layout, Duration::from_millis(100));
    assert_eq!(mv, Move::null(Square::new(0, 0)));
}

#[test]
fn test_search_queen_avoids_rook() {
    let layout = load("0w01b2\nqw\n--\n--\nrb\n");
    let (mv, _) = search(&layout, Duration::from_secs(3));
    assert_ne!(mv, Move::from(((0, 0), (2, 0))));
    assert_eq!(mv, Move::from(((0, 0), (3, 0))));
}

#[test]
fn test_search_takes_free_material() {
    let layout = load(
        "0w01b2
kw,--,--,--,--
--,--,--,--,--
--,nw,--,--,--
--,--,--,qb,--
--,--,--,--,kb
",
    );
    let (mv, _) = search(&layout, Duration::from_millis(300));
    assert_eq!(mv, Move::from(((2, 1), (3, 3))));
}

#[test]
fn test_search_black_to_move() {
    // black sees the board turned by half a turn
    let layout = load("0b21w0\npw\n--\n--\nrb\n");
    let (mv, _) = search(&layout, Duration::from_millis(300));
    assert_eq!(mv, Move::from(((0, 0), (3, 0))));
}

#[test]
fn test_search_respects_budget() {
    let layout = Layout::default();
    let budget = Duration::from_millis(300);
    let start = Instant::now();
    let (mv, searcher) = search(&layout, budget);
    let elapsed = start.elapsed();

    assert!(elapsed < budget + Duration::from_millis(150), "took {:?}", elapsed);
    assert!(searcher.stats().depth >= 1);
    assert!(searcher.stats().nodes > 0);
    assert!(!mv.is_null());
}

#[test]
fn test_search_depth_limit() {
    let layout = Layout::default();
    let limits = SearchLimits {
        max_depth: 2,
        ..SearchLimits::with_budget(Duration::from_secs(5))
    };
    let mut searcher = Searcher::new(limits);
    let start = Instant::now();
    searcher.search(&layout.sequence, &layout.board);
    assert_eq!(searcher.stats().depth, 2);
    assert!(!searcher.stats().exhausted);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_king_safety_filters_exposed_squares() {
    let layout = load("0w01b2\nkw,--,--\n--,--,--\n--,rb,--\n");
    let limits = SearchLimits {
        king_safety: true,
        ..SearchLimits::with_budget(Duration::from_millis(200))
    };
    let mut searcher = Searcher::new(limits);
    let mv = searcher.search(&layout.sequence, &layout.board);
    assert_eq!(mv, Move::from(((0, 0), (1, 0))));
}

#[test]
fn test_search_does_not_touch_input() {
    let layout = Layout::default();
    let sequence: PlayerSequence = layout.sequence.clone();
    let board = layout.board.clone();
    let mut searcher = Searcher::new(SearchLimits::with_budget(Duration::from_millis(100)));
    searcher.search(&sequence, &board);
    assert_eq!(board, layout.board);
}
