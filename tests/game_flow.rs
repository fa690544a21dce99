use kingfall_chess::{
    algebraic_to_index, Board, Color, Game, GameConfig, GameOutcome, GameResult, MoveError, MoveReport, Piece,
    PieceKind, WinReason,
};

fn sq(name: &str) -> u8 {
    algebraic_to_index(name).unwrap()
}

/// Plays a move given as physical squares, the way a presenter would.
fn play(game: &mut Game, from: &str, to: &str) -> Result<MoveReport, MoveError> {
    let kind = game.board().piece_at(sq(from)).map(|p| p.kind).unwrap_or(PieceKind::Pawn);
    let (start, target) = (game.to_active(sq(from)), game.to_active(sq(to)));
    game.attempt_move(kind, start, target)
}

fn game_from(layout: &str, side_to_move: Color) -> Game {
    let board = Board::from_layout(layout).expect("valid layout");
    Game::from_position(board, side_to_move, &GameConfig::default())
}

#[test]
fn double_push_ignores_the_skipped_square() {
    // Active 12 -> 28 for White is d2 -> d4; active 20 is d3.
    let mut board = Board::standard();
    board.place(sq("d3"), Piece::new(PieceKind::Knight, Color::Black));
    let mut game = Game::from_position(board, Color::White, &GameConfig::default());
    assert_eq!(game.to_physical(12), sq("d2"));
    assert_eq!(game.to_physical(20), sq("d3"));

    let report = game.attempt_move(PieceKind::Pawn, 12, 28).unwrap();
    assert_eq!(report.captured, None);
    assert_eq!(game.board().piece_at(sq("d4")).map(|p| p.kind), Some(PieceKind::Pawn));
}

#[test]
fn knight_jumps_w_plus_two_over_a_crowded_rank() {
    // Active 1 -> 11 for White is g1 -> e2, with f1 and f2 still occupied.
    let mut board = Board::standard();
    board.clear(sq("e2"));
    let mut game = Game::from_position(board, Color::White, &GameConfig::default());
    assert!(game.board().piece_at(sq("f1")).is_some());
    assert!(game.board().piece_at(sq("f2")).is_some());

    game.attempt_move(PieceKind::Knight, 1, 11).unwrap();
    assert_eq!(game.board().piece_at(sq("e2")).map(|p| p.kind), Some(PieceKind::Knight));
}

#[test]
fn castling_on_a_constructed_board() {
    // Black moves in the identity space, so active indices equal physical ones.
    let mut board = Board::empty();
    board.place(60, Piece::new(PieceKind::King, Color::Black));
    board.place(63, Piece::new(PieceKind::Rook, Color::Black));
    board.place(4, Piece::new(PieceKind::King, Color::White));
    let mut game = Game::from_position(board, Color::Black, &GameConfig::default());

    let report = game.attempt_move(PieceKind::King, 60, 62).unwrap();
    assert!(report.castled);
    assert_eq!(report.outcome, GameOutcome::Continue);

    let king = game.board().piece_at(62).unwrap();
    let rook = game.board().piece_at(61).unwrap();
    assert_eq!((king.kind, rook.kind), (PieceKind::King, PieceKind::Rook));
    assert!(king.has_moved && rook.has_moved);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn queenside_castle_ignores_a_knight_beside_the_rook() {
    let mut board = Board::empty();
    board.place(4, Piece::new(PieceKind::King, Color::Black));
    board.place(0, Piece::new(PieceKind::Rook, Color::Black));
    board.place(1, Piece::new(PieceKind::Knight, Color::Black));
    board.place(60, Piece::new(PieceKind::King, Color::White));
    let mut game = Game::from_position(board, Color::Black, &GameConfig::default());

    let report = game.attempt_move(PieceKind::King, 4, 2).unwrap();
    assert!(report.castled);
    assert_eq!(game.board().piece_at(2).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board().piece_at(3).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(game.board().piece_at(1).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(game.history()[0].notation, "O-O-O");
}

#[test]
fn castling_is_refused_after_the_rook_has_moved() {
    let mut game = Game::initialize();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4"), ("g8", "f6")] {
        play(&mut game, from, to).unwrap();
    }
    // Rook steps out and back, then the king may no longer castle on that side.
    play(&mut game, "h1", "g1").unwrap();
    play(&mut game, "f8", "e7").unwrap();
    play(&mut game, "g1", "h1").unwrap();
    play(&mut game, "e8", "f8").unwrap();
    let err = play(&mut game, "e1", "g1").unwrap_err();
    assert!(matches!(err, MoveError::IllegalMove { kind: PieceKind::King, .. }));
}

#[test]
fn white_castles_kingside_from_the_opening() {
    let mut game = Game::initialize();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4"), ("g8", "f6")] {
        play(&mut game, from, to).unwrap();
    }
    let report = play(&mut game, "e1", "g1").unwrap();
    assert!(report.castled);
    assert_eq!(game.board().piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board().piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(game.board().piece_at(sq("h1")).is_none());
    assert_eq!(game.history().last().unwrap().notation, "O-O");

    // Black answers with the same castle from its own side of the board.
    play(&mut game, "f8", "e7").unwrap();
    play(&mut game, "d2", "d3").unwrap();
    let report = play(&mut game, "e8", "g8").unwrap();
    assert!(report.castled);
    assert_eq!(game.board().piece_at(sq("f8")).map(|p| p.kind), Some(PieceKind::Rook));
}

#[test]
fn removing_the_black_king_ends_the_game() {
    let mut board = Board::standard();
    board.clear(sq("e8"));
    let mut game = Game::from_position(board, Color::White, &GameConfig::default());

    assert_eq!(game.evaluate_outcome(), GameOutcome::WhiteWins);
    let before = game.board().clone();
    assert_eq!(play(&mut game, "e2", "e4").unwrap_err(), MoveError::GameAlreadyOver);
    assert_eq!(game.board(), &before);
}

#[test]
fn taking_the_king_wins_and_freezes_the_game() {
    let mut game = Game::initialize();
    play(&mut game, "e2", "e4").unwrap();
    play(&mut game, "a7", "a6").unwrap();
    play(&mut game, "d1", "h5").unwrap();
    play(&mut game, "a6", "a5").unwrap();
    let report = play(&mut game, "h5", "f7").unwrap();
    assert_eq!(report.captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
    play(&mut game, "a5", "a4").unwrap();

    let report = play(&mut game, "f7", "e8").unwrap();
    assert_eq!(report.captured.map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(report.outcome, GameOutcome::WhiteWins);
    assert_eq!(game.result(), Some(GameResult { winner: Color::White, reason: WinReason::KingCaptured }));
    // The winning move does not hand the turn over.
    assert_eq!(game.side_to_move(), Color::White);
    assert!(!game.clock().is_running());

    let before = game.board().clone();
    assert_eq!(play(&mut game, "e4", "e5").unwrap_err(), MoveError::GameAlreadyOver);
    assert_eq!(play(&mut game, "b8", "c6").unwrap_err(), MoveError::GameAlreadyOver);
    assert_eq!(game.board(), &before);

    let trophies: Vec<PieceKind> = game.captured_by(Color::White).iter().map(|p| p.kind).collect();
    assert_eq!(trophies, vec![PieceKind::Pawn, PieceKind::King]);
}

#[test]
fn promotion_with_capture_on_the_far_rank() {
    let mut game = game_from(
        "k..r.... ....P... ........ ........ ........ ........ ........ ....K...",
        Color::White,
    );
    let report = play(&mut game, "e7", "d8").unwrap();
    assert!(report.promoted);
    assert_eq!(report.captured.map(|p| p.kind), Some(PieceKind::Rook));

    let queen = game.board().piece_at(sq("d8")).unwrap();
    assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
    assert!(queen.has_moved);
    assert_eq!(game.history()[0].notation, "e7d8=Q");
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn any_pawn_move_onto_a_back_rank_promotes() {
    // Even a step backwards onto its own first rank.
    let mut game = game_from(
        "k....... ........ ........ ........ ........ ........ ..P..... ....K...",
        Color::White,
    );
    let report = play(&mut game, "c2", "c1").unwrap();
    assert!(report.promoted);
    assert_eq!(game.board().piece_at(sq("c1")).map(|p| p.kind), Some(PieceKind::Queen));
}

#[test]
fn black_pawns_push_forward_in_their_own_space() {
    let mut game = Game::initialize();
    play(&mut game, "e2", "e4").unwrap();
    // Black's e7 is active 12 and e5 is active 28.
    assert_eq!(game.to_active(sq("e7")), 12);
    game.attempt_move(PieceKind::Pawn, 12, 28).unwrap();
    assert_eq!(game.board().piece_at(sq("e5")).map(|p| p.color), Some(Color::Black));
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn shared_clock_blames_whoever_is_on_move() {
    let mut game = Game::initialize();
    play(&mut game, "e2", "e4").unwrap();
    let mut last = game.tick();
    for _ in 1..600 {
        last = game.tick();
    }
    assert!(last.expired);
    assert_eq!(last.remaining.total_seconds(), 0);
    assert_eq!(last.loser, Some(Color::Black));
    assert_eq!(game.result(), Some(GameResult { winner: Color::White, reason: WinReason::Timeout }));
    assert_eq!(play(&mut game, "e7", "e5").unwrap_err(), MoveError::GameAlreadyOver);
}

#[test]
fn summary_is_written_as_json() {
    let mut game = Game::initialize();
    play(&mut game, "e2", "e4").unwrap();
    let path = std::env::temp_dir().join(format!("kingfall_summary_{}.json", std::process::id()));
    game.save_summary_to_file(&path).unwrap();

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["moves"][0]["notation"], "e2e4");
    assert_eq!(written["completed_turns"], 1);
    std::fs::remove_file(&path).ok();
}
