use pretty_assertions::assert_eq;

use chess::moves::FixedPromotion;
use chess::notation::{self, format_move, is_well_formed, MoveType, Target};
use chess::rules::{is_capture, legal_destinations};
use chess::{Board, Color, Game, MoveError, Piece, PieceType, Position};

fn sq(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

fn queen() -> FixedPromotion {
    FixedPromotion(PieceType::Queen)
}

#[test]
fn e4_from_the_opening() {
    let intent = notation::parse("e4").unwrap();
    assert_eq!(intent.move_type, MoveType::Normal);
    assert_eq!(intent.piece_type, PieceType::Pawn);
    assert_eq!(intent.target, Target::Square(Position::new(4, 3).unwrap()));

    let mut game = Game::new();
    let applied = game.play("e4", &mut queen()).unwrap();
    assert_eq!(applied.from, Position::new(4, 1).unwrap());

    let board = game.board();
    assert!(board.is_empty(Position::new(4, 1).unwrap()));
    let pawn = board.get(Position::new(4, 3).unwrap()).unwrap();
    assert_eq!(pawn.piece_type, PieceType::Pawn);
    assert_eq!(pawn.color, Color::White);
    assert!(pawn.has_moved);
}

#[test]
fn nf3_moves_the_kingside_knight() {
    let mut game = Game::new();
    let applied = game.play("Nf3", &mut queen()).unwrap();
    assert_eq!(applied.piece_type, PieceType::Knight);
    assert_eq!(applied.from, Position::new(6, 0).unwrap());
    assert_eq!(applied.to, Position::new(5, 2).unwrap());
    assert!(game.board().is_empty(sq("g1")));
    assert_eq!(game.board().get(sq("b1")).unwrap().piece_type, PieceType::Knight);
}

#[test]
fn castle_parses_as_king_move() {
    assert_eq!(notation::classify_move_type("O-O").unwrap(), MoveType::Castle);
    assert_eq!(
        notation::extract_piece_type("O-O", MoveType::Castle).unwrap(),
        PieceType::King
    );
}

#[test]
fn e8_promotes_to_queen() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::Pawn, Color::White, Position::new(4, 6).unwrap()));
    board.place(Piece::new(PieceType::King, Color::White, sq("a1")));
    board.place(Piece::new(PieceType::King, Color::Black, sq("h1")));
    let mut game = Game::from_board(board, Color::White);

    let intent = notation::parse("e8=Q").unwrap();
    assert_eq!(intent.move_type, MoveType::Promotion);
    assert_eq!(intent.promotion, Some(PieceType::Queen));

    game.play("e8=Q", &mut FixedPromotion(PieceType::Knight)).unwrap();
    let promoted = game.board().get(Position::new(4, 7).unwrap()).unwrap();
    assert_eq!(promoted.piece_type, PieceType::Queen);
    assert_eq!(promoted.color, Color::White);
}

#[test]
fn promotion_without_suffix_asks_the_chooser() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::Pawn, Color::Black, sq("c2")));
    board.place(Piece::new(PieceType::King, Color::White, sq("h8")));
    board.place(Piece::new(PieceType::King, Color::Black, sq("h6")));
    let mut game = Game::from_board(board, Color::Black);

    game.play("c1", &mut FixedPromotion(PieceType::Rook)).unwrap();
    assert_eq!(game.board().get(sq("c1")).unwrap().symbol(), 'r');
}

#[test]
fn bishop_capture_off_the_diagonal_fails() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::Bishop, Color::White, Position::new(2, 0).unwrap()));
    board.place(Piece::new(PieceType::Pawn, Color::Black, Position::new(5, 6).unwrap()));
    let mut game = Game::from_board(board.clone(), Color::White);

    let intent = notation::parse("Bxf7").unwrap();
    assert!(intent.explicit_capture);
    assert_eq!(intent.piece_type, PieceType::Bishop);

    let err = game.play("Bxf7", &mut queen()).unwrap_err();
    assert!(matches!(err, MoveError::NoCandidatePiece { .. }));
    assert_eq!(game.board(), &board);
}

#[test]
fn malformed_text_is_rejected_without_change() {
    assert!(!is_well_formed("z9"));
    let mut game = Game::new();
    let before = game.board().clone();
    assert!(matches!(
        game.play("z9", &mut queen()),
        Err(MoveError::InvalidNotation(_))
    ));
    assert_eq!(game.board(), &before);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn double_step_is_gone_after_first_move() {
    let mut game = Game::new();
    game.run(["a3", "h6"], &mut queen(), |_, outcome| assert!(outcome.is_ok()));
    assert!(game.play("a5", &mut queen()).is_err());
    assert!(game.play("a4", &mut queen()).is_ok());
}

#[test]
fn sliding_pieces_jump_over_pieces() {
    // Rook on a1 reaches a6 through its own pawn on a2.
    let mut game = Game::new();
    game.play("Ra6", &mut queen()).unwrap();
    assert_eq!(game.board().get(sq("a6")).unwrap().piece_type, PieceType::Rook);
}

#[test]
fn pawns_may_step_backwards() {
    let mut game = Game::new();
    game.run(["e4", "e5", "e3"], &mut queen(), |_, outcome| assert!(outcome.is_ok()));
    assert_eq!(game.board().get(sq("e3")).unwrap().color, Color::White);
}

#[test]
fn ambiguous_notation_takes_first_in_scan_order() {
    // Knights on b1 and f1 both reach d2; b1 is scanned first.
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::Knight, Color::White, sq("b1")));
    board.place(Piece::new(PieceType::Knight, Color::White, sq("f1")));
    let mut game = Game::from_board(board, Color::White);
    let applied = game.play("Nd2", &mut queen()).unwrap();
    assert_eq!(applied.from, sq("b1"));
}

#[test]
fn king_cannot_step_next_to_enemy_king() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::King, Color::White, sq("d4")));
    board.place(Piece::new(PieceType::King, Color::Black, sq("f4")));
    let mut game = Game::from_board(board, Color::White);
    assert!(game.play("Ke4", &mut queen()).is_err());
    assert!(game.play("Kc4", &mut queen()).is_ok());
}

#[test]
fn long_game_keeps_board_consistent() {
    let mut game = Game::new();
    for _ in 0..120 {
        let color = game.side_to_move();
        let board = game.board().clone();
        // Last piece in scan order that has somewhere to go, to its last square.
        let choice = board
            .pieces()
            .filter(|p| p.color == color)
            .filter_map(|p| legal_destinations(&board, &p).last().map(|&to| (p, to)))
            .last();
        let Some((piece, to)) = choice else { break };

        let text = format_move(
            piece.piece_type,
            Some(piece.position),
            to,
            is_capture(&board, to, color),
            None,
        );
        game.play(&text, &mut queen()).unwrap();

        let board = game.board();
        board.assert_consistent();
        for square in Position::all() {
            if let Some(p) = board.get(square) {
                assert_eq!(p.position, square);
            }
        }
        assert!(board.pieces().count() <= 32);
    }
    assert!(game.ply() > 0);
}
