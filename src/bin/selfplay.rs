use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use chess::moves::FixedPromotion;
use chess::notation::format_move;
use chess::rules::{is_capture, legal_destinations};
use chess::{Board, Color, Game, PieceType, Position};

/// Plays random moves through the full notation pipeline: every move is
/// written out as text, parsed, resolved and applied, and the board is
/// checked after each ply.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of plies to play
    #[arg(short, long, default_value = "200")]
    plies: u32,

    /// Seed for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log every ply
    #[arg(short, long)]
    verbose: bool,
}

const PROMOTIONS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Every move available to `color`, already written as notation.
fn candidate_moves(board: &Board, color: Color, rng: &mut StdRng) -> Vec<String> {
    let mut out = Vec::new();
    for piece in board.pieces().filter(|p| p.color == color) {
        for to in legal_destinations(board, &piece) {
            let promotion = (piece.piece_type == PieceType::Pawn
                && to.rank() == color.promotion_rank())
            .then(|| PROMOTIONS[rng.gen_range(0..PROMOTIONS.len())]);
            out.push(format_move(
                piece.piece_type,
                Some(piece.position),
                to,
                is_capture(board, to, color),
                promotion,
            ));
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    let mut rejected = 0u32;

    while game.ply() < args.plies {
        let moves = candidate_moves(game.board(), game.side_to_move(), &mut rng);
        let Some(text) = moves.choose(&mut rng) else {
            log::warn!("{:?} has no moves left", game.side_to_move());
            break;
        };
        if let Err(e) = game.play(text, &mut FixedPromotion(PieceType::Queen)) {
            // Unreachable in practice: the piece that produced the text can make it.
            log::warn!("{text}: {e}");
            rejected += 1;
            if rejected > args.plies {
                anyhow::bail!("too many rejected moves (seed {seed})");
            }
        }
    }

    println!("{}", game.board());
    println!(
        "seed {seed}: {} plies, {rejected} rejected, score White {} - Black {}",
        game.ply(),
        game.score(Color::White),
        game.score(Color::Black)
    );
    let kings: usize = [Color::White, Color::Black]
        .iter()
        .map(|&c| game.board().find_kings(c).len())
        .sum();
    let occupied = Position::all().filter(|&sq| !game.board().is_empty(sq)).count();
    println!("{occupied} pieces on the board, {kings} kings");
    Ok(())
}
