use std::io::{self, BufRead, Write};

use clap::Parser;

use chess::error::MoveError;
use chess::moves::{FixedPromotion, PromotionChooser};
use chess::notation::promotion_choice;
use chess::render::snapshot_json;
use chess::{Color, Game, PieceType};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-player chess driven by algebraic notation", long_about = None)]
struct Args {
    /// Print JSON snapshots instead of the text board
    #[arg(long)]
    json: bool,

    /// Log every ply and every rejected move
    #[arg(short, long)]
    verbose: bool,

    /// Piece to promote to when a scripted move has no `=X` suffix
    #[arg(long, default_value = "Q", value_parser = parse_promotion)]
    promote: PieceType,

    /// Play these moves in order and exit instead of reading stdin
    moves: Vec<String>,
}

fn parse_promotion(s: &str) -> Result<PieceType, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => promotion_choice(c).map_err(|e| e.to_string()),
        _ => Err(format!("expected one of Q, R, B, N, got {s:?}")),
    }
}

/// Asks on stdin until it gets a single valid letter.
struct StdinPromotion;

impl PromotionChooser for StdinPromotion {
    fn choose(&mut self, color: Color) -> chess::error::Result<PieceType> {
        let stdin = io::stdin();
        loop {
            print!("{color:?} promotes to (Q, R, B, N): ");
            io::stdout().flush().ok();

            let mut line = String::new();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .map_err(|e| MoveError::InvalidPromotionChoice(e.to_string()))?;
            if read == 0 {
                return Err(MoveError::InvalidPromotionChoice("input closed".to_string()));
            }
            match parse_promotion(line.trim()) {
                Ok(piece_type) => return Ok(piece_type),
                Err(e) => println!("{e}"),
            }
        }
    }
}

fn show(game: &Game, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", snapshot_json(game)?);
    } else {
        println!("{}", game.board());
        println!(
            "White {} - Black {}",
            game.score(Color::White),
            game.score(Color::Black)
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut game = Game::new();

    if !args.moves.is_empty() {
        let mut chooser = FixedPromotion(args.promote);
        let applied = game.run(&args.moves, &mut chooser, |game, outcome| {
            if let Err(e) = outcome {
                eprintln!("ply {}: {e}", game.ply() + 1);
            }
        });
        log::info!("applied {applied} of {} scripted moves", args.moves.len());
        return show(&game, args.json);
    }

    println!("notation chess (built {})", env!("BUILD_TIMESTAMP"));
    println!("Enter moves in algebraic notation (e.g. e4, Nf3, O-O, e8=Q)");
    println!("Type 'quit' to exit");
    show(&game, args.json)?;

    let stdin = io::stdin();
    loop {
        match game.side_to_move() {
            Color::White => println!("\nwhite's turn"),
            Color::Black => println!("\nblack's turn"),
        }
        print!("move: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text == "quit" {
            break;
        }
        match game.play(text, &mut StdinPromotion) {
            Ok(_) => show(&game, args.json)?,
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
