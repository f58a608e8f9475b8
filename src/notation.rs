// =============================================================================
// Algebraic notation
//
// Two grammars are recognised:
//
//   normal     [KQRBN]? [a-h]? [1-8]? x? [a-h][1-8] (=[QRBN])?
//   castle     [O0](-[O0]){1,2}
//
// Piece and promotion letters are case-insensitive, except that a leading
// lowercase `b` always names the b-file. Squares and the capture marker are
// lowercase only. Trailing annotation marks (+ # ! ?) are ignored. The whole
// string must match; nothing is skipped.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::{file_index, rank_index, Position};
use crate::error::{MoveError, Result};
use crate::piece::{Color, PieceType};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Castle,
    Promotion,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// File the king lands on.
    pub fn king_file(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    pub fn rook_file(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }
}

/// Origin hint written before the destination, e.g. the `b` in `Nbd7`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Disambiguator {
    File(u8),
    Rank(u8),
    Square(Position),
}

impl Disambiguator {
    pub fn matches(self, position: Position) -> bool {
        match self {
            Disambiguator::File(file) => position.file() == file,
            Disambiguator::Rank(rank) => position.rank() == rank,
            Disambiguator::Square(square) => position == square,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Target {
    Square(Position),
    Castle(CastleSide),
}

/// What a move string asks for, before looking at the board.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    pub piece_type: PieceType,
    pub target: Target,
    pub disambiguator: Option<Disambiguator>,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
    pub explicit_capture: bool,
}

impl MoveIntent {
    /// Destination square for the side to move. Castling lands the king on
    /// the g- or c-file of its home rank.
    pub fn target_square(&self, color: Color) -> Position {
        match self.target {
            Target::Square(square) => square,
            Target::Castle(side) => Position::new(side.king_file(), color.home_rank())
                .expect("castle target lies on the board"),
        }
    }
}

/// Pieces of a string that matched the normal grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NormalParts {
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
    promotion: Option<char>,
}

fn clean(text: &str) -> &str {
    text.trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_piece_letter(c: char) -> bool {
    matches!(c, 'K' | 'Q' | 'R' | 'B' | 'N' | 'k' | 'q' | 'r' | 'n')
}

fn is_promotion_letter(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'Q' | 'R' | 'B' | 'N')
}

fn scan_normal(text: &str) -> Option<NormalParts> {
    let chars: Vec<char> = text.chars().collect();
    let mut end = chars.len();

    let mut promotion = None;
    if end >= 2 && chars[end - 2] == '=' {
        let letter = chars[end - 1];
        if !is_promotion_letter(letter) {
            return None;
        }
        promotion = Some(letter);
        end -= 2;
    }

    if end < 2 {
        return None;
    }
    Position::from_chars(chars[end - 2], chars[end - 1])?;
    end -= 2;

    let mut prefix = &chars[..end];
    let capture = prefix.last() == Some(&'x');
    if capture {
        prefix = &prefix[..prefix.len() - 1];
    }

    let mut i = 0;
    if prefix.first().map(|&c| is_piece_letter(c)).unwrap_or(false) {
        i += 1;
    }
    let from_file = prefix.get(i).and_then(|&c| file_index(c));
    if from_file.is_some() {
        i += 1;
    }
    let from_rank = prefix.get(i).and_then(|&c| rank_index(c));
    if from_rank.is_some() {
        i += 1;
    }
    if i != prefix.len() {
        return None;
    }

    Some(NormalParts {
        from_file,
        from_rank,
        capture,
        promotion,
    })
}

fn scan_castle(text: &str) -> Option<CastleSide> {
    let is_o = |c: char| c == 'O' || c == '0';
    let mut chars = text.chars();
    if !chars.next().map(is_o).unwrap_or(false) {
        return None;
    }

    let mut hops = 0;
    loop {
        match chars.next() {
            None => break,
            Some('-') => match chars.next() {
                Some(c) if is_o(c) => hops += 1,
                _ => return None,
            },
            Some(_) => return None,
        }
    }

    match hops {
        1 => Some(CastleSide::King),
        2 => Some(CastleSide::Queen),
        _ => None,
    }
}

/// Cheap gate for interactive input: does the text match either grammar?
pub fn is_well_formed(text: &str) -> bool {
    let text = clean(text);
    scan_normal(text).is_some() || scan_castle(text).is_some()
}

pub fn classify_move_type(text: &str) -> Result<MoveType> {
    let text = clean(text);
    if let Some(parts) = scan_normal(text) {
        return Ok(if parts.promotion.is_some() {
            MoveType::Promotion
        } else {
            MoveType::Normal
        });
    }
    if scan_castle(text).is_some() {
        return Ok(MoveType::Castle);
    }
    Err(MoveError::InvalidNotation(text.to_string()))
}

/// The last file-letter + rank-digit pair in the text.
pub fn extract_target_square(text: &str) -> Result<Position> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(2)
        .rev()
        .find_map(|pair| Position::from_chars(pair[0], pair[1]))
        .ok_or_else(|| MoveError::InvalidNotation(format!("no destination square in {text:?}")))
}

/// Origin hint for normal moves. Promotions and castles never carry one.
pub fn extract_disambiguator(text: &str, move_type: MoveType) -> Option<Disambiguator> {
    if move_type != MoveType::Normal {
        return None;
    }
    let parts = scan_normal(clean(text))?;
    match (parts.from_file, parts.from_rank) {
        (Some(file), Some(rank)) => Position::new(file, rank).map(Disambiguator::Square),
        (Some(file), None) => Some(Disambiguator::File(file)),
        (None, Some(rank)) => Some(Disambiguator::Rank(rank)),
        (None, None) => None,
    }
}

/// The kind of piece that moves. For a promotion this is the pawn, not the
/// piece it becomes.
pub fn extract_piece_type(text: &str, move_type: MoveType) -> Result<PieceType> {
    match move_type {
        MoveType::Castle => return Ok(PieceType::King),
        MoveType::Promotion => return Ok(PieceType::Pawn),
        MoveType::Normal => {}
    }

    let text = clean(text);
    match text.chars().next() {
        Some(c) if file_index(c).is_some() => Ok(PieceType::Pawn),
        Some(c) if is_piece_letter(c) => PieceType::from_letter(c)
            .ok_or_else(|| MoveError::InvalidNotation(text.to_string())),
        Some(c) => Err(MoveError::InvalidNotation(format!(
            "unknown piece letter {c:?} in {text:?}"
        ))),
        None => Err(MoveError::InvalidNotation("empty move".to_string())),
    }
}

/// Validates a promotion letter: only Q, R, B and N (either case).
pub fn promotion_choice(letter: char) -> Result<PieceType> {
    match PieceType::from_letter(letter) {
        Some(piece_type) if piece_type.is_promotion_target() => Ok(piece_type),
        _ => Err(MoveError::InvalidPromotionChoice(format!(
            "cannot promote to {letter:?}, choose one of Q, R, B, N"
        ))),
    }
}

/// The piece named after `=`, if the text has a promotion suffix.
pub fn extract_promotion_kind(text: &str) -> Result<Option<PieceType>> {
    let text = clean(text);
    let Some(at) = text.rfind('=') else {
        return Ok(None);
    };
    match text[at + 1..].chars().next() {
        Some(letter) => promotion_choice(letter).map(Some),
        None => Err(MoveError::InvalidNotation(format!(
            "missing promotion piece in {text:?}"
        ))),
    }
}

/// Full structural parse of one move string.
pub fn parse(text: &str) -> Result<MoveIntent> {
    let text = clean(text);
    let promotion = extract_promotion_kind(text)?;
    let move_type = classify_move_type(text)?;
    let piece_type = extract_piece_type(text, move_type)?;

    let (target, explicit_capture) = match move_type {
        MoveType::Castle => {
            let side = scan_castle(text)
                .ok_or_else(|| MoveError::InvalidNotation(text.to_string()))?;
            (Target::Castle(side), false)
        }
        MoveType::Normal | MoveType::Promotion => {
            let capture = scan_normal(text).map(|p| p.capture).unwrap_or(false);
            (Target::Square(extract_target_square(text)?), capture)
        }
    };

    let intent = MoveIntent {
        piece_type,
        target,
        disambiguator: extract_disambiguator(text, move_type),
        move_type,
        promotion,
        explicit_capture,
    };
    log::debug!("parsed {text:?} as {intent:?}");
    Ok(intent)
}

/// Writes a move in this module's grammar. With `from` given the full origin
/// square is spelled out, so the text names exactly one piece. A pawn capture
/// without an origin drops the `x`: the grammar needs a file before it, and
/// the board decides whether a move captures.
pub fn format_move(
    piece_type: PieceType,
    from: Option<Position>,
    to: Position,
    capture: bool,
    promotion: Option<PieceType>,
) -> String {
    let mut out = String::new();
    if piece_type != PieceType::Pawn {
        out.push(piece_type.letter());
    }
    if let Some(from) = from {
        out.push_str(&from.to_string());
    }
    if capture && (piece_type != PieceType::Pawn || from.is_some()) {
        out.push('x');
    }
    out.push_str(&to.to_string());
    if let Some(promo) = promotion {
        out.push('=');
        out.push(promo.letter());
    }
    out
}
