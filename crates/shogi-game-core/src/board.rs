//! 盤面（Board）
//!
//! 9x9 の `Option<Piece>` をそのまま保持する。`Board` は `Copy` なので、
//! 呼び出し側へ渡すときは常に複製になり、エンジン内部の盤面を外から書き換えることはできない。

use crate::types::{BOARD_SIZE, Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 段の漢数字（表示用）
const RANK_KANJI: [char; BOARD_SIZE] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 初期配置の最下段（左から）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::King,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
];

/// 盤面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// [row][col]
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 空の盤面
    pub const fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 平手の初期配置
    ///
    /// - 後手: row 0 に香桂銀金王金銀桂香、row 1 に角(col 1)・飛(col 7)、row 2 に歩
    /// - 先手: row 6 に歩、row 7 に飛(col 1)・角(col 7)、row 8 に香桂銀金王金銀桂香
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(kind, Color::Gote));
            board.squares[8][col] = Some(Piece::new(kind, Color::Sente));
        }
        board.squares[1][1] = Some(Piece::new(PieceType::Bishop, Color::Gote));
        board.squares[1][7] = Some(Piece::new(PieceType::Rook, Color::Gote));
        board.squares[7][1] = Some(Piece::new(PieceType::Rook, Color::Sente));
        board.squares[7][7] = Some(Piece::new(PieceType::Bishop, Color::Sente));
        for col in 0..BOARD_SIZE {
            board.squares[2][col] = Some(Piece::new(PieceType::Pawn, Color::Gote));
            board.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::Sente));
        }
        board
    }

    /// 指定マスの駒（盤外は None）
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if sq.is_on_board() {
            self.squares[sq.row as usize][sq.col as usize]
        } else {
            None
        }
    }

    /// 盤内かつ空きマスか
    #[inline]
    pub fn is_vacant(&self, sq: Square) -> bool {
        sq.is_on_board() && self.squares[sq.row as usize][sq.col as usize].is_none()
    }

    /// 駒を置く。元の駒を返す
    ///
    /// # Panics
    /// `sq` が盤外のとき
    pub fn put_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize].replace(piece)
    }

    /// 駒を取り除く。盤外なら何もしない
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        if sq.is_on_board() {
            self.squares[sq.row as usize][sq.col as usize].take()
        } else {
            None
        }
    }

    /// 盤上の全ての駒を row 優先で列挙
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|piece| (sq, piece)))
    }

    /// 指定した手番の駒を列挙
    pub fn pieces_of(&self, owner: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == owner)
    }

    /// 指定した筋に `owner` の未成の歩があるか（二歩判定）
    pub fn has_unpromoted_pawn(&self, col: u8, owner: Color) -> bool {
        (0..BOARD_SIZE as u8).any(|row| {
            matches!(
                self.piece_on(Square::new(row, col)),
                Some(Piece { kind: PieceType::Pawn, owner: o, promoted: false }) if o == owner
            )
        })
    }

    /// 盤上の駒数
    pub fn count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ９ ８ ７ ６ ５ ４ ３ ２ １")?;
        writeln!(f, "+---------------------------+")?;
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "|")?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, " ・")?,
                }
            }
            writeln!(f, "|{}", RANK_KANJI[row])?;
        }
        write!(f, "+---------------------------+")
    }
}
