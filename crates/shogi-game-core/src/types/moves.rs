//! 指し手の起点（MoveOrigin）と移動候補（MoveCandidate）

use super::{Color, PieceType, Square};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// 移動候補のリスト
///
/// 盤上の駒は最大でも 20 手程度なのでヒープ確保を避ける。打ち駒の候補は溢れてヒープに載る。
pub type MoveList = SmallVec<[MoveCandidate; 32]>;

/// 指し手の起点: 盤上の座標か、持ち駒の指定
///
/// JSON では Web クライアントと同じ形を使う:
/// - 盤上: `{"row": 6, "col": 0}`
/// - 持ち駒: `{"hand": true, "owner": "sente", "pieceType": "歩"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OriginRepr", into = "OriginRepr")]
pub enum MoveOrigin {
    Board(Square),
    Hand { owner: Color, piece_type: PieceType },
}

impl MoveOrigin {
    #[inline]
    pub const fn board(row: u8, col: u8) -> Self {
        MoveOrigin::Board(Square::new(row, col))
    }

    #[inline]
    pub const fn hand(owner: Color, piece_type: PieceType) -> Self {
        MoveOrigin::Hand { owner, piece_type }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, MoveOrigin::Hand { .. })
    }

}

impl From<Square> for MoveOrigin {
    fn from(sq: Square) -> Self {
        MoveOrigin::Board(sq)
    }
}

impl fmt::Display for MoveOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOrigin::Board(sq) => write!(f, "{sq}"),
            MoveOrigin::Hand { owner, piece_type } => write!(f, "{owner} hand {piece_type}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OriginRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    col: Option<u8>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    hand: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    piece_type: Option<PieceType>,
}

impl TryFrom<OriginRepr> for MoveOrigin {
    type Error = String;

    fn try_from(repr: OriginRepr) -> Result<Self, Self::Error> {
        if repr.hand {
            match (repr.owner, repr.piece_type) {
                (Some(owner), Some(piece_type)) => Ok(MoveOrigin::Hand { owner, piece_type }),
                _ => Err("hand origin requires owner and pieceType".to_string()),
            }
        } else {
            match (repr.row, repr.col) {
                (Some(row), Some(col)) => Ok(MoveOrigin::Board(Square::new(row, col))),
                _ => Err("board origin requires row and col".to_string()),
            }
        }
    }
}

impl From<MoveOrigin> for OriginRepr {
    fn from(origin: MoveOrigin) -> Self {
        match origin {
            MoveOrigin::Board(sq) => OriginRepr {
                row: Some(sq.row),
                col: Some(sq.col),
                hand: false,
                owner: None,
                piece_type: None,
            },
            MoveOrigin::Hand { owner, piece_type } => OriginRepr {
                row: None,
                col: None,
                hand: true,
                owner: Some(owner),
                piece_type: Some(piece_type),
            },
        }
    }
}

/// 移動候補（getAvailableMoves の1要素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCandidate {
    pub from: MoveOrigin,
    pub to: Square,
    /// この移動で成りを選べるか（打ち駒は常に false）
    pub can_promote: bool,
}
