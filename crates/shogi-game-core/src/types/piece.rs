//! 駒種（PieceType）と駒（Piece）

use super::Color;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 駒種（成りは `Piece::promoted` で表すため 8 種類）
///
/// JSON では保存済みの対局データと同じく漢字一文字で表現する。
/// 入力時は USI の英字表記（`K` `R` `B` `G` `S` `N` `L` `P`）も受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    #[serde(rename = "王", alias = "玉", alias = "K")]
    King = 0,
    #[serde(rename = "飛", alias = "R")]
    Rook = 1,
    #[serde(rename = "角", alias = "B")]
    Bishop = 2,
    #[serde(rename = "金", alias = "G")]
    Gold = 3,
    #[serde(rename = "銀", alias = "S")]
    Silver = 4,
    #[serde(rename = "桂", alias = "N")]
    Knight = 5,
    #[serde(rename = "香", alias = "L")]
    Lance = 6,
    #[serde(rename = "歩", alias = "P")]
    Pawn = 7,
}

impl PieceType {
    /// 全ての駒種
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 成れる駒種か（王と金は成れない）
    #[inline]
    pub const fn can_promote(self) -> bool {
        !matches!(self, PieceType::King | PieceType::Gold)
    }

    /// 漢字表記
    pub const fn kanji(self) -> char {
        match self {
            PieceType::King => '王',
            PieceType::Rook => '飛',
            PieceType::Bishop => '角',
            PieceType::Gold => '金',
            PieceType::Silver => '銀',
            PieceType::Knight => '桂',
            PieceType::Lance => '香',
            PieceType::Pawn => '歩',
        }
    }

    /// 成駒の漢字表記（成れない駒種は生駒と同じ）
    pub const fn promoted_kanji(self) -> char {
        match self {
            PieceType::Rook => '龍',
            PieceType::Bishop => '馬',
            PieceType::Silver => '全',
            PieceType::Knight => '圭',
            PieceType::Lance => '杏',
            PieceType::Pawn => 'と',
            PieceType::King | PieceType::Gold => self.kanji(),
        }
    }

    /// USI の英字表記（大文字）
    pub const fn usi_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Gold => 'G',
            PieceType::Silver => 'S',
            PieceType::Knight => 'N',
            PieceType::Lance => 'L',
            PieceType::Pawn => 'P',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kanji())
    }
}

impl std::str::FromStr for PieceType {
    type Err = GameError;

    /// 漢字・英字・英単語のいずれかから駒種を得る
    ///
    /// 8 種類以外の名前は `UnsupportedPieceKind` になる。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "王" | "玉" | "K" | "k" => PieceType::King,
            "飛" | "R" | "r" => PieceType::Rook,
            "角" | "B" | "b" => PieceType::Bishop,
            "金" | "G" | "g" => PieceType::Gold,
            "銀" | "S" | "s" => PieceType::Silver,
            "桂" | "N" | "n" => PieceType::Knight,
            "香" | "L" | "l" => PieceType::Lance,
            "歩" | "P" | "p" => PieceType::Pawn,
            other => match other.to_ascii_lowercase().as_str() {
                "king" => PieceType::King,
                "rook" => PieceType::Rook,
                "bishop" => PieceType::Bishop,
                "gold" => PieceType::Gold,
                "silver" => PieceType::Silver,
                "knight" => PieceType::Knight,
                "lance" => PieceType::Lance,
                "pawn" => PieceType::Pawn,
                _ => return Err(GameError::UnsupportedPieceKind(other.to_string())),
            },
        };
        Ok(kind)
    }
}

/// 駒（駒種 + 持ち主 + 成り）
///
/// 王と金は `promoted == true` にならない。`Piece::promote` はこの不変条件を守る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub owner: Color,
    #[serde(default)]
    pub promoted: bool,
}

impl Piece {
    /// 生駒を生成
    #[inline]
    pub const fn new(kind: PieceType, owner: Color) -> Self {
        Piece {
            kind,
            owner,
            promoted: false,
        }
    }

    /// 成駒を生成（成れない駒種は生駒のまま）
    #[inline]
    pub const fn promoted(kind: PieceType, owner: Color) -> Self {
        Piece {
            kind,
            owner,
            promoted: kind.can_promote(),
        }
    }

    /// 成った駒を返す
    #[inline]
    pub const fn promote(self) -> Self {
        Piece::promoted(self.kind, self.owner)
    }

    /// 駒台に載せる形へ変換する（成りを解除し、持ち主を取った側にする）
    #[inline]
    pub const fn captured_by(self, capturer: Color) -> Self {
        Piece::new(self.kind, capturer)
    }

    /// 表示用の漢字
    pub const fn kanji(self) -> char {
        if self.promoted {
            self.kind.promoted_kanji()
        } else {
            self.kind.kanji()
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.owner {
            Color::Sente => ' ',
            Color::Gote => 'v',
        };
        write!(f, "{mark}{}", self.kanji())
    }
}
