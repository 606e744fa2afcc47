//! 履歴（HistoryEntry）
//!
//! 1手を完全に戻すのに必要な情報を持つ。
//!
//! JSON は保存済みの対局データの形（`{drop: true, owner, piece, to}` /
//! `{from, to, piece, captured, capturedOriginalOwner, promote}`）に合わせる。
//! 取った駒は駒台に載った形（取った側の生駒）で `captured` に書き、
//! 取られる前の成り状態を `capturedPromoted` に残す。

use crate::types::{Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 実行済みの1手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord", into = "HistoryRecord")]
pub enum HistoryEntry {
    /// 打ち駒
    Drop {
        owner: Color,
        /// 打った駒（生駒）
        piece: Piece,
        to: Square,
        /// 駒台のどの位置から取り出したか（不明なら末尾へ戻す）
        hand_index: Option<usize>,
    },
    /// 盤上の移動
    Move {
        from: Square,
        to: Square,
        /// 移動前の駒（成る前の状態）
        piece: Piece,
        /// 取られる前の駒（持ち主・成り状態とも元のまま）
        captured: Option<Piece>,
        /// 成りを実行したか
        promote: bool,
    },
}

impl HistoryEntry {
    /// この手を指した側
    pub const fn mover(&self) -> Color {
        match self {
            HistoryEntry::Drop { owner, .. } => *owner,
            HistoryEntry::Move { piece, .. } => piece.owner,
        }
    }

    pub const fn to(&self) -> Square {
        match self {
            HistoryEntry::Drop { to, .. } | HistoryEntry::Move { to, .. } => *to,
        }
    }

    pub const fn is_drop(&self) -> bool {
        matches!(self, HistoryEntry::Drop { .. })
    }

    /// 取った駒の元の持ち主
    pub fn captured_original_owner(&self) -> Option<Color> {
        match self {
            HistoryEntry::Move {
                captured: Some(piece),
                ..
            } => Some(piece.owner),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |c: Color| match c {
            Color::Sente => '☗',
            Color::Gote => '☖',
        };
        match self {
            HistoryEntry::Drop { owner, piece, to, .. } => {
                write!(f, "{}{}打 {to}", mark(*owner), piece.kind)
            }
            HistoryEntry::Move {
                from,
                to,
                piece,
                captured,
                promote,
            } => {
                write!(f, "{}{} {from}->{to}", mark(piece.owner), piece.kanji())?;
                if *promote {
                    write!(f, " 成")?;
                }
                if let Some(c) = captured {
                    write!(f, " x{}", c.kanji())?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    drop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<Square>,
    to: Square,
    piece: Piece,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    captured: Option<Piece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    captured_original_owner: Option<Color>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    captured_promoted: bool,
    #[serde(default)]
    promote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hand_index: Option<usize>,
}

impl TryFrom<HistoryRecord> for HistoryEntry {
    type Error = String;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        if record.drop {
            return Ok(HistoryEntry::Drop {
                owner: record.owner.unwrap_or(record.piece.owner),
                piece: record.piece,
                to: record.to,
                hand_index: record.hand_index,
            });
        }
        let from = record
            .from
            .ok_or_else(|| format!("move record to {} has no from", record.to))?;
        let captured = record.captured.map(|in_hand| Piece {
            kind: in_hand.kind,
            owner: record
                .captured_original_owner
                .unwrap_or(in_hand.owner.opponent()),
            promoted: record.captured_promoted,
        });
        Ok(HistoryEntry::Move {
            from,
            to: record.to,
            piece: record.piece,
            captured,
            promote: record.promote,
        })
    }
}

impl From<HistoryEntry> for HistoryRecord {
    fn from(entry: HistoryEntry) -> Self {
        match entry {
            HistoryEntry::Drop {
                owner,
                piece,
                to,
                hand_index,
            } => HistoryRecord {
                drop: true,
                owner: Some(owner),
                from: None,
                to,
                piece,
                captured: None,
                captured_original_owner: None,
                captured_promoted: false,
                promote: false,
                hand_index,
            },
            HistoryEntry::Move {
                from,
                to,
                piece,
                captured,
                promote,
            } => HistoryRecord {
                drop: false,
                owner: None,
                from: Some(from),
                to,
                piece,
                captured: captured.map(|c| c.captured_by(piece.owner)),
                captured_original_owner: captured.map(|c| c.owner),
                captured_promoted: captured.is_some_and(|c| c.promoted),
                promote,
                hand_index: None,
            },
        }
    }
}
