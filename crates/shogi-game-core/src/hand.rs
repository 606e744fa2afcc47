//! 持ち駒（Hand）
//!
//! 取った順に駒を並べて保持する。駒台に載る駒は常に生駒で、持ち主は取った側。

use crate::types::{Color, Piece, PieceType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 片側の持ち駒
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    pieces: Vec<Piece>,
}

impl Hand {
    pub const fn new() -> Self {
        Hand { pieces: Vec::new() }
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// 指定した駒種の枚数
    pub fn count(&self, kind: PieceType) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }

    /// 指定した駒種が最初に現れる位置
    #[inline]
    pub fn position(&self, kind: PieceType) -> Option<usize> {
        self.pieces.iter().position(|p| p.kind == kind)
    }

    /// 末尾に追加
    #[inline]
    pub fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// 位置を指定して取り出す
    ///
    /// # Panics
    /// `index` が範囲外のとき
    #[inline]
    pub fn take_at(&mut self, index: usize) -> Piece {
        self.pieces.remove(index)
    }

    /// 位置を指定して戻す（範囲外なら末尾）
    pub fn insert_at(&mut self, index: usize, piece: Piece) {
        let index = index.min(self.pieces.len());
        self.pieces.insert(index, piece);
    }

    /// 指定した駒種のうち最後に加わった1枚を取り除く
    pub fn remove_last(&mut self, kind: PieceType) -> Option<Piece> {
        let index = self.pieces.iter().rposition(|p| p.kind == kind)?;
        Some(self.pieces.remove(index))
    }

    /// 駒種ごとの枚数（`PieceType::ALL` の順、0 枚の駒種は含まない）
    pub fn summary(&self) -> Vec<(PieceType, usize)> {
        PieceType::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary();
        if summary.is_empty() {
            return write!(f, "なし");
        }
        for (i, (kind, n)) in summary.into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if n > 1 {
                write!(f, "{kind}{n}")?;
            } else {
                write!(f, "{kind}")?;
            }
        }
        Ok(())
    }
}

/// 両者の持ち駒
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hands {
    pub sente: Hand,
    pub gote: Hand,
}

impl Hands {
    #[inline]
    pub fn get(&self, color: Color) -> &Hand {
        match color {
            Color::Sente => &self.sente,
            Color::Gote => &self.gote,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, color: Color) -> &mut Hand {
        match color {
            Color::Sente => &mut self.sente,
            Color::Gote => &mut self.gote,
        }
    }
}

impl std::ops::Index<Color> for Hands {
    type Output = Hand;

    fn index(&self, color: Color) -> &Hand {
        self.get(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn() -> Piece {
        Piece::new(PieceType::Pawn, Color::Sente)
    }

    fn gold() -> Piece {
        Piece::new(PieceType::Gold, Color::Sente)
    }

    #[test]
    fn test_count_and_summary() {
        let mut hand = Hand::new();
        hand.push(pawn());
        hand.push(gold());
        hand.push(pawn());

        assert_eq!(hand.len(), 3);
        assert_eq!(hand.count(PieceType::Pawn), 2);
        assert_eq!(hand.summary(), vec![(PieceType::Gold, 1), (PieceType::Pawn, 2)]);
        assert_eq!(hand.to_string(), "金 歩2");
        assert_eq!(Hand::new().to_string(), "なし");
    }

    #[test]
    fn test_take_and_insert_restore_order() {
        let mut hand = Hand::new();
        hand.push(pawn());
        hand.push(gold());
        let before = hand.clone();

        let index = hand.position(PieceType::Pawn).unwrap();
        let taken = hand.take_at(index);
        assert_eq!(hand.pieces(), &[gold()]);

        hand.insert_at(index, taken);
        assert_eq!(hand, before);
    }

    #[test]
    fn test_remove_last() {
        let mut hand = Hand::new();
        hand.push(pawn());
        hand.push(gold());
        hand.push(pawn());
        assert_eq!(hand.remove_last(PieceType::Pawn), Some(pawn()));
        assert_eq!(hand.pieces(), &[pawn(), gold()]);
        assert_eq!(hand.remove_last(PieceType::Rook), None);
    }

    #[test]
    fn test_hands_json_shape() {
        let mut hands = Hands::default();
        hands.get_mut(Color::Gote).push(Piece::new(PieceType::Pawn, Color::Gote));
        let json = serde_json::to_value(&hands).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sente": [],
                "gote": [{"type": "歩", "owner": "gote", "promoted": false}]
            })
        );
        assert_eq!(hands[Color::Gote].len(), 1);
    }
}
