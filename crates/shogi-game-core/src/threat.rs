//! 利き判定（ThreatAnalyzer）
//!
//! 王の移動先を絞り込むためだけに使う簡易判定。
//!
//! **既知の制限**: 相手の駒のうち歩・王・飛の利きしか見ていない。角・金・銀・桂・香
//! （およびそれらの成駒）の利きは判定されないため、王はそれらの利きがあるマスへ
//! 移動できてしまう。飛の利きは間の駒で遮られず、筋と段の全体に及ぶものとして扱う。
//! 成駒は生駒と同じ扱い（と金は歩、龍は飛として判定する）。

use crate::board::Board;
use crate::types::{Color, Piece, PieceType, Square};
use smallvec::SmallVec;

/// 1駒あたりの疑似的な到達マス（飛で最大16）
type Targets = SmallVec<[Square; 16]>;

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_LINES: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 盤面に対する利き判定
pub struct ThreatAnalyzer<'a> {
    board: &'a Board,
}

impl<'a> ThreatAnalyzer<'a> {
    pub fn new(board: &'a Board) -> Self {
        ThreatAnalyzer { board }
    }

    /// `owner` にとって `sq` が安全か（相手の駒の疑似的な移動先に含まれないか）
    pub fn is_square_safe(&self, sq: Square, owner: Color) -> bool {
        !self
            .board
            .pieces_of(owner.opponent())
            .any(|(from, piece)| self.pseudo_targets(from, piece).contains(&sq))
    }

    /// 王の安全判定に使う疑似的な移動先
    ///
    /// 対象は歩・王・飛のみ。それ以外の駒種は空を返す（モジュール先頭の制限を参照）。
    pub fn pseudo_targets(&self, from: Square, piece: Piece) -> Targets {
        let mut targets = Targets::new();
        match piece.kind {
            PieceType::Pawn => {
                if let Some(to) = from.offset(piece.owner.forward(), 0)
                    && self.not_own(to, piece.owner)
                {
                    targets.push(to);
                }
            }
            PieceType::King => {
                targets.extend(
                    KING_STEPS
                        .iter()
                        .filter_map(|&(dr, dc)| from.offset(dr, dc))
                        .filter(|&to| self.not_own(to, piece.owner)),
                );
            }
            PieceType::Rook => {
                for &(dr, dc) in &ROOK_LINES {
                    let mut cursor = from;
                    while let Some(to) = cursor.offset(dr, dc) {
                        targets.push(to);
                        cursor = to;
                    }
                }
            }
            PieceType::Bishop
            | PieceType::Gold
            | PieceType::Silver
            | PieceType::Knight
            | PieceType::Lance => {}
        }
        targets
    }

    #[inline]
    fn not_own(&self, to: Square, owner: Color) -> bool {
        self.board.piece_on(to).is_none_or(|p| p.owner != owner)
    }
}
