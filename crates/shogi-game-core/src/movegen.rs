//! 指し手生成（MoveGenerator）
//!
//! 駒種ごとの移動規則は `(PieceType, promoted)` の網羅的な match で選ぶ。
//! 駒種を増やした場合はコンパイラが未対応の分岐を指摘する。
//!
//! 方向は先手から見た (行差分, 列差分) で定義し、後手は行差分の符号を反転して使う。
//! 各集合は列方向に左右対称なので、列差分の反転は不要。

use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::threat::ThreatAnalyzer;
use crate::types::{Color, MoveCandidate, MoveList, MoveOrigin, Piece, PieceType, Square};

type Offset = (i8, i8);

/// 王: 周囲8マス
const KING_STEPS: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 金（と成銀・成桂・成香・と金）: 斜め後ろ以外の6マス
const GOLD_STEPS: [Offset; 6] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];

/// 銀: 前3マスと斜め後ろ2マス
const SILVER_STEPS: [Offset; 5] = [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];

/// 桂: 2段前の左右（間の駒は飛び越える）
const KNIGHT_JUMPS: [Offset; 2] = [(-2, -1), (-2, 1)];

const PAWN_STEP: [Offset; 1] = [(-1, 0)];

const FORWARD: [Offset; 1] = [(-1, 0)];

const DIAGONALS: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ORTHOGONALS: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 成りを選べる移動か
///
/// 成っていない・王金以外・移動元か移動先が敵陣（先手は row 0-2、後手は row 6-8）。
#[inline]
pub fn can_promote(piece: Piece, from: Square, to: Square) -> bool {
    !piece.promoted
        && piece.kind.can_promote()
        && (piece.owner.in_promotion_zone(from.row) || piece.owner.in_promotion_zone(to.row))
}

/// 打ち駒が禁じられていないか（空きマスであることは呼び出し側で確認する）
///
/// 盤外のマスには打てない。
/// - 歩: 未成の自分の歩がある筋（二歩）と最奥の段には打てない
/// - 桂: 最奥の2段には打てない
/// - 香: 最奥の段には打てない
pub fn drop_allowed(board: &Board, owner: Color, kind: PieceType, to: Square) -> bool {
    if !to.is_on_board() {
        return false;
    }
    let depth = owner.distance_from_far_edge(to.row);
    match kind {
        PieceType::Pawn => depth >= 1 && !board.has_unpromoted_pawn(to.col, owner),
        PieceType::Knight => depth >= 2,
        PieceType::Lance => depth >= 1,
        PieceType::King
        | PieceType::Rook
        | PieceType::Bishop
        | PieceType::Gold
        | PieceType::Silver => true,
    }
}

/// 盤面に対する指し手生成器
pub struct MoveGenerator<'a> {
    board: &'a Board,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board) -> Self {
        MoveGenerator { board }
    }

    /// 起点（盤上 or 持ち駒）に応じた移動候補
    pub fn generate(&self, origin: &MoveOrigin) -> GameResult<MoveList> {
        match *origin {
            MoveOrigin::Board(from) => self.moves_from(from),
            MoveOrigin::Hand { owner, piece_type } => Ok(self.drops(owner, piece_type)),
        }
    }

    /// 盤上の駒の移動候補
    ///
    /// 自駒のあるマスと盤外は含まない。王は相手の利きがある（と判定された）マスを除く。
    pub fn moves_from(&self, from: Square) -> GameResult<MoveList> {
        let piece = self.board.piece_on(from).ok_or(GameError::EmptySquare(from))?;
        let mut moves = MoveList::new();

        match (piece.kind, piece.promoted) {
            (PieceType::King, _) => self.king_moves(from, piece, &mut moves),
            (PieceType::Gold, _)
            | (PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn, true) => {
                self.steps(from, piece, &GOLD_STEPS, &mut moves)
            }
            (PieceType::Pawn, false) => self.steps(from, piece, &PAWN_STEP, &mut moves),
            (PieceType::Silver, false) => self.steps(from, piece, &SILVER_STEPS, &mut moves),
            (PieceType::Knight, false) => self.steps(from, piece, &KNIGHT_JUMPS, &mut moves),
            (PieceType::Lance, false) => self.slides(from, piece, &FORWARD, &mut moves),
            (PieceType::Bishop, promoted) => {
                self.slides(from, piece, &DIAGONALS, &mut moves);
                if promoted {
                    self.steps(from, piece, &ORTHOGONALS, &mut moves);
                }
            }
            (PieceType::Rook, promoted) => {
                self.slides(from, piece, &ORTHOGONALS, &mut moves);
                if promoted {
                    self.steps(from, piece, &DIAGONALS, &mut moves);
                }
            }
        }

        log::trace!("{} {} at {from}: {} candidates", piece.owner, piece.kind, moves.len());
        Ok(moves)
    }

    /// 持ち駒を打てるマス
    ///
    /// 全ての空きマスから打ち駒の禁じ手を除く。打ち駒は成れない。
    pub fn drops(&self, owner: Color, kind: PieceType) -> MoveList {
        let from = MoveOrigin::hand(owner, kind);
        let moves: MoveList = Square::all()
            .filter(|&to| self.board.is_vacant(to) && drop_allowed(self.board, owner, kind, to))
            .map(|to| MoveCandidate {
                from,
                to,
                can_promote: false,
            })
            .collect();
        log::trace!("{owner} drop {kind}: {} candidates", moves.len());
        moves
    }

    /// 自駒でなければ移動先にできる
    #[inline]
    fn is_target_available(&self, to: Square, owner: Color) -> bool {
        self.board.piece_on(to).is_none_or(|p| p.owner != owner)
    }

    fn push(&self, from: Square, to: Square, piece: Piece, moves: &mut MoveList) {
        moves.push(MoveCandidate {
            from: MoveOrigin::Board(from),
            to,
            can_promote: can_promote(piece, from, to),
        });
    }

    /// 1マスだけ動く（跳ぶ）駒
    fn steps(&self, from: Square, piece: Piece, offsets: &[Offset], moves: &mut MoveList) {
        let forward = piece.owner.forward();
        for &(dr, dc) in offsets {
            if let Some(to) = from.offset(dr * -forward, dc)
                && self.is_target_available(to, piece.owner)
            {
                self.push(from, to, piece, moves);
            }
        }
    }

    /// 走り駒: 盤端・自駒（含まない）・敵駒（含めて止まる）まで進む
    fn slides(&self, from: Square, piece: Piece, directions: &[Offset], moves: &mut MoveList) {
        let forward = piece.owner.forward();
        for &(dr, dc) in directions {
            let dr = dr * -forward;
            let mut cursor = from;
            while let Some(to) = cursor.offset(dr, dc) {
                match self.board.piece_on(to) {
                    None => self.push(from, to, piece, moves),
                    Some(other) => {
                        if other.owner != piece.owner {
                            self.push(from, to, piece, moves);
                        }
                        break;
                    }
                }
                cursor = to;
            }
        }
    }

    fn king_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        let threats = ThreatAnalyzer::new(self.board);
        for &(dr, dc) in &KING_STEPS {
            if let Some(to) = from.offset(dr, dc)
                && self.is_target_available(to, piece.owner)
                && threats.is_square_safe(to, piece.owner)
            {
                moves.push(MoveCandidate {
                    from: MoveOrigin::Board(from),
                    to,
                    can_promote: false,
                });
            }
        }
    }
}
