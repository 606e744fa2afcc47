//! エラー型
//!
//! 全ての操作は同期的かつ決定的に失敗する。失敗時に状態が変化していないことは
//! 各操作側が保証する（検証が全て終わってから書き換える）。

use crate::history::HistoryEntry;
use crate::types::{Color, PieceType, Square};

/// 将棋エンジンのエラー
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// 指定された座標に駒が存在しない
    #[error("no piece at {0}")]
    EmptySquare(Square),

    /// 移動先がその駒の合法手に含まれない
    #[error("invalid move from {from} to {to}")]
    InvalidMove { from: Square, to: Square },

    /// 打ち駒の位置が盤外・使用中・打てない段や筋
    #[error("cannot drop {piece_type} at {to}")]
    InvalidDrop { piece_type: PieceType, to: Square },

    /// 指定された駒が持ち駒にない
    #[error("{owner} has no {piece_type} in hand")]
    PieceNotInHand { owner: Color, piece_type: PieceType },

    /// 履歴が空で戻せない
    #[error("nothing to undo")]
    NothingToUndo,

    /// 8 種類以外の駒種が指定された
    #[error("piece kind not implemented: {0}")]
    UnsupportedPieceKind(String),

    /// 履歴の記録が盤外のマスを指していて戻せない（読み込んだ履歴が壊れている）
    #[error("history entry cannot be undone: {0}")]
    InvalidHistory(HistoryEntry),

    /// スナップショット JSON の構文・形状エラー
    #[error(transparent)]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
