//! # shogi-game-core
//!
//! 対局サーバー向けの将棋ルールエンジン。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, PieceType, Piece, Square, MoveOrigin, MoveCandidate）
//! - `board`: 9x9 の盤面と平手の初期配置
//! - `hand`: 持ち駒
//! - `movegen`: 駒ごとの移動候補と打ち駒の候補
//! - `threat`: 王の移動先を絞る簡易的な利き判定
//! - `history`: 1手を戻すための履歴
//! - `game`: 対局状態と confirm_move / undo_move
//! - `snapshot`: 保存用 JSON 文書
//!
//! 王手・詰み・千日手は扱わない。

pub mod board;
pub mod error;
pub mod game;
pub mod hand;
pub mod history;
pub mod movegen;
pub mod snapshot;
pub mod threat;
pub mod types;

pub use board::Board;
pub use error::{GameError, GameResult};
pub use game::{GameState, ShogiGame};
pub use hand::{Hand, Hands};
pub use history::HistoryEntry;
pub use movegen::MoveGenerator;
pub use snapshot::GameSnapshot;
pub use threat::ThreatAnalyzer;
pub use types::{BOARD_SIZE, Color, MoveCandidate, MoveList, MoveOrigin, Piece, PieceType, Square};
