//! 保存用スナップショット（GameSnapshot）
//!
//! `{board, turn, hands, moveHistory}` の JSON 文書。永続化層はこれを
//! 1局につき1つの不透明な文書として保存し、リクエストごとに読み戻す。

use crate::board::Board;
use crate::error::GameResult;
use crate::game::GameState;
use crate::hand::Hands;
use crate::history::HistoryEntry;
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// 対局状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    #[serde(default)]
    pub hands: Hands,
    #[serde(rename = "moveHistory", default)]
    pub move_history: Vec<HistoryEntry>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON 文字列から読み込む
    ///
    /// 盤面が 9x9 でない、`from` のない移動記録がある等の形の誤りは
    /// `GameError::Snapshot` になる。
    pub fn from_json(text: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<GameState> for GameSnapshot {
    fn from(state: GameState) -> Self {
        GameSnapshot {
            board: state.board,
            turn: state.turn,
            hands: state.hands,
            move_history: state.history,
        }
    }
}

impl From<GameSnapshot> for GameState {
    fn from(snapshot: GameSnapshot) -> Self {
        GameState {
            board: snapshot.board,
            turn: snapshot.turn,
            hands: snapshot.hands,
            history: snapshot.move_history,
        }
    }
}
