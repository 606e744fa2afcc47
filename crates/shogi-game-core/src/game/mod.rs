//! 対局（ShogiGame）
//!
//! 盤面・手番・持ち駒・履歴をひとまとめにした `GameState` と、それを操作する
//! `ShogiGame` を提供する。状態の書き換えは `confirm_move`（executor）と
//! `undo_move`（undo）、および局面編集用のメソッドだけが行う。

mod executor;
mod undo;

use crate::board::Board;
use crate::error::GameResult;
use crate::hand::{Hand, Hands};
use crate::history::HistoryEntry;
use crate::movegen::MoveGenerator;
use crate::snapshot::GameSnapshot;
use crate::threat::ThreatAnalyzer;
use crate::types::{Color, MoveList, MoveOrigin, Piece, PieceType, Square};
use std::fmt;

/// 対局の状態
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub hands: Hands,
    pub history: Vec<HistoryEntry>,
}

impl GameState {
    /// 平手の初期局面（先手番）
    pub fn new() -> Self {
        GameState {
            board: Board::initial(),
            turn: Color::Sente,
            hands: Hands::default(),
            history: Vec::new(),
        }
    }

    /// 駒のない局面（先手番）
    pub fn empty() -> Self {
        GameState {
            board: Board::empty(),
            ..Self::new()
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// 将棋の対局
///
/// ```
/// use shogi_game_core::{MoveOrigin, ShogiGame, Square};
///
/// let mut game = ShogiGame::new();
/// game.confirm_move(MoveOrigin::board(6, 0), Square::new(5, 0), false).unwrap();
/// assert_eq!(game.history().len(), 1);
/// game.undo_move().unwrap();
/// assert_eq!(game, ShogiGame::new());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShogiGame {
    state: GameState,
}

impl ShogiGame {
    pub fn new() -> Self {
        ShogiGame {
            state: GameState::new(),
        }
    }

    /// 駒のない盤面から始める（局面編集用）
    pub fn empty() -> Self {
        ShogiGame {
            state: GameState::empty(),
        }
    }

    pub fn from_state(state: GameState) -> Self {
        ShogiGame { state }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 現在の盤面（コピー）
    ///
    /// 返した盤面を書き換えても対局には影響しない。
    #[inline]
    pub fn board(&self) -> Board {
        self.state.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.state.turn
    }

    #[inline]
    pub fn hand(&self, owner: Color) -> &Hand {
        self.state.hands.get(owner)
    }

    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    /// 盤上の駒または持ち駒の移動候補
    ///
    /// 手番は確認しない。
    pub fn available_moves(&self, origin: &MoveOrigin) -> GameResult<MoveList> {
        MoveGenerator::new(&self.state.board).generate(origin)
    }

    /// `owner` にとって `sq` が安全か
    pub fn is_square_safe(&self, sq: Square, owner: Color) -> bool {
        ThreatAnalyzer::new(&self.state.board).is_square_safe(sq, owner)
    }

    /// 初期局面に戻す
    pub fn reset(&mut self) {
        log::debug!("reset after {} moves", self.state.history.len());
        self.state = GameState::new();
    }

    pub fn export_state(&self) -> GameSnapshot {
        GameSnapshot::from(self.state.clone())
    }

    /// スナップショットの内容でそのまま置き換える
    pub fn import_state(&mut self, snapshot: GameSnapshot) {
        if !self.state.history.is_empty() {
            log::warn!(
                "import replaces a game with {} moves of history",
                self.state.history.len()
            );
        }
        self.state = snapshot.into();
    }

    /// 駒を置く（置かれていた駒を返す）
    ///
    /// # Panics
    /// `sq` が盤外のとき
    pub fn put_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.state.board.put_piece(sq, piece)
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.state.board.remove_piece(sq)
    }

    /// 持ち駒に加える（生駒・持ち主 `owner` として）
    pub fn add_to_hand(&mut self, owner: Color, kind: PieceType) {
        self.state.hands.get_mut(owner).push(Piece::new(kind, owner));
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.state.turn = turn;
    }
}

impl From<GameState> for ShogiGame {
    fn from(state: GameState) -> Self {
        ShogiGame::from_state(state)
    }
}

impl fmt::Display for ShogiGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "後手の持駒: {}", self.hand(Color::Gote))?;
        writeln!(f, "{}", self.state.board)?;
        writeln!(f, "先手の持駒: {}", self.hand(Color::Sente))?;
        let turn = match self.turn() {
            Color::Sente => "先手",
            Color::Gote => "後手",
        };
        write!(f, "手番: {turn}")
    }
}
