//! 指し手の実行
//!
//! 盤上の移動と打ち駒を検証してから適用する。検証が全て終わるまで状態は書き換えない。

use super::ShogiGame;
use crate::error::{GameError, GameResult};
use crate::history::HistoryEntry;
use crate::movegen::{MoveGenerator, drop_allowed};
use crate::types::{Color, MoveOrigin, Piece, PieceType, Square};

impl ShogiGame {
    /// 盤上の移動または打ち駒を実行する
    ///
    /// - 盤上の移動: 移動先が `available_moves` の候補になければ `InvalidMove`
    /// - 打ち駒: 盤外・使用中のマスは `InvalidDrop`、持ち駒になければ `PieceNotInHand`、
    ///   二歩や行き所のない段への打ち駒も `InvalidDrop`
    ///
    /// 手番は確認しない（手番側の駒だけを選ばせるのは呼び出し側の役割）。
    /// 成りは `promote` かつ成れる移動のときだけ行う。成功すると手番は指した側の相手になる。
    pub fn confirm_move(&mut self, from: MoveOrigin, to: Square, promote: bool) -> GameResult<()> {
        match from {
            MoveOrigin::Board(from) => self.make_board_move(from, to, promote),
            MoveOrigin::Hand { owner, piece_type } => self.make_drop(owner, piece_type, to),
        }
    }

    fn make_drop(&mut self, owner: Color, piece_type: PieceType, to: Square) -> GameResult<()> {
        let state = &self.state;
        if !state.board.is_vacant(to) {
            return Err(GameError::InvalidDrop { piece_type, to });
        }
        let hand_index = state
            .hands
            .get(owner)
            .position(piece_type)
            .ok_or(GameError::PieceNotInHand { owner, piece_type })?;
        if !drop_allowed(&state.board, owner, piece_type, to) {
            return Err(GameError::InvalidDrop { piece_type, to });
        }

        let state = &mut self.state;
        let taken = state.hands.get_mut(owner).take_at(hand_index);
        let piece = Piece::new(taken.kind, owner);
        state.board.put_piece(to, piece);
        state.history.push(HistoryEntry::Drop {
            owner,
            piece: taken,
            to,
            hand_index: Some(hand_index),
        });
        state.turn = owner.opponent();

        log::debug!("{owner} drops {piece_type} at {to}");
        Ok(())
    }

    fn make_board_move(&mut self, from: Square, to: Square, promote: bool) -> GameResult<()> {
        let board = &self.state.board;
        let piece = board.piece_on(from).ok_or(GameError::EmptySquare(from))?;
        let candidate = MoveGenerator::new(board)
            .moves_from(from)?
            .into_iter()
            .find(|c| c.to == to)
            .ok_or(GameError::InvalidMove { from, to })?;
        let mover = piece.owner;

        let promote = promote && candidate.can_promote;
        let moved = if promote { piece.promote() } else { piece };

        let state = &mut self.state;
        state.board.remove_piece(from);
        let captured = state.board.put_piece(to, moved);
        if let Some(captured) = captured {
            state.hands.get_mut(mover).push(captured.captured_by(mover));
        }
        state.history.push(HistoryEntry::Move {
            from,
            to,
            piece,
            captured,
            promote,
        });
        state.turn = mover.opponent();

        match captured {
            Some(c) => log::debug!("{mover} {} {from}->{to} captures {}", piece.kind, c.kind),
            None => log::debug!("{mover} {} {from}->{to}", piece.kind),
        }
        if promote {
            log::debug!("{} promoted at {to}", piece.kind);
        }
        Ok(())
    }
}
