//! 直前の指し手を戻す

use super::ShogiGame;
use crate::error::{GameError, GameResult};
use crate::history::HistoryEntry;

impl ShogiGame {
    /// 最後の指し手（移動または打ち駒）を戻し、その履歴を返す
    ///
    /// 盤面・持ち駒は指す前と完全に同じに戻る。成った駒は成る前の駒に、
    /// 取られた駒は元の持ち主と成り状態で元のマスに戻る。手番はその手を指した側になる。
    ///
    /// 履歴が盤外のマスを指している場合（壊れたスナップショットを読み込んだ場合）は
    /// `InvalidHistory` を返し、状態は変えない。
    pub fn undo_move(&mut self) -> GameResult<HistoryEntry> {
        let entry = *self.state.history.last().ok_or(GameError::NothingToUndo)?;
        let on_board = match entry {
            HistoryEntry::Drop { to, .. } => to.is_on_board(),
            HistoryEntry::Move { from, to, .. } => from.is_on_board() && to.is_on_board(),
        };
        if !on_board {
            return Err(GameError::InvalidHistory(entry));
        }

        let state = &mut self.state;
        state.history.pop();
        match entry {
            HistoryEntry::Drop {
                owner,
                piece,
                to,
                hand_index,
            } => {
                state.board.remove_piece(to);
                let hand = state.hands.get_mut(owner);
                match hand_index {
                    Some(index) => hand.insert_at(index, piece),
                    None => hand.push(piece),
                }
                state.turn = owner;
                log::debug!("undo: {owner} drop {} at {to}", piece.kind);
            }
            HistoryEntry::Move {
                from,
                to,
                piece,
                captured,
                ..
            } => {
                let mover = piece.owner;
                state.board.put_piece(from, piece);
                match captured {
                    Some(captured) => {
                        if state.hands.get_mut(mover).remove_last(captured.kind).is_none() {
                            log::warn!("undo: {mover} hand has no {} to return", captured.kind);
                        }
                        state.board.put_piece(to, captured);
                    }
                    None => {
                        state.board.remove_piece(to);
                    }
                }
                state.turn = mover;
                log::debug!("undo: {mover} {} {to}->{from}", piece.kind);
            }
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GameError;
    use crate::game::{GameState, ShogiGame};
    use crate::history::HistoryEntry;
    use crate::types::{Color, MoveOrigin, Piece, PieceType, Square};

    #[test]
    fn test_undo_on_fresh_game_fails() {
        let mut game = ShogiGame::new();
        assert!(matches!(game.undo_move(), Err(GameError::NothingToUndo)));
        assert_eq!(game, ShogiGame::new());
    }

    #[test]
    fn test_undo_promoting_capture() {
        let mut game = ShogiGame::empty();
        game.put_piece(Square::new(3, 2), Piece::new(PieceType::Pawn, Color::Sente));
        game.put_piece(Square::new(2, 2), Piece::promoted(PieceType::Pawn, Color::Gote));
        game.add_to_hand(Color::Sente, PieceType::Pawn);
        let before = game.clone();

        game.confirm_move(MoveOrigin::board(3, 2), Square::new(2, 2), true).unwrap();
        assert_eq!(
            game.board().piece_on(Square::new(2, 2)),
            Some(Piece::promoted(PieceType::Pawn, Color::Sente))
        );
        assert_eq!(game.hand(Color::Sente).count(PieceType::Pawn), 2);

        game.undo_move().unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn test_undo_drop_restores_hand_order() {
        let mut game = ShogiGame::empty();
        game.add_to_hand(Color::Gote, PieceType::Pawn);
        game.add_to_hand(Color::Gote, PieceType::Silver);
        game.add_to_hand(Color::Gote, PieceType::Pawn);
        game.set_turn(Color::Gote);
        let before = game.clone();

        game.confirm_move(MoveOrigin::hand(Color::Gote, PieceType::Pawn), Square::new(4, 4), false)
            .unwrap();
        let entry = game.undo_move().unwrap();

        assert!(entry.is_drop());
        assert_eq!(game, before);
    }

    #[test]
    fn test_undo_off_board_history_is_rejected() {
        let pawn = Piece::new(PieceType::Pawn, Color::Sente);
        let entries = [
            HistoryEntry::Move {
                from: Square::new(9, 0),
                to: Square::new(5, 0),
                piece: pawn,
                captured: None,
                promote: false,
            },
            HistoryEntry::Move {
                from: Square::new(6, 0),
                to: Square::new(5, 12),
                piece: pawn,
                captured: Some(Piece::new(PieceType::Gold, Color::Gote)),
                promote: false,
            },
            HistoryEntry::Drop {
                owner: Color::Sente,
                piece: pawn,
                to: Square::new(4, 9),
                hand_index: None,
            },
        ];
        for entry in entries {
            let mut state = GameState::new();
            state.history.push(entry);
            let mut game = ShogiGame::from_state(state);
            let before = game.clone();

            assert!(matches!(game.undo_move(), Err(GameError::InvalidHistory(e)) if e == entry));
            assert_eq!(game, before);
        }
    }
}
