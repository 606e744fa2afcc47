use serde_json::{Value, json};
use shogi_game_core::{
    Color, GameError, GameSnapshot, HistoryEntry, MoveOrigin, Piece, PieceType, ShogiGame, Square,
};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

/// 保存済みの対局データと同じ形の文書（先手が 7 筋の歩で後手の歩を取った直後）
fn stored_document() -> Value {
    let mut board = vec![vec![Value::Null; 9]; 9];
    board[0][4] = json!({"type": "王", "owner": "gote", "promoted": false});
    board[8][4] = json!({"type": "王", "owner": "sente", "promoted": false});
    board[4][2] = json!({"type": "歩", "owner": "sente", "promoted": false});
    board[2][6] = json!({"type": "飛", "owner": "gote", "promoted": true});
    json!({
        "board": board,
        "turn": "gote",
        "hands": {
            "sente": [{"type": "歩", "owner": "sente", "promoted": false}],
            "gote": []
        },
        "moveHistory": [
            {
                "from": {"row": 5, "col": 2},
                "to": {"row": 4, "col": 2},
                "piece": {"type": "歩", "owner": "sente", "promoted": false},
                "captured": {"type": "歩", "owner": "sente", "promoted": false},
                "capturedOriginalOwner": "gote",
                "promote": false
            }
        ]
    })
}

#[test]
fn test_import_stored_document() {
    let snapshot = GameSnapshot::from_json(&stored_document().to_string()).unwrap();
    let mut game = ShogiGame::new();
    game.import_state(snapshot);

    assert_eq!(game.turn(), Color::Gote);
    assert_eq!(
        game.board().piece_on(sq(2, 6)),
        Some(Piece::promoted(PieceType::Rook, Color::Gote))
    );
    assert_eq!(game.hand(Color::Sente).count(PieceType::Pawn), 1);
    assert_eq!(game.history().len(), 1);

    // 取った歩を後手の駒として元の場所へ戻す
    game.undo_move().unwrap();
    assert_eq!(game.turn(), Color::Sente);
    assert_eq!(game.board().piece_on(sq(5, 2)), Some(Piece::new(PieceType::Pawn, Color::Sente)));
    assert_eq!(game.board().piece_on(sq(4, 2)), Some(Piece::new(PieceType::Pawn, Color::Gote)));
    assert!(game.hand(Color::Sente).is_empty());
}

#[test]
fn test_export_matches_stored_shape() {
    let text = stored_document().to_string();
    let snapshot = GameSnapshot::from_json(&text).unwrap();
    let exported: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

    assert_eq!(exported["board"], stored_document()["board"]);
    assert_eq!(exported["hands"], stored_document()["hands"]);
    let record = &exported["moveHistory"][0];
    assert_eq!(record["capturedOriginalOwner"], "gote");
    assert_eq!(record["captured"]["owner"], "sente");
    assert!(record.get("capturedPromoted").is_none());
}

#[test]
fn test_roundtrip_after_mixed_play() {
    let mut game = ShogiGame::new();
    game.confirm_move(MoveOrigin::board(6, 6), sq(5, 6), false).unwrap();
    game.confirm_move(MoveOrigin::board(2, 2), sq(3, 2), false).unwrap();
    game.confirm_move(MoveOrigin::board(7, 7), sq(1, 1), true).unwrap();
    game.confirm_move(MoveOrigin::board(0, 2), sq(1, 1), false).unwrap();
    game.confirm_move(MoveOrigin::hand(Color::Sente, PieceType::Bishop), sq(4, 4), false)
        .unwrap();

    let text = game.export_state().to_json().unwrap();
    let mut restored = ShogiGame::empty();
    restored.import_state(GameSnapshot::from_json(&text).unwrap());
    assert_eq!(restored, game);

    // 復元後も完全に巻き戻せる
    while restored.undo_move().is_ok() {}
    assert_eq!(restored, ShogiGame::new());
}

#[test]
fn test_letter_aliases_accepted() {
    let mut doc = stored_document();
    doc["board"][4][2] = json!({"type": "P", "owner": "sente"});
    let snapshot = GameSnapshot::from_json(&doc.to_string()).unwrap();
    assert_eq!(
        snapshot.board.piece_on(sq(4, 2)),
        Some(Piece::new(PieceType::Pawn, Color::Sente))
    );
}

#[test]
fn test_history_without_from_is_rejected() {
    let mut doc = stored_document();
    doc["moveHistory"][0]
        .as_object_mut()
        .unwrap()
        .remove("from");
    let err = GameSnapshot::from_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, GameError::Snapshot(_)));
}

#[test]
fn test_missing_history_defaults_to_empty() {
    let mut doc = stored_document();
    doc.as_object_mut().unwrap().remove("moveHistory");
    let snapshot = GameSnapshot::from_json(&doc.to_string()).unwrap();
    assert!(snapshot.move_history.is_empty());
}

#[test]
fn test_drop_entry_roundtrip_keeps_hand_slot() {
    let mut game = ShogiGame::empty();
    game.add_to_hand(Color::Sente, PieceType::Gold);
    game.add_to_hand(Color::Sente, PieceType::Silver);
    game.confirm_move(MoveOrigin::hand(Color::Sente, PieceType::Silver), sq(4, 4), false)
        .unwrap();

    let snapshot = GameSnapshot::from_json(&game.export_state().to_json().unwrap()).unwrap();
    assert_eq!(
        snapshot.move_history,
        vec![HistoryEntry::Drop {
            owner: Color::Sente,
            piece: Piece::new(PieceType::Silver, Color::Sente),
            to: sq(4, 4),
            hand_index: Some(1),
        }]
    );
}
