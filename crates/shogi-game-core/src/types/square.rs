//! 盤上の座標（Square）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤の一辺のマス数
pub const BOARD_SIZE: usize = 9;

/// 盤上の座標
///
/// - row 0 = 一段目（後手側）, row 8 = 九段目（先手側）
/// - col 0 = 9筋（左端）, col 8 = 1筋（右端）
///
/// 外部から渡された座標は盤外の値を取り得るため、フィールドは検査なしで保持し
/// `is_on_board()` で判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// 盤内か
    #[inline]
    pub const fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 差分だけずらした座標（盤外なら None）
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// 全81マスを row 優先で列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square::new(row, col)))
    }

    /// USI 表記（"7g" など）。盤外は None
    pub fn to_usi(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        let file = (b'9' - self.col) as char;
        let rank = (b'a' + self.row) as char;
        Some(format!("{file}{rank}"))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl std::str::FromStr for Square {
    type Err = String;

    /// "row,col" 形式（例: "6,0"）を解釈する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split_once(',')
            .ok_or_else(|| format!("expected \"row,col\", got {s:?}"))?;
        let row: u8 = row.trim().parse().map_err(|e| format!("invalid row {row:?}: {e}"))?;
        let col: u8 = col.trim().parse().map_err(|e| format!("invalid col {col:?}: {e}"))?;
        Ok(Square::new(row, col))
    }
}
