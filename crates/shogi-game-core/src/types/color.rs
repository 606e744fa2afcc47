//! 手番（Color）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 手番（先手/後手）
///
/// 先手は盤面の下側（row 6-8）から上方向へ、後手は上側（row 0-2）から下方向へ進む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Sente = 0,
    Gote = 1,
}

impl Color {
    /// 全ての手番
    pub const ALL: [Color; 2] = [Color::Sente, Color::Gote];

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Sente => Color::Gote,
            Color::Gote => Color::Sente,
        }
    }

    /// 前進方向の行差分（先手は -1、後手は +1）
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Sente => -1,
            Color::Gote => 1,
        }
    }

    /// 敵陣（成れる段）に含まれる行か
    #[inline]
    pub const fn in_promotion_zone(self, row: u8) -> bool {
        match self {
            Color::Sente => row <= 2,
            Color::Gote => row >= 6 && row <= 8,
        }
    }

    /// この手番から見て最奥から数えた段（0 が最奥）
    ///
    /// 盤内かどうかは呼び出し側で確認する（盤外の段でも桁あふれしない）。
    #[inline]
    pub const fn distance_from_far_edge(self, row: u8) -> u8 {
        match self {
            Color::Sente => row,
            Color::Gote => 8u8.saturating_sub(row),
        }
    }

    /// 小文字の名前（"sente" / "gote"）
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Sente => "sente",
            Color::Gote => "gote",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sente" | "black" | "b" | "先手" => Ok(Color::Sente),
            "gote" | "white" | "w" | "後手" => Ok(Color::Gote),
            _ => Err(format!("unknown side: {s}")),
        }
    }
}
