//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::error::{ChessError, Result};

/// 四个正交方向
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 马的八个日字方向
const HORSE: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

/// 象的四个田字方向
const ELEPHANT: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// 兵只向行号减小的方向走一步（红黑双方相同）
const SOLDIER: [(i8, i8); 1] = [(-1, 0)];

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马/傌
    Horse,
    /// 车/俥
    Chariot,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    /// 全部棋子类型
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 获取棋子的子力分值（用于 AI 评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::General => 1000,
            PieceKind::Chariot => 9,
            PieceKind::Advisor => 5,
            PieceKind::Cannon => 4,
            PieceKind::Horse => 3,
            PieceKind::Elephant => 3,
            PieceKind::Soldier => 1,
        }
    }

    /// 单步走法偏移表 `(行偏移, 列偏移)`
    ///
    /// 所有棋子都只走一步，不滑行：车、炮只到相邻格，士走直线，
    /// 象不检查象眼，将不受九宫限制。
    pub fn offsets(&self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Soldier => &SOLDIER,
            PieceKind::Horse => &HORSE,
            PieceKind::Elephant => &ELEPHANT,
            PieceKind::General | PieceKind::Advisor | PieceKind::Chariot | PieceKind::Cannon => {
                &ORTHOGONAL
            }
        }
    }

    /// 获取布局字符（红方大写，黑方小写）
    pub fn to_layout_char(&self, side: Side) -> char {
        let c = match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'g',
            PieceKind::Elephant => 'm',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        match side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'g' => PieceKind::Advisor,
            'm' => PieceKind::Elephant,
            'n' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };
        Some((kind, side))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（玩家，在下方）
    Red,
    /// 黑方（电脑，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 评估符号：黑方为正，红方为负
    pub fn sign(&self) -> i32 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// 获取布局字符
    pub fn to_layout_char(&self) -> char {
        self.kind.to_layout_char(self.side)
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Piece> {
        PieceKind::from_layout_char(c).map(|(kind, side)| Piece { kind, side })
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.kind.value()
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-9)，0 为黑方底线
    pub row: u8,
    /// 列 (0-8)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置，越界时返回 `OutOfRange`
    pub fn try_new(row: i32, col: i32) -> Result<Self> {
        if (0..BOARD_ROWS as i32).contains(&row) && (0..BOARD_COLS as i32).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(ChessError::OutOfRange { row, col })
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_ROWS && (self.col as usize) < BOARD_COLS
    }

    /// 获取偏移后的位置
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row >= 0 && (row as usize) < BOARD_ROWS && col >= 0 && (col as usize) < BOARD_COLS {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引（行优先）
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_COLS + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_ROWS * BOARD_COLS {
            Some(Position {
                row: (index / BOARD_COLS) as u8,
                col: (index % BOARD_COLS) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
