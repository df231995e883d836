//! 棋盘常量定义

/// 棋盘行数
pub const BOARD_ROWS: usize = 10;

/// 棋盘列数
pub const BOARD_COLS: usize = 9;

/// 棋盘格子总数
pub const BOARD_SIZE: usize = BOARD_ROWS * BOARD_COLS;
