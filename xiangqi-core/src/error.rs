//! 错误类型定义

use thiserror::Error;

/// 象棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 坐标越界
    #[error("Position out of range: ({row}, {col})")]
    OutOfRange { row: i32, col: i32 },

    /// 没有棋子
    #[error("No piece at position ({row}, {col})")]
    NoPiece { row: u8, col: u8 },

    /// 无效的走法
    #[error("Invalid move: from ({from_row}, {from_col}) to ({to_row}, {to_col})")]
    InvalidMove {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },

    /// 无效的棋盘布局字符串
    #[error("Invalid layout string: {reason}")]
    InvalidLayout { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
