//! 简化中国象棋规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 单步走法生成和走法验证
//! - 棋盘布局字符串格式
//! - 错误类型

mod board;
mod constants;
mod error;
mod layout;
mod moves;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, Result};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use moves::{Move, MoveGenerator};
pub use piece::{Piece, PieceKind, Position, Side};
