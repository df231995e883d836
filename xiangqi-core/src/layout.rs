//! 棋盘布局字符串解析和生成
//!
//! 格式与 FEN 的棋盘部分类似：`/` 分隔 10 行，从第 0 行（黑方底线）
//! 写到第 9 行（红方底线），数字表示连续空格数。
//!
//! 棋子字符：K 将、G 士、M 象、N 马、R 车、C 炮、P 兵，红方大写，黑方小写。
//!
//! 示例：
//! `rnmgkgmnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNMGKGMNR`

use crate::board::Board;
use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::error::{ChessError, Result};
use crate::piece::{Piece, Position};

/// 初始局面布局
pub const INITIAL_LAYOUT: &str = "rnmgkgmnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNMGKGMNR";

/// 布局格式处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串为棋盘
    pub fn parse(layout: &str) -> Result<Board> {
        let layout = layout.trim();
        if layout.is_empty() {
            return Err(ChessError::InvalidLayout {
                reason: "Empty layout string".to_string(),
            });
        }

        let rows: Vec<&str> = layout.split('/').collect();
        if rows.len() != BOARD_ROWS {
            return Err(ChessError::InvalidLayout {
                reason: format!("Expected {} rows, got {}", BOARD_ROWS, rows.len()),
            });
        }

        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_COLS {
                    return Err(ChessError::InvalidLayout {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(ChessError::InvalidLayout {
                            reason: format!("Row {} has an empty run of 0", row_idx),
                        });
                    }
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_layout_char(c) {
                    board.set(
                        Position::new_unchecked(row_idx as u8, col as u8),
                        Some(piece),
                    );
                    col += 1;
                } else {
                    return Err(ChessError::InvalidLayout {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_COLS {
                return Err(ChessError::InvalidLayout {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_COLS),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘转换为布局字符串
    pub fn to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_ROWS);

        for row in 0..BOARD_ROWS {
            let mut line = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_COLS {
                if let Some(piece) = board.get(Position::new_unchecked(row as u8, col as u8)) {
                    if empty_count > 0 {
                        line.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    line.push(piece.to_layout_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                line.push_str(&empty_count.to_string());
            }

            rows.push(line);
        }

        rows.join("/")
    }
}
