//! 走法生成和验证
//!
//! 每种棋子只按自己的偏移表走一步，不做将军检查。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::piece::{Piece, Position, Side};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 获取指定格子上棋子的所有目标格（按偏移表顺序）
    ///
    /// 格子为空时返回空列表。
    pub fn destinations(board: &Board, pos: Position) -> Vec<Position> {
        let mut moves = Vec::new();
        if let Some(piece) = board.get(pos) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }
        moves.into_iter().map(|mv| mv.to).collect()
    }

    /// 生成指定阵营的所有伪合法走法
    ///
    /// 顺序：棋盘行优先扫描，同一棋子内按偏移表顺序。
    pub fn generate(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (pos, piece) in board.iter().filter(|(_, piece)| piece.side == side) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }

        moves
    }

    /// 检查走法是否在起点棋子的走法列表中
    pub fn is_valid_move(board: &Board, from: Position, to: Position) -> bool {
        Self::destinations(board, from).contains(&to)
    }

    /// 验证走法，失败时说明原因
    pub fn validate(board: &Board, from: Position, to: Position) -> Result<Move> {
        let piece = board.get(from).ok_or(ChessError::NoPiece {
            row: from.row,
            col: from.col,
        })?;

        let mut moves = Vec::new();
        Self::generate_piece_moves(board, from, piece, &mut moves);

        moves
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(ChessError::InvalidMove {
                from_row: from.row,
                from_col: from.col,
                to_row: to.row,
                to_col: to.col,
            })
    }

    /// 生成指定棋子的所有走法
    fn generate_piece_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        for &(d_row, d_col) in piece.kind.offsets() {
            if let Some(to) = pos.offset(d_row, d_col) {
                Self::try_add_move(board, pos, to, piece.side, moves);
            }
        }
    }

    /// 尝试添加走法（目标为空或对方棋子）
    fn try_add_move(
        board: &Board,
        from: Position,
        to: Position,
        side: Side,
        moves: &mut Vec<Move>,
    ) {
        if let Some(target) = board.get(to) {
            if target.side != side {
                moves.push(Move::with_capture(from, to, target));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }
}
