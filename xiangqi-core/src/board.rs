//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS, BOARD_SIZE};
use crate::piece::{Piece, PieceKind, Position, Side};

/// 棋盘
///
/// 10 行 9 列，第 0 行为黑方底线，第 9 行为红方底线。
/// `Clone` 是完整的值拷贝，搜索依赖这一点还原局面。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 索引为 row * 9 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];

        for (side, home, cannons, soldiers) in [(Side::Black, 0, 2, 3), (Side::Red, 9, 7, 6)] {
            // 底线：车马象士将士象马车
            for (col, kind) in back_rank.iter().enumerate() {
                board.set(
                    Position::new_unchecked(home, col as u8),
                    Some(Piece::new(*kind, side)),
                );
            }

            // 炮
            for col in [1, 7] {
                board.set(
                    Position::new_unchecked(cannons, col),
                    Some(Piece::new(PieceKind::Cannon, side)),
                );
            }

            // 兵/卒
            for col in (0..9).step_by(2) {
                board.set(
                    Position::new_unchecked(soldiers, col),
                    Some(Piece::new(PieceKind::Soldier, side)),
                );
            }
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃掉的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 返回走子后的新棋盘，原棋盘不变
    pub fn apply_move(&self, from: Position, to: Position) -> Board {
        let mut next = self.clone();
        next.move_piece(from, to);
        next
    }

    /// 获取指定阵营的所有棋子位置（行优先顺序）
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        self.iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        self.iter().collect()
    }

    /// 按行优先顺序遍历所有棋子
    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, square)| {
            let pos =
                Position::new_unchecked((index / BOARD_COLS) as u8, (index % BOARD_COLS) as u8);
            square.map(|piece| (pos, piece))
        })
    }

    /// 棋盘上的棋子数量
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|square| square.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_COLS {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_ROWS {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_COLS {
                let c = self
                    .get(Position::new_unchecked(row as u8, col as u8))
                    .map(|piece| piece.to_layout_char())
                    .unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
