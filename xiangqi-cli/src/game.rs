//! 人机对局会话
//!
//! 持有权威棋盘和当前走子方。红方由玩家输入，黑方由引擎计算。

use anyhow::{bail, Context};
use tracing::info;
use xiangqi_ai::AiEngine;
use xiangqi_core::{Board, Move, MoveGenerator, Position, Side};

/// 对局
pub struct Game {
    board: Board,
    turn: Side,
    engine: AiEngine,
}

impl Game {
    /// 创建新对局，红方先走
    pub fn new(board: Board, engine: AiEngine) -> Self {
        Self {
            board,
            turn: Side::Red,
            engine,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// 当前走子方是否还有走法
    pub fn can_move(&self) -> bool {
        !MoveGenerator::generate(&self.board, self.turn).is_empty()
    }

    /// 玩家走棋
    pub fn play_human(&mut self, from: Position, to: Position) -> anyhow::Result<Move> {
        match self.board.get(from) {
            Some(piece) if piece.side != self.turn => {
                bail!("({}, {}) 不是{}的棋子", from.row, from.col, self.turn)
            }
            _ => {}
        }

        let mv = MoveGenerator::validate(&self.board, from, to)?;
        self.commit(mv);
        Ok(mv)
    }

    /// 引擎为当前走子方计算并落子，无子可动时返回 `None`
    pub fn play_engine(&mut self) -> Option<Move> {
        let side = self.turn;
        let mv = self.engine.search(&self.board, side)?;
        self.commit(mv);
        info!(
            "{} plays {} (depth={}, nodes={}, pieces left={})",
            side,
            mv,
            self.engine.config().depth(),
            self.engine.nodes_searched(),
            self.board.piece_count()
        );
        Some(mv)
    }

    fn commit(&mut self, mv: Move) {
        self.board = self.board.apply_move(mv.from, mv.to);
        self.turn = self.turn.opponent();
    }
}

/// 解析玩家输入 `起始行 起始列 目标行 目标列`
pub fn parse_move(input: &str) -> anyhow::Result<(Position, Position)> {
    let numbers = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i32>().with_context(|| format!("无效数字: {}", s)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let [from_row, from_col, to_row, to_col] = numbers[..] else {
        bail!("需要 4 个数字，得到 {} 个", numbers.len());
    };

    Ok((
        Position::try_new(from_row, from_col)?,
        Position::try_new(to_row, to_col)?,
    ))
}
