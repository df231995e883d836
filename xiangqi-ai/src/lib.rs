//! 简化中国象棋 AI 引擎
//!
//! 包含:
//! - 子力评估函数
//! - 固定深度 Minimax + Alpha-Beta 搜索

mod evaluate;
mod search;

pub use evaluate::{Evaluator, Score};
pub use search::{AiConfig, AiEngine, Difficulty, NoMovesPolicy, AI_SIDE, INFINITY};

use xiangqi_core::{Board, Move, Side};

/// 以给定深度为 `side` 选择一步棋
///
/// 只读取 `board`，调用方自行决定是否落子。
pub fn select_move(board: &Board, side: Side, depth: u8) -> Option<Move> {
    AiEngine::new(AiConfig::default().with_depth(depth)).search(board, side)
}
