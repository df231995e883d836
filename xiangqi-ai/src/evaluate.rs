//! 棋局评估函数

use xiangqi_core::Board;

/// 评估分数
pub type Score = i32;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（黑方视角，正值对黑方有利）
    ///
    /// 只计算子力，不含位置分和机动性。
    pub fn evaluate(board: &Board) -> Score {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| piece.side.sign() * piece.value())
            .sum()
    }
}
