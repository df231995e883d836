//! 搜索引擎
//!
//! 实现固定深度的 Minimax + Alpha-Beta 剪枝

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use xiangqi_core::{Board, Move, MoveGenerator, Side};

use crate::evaluate::{Evaluator, Score};

/// 电脑一方，也是取最大值的一方
pub const AI_SIDE: Side = Side::Black;

/// 搜索窗口的无穷大，远大于任何子力差
pub const INFINITY: Score = 1_000_000;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2
    Easy,
    /// 中等：depth=3
    #[default]
    Medium,
    /// 困难：depth=4
    Hard,
}

impl Difficulty {
    /// 对应的搜索深度
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

/// 非叶子节点上无子可动时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoMovesPolicy {
    /// 当作叶子节点，返回静态评估值
    #[default]
    Evaluate,
    /// 返回未更新的极值：取最大值一方为 -INFINITY，取最小值一方为 +INFINITY
    Extremum,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 显式指定的搜索深度，缺省时按难度决定
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u8>,
    /// 关闭后退化为完整 Minimax，结果不变，只是更慢
    pub alpha_beta: bool,
    pub no_moves: NoMovesPolicy,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: None,
            alpha_beta: true,
            no_moves: NoMovesPolicy::default(),
        }
    }

    /// 覆盖搜索深度
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// 实际使用的搜索深度
    pub fn depth(&self) -> u8 {
        self.max_depth.unwrap_or_else(|| self.difficulty.depth())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 当前配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法，无子可动时返回 `None`
    pub fn search(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.search_scored(board, side).map(|(mv, _)| mv)
    }

    /// 搜索最佳走法及其分数
    ///
    /// 黑方取最大值，红方取最小值。分数相同时保留先生成的走法。
    /// 深度为 0 时按走子后的静态评估选择。
    pub fn search_scored(&mut self, board: &Board, side: Side) -> Option<(Move, Score)> {
        self.nodes_searched = 0;
        let started = Instant::now();
        let depth = self.config.depth();
        let maximizing = side == AI_SIDE;

        let mut best: Option<(Move, Score)> = None;

        for mv in MoveGenerator::generate(board, side) {
            // 每个候选走法都在独立的棋盘副本上展开
            let child = board.apply_move(mv.from, mv.to);
            let score = self.minimax(
                &child,
                depth.saturating_sub(1),
                side.opponent(),
                -INFINITY,
                INFINITY,
            );
            trace!("Root move {} scored {}", mv, score);

            let improved = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improved {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) => debug!(
                "{} best move {} (score={}, depth={}, nodes={}, {}ms)",
                side,
                mv,
                score,
                depth,
                self.nodes_searched,
                started.elapsed().as_millis()
            ),
            None => debug!("{} has no pseudo-legal move", side),
        }

        best
    }

    /// Minimax + Alpha-Beta 搜索
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        side: Side,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes_searched += 1;

        // 到达深度限制，返回评估值
        if depth == 0 {
            return Evaluator::evaluate(board);
        }

        let moves = MoveGenerator::generate(board, side);

        // 无子可动
        if moves.is_empty() {
            return match self.config.no_moves {
                NoMovesPolicy::Evaluate => Evaluator::evaluate(board),
                NoMovesPolicy::Extremum if side == AI_SIDE => -INFINITY,
                NoMovesPolicy::Extremum => INFINITY,
            };
        }

        if side == AI_SIDE {
            let mut max_eval = -INFINITY;
            for mv in moves {
                let child = board.apply_move(mv.from, mv.to);
                let eval = self.minimax(&child, depth - 1, side.opponent(), alpha, beta);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if self.config.alpha_beta && beta <= alpha {
                    break; // 剪枝
                }
            }
            max_eval
        } else {
            let mut min_eval = INFINITY;
            for mv in moves {
                let child = board.apply_move(mv.from, mv.to);
                let eval = self.minimax(&child, depth - 1, side.opponent(), alpha, beta);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if self.config.alpha_beta && beta <= alpha {
                    break; // 剪枝
                }
            }
            min_eval
        }
    }

    /// 获取上一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiangqi_core::{Layout, Piece, PieceKind, Position};

    fn engine(depth: u8) -> AiEngine {
        AiEngine::new(AiConfig::default().with_depth(depth))
    }

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.depth(), 2);
        assert!(easy.alpha_beta);

        let medium = AiConfig::default();
        assert_eq!(medium.difficulty, Difficulty::Medium);
        assert_eq!(medium.depth(), 3);
        assert_eq!(medium.no_moves, NoMovesPolicy::Evaluate);

        let hard = AiConfig::from_difficulty(Difficulty::Hard).with_depth(5);
        assert_eq!(hard.difficulty, Difficulty::Hard);
        assert_eq!(hard.depth(), 5);
    }

    #[test]
    fn test_config_json() {
        let config: AiConfig =
            serde_json::from_str(r#"{"max_depth": 1, "no_moves": "Extremum"}"#).unwrap();
        assert_eq!(config.depth(), 1);
        assert_eq!(config.no_moves, NoMovesPolicy::Extremum);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.alpha_beta);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_json_difficulty_sets_depth() {
        // 只写难度时，深度跟随难度
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let json = serde_json::to_string(&AiConfig::from_difficulty(difficulty)).unwrap();
            assert!(!json.contains("max_depth"));

            let config: AiConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.depth(), difficulty.depth());
        }

        let config: AiConfig = serde_json::from_str(r#"{"difficulty": "Hard"}"#).unwrap();
        assert_eq!(config.depth(), 4);

        // 显式深度优先于难度
        let config: AiConfig =
            serde_json::from_str(r#"{"difficulty": "Easy", "max_depth": 5}"#).unwrap();
        assert_eq!(config.depth(), 5);
    }

    #[test]
    fn test_engine_uses_difficulty_depth() {
        let engine = AiEngine::new(AiConfig::from_difficulty(Difficulty::Hard));
        assert_eq!(engine.config().depth(), 4);
        assert_eq!(engine.config().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_initial_position_first_move_wins_ties() {
        let board = Board::initial();

        // 一层内没有吃子，所有走法同分，保留最先生成的
        let (mv, score) = engine(1).search_scored(&board, Side::Black).unwrap();
        assert_eq!(mv.from, Position::new_unchecked(0, 0));
        assert_eq!(mv.to, Position::new_unchecked(1, 0));
        assert_eq!(score, 0);

        let (mv, score) = engine(1).search_scored(&board, Side::Red).unwrap();
        assert_eq!(mv.from, Position::new_unchecked(6, 0));
        assert_eq!(mv.to, Position::new_unchecked(5, 0));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_greedy_capture() {
        let board = Layout::parse("4k4/9/9/9/9/4c4/4R4/9/9/4K4").unwrap();
        let (mv, score) = engine(1).search_scored(&board, Side::Black).unwrap();

        assert_eq!(mv.from, Position::new_unchecked(5, 4));
        assert_eq!(mv.to, Position::new_unchecked(6, 4));
        assert_eq!(mv.captured, Some(Piece::new(PieceKind::Chariot, Side::Red)));
        assert_eq!(score, 4);
    }

    #[test]
    fn test_red_minimizes() {
        // 红车吃黑炮，分数变小
        let board = Layout::parse("4k4/9/9/9/9/4c4/4R4/9/9/4K4").unwrap();
        let (mv, score) = engine(1).search_scored(&board, Side::Red).unwrap();

        assert_eq!(mv.from, Position::new_unchecked(6, 4));
        assert_eq!(mv.to, Position::new_unchecked(5, 4));
        assert_eq!(score, -9);
    }

    #[test]
    fn test_depth_two_avoids_poisoned_capture() {
        // 黑车吃兵后会被红车吃回；同时黑车正被红兵攻击
        let board = Layout::parse("4k4/9/9/9/4r4/4P4/4R4/9/9/4K4").unwrap();

        let (greedy, score) = engine(1).search_scored(&board, Side::Black).unwrap();
        assert_eq!(greedy.to, Position::new_unchecked(5, 4));
        assert_eq!(score, 0);

        let (mv, score) = engine(2).search_scored(&board, Side::Black).unwrap();
        assert_eq!(mv.from, Position::new_unchecked(4, 4));
        assert_eq!(mv.to, Position::new_unchecked(3, 4));
        assert_eq!(score, -1);
    }

    #[test]
    fn test_no_moves_returns_none() {
        // 黑方只剩一个在第 0 行的卒，无路可走
        let board = Layout::parse("p8/9/9/9/9/9/9/9/9/4K4").unwrap();
        let mut engine = engine(3);
        assert_eq!(engine.search(&board, Side::Black), None);
        assert_eq!(engine.nodes_searched(), 0);
    }

    #[test]
    fn test_no_moves_policy() {
        // 红方只剩一个在第 0 行的兵，黑方走完后红方无子可动
        let board = Layout::parse("P8/9/9/9/4r4/9/9/9/9/9").unwrap();

        let (_, score) = engine(2).search_scored(&board, Side::Black).unwrap();
        assert_eq!(score, 8);

        let config = AiConfig {
            no_moves: NoMovesPolicy::Extremum,
            ..AiConfig::default().with_depth(2)
        };
        let (mv, score) = AiEngine::new(config).search_scored(&board, Side::Black).unwrap();
        assert_eq!(score, INFINITY);
        assert_eq!(mv.to, Position::new_unchecked(3, 4));
    }

    #[test]
    fn test_depth_zero_is_greedy() {
        let board = Layout::parse("4k4/9/9/9/9/4c4/4R4/9/9/4K4").unwrap();
        let shallow = engine(0).search_scored(&board, Side::Black);
        let one = engine(1).search_scored(&board, Side::Black);
        assert_eq!(shallow, one);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let board = Board::initial();

        let mut pruned = engine(3);
        let pruned_result = pruned.search_scored(&board, Side::Black);

        let mut full = AiEngine::new(AiConfig {
            alpha_beta: false,
            ..AiConfig::default().with_depth(3)
        });
        let full_result = full.search_scored(&board, Side::Black);

        assert_eq!(pruned_result, full_result);
        assert!(pruned.nodes_searched() < full.nodes_searched());
    }
}
