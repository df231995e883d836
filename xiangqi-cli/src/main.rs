use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xiangqi_ai::AiEngine;
use xiangqi_core::{Board, Layout, Side};

mod config;
mod game;

use game::{parse_move, Game};

#[derive(Parser)]
#[command(name = "xiangqi")]
#[command(
    about = "Play the simplified xiangqi variant against the minimax engine",
    long_about = None
)]
struct Args {
    /// Path to engine config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search depth, overrides the config file
    #[arg(short, long)]
    depth: Option<u8>,

    /// Starting layout, e.g. rnmgkgmnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNMGKGMNR
    #[arg(short, long)]
    layout: Option<String>,

    /// Let the engine play both sides for this many plies
    #[arg(long)]
    self_play: Option<u32>,

    /// Pause before the engine replies
    #[arg(long, default_value = "500")]
    delay_ms: u64,

    /// Write the effective config back to the config path and exit
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xiangqi=info".parse()?)
                .add_directive("xiangqi_ai=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut ai_config = config::load(args.config.as_deref());
    if let Some(depth) = args.depth {
        ai_config = ai_config.with_depth(depth);
    }

    if args.save_config {
        let path = args
            .config
            .clone()
            .or_else(config::default_path)
            .ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        return config::save(&ai_config, &path);
    }

    let board = match &args.layout {
        Some(layout) => Layout::parse(layout)?,
        None => Board::initial(),
    };

    info!("引擎配置: {:?}", ai_config);
    let mut game = Game::new(board, AiEngine::new(ai_config));

    match args.self_play {
        Some(plies) => self_play(&mut game, plies),
        None => play(&mut game, Duration::from_millis(args.delay_ms))?,
    }

    Ok(())
}

/// 引擎自我对弈
fn self_play(game: &mut Game, plies: u32) {
    for ply in 1..=plies {
        let side = game.turn();
        match game.play_engine() {
            Some(mv) if mv.is_capture() => println!("{:>3}. {} {} 吃子", ply, side, mv),
            Some(mv) => println!("{:>3}. {} {}", ply, side, mv),
            None => {
                println!("{} 无子可动", side);
                break;
            }
        }
    }
    let board = game.board();
    println!("{}", board);
    println!("{}", Layout::to_string(board));
    println!(
        "红方 {} 子，黑方 {} 子",
        board.pieces(Side::Red).len(),
        board.pieces(Side::Black).len()
    );
}

/// 人机对局：玩家执红，电脑执黑
fn play(game: &mut Game, delay: Duration) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", game.board());

        if !game.can_move() {
            println!("{} 无子可动，对局结束", game.turn());
            return Ok(());
        }

        print!("你的走法 (起始行 起始列 目标行 目标列，q 退出)> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        let played = parse_move(line).and_then(|(from, to)| game.play_human(from, to));
        if let Err(e) = played {
            println!("无效走法: {}", e);
            continue;
        }

        std::thread::sleep(delay);

        match game.play_engine() {
            Some(mv) if mv.is_capture() => println!("电脑走: {} 吃子", mv),
            Some(mv) => println!("电脑走: {}", mv),
            None => {
                println!("电脑无子可动，对局结束");
                println!("{}", game.board());
                return Ok(());
            }
        }
    }
}
