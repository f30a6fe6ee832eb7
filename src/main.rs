//! CLI harness for the move-selection engine
//!
//! A development tool, not a service: `demo` walks through the engine's
//! scenario suite, `selfplay` pits the engine against itself with seeded
//! opening variety, `bench` times it on a fixed midgame position.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use gomoku_ai::rules::check_winner;
use gomoku_ai::{Board, Engine, EngineConfig, Pos, SearchKind, Stone, BOARD_SIZE};

#[derive(Parser)]
#[command(name = "gomoku_ai", version, about = "Five-in-a-row move-selection engine")]
struct Cli {
    /// Path to a TOML configuration file (defaults apply if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through the engine's scenario suite
    Demo,
    /// Play the engine against itself
    Selfplay {
        /// Stop after this many moves if nobody has won
        #[arg(long, default_value_t = 120)]
        max_moves: usize,
        /// RNG seed for the opening move
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Time the engine on a fixed midgame position
    Bench {
        #[arg(long, default_value_t = 5)]
        iterations: u32,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };
    let engine = Engine::with_config(config);

    match cli.command {
        Command::Demo => run_demo(&engine),
        Command::Selfplay { max_moves, seed } => run_selfplay(&engine, max_moves, seed),
        Command::Bench { iterations } => run_bench(&engine, iterations),
    }
}

fn verdict(ok: bool) -> colored::ColoredString {
    if ok {
        "PASS".green()
    } else {
        "FAIL".red()
    }
}

fn run_demo(engine: &Engine) -> ExitCode {
    println!("===========================================");
    println!("       Gomoku Move-Selection Engine");
    println!("===========================================\n");

    let mut all_ok = true;

    // Scenario 1: empty board -> center
    println!("--- Scenario 1: Empty Board ---");
    let result = engine.select(&Board::new(), Stone::Black).unwrap();
    let ok = result.best_move == Pos::new(7, 7);
    all_ok &= ok;
    println!("  Black plays: ({}, {})", result.best_move.row, result.best_move.col);
    println!("  Stage: {:?}", result.kind);
    println!("  Expected: center (7, 7) ... {}", verdict(ok));

    // Scenario 2: take the winning move
    println!("\n--- Scenario 2: Winning Move ---");
    let mut board = Board::new();
    for col in 3..7 {
        board.place_stone(Pos::new(7, col), Stone::Black);
    }
    let result = engine.select(&board, Stone::Black).unwrap();
    let ok = result.best_move == Pos::new(7, 2) && result.kind == SearchKind::Tactic("win");
    all_ok &= ok;
    println!("  Position: Black four at row 7, cols 3-6");
    println!("  Black plays: ({}, {})", result.best_move.row, result.best_move.col);
    println!("  Stage: {:?}", result.kind);
    println!("  Expected: (7, 2) via the win probe ... {}", verdict(ok));

    // Scenario 3: block the opponent
    println!("\n--- Scenario 3: Block Opponent Win ---");
    let mut board = Board::new();
    for col in 3..7 {
        board.place_stone(Pos::new(7, col), Stone::White);
    }
    board.place_stone(Pos::new(10, 5), Stone::Black);
    let result = engine.select(&board, Stone::Black).unwrap();
    let ok = result.best_move == Pos::new(7, 2) && result.kind == SearchKind::Tactic("block-win");
    all_ok &= ok;
    println!("  Position: White four at row 7, cols 3-6");
    println!("  Black plays: ({}, {})", result.best_move.row, result.best_move.col);
    println!("  Stage: {:?}", result.kind);
    println!("  Expected: (7, 2) via the block probe ... {}", verdict(ok));

    // Scenario 4: closed four with a single exit
    println!("\n--- Scenario 4: Closed Four, One Exit ---");
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 3), Stone::White);
    for col in 4..8 {
        board.place_stone(Pos::new(7, col), Stone::Black);
    }
    let black = engine.select(&board, Stone::Black).unwrap();
    let white = engine.select(&board, Stone::White).unwrap();
    let ok = black.best_move == Pos::new(7, 8) && white.best_move == Pos::new(7, 8);
    all_ok &= ok;
    println!("  Position: White (7,3), Black (7,4)-(7,7)");
    println!("  Black plays: ({}, {})", black.best_move.row, black.best_move.col);
    println!("  White plays: ({}, {})", white.best_move.row, white.best_move.col);
    println!("  Expected: both at (7, 8) ... {}", verdict(ok));

    // Scenario 5: quiet position goes to search
    println!("\n--- Scenario 5: Quiet Midgame ---");
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 7), Stone::Black);
    board.place_stone(Pos::new(8, 8), Stone::White);
    let result = engine.select(&board, Stone::Black).unwrap();
    let ok = result.kind == SearchKind::AlphaBeta && board.is_empty(result.best_move);
    all_ok &= ok;
    println!("  Black plays: ({}, {})", result.best_move.row, result.best_move.col);
    println!("  Stage: {:?}  Nodes: {}  Time: {}ms", result.kind, result.nodes, result.time_ms);
    println!("  Expected: a legal alpha-beta move ... {}", verdict(ok));

    println!("\n===========================================");
    if all_ok {
        println!("          All scenarios passed");
        ExitCode::SUCCESS
    } else {
        println!("          Some scenarios failed");
        ExitCode::FAILURE
    }
}

fn run_selfplay(engine: &Engine, max_moves: usize, seed: u64) -> ExitCode {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut board = Board::new();

    // Seeded opening in the central 5x5 for game variety; the engine itself
    // is deterministic
    let opening = Pos::new(rng.gen_range(5..10), rng.gen_range(5..10));
    board.place_stone(opening, Stone::Black);
    println!("  1. {} ({}, {})  [opening]", "Black".bold(), opening.row, opening.col);

    let mut color = Stone::White;
    for move_number in 2..=max_moves {
        let result = match engine.select(&board, color) {
            Ok(result) => result,
            Err(err) => {
                println!("  game over: {err}");
                break;
            }
        };
        board.place_stone(result.best_move, color);

        let name = match color {
            Stone::Black => "Black".bold(),
            _ => "White".bold(),
        };
        println!(
            "  {move_number}. {} ({}, {})  [{:?}, {}ms]",
            name, result.best_move.row, result.best_move.col, result.kind, result.time_ms
        );

        if let Some(winner) = check_winner(&board) {
            println!();
            print_board(&board);
            println!("\n  Winner: {winner:?} after {move_number} moves");
            return ExitCode::SUCCESS;
        }
        color = color.opponent();
    }

    println!();
    print_board(&board);
    println!("\n  No winner within {max_moves} moves");
    ExitCode::SUCCESS
}

fn run_bench(engine: &Engine, iterations: u32) -> ExitCode {
    let iterations = iterations.max(1);
    let mut board = Board::new();
    // Scattered stones: no runs, so selection reaches the search stage
    let moves = [
        (7, 7, Stone::Black),
        (8, 8, Stone::White),
        (6, 5, Stone::Black),
        (8, 6, Stone::White),
        (9, 6, Stone::Black),
        (6, 8, Stone::White),
        (5, 8, Stone::Black),
        (10, 7, Stone::White),
    ];
    for &(r, c, stone) in &moves {
        board.place_stone(Pos::new(r, c), stone);
    }

    println!("  Position: midgame with {} stones", board.stone_count());

    let mut total_time = 0u64;
    let mut total_nodes = 0u64;
    let mut first_move = None;

    for i in 0..iterations {
        let result = engine.select(&board, Stone::Black).unwrap();
        total_time += result.time_ms;
        total_nodes += result.nodes;
        if i == 0 {
            first_move = Some(result.best_move);
            println!("  Best move: ({}, {})  Stage: {:?}", result.best_move.row, result.best_move.col, result.kind);
        } else if first_move != Some(result.best_move) {
            println!("  {}", "nondeterministic result!".red());
            return ExitCode::FAILURE;
        }
    }

    let avg_time = total_time / u64::from(iterations);
    let avg_nodes = total_nodes / u64::from(iterations);
    println!("  Average time: {avg_time}ms over {iterations} runs");
    println!("  Average nodes: {avg_nodes}");
    if avg_time > 0 {
        println!("  Nodes/sec: {:.0}", avg_nodes as f64 / (avg_time as f64 / 1000.0));
    }

    let budget = engine.config().search.time_budget_ms;
    let ok = avg_time <= budget;
    println!("  Within {budget}ms budget ... {}", verdict(ok));
    ExitCode::SUCCESS
}

/// Print the board with row/column indices.
fn print_board(board: &Board) {
    print!("   ");
    for c in 0..BOARD_SIZE {
        print!("{c:2}");
    }
    println!();

    for r in 0..BOARD_SIZE {
        print!("{r:2} ");
        for c in 0..BOARD_SIZE {
            let ch = match board.get(Pos::new(r as u8, c as u8)) {
                Stone::Black => " X",
                Stone::White => " O",
                Stone::Empty => " .",
            };
            print!("{ch}");
        }
        println!();
    }
}
