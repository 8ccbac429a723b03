//! # Drop Five - Terminal Driver
//!
//! Interactive terminal front end for the drop-five engine. It owns
//! the pieces the core does not: turn pacing, input handling, board
//! rendering, and the save file. The player is red, the computer is
//! blue, and the winning line lights up yellow.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use dropfive::board::{Board, Cell, Move, Side, COLS, ROWS};
use dropfive::save;
use dropfive::session::{GameStatus, Session};

/// Gravity-drop five-in-a-row against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "play")]
struct Args {
    /// Seed for the computer's fallback move draw (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Save file location
    #[arg(long, default_value = "saved.txt")]
    save_file: PathBuf,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value_t = 750)]
    delay_ms: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };

    let mut session = match save::read_save(&args.save_file)? {
        Some(board) if confirm("Found a saved game. Continue it? [y/N] ")? => {
            save::clear_save(&args.save_file)?;
            Session::resume(board)
        }
        Some(_) => {
            save::clear_save(&args.save_file)?;
            Session::new()
        }
        None => Session::new(),
    };

    println!(
        "You are {}, the computer is {}.",
        "red".red(),
        "blue".blue()
    );
    println!(
        "Enter a column (1-{}), 's' to save and quit, or 'q' to quit.",
        COLS
    );

    while !session.status().is_over() {
        match session.to_move() {
            Side::Computer => {
                if args.delay_ms > 0 {
                    thread::sleep(Duration::from_millis(args.delay_ms));
                }
                match session.play_computer(&mut rng)? {
                    Some(mv) => println!("Computer drops into column {}.", mv.col + 1),
                    None => break, // draw, status already set
                }
            }
            Side::Player => {
                render(session.board(), &[]);
                match prompt("Your move: ")?.as_str() {
                    "q" => return Ok(()),
                    "s" => {
                        save::write_save(&args.save_file, session.board())?;
                        println!("Game saved to {}.", args.save_file.display());
                        return Ok(());
                    }
                    input => match parse_column(input) {
                        Some(col) => {
                            if let Err(err) = session.play_human(col) {
                                println!("{} {}", "Invalid move:".red(), err);
                            }
                        }
                        None => println!(
                            "{}",
                            format!("Enter a column number between 1 and {}.", COLS).red()
                        ),
                    },
                }
            }
        }
    }

    let highlight: Vec<Move> = match session.status() {
        GameStatus::Won { line, .. } => line.to_vec(),
        _ => Vec::new(),
    };
    render(session.board(), &highlight);
    match session.status() {
        GameStatus::Won {
            side: Side::Player, ..
        } => println!("{}", "You win!".green()),
        GameStatus::Won {
            side: Side::Computer,
            ..
        } => println!("Computer wins!"),
        GameStatus::Draw => println!("It's a draw!"),
        GameStatus::InProgress => {}
    }
    // A finished game invalidates the save file
    save::clear_save(&args.save_file)?;
    Ok(())
}

/// Prints the grid, lighting up the given cells in yellow
fn render(board: &Board, highlight: &[Move]) {
    let header: Vec<String> = (1..=COLS).map(|col| col.to_string()).collect();
    println!();
    println!("  {}", header.join(" "));
    for row in 0..ROWS {
        print!("  ");
        for col in 0..COLS {
            let lit = highlight.iter().any(|mv| mv.row == row && mv.col == col);
            let marker = match board.cell(row, col) {
                _ if lit => "●".yellow(),
                Cell::Computer => "●".blue(),
                Cell::Player => "●".red(),
                Cell::Empty => "·".dimmed(),
            };
            print!("{} ", marker);
        }
        println!();
    }
    println!();
}

/// Reads one trimmed, lowercased input line; end of input quits
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok("q".to_string());
    }
    Ok(line.trim().to_lowercase())
}

fn confirm(message: &str) -> io::Result<bool> {
    Ok(prompt(message)? == "y")
}

/// Maps user input ("1".."8") to a 0-based column index
fn parse_column(input: &str) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|&col| (1..=COLS).contains(&col))
        .map(|col| col - 1)
}
