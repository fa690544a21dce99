use clap::Parser;
use kingfall_chess::input::{castle_squares, parse_user_input, Command, UserInput};
use kingfall_chess::{
    index_to_algebraic, Game, GameConfig, InputError, MoveError, TickAccumulator, WinReason, DEFAULT_STATS_FILENAME,
};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kingfall", about = "Two-player terminal chess: take the enemy king before the shared clock runs out")]
struct Args {
    /// JSON game configuration (clock length, rule options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the shared clock, in minutes
    #[arg(long)]
    minutes: Option<u64>,

    /// Where the game summary is written when the game ends
    #[arg(long, default_value = DEFAULT_STATS_FILENAME)]
    stats: PathBuf,
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(minutes) = args.minutes {
        config.clock_seconds = clock_seconds_from_minutes(minutes)?;
        config.validate()?;
    }

    let mut game = Game::new(&config);
    let mut ticks = TickAccumulator::default();
    let mut last_input = Instant::now();

    println!("==============================");
    println!("|        Kingfall Chess      |");
    println!("==============================");
    print_help();

    'game_loop: loop {
        if let Some(result) = game.result() {
            println!("------------------------------------------");
            println!("{}", game);
            match result.reason {
                WinReason::KingCaptured => println!("\n=== GAME OVER: {} player wins! ===", result.winner),
                WinReason::Timeout => println!(
                    "\n=== GAME OVER: time is up for {}. {} player wins! ===",
                    result.loser(),
                    result.winner
                ),
            }
            save_stats(&game, &args.stats);
            break 'game_loop;
        }

        println!("------------------------------------------");
        println!("{}", game);
        print!("\n{}'s turn. Enter move (e.g. e2e4, O-O) or command: ", game.side_to_move());
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                save_stats(&game, &args.stats);
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'/'exit'.", e);
                continue 'game_loop;
            }
        }

        // The shared clock kept running while the player was thinking.
        let now = Instant::now();
        for _ in 0..ticks.ticks_due(now.duration_since(last_input)) {
            if game.tick().expired {
                break;
            }
        }
        last_input = now;
        if game.is_over() {
            continue 'game_loop;
        }

        let input_trimmed = input_line.trim();
        if input_trimmed.is_empty() { continue 'game_loop; }

        match parse_user_input(input_trimmed) {
            Ok(UserInput::Move { from, to }) => play(&mut game, from, to),
            Ok(castle @ (UserInput::CastleKingside | UserInput::CastleQueenside)) => {
                let kingside = castle == UserInput::CastleKingside;
                match castle_squares(game.board(), game.side_to_move(), kingside) {
                    Ok((from, to)) => play(&mut game, from, to),
                    Err(e) => println!("Input Error: {}", e),
                }
            }
            Ok(UserInput::Command(command)) => match command {
                Command::Help => print_help(),
                Command::Board => println!("{}", game.board()),
                Command::History => {
                    for record in game.history() {
                        println!("{:>3}. {:?} {}", record.ply, record.player, record.notation);
                    }
                }
                Command::Save(file) => {
                    let path = file.map(PathBuf::from).unwrap_or_else(|| args.stats.clone());
                    save_stats(&game, &path);
                }
                Command::Quit => {
                    println!("Quit command received.");
                    save_stats(&game, &args.stats);
                    break 'game_loop;
                }
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Feeds a move typed in physical squares to the engine, translated into the
/// active index space.
fn play(game: &mut Game, from: u8, to: u8) {
    let Some(piece) = game.board().piece_at(from) else {
        println!("Input Error: {}", InputError::EmptySquare(index_to_algebraic(from)));
        return;
    };
    let (start, target) = (game.to_active(from), game.to_active(to));
    match game.attempt_move(piece.kind, start, target) {
        Ok(report) => {
            if let Some(captured) = report.captured {
                println!("{} takes {}.", piece.color, captured);
            }
            if report.castled {
                println!("{} castles.", piece.color);
            }
            if report.promoted {
                println!("Pawn promoted to queen on {}.", index_to_algebraic(to));
            }
            if report.outcome.is_over() {
                println!("The {} king has fallen!", piece.color.opponent());
            }
        }
        Err(e) => println!("{}", describe_rejection(&e, from, to)),
    }
}

fn describe_rejection(err: &MoveError, from: u8, to: u8) -> String {
    let mv = format!("{}{}", index_to_algebraic(from), index_to_algebraic(to));
    match err {
        MoveError::IllegalMove { kind, .. } => format!("Illegal move '{}' for a {:?}.", mv, kind),
        MoveError::OccupiedBySameColor { .. } => "Forbidden to go here!".to_string(),
        MoveError::GameAlreadyOver => "The game is already over.".to_string(),
        MoveError::NoPieceAtSource { .. } => format!("No piece on {}.", index_to_algebraic(from)),
        MoveError::NotSideToMove(color) => format!("That is a {} piece; it is not {}'s turn.", color, color),
    }
}

fn clock_seconds_from_minutes(minutes: u64) -> kingfall_chess::Result<u64> {
    minutes
        .checked_mul(60)
        .ok_or_else(|| kingfall_chess::Error::Config(format!("--minutes {} is too large", minutes)))
}

fn save_stats(game: &Game, path: &Path) {
    match game.save_summary_to_file(path) {
        Ok(()) => println!("Game stats saved to '{}'.", path.display()),
        Err(e) => eprintln!("Error: Failed to save game stats: {}", e),
    }
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <move>         Enter a move as from/to squares (e.g. e2e4, e2-e4).");
    println!("                 Castle with O-O (kingside) or O-O-O (queenside).");
    println!("                 Pawns reaching the last rank become queens.");
    println!("  board          Show the board.");
    println!("  history        Show the moves played so far.");
    println!("  save [file]    Save game stats (default: {}).", DEFAULT_STATS_FILENAME);
    println!("  help           Show this help message.");
    println!("  quit / exit    Exit the game (saves stats).");
    println!();
    println!("The game is won by capturing the enemy king. There is one shared clock;");
    println!("when it runs out, the side to move loses.");
    println!();
}
