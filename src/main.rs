#[macro_use]
extern crate impl_ops;

mod agents;
mod algorithms;
mod boards;
mod checkers_errors;
mod evaluators;
mod game;
mod game_state;
mod moves;
mod pieces;
mod positions;
mod utils;

use agents::{Agent, Bot, HumanAgent};
use checkers_errors::CheckersResult;
use game::Game;
use pieces::Color;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{stdout, Write};
use text_io::read;
use tracing::info;

// ---------------------------------------------
// Main
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameMode {
    HumanVsBot,
    BotVsBot,
}

fn main() -> CheckersResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut log = File::create("result.txt")?;
    writeln!(log, "CHECKERS GAME LOGS")?;
    writeln!(log, "=================\n")?;

    loop {
        let mode = select_game_mode();
        let (blue, red): (Box<dyn Agent>, Box<dyn Agent>) = match mode {
            GameMode::HumanVsBot => {
                let player_color = select_player_color();
                let bot_color = player_color.opposite();
                let level = select_difficulty(&format!("{} Bot", bot_color));
                let bot = Bot::from_level(bot_color, level, SmallRng::from_entropy())?;
                match player_color {
                    Color::Blue => (Box::new(HumanAgent), Box::new(bot) as Box<dyn Agent>),
                    Color::Red => (Box::new(bot) as Box<dyn Agent>, Box::new(HumanAgent)),
                }
            }
            GameMode::BotVsBot => {
                let red_level = select_difficulty("Red Bot");
                let blue_level = select_difficulty("Blue Bot");
                (
                    Box::new(Bot::from_level(
                        Color::Blue,
                        blue_level,
                        SmallRng::from_entropy(),
                    )?),
                    Box::new(Bot::from_level(
                        Color::Red,
                        red_level,
                        SmallRng::from_entropy(),
                    )?),
                )
            }
        };

        writeln!(log, "\nNew Game: {} vs {}", blue.name(), red.name())?;
        writeln!(log, "-----------------------------------------")?;
        info!(blue = %blue.name(), red = %red.name(), "starting game");

        let mut game = Game::new(blue, red);
        let outcome = game.play(&mut log)?;

        writeln!(log, "\nGame Result: {}\n", outcome)?;
        writeln!(log, "=================\n")?;
        log.flush()?;

        println!("{}", game.state().board());
        println!("\n{}", outcome);
        if !ask_play_again() {
            return Ok(());
        }
    }
}

fn select_game_mode() -> GameMode {
    loop {
        println!("Select game mode:");
        println!("  1) Player vs Bot");
        println!("  2) Bot vs Bot");
        match read_menu_choice() {
            1 => return GameMode::HumanVsBot,
            2 => return GameMode::BotVsBot,
            _ => println!("Please enter 1 or 2."),
        }
    }
}

fn select_player_color() -> Color {
    loop {
        println!("Select your color:");
        println!("  1) Blue (moves first)");
        println!("  2) Red (moves second)");
        match read_menu_choice() {
            1 => return Color::Blue,
            2 => return Color::Red,
            _ => println!("Please enter 1 or 2."),
        }
    }
}

fn select_difficulty(label: &str) -> u8 {
    loop {
        println!("Select difficulty for {}:", label);
        println!("  1) Beginner");
        println!("  2) Easy");
        println!("  3) Medium");
        println!("  4) Hard");
        println!("  5) Expert");
        match read_menu_choice() {
            level @ 1..=5 => return level,
            _ => println!("Please enter a level between 1 and 5."),
        }
    }
}

fn ask_play_again() -> bool {
    print!("Play again? (y/n) ");
    stdout().flush().unwrap();
    let answer: String = read!();
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn read_menu_choice() -> u8 {
    print!("> ");
    stdout().flush().unwrap();
    let raw: String = read!();
    raw.trim().parse().unwrap_or(0)
}
