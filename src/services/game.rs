use std::io;

use tracing::info;

use crate::commands::DispatchOutcome;
use crate::game_engine::GameEngine;
use crate::io::{InputReader, OutputWriter};
use crate::models::errors::GameResult;
use crate::models::player::{validate_player_name, Player};
use crate::ui::presenters::GamePresenter;

/// How a captain's session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Relogin,
    Exit,
}

/// Interactive game: login screen plus the turn loop.
pub struct Game {
    engine: GameEngine,
    input: Box<dyn InputReader>,
    output: Box<dyn OutputWriter>,
}

impl Game {
    pub fn new(engine: GameEngine, input: Box<dyn InputReader>, output: Box<dyn OutputWriter>) -> Self {
        Game {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn run(&mut self) -> GameResult<()> {
        GamePresenter::show_title(self.output.as_mut());

        while let Some(mut player) = self.login()? {
            if self.play(&mut player) == SessionEnd::Exit {
                break;
            }
        }

        self.output.writeln("GOODBYE, CAPTAIN.");
        Ok(())
    }

    /// Choose or create a captain. `None` means the user wants to quit.
    pub fn login(&mut self) -> GameResult<Option<Player>> {
        loop {
            let names = self.engine.saves().list_players(false)?;
            GamePresenter::show_roster(&names, self.output.as_mut());

            let Some(line) = self.read("Captain: ")? else {
                return Ok(None);
            };
            let choice = line.trim();
            match choice.to_lowercase().as_str() {
                "" => continue,
                "exit" | "quit" => return Ok(None),
                "new" => {
                    if let Some(player) = self.create_captain()? {
                        return Ok(Some(player));
                    }
                }
                _ => match self.engine.saves().load(choice)? {
                    Some(player) if player.is_dead => self.output.writeln(&format!(
                        "Captain {} is deceased and cannot be resumed.",
                        player.name
                    )),
                    Some(player) => return Ok(Some(player)),
                    None => self
                        .output
                        .writeln(&format!("No captain named '{}' on record.", choice)),
                },
            }
        }
    }

    fn create_captain(&mut self) -> GameResult<Option<Player>> {
        let Some(line) = self.read("Name your new captain: ")? else {
            return Ok(None);
        };
        let name = line.trim();
        if let Err(err) = validate_player_name(name) {
            self.output.writeln(&err.to_string());
            return Ok(None);
        }
        if self.engine.saves().player_exists(name)? {
            self.output.writeln("Name already taken");
            return Ok(None);
        }

        let player = Player::new(name, &self.engine.config().start);
        self.engine.saves_mut().save(&player)?;
        info!(player = %player.name, id = %player.id, "captain created");
        Ok(Some(player))
    }

    /// Turn loop for one captain.
    pub fn play(&mut self, player: &mut Player) -> SessionEnd {
        self.engine.begin_session(player);
        let location = self.engine.describe_location(player);
        GamePresenter::show_welcome(player, &location, self.output.as_mut());

        loop {
            let prompt = self.engine.prompt(player);
            let line = match self.input.read_line(&prompt) {
                Ok(line) => line,
                Err(_) => {
                    self.engine.end_session(player, self.output.as_mut());
                    return SessionEnd::Exit;
                }
            };
            match self
                .engine
                .process_turn(player, &line, self.input.as_mut(), self.output.as_mut())
            {
                DispatchOutcome::Continue => {}
                DispatchOutcome::Relogin => return SessionEnd::Relogin,
                DispatchOutcome::Terminate => return SessionEnd::Exit,
            }
        }
    }

    /// One line of input; `None` at end of input.
    fn read(&mut self, prompt: &str) -> GameResult<Option<String>> {
        match self.input.read_line(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::io::test_utils::{MockInput, MockOutput};
    use crate::persistence::{JsonWorldSource, MemorySaveStore, SaveStore};

    fn game_with(lines: Vec<&str>, saves: MemorySaveStore) -> Game {
        let engine = GameEngine::new(
            GameConfig::default(),
            Box::new(JsonWorldSource::builtin()),
            Box::new(saves),
        );
        Game::new(engine, Box::new(MockInput::new(lines)), Box::new(MockOutput::new()))
    }

    #[test]
    fn new_captain_is_created_and_saved() {
        let mut game = game_with(vec!["new", "Lyra", "exit"], MemorySaveStore::new());
        game.run().unwrap();
        let saved = game.engine().saves().load("lyra").unwrap().unwrap();
        assert_eq!(saved.name, "Lyra");
        assert!(saved.is_landed());
    }

    #[test]
    fn reserved_names_are_refused() {
        let mut game = game_with(vec!["new", "logout", "exit"], MemorySaveStore::new());
        game.run().unwrap();
        assert!(game.engine().saves().list_players(true).unwrap().is_empty());
    }

    #[test]
    fn dead_captains_cannot_log_in() {
        let mut saves = MemorySaveStore::new();
        let mut dead = Player::new("Juno", &GameConfig::default().start);
        dead.kill();
        saves.save(&dead).unwrap();

        let mut game = game_with(vec!["juno"], saves);
        assert!(game.login().unwrap().is_none());
    }

    #[test]
    fn existing_captain_resumes_and_logout_returns_to_login() {
        let mut saves = MemorySaveStore::new();
        let corvin = Player::new("Corvin", &GameConfig::default().start);
        saves.save(&corvin).unwrap();

        let mut game = game_with(vec!["CORVIN", "logout", "corvin", "quit"], saves);
        game.run().unwrap();
        let saved = game.engine().saves().load_by_id(corvin.id).unwrap().unwrap();
        assert_eq!(saved.name, "Corvin");
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let mut game = game_with(vec!["new", "Nova"], MemorySaveStore::new());
        assert!(game.run().is_ok());
        assert!(game.engine().saves().load("nova").unwrap().is_some());
    }
}
