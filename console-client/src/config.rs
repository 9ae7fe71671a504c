pub(crate) use common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use common::games::tictactoe::{is_terminal, Board, FirstPlayerMode, TicTacToeGameState};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "tictactoe_console_config.yaml";

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: GameConfig,
    pub log: LogConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub first_player: FirstPlayerMode,
    pub show_search_stats: bool,
    /// Compact board notation such as `"X../.O./..."`.
    pub start_position: Option<String>,
}

impl GameConfig {
    pub fn start_board(&self) -> Result<Option<Board>, String> {
        self.start_position
            .as_deref()
            .map(Board::from_rows)
            .transpose()
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let Some(board) = self.start_board()? else {
            return Ok(());
        };
        TicTacToeGameState::from_board(board).map_err(|e| e.to_string())?;
        if is_terminal(&board) {
            return Err(format!("start_position {} is already finished", board.to_rows()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub prefix: Option<String>,
    pub verbose: bool,
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.prefix.as_deref().is_some_and(|prefix| prefix.trim().is_empty()) {
            return Err("log prefix must not be empty".to_string());
        }
        Ok(())
    }
}
