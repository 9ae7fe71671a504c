mod config;
mod game_loop;

use clap::Parser;
use common::config::Validate;
use common::games::tictactoe::{Board, FirstPlayerMode};
use common::{log, log_error, logger};

use config::{get_config_manager, CONFIG_FILE};
use game_loop::{run_game, GameSettings};

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Play tic-tac-toe against an alpha-beta search")]
struct Args {
    /// YAML config file; defaults are used when it does not exist
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Let the human (O) make the first move
    #[arg(long)]
    human_first: bool,

    /// Print node counts and the guaranteed outcome after every computer move
    #[arg(long)]
    show_stats: bool,

    /// Start from a position such as "X../.O./..."
    #[arg(long)]
    position: Option<String>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;

    if args.human_first {
        config.game.first_player = FirstPlayerMode::Human;
    }
    if args.show_stats {
        config.game.show_search_stats = true;
    }
    if args.position.is_some() {
        config.game.start_position = args.position.clone();
    }
    if args.verbose {
        config.log.verbose = true;
    }
    if args.use_log_prefix && config.log.prefix.is_none() {
        config.log.prefix = Some("Console".to_string());
    }
    config.validate()?;

    logger::init_logger(config.log.prefix.clone(), config.log.verbose);

    if args.write_default_config {
        config_manager.set_config(&config)?;
        log!("Configuration written to {}", args.config);
        return Ok(());
    }

    let start_position: Option<Board> = config.game.start_board()?;
    let settings = GameSettings {
        first_player: config.game.first_player,
        show_search_stats: config.game.show_search_stats,
        start_position,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = run_game(&mut stdin.lock(), &mut stdout.lock(), &settings);

    if let Err(ref e) = result {
        log_error!("Game aborted: {}", e);
    }
    result?;

    Ok(())
}
