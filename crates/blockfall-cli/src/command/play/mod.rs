use std::time::Duration;

use blockfall_engine::{BoardSize, GameConfig, PieceSeed};
use blockfall_tui::{Runtime, ScreenStack};

use self::{key_repeat::RepeatConfig, screens::MenuScreen, session::PlaySession};

mod key_repeat;
mod screens;
mod session;

const DEFAULT_GRAVITY_MS: u64 = 625;

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct PlayArg {
    /// Board width in columns
    #[clap(long, default_value_t = BoardSize::DEFAULT_WIDTH)]
    pub(crate) width: u16,
    /// Board height in rows
    #[clap(long, default_value_t = BoardSize::DEFAULT_HEIGHT)]
    pub(crate) height: u16,
    /// Milliseconds between two gravity steps
    #[clap(
        long,
        default_value_t = DEFAULT_GRAVITY_MS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub(crate) gravity_ms: u64,
    /// Piece sequence seed (32 hex characters); random for every game when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: BoardSize::DEFAULT_WIDTH,
            height: BoardSize::DEFAULT_HEIGHT,
            gravity_ms: DEFAULT_GRAVITY_MS,
            seed: None,
        }
    }
}

impl PlayArg {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        Ok(GameConfig {
            board_size: BoardSize::new(self.width, self.height)?,
            gravity_interval: Duration::from_millis(self.gravity_ms),
        })
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let session = PlaySession::new(arg.game_config()?, arg.seed, RepeatConfig::default());

    let mut screens = ScreenStack::new(Box::new(MenuScreen::new(session.clone())));
    Runtime::new().run(&mut screens)?;

    if let Some(summary) = session.last_game() {
        println!("{summary}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments_match_engine_defaults() {
        let config = PlayArg::default().game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_too_small_board_is_an_error() {
        let arg = PlayArg {
            width: 3,
            ..PlayArg::default()
        };
        let err = arg.game_config().unwrap_err();
        assert!(err.to_string().contains("board width 3"), "{err}");
    }

    #[test]
    fn test_too_large_board_is_an_error() {
        use clap::Parser as _;

        #[derive(clap::Parser)]
        struct Cli {
            #[clap(flatten)]
            play: PlayArg,
        }

        let cli = Cli::try_parse_from(["blockfall", "--width", "40000"]).unwrap();
        let err = cli.play.game_config().unwrap_err();
        assert!(err.to_string().contains("board width 40000"), "{err}");
    }
}
