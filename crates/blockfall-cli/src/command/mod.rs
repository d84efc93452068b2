use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_default() {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

impl Default for Mode {
    fn default() -> Self {
        Self::Play(PlayArg::default())
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
        assert!(matches!(args.mode.unwrap_or_default(), Mode::Play(arg) if arg == PlayArg::default()));
    }

    #[test]
    fn test_play_arguments() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "play",
            "--width",
            "10",
            "--height",
            "20",
            "--gravity-ms",
            "500",
            "--seed",
            "0123456789abcdeffedcba9876543210",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(arg.width, 10);
        assert_eq!(arg.height, 20);
        assert_eq!(arg.gravity_ms, 500);
        assert_eq!(
            arg.seed,
            Some("0123456789abcdeffedcba9876543210".parse::<PieceSeed>().unwrap())
        );
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]).is_err());
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--gravity-ms", "0"]).is_err());
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--width", "-3"]).is_err());
    }
}
