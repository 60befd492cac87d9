use std::path::PathBuf;

use crate::cli::Cli;

/// Where the initial tree comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Standard,
    Empty,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub seed: Seed,
    pub script: Option<PathBuf>,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let seed = match (cli.layout, cli.empty) {
            (Some(path), _) => Seed::File(path),
            (None, true) => Seed::Empty,
            (None, false) => Seed::Standard,
        };
        let color =
            !cli.no_color && supports_color::on(supports_color::Stream::Stdout).is_some();

        Self {
            seed,
            script: cli.script,
            color,
        }
    }
}
