use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{RuntimeConfig, Seed};
use crate::config::{Layout, LayoutError};
use crate::filesystem::{FilesystemError, Tree};
use crate::shell::{HELP, Outcome, Session};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        colored::control::set_override(app_config.color);

        let layout = match &app_config.seed {
            Seed::Standard => Layout::standard(),
            Seed::Empty => Layout::default(),
            Seed::File(path) => Layout::from_path(path).await.context(LayoutSnafu)?,
        };
        debug!("Loaded layout: {:?}", layout);

        let mut tree = Tree::new();
        layout.apply(&mut tree).context(SeedSnafu)?;
        let mut session = Session::new(tree);

        match &app_config.script {
            Some(path) => {
                let mut stdout = io::stdout().lock();
                Self::run_script(&mut session, path, app_config.color, &mut stdout).await
            }
            None => Self::run_interactive(&mut session, app_config.color),
        }
    }

    async fn run_script(
        session: &mut Session,
        path: &Path,
        color: bool,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let file_path = path.display().to_string();
        let bytes = compio::fs::read(path).await.context(ScriptReadSnafu {
            file_path: file_path.as_str(),
        })?;
        let script = String::from_utf8(bytes).context(ScriptEncodingSnafu { file_path })?;
        info!("Running script with {} lines", script.lines().count());

        for line in script.lines() {
            if !Self::step(session, line, color, out)? {
                break;
            }
        }
        out.flush().context(StdoutSnafu)
    }

    fn run_interactive(session: &mut Session, color: bool) -> Result<(), ApplicationError> {
        info!("Starting interactive session");
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "\n{HELP}").context(StdoutSnafu)?;
        Self::prompt(session, color, &mut stdout)?;

        for line in io::stdin().lock().lines() {
            let line = line.context(StdinSnafu)?;
            if !Self::step(session, &line, color, &mut stdout)? {
                break;
            }
            Self::prompt(session, color, &mut stdout)?;
        }

        writeln!(stdout).context(StdoutSnafu)?;
        info!("Session ended");
        Ok(())
    }

    fn prompt(session: &Session, color: bool, out: &mut impl Write) -> Result<(), ApplicationError> {
        let cwd = session.cwd_path();
        let written = if color {
            write!(out, "\n{}>> ", cwd.bold().blue())
        } else {
            write!(out, "\n{cwd}>> ")
        };
        written.context(StdoutSnafu)?;
        out.flush().context(StdoutSnafu)
    }

    /// Runs one input line. Returns `false` once the session should end.
    fn step(
        session: &mut Session,
        line: &str,
        color: bool,
        out: &mut impl Write,
    ) -> Result<bool, ApplicationError> {
        match session.execute_line(line) {
            Outcome::Continue(outputs) => {
                for output in outputs {
                    writeln!(out, "{}", output.render(color)).context(StdoutSnafu)?;
                }
            }
            Outcome::Clear => write!(out, "{CLEAR_SCREEN}").context(StdoutSnafu)?,
            Outcome::Exit => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load the initial layout"))]
    LayoutError { source: LayoutError },
    #[snafu(display("Failed to seed the tree from the layout"))]
    SeedError { source: FilesystemError },
    #[snafu(display("Failed to read the script file: {}", file_path))]
    ScriptReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Script file {} is not valid UTF-8", file_path))]
    ScriptEncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to read from stdin"))]
    StdinError { source: std::io::Error },
    #[snafu(display("Failed to write to stdout"))]
    StdoutError { source: std::io::Error },
}
