use std::borrow::Cow;

use colored::Colorize;
use tracing::debug;

use crate::filesystem::{FilesystemError, NodeId, NodeKind, Tree};
use crate::shell::command::{Command, HELP};

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Line(String),
    Error(String),
}

impl Output {
    /// Text to print; errors are shown in red when `color` is set.
    pub fn render(&self, color: bool) -> Cow<'_, str> {
        match self {
            Output::Line(line) => Cow::Borrowed(line),
            Output::Error(line) if color => Cow::Owned(line.red().to_string()),
            Output::Error(line) => Cow::Borrowed(line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(Vec<Output>),
    Clear,
    Exit,
}

/// The tree plus the current directory of the one interactive user.
#[derive(Debug)]
pub struct Session {
    tree: Tree,
    cwd: NodeId,
}

impl Session {
    pub fn new(tree: Tree) -> Self {
        let cwd = tree.root();
        Self { tree, cwd }
    }

    #[cfg(test)]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[cfg(test)]
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn cwd_path(&self) -> String {
        self.tree.absolute_path(self.cwd)
    }

    pub fn execute_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Some(command) => self.execute(command),
            None => Outcome::Continue(Vec::new()),
        }
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        debug!("Executing {command:?}");
        let mut out = Vec::new();
        let name = command.name().to_string();

        match command {
            Command::Help => out.extend(HELP.lines().map(|line| Output::Line(line.into()))),
            Command::Ls(operands) => self.ls(&operands, &mut out),
            Command::Tree(operands) => self.tree_listing(&operands, &mut out),
            Command::Pwd => out.push(Output::Line(self.cwd_path())),
            Command::Cd(path) => self.cd(path.as_deref(), &mut out),
            Command::Find(operands) => self.find(&operands, &mut out),
            Command::Stat(operands) => self.stat(&operands, &mut out),
            Command::Mkdir(operands) => self.create(&name, &operands, NodeKind::Directory, &mut out),
            Command::Touch(operands) => self.create(&name, &operands, NodeKind::File, &mut out),
            Command::Rm(operands) | Command::Rmdir(operands) => {
                self.remove(&name, &operands, &mut out)
            }
            Command::Cat(operands) => self.cat(&operands, &mut out),
            Command::Chmod(operands) => self.chmod(&operands, &mut out),
            Command::Clear => return Outcome::Clear,
            Command::Exit => return Outcome::Exit,
            Command::Unknown(_) => out.push(Output::Error("Unknown command".into())),
        }

        Outcome::Continue(out)
    }

    fn ls(&self, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            self.list_children(self.cwd, out);
            return;
        }
        for operand in operands {
            out.push(Output::Line(format!("{operand}:")));
            match self.tree.resolve(self.cwd, operand) {
                Ok(dir) => self.list_children(dir, out),
                Err(error) => out.push(failure("ls", error)),
            }
        }
    }

    fn list_children(&self, dir: NodeId, out: &mut Vec<Output>) {
        out.extend(
            self.tree
                .list_children(dir)
                .iter()
                .map(|entry| Output::Line(entry.to_string())),
        );
    }

    fn tree_listing(&self, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.extend(self.tree.list_tree(self.cwd).into_iter().map(Output::Line));
            return;
        }
        for operand in operands {
            out.push(Output::Line(format!("{operand}:")));
            out.push(Output::Line(".".into()));
            match self.tree.resolve(self.cwd, operand) {
                Ok(dir) => out.extend(self.tree.list_tree(dir).into_iter().map(Output::Line)),
                Err(error) => out.push(failure("tree", error)),
            }
        }
    }

    fn cd(&mut self, path: Option<&str>, out: &mut Vec<Output>) {
        let Some(path) = path else {
            self.cwd = self.tree.root();
            return;
        };
        match self.tree.resolve(self.cwd, path) {
            Ok(target) if self.tree[target].is_dir() => self.cwd = target,
            Ok(_) => out.push(failure(
                "cd",
                FilesystemError::NotADirectory { path: path.into() },
            )),
            Err(error) => out.push(failure("cd", error)),
        }
    }

    fn find(&self, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.push(missing_operand("find"));
            return;
        }
        for operand in operands {
            let (start, name) = match operand.strip_prefix('/') {
                Some(name) => (self.tree.root(), name),
                None => (self.cwd, operand.as_str()),
            };
            let found = self.tree.find_by_name(start, name);
            if found.is_empty() {
                out.push(Output::Error(format!(
                    "find: '{operand}': no such file or directory"
                )));
            }
            out.extend(found.into_iter().map(Output::Line));
        }
    }

    fn stat(&self, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.push(missing_operand("stat"));
            return;
        }
        for operand in operands {
            match self.tree.find_node(self.cwd, operand) {
                Ok(id) => {
                    let stat = self.tree.stat(id).to_string();
                    out.extend(stat.lines().map(|line| Output::Line(line.into())));
                }
                Err(error) => out.push(failure("stat", error)),
            }
        }
    }

    fn create(&mut self, name: &str, operands: &[String], kind: NodeKind, out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.push(missing_operand(name));
            return;
        }
        for operand in operands {
            match self.tree.create(self.cwd, operand, kind) {
                Ok(created) => out.push(Output::Line(format!("{name}: {created}"))),
                Err(error) => out.push(failure(name, error)),
            }
        }
    }

    fn remove(&mut self, name: &str, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.push(missing_operand(name));
            return;
        }
        for operand in operands {
            match self.tree.remove(self.cwd, operand) {
                Ok(removed) => {
                    if removed.id == self.cwd {
                        debug!("Current directory was removed, moving to its parent");
                        self.cwd = removed.parent;
                    }
                    out.push(Output::Line(format!("{name}: {removed}")));
                }
                Err(error) => out.push(failure(name, error)),
            }
        }
    }

    fn cat(&self, operands: &[String], out: &mut Vec<Output>) {
        if operands.is_empty() {
            out.push(missing_operand("cat"));
            return;
        }
        for operand in operands {
            match self.tree.cat(self.cwd, operand) {
                Ok(lines) => out.extend(lines.iter().cloned().map(Output::Line)),
                Err(error) => out.push(failure("cat", error)),
            }
        }
    }

    fn chmod(&mut self, operands: &[String], out: &mut Vec<Output>) {
        let [mode, paths @ ..] = operands else {
            out.push(missing_operand("chmod"));
            return;
        };
        if paths.is_empty() {
            out.push(missing_operand("chmod"));
            return;
        }
        for path in paths {
            match self.tree.chmod(self.cwd, path, mode) {
                Ok(_) => out.push(Output::Line(format!(
                    "chmod: updated permissions of '{path}'"
                ))),
                Err(error) => out.push(failure("chmod", error)),
            }
        }
    }
}

fn failure(name: &str, error: FilesystemError) -> Output {
    Output::Error(format!("{name}: {error}"))
}

fn missing_operand(name: &str) -> Output {
    Output::Error(format!("{name}: missing operand"))
}
