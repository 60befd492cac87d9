pub const HELP: &str = "\
*** Follows the syntax of Linux shell commands ***

\thelp      -   print this message
\tls        -   list contents of the current directory
\ttree      -   list contents of the current directory in a tree-like format
\tpwd       -   print the current working directory
\tcd DIR    -   change directory to DIR
\tfind N    -   find file or directory named N
\tstat P    -   print metadata of file or directory at path P
\tmkdir D   -   create a directory named D
\ttouch F   -   create a file named F
\trm P      -   remove the file or directory at path P
\trmdir P   -   remove the directory at path P
\tcat P     -   print the contents of the file at path P
\tchmod M P -   change permissions of the file at path P to mode M
\tclear     -   clear the console screen
\texit      -   exit the shell";

/// A parsed command line. Operands are kept verbatim; checking them is up
/// to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Ls(Vec<String>),
    Tree(Vec<String>),
    Pwd,
    Cd(Option<String>),
    Find(Vec<String>),
    Stat(Vec<String>),
    Mkdir(Vec<String>),
    Touch(Vec<String>),
    Rm(Vec<String>),
    Rmdir(Vec<String>),
    Cat(Vec<String>),
    Chmod(Vec<String>),
    Clear,
    Exit,
    Unknown(String),
}

impl Command {
    /// Splits `line` on whitespace. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let mut operands: Vec<String> = tokens.map(str::to_string).collect();

        let command = match name {
            "help" => Command::Help,
            "ls" => Command::Ls(operands),
            "tree" => Command::Tree(operands),
            "pwd" => Command::Pwd,
            "cd" => Command::Cd((!operands.is_empty()).then(|| operands.swap_remove(0))),
            "find" => Command::Find(operands),
            "stat" => Command::Stat(operands),
            "mkdir" => Command::Mkdir(operands),
            "touch" => Command::Touch(operands),
            "rm" => Command::Rm(operands),
            "rmdir" => Command::Rmdir(operands),
            "cat" => Command::Cat(operands),
            "chmod" => Command::Chmod(operands),
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Help => "help",
            Command::Ls(_) => "ls",
            Command::Tree(_) => "tree",
            Command::Pwd => "pwd",
            Command::Cd(_) => "cd",
            Command::Find(_) => "find",
            Command::Stat(_) => "stat",
            Command::Mkdir(_) => "mkdir",
            Command::Touch(_) => "touch",
            Command::Rm(_) => "rm",
            Command::Rmdir(_) => "rmdir",
            Command::Cat(_) => "cat",
            Command::Chmod(_) => "chmod",
            Command::Clear => "clear",
            Command::Exit => "exit",
            Command::Unknown(name) => name.as_str(),
        }
    }
}
