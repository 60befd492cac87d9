use std::{borrow::Cow, path::Path};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::filesystem::{FilesystemError, NodeId, NodeKind, Tree};

const TREE_KEY: &str = "tree";

/// One entry of a seed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    Directory {
        name: String,
        children: Vec<LayoutEntry>,
    },
    File {
        name: String,
        contents: Vec<String>,
    },
}

impl LayoutEntry {
    fn directory(name: &str, children: Vec<LayoutEntry>) -> Self {
        LayoutEntry::Directory {
            name: name.to_string(),
            children,
        }
    }

    fn file(name: &str) -> Self {
        LayoutEntry::File {
            name: name.to_string(),
            contents: Vec::new(),
        }
    }
}

/// Entries created under the root before the session starts, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
}

impl Layout {
    /// The demonstration tree a session starts with unless told otherwise.
    pub fn standard() -> Self {
        Self {
            entries: vec![LayoutEntry::directory(
                "home",
                vec![LayoutEntry::directory(
                    "user",
                    vec![
                        LayoutEntry::directory(
                            "documents",
                            vec![
                                LayoutEntry::file("file1.txt"),
                                LayoutEntry::file("file2.txt"),
                            ],
                        ),
                        LayoutEntry::directory(
                            "pictures",
                            vec![
                                LayoutEntry::file("image1.jpg"),
                                LayoutEntry::file("image2.png"),
                            ],
                        ),
                    ],
                )],
            )],
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let file_path = path.display().to_string();
        debug!("Reading layout file: {file_path}");

        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: file_path.as_str(),
        })?;
        debug!("Successfully read layout file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu { file_path })?;
        contents.as_str().try_into()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Creates every entry under the root of `tree`, depth first, and
    /// returns how many nodes were created.
    pub fn apply(&self, tree: &mut Tree) -> Result<usize, FilesystemError> {
        let root = tree.root();
        let created = Self::apply_entries(tree, root, &self.entries)?;
        debug!("Seeded {created} nodes from layout");
        Ok(created)
    }

    fn apply_entries(
        tree: &mut Tree,
        dir: NodeId,
        entries: &[LayoutEntry],
    ) -> Result<usize, FilesystemError> {
        let mut created = 0;
        for entry in entries {
            match entry {
                LayoutEntry::Directory { name, children } => {
                    let id = tree.create(dir, name, NodeKind::Directory)?.id;
                    created += 1 + Self::apply_entries(tree, id, children)?;
                }
                LayoutEntry::File { name, contents } => {
                    let id = tree.create(dir, name, NodeKind::File)?.id;
                    if !contents.is_empty() {
                        tree.set_contents(id, contents.clone())?;
                    }
                    created += 1;
                }
            }
        }
        Ok(created)
    }

    fn parse_entries(mapping: &LinkedHashMap<Yaml, Yaml>) -> Vec<LayoutEntry> {
        mapping
            .iter()
            .filter_map(|(key, value)| match key.as_str() {
                Some(name) if is_valid_name(name) => Self::parse_entry(name, value),
                _ => {
                    warn!("Skipping layout entry with invalid name: {key:?}");
                    None
                }
            })
            .collect()
    }

    fn parse_entry(name: &str, value: &Yaml) -> Option<LayoutEntry> {
        let name = name.to_string();
        match value {
            Yaml::Mapping(children) => Some(LayoutEntry::Directory {
                name,
                children: Self::parse_entries(children),
            }),
            Yaml::Value(Scalar::Null) => Some(LayoutEntry::File {
                name,
                contents: Vec::new(),
            }),
            Yaml::Value(Scalar::String(text)) => Some(LayoutEntry::File {
                name,
                contents: text.lines().map(str::to_string).collect(),
            }),
            Yaml::Sequence(lines) => {
                let contents = lines
                    .iter()
                    .map(|line| line.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>();
                if contents.is_none() {
                    warn!("Skipping file '{name}': every line must be a string");
                }
                contents.map(|contents| LayoutEntry::File { name, contents })
            }
            other => {
                warn!("Skipping layout entry '{name}': unsupported value {other:?}");
                None
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..") && !name.contains('/')
}

impl TryFrom<&str> for Layout {
    type Error = LayoutError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedLayoutSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let entries = match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(TREE_KEY)))) {
            None | Some(Yaml::Value(Scalar::Null)) => Vec::new(),
            Some(tree) => Self::parse_entries(tree.as_mapping().context(TreeNotMapSnafu)?),
        };

        Ok(Layout { entries })
    }
}

#[derive(Debug, Snafu)]
pub enum LayoutError {
    #[snafu(display("Failed to read the layout file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Layout file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the layout file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted layout file"))]
    MalformedLayout,
    #[snafu(display("Top level of the layout should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The tree section should be a map"))]
    TreeNotMap,
}
