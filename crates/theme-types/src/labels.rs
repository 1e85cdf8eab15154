use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordered mapping from operator tokens to label values.
///
/// Tokens are matched exactly (case-sensitive). Several tokens may map to
/// the same label value, but every token maps to exactly one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    entries: Vec<(String, String)>,
}

impl LabelMap {
    pub fn new<I, T, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, L)>,
        T: Into<String>,
        L: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (token, label) in pairs {
            let token = token.into();
            let label = label.into();
            if token.is_empty() {
                return Err(Error::EmptyToken { label });
            }
            if entries.iter().any(|(t, _)| *t == token) {
                return Err(Error::DuplicateToken(token));
            }
            entries.push((token, label));
        }

        if entries.is_empty() {
            return Err(Error::NoLabels);
        }

        Ok(Self { entries })
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, label)| label.as_str())
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.resolve(token).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, l)| (t.as_str(), l.as_str()))
    }

    /// Distinct label values in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter(|(_, label)| seen.insert(label.as_str()))
            .map(|(_, label)| label.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Operator commands that are not labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Skip,
    Back,
    Page,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Skip => write!(f, "skip"),
            Command::Back => write!(f, "back"),
            Command::Page => write!(f, "more"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTokens {
    #[serde(default = "default_skip")]
    pub skip: String,
    #[serde(default = "default_back")]
    pub back: String,
    #[serde(default)]
    pub page: String,
}

fn default_skip() -> String {
    " ".to_string()
}

fn default_back() -> String {
    "b".to_string()
}

impl Default for CommandTokens {
    fn default() -> Self {
        Self {
            skip: default_skip(),
            back: default_back(),
            page: String::new(),
        }
    }
}

impl CommandTokens {
    pub fn command_for(&self, input: &str) -> Option<Command> {
        if input == self.page {
            Some(Command::Page)
        } else if input == self.skip {
            Some(Command::Skip)
        } else if input == self.back {
            Some(Command::Back)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Command)> {
        [
            (self.skip.as_str(), Command::Skip),
            (self.back.as_str(), Command::Back),
            (self.page.as_str(), Command::Page),
        ]
        .into_iter()
    }

    /// Reject tokens shared between commands or between a command and a label.
    pub fn check_against(&self, labels: &LabelMap) -> Result<()> {
        let commands: Vec<(&str, Command)> = self.iter().collect();
        for (i, (token, command)) in commands.iter().enumerate() {
            if let Some((_, other)) = commands[..i].iter().find(|(t, _)| t == token) {
                return Err(Error::TokenCollision {
                    token: token.to_string(),
                    command: format!("{}/{}", other, command),
                });
            }
        }

        for (token, command) in self.iter() {
            if labels.contains_token(token) {
                return Err(Error::TokenCollision {
                    token: token.to_string(),
                    command: command.to_string(),
                });
            }
        }

        Ok(())
    }
}
