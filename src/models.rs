// src/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConsoleError, SubmitError};

/// Form field carrying the repository name; it addresses the update endpoint.
pub const REPOSITORY_NAME_FIELD: &str = "repository_name";
pub const REPOSITORY_DESCRIPTION_FIELD: &str = "repository_description";
pub const REPOSITORY_GITIGNORE_FIELD: &str = "repository_gitignore";
pub const ID_FIELD: &str = "id";

pub const GITIGNORE_OPTIONS: [&str; 3] = ["None", "python", "go"];

/// Flat field-id to value mapping sent as the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestPayload(BTreeMap<String, String>);

impl RequestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

/// Modal submissions reachable from a submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalTrigger {
    RepositoryCreate,
    RepositoryUpdate,
}

impl ModalTrigger {
    pub const ALL: [ModalTrigger; 2] = [ModalTrigger::RepositoryCreate, ModalTrigger::RepositoryUpdate];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalTrigger::RepositoryCreate => "repository-create",
            ModalTrigger::RepositoryUpdate => "repository-update",
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ModalTrigger::RepositoryCreate => Operation::CreateRepository,
            ModalTrigger::RepositoryUpdate => Operation::UpdateRepository,
        }
    }
}

impl FromStr for ModalTrigger {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| ConsoleError::UnknownTrigger(s.to_string()))
    }
}

impl fmt::Display for ModalTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateRepository,
    UpdateRepository,
    DeleteRepository,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateRepository => "create repository",
            Operation::UpdateRepository => "update repository",
            Operation::DeleteRepository => "delete repository",
        };
        f.write_str(name)
    }
}

/// Steps a single submission moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    BuildingRequest,
    Sent,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(SubmitError),
}

impl Outcome {
    pub fn phase(&self) -> Phase {
        match self {
            Outcome::Succeeded => Phase::Succeeded,
            Outcome::Failed(_) => Phase::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Page transition performed once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reload,
    Navigate(String),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub operation: Operation,
    pub outcome: Outcome,
    pub effect: Effect,
}
