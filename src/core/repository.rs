use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// RepositoryStore selects the backing store for the book table
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl From<&str> for RepositoryStore {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "aws" => RepositoryStore::DynamoDB,
            "memory" | "inmemory" => RepositoryStore::InMemory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local"),
            RepositoryStore::InMemory => write!(f, "memory"),
        }
    }
}
