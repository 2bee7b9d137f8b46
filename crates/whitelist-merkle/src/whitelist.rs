//! The static JSON whitelist and its Merkle tree.
//!
//! File shape, as published alongside the contract sources:
//!
//! ```json
//! { "list": ["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "0x…"] }
//! ```
//!
//! Entry order is preserved; the tree is rebuilt from scratch on every task
//! invocation, so the file is the single source of truth for the root.

use std::fs;
use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::address::leaf_hashes;
use crate::merkle::{Hash, MerkleError, MerkleTree};

/// Errors from loading the whitelist file or building its tree.
#[derive(Debug, Error)]
pub enum WhitelistError {
    /// The whitelist file could not be read.
    #[error("failed to read whitelist file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid whitelist JSON.
    #[error("failed to parse whitelist file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// Tree construction over the loaded list failed.
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// An ordered list of whitelisted account addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    list: Vec<Address>,
}

impl Whitelist {
    /// Wrap an in-memory address list.
    pub fn new(list: Vec<Address>) -> Self {
        Self { list }
    }

    /// Load the whitelist from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WhitelistError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| WhitelistError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let whitelist: Self =
            serde_json::from_str(&raw).map_err(|source| WhitelistError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), entries = whitelist.len(), "loaded whitelist");
        Ok(whitelist)
    }

    /// The whitelisted addresses, in file order.
    pub fn addresses(&self) -> &[Address] {
        &self.list
    }

    /// Number of whitelisted addresses.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True when the file contained no entries.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Whether the given account is on the list.
    pub fn contains(&self, account: &Address) -> bool {
        self.list.contains(account)
    }

    /// The leaf set: keccak256 of each address, in file order.
    pub fn leaves(&self) -> Vec<Hash> {
        leaf_hashes(&self.list)
    }

    /// Build the sorted-pair Merkle tree over the whole list.
    pub fn tree(&self) -> Result<MerkleTree, WhitelistError> {
        Ok(MerkleTree::from_leaves(self.leaves())?)
    }
}
