//! Whitelist Merkle - sorted-pair keccak256 Merkle trees over address lists
//!
//! This crate provides the off-chain side of an on-chain whitelist check:
//! the contract owner publishes the root of a Merkle tree built over the
//! keccak256 hashes of the whitelisted addresses, and each user submits the
//! sibling path for their own leaf.
//!
//! Pairs are ordered lexicographically by byte value before every hashing
//! round, so a proof verifies by folding alone, without position bits. The
//! same rule must be mirrored by the on-chain verifier.
//!
//! # Components
//!
//! - `address` - leaf hashing for Ethereum addresses
//! - `merkle` - tree construction, proof generation, proof verification
//! - `whitelist` - the static JSON address list and its tree

pub mod address;
pub mod merkle;
pub mod whitelist;

// Re-exports for convenience
pub use address::leaf_hash;
pub use alloy_primitives::Address;
pub use merkle::{Hash, MerkleError, MerkleProof, MerkleTree, HASH_SIZE};
pub use whitelist::{Whitelist, WhitelistError};
