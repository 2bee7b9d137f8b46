//! Sorted-pair Merkle tree using Keccak256.
//!
//! Construction rules, matching the tree the on-chain contract verifies
//! against:
//!
//! - every pair is ordered lexicographically by byte value before hashing,
//!   so proofs carry no position bits;
//! - an unpaired trailing node is promoted to the next level unhashed;
//! - a single-leaf tree has root == leaf and an empty proof.

use sha3::{Digest, Keccak256};
use thiserror::Error;
use tracing::debug;

/// Hash output size in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte keccak256 digest.
pub type Hash = [u8; HASH_SIZE];

/// Errors from tree construction and proof generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// The leaf set was empty; there is no root to publish.
    #[error("cannot build a Merkle tree over an empty leaf set")]
    EmptyTree,
    /// The requested leaf is not part of the tree.
    #[error("leaf {0} is not part of the tree")]
    LeafNotFound(String),
}

/// Hash two nodes into their parent, lower byte value first.
#[inline]
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    let result = hasher.finalize();
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&result);
    hash
}

/// Encode a digest as a `0x`-prefixed hex string.
pub fn to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// A Merkle membership proof: sibling hashes from leaf to root.
///
/// Because pairs are sorted before hashing, verification needs no leaf
/// index; the proof is just the ordered sibling list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Build a proof from raw sibling hashes, leaf level first.
    pub fn from_siblings(siblings: Vec<Hash>) -> Self {
        Self { siblings }
    }

    /// Sibling hashes, leaf level first.
    pub fn siblings(&self) -> &[Hash] {
        &self.siblings
    }

    /// Number of siblings in the path.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True for the single-leaf tree's proof.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Fold a leaf hash up through the path.
    pub fn root_from(&self, leaf: &Hash) -> Hash {
        self.siblings
            .iter()
            .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
    }

    /// Verify this path against a leaf and an expected root.
    pub fn verify(&self, leaf: &Hash, root: &Hash) -> bool {
        &self.root_from(leaf) == root
    }

    /// Siblings as `0x`-prefixed hex strings, leaf level first.
    pub fn hex_siblings(&self) -> Vec<String> {
        self.siblings.iter().map(to_hex).collect()
    }
}

/// A Merkle tree with all levels materialized.
///
/// The whitelists this tooling handles are small enough that keeping every
/// level in memory is the simplest way to answer proof queries.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// Levels from leaves (index 0) up to the root level.
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree over the given leaves, preserving their order.
    pub fn from_leaves(leaves: Vec<Hash>) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let level = &layers[layers.len() - 1];
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for chunk in level.chunks(2) {
                match chunk {
                    [left, right] => next.push(hash_pair(left, right)),
                    // Odd trailing node is promoted unhashed.
                    [single] => next.push(*single),
                    _ => unreachable!("chunks(2) yields 1 or 2 nodes"),
                }
            }
            layers.push(next);
        }

        debug!(
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            "built merkle tree"
        );
        Ok(Self { layers })
    }

    /// The root digest.
    pub fn root(&self) -> Hash {
        // from_leaves guarantees a non-empty top level of size 1
        self.layers[self.layers.len() - 1][0]
    }

    /// The root as a `0x`-prefixed hex string.
    pub fn hex_root(&self) -> String {
        to_hex(&self.root())
    }

    /// Number of leaves the tree was built over.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The leaf level, in insertion order.
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// Whether the given leaf is part of the tree.
    pub fn contains(&self, leaf: &Hash) -> bool {
        self.layers[0].contains(leaf)
    }

    /// Generate the membership proof for a leaf.
    ///
    /// Returns [`MerkleError::LeafNotFound`] when the leaf is not in the
    /// tree; an absent account has no valid path and silently handing out
    /// garbage would only surface later, on-chain.
    pub fn proof(&self, leaf: &Hash) -> Result<MerkleProof, MerkleError> {
        let index = self.layers[0]
            .iter()
            .position(|l| l == leaf)
            .ok_or_else(|| MerkleError::LeafNotFound(to_hex(leaf)))?;
        Ok(self.proof_at(index))
    }

    /// Generate the proof for the leaf at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn proof_at(&self, index: usize) -> MerkleProof {
        assert!(index < self.leaf_count(), "leaf index out of bounds");

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = index;

        for level in &self.layers[..self.layers.len() - 1] {
            let sibling_idx = idx ^ 1;
            if sibling_idx < level.len() {
                siblings.push(level[sibling_idx]);
            }
            // A promoted node keeps folding with no sibling at this level.
            idx /= 2;
        }

        MerkleProof::from_siblings(siblings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: u8) -> Vec<Hash> {
        (0..n).map(|i| Keccak256::digest([i]).into()).collect()
    }

    #[test]
    fn test_hash_pair_is_order_independent() {
        let a = Keccak256::digest(b"a").into();
        let b = Keccak256::digest(b"b").into();
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_empty_leaf_set_is_an_error() {
        let err = MerkleTree::from_leaves(vec![]).unwrap_err();
        assert_eq!(err, MerkleError::EmptyTree);
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let leaf: Hash = Keccak256::digest(b"only").into();
        let tree = MerkleTree::from_leaves(vec![leaf]).unwrap();
        assert_eq!(tree.root(), leaf);
        assert!(tree.proof(&leaf).unwrap().is_empty());
    }

    #[test]
    fn test_every_leaf_proves_membership() {
        for n in 2u8..=9 {
            let leaves = leaves(n);
            let tree = MerkleTree::from_leaves(leaves.clone()).unwrap();
            let root = tree.root();
            for leaf in &leaves {
                let proof = tree.proof(leaf).unwrap();
                assert!(proof.verify(leaf, &root), "failed for n={n}");
            }
        }
    }

    #[test]
    fn test_absent_leaf_is_an_error() {
        let tree = MerkleTree::from_leaves(leaves(4)).unwrap();
        let outsider: Hash = Keccak256::digest(b"outsider").into();
        assert!(matches!(
            tree.proof(&outsider),
            Err(MerkleError::LeafNotFound(_))
        ));
    }

    #[test]
    fn test_wrong_leaf_does_not_verify() {
        let leaves = leaves(5);
        let tree = MerkleTree::from_leaves(leaves.clone()).unwrap();
        let proof = tree.proof(&leaves[2]).unwrap();
        let outsider: Hash = Keccak256::digest(b"outsider").into();
        assert!(!proof.verify(&outsider, &tree.root()));
    }

    #[test]
    fn test_odd_leaf_count_promotes_trailing_node() {
        let leaves = leaves(3);
        let tree = MerkleTree::from_leaves(leaves.clone()).unwrap();
        // Levels: 3 -> 2 -> 1.
        assert_eq!(tree.depth(), 2);
        // The trailing leaf has a single sibling: the hash of the first pair.
        let proof = tree.proof(&leaves[2]).unwrap();
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.siblings()[0], hash_pair(&leaves[0], &leaves[1]));
    }

    #[test]
    fn test_to_hex() {
        let hash = [0u8; HASH_SIZE];
        assert_eq!(to_hex(&hash), format!("0x{}", "00".repeat(32)));
    }
}
