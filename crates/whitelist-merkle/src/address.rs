//! Leaf hashing for Ethereum addresses.
//!
//! The on-chain whitelist check hashes the raw 20 address bytes, so the
//! off-chain leaf must be `keccak256(address)` over exactly those bytes.
//! Checksummed display and parsing come from [`alloy_primitives::Address`].

use alloy_primitives::Address;
use sha3::{Digest, Keccak256};

use crate::merkle::{Hash, HASH_SIZE};

/// Hash an address into its whitelist leaf: `keccak256(address_bytes)`.
pub fn leaf_hash(address: &Address) -> Hash {
    let result = Keccak256::digest(address.as_slice());
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&result);
    hash
}

/// Hash a slice of addresses into leaves, preserving order.
pub fn leaf_hashes(addresses: &[Address]) -> Vec<Hash> {
    addresses.iter().map(leaf_hash).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_leaf_hash_deterministic() {
        let a = addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(leaf_hash(&a), leaf_hash(&a));
    }

    #[test]
    fn test_leaf_hash_distinguishes_addresses() {
        let a = addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let b = addr("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        assert_ne!(leaf_hash(&a), leaf_hash(&b));
    }

    #[test]
    fn test_leaf_hash_ignores_checksum_casing() {
        // The leaf is over the 20 raw bytes, not the string form.
        let mixed = addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let lower = addr("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert_eq!(leaf_hash(&mixed), leaf_hash(&lower));
    }

    #[test]
    fn test_parse_accepts_missing_prefix() {
        let with = addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let without = "f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse::<Address>()
            .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_display_is_eip55_checksummed() {
        // Lowercase in, canonical mixed-case out.
        let address = addr("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert_eq!(
            address.to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_leaf_hashes_preserve_order() {
        let list = vec![
            addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            addr("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        ];
        let leaves = leaf_hashes(&list);
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0], leaf_hash(&list[0]));
        assert_eq!(leaves[1], leaf_hash(&list[1]));
    }
}
