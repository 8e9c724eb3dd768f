//! Accounts and checksum address derivation.
//!
//! An [`Account`] owns an ed25519-sha3 key pair and the network-versioned
//! address derived from its public key. Accounts are immutable once
//! constructed and safe to share across threads.

use crate::convert;
use crate::ec::keypair::KeyPair;
use crate::hash::{ripemd160, sha3_256};
use crate::PrimitivesError;

/// The network version byte distinguishing address and transaction formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkVersion {
    /// Production network (addresses start with `N`).
    Main,
    /// Test network (addresses start with `T`).
    Test,
    /// Mijin private chain network.
    Mijin,
}

impl NetworkVersion {
    /// The raw network version byte.
    pub fn value(self) -> u8 {
        match self {
            NetworkVersion::Main => 0x68,
            NetworkVersion::Test => 0x98,
            NetworkVersion::Mijin => 0x60,
        }
    }
}

/// An account on the NEM network: a key pair plus its derived address.
#[derive(Debug, Clone)]
pub struct Account {
    key_pair: KeyPair,
    address: String,
}

impl Account {
    /// Derive an account from a 32-byte private key seed.
    ///
    /// # Arguments
    /// * `seed` - The 32-byte seed.
    /// * `network` - Network version used for the address.
    ///
    /// # Returns
    /// `Ok(Account)`, or `PrimitivesError::InvalidSeedLength`.
    pub fn from_seed(seed: &[u8], network: NetworkVersion) -> Result<Self, PrimitivesError> {
        let key_pair = KeyPair::from_seed(seed)?;
        let address = calculate_address(key_pair.public_key(), network);
        Ok(Account { key_pair, address })
    }

    /// Generate a new account from 32 cryptographically random seed bytes.
    ///
    /// # Arguments
    /// * `network` - Network version used for the address.
    pub fn random(network: NetworkVersion) -> Self {
        let key_pair = KeyPair::random();
        let address = calculate_address(key_pair.public_key(), network);
        Account { key_pair, address }
    }

    /// The account address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The account key pair.
    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// The raw public key bytes.
    pub fn public_key(&self) -> &[u8; 32] {
        self.key_pair.public_key()
    }

    /// Hex string of the public key.
    pub fn public_key_hex(&self) -> String {
        convert::to_hex(self.key_pair.public_key())
    }

    /// Hex string of the private key seed.
    pub fn private_key_hex(&self) -> String {
        convert::to_hex(self.key_pair.seed())
    }

    /// Hex string of the byte-reversed private key seed, as expected when
    /// importing the key into the network's reference wallet.
    pub fn wallet_compatible_private_key(&self) -> String {
        convert::to_hex(&convert::reverse_bytes(self.key_pair.seed()))
    }

    /// Sign a message with this account's private key.
    pub fn sign(&self, message: &[u8]) -> crate::ec::Signature {
        self.key_pair.sign(message)
    }

    /// Verify a detached signature made by this account.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.key_pair.verify(message, signature)
    }
}

/// Calculate an account address from a public key and network version.
///
/// Layout, reproduced bit for bit:
/// 1. digest = ripemd160(sha3_256(public_key))
/// 2. prepend the 1-byte network version
/// 3. checksum = first 4 bytes of sha3_256(versioned digest)
/// 4. append the checksum
/// 5. Base32-encode the 25 bytes without padding (40 characters)
///
/// # Arguments
/// * `public_key` - The compressed public key bytes.
/// * `network` - Network version byte to prepend.
pub fn calculate_address(public_key: &[u8], network: NetworkVersion) -> String {
    let digest = ripemd160(&sha3_256(public_key));

    let mut versioned = Vec::with_capacity(25);
    versioned.push(network.value());
    versioned.extend_from_slice(&digest);

    let checksum = sha3_256(&versioned);
    versioned.extend_from_slice(&checksum[..4]);

    convert::base32_nopad(&versioned)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SeedFixture {
        seed: &'static str,
        public_key: &'static str,
        address: &'static str,
    }

    // Reference-wallet fixtures for the production network.
    const SEED_FIXTURES: &[SeedFixture] = &[
        SeedFixture {
            seed: "c0786ab5bf1052330122fb862bd6ce4cc2b1aa486030d634fa7efe3ac3b70c2d",
            public_key: "d033867885270eb9013376d6614939188faa0a8ba1fa538c460fa44f82efc478",
            address: "NCCRHLLID4JQNVQHXCANFIGAYWFNS65FRSIPS2O6",
        },
        SeedFixture {
            seed: "0f3928e8aa57f53b0e77c412be66547b2b1ef28eff58e8403c12025d50c66209",
            public_key: "c2e19751291d01140e62ece9ee3923120766c6302e1099b04014fe1009bc89d3",
            address: "NCKMNCU3STBWBR7E3XD2LR7WSIXF5IVJIACOVP6B",
        },
    ];

    #[test]
    fn from_seed_fixtures() {
        for fixture in SEED_FIXTURES {
            let seed = hex::decode(fixture.seed).unwrap();
            let account = Account::from_seed(&seed, NetworkVersion::Main).unwrap();
            assert_eq!(account.public_key_hex(), fixture.public_key);
            assert_eq!(account.address(), fixture.address);
        }
    }

    #[test]
    fn from_seed_is_deterministic() {
        let seed = hex::decode(SEED_FIXTURES[0].seed).unwrap();
        let a = Account::from_seed(&seed, NetworkVersion::Main).unwrap();
        let b = Account::from_seed(&seed, NetworkVersion::Main).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn calculate_address_fixtures() {
        let cases = [
            (
                "3f9f8c791f4b55c84278c10c7596f959a43a71dc35888d16e3d26a33456b6df2",
                "NCNFK2ULFDYWIDSS4VKGK2PQHUJWP5V7M2RLKWDN",
            ),
            (
                "13394e3a7bba1b41be79e51476c2be76fd42c28ad6bfcb8efb85325f4ad77de6",
                "NCUK4VQHA4OSEXD5K2TKBEE2722PCXAEQ3SPTDBJ",
            ),
        ];
        for (public_key, expected) in cases {
            let bytes = hex::decode(public_key).unwrap();
            assert_eq!(calculate_address(&bytes, NetworkVersion::Main), expected);
        }
    }

    // Decoding any produced address back through Base32 must yield 25
    // bytes whose last 4 equal sha3_256(first 21)[..4].
    #[test]
    fn address_checksum_round_trips() {
        let account = Account::random(NetworkVersion::Test);
        let address = account.address();
        assert_eq!(address.len(), 40);
        assert!(address.starts_with('T'));

        let raw = base32_decode(address);
        assert_eq!(raw.len(), 25);
        assert_eq!(raw[0], NetworkVersion::Test.value());
        let checksum = sha3_256(&raw[..21]);
        assert_eq!(&raw[21..], &checksum[..4]);
    }

    #[test]
    fn wallet_compatible_key_is_reversed() {
        let seed = hex::decode(SEED_FIXTURES[0].seed).unwrap();
        let account = Account::from_seed(&seed, NetworkVersion::Main).unwrap();
        let reversed: Vec<u8> = seed.iter().rev().copied().collect();
        assert_eq!(
            account.wallet_compatible_private_key(),
            hex::encode(reversed)
        );
    }

    // Test-only Base32 decoder, MSB-first inverse of the encoder.
    fn base32_decode(s: &str) -> Vec<u8> {
        let mut bits = 0u32;
        let mut bit_count = 0u32;
        let mut out = Vec::new();
        for c in s.chars() {
            let value = match c {
                'A'..='Z' => c as u32 - 'A' as u32,
                '2'..='7' => c as u32 - '2' as u32 + 26,
                _ => panic!("invalid base32 character {c}"),
            };
            bits = (bits << 5) | value;
            bit_count += 5;
            if bit_count >= 8 {
                bit_count -= 8;
                out.push((bits >> bit_count) as u8);
            }
        }
        out
    }
}
