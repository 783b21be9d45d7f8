use core::fmt;

use blake2b_simd::Params;
use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::encoding::{self, SiaDecodable, SiaDecode, SiaEncodable, SiaEncode};
use crate::merkle::{sum_leaf, Accumulator, LEAF_HASH_PREFIX};
use crate::signing::PublicKey;
use crate::specifier;
use crate::types::{
    Address, Currency, FileContractID, Hash256, Leaf, SiacoinOutput, SiacoinOutputID,
    SiafundOutput, SiafundOutputID, Specifier, TransactionID,
};

pub const ALGORITHM_ED25519: Specifier = specifier!("ed25519");

/// The revision number of a contract that has been cleared. A revision at
/// this number can never be superseded.
pub const MAX_REVISION_NUMBER: u64 = u64::MAX;

// Proof outputs are ordered: the renter's payout, the host's payout, and (for
// missed outputs) the burned collateral sent to the void.
pub const RENTER_OUTPUT_INDEX: usize = 0;
pub const HOST_OUTPUT_INDEX: usize = 1;
pub const VOID_OUTPUT_INDEX: usize = 2;

/// A generic public key that can be used to spend a utxo or revise a file
///  contract
///
/// Currently only supports ed25519 keys
#[derive(Debug, PartialEq, Clone, SiaEncode, SiaDecode)]
pub struct UnlockKey {
    pub algorithm: Specifier,
    pub key: Vec<u8>,
}

impl Serialize for UnlockKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&self.to_string(), serializer)
    }
}

impl<'de> Deserialize<'de> for UnlockKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            UnlockKey::parse_string(&s).map_err(|e| Error::custom(format!("{:?}", e)))
        } else {
            let (algorithm, key) = <(Specifier, Vec<u8>)>::deserialize(deserializer)?;
            Ok(Self { algorithm, key })
        }
    }
}

impl fmt::Display for UnlockKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, hex::encode(self.key.as_slice()))
    }
}

impl UnlockKey {
    /// Parses an UnlockKey from a string
    /// The string should be in the format "algorithm:public_key"
    pub fn parse_string(s: &str) -> Result<Self, crate::types::HexParseError> {
        let (prefix, key_str) = s
            .split_once(':')
            .ok_or(crate::types::HexParseError::MissingPrefix)?;
        Ok(UnlockKey {
            algorithm: Specifier::from(prefix),
            key: hex::decode(key_str).map_err(crate::types::HexParseError::HexError)?,
        })
    }
}

impl From<PublicKey> for UnlockKey {
    fn from(val: PublicKey) -> Self {
        UnlockKey {
            algorithm: ALGORITHM_ED25519,
            key: val.as_ref().to_vec(),
        }
    }
}

// specifies the conditions for spending an output or revising a file contract.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct UnlockConditions {
    pub timelock: u64,
    pub public_keys: Vec<UnlockKey>,
    pub signatures_required: u64,
}

impl UnlockConditions {
    pub fn new(
        timelock: u64,
        public_keys: Vec<UnlockKey>,
        required_signatures: u64,
    ) -> UnlockConditions {
        UnlockConditions {
            timelock,
            public_keys,
            signatures_required: required_signatures,
        }
    }

    pub fn standard_unlock_conditions(public_key: PublicKey) -> UnlockConditions {
        UnlockConditions {
            timelock: 0,
            public_keys: vec![public_key.into()],
            signatures_required: 1,
        }
    }

    /// The Merkle root of the conditions' leaf-hashed fields. A file contract
    /// commits to this digest, and a revision is only valid if its conditions
    /// hash to the same value.
    pub fn unlock_hash(&self) -> Hash256 {
        let mut p = Params::new();
        p.hash_length(32);

        let mut acc = Accumulator::new();
        acc.add_leaf(&sum_leaf(&p, &self.timelock.to_le_bytes()));

        for key in self.public_keys.iter() {
            let mut state = p.to_state();
            state.update(LEAF_HASH_PREFIX);
            key.encode(&mut state).unwrap();
            acc.add_leaf(&state.finalize().into());
        }

        acc.add_leaf(&sum_leaf(&p, &self.signatures_required.to_le_bytes()));
        acc.root()
    }

    pub fn address(&self) -> Address {
        Address::new(self.unlock_hash().into())
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct SiacoinInput {
    #[serde(rename = "parentID")]
    pub parent_id: SiacoinOutputID,
    pub unlock_conditions: UnlockConditions,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct SiafundInput {
    #[serde(rename = "parentID")]
    pub parent_id: SiafundOutputID,
    pub unlock_conditions: UnlockConditions,
    pub claim_address: Address,
}

/// A FileContract is an agreement between a renter and a host. The contract
/// commits to the data stored under it and pays out to one of two output
/// sets depending on whether the host proves storage within the proof
/// window.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct FileContract {
    #[serde(rename = "filesize")]
    pub file_size: u64,
    pub file_merkle_root: Hash256,
    pub window_start: u64,
    pub window_end: u64,
    pub payout: Currency,
    pub valid_proof_outputs: Vec<SiacoinOutput>,
    pub missed_proof_outputs: Vec<SiacoinOutput>,
    pub unlock_hash: Hash256,
    pub revision_number: u64,
}

/// A FileContractRevision is a successor state of a file contract. The
/// parent contract's output is spendable only by the revision's unlock
/// conditions.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct FileContractRevision {
    #[serde(rename = "parentID")]
    pub parent_id: FileContractID,
    pub unlock_conditions: UnlockConditions,
    pub revision_number: u64,
    #[serde(rename = "filesize")]
    pub file_size: u64,
    pub file_merkle_root: Hash256,
    pub window_start: u64,
    pub window_end: u64,
    pub valid_proof_outputs: Vec<SiacoinOutput>,
    pub missed_proof_outputs: Vec<SiacoinOutput>,
    pub unlock_hash: Hash256,
}

// Accessors for the conventional proof output layout. They panic if the
// contract does not carry the standard renter/host/void outputs; validators
// check output arity before using them.
macro_rules! impl_proof_output_accessors {
    ($name:ident) => {
        impl $name {
            /// The renter's payout if the host proves storage.
            pub fn valid_renter_payout(&self) -> Currency {
                self.valid_proof_outputs[RENTER_OUTPUT_INDEX].value
            }

            /// The host's payout if it proves storage.
            pub fn valid_host_payout(&self) -> Currency {
                self.valid_proof_outputs[HOST_OUTPUT_INDEX].value
            }

            pub fn valid_host_output(&self) -> &SiacoinOutput {
                &self.valid_proof_outputs[HOST_OUTPUT_INDEX]
            }

            /// The renter's payout if the host misses its proof.
            pub fn missed_renter_payout(&self) -> Currency {
                self.missed_proof_outputs[RENTER_OUTPUT_INDEX].value
            }

            /// The host's payout if it misses its proof.
            pub fn missed_host_payout(&self) -> Currency {
                self.missed_proof_outputs[HOST_OUTPUT_INDEX].value
            }

            pub fn missed_host_output(&self) -> &SiacoinOutput {
                &self.missed_proof_outputs[HOST_OUTPUT_INDEX]
            }

            /// The output burning collateral if the host misses its proof.
            pub fn missed_void_output(&self) -> &SiacoinOutput {
                &self.missed_proof_outputs[VOID_OUTPUT_INDEX]
            }
        }
    };
}

impl_proof_output_accessors!(FileContract);
impl_proof_output_accessors!(FileContractRevision);

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct StorageProof {
    #[serde(rename = "parentID")]
    pub parent_id: FileContractID,
    pub leaf: Leaf,
    pub proof: Vec<Hash256>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct CoveredFields {
    pub whole_transaction: bool,
    pub siacoin_inputs: Vec<usize>,
    pub siacoin_outputs: Vec<usize>,
    pub file_contracts: Vec<usize>,
    pub file_contract_revisions: Vec<usize>,
    pub storage_proofs: Vec<usize>,
    pub siafund_inputs: Vec<usize>,
    pub siafund_outputs: Vec<usize>,
    pub miner_fees: Vec<usize>,
    pub arbitrary_data: Vec<usize>,
    pub signatures: Vec<usize>,
}

impl CoveredFields {
    pub fn whole_transaction() -> Self {
        CoveredFields {
            whole_transaction: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSignature {
    #[serde(rename = "parentID")]
    pub parent_id: Hash256,
    pub public_key_index: u64,
    pub timelock: u64,
    pub covered_fields: CoveredFields,
    #[serde(with = "base64")]
    pub signature: Vec<u8>,
}

/// Helper module for base64 serialization
mod base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
        let base64 = STANDARD.encode(v);
        s.serialize_str(&base64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let base64 = String::deserialize(d)?;
        STANDARD
            .decode(base64.as_bytes())
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

#[derive(Default, Debug, PartialEq, Clone, Serialize, Deserialize, SiaEncode, SiaDecode)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub siacoin_inputs: Vec<SiacoinInput>,
    pub siacoin_outputs: Vec<SiacoinOutput>,
    pub file_contracts: Vec<FileContract>,
    pub file_contract_revisions: Vec<FileContractRevision>,
    pub storage_proofs: Vec<StorageProof>,
    pub siafund_inputs: Vec<SiafundInput>,
    pub siafund_outputs: Vec<SiafundOutput>,
    pub miner_fees: Vec<Currency>,
    pub arbitrary_data: Vec<Vec<u8>>,
    pub signatures: Vec<TransactionSignature>,
}

impl Transaction {
    const FILE_CONTRACT_ID_PREFIX: Specifier = specifier!("file contract");

    pub fn encode_no_sigs<W: std::io::Write>(&self, w: &mut W) -> Result<(), encoding::Error> {
        self.siacoin_inputs.encode(w)?;
        self.siacoin_outputs.encode(w)?;
        self.file_contracts.encode(w)?;
        self.file_contract_revisions.encode(w)?;
        self.storage_proofs.encode(w)?;
        self.siafund_inputs.encode(w)?;
        self.siafund_outputs.encode(w)?;
        self.miner_fees.encode(w)?;
        self.arbitrary_data.encode(w)
    }

    pub fn id(&self) -> TransactionID {
        let mut state = Params::new().hash_length(32).to_state();
        self.encode_no_sigs(&mut state).unwrap();
        let hash = state.finalize();
        hash.into()
    }

    /// The ID of the file contract at index i within this transaction. The
    /// parent contract output of every revision is identified by it.
    pub fn file_contract_id(&self, i: usize) -> FileContractID {
        let mut state = Params::new().hash_length(32).to_state();

        state.update(Self::FILE_CONTRACT_ID_PREFIX.as_bytes());
        self.encode_no_sigs(&mut state).unwrap();

        let h = state.update(&i.to_le_bytes()).finalize();
        FileContractID::from(h)
    }
}
