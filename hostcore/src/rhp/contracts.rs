use blake2b_simd::Params;
use thiserror::Error;

use crate::encoding::SiaEncodable;
use crate::rhp::HostSettings;
use crate::types::{
    Address, Currency, FileContract, FileContractRevision, Hash256, Transaction, UnlockConditions,
    UnlockKey, MAX_REVISION_NUMBER,
};

/// The reason a proposed contract, renewal, or revision was rejected. Every
/// check maps to exactly one variant; the counterparty is untrusted, so a
/// rejection carries no further context than the violated invariant.
#[derive(Debug, PartialEq, Error)]
pub enum ValidationError {
    // structural checks shared by every revision pair
    #[error("wrong number of valid proof outputs")]
    ValidOutputCount,
    #[error("wrong number of missed proof outputs")]
    MissedOutputCount,
    #[error("valid proof output {0} address should not change")]
    ValidOutputAddressChanged(usize),
    #[error("missed proof output {0} address should not change")]
    MissedOutputAddressChanged(usize),
    #[error("proof output sum overflow")]
    PayoutSumOverflow,
    #[error("valid proof output sum must not change")]
    ValidPayoutSumChanged,
    #[error("missed proof output sum must not change")]
    MissedPayoutSumChanged,
    #[error("unlock hash must not change")]
    UnlockHashChanged,
    #[error("unlock conditions must not change")]
    UnlockConditionsChanged,
    #[error("revision number must increase")]
    RevisionNumberNotIncreased,
    #[error("window start must not change")]
    WindowStartChanged,
    #[error("window end must not change")]
    WindowEndChanged,
    #[error("renter valid proof output must not increase")]
    RenterValidPayoutIncreased,
    #[error("renter missed proof output must not increase")]
    RenterMissedPayoutIncreased,
    #[error("renter payouts must be equal")]
    RenterPayoutsNotEqual,

    // formation
    #[error("initial filesize should be 0")]
    InitialFilesizeNotZero,
    #[error("initial revision number should be 0")]
    InitialRevisionNumberNotZero,
    #[error("initial Merkle root should be empty")]
    InitialMerkleRootNotEmpty,
    #[error("contract ends too soon to safely submit the contract transaction")]
    WindowStartTooSoon,
    #[error("contract duration is too long")]
    ContractDurationTooLong,
    #[error("proof window is too small")]
    ProofWindowTooSmall,
    #[error("wrong address for host valid output")]
    HostValidOutputAddress,
    #[error("wrong address for host missed output")]
    HostMissedOutputAddress,
    #[error("wrong address for void output")]
    VoidOutputAddress,
    #[error("void output should have value 0")]
    VoidOutputValueNotZero,
    #[error("host valid payout is too small")]
    HostPayoutTooSmall,
    #[error("host valid and missed outputs must be equal")]
    HostPayoutsNotEqual,
    #[error("excessive initial collateral")]
    ExcessiveInitialCollateral,
    #[error("incorrect unlock hash")]
    InvalidUnlockHash,

    // renewal
    #[error("revision number must be zero")]
    RenewalRevisionNumberNotZero,
    #[error("filesize must not change")]
    FilesizeChanged,
    #[error("file Merkle root must not change")]
    FileMerkleRootChanged,
    #[error("renewal window must not end before current window")]
    WindowEndShortened,
    #[error("host valid payout must be greater than host missed payout")]
    HostMissedPayoutExceedsValid,
    #[error("excessive host burn: expected at most {expected} got {got}")]
    ExcessiveHostBurn { expected: Currency, got: Currency },
    #[error("risked collateral must be sent to void output")]
    BurnNotSentToVoid,
    #[error("valid host output must be more than base storage cost")]
    HostPayoutBelowBaseRevenue,
    #[error("collateral exceeds maximum: expected at most {max} got {got}")]
    CollateralExceedsMax { max: Currency, got: Currency },

    // funding and transfer checks of the general revision validator
    #[error("renter valid proof output must be greater than the payment amount")]
    InsufficientRenterValidFunds,
    #[error("renter missed proof output must be greater than the payment amount")]
    InsufficientRenterMissedFunds,
    #[error("host missed proof output must be greater than the collateral amount")]
    InsufficientHostMissedFunds,
    #[error("renter valid payout must decrease")]
    RenterValidPayoutMustDecrease,
    #[error("host valid payout must increase")]
    HostValidPayoutMustIncrease,
    #[error("host missed payout must decrease")]
    HostMissedPayoutMustDecrease,
    #[error("expected {from_renter} to be transferred to host, got {to_host}")]
    TransferMismatch {
        from_renter: Currency,
        to_host: Currency,
    },
    #[error("insufficient host transfer: expected at least {expected}, got {got}")]
    InsufficientHostTransfer { expected: Currency, got: Currency },
    #[error("excessive collateral transfer: expected at most {expected}, got {got}")]
    ExcessiveCollateralTransfer { expected: Currency, got: Currency },

    // program revisions
    #[error("host expected to burn at most {expected}, but burned {got}")]
    HostBurnExceedsExpected { expected: Currency, got: Currency },
    #[error("void output value must increase")]
    VoidOutputValueMustIncrease,
    #[error("host burn value {host_burn} should match void burn value {void_burn}")]
    BurnMismatch {
        host_burn: Currency,
        void_burn: Currency,
    },
    #[error("renter valid proof output must not change")]
    RenterValidPayoutChanged,
    #[error("host valid proof output must not change")]
    HostValidPayoutChanged,
    #[error("renter missed proof output must not change")]
    RenterMissedPayoutChanged,

    // payment revisions
    #[error("renter valid proof output is not reduced by the payment amount")]
    RenterValidOutputNotReduced,
    #[error("renter missed proof output is not reduced by the payment amount")]
    RenterMissedOutputNotReduced,
    #[error("host valid proof output is not increased by the payment amount")]
    HostValidOutputNotIncreased,
    #[error("host missed proof output is not increased by the payment amount")]
    HostMissedOutputNotIncreased,

    // clearing revisions
    #[error("filesize must be 0")]
    FilesizeNotZero,
    #[error("file merkle root must be empty")]
    MerkleRootNotEmpty,
    #[error("wrong number of proof outputs")]
    ProofOutputCountMismatch,
    #[error("revision number must be max value")]
    RevisionNumberNotMax,
    #[error("valid proof output value {0} must not change")]
    ClearingValidValueChanged(usize),
    #[error("valid proof output address {0} must not change")]
    ClearingValidAddressChanged(usize),
    #[error("missed proof output {0} must equal valid proof output")]
    ClearingMissedValueMismatch(usize),
    #[error("missed proof output address {0} must equal valid proof output")]
    ClearingMissedAddressMismatch(usize),

    // constructors
    #[error("incorrect number of outputs")]
    InvalidOutputCount,
    #[error("revision number must be greater than {0}")]
    RevisionNumberTooLow(u64),
    #[error("contract is locked")]
    ContractLocked,
}

fn contract_unlock_conditions(host_key: UnlockKey, renter_key: UnlockKey) -> UnlockConditions {
    UnlockConditions {
        timelock: 0,
        public_keys: vec![renter_key, host_key],
        signatures_required: 2,
    }
}

/// Verifies that a new revision is a valid successor of the current revision.
/// Only the revision number and the proof output values are allowed to
/// change; payouts must be conserved and the renter must never gain.
fn validate_std_revision(
    current: &FileContractRevision,
    revision: &FileContractRevision,
) -> Result<(), ValidationError> {
    // output arity first, everything below indexes into both revisions
    if current.valid_proof_outputs.len() != 2 || revision.valid_proof_outputs.len() != 2 {
        return Err(ValidationError::ValidOutputCount);
    } else if current.missed_proof_outputs.len() != 3 || revision.missed_proof_outputs.len() != 3 {
        return Err(ValidationError::MissedOutputCount);
    }

    let mut old_payout = Currency::zero();
    for o in current.valid_proof_outputs.iter() {
        old_payout = old_payout
            .checked_add(o.value)
            .ok_or(ValidationError::PayoutSumOverflow)?;
    }
    let mut valid_payout = Currency::zero();
    for (i, o) in revision.valid_proof_outputs.iter().enumerate() {
        if o.address != current.valid_proof_outputs[i].address {
            return Err(ValidationError::ValidOutputAddressChanged(i));
        }
        valid_payout = valid_payout
            .checked_add(o.value)
            .ok_or(ValidationError::PayoutSumOverflow)?;
    }
    let mut missed_payout = Currency::zero();
    for (i, o) in revision.missed_proof_outputs.iter().enumerate() {
        if o.address != current.missed_proof_outputs[i].address {
            return Err(ValidationError::MissedOutputAddressChanged(i));
        }
        missed_payout = missed_payout
            .checked_add(o.value)
            .ok_or(ValidationError::PayoutSumOverflow)?;
    }

    if valid_payout != old_payout {
        Err(ValidationError::ValidPayoutSumChanged)
    } else if missed_payout != old_payout {
        Err(ValidationError::MissedPayoutSumChanged)
    } else if revision.unlock_hash != current.unlock_hash {
        Err(ValidationError::UnlockHashChanged)
    } else if revision.unlock_conditions.unlock_hash() != current.unlock_conditions.unlock_hash() {
        Err(ValidationError::UnlockConditionsChanged)
    } else if revision.revision_number <= current.revision_number {
        Err(ValidationError::RevisionNumberNotIncreased)
    } else if revision.window_start != current.window_start {
        Err(ValidationError::WindowStartChanged)
    } else if revision.window_end != current.window_end {
        Err(ValidationError::WindowEndChanged)
    } else if revision.valid_renter_payout() > current.valid_renter_payout() {
        Err(ValidationError::RenterValidPayoutIncreased)
    } else if revision.missed_renter_payout() > current.missed_renter_payout() {
        Err(ValidationError::RenterMissedPayoutIncreased)
    } else if revision.valid_renter_payout() != revision.missed_renter_payout() {
        Err(ValidationError::RenterPayoutsNotEqual)
    } else {
        Ok(())
    }
}

/// Returns the hash of a revision. Renter and host co-sign this digest to
/// authorize the revision.
pub fn hash_revision(rev: &FileContractRevision) -> Hash256 {
    let mut state = Params::new().hash_length(32).to_state();
    rev.encode(&mut state).unwrap();
    state.finalize().into()
}

/// Returns the first revision of a file contract formation transaction.
///
/// Panics if the transaction does not contain a file contract.
pub fn initial_revision(
    formation_txn: &Transaction,
    host_key: UnlockKey,
    renter_key: UnlockKey,
) -> FileContractRevision {
    let fc = &formation_txn.file_contracts[0];
    FileContractRevision {
        parent_id: formation_txn.file_contract_id(0),
        unlock_conditions: contract_unlock_conditions(host_key, renter_key),
        revision_number: 1,
        file_size: fc.file_size,
        file_merkle_root: fc.file_merkle_root,
        window_start: fc.window_start,
        window_end: fc.window_end,
        valid_proof_outputs: fc.valid_proof_outputs.clone(),
        missed_proof_outputs: fc.missed_proof_outputs.clone(),
        unlock_hash: fc.unlock_hash,
    }
}

/// Returns a successor of the revision with the given revision number and
/// proof output values. Output addresses are carried over unchanged.
pub fn revise(
    revision: &FileContractRevision,
    revision_number: u64,
    valid_values: &[Currency],
    missed_values: &[Currency],
) -> Result<FileContractRevision, ValidationError> {
    if valid_values.len() != revision.valid_proof_outputs.len()
        || missed_values.len() != revision.missed_proof_outputs.len()
    {
        return Err(ValidationError::InvalidOutputCount);
    } else if revision_number <= revision.revision_number {
        return Err(ValidationError::RevisionNumberTooLow(
            revision.revision_number,
        ));
    }

    let mut revision = revision.clone();
    revision.revision_number = revision_number;
    for (output, &value) in revision.valid_proof_outputs.iter_mut().zip(valid_values) {
        output.value = value;
    }
    for (output, &value) in revision.missed_proof_outputs.iter_mut().zip(missed_values) {
        output.value = value;
    }
    Ok(revision)
}

/// Returns a revision that locks the contract: the valid output values are
/// replaced, the missed outputs are collapsed onto the valid outputs, the
/// stored data is zeroed, and the revision number is set to its maximum.
pub fn clearing_revision(
    revision: &FileContractRevision,
    output_values: &[Currency],
) -> Result<FileContractRevision, ValidationError> {
    if revision.revision_number == MAX_REVISION_NUMBER {
        return Err(ValidationError::ContractLocked);
    } else if output_values.len() != revision.valid_proof_outputs.len() {
        return Err(ValidationError::InvalidOutputCount);
    }

    let mut revision = revision.clone();
    for (output, &value) in revision.valid_proof_outputs.iter_mut().zip(output_values) {
        output.value = value;
    }
    revision.missed_proof_outputs = revision.valid_proof_outputs.clone();
    revision.revision_number = MAX_REVISION_NUMBER;
    revision.file_size = 0;
    revision.file_merkle_root = Hash256::default();
    Ok(revision)
}

/// Verifies that a proposed contract is valid given the host's settings.
/// Returns the collateral the host locks by accepting the contract.
pub fn validate_contract_formation(
    fc: &FileContract,
    host_key: UnlockKey,
    renter_key: UnlockKey,
    current_height: u64,
    settings: &HostSettings,
) -> Result<Currency, ValidationError> {
    if fc.file_size != 0 {
        Err(ValidationError::InitialFilesizeNotZero)
    } else if fc.revision_number != 0 {
        Err(ValidationError::InitialRevisionNumberNotZero)
    } else if fc.file_merkle_root != Hash256::default() {
        Err(ValidationError::InitialMerkleRootNotEmpty)
    } else if fc.window_start < current_height + settings.window_size {
        Err(ValidationError::WindowStartTooSoon)
    } else if fc.window_start > current_height + settings.max_duration {
        Err(ValidationError::ContractDurationTooLong)
    } else if fc.window_end < fc.window_start + settings.window_size {
        Err(ValidationError::ProofWindowTooSmall)
    } else if fc.valid_proof_outputs.len() != 2 {
        Err(ValidationError::ValidOutputCount)
    } else if fc.missed_proof_outputs.len() != 3 {
        Err(ValidationError::MissedOutputCount)
    } else if fc.valid_host_output().address != settings.address {
        Err(ValidationError::HostValidOutputAddress)
    } else if fc.missed_host_output().address != settings.address {
        Err(ValidationError::HostMissedOutputAddress)
    } else if fc.missed_void_output().address != Address::VOID {
        Err(ValidationError::VoidOutputAddress)
    } else if fc.missed_void_output().value != Currency::zero() {
        Err(ValidationError::VoidOutputValueNotZero)
    } else if fc.valid_host_payout() < settings.contract_price {
        Err(ValidationError::HostPayoutTooSmall)
    } else if fc.valid_host_payout() != fc.missed_host_payout() {
        Err(ValidationError::HostPayoutsNotEqual)
    } else if fc.valid_host_payout() > settings.max_collateral {
        Err(ValidationError::ExcessiveInitialCollateral)
    } else if fc.unlock_hash != contract_unlock_conditions(host_key, renter_key).unlock_hash() {
        Err(ValidationError::InvalidUnlockHash)
    } else {
        Ok(fc.valid_host_payout() - settings.contract_price)
    }
}

/// Verifies that a renewal contract is valid given the final revision of the
/// contract it renews. Returns the host's storage revenue, risked collateral,
/// and locked collateral under the renewal.
#[allow(clippy::too_many_arguments)]
pub fn validate_contract_renewal(
    existing: &FileContractRevision,
    renewal: &FileContract,
    _host_key: UnlockKey,
    _renter_key: UnlockKey,
    base_host_revenue: Currency,
    base_risked_collateral: Currency,
    current_height: u64,
    settings: &HostSettings,
) -> Result<(Currency, Currency, Currency), ValidationError> {
    if renewal.revision_number != 0 {
        return Err(ValidationError::RenewalRevisionNumberNotZero);
    } else if renewal.file_size != existing.file_size {
        return Err(ValidationError::FilesizeChanged);
    } else if renewal.file_merkle_root != existing.file_merkle_root {
        return Err(ValidationError::FileMerkleRootChanged);
    } else if renewal.window_end < existing.window_end {
        return Err(ValidationError::WindowEndShortened);
    } else if renewal.window_start < current_height + settings.window_size {
        return Err(ValidationError::WindowStartTooSoon);
    } else if renewal.window_start > current_height + settings.max_duration {
        return Err(ValidationError::ContractDurationTooLong);
    } else if renewal.window_end < renewal.window_start + settings.window_size {
        return Err(ValidationError::ProofWindowTooSmall);
    } else if renewal.valid_proof_outputs.len() != 2 {
        return Err(ValidationError::ValidOutputCount);
    } else if renewal.missed_proof_outputs.len() != 3 {
        return Err(ValidationError::MissedOutputCount);
    } else if renewal.valid_host_output().address != settings.address {
        return Err(ValidationError::HostValidOutputAddress);
    } else if renewal.missed_void_output().address != Address::VOID {
        return Err(ValidationError::VoidOutputAddress);
    }

    // the amount the host will burn on a missed proof is bounded by the
    // revenue and collateral already carried over from the renewed contract
    let expected_burn = base_host_revenue + base_risked_collateral;
    let host_burn = renewal
        .valid_host_payout()
        .checked_sub(renewal.missed_host_payout())
        .ok_or(ValidationError::HostMissedPayoutExceedsValid)?;
    if host_burn > expected_burn {
        return Err(ValidationError::ExcessiveHostBurn {
            expected: expected_burn,
            got: host_burn,
        });
    } else if renewal.missed_void_output().value != host_burn {
        return Err(ValidationError::BurnNotSentToVoid);
    }

    // the risked collateral is the portion of the burn not covered by revenue
    let risked_collateral = host_burn
        .checked_sub(base_host_revenue)
        .unwrap_or_default();

    // the locked collateral is the portion of the valid host payout beyond
    // the base revenue
    let locked_collateral = renewal
        .valid_host_payout()
        .checked_sub(base_host_revenue)
        .ok_or(ValidationError::HostPayoutBelowBaseRevenue)?;
    if locked_collateral > settings.max_collateral {
        return Err(ValidationError::CollateralExceedsMax {
            max: settings.max_collateral,
            got: locked_collateral,
        });
    }

    Ok((base_host_revenue, risked_collateral, locked_collateral))
}

/// Verifies that a new revision is valid given the current revision and that
/// the renter's payment and the host's collateral cover the value moved.
/// Returns the amount transferred to the host and the amount of collateral
/// the host put at risk.
pub fn validate_revision(
    current: &FileContractRevision,
    revision: &FileContractRevision,
    payment: Currency,
    collateral: Currency,
) -> Result<(Currency, Currency), ValidationError> {
    validate_std_revision(current, revision)?;

    // the current revision must have enough funds
    if current.valid_renter_payout() < payment {
        return Err(ValidationError::InsufficientRenterValidFunds);
    } else if current.missed_renter_payout() < payment {
        return Err(ValidationError::InsufficientRenterMissedFunds);
    } else if current.missed_host_payout() < collateral {
        return Err(ValidationError::InsufficientHostMissedFunds);
    }

    let from_renter = current
        .valid_renter_payout()
        .checked_sub(revision.valid_renter_payout())
        .ok_or(ValidationError::RenterValidPayoutMustDecrease)?;
    let to_host = revision
        .valid_host_payout()
        .checked_sub(current.valid_host_payout())
        .ok_or(ValidationError::HostValidPayoutMustIncrease)?;
    let host_burn = current
        .missed_host_payout()
        .checked_sub(revision.missed_host_payout())
        .ok_or(ValidationError::HostMissedPayoutMustDecrease)?;

    if from_renter != to_host {
        Err(ValidationError::TransferMismatch {
            from_renter,
            to_host,
        })
    } else if to_host < payment {
        Err(ValidationError::InsufficientHostTransfer {
            expected: payment,
            got: to_host,
        })
    } else if host_burn > collateral {
        Err(ValidationError::ExcessiveCollateralTransfer {
            expected: collateral,
            got: host_burn,
        })
    } else {
        Ok((to_host, host_burn))
    }
}

/// Verifies that a program revision is valid given the current revision.
/// Only the host's missed payout and the void output may change, by the burn
/// charged for the program. Returns the amount burned.
pub fn validate_program_revision(
    current: &FileContractRevision,
    revision: &FileContractRevision,
    storage: Currency,
    collateral: Currency,
) -> Result<Currency, ValidationError> {
    validate_std_revision(current, revision)?;

    let host_burn = current
        .missed_host_payout()
        .checked_sub(revision.missed_host_payout())
        .ok_or(ValidationError::HostMissedPayoutMustDecrease)?;

    // the burn is bounded by the storage and collateral charged for the
    // program
    let expected_burn = storage + collateral;
    if host_burn > expected_burn {
        return Err(ValidationError::HostBurnExceedsExpected {
            expected: expected_burn,
            got: host_burn,
        });
    }

    // the full burn must land on the void output
    let void_burn = revision
        .missed_void_output()
        .value
        .checked_sub(current.missed_void_output().value)
        .ok_or(ValidationError::VoidOutputValueMustIncrease)?;
    if void_burn != host_burn {
        return Err(ValidationError::BurnMismatch {
            host_burn,
            void_burn,
        });
    }

    // no other value may change
    if current.valid_renter_payout() != revision.valid_renter_payout() {
        Err(ValidationError::RenterValidPayoutChanged)
    } else if current.valid_host_payout() != revision.valid_host_payout() {
        Err(ValidationError::HostValidPayoutChanged)
    } else if current.missed_renter_payout() != revision.missed_renter_payout() {
        Err(ValidationError::RenterMissedPayoutChanged)
    } else {
        Ok(host_burn)
    }
}

/// Verifies that a payment revision is valid and that the payment is deducted
/// from both renter outputs and added to both host outputs. Signatures are
/// not validated.
pub fn validate_payment_revision(
    current: &FileContractRevision,
    revision: &FileContractRevision,
    payment: Currency,
) -> Result<(), ValidationError> {
    validate_std_revision(current, revision)?;

    // all outputs must be consistent with transferring exactly the payment
    // from the renter payouts to the host payouts
    match current.valid_renter_payout().checked_sub(payment) {
        Some(v) if revision.valid_renter_payout() == v => {}
        _ => return Err(ValidationError::RenterValidOutputNotReduced),
    }
    match current.missed_renter_payout().checked_sub(payment) {
        Some(v) if revision.missed_renter_payout() == v => {}
        _ => return Err(ValidationError::RenterMissedOutputNotReduced),
    }
    match current.valid_host_payout().checked_add(payment) {
        Some(v) if revision.valid_host_payout() == v => {}
        _ => return Err(ValidationError::HostValidOutputNotIncreased),
    }
    match current.missed_host_payout().checked_add(payment) {
        Some(v) if revision.missed_host_payout() == v => {}
        _ => return Err(ValidationError::HostMissedOutputNotIncreased),
    }
    Ok(())
}

/// Verifies that the final revision locks the contract: the revision number
/// is at its maximum and the valid and missed proof outputs both match the
/// current valid proof outputs. This predicate is independent of the
/// standard revision checks, since a cleared contract carries equal-length
/// valid and missed output sets.
pub fn validate_clearing_revision(
    current: &FileContractRevision,
    final_revision: &FileContractRevision,
) -> Result<(), ValidationError> {
    if final_revision.file_size != 0 {
        return Err(ValidationError::FilesizeNotZero);
    } else if final_revision.file_merkle_root != Hash256::default() {
        return Err(ValidationError::MerkleRootNotEmpty);
    } else if current.window_start != final_revision.window_start {
        return Err(ValidationError::WindowStartChanged);
    } else if current.window_end != final_revision.window_end {
        return Err(ValidationError::WindowEndChanged);
    } else if final_revision.valid_proof_outputs.len() != final_revision.missed_proof_outputs.len()
        || final_revision.valid_proof_outputs.len() != current.valid_proof_outputs.len()
    {
        return Err(ValidationError::ProofOutputCountMismatch);
    } else if final_revision.revision_number != MAX_REVISION_NUMBER {
        return Err(ValidationError::RevisionNumberNotMax);
    } else if final_revision.unlock_hash != current.unlock_hash {
        return Err(ValidationError::UnlockHashChanged);
    } else if final_revision.unlock_conditions.unlock_hash()
        != current.unlock_conditions.unlock_hash()
    {
        return Err(ValidationError::UnlockConditionsChanged);
    }

    // both output sets must equal the current valid proof outputs
    for i in 0..final_revision.valid_proof_outputs.len() {
        let (cur, valid, missed) = (
            &current.valid_proof_outputs[i],
            &final_revision.valid_proof_outputs[i],
            &final_revision.missed_proof_outputs[i],
        );
        if valid.value != cur.value {
            return Err(ValidationError::ClearingValidValueChanged(i));
        } else if valid.address != cur.address {
            return Err(ValidationError::ClearingValidAddressChanged(i));
        } else if missed.value != valid.value {
            return Err(ValidationError::ClearingMissedValueMismatch(i));
        } else if missed.address != valid.address {
            return Err(ValidationError::ClearingMissedAddressMismatch(i));
        }
    }
    Ok(())
}
