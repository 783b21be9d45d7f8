use serde::{Deserialize, Serialize};

use crate::types::{Address, Currency};

/// HostSettings is the snapshot of a host's advertised settings that gates
/// contract formation and renewal.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSettings {
    /// The address the host's contract payouts must be sent to.
    pub address: Address,
    /// The base fee for forming a contract. The host's valid payout must
    /// cover it.
    pub contract_price: Currency,
    /// The maximum collateral the host is willing to lock into a single
    /// contract.
    pub max_collateral: Currency,
    /// The minimum number of blocks between the current height and the start
    /// of the proof window, and the minimum width of the window itself.
    pub window_size: u64,
    /// The maximum number of blocks a contract may last.
    pub max_duration: u64,
}
