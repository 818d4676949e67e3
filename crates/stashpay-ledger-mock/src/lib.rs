//! In-memory collaborators for exercising the stashpay flows: a ledger that
//! verifies signatures, a scripted faucet, a scripted key provider, and a
//! bundled demo scenario.

mod mock_faucet;
mod mock_ledger;
mod scenarios;

pub use mock_faucet::{MockFaucet, MockKeyProvider};
pub use mock_ledger::{ExecutedCall, LedgerBehavior, MockLedger};
pub use scenarios::TestnetScenario;
