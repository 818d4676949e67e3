use stashpay_types::{Address, Network};

use crate::mock_faucet::{MockFaucet, MockKeyProvider};
use crate::mock_ledger::MockLedger;

/// Ready-made testnet scenario: a session account with a working key
/// provider, a faucet, a ledger, and a recipient.
#[derive(Clone)]
pub struct TestnetScenario {
    pub network: Network,
    pub sender: Address,
    pub recipient: Address,
    pub ledger: MockLedger,
    pub faucet: MockFaucet,
    pub keys: MockKeyProvider,
}

impl TestnetScenario {
    pub fn new() -> Self {
        let keys = MockKeyProvider::new([0x5a; 32]);
        Self {
            network: Network::Testnet,
            sender: keys.account_address(),
            recipient: Address::new("0xabc").expect("static recipient"),
            ledger: MockLedger::new(),
            faucet: MockFaucet::new(),
            keys,
        }
    }

    /// Same scenario with the ledger replaced.
    pub fn with_ledger(mut self, ledger: MockLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_faucet(mut self, faucet: MockFaucet) -> Self {
        self.faucet = faucet;
        self
    }

    pub fn with_keys(mut self, keys: MockKeyProvider) -> Self {
        self.keys = keys;
        self
    }
}

impl Default for TestnetScenario {
    fn default() -> Self {
        Self::new()
    }
}
