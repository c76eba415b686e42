/// Bitcoin network selector.
///
/// Carried explicitly through key, address, and transaction APIs instead
/// of living in a module-level constant, so the same code paths serve
/// mainnet and testnet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Mainnet (addresses start with '1', WIF prefix 0x80).
    Mainnet,
    /// Testnet (addresses start with 'm' or 'n', WIF prefix 0xef).
    Testnet,
}

impl Network {
    /// The version byte prepended to a hash160 in a P2PKH address.
    pub fn p2pkh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// The prefix byte of a WIF-encoded private key.
    pub fn wif_prefix(&self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Map a P2PKH address version byte back to its network.
    pub fn from_p2pkh_version(version: u8) -> Option<Network> {
        match version {
            0x00 => Some(Network::Mainnet),
            0x6f => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Map a WIF prefix byte back to its network.
    pub fn from_wif_prefix(prefix: u8) -> Option<Network> {
        match prefix {
            0x80 => Some(Network::Mainnet),
            0xef => Some(Network::Testnet),
            _ => None,
        }
    }
}
