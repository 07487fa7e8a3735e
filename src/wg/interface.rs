use serde::{Deserialize, Serialize};

/// `[Interface]` section of a config. Absent keys stay empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WgInterface {
    // PrivateKey
    pub private_key: String,

    // Address
    pub address: Vec<String>,

    // DNS
    pub dns: Vec<String>,

    // MTU
    pub mtu: Option<u32>,
}

