use serde::{Deserialize, Serialize};

use super::Endpoint;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WgPeer {
    // PublicKey
    pub public_key: String,

    // AllowedIPs
    pub allowed_ips: Vec<String>,

    // Endpoint, host part
    pub endpoint_host: Option<String>,

    // Endpoint, port part
    pub endpoint_port: Option<u16>,

    // PresharedKey / PreSharedKey
    pub preshared_key: Option<String>,

    // PersistentKeepalive
    pub persistent_keepalive_interval: Option<u32>,
}

impl WgPeer {
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint_host.as_ref().map(|host| Endpoint {
            host: host.clone(),
            port: self.endpoint_port,
        })
    }
}
