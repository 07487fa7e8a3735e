use serde::{Deserialize, Serialize};

use crate::wg::config::WgConfig;

/// Flat single-server view: interface fields plus the first peer.
/// This is what share links carry by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "type")]
    pub kind: String,
    pub server: String,
    pub server_port: u16,
    pub private_key: String,
    pub public_key: String,
    pub address: Vec<String>,
    pub dns: Vec<String>,
    pub mtu: Option<u32>,
    pub allowed_ips: Vec<String>,
}

pub fn summary(cfg: &WgConfig) -> Summary {
    let first = cfg.first_peer();

    Summary {
        kind: "wireguard".to_string(),
        server: first
            .and_then(|p| p.endpoint_host.clone())
            .unwrap_or_default(),
        server_port: first.and_then(|p| p.endpoint_port).unwrap_or(0),
        private_key: cfg.interface.private_key.clone(),
        public_key: first.map(|p| p.public_key.clone()).unwrap_or_default(),
        address: cfg.interface.address.clone(),
        dns: cfg.interface.dns.clone(),
        mtu: cfg.interface.mtu,
        allowed_ips: first.map(|p| p.allowed_ips.clone()).unwrap_or_default(),
    }
}
