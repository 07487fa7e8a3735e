//! sing-box `wireguard` endpoint and outbound objects.
//!
//! Field names and nesting follow the sing-box schema. `null` fields are
//! written out rather than skipped since importers such as Throne expect
//! the full shape.

use serde::{Deserialize, Serialize};

use crate::wg::{config::WgConfig, peer::WgPeer};

const WIREGUARD: &str = "wireguard";
const RESERVED: [u8; 3] = [0, 0, 0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub tag: String,
    pub system: bool,
    pub name: String,
    pub mtu: Option<u32>,
    pub address: Vec<String>,
    pub private_key: String,
    pub listen_port: Option<u16>,
    pub peers: Vec<EndpointPeer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPeer {
    pub address: String,
    pub port: Option<u16>,
    pub public_key: String,
    pub pre_shared_key: String,
    pub allowed_ips: Vec<String>,
    pub persistent_keepalive_interval: u32,
    pub reserved: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub tag: String,
    pub server: Option<String>,
    pub server_port: Option<u16>,
    pub system_interface: bool,
    pub interface_name: String,
    pub local_address: Vec<String>,
    pub private_key: String,
    pub peers: Vec<OutboundPeer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPeer {
    pub server: String,
    pub server_port: Option<u16>,
    pub public_key: String,
    pub pre_shared_key: String,
    pub allowed_ips: Vec<String>,
    pub reserved: [u8; 3],
}

impl From<&WgPeer> for EndpointPeer {
    fn from(peer: &WgPeer) -> Self {
        EndpointPeer {
            address: peer.endpoint_host.clone().unwrap_or_default(),
            port: peer.endpoint_port,
            public_key: peer.public_key.clone(),
            pre_shared_key: peer.preshared_key.clone().unwrap_or_default(),
            allowed_ips: peer.allowed_ips.clone(),
            persistent_keepalive_interval: peer.persistent_keepalive_interval.unwrap_or(0),
            reserved: RESERVED,
        }
    }
}

impl From<&WgPeer> for OutboundPeer {
    fn from(peer: &WgPeer) -> Self {
        OutboundPeer {
            server: peer.endpoint_host.clone().unwrap_or_default(),
            server_port: peer.endpoint_port,
            public_key: peer.public_key.clone(),
            pre_shared_key: peer.preshared_key.clone().unwrap_or_default(),
            allowed_ips: peer.allowed_ips.clone(),
            reserved: RESERVED,
        }
    }
}

/// Local WireGuard endpoint tagged `<tag>-endpoint`.
pub fn endpoint(cfg: &WgConfig, tag: &str) -> EndpointObject {
    EndpointObject {
        kind: WIREGUARD.to_string(),
        tag: format!("{tag}-endpoint"),
        system: false,
        name: String::new(),
        mtu: cfg.interface.mtu,
        address: cfg.interface.address.clone(),
        private_key: cfg.interface.private_key.clone(),
        listen_port: None,
        peers: cfg.peers.iter().map(EndpointPeer::from).collect(),
    }
}

/// Egress rule tagged `<tag>-outbound`. Only the first peer supplies the
/// top-level server and port; every peer lands in `peers`.
pub fn outbound(cfg: &WgConfig, tag: &str) -> OutboundObject {
    let first = cfg.first_peer();

    OutboundObject {
        kind: WIREGUARD.to_string(),
        tag: format!("{tag}-outbound"),
        server: first.and_then(|p| p.endpoint_host.clone()),
        server_port: first.and_then(|p| p.endpoint_port),
        system_interface: false,
        interface_name: String::new(),
        local_address: cfg.interface.address.clone(),
        private_key: cfg.interface.private_key.clone(),
        peers: cfg.peers.iter().map(OutboundPeer::from).collect(),
    }
}

/// One-element list for consumers that import `outbounds` arrays.
pub fn outbounds_array(outbound: OutboundObject) -> Vec<OutboundObject> {
    vec![outbound]
}
