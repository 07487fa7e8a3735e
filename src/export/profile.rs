//! Complete sing-box client profile: tun inbound, DNS split, one
//! wireguard `proxy` outbound built from the first peer.

use serde_json::{Value, json};

use crate::wg::config::WgConfig;

const DEFAULT_DNS: &str = "1.1.1.1";
const TUN_MTU: u32 = 1500;
const OUTBOUND_MTU: u32 = 1320;

pub fn profile(cfg: &WgConfig) -> Value {
    let first = cfg.first_peer();

    let host = first
        .and_then(|p| p.endpoint_host.as_deref())
        .unwrap_or_default();
    let port = first.and_then(|p| p.endpoint_port).unwrap_or(0);

    // both resolvers point at the first DNS entry
    let dns = cfg
        .interface
        .dns
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_DNS);

    let bypass_domains: Vec<&str> = if host.is_empty() { vec![] } else { vec![host] };

    json!({
        "dns": {
            "independent_cache": true,
            "rules": [
                {
                    "domain": bypass_domains,
                    "server": "dns-direct"
                }
            ],
            "servers": [
                {
                    "address": format!("https://{dns}/dns-query"),
                    "address_resolver": "dns-direct",
                    "strategy": "ipv4_only",
                    "tag": "dns-remote"
                },
                {
                    "address": dns,
                    "address_resolver": "dns-local",
                    "detour": "direct",
                    "strategy": "ipv4_only",
                    "tag": "dns-direct"
                },
                {
                    "address": "local",
                    "detour": "direct",
                    "tag": "dns-local"
                },
                {
                    "address": "rcode://success",
                    "tag": "dns-block"
                }
            ]
        },
        "experimental": {
            "clash_api": {
                "cache_file": "../cache/clash.db",
                "external_controller": "127.0.0.1:9090",
                "external_ui": "../files/yacd"
            }
        },
        "inbounds": [
            {
                "listen": "0.0.0.0",
                "listen_port": 6450,
                "override_address": "8.8.8.8",
                "override_port": 53,
                "tag": "dns-in",
                "type": "direct"
            },
            {
                "domain_strategy": "",
                "endpoint_independent_nat": true,
                "inet4_address": cfg.interface.address,
                "mtu": cfg.interface.mtu.unwrap_or(TUN_MTU),
                "sniff": true,
                "sniff_override_destination": false,
                "stack": "mixed",
                "tag": "tun-in",
                "type": "tun"
            },
            {
                "domain_strategy": "",
                "listen": "0.0.0.0",
                "listen_port": 2080,
                "sniff": true,
                "sniff_override_destination": false,
                "tag": "mixed-in",
                "type": "mixed"
            }
        ],
        "log": { "level": "panic" },
        "outbounds": [
            {
                "local_address": cfg.interface.address,
                "mtu": cfg.interface.mtu.unwrap_or(OUTBOUND_MTU),
                "peer_public_key": first.map(|p| p.public_key.as_str()).unwrap_or_default(),
                "pre_shared_key": first.and_then(|p| p.preshared_key.as_deref()).unwrap_or_default(),
                "private_key": cfg.interface.private_key,
                "server": host,
                "server_port": port,
                "type": "wireguard",
                "domain_strategy": "",
                "tag": "proxy"
            },
            { "tag": "direct", "type": "direct" },
            { "tag": "bypass", "type": "direct" },
            { "tag": "block", "type": "block" },
            { "tag": "dns-out", "type": "dns" }
        ],
        "route": {
            "auto_detect_interface": true,
            "rules": [
                { "outbound": "dns-out", "port": [53] },
                { "inbound": ["dns-in"], "outbound": "dns-out" },
                { "geoip": ["ir"], "outbound": "bypass" },
                {
                    "ip_cidr": ["224.0.0.0/3", "ff00::/8"],
                    "outbound": "block",
                    "source_ip_cidr": ["224.0.0.0/3", "ff00::/8"]
                }
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_first_dns_twice() {
        let cfg = WgConfig::parse_config(
            "[Interface]
PrivateKey = ABC
Address = 10.0.0.2/32
DNS = 9.9.9.9, 1.0.0.1
MTU = 1380
[Peer]
PublicKey = XYZ
Endpoint = vpn.example.com:51820",
        )
        .unwrap();
        let doc = profile(&cfg);

        assert_eq!(doc["dns"]["servers"][0]["address"], "https://9.9.9.9/dns-query");
        assert_eq!(doc["dns"]["servers"][1]["address"], "9.9.9.9");
        assert_eq!(doc["dns"]["rules"][0]["domain"], json!(["vpn.example.com"]));
        assert_eq!(doc["inbounds"][1]["inet4_address"], json!(["10.0.0.2/32"]));
        assert_eq!(doc["inbounds"][1]["mtu"], 1380);

        let proxy = &doc["outbounds"][0];
        assert_eq!(proxy["tag"], "proxy");
        assert_eq!(proxy["server"], "vpn.example.com");
        assert_eq!(proxy["server_port"], 51820);
        assert_eq!(proxy["peer_public_key"], "XYZ");
        assert_eq!(proxy["private_key"], "ABC");
        assert_eq!(proxy["mtu"], 1380);
    }

    #[test]
    fn test_profile_defaults() {
        let cfg = WgConfig::parse_config("[Interface]\nPrivateKey = ABC\n").unwrap();
        let doc = profile(&cfg);

        assert_eq!(doc["dns"]["servers"][1]["address"], DEFAULT_DNS);
        assert_eq!(doc["dns"]["rules"][0]["domain"], json!([]));
        assert_eq!(doc["inbounds"][1]["mtu"], TUN_MTU);
        assert_eq!(doc["outbounds"][0]["mtu"], OUTBOUND_MTU);
        assert_eq!(doc["outbounds"][0]["server"], "");
        assert_eq!(doc["outbounds"][0]["server_port"], 0);
    }
}
