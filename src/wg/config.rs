use std::{fmt::Display, result::Result, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Endpoint, interface::WgInterface, peer::WgPeer, split_list};

/// Parsed config: one interface plus peers in textual order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WgConfig {
    pub interface: WgInterface,
    pub peers: Vec<WgPeer>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no [Interface] or [Peer] sections found")]
    NoSections,

    #[error("invalid endpoint: {0:?}")]
    InvalidEndpoint(String),
}

/// One `[Name]` block with its assignments in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Later assignments of the same key replace earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    // `Key = ` counts as missing, same as an absent key
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    fn number<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.value(key)?;

        match raw.parse() {
            Ok(v) => Some(v),
            Err(err) => {
                log::warn!("[{}] ignoring {} = {:?}: {}", self.name, key, raw, err);
                None
            }
        }
    }
}

/// Splits INI-style text into sections. Never fails: comment lines,
/// blank lines, stray text and assignments outside any section are
/// skipped.
pub fn parse_sections(input: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(name) = section_header(trimmed) {
            if let Some(done) = current.replace(Section::new(name)) {
                sections.push(done);
            }
            continue;
        }

        let Some(section) = current.as_mut() else {
            continue;
        };

        if let Some((key, value)) = assignment(line) {
            section.insert(key, value);
        }
    }

    sections.extend(current);
    sections
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?
        .strip_suffix(']')
        .filter(|name| !name.is_empty())
}

fn assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

impl WgInterface {
    fn build(section: &Section) -> Self {
        WgInterface {
            private_key: section.value("PrivateKey").unwrap_or_default().to_string(),
            address: section.value("Address").map(split_list).unwrap_or_default(),
            dns: section.value("DNS").map(split_list).unwrap_or_default(),
            mtu: section.number::<u32>("MTU").filter(|mtu| *mtu > 0),
        }
    }
}

impl WgPeer {
    fn build(section: &Section) -> Result<Self, ParseError> {
        let endpoint = section
            .value("Endpoint")
            .map(Endpoint::from_str)
            .transpose()?;

        let (endpoint_host, endpoint_port) = match endpoint {
            Some(Endpoint { host, port }) if !host.is_empty() => (Some(host), port),
            _ => (None, None),
        };

        let preshared_key = section
            .value("PresharedKey")
            .or_else(|| section.value("PreSharedKey"))
            .map(String::from);

        Ok(WgPeer {
            public_key: section.value("PublicKey").unwrap_or_default().to_string(),
            allowed_ips: section.value("AllowedIPs").map(split_list).unwrap_or_default(),
            endpoint_host,
            endpoint_port,
            preshared_key,
            persistent_keepalive_interval: section.number("PersistentKeepalive"),
        })
    }
}

impl WgConfig {
    /// Builds the model from parsed sections. Section names match
    /// case-insensitively; the last `[Interface]` wins.
    pub fn from_sections(sections: &[Section]) -> Result<Self, ParseError> {
        let mut interface = None;
        let mut peers = Vec::new();

        for section in sections {
            if section.name.eq_ignore_ascii_case("interface") {
                interface = Some(WgInterface::build(section));
            } else if section.name.eq_ignore_ascii_case("peer") {
                let peer = WgPeer::build(section)?;
                if let Some(endpoint) = peer.endpoint() {
                    log::debug!("peer {} at {}", peer.public_key, endpoint);
                }
                peers.push(peer);
            } else {
                log::debug!("skipping section [{}] ({} keys)", section.name, section.entries.len());
            }
        }

        if interface.is_none() && peers.is_empty() {
            return Err(ParseError::NoSections);
        }

        log::debug!(
            "built config: interface={} peers={}",
            interface.is_some(),
            peers.len()
        );

        Ok(WgConfig {
            interface: interface.unwrap_or_default(),
            peers,
        })
    }

    pub fn parse_config(input: &str) -> Result<Self, ParseError> {
        Self::from_sections(&parse_sections(input))
    }

    /// The peer that supplies server and port to single-server exporters.
    pub fn first_peer(&self) -> Option<&WgPeer> {
        self.peers.first()
    }
}

impl FromStr for WgConfig {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_config(s)
    }
}
