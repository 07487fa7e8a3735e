use std::str::FromStr;

use config::ParseError;

pub mod config;
pub mod interface;
pub mod peer;

/// Peer endpoint as written in a config, `host:port` or `[v6addr]:port`.
///
/// Hosts are never resolved. A value the splitter cannot make sense of
/// keeps its full text as the host and leaves the port unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: Option<u16>,
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::InvalidEndpoint(s.to_string()));
        }

        if let Some((host, port)) = split_bracketed(s) {
            return Ok(Endpoint {
                host: host.to_string(),
                port: parse_port(port),
            });
        }

        Ok(match s.split_once(':') {
            Some((host, port)) if !port.contains(':') => Endpoint {
                host: host.trim().to_string(),
                port: parse_port(port),
            },
            _ => Endpoint {
                host: s.to_string(),
                port: None,
            },
        })
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.host.contains(':'), self.port) {
            (true, Some(port)) => write!(f, "[{}]:{port}", self.host),
            (false, Some(port)) => write!(f, "{}:{port}", self.host),
            (_, None) => write!(f, "{}", self.host),
        }
    }
}

// `[addr]:digits`, nothing else
fn split_bracketed(s: &str) -> Option<(&str, &str)> {
    let (host, port) = s.strip_prefix('[')?.split_once("]:")?;

    if host.is_empty() || port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((host, port))
}

fn parse_port(s: &str) -> Option<u16> {
    s.trim().parse().ok().filter(|port| *port != 0)
}

/// Splits a comma separated list field, dropping empty items.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
