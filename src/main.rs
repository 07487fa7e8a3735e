use std::{
    fmt::{Display, Write as _},
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::Parser;
use error::Error;
use export::{link, profile::profile, raw::raw, singbox, summary::summary};
use serde::Serialize;
use serde_json::Value;
use sink::{
    ImageEncoder,
    clipboard::CmdClipboard,
    copy_or_warn,
    qr::{self, QrEncoder},
};
use wg::config::WgConfig;

mod codec;
pub(crate) mod error;
mod export;
mod sink;
mod wg;

const DEFAULT_CONFIG: &str = "wg.conf";
const DEFAULT_TAG: &str = "wg-1";
const DEFAULT_QR_BASE: &str = "qrcode";

#[derive(Debug, clap::Parser)]
#[command(version, about = "Convert WireGuard configs into sing-box JSON, share links and QR codes")]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Flat summary JSON of the interface and first peer
    Print {
        /// Config path, `-` for stdin
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// sing-box endpoint, outbound and outbounds array, plus the raw text
    SingBox {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Tag prefix (default: $WG_EXPORT_TAG or wg-1)
        #[arg(long)]
        tag: Option<String>,
    },

    /// sing-box outbound object, copied to the clipboard
    Outbound {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        no_clipboard: bool,
    },

    /// Complete sing-box client profile
    Profile {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Compact sn://wg? share link
    Link {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(long, value_enum, default_value_t = Payload::Summary)]
        object: Payload,

        #[arg(long)]
        tag: Option<String>,
    },

    /// JSON followed by its wireguard:// URI
    Uri {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(long, value_enum, default_value_t = Payload::Summary)]
        object: Payload,

        #[arg(long)]
        tag: Option<String>,
    },

    /// Decode a sn://wg? link or wireguard:// URI back to JSON
    Decode { text: String },

    /// QR code of the config text, written as <output>.png and <output>.svg
    Qr {
        #[arg(default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        #[arg(default_value = DEFAULT_QR_BASE)]
        output: PathBuf,

        /// Encode the compact link instead of the raw text
        #[arg(long)]
        link: bool,
    },
}

/// JSON object carried by links and URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Payload {
    Summary,
    Canonical,
    Endpoint,
    Outbound,
    Outbounds,
}

impl Payload {
    fn to_json(self, cfg: &WgConfig, tag: &str) -> Result<Value, Error> {
        Ok(match self {
            Payload::Summary => serde_json::to_value(summary(cfg))?,
            Payload::Canonical => serde_json::to_value(cfg)?,
            Payload::Endpoint => serde_json::to_value(singbox::endpoint(cfg, tag))?,
            Payload::Outbound => serde_json::to_value(singbox::outbound(cfg, tag))?,
            Payload::Outbounds => {
                serde_json::to_value(singbox::outbounds_array(singbox::outbound(cfg, tag)))?
            }
        })
    }
}

fn main() -> Result<(), Error> {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe { std::env::set_var("RUST_LOG", "info") };
    }
    env_logger::init();

    let args = Args::parse();
    println!("{}", run(args.command)?);

    Ok(())
}

fn run(command: Command) -> Result<String, Error> {
    match command {
        Command::Print { config } => {
            let cfg = load_wg_config(&read_config(&config)?)?;
            pretty(&summary(&cfg))
        }

        Command::SingBox { config, tag } => sing_box(&read_config(&config)?, &resolve_tag(tag)),

        Command::Outbound {
            config,
            tag,
            no_clipboard,
        } => {
            let cfg = load_wg_config(&read_config(&config)?)?;
            let out = pretty(&singbox::outbound(&cfg, &resolve_tag(tag)))?;

            if !no_clipboard {
                copy_or_warn(&mut CmdClipboard::new(), &out);
            }

            Ok(out)
        }

        Command::Profile { config } => {
            let cfg = load_wg_config(&read_config(&config)?)?;
            pretty(&profile(&cfg))
        }

        Command::Link {
            config,
            object,
            tag,
        } => {
            let cfg = load_wg_config(&read_config(&config)?)?;
            Ok(link::compact_link(&object.to_json(&cfg, &resolve_tag(tag))?)?)
        }

        Command::Uri {
            config,
            object,
            tag,
        } => {
            let cfg = load_wg_config(&read_config(&config)?)?;
            let value = object.to_json(&cfg, &resolve_tag(tag))?;

            Ok(format!("{}\n\nURI:\n{}", pretty(&value)?, link::uri(&value)?))
        }

        Command::Decode { text } => pretty(&link::decode(&text)?),

        Command::Qr {
            config,
            output,
            link,
        } => qr_export(&QrEncoder::default(), &read_config(&config)?, &output, link),
    }
}

fn sing_box(text: &str, tag: &str) -> Result<String, Error> {
    let cfg = load_wg_config(text)?;
    let outbound = singbox::outbound(&cfg, tag);
    let raw = raw(text);

    let mut out = String::new();
    let _ = writeln!(out, "# ----- sing-box 'endpoint' object -----");
    let _ = writeln!(out, "{}", pretty(&singbox::endpoint(&cfg, tag))?);
    let _ = writeln!(out, "\n# ----- sing-box 'outbound' object -----");
    let _ = writeln!(out, "{}", pretty(&outbound)?);
    let _ = writeln!(out, "\n# ----- JSON array wrapper (paste into Throne as outbounds) -----");
    let _ = writeln!(out, "{}", pretty(&singbox::outbounds_array(outbound))?);
    let _ = writeln!(out, "\n# ----- base64 of raw config (for alternative imports) -----");
    let _ = writeln!(out, "{}", raw.base64);
    let _ = writeln!(out, "\n# ----- raw config -----");
    let _ = write!(out, "{}", raw.raw);

    Ok(out)
}

/// Renders `text` (or its compact link) as a QR code. Encoder or file
/// failures are logged; the payload is returned either way.
fn qr_export<E>(encoder: &E, text: &str, base: &Path, as_link: bool) -> Result<String, Error>
where
    E: ImageEncoder,
    E::Error: Display,
{
    let payload = if as_link {
        link::compact_link(&summary(&load_wg_config(text)?))?
    } else {
        text.to_string()
    };

    match encoder.encode(&payload) {
        Ok(images) => match qr::save(&images, base) {
            Ok((png, svg)) => {
                log::info!("PNG saved as {}", png.display());
                log::info!("SVG saved as {}", svg.display());
            }
            Err(err) => log::warn!("failed to save qr code: {err}"),
        },
        Err(err) => log::warn!("failed to render qr code: {err}"),
    }

    Ok(payload)
}

fn resolve_tag(tag: Option<String>) -> String {
    tag.unwrap_or_else(|| std::env::var("WG_EXPORT_TAG").unwrap_or_else(|_| DEFAULT_TAG.into()))
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn read_config(path: &Path) -> Result<String, Error> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    if text.trim().is_empty() {
        return Err(Error::EmptyConfig);
    }

    log::debug!("read {} bytes from {}", text.len(), path.display());

    Ok(text)
}

fn load_wg_config(text: &str) -> Result<WgConfig, Error> {
    Ok(WgConfig::parse_config(text)?)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::sink::fake::{NoClipboard, TextImage};

    const SAMPLE: &str = "[Interface]
PrivateKey = ABC
Address = 10.0.0.2/32
[Peer]
PublicKey = XYZ
AllowedIPs = 0.0.0.0/0
Endpoint = example.com:51820
";

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::parse_from(["wg-export", "link", "-", "--object", "outbounds"]);
        match args.command {
            Command::Link { config, object, tag } => {
                assert_eq!(config, PathBuf::from("-"));
                assert_eq!(object, Payload::Outbounds);
                assert_eq!(tag, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_sing_box_output() {
        let out = sing_box(SAMPLE, "wg-1").unwrap();

        assert!(out.starts_with("# ----- sing-box 'endpoint' object -----\n{"));
        assert!(out.contains("\"tag\": \"wg-1-endpoint\""));
        assert!(out.contains("\"tag\": \"wg-1-outbound\""));
        assert!(out.contains(&codec::encode_base64_std(SAMPLE.as_bytes())));
        assert!(out.ends_with(SAMPLE));
    }

    #[test]
    fn test_payload_outbounds_is_array() {
        let cfg = load_wg_config(SAMPLE).unwrap();
        let value = Payload::Outbounds.to_json(&cfg, "wg-1").unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["server"], "example.com");
    }

    #[test]
    fn test_decode_command() {
        let cfg = load_wg_config(SAMPLE).unwrap();
        let link = link::compact_link(&cfg).unwrap();

        let out = run(Command::Decode { text: link }).unwrap();
        assert_eq!(
            serde_json::from_str::<WgConfig>(&out).unwrap(),
            cfg
        );

        assert!(matches!(
            run(Command::Decode {
                text: "sn://wg?@@@@".to_string()
            }),
            Err(Error::CodecError(_))
        ));
    }

    #[test]
    fn test_qr_export() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("qrcode");

        let payload = qr_export(&TextImage, SAMPLE, &base, false).unwrap();
        assert_eq!(payload, SAMPLE);
        assert_eq!(fs::read_to_string(dir.path().join("qrcode.svg")).unwrap(), SAMPLE);

        let payload = qr_export(&TextImage, SAMPLE, &base, true).unwrap();
        assert!(payload.starts_with(link::COMPACT_SCHEME));
    }

    #[test]
    fn test_qr_export_unwritable_target_still_returns() {
        let base = Path::new("/nonexistent-dir/qrcode");

        assert_eq!(qr_export(&TextImage, SAMPLE, base, false).unwrap(), SAMPLE);
    }

    #[test]
    fn test_outbound_survives_missing_clipboard() {
        let cfg = load_wg_config(SAMPLE).unwrap();
        let out = pretty(&singbox::outbound(&cfg, "wg-1")).unwrap();

        assert!(!copy_or_warn(&mut NoClipboard, &out));
        assert!(out.contains("\"server\": \"example.com\""));
    }

    #[test]
    fn test_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg.conf");

        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(read_config(&path).unwrap(), SAMPLE);

        fs::write(&path, " \n\t\n").unwrap();
        assert!(matches!(read_config(&path), Err(Error::EmptyConfig)));

        assert!(matches!(
            read_config(&dir.path().join("missing.conf")),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_no_sections_error() {
        assert!(matches!(
            load_wg_config("just text\n"),
            Err(Error::ParseError(_))
        ));
    }
}
