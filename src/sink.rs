use std::fmt::Display;

pub mod clipboard;
pub mod qr;

/// Raster and vector renderings of one scannable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Images {
    pub png: Vec<u8>,
    pub svg: String,
}

pub trait ImageEncoder {
    type Error;

    fn encode(&self, text: &str) -> Result<Images, Self::Error>;
}

pub trait Clipboard {
    type Error;

    fn copy(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Copies `text`, reporting a failed copy as a warning only.
pub fn copy_or_warn<C>(clipboard: &mut C, text: &str) -> bool
where
    C: Clipboard,
    C::Error: Display,
{
    match clipboard.copy(text) {
        Ok(()) => {
            log::info!("copied {} bytes to clipboard", text.len());
            true
        }
        Err(err) => {
            log::warn!("clipboard unavailable: {err}");
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{fake::*, *};

    #[test]
    fn test_copy_or_warn() {
        let mut clipboard = MemoryClipboard::default();

        assert!(copy_or_warn(&mut clipboard, "{}"));
        assert_eq!(clipboard.contents.as_deref(), Some("{}"));
    }

    #[test]
    fn test_copy_or_warn_swallows_failure() {
        assert!(!copy_or_warn(&mut NoClipboard, "{}"));
    }
}
