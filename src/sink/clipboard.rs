use std::{
    io::Write,
    process::{Command, Stdio},
};

use crate::error::Error;

use super::Clipboard;

/// Clipboard backed by the platform's copy command, text fed on stdin.
#[derive(Debug, Clone)]
pub struct CmdClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CmdClipboard {
    pub fn new() -> Self {
        let (program, args): (&'static str, &'static [&'static str]) = if cfg!(windows) {
            ("clip", &[])
        } else if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            ("wl-copy", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        };

        Self { program, args }
    }
}

impl Default for CmdClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for CmdClipboard {
    type Error = Error;

    fn copy(&mut self, text: &str) -> Result<(), Self::Error> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::ClipboardFail(self.program, status.code()));
        }

        Ok(())
    }
}
