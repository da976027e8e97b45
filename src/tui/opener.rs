// src/tui/opener.rs
//! Opens project links in the system browser.

use anyhow::{Context, Result};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Launches the platform opener for `url` with no inherited stdio, so the
/// browser has no channel back to us.
///
/// # Errors
/// Returns error if the opener cannot be spawned.
pub fn open_detached(url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        anyhow::bail!("refusing to open non-http link: {url}");
    }

    spawn_reaped(&mut opener_command(url)).with_context(|| format!("Failed to open {url}"))?;
    Ok(())
}

/// Spawns `command` and waits for it on a background thread so the exited
/// opener does not linger as a zombie.
fn spawn_reaped(command: &mut Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut c = Command::new("open");
    c.arg(url);
    c
}

// `cmd /C start` would split the URL on `&`.
#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut c = Command::new("explorer");
    c.arg(url);
    c
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut c = Command::new("xdg-open");
    c.arg(url);
    c
}
