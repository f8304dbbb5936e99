/// FBCube framebuffer front end
///
/// Acquires a pixel surface (a Linux framebuffer device or a terminal
/// preview) and runs the cube animation on it.
use std::io;
use std::path::Path;

use crossterm::terminal;
use fbcube_core::{AnimationConfig, AnimationLoop, CancelToken, ThreadClock};
use log::{info, warn};

pub mod cli;
pub mod device;
pub mod error;
pub mod preview;

pub use cli::{Cli, Resolution};
pub use device::{FbInfo, Framebuffer};
pub use error::AcquireError;
pub use preview::TerminalPreview;

/// Run the animation selected on the command line.
///
/// Returns the number of frames rendered once the loop stops, which only
/// happens through `cancel` or `--frames`.
pub fn run(cli: &Cli, cancel: &CancelToken) -> Result<u64, AcquireError> {
    let config = cli.animation_config();

    match cli.preview {
        Some(size) => run_preview(size, config, cancel),
        None => run_device(&cli.device, config, cancel),
    }
}

/// Cancel `cancel` on SIGINT, SIGTERM or SIGHUP so the loop returns and the
/// surface is released by its destructor.
pub fn cancel_on_signal(cancel: &CancelToken) -> Result<(), ctrlc::Error> {
    let token = cancel.clone();
    ctrlc::set_handler(move || {
        warn!("Interrupted, stopping after the current frame");
        token.cancel();
    })
}

fn run_device(
    device: &Path,
    config: AnimationConfig,
    cancel: &CancelToken,
) -> Result<u64, AcquireError> {
    let mut framebuffer = Framebuffer::open(device)?;
    let surface = framebuffer.surface()?;

    let mut animation = AnimationLoop::new(surface, config);
    Ok(animation.run(cancel, &mut ThreadClock))
}

fn run_preview(
    size: Resolution,
    config: AnimationConfig,
    cancel: &CancelToken,
) -> Result<u64, AcquireError> {
    let (cols, rows) = terminal::size().map_err(AcquireError::Preview)?;
    info!(
        "Previewing {}x{} surface in a {}x{} terminal",
        size.width, size.height, cols, rows
    );

    let mut preview = TerminalPreview::new(
        size.width,
        size.height,
        cols as usize,
        rows as usize,
        io::stdout(),
    )?;
    preview.enter().map_err(AcquireError::Preview)?;

    let mut animation = AnimationLoop::new(preview, config);
    Ok(animation.run(cancel, &mut ThreadClock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_interrupt_cancels_the_loop() {
        let cancel = CancelToken::new();
        cancel_on_signal(&cancel).unwrap();
        assert!(!cancel.is_cancelled());

        let status = Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let deadline = Instant::now() + Duration::from_secs(5);
        while !cancel.is_cancelled() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert!(cancel.is_cancelled());
    }
}
