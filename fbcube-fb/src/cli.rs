use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use fbcube_core::{AnimationConfig, ProjectionAnchor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Large cube turning in place
    Spin,
    /// Small cube bouncing off the screen edges
    Bounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Anchor {
    Screen,
    Pose,
}

/// Largest preview side in pixels
pub const MAX_PREVIEW_SIDE: u32 = 4096;

/// Preview size written as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
        let width: u32 = w.parse().map_err(|_| format!("invalid width {:?}", w))?;
        let height: u32 = h.parse().map_err(|_| format!("invalid height {:?}", h))?;
        if width == 0 || height == 0 {
            return Err("preview size must be non-zero".to_owned());
        }
        if width > MAX_PREVIEW_SIDE || height > MAX_PREVIEW_SIDE {
            return Err(format!(
                "preview size {}x{} exceeds {}x{}",
                width, height, MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE
            ));
        }
        Ok(Self { width, height })
    }
}

/// Rotating wireframe cube on a Linux framebuffer
#[derive(Debug, Parser)]
#[command(name = "fbcube")]
pub struct Cli {
    /// Framebuffer device
    #[arg(long, short, default_value = "/dev/fb0")]
    pub device: PathBuf,

    /// Animation preset
    #[arg(long, short, value_enum, default_value_t = Mode::Spin)]
    pub mode: Mode,

    /// Centre the projection on the screen or on the moving cube
    #[arg(long, value_enum)]
    pub anchor: Option<Anchor>,

    /// Delay between frames in microseconds
    #[arg(long)]
    pub frame_delay_us: Option<u64>,

    /// Stop after this many frames
    #[arg(long, short = 'n')]
    pub frames: Option<u64>,

    /// Draw into a WIDTHxHEIGHT surface shown in the terminal
    #[arg(long)]
    pub preview: Option<Resolution>,
}

impl Cli {
    /// The preset for `mode` with the command-line overrides applied
    pub fn animation_config(&self) -> AnimationConfig {
        let mut config = match self.mode {
            Mode::Spin => AnimationConfig::spinning(),
            Mode::Bounce => AnimationConfig::bouncing(),
        };

        if let Some(anchor) = self.anchor {
            config.anchor = match anchor {
                Anchor::Screen => ProjectionAnchor::ScreenCenter,
                Anchor::Pose => ProjectionAnchor::Pose,
            };
        }
        if let Some(delay) = self.frame_delay_us {
            config.frame_delay = Duration::from_micros(delay);
        }
        config.max_frames = self.frames;

        config
    }
}
