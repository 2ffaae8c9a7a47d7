use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use famicom_core::{Config, controller::Button};
use tracing::Level;

/// Headless famicom runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the iNES ROM file
    #[arg(required = true)]
    pub rom: PathBuf,

    /// Emulated seconds to run
    #[arg(short, long, default_value_t = 10.0)]
    pub seconds: f64,

    /// Emulated seconds per host slice
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub slice: f64,

    /// Multiplies every slice
    #[arg(long, default_value_t = 1)]
    pub fast_forward: u32,

    /// PPU dots between vblank and the CPU seeing the NMI
    #[arg(long, default_value_t = Config::DEFAULT_NMI_DELAY)]
    pub nmi_delay: u8,

    /// Host audio sample rate
    #[arg(long, default_value_t = Config::DEFAULT_SAMPLE_RATE)]
    pub sample_rate: f64,

    /// Make `$4015` reads return 0, as some early builds did
    #[arg(long)]
    pub legacy_apu_status: bool,

    /// Buttons held on controller 1 for the whole run
    #[arg(long, value_enum, value_delimiter = ',')]
    pub hold: Vec<ButtonArg>,

    /// Auto-fire A on controller 1
    #[arg(long)]
    pub turbo_a: bool,

    /// Auto-fire B on controller 1
    #[arg(long)]
    pub turbo_b: bool,

    /// Write the final frame as a binary PPM
    #[arg(long)]
    pub frame_dump: Option<PathBuf>,

    /// Write every audio sample as raw little-endian f32
    #[arg(long)]
    pub audio_dump: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            nmi_delay: self.nmi_delay,
            sample_rate: self.sample_rate,
            apu_status_reads_zero: self.legacy_apu_status,
            ..Config::default()
        }
    }

    /// Held buttons as a controller byte.
    pub fn held_buttons(&self) -> u8 {
        self.hold
            .iter()
            .fold(0, |mask, &button| mask | Button::from(button).mask())
    }

    /// Buttons ORed in while the turbo phase is on.
    pub fn turbo_buttons(&self) -> u8 {
        let mut mask = 0;
        if self.turbo_a {
            mask |= Button::A.mask();
        }
        if self.turbo_b {
            mask |= Button::B.mask();
        }
        mask
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ButtonArg {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl From<ButtonArg> for Button {
    fn from(value: ButtonArg) -> Self {
        match value {
            ButtonArg::A => Button::A,
            ButtonArg::B => Button::B,
            ButtonArg::Select => Button::Select,
            ButtonArg::Start => Button::Start,
            ButtonArg::Up => Button::Up,
            ButtonArg::Down => Button::Down,
            ButtonArg::Left => Button::Left,
            ButtonArg::Right => Button::Right,
        }
    }
}
