//! Tunables that shape timing and audio output without changing the machine.

/// NTSC CPU clock in Hz.
pub const CPU_FREQUENCY: f64 = 1_789_773.0;

/// Runtime configuration for a [`crate::Nes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// PPU dots between the vblank/NMI-enable edge and the CPU seeing the NMI.
    ///
    /// Real latch propagation is usually quoted as 8; 15 keeps the timing of
    /// the builds this core was validated against.
    pub nmi_delay: u8,
    /// Host sample rate. The APU emits one sample every
    /// `CPU_FREQUENCY / (sample_rate * 2)` CPU cycles; the host plays
    /// interleaved stereo so the factor of two is consumed on that side.
    pub sample_rate: f64,
    /// Capacity of the audio ring buffer in samples.
    pub audio_buffer_len: usize,
    /// When set, `$4015` reads return 0 instead of the channel status.
    pub apu_status_reads_zero: bool,
}

impl Config {
    pub const DEFAULT_NMI_DELAY: u8 = 15;
    pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;
    pub const DEFAULT_AUDIO_BUFFER_LEN: usize = 8192;

    /// CPU cycles between two emitted audio samples.
    pub fn sample_period(&self) -> f64 {
        CPU_FREQUENCY / (self.sample_rate * 2.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nmi_delay: Self::DEFAULT_NMI_DELAY,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            audio_buffer_len: Self::DEFAULT_AUDIO_BUFFER_LEN,
            apu_status_reads_zero: false,
        }
    }
}
