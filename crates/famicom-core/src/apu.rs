//! Audio Processing Unit (APU).
//!
//! The NES APU exposes five programmable sound generators (2x pulse, triangle,
//! noise, DMC) behind a small set of CPU-visible registers. This module keeps
//! the channel logic, frame sequencer, and mixer tables in submodules so each
//! hardware block is easy to follow and cross-reference against Nesdev.
//!
//! Mixed samples are pushed into a lock-free ring buffer. The consumer half is
//! handed out once through [`Apu::take_consumer`] so a host audio thread can
//! drain it.

mod dmc;
mod envelope;
mod frame_counter;
mod length_counter;
mod noise;
mod pulse;
mod tables;
mod triangle;

use core::fmt;

use ringbuf::{
    HeapCons, HeapProd, HeapRb,
    traits::{Producer, Split},
};

use crate::{Config, memory::apu as apu_mem};

pub use frame_counter::FrameCounterMode;

use dmc::Dmc;
use frame_counter::{FrameCounter, FrameTick};
use noise::Noise;
use pulse::{Pulse, PulseChannel};
use tables::{PULSE_MIX_TABLE, TND_MIX_TABLE};
use triangle::Triangle;

/// Side effects of one APU cycle that the CPU has to observe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApuTick {
    /// CPU cycles stolen by DMC sample fetches.
    pub stall: u32,
    /// An interrupt source was raised on this cycle.
    pub irq: bool,
}

pub struct Apu {
    frame_counter: FrameCounter,
    frame_irq: bool,
    cycles: u64,
    pulse: [Pulse; 2],
    triangle: Triangle,
    noise: Noise,
    dmc: Dmc,
    sample_period: f64,
    /// Index of the sample slot the last cycle fell into.
    sample_slot: u64,
    status_reads_zero: bool,
    producer: HeapProd<f32>,
    consumer: Option<HeapCons<f32>>,
    dropped_samples: u64,
}

impl fmt::Debug for Apu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Apu")
            .field("frame_counter", &self.frame_counter)
            .field("frame_irq", &self.frame_irq)
            .field("cycles", &self.cycles)
            .field("dropped_samples", &self.dropped_samples)
            .finish()
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Apu {
    pub fn new(config: &Config) -> Self {
        let (producer, consumer) = HeapRb::<f32>::new(config.audio_buffer_len.max(1)).split();
        Self {
            frame_counter: FrameCounter::default(),
            frame_irq: false,
            cycles: 0,
            pulse: [
                Pulse::new(PulseChannel::Pulse1),
                Pulse::new(PulseChannel::Pulse2),
            ],
            triangle: Triangle::default(),
            noise: Noise::default(),
            dmc: Dmc::default(),
            sample_period: config.sample_period(),
            sample_slot: 0,
            status_reads_zero: config.apu_status_reads_zero,
            producer,
            consumer: Some(consumer),
            dropped_samples: 0,
        }
    }

    /// Hands out the sample consumer. Returns `None` after the first call.
    pub fn take_consumer(&mut self) -> Option<HeapCons<f32>> {
        self.consumer.take()
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        let Some(reg) = apu_mem::Register::from_cpu_addr(addr) else {
            return;
        };

        match reg {
            apu_mem::Register::Pulse1Control => self.pulse[0].write_control(value),
            apu_mem::Register::Pulse1Sweep => self.pulse[0].write_sweep(value),
            apu_mem::Register::Pulse1TimerLow => self.pulse[0].write_timer_low(value),
            apu_mem::Register::Pulse1TimerHigh => self.pulse[0].write_timer_high(value),
            apu_mem::Register::Pulse2Control => self.pulse[1].write_control(value),
            apu_mem::Register::Pulse2Sweep => self.pulse[1].write_sweep(value),
            apu_mem::Register::Pulse2TimerLow => self.pulse[1].write_timer_low(value),
            apu_mem::Register::Pulse2TimerHigh => self.pulse[1].write_timer_high(value),
            apu_mem::Register::TriangleControl => self.triangle.write_control(value),
            apu_mem::Register::TriangleTimerLow => self.triangle.write_timer_low(value),
            apu_mem::Register::TriangleTimerHigh => self.triangle.write_timer_high(value),
            apu_mem::Register::NoiseControl => self.noise.write_control(value),
            apu_mem::Register::NoiseModeAndPeriod => self.noise.write_mode_and_period(value),
            apu_mem::Register::NoiseLength => self.noise.write_length(value),
            apu_mem::Register::DmcControl => self.dmc.write_control(value),
            apu_mem::Register::DmcDirectLoad => self.dmc.write_direct_load(value),
            apu_mem::Register::DmcSampleAddress => self.dmc.write_sample_address(value),
            apu_mem::Register::DmcSampleLength => self.dmc.write_sample_length(value),
            apu_mem::Register::Status => self.write_status(value),
            apu_mem::Register::FrameCounter => {
                let tick = self.frame_counter.configure(value);
                if value & 0b0100_0000 != 0 {
                    self.frame_irq = false;
                }
                self.apply_frame_tick(tick);
            }
        }
    }

    fn write_status(&mut self, value: u8) {
        self.pulse[0].set_enabled(value & 0b0000_0001 != 0);
        self.pulse[1].set_enabled(value & 0b0000_0010 != 0);
        self.triangle.set_enabled(value & 0b0000_0100 != 0);
        self.noise.set_enabled(value & 0b0000_1000 != 0);
        self.dmc.set_enabled(value & 0b0001_0000 != 0);
    }

    /// `$4015` read. Clears the frame interrupt flag.
    pub fn read_status(&mut self) -> u8 {
        if self.status_reads_zero {
            return 0;
        }

        let mut value = 0u8;
        value |= u8::from(self.pulse[0].length_active());
        value |= u8::from(self.pulse[1].length_active()) << 1;
        value |= u8::from(self.triangle.length_active()) << 2;
        value |= u8::from(self.noise.length_active()) << 3;
        value |= u8::from(self.dmc.active()) << 4;
        value |= u8::from(self.frame_irq) << 6;
        value |= u8::from(self.dmc.irq_flag()) << 7;

        self.frame_irq = false;
        value
    }

    fn clock_quarter_frame(&mut self) {
        for pulse in &mut self.pulse {
            pulse.clock_envelope();
        }
        self.noise.clock_envelope();
        self.triangle.clock_linear_counter();
    }

    fn clock_half_frame(&mut self) {
        for pulse in &mut self.pulse {
            pulse.clock_length();
            pulse.clock_sweep();
        }
        self.triangle.clock_length();
        self.noise.clock_length();
    }

    fn apply_frame_tick(&mut self, tick: FrameTick) {
        if tick.quarter {
            self.clock_quarter_frame();
        }
        if tick.half {
            self.clock_half_frame();
        }
    }

    /// Advances the APU by one CPU cycle. DMC sample fetches go through
    /// `reader`, which should see the CPU address space.
    pub fn tick(&mut self, mut reader: impl FnMut(u16) -> u8) -> ApuTick {
        self.cycles = self.cycles.wrapping_add(1);
        let mut out = ApuTick::default();

        if self.cycles & 1 == 0 {
            for pulse in &mut self.pulse {
                pulse.clock_timer();
            }
            self.noise.clock_timer();
            let dmc_irq = self.dmc.irq_flag();
            out.stall = self.dmc.clock(&mut reader);
            out.irq |= !dmc_irq && self.dmc.irq_flag();
        }
        self.triangle.clock_timer();

        let tick = self.frame_counter.clock(self.cycles);
        self.apply_frame_tick(tick);
        if tick.frame_irq {
            self.frame_irq = true;
            out.irq = true;
        }

        let slot = (self.cycles as f64 / self.sample_period) as u64;
        if slot != self.sample_slot {
            self.sample_slot = slot;
            self.emit_sample();
        }

        out
    }

    fn emit_sample(&mut self) {
        let sample = self.sample();
        if self.producer.try_push(sample).is_err() {
            self.dropped_samples += 1;
        }
    }

    /// Mixed output through the non-linear lookup tables.
    pub fn sample(&self) -> f32 {
        let pulse = (self.pulse[0].output() + self.pulse[1].output()) as usize;
        let tnd = 3 * self.triangle.output() as usize
            + 2 * self.noise.output() as usize
            + self.dmc.output() as usize;
        PULSE_MIX_TABLE[pulse] + TND_MIX_TABLE[tnd]
    }

    /// Length counters of pulse 1, pulse 2, triangle and noise.
    pub fn length_counters(&self) -> [u8; 4] {
        [
            self.pulse[0].length(),
            self.pulse[1].length(),
            self.triangle.length(),
            self.noise.length(),
        ]
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Samples discarded because the ring buffer was full.
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    pub fn frame_counter_mode(&self) -> FrameCounterMode {
        self.frame_counter.mode()
    }

    pub fn frame_irq(&self) -> bool {
        self.frame_irq
    }
}
