//! Cycle-counted NES core: 6502 CPU, PPU, APU and the common cartridge boards.
//!
//! A [`Nes`] owns every device and drives them at the console's 1:3:1
//! CPU/PPU/APU ratio. Hosts feed it wall-clock slices with [`Nes::advance`],
//! read the finished frame through [`Nes::frame`] and drain audio from the
//! consumer returned by [`Nes::take_audio_consumer`].

use ringbuf::HeapCons;
use tracing::debug;

use crate::{
    apu::Apu,
    bus::cpu::CpuBus,
    cartridge::Cartridge,
    config::CPU_FREQUENCY,
    controller::Controller,
    cpu::Cpu,
    ppu::{PpuBus, Ppu},
    ram::cpu as cpu_ram,
};

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod ppu;
pub mod ram;

pub use config::Config;
pub use error::Error;

/// PPU dot on which MMC3-style boards see their scanline clock.
const MAPPER_COUNTER_DOT: u16 = 280;
const PRE_RENDER_SCANLINE: u16 = 261;
const LAST_VISIBLE_SCANLINE: u16 = 239;

#[derive(Debug)]
pub struct Nes {
    cpu: Cpu,
    ppu: Ppu,
    apu: Apu,
    ram: cpu_ram::Ram,
    cartridge: Cartridge,
    controllers: [Controller; 2],
    /// Pending OAM DMA page written via `$4014` (latched until the CPU picks it up).
    oam_dma_request: Option<u8>,
    config: Config,
}

impl Nes {
    /// Powers on a console with the default [`Config`].
    pub fn new(cartridge: Cartridge) -> Self {
        Self::with_config(cartridge, Config::default())
    }

    pub fn with_config(cartridge: Cartridge, config: Config) -> Self {
        debug!(
            mapper = cartridge.header().mapper,
            nmi_delay = config.nmi_delay,
            sample_rate = config.sample_rate,
            "power on"
        );
        let mut nes = Self {
            cpu: Cpu::new(),
            ppu: Ppu::new(config.nmi_delay),
            apu: Apu::new(&config),
            ram: cpu_ram::Ram::new(),
            cartridge,
            controllers: [Controller::new(), Controller::new()],
            oam_dma_request: None,
            config,
        };
        nes.reset();
        nes
    }

    /// Reloads PC from the reset vector. RAM, PPU and APU state survive,
    /// as with the console's reset button.
    pub fn reset(&mut self) {
        let mut bus = CpuBus::new(
            &mut self.ram,
            &mut self.ppu,
            &mut self.apu,
            &mut self.cartridge,
            &mut self.controllers,
            &mut self.oam_dma_request,
        );
        self.cpu.reset(&mut bus);
    }

    /// Runs the console for `seconds` of emulated time.
    ///
    /// The slice is converted to CPU cycles and whole instructions run until
    /// it is used up, so a slice may overshoot by part of an instruction.
    pub fn advance(&mut self, seconds: f64) {
        let mut target = (CPU_FREQUENCY * seconds + 0.5) as i64;
        while target > 0 {
            target -= self.step_instruction() as i64;
        }
    }

    /// Runs one CPU step (an instruction, or one stall cycle) and catches the
    /// PPU and APU up. Returns the CPU cycles that elapsed.
    pub fn step_instruction(&mut self) -> u32 {
        let elapsed = {
            let mut bus = CpuBus::new(
                &mut self.ram,
                &mut self.ppu,
                &mut self.apu,
                &mut self.cartridge,
                &mut self.controllers,
                &mut self.oam_dma_request,
            );
            self.cpu.step(&mut bus)
        };

        for _ in 0..elapsed {
            for _ in 0..3 {
                self.tick_ppu();
            }
            self.tick_apu();
        }
        elapsed
    }

    /// Runs until the PPU finishes the current frame. Returns the CPU cycles
    /// that elapsed.
    pub fn run_frame(&mut self) -> u64 {
        let frame = self.ppu.frame_count();
        let mut cycles = 0;
        while self.ppu.frame_count() == frame {
            cycles += self.step_instruction() as u64;
        }
        cycles
    }

    fn tick_ppu(&mut self) {
        let mut bus = PpuBus::new(&mut self.cartridge);
        self.ppu.tick(&mut bus);

        if self.ppu.take_nmi() {
            self.cpu.trigger_nmi();
        }

        let scanline = self.ppu.scanline();
        if self.ppu.dot() == MAPPER_COUNTER_DOT
            && (scanline <= LAST_VISIBLE_SCANLINE || scanline >= PRE_RENDER_SCANLINE)
            && self.ppu.rendering_enabled()
            && self.cartridge.update_counter()
        {
            self.cpu.trigger_irq();
        }
    }

    fn tick_apu(&mut self) {
        // DMC samples always live in $8000-$FFFF.
        let cartridge = &self.cartridge;
        let tick = self.apu.tick(|addr| cartridge.cpu_read(addr));
        if tick.stall > 0 {
            self.cpu.stall(tick.stall);
        }
        if tick.irq {
            self.cpu.trigger_irq();
        }
    }

    /// Front buffer: 256x240 `0xAABBGGRR` pixels.
    pub fn frame(&self) -> &[u32] {
        self.ppu.frame()
    }

    /// Frames completed since power-on.
    pub fn frame_count(&self) -> u64 {
        self.ppu.frame_count()
    }

    /// Sets the held buttons of `port` (0 or 1). Other ports are ignored.
    pub fn set_buttons(&mut self, port: usize, buttons: u8) {
        if let Some(controller) = self.controllers.get_mut(port) {
            controller.set_buttons(buttons);
        }
    }

    pub fn controller(&self, port: usize) -> Option<&Controller> {
        self.controllers.get(port)
    }

    pub fn controller_mut(&mut self, port: usize) -> Option<&mut Controller> {
        self.controllers.get_mut(port)
    }

    /// Hands out the audio sample consumer. Only the first call gets it.
    pub fn take_audio_consumer(&mut self) -> Option<HeapCons<f32>> {
        self.apu.take_consumer()
    }

    /// The 2 KiB of internal work RAM.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.cartridge
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;
    use crate::cartridge::header::{Header, Mirroring};

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::DEBUG)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }

    /// NROM console with `program` at `$8000` and the reset vector on it.
    fn console(program: &[u8]) -> Nes {
        let header = Header {
            mapper: 0,
            mirroring: Mirroring::Vertical,
            battery_backed_ram: false,
            trainer_present: false,
            prg_banks: 1,
            chr_banks: 0,
        };
        let mut prg = vec![0xEA; 0x4000];
        prg[..program.len()].copy_from_slice(program);
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0x80;
        let cartridge =
            Cartridge::new(header, prg.into_boxed_slice(), Box::default()).expect("nrom");
        Nes::new(cartridge)
    }

    #[test]
    fn reset_loads_vector_and_registers() {
        let nes = console(&[]);
        assert_eq!(nes.cpu().pc(), 0x8000);
        assert_eq!(nes.cpu().s(), 0xFD);
        assert_eq!(nes.cpu().p().bits(), 0x24);
    }

    #[test]
    fn oam_dma_stall_depends_on_cycle_parity() {
        // LDA #$02 ; STA $4014 -> DMA starts on an even cycle (6).
        let mut even = console(&[0xA9, 0x02, 0x8D, 0x14, 0x40]);
        even.step_instruction();
        assert_eq!(even.step_instruction(), 4);
        assert_eq!(even.cpu().pending_stall(), 513);

        // LDA $00 ; STA $4014 -> odd cycle (7).
        let mut odd = console(&[0xA5, 0x00, 0x8D, 0x14, 0x40]);
        odd.step_instruction();
        odd.step_instruction();
        assert_eq!(odd.cpu().pending_stall(), 514);

        let mut stalled = 0;
        while odd.cpu().pending_stall() > 0 {
            assert_eq!(odd.step_instruction(), 1);
            stalled += 1;
        }
        assert_eq!(stalled, 514);
    }

    #[test]
    fn advance_runs_requested_cycles() {
        // JMP $8000
        let mut nes = console(&[0x4C, 0x00, 0x80]);
        nes.advance(1.0 / 60.0);
        let target = (CPU_FREQUENCY / 60.0 + 0.5) as u64;
        let cycles = nes.cpu().cycles();
        assert!((target..target + 3).contains(&cycles), "{cycles}");
        assert_eq!(nes.apu().cycle_count(), cycles);
    }

    #[test]
    fn run_frame_completes_one_frame() {
        let mut nes = console(&[0x4C, 0x00, 0x80]);
        let start = nes.frame_count();
        nes.run_frame();
        assert_eq!(nes.frame_count(), start + 1);
        assert_eq!(nes.frame().len(), 256 * 240);
    }

    #[test]
    fn set_buttons_ignores_unknown_ports() {
        let mut nes = console(&[]);
        nes.set_buttons(1, 0x81);
        nes.set_buttons(2, 0xFF);
        assert_eq!(nes.controller(1).map(Controller::buttons), Some(0x81));
        assert!(nes.controller(2).is_none());
    }

    #[test]
    fn audio_consumer_is_handed_out_once() {
        let mut nes = console(&[]);
        assert!(nes.take_audio_consumer().is_some());
        assert!(nes.take_audio_consumer().is_none());
    }
}
