use tracing::trace;

use crate::{
    apu::Apu,
    bus::Bus,
    cartridge::Cartridge,
    controller::Controller,
    memory::{apu as apu_mem, cpu as cpu_mem},
    ppu::{Ppu, pattern_bus::PpuBus},
    ram::cpu as cpu_ram,
};

/// CPU-visible bus that bridges the core to RAM, the PPU, the APU, and the
/// cartridge mapper space. It borrows the hardware from the owning NES.
#[derive(Debug)]
pub struct CpuBus<'a> {
    ram: &'a mut cpu_ram::Ram,
    ppu: &'a mut Ppu,
    apu: &'a mut Apu,
    cartridge: &'a mut Cartridge,
    controllers: &'a mut [Controller; 2],
    /// Page of the last `$4014` write, until the CPU charges the stall.
    oam_dma_request: &'a mut Option<u8>,
}

impl<'a> CpuBus<'a> {
    /// Creates a new bus by borrowing the attached hardware.
    pub(crate) fn new(
        ram: &'a mut cpu_ram::Ram,
        ppu: &'a mut Ppu,
        apu: &'a mut Apu,
        cartridge: &'a mut Cartridge,
        controllers: &'a mut [Controller; 2],
        oam_dma_request: &'a mut Option<u8>,
    ) -> Self {
        Self {
            ram,
            ppu,
            apu,
            cartridge,
            controllers,
            oam_dma_request,
        }
    }

    fn read_internal_ram(&self, addr: u16) -> u8 {
        self.ram[(addr & cpu_mem::INTERNAL_RAM_MASK) as usize]
    }

    fn write_internal_ram(&mut self, addr: u16, value: u8) {
        self.ram[(addr & cpu_mem::INTERNAL_RAM_MASK) as usize] = value;
    }

    /// Copies a full page into OAM starting at the current OAM address.
    fn write_oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for offset in 0..=0xFF {
            let value = self.read(base | offset);
            self.ppu.write_oam_dma(value);
        }
        self.ppu.latch_dma_page(page);
        *self.oam_dma_request = Some(page);
    }
}

impl Bus for CpuBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            cpu_mem::INTERNAL_RAM_START..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.read_internal_ram(addr)
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                let mut pattern = PpuBus::new(self.cartridge);
                self.ppu.cpu_read(addr, &mut pattern)
            }
            cpu_mem::APU_STATUS => self.apu.read_status(),
            cpu_mem::CONTROLLER_PORT_1 => self.controllers[0].read(),
            cpu_mem::CONTROLLER_PORT_2 => self.controllers[1].read(),
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_CHANNEL_END | cpu_mem::OAM_DMA => 0,
            cpu_mem::PRG_RAM_START..=cpu_mem::CPU_ADDR_END => self.cartridge.cpu_read(addr),
            _ => {
                trace!(addr = format_args!("{addr:#06X}"), "unmapped cpu read");
                0
            }
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            cpu_mem::INTERNAL_RAM_START..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.write_internal_ram(addr, data)
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                let mut pattern = PpuBus::new(self.cartridge);
                self.ppu.cpu_write(addr, data, &mut pattern)
            }
            cpu_mem::OAM_DMA => self.write_oam_dma(data),
            cpu_mem::CONTROLLER_PORT_1 => {
                for ctrl in self.controllers.iter_mut() {
                    ctrl.write_strobe(data);
                }
            }
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_CHANNEL_END
            | cpu_mem::APU_STATUS
            | apu_mem::FRAME_COUNTER => self.apu.cpu_write(addr, data),
            cpu_mem::PRG_RAM_START..=cpu_mem::CPU_ADDR_END => self.cartridge.cpu_write(addr, data),
            _ => {
                trace!(
                    addr = format_args!("{addr:#06X}"),
                    data, "unmapped cpu write dropped"
                );
            }
        }
    }

    fn take_oam_dma_request(&mut self) -> Option<u8> {
        self.oam_dma_request.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Config,
        cartridge::header::{Header, Mirroring},
        controller::Button,
    };

    struct Hardware {
        ram: cpu_ram::Ram,
        ppu: Ppu,
        apu: Apu,
        cartridge: Cartridge,
        controllers: [Controller; 2],
        oam_dma: Option<u8>,
    }

    impl Hardware {
        fn new() -> Self {
            let header = Header {
                mapper: 0,
                mirroring: Mirroring::Horizontal,
                battery_backed_ram: false,
                trainer_present: false,
                prg_banks: 1,
                chr_banks: 0,
            };
            let mut prg = vec![0; 0x4000];
            prg[0] = 0x42;
            prg[0x3FFF] = 0x99;
            let cartridge = Cartridge::new(header, prg.into_boxed_slice(), Box::default())
                .expect("nrom cartridge");
            Self {
                ram: cpu_ram::Ram::new(),
                ppu: Ppu::default(),
                apu: Apu::new(&Config::default()),
                cartridge,
                controllers: [Controller::new(); 2],
                oam_dma: None,
            }
        }

        fn bus(&mut self) -> CpuBus<'_> {
            CpuBus::new(
                &mut self.ram,
                &mut self.ppu,
                &mut self.apu,
                &mut self.cartridge,
                &mut self.controllers,
                &mut self.oam_dma,
            )
        }
    }

    #[test]
    fn internal_ram_is_mirrored() {
        let mut hw = Hardware::new();
        let mut bus = hw.bus();
        bus.write(0x0001, 0xAB);
        assert_eq!(bus.read(0x0801), 0xAB);
        assert_eq!(bus.read(0x1801), 0xAB);
        bus.write(0x1FFF, 0x11);
        assert_eq!(bus.read(0x07FF), 0x11);
    }

    #[test]
    fn prg_rom_mirrors_single_bank() {
        let mut hw = Hardware::new();
        let mut bus = hw.bus();
        assert_eq!(bus.read(0x8000), 0x42);
        assert_eq!(bus.read(0xC000), 0x42);
        assert_eq!(bus.read(0xFFFF), 0x99);
    }

    #[test]
    fn unmapped_and_write_only_regions_read_zero() {
        let mut hw = Hardware::new();
        let mut bus = hw.bus();
        bus.write(0x5000, 0xFF);
        assert_eq!(bus.read(0x5000), 0);
        assert_eq!(bus.read(0x4018), 0);
        assert_eq!(bus.read(cpu_mem::OAM_DMA), 0);
        assert_eq!(bus.read(0x4000), 0);
    }

    #[test]
    fn prg_ram_round_trip() {
        let mut hw = Hardware::new();
        let mut bus = hw.bus();
        bus.write(0x6000, 0x5A);
        bus.write(0x7FFF, 0xA5);
        assert_eq!(bus.read(0x6000), 0x5A);
        assert_eq!(bus.read(0x7FFF), 0xA5);
    }

    #[test]
    fn oam_dma_copies_page_from_current_oam_address() {
        let mut hw = Hardware::new();
        {
            let mut bus = hw.bus();
            for i in 0..=0xFFu16 {
                bus.write(0x0200 + i, i as u8);
            }
            // OAMADDR = 4, so the copy wraps.
            bus.write(0x2003, 0x04);
            bus.write(cpu_mem::OAM_DMA, 0x02);
            assert_eq!(bus.take_oam_dma_request(), Some(0x02));
            assert_eq!(bus.take_oam_dma_request(), None);
        }
        let oam = hw.ppu.oam();
        assert_eq!(oam[4], 0x00);
        assert_eq!(oam[0xFF], 0xFB);
        assert_eq!(oam[0], 0xFC);
        assert_eq!(oam[3], 0xFF);
    }

    #[test]
    fn controller_strobe_and_serial_read() {
        let mut hw = Hardware::new();
        hw.controllers[0].set_button(Button::A, true);
        hw.controllers[0].set_button(Button::Start, true);
        hw.controllers[1].set_button(Button::B, true);
        let mut bus = hw.bus();
        bus.write(cpu_mem::CONTROLLER_PORT_1, 1);
        bus.write(cpu_mem::CONTROLLER_PORT_1, 0);

        let port1: Vec<u8> = (0..8).map(|_| bus.read(cpu_mem::CONTROLLER_PORT_1)).collect();
        assert_eq!(port1, [1, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(bus.read(cpu_mem::CONTROLLER_PORT_1), 0);

        assert_eq!(bus.read(cpu_mem::CONTROLLER_PORT_2), 0);
        assert_eq!(bus.read(cpu_mem::CONTROLLER_PORT_2), 1);
    }

    #[test]
    fn apu_status_goes_through_bus() {
        let mut hw = Hardware::new();
        let mut bus = hw.bus();
        bus.write(cpu_mem::APU_STATUS, 0b0000_0001);
        bus.write(0x4003, 0xF8);
        assert_eq!(bus.read(cpu_mem::APU_STATUS) & 1, 1);
        // $4017 is the frame counter on writes and must not strobe pads.
        bus.write(apu_mem::FRAME_COUNTER, 0x40);
        assert_eq!(bus.read(cpu_mem::APU_STATUS) & 0b0100_0000, 0);
    }
}
