//! Picture Processing Unit (PPU).
//!
//! One call to [`Ppu::tick`] advances one dot of the 341x262 raster. The
//! background is fetched into a 64-bit shift register eight dots ahead of
//! the beam, sprites are evaluated once per visible line at dot 257, and
//! vblank is signalled at (241, 1) together with the frame buffer swap.
//!
//! CPU access goes through `$2000-$2007` ([`Ppu::cpu_read`] /
//! [`Ppu::cpu_write`]); CHR and the nametable layout are reached through a
//! borrowed [`PpuBus`].

pub mod buffer;
pub mod palette;
pub mod pattern_bus;

mod registers;
mod sprite;

use core::fmt;

use crate::{
    memory::ppu::{self as ppu_mem, Register as PpuRegister},
    ram::ppu::{Ciram, PaletteRam},
};
use buffer::FrameBuffer;
use registers::{Mask, Registers, Status};
use sprite::{MAX_SPRITES_PER_LINE, OAM_SPRITES, SpriteAttributes, SpriteSlot};

pub use pattern_bus::PpuBus;
pub use registers::VramAddr;

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

const CYCLES_PER_SCANLINE: u16 = 341;
const SCANLINES_PER_FRAME: u16 = 262;
const PRE_RENDER_SCANLINE: u16 = 261;
const VBLANK_SCANLINE: u16 = 241;

pub struct Ppu {
    registers: Registers,
    ciram: Ciram,
    palette_ram: PaletteRam,
    /// Current dot (0..=340).
    cycle: u16,
    /// Current scanline. 0..=239 are visible, 261 is the pre-render line.
    scanline: u16,
    frame: u64,
    /// Frame parity `f`; odd frames may skip a dot.
    odd_frame: bool,

    /// Two tiles of background pixels, 4 bits each, next tile in the low half.
    tile_data: u64,
    nametable_latch: u8,
    attribute_latch: u8,
    pattern_low_latch: u8,
    pattern_high_latch: u8,

    sprites: [SpriteSlot; MAX_SPRITES_PER_LINE],
    sprite_count: usize,

    /// NMI output AND vblank, as of the last edge check.
    nmi_previous: bool,
    /// Dots left before a detected NMI edge reaches the CPU.
    nmi_delay: u8,
    nmi_delay_reload: u8,
    nmi_pending: bool,

    buffer: FrameBuffer,
}

impl fmt::Debug for Ppu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ppu")
            .field("registers", &self.registers)
            .field("cycle", &self.cycle)
            .field("scanline", &self.scanline)
            .field("frame", &self.frame)
            .field("odd_frame", &self.odd_frame)
            .field("sprite_count", &self.sprite_count)
            .field("nmi_delay", &self.nmi_delay)
            .finish()
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new(crate::Config::DEFAULT_NMI_DELAY)
    }
}

impl Ppu {
    /// Creates a powered-on PPU parked just before the end of vblank.
    ///
    /// `nmi_delay` is the number of dots between the NMI edge and the CPU
    /// seeing it.
    pub fn new(nmi_delay: u8) -> Self {
        Self {
            registers: Registers::default(),
            ciram: Ciram::new(),
            palette_ram: PaletteRam::new(),
            cycle: 340,
            scanline: 250,
            frame: 0,
            odd_frame: false,
            tile_data: 0,
            nametable_latch: 0,
            attribute_latch: 0,
            pattern_low_latch: 0,
            pattern_high_latch: 0,
            sprites: [SpriteSlot::default(); MAX_SPRITES_PER_LINE],
            sprite_count: 0,
            nmi_previous: false,
            nmi_delay: 0,
            nmi_delay_reload: nmi_delay,
            nmi_pending: false,
            buffer: FrameBuffer::new(),
        }
    }

    /// Current dot (0..=340).
    pub fn dot(&self) -> u16 {
        self.cycle
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Number of frames started since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Last completed frame, 256x240 packed `0xAABBGGRR` pixels.
    pub fn frame(&self) -> &[u32] {
        self.buffer.front()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn rendering_enabled(&self) -> bool {
        self.registers.mask.rendering_enabled()
    }

    pub fn oam(&self) -> &[u8] {
        &self.registers.oam
    }

    pub fn vram_addr(&self) -> VramAddr {
        self.registers.vram.v
    }

    /// Returns and clears a pending NMI request.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    /// Handles CPU writes to the mirrored PPU register space (`$2000-$3FFF`).
    pub fn cpu_write(&mut self, addr: u16, value: u8, bus: &mut PpuBus<'_>) {
        self.registers.last_write = value;
        match PpuRegister::from_cpu_addr(addr) {
            PpuRegister::Control => {
                self.registers.write_control(value);
                self.update_nmi_edge();
            }
            PpuRegister::Mask => self.registers.mask = Mask::from_bits_retain(value),
            PpuRegister::Status => {}
            PpuRegister::OamAddr => self.registers.oam_addr = value,
            PpuRegister::OamData => self.write_oam_data(value),
            PpuRegister::Scroll => self.registers.vram.write_scroll(value),
            PpuRegister::Addr => self.registers.vram.write_addr(value),
            PpuRegister::Data => self.write_vram_data(value, bus),
        }
    }

    /// Handles CPU reads from the mirrored PPU register space (`$2000-$3FFF`).
    ///
    /// Write-only registers read as 0.
    pub fn cpu_read(&mut self, addr: u16, bus: &mut PpuBus<'_>) -> u8 {
        match PpuRegister::from_cpu_addr(addr) {
            PpuRegister::Status => self.read_status(),
            PpuRegister::OamData => self.read_oam_data(),
            PpuRegister::Data => self.read_vram_data(bus),
            _ => 0,
        }
    }

    /// One byte of an OAM DMA transfer. Lands at the current OAM address,
    /// which advances and wraps.
    pub fn write_oam_dma(&mut self, value: u8) {
        self.write_oam_data(value);
    }

    /// Latches the value of a `$4014` write as the last PPU bus value.
    pub fn latch_dma_page(&mut self, page: u8) {
        self.registers.last_write = page;
    }

    /// Advances the PPU by a single dot.
    pub fn tick(&mut self, bus: &mut PpuBus<'_>) {
        if self.nmi_delay > 0 {
            self.nmi_delay -= 1;
            if self.nmi_delay == 0 && self.nmi_line() {
                self.nmi_pending = true;
            }
        }

        self.tick_counters();

        let rendering = self.rendering_enabled();
        let pre_render = self.scanline == PRE_RENDER_SCANLINE;
        let visible_line = self.scanline < SCREEN_HEIGHT as u16;
        let render_line = pre_render || visible_line;
        let visible_dot = (1..=256).contains(&self.cycle);
        let fetch_dot = visible_dot || (321..=336).contains(&self.cycle);

        if rendering {
            if visible_line && visible_dot {
                self.render_pixel();
            }
            if render_line && fetch_dot {
                self.fetch_background(bus);
            }
            if pre_render && (280..=304).contains(&self.cycle) {
                let t = self.registers.vram.t;
                self.registers.vram.v.copy_vertical(t);
            }
            if render_line {
                if fetch_dot && self.cycle & 7 == 0 {
                    self.registers.vram.v.increment_coarse_x();
                }
                if self.cycle == 256 {
                    self.registers.vram.v.increment_y();
                }
                if self.cycle == 257 {
                    let t = self.registers.vram.t;
                    self.registers.vram.v.copy_horizontal(t);
                }
            }
            if self.cycle == 257 {
                if visible_line {
                    self.evaluate_sprites(bus);
                } else {
                    self.sprite_count = 0;
                }
            }
        }

        if self.scanline == VBLANK_SCANLINE && self.cycle == 1 {
            self.buffer.swap();
            self.registers.status.insert(Status::VERTICAL_BLANK);
            self.update_nmi_edge();
        }
        if pre_render && self.cycle == 1 {
            self.registers.status.remove(
                Status::VERTICAL_BLANK | Status::SPRITE_ZERO_HIT | Status::SPRITE_OVERFLOW,
            );
            self.update_nmi_edge();
        }
    }

    /// Moves to the next dot. With rendering on, odd frames skip from
    /// (261, 339) straight to (0, 0).
    fn tick_counters(&mut self) {
        if self.rendering_enabled()
            && self.odd_frame
            && self.scanline == PRE_RENDER_SCANLINE
            && self.cycle == 339
        {
            self.cycle = 0;
            self.scanline = 0;
            self.next_frame();
            return;
        }

        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline >= SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.next_frame();
            }
        }
    }

    fn next_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.odd_frame = !self.odd_frame;
    }

    fn nmi_line(&self) -> bool {
        self.registers.control.nmi_enabled()
            && self.registers.status.contains(Status::VERTICAL_BLANK)
    }

    /// Arms the NMI delay on a rising edge of NMI output AND vblank.
    fn update_nmi_edge(&mut self) {
        let nmi = self.nmi_line();
        if nmi && !self.nmi_previous {
            self.nmi_delay = self.nmi_delay_reload;
        }
        self.nmi_previous = nmi;
    }

    fn render_pixel(&mut self) {
        let x = self.cycle - 1;
        let mask = self.registers.mask;

        let mut background = 0;
        if mask.contains(Mask::SHOW_BACKGROUND) {
            let shift = (7 - self.registers.vram.x as u32) * 4;
            background = (((self.tile_data >> 32) as u32 >> shift) & 0x0F) as u8;
        }
        if !mask.background_visible_at(x) {
            background = 0;
        }

        let (slot, mut sprite) = self.sprite_pixel(x);
        if !mask.sprites_visible_at(x) {
            sprite = 0;
        }

        let color = match (background & 3 != 0, sprite & 3 != 0) {
            (false, false) => 0,
            (false, true) => sprite | 0x10,
            (true, false) => background,
            (true, true) => {
                let slot = self.sprites[slot];
                if slot.index == 0 && x < 255 {
                    self.registers.status.insert(Status::SPRITE_ZERO_HIT);
                }
                if slot.behind_background {
                    background
                } else {
                    sprite | 0x10
                }
            }
        };

        let entry = self.read_palette(color as u16);
        self.buffer
            .set_pixel(x as usize, self.scanline as usize, palette::color(entry));
    }

    /// First opaque sprite pixel at column `x` among the evaluated slots.
    fn sprite_pixel(&self, x: u16) -> (usize, u8) {
        if !self.registers.mask.contains(Mask::SHOW_SPRITES) {
            return (0, 0);
        }
        self.sprites[..self.sprite_count]
            .iter()
            .enumerate()
            .find_map(|(i, slot)| {
                slot.pixel_at(x)
                    .filter(|pixel| pixel & 3 != 0)
                    .map(|pixel| (i, pixel))
            })
            .unwrap_or((0, 0))
    }

    fn fetch_background(&mut self, bus: &PpuBus<'_>) {
        self.tile_data <<= 4;
        let v = self.registers.vram.v;
        match self.cycle & 7 {
            1 => self.nametable_latch = self.read_vram(v.tile_addr(), bus),
            3 => {
                let attribute = self.read_vram(v.attribute_addr(), bus);
                self.attribute_latch = ((attribute >> v.attribute_shift()) & 3) << 2;
            }
            5 => {
                let addr = self.background_pattern_addr();
                self.pattern_low_latch = self.read_vram(addr, bus);
            }
            7 => {
                let addr = self.background_pattern_addr();
                self.pattern_high_latch = self.read_vram(addr + 8, bus);
            }
            0 => self.tile_data |= self.pack_background_tile() as u64,
            _ => {}
        }
    }

    fn background_pattern_addr(&self) -> u16 {
        let fine_y = self.registers.vram.v.fine_y() as u16;
        self.registers.control.background_pattern_table()
            + ((self.nametable_latch as u16) << 4)
            + fine_y
    }

    fn pack_background_tile(&mut self) -> u32 {
        let mut data = 0u32;
        for _ in 0..8 {
            let p1 = (self.pattern_low_latch & 0x80) >> 7;
            let p2 = (self.pattern_high_latch & 0x80) >> 6;
            self.pattern_low_latch <<= 1;
            self.pattern_high_latch <<= 1;
            data = (data << 4) | (self.attribute_latch | p1 | p2) as u32;
        }
        data
    }

    /// Selects up to eight sprites covering the current scanline.
    ///
    /// All 64 entries are scanned; a ninth match sets the overflow flag.
    fn evaluate_sprites(&mut self, bus: &PpuBus<'_>) {
        let control = self.registers.control;
        let height = control.sprite_height();
        let mut count = 0;

        for i in 0..OAM_SPRITES {
            let entry = &self.registers.oam[i * 4..i * 4 + 4];
            let (y, tile, attributes, x) = (entry[0], entry[1], entry[2], entry[3]);
            let Some(row) = self.scanline.checked_sub(y as u16) else {
                continue;
            };
            if row >= height {
                continue;
            }

            if count < MAX_SPRITES_PER_LINE {
                let attributes = SpriteAttributes::from_bits_retain(attributes);
                let addr = sprite::pattern_addr(
                    tile,
                    attributes,
                    row,
                    height,
                    control.sprite_pattern_table(),
                );
                let low = self.read_vram(addr, bus);
                let high = self.read_vram(addr + 8, bus);
                self.sprites[count] = SpriteSlot {
                    pattern: sprite::pack_pattern(low, high, attributes),
                    x,
                    behind_background: attributes
                        .contains(SpriteAttributes::PRIORITY_BEHIND_BACKGROUND),
                    index: i as u8,
                };
            }
            count += 1;
        }

        if count > MAX_SPRITES_PER_LINE {
            count = MAX_SPRITES_PER_LINE;
            self.registers.status.insert(Status::SPRITE_OVERFLOW);
        }
        self.sprite_count = count;
    }

    fn read_status(&mut self) -> u8 {
        let status = self
            .registers
            .status
            .read_with_latch(self.registers.last_write);
        self.registers.status.remove(Status::VERTICAL_BLANK);
        self.update_nmi_edge();
        self.registers.vram.reset_latch();
        status
    }

    fn write_oam_data(&mut self, value: u8) {
        let idx = self.registers.oam_addr as usize;
        self.registers.oam[idx] = value;
        self.registers.oam_addr = self.registers.oam_addr.wrapping_add(1);
    }

    fn read_oam_data(&self) -> u8 {
        self.registers.oam[self.registers.oam_addr as usize]
    }

    fn write_vram_data(&mut self, value: u8, bus: &mut PpuBus<'_>) {
        let addr = self.registers.vram.v.raw();
        self.write_vram(addr, value, bus);
        let increment = self.registers.control.vram_increment();
        self.registers.vram.v.increment(increment);
    }

    /// `$2007` read. Below the palette the value comes from the read
    /// buffer; palette reads return directly and refill the buffer with the
    /// nametable byte underneath.
    fn read_vram_data(&mut self, bus: &mut PpuBus<'_>) -> u8 {
        let addr = self.registers.vram.v.raw();
        let value = self.read_vram(addr, bus);
        let result = if addr & ppu_mem::VRAM_MIRROR_MASK < ppu_mem::PALETTE_BASE {
            std::mem::replace(&mut self.registers.vram_buffer, value)
        } else {
            self.registers.vram_buffer = self.read_vram(addr.wrapping_sub(0x1000), bus);
            value
        };
        let increment = self.registers.control.vram_increment();
        self.registers.vram.v.increment(increment);
        result
    }

    fn read_vram(&self, addr: u16, bus: &PpuBus<'_>) -> u8 {
        let addr = addr & ppu_mem::VRAM_MIRROR_MASK;
        if addr <= ppu_mem::PATTERN_TABLE_END {
            bus.chr_read(addr)
        } else if addr < ppu_mem::PALETTE_BASE {
            self.ciram[Self::ciram_index(addr, bus)]
        } else {
            self.read_palette(addr)
        }
    }

    fn write_vram(&mut self, addr: u16, value: u8, bus: &mut PpuBus<'_>) {
        let addr = addr & ppu_mem::VRAM_MIRROR_MASK;
        if addr <= ppu_mem::PATTERN_TABLE_END {
            bus.chr_write(addr, value);
        } else if addr < ppu_mem::PALETTE_BASE {
            self.ciram[Self::ciram_index(addr, bus)] = value;
        } else {
            self.palette_ram[palette::palette_index(addr)] = value;
        }
    }

    fn read_palette(&self, addr: u16) -> u8 {
        self.palette_ram[palette::palette_index(addr)]
    }

    /// Folds a `$2000-$3EFF` address onto the 2 KiB nametable RAM.
    fn ciram_index(addr: u16, bus: &PpuBus<'_>) -> usize {
        let addr = (addr - ppu_mem::NAMETABLE_BASE) as usize & 0x0FFF;
        let table = addr / ppu_mem::NAMETABLE_SIZE as usize;
        let offset = addr % ppu_mem::NAMETABLE_SIZE as usize;
        let page = bus.mirroring().page(table);
        ((page << 10) | offset) % ppu_mem::CIRAM_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{
        Cartridge,
        header::{Header, Mirroring},
    };

    fn cartridge(mirroring: Mirroring) -> Cartridge {
        let header = Header {
            mapper: 0,
            mirroring,
            battery_backed_ram: false,
            trainer_present: false,
            prg_banks: 1,
            chr_banks: 0,
        };
        Cartridge::new(header, vec![0; 0x4000].into_boxed_slice(), Box::default())
            .expect("nrom cartridge")
    }

    fn set_addr(ppu: &mut Ppu, bus: &mut PpuBus<'_>, addr: u16) {
        ppu.cpu_write(PpuRegister::Addr.addr(), (addr >> 8) as u8, bus);
        ppu.cpu_write(PpuRegister::Addr.addr(), addr as u8, bus);
    }

    fn run_until(ppu: &mut Ppu, bus: &mut PpuBus<'_>, scanline: u16, dot: u16) {
        while ppu.scanline != scanline || ppu.cycle != dot {
            ppu.tick(bus);
        }
    }

    #[test]
    fn buffered_ppu_data_read() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        set_addr(&mut ppu, &mut bus, 0x2000);
        ppu.cpu_write(PpuRegister::Data.addr(), 0x12, &mut bus);

        set_addr(&mut ppu, &mut bus, 0x2000);
        let first = ppu.cpu_read(PpuRegister::Data.addr(), &mut bus);
        let second = ppu.cpu_read(PpuRegister::Data.addr(), &mut bus);
        assert_eq!(first, 0x00, "first read returns the stale buffer");
        assert_eq!(second, 0x12);
    }

    #[test]
    fn palette_reads_bypass_buffer_and_refill_it() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        set_addr(&mut ppu, &mut bus, 0x2F00);
        ppu.cpu_write(PpuRegister::Data.addr(), 0x77, &mut bus);
        set_addr(&mut ppu, &mut bus, 0x3F00);
        ppu.cpu_write(PpuRegister::Data.addr(), 0x21, &mut bus);

        set_addr(&mut ppu, &mut bus, 0x3F00);
        assert_eq!(ppu.cpu_read(PpuRegister::Data.addr(), &mut bus), 0x21);
        assert_eq!(ppu.registers.vram_buffer, 0x77);
    }

    #[test]
    fn sprite_backdrop_writes_alias_background() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        set_addr(&mut ppu, &mut bus, 0x3F10);
        ppu.cpu_write(PpuRegister::Data.addr(), 0x2C, &mut bus);
        set_addr(&mut ppu, &mut bus, 0x3F00);
        assert_eq!(ppu.cpu_read(PpuRegister::Data.addr(), &mut bus), 0x2C);
    }

    #[test]
    fn nametables_follow_cartridge_mirroring() {
        for (mirroring, alias) in [
            (Mirroring::Horizontal, 0x2400),
            (Mirroring::Vertical, 0x2800),
        ] {
            let mut cart = cartridge(mirroring);
            let mut bus = PpuBus::new(&mut cart);
            let mut ppu = Ppu::default();
            set_addr(&mut ppu, &mut bus, 0x2005);
            ppu.cpu_write(PpuRegister::Data.addr(), 0x5A, &mut bus);
            set_addr(&mut ppu, &mut bus, alias + 5);
            ppu.cpu_read(PpuRegister::Data.addr(), &mut bus);
            assert_eq!(ppu.cpu_read(PpuRegister::Data.addr(), &mut bus), 0x5A);
        }
    }

    #[test]
    fn status_read_reports_latch_and_resets_toggle() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        ppu.registers.status.insert(Status::VERTICAL_BLANK | Status::SPRITE_ZERO_HIT);
        ppu.cpu_write(PpuRegister::Scroll.addr(), 0x1F, &mut bus);
        assert!(ppu.registers.vram.w);

        assert_eq!(ppu.cpu_read(PpuRegister::Status.addr(), &mut bus), 0xDF);
        assert!(!ppu.registers.vram.w);
        assert_eq!(ppu.cpu_read(PpuRegister::Status.addr(), &mut bus), 0x5F);
    }

    #[test]
    fn oam_data_auto_increments() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        ppu.cpu_write(PpuRegister::OamAddr.addr(), 0xFF, &mut bus);
        ppu.cpu_write(PpuRegister::OamData.addr(), 0xAA, &mut bus);
        ppu.cpu_write(PpuRegister::OamData.addr(), 0xBB, &mut bus);
        assert_eq!(ppu.oam()[0xFF], 0xAA);
        assert_eq!(ppu.oam()[0x00], 0xBB);
        assert_eq!(ppu.cpu_read(PpuRegister::OamData.addr(), &mut bus), 0x00);
    }

    #[test]
    fn control_write_copies_nametable_into_t() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        ppu.cpu_write(PpuRegister::Control.addr(), 0x03, &mut bus);
        assert_eq!(ppu.registers.vram.t.nametable(), 3);
    }

    #[test]
    fn vblank_swaps_once_per_frame() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        let start = ppu.frame_buffer().front_index();

        run_until(&mut ppu, &mut bus, VBLANK_SCANLINE, 1);
        assert!(ppu.registers.status.contains(Status::VERTICAL_BLANK));
        assert_ne!(ppu.frame_buffer().front_index(), start);

        ppu.tick(&mut bus);
        run_until(&mut ppu, &mut bus, VBLANK_SCANLINE, 0);
        assert_ne!(ppu.frame_buffer().front_index(), start);

        run_until(&mut ppu, &mut bus, PRE_RENDER_SCANLINE, 1);
        assert!(!ppu.registers.status.contains(Status::VERTICAL_BLANK));
    }

    #[test]
    fn odd_frames_skip_a_dot_while_rendering() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        ppu.cpu_write(PpuRegister::Mask.addr(), 0x08, &mut bus);

        // Frame 0 is even: (261, 339) -> (261, 340).
        run_until(&mut ppu, &mut bus, PRE_RENDER_SCANLINE, 339);
        assert!(!ppu.odd_frame);
        ppu.tick(&mut bus);
        assert_eq!((ppu.scanline, ppu.cycle), (PRE_RENDER_SCANLINE, 340));

        // Frame 1 is odd: (261, 339) -> (0, 0).
        ppu.tick(&mut bus);
        run_until(&mut ppu, &mut bus, PRE_RENDER_SCANLINE, 339);
        assert!(ppu.odd_frame);
        let frame = ppu.frame_count();
        ppu.tick(&mut bus);
        assert_eq!((ppu.scanline, ppu.cycle), (0, 0));
        assert_eq!(ppu.frame_count(), frame + 1);
    }

    #[test]
    fn nmi_arrives_after_configured_delay() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::new(4);
        ppu.cpu_write(PpuRegister::Control.addr(), 0x80, &mut bus);

        run_until(&mut ppu, &mut bus, VBLANK_SCANLINE, 1);
        for _ in 0..3 {
            ppu.tick(&mut bus);
            assert!(!ppu.take_nmi());
        }
        ppu.tick(&mut bus);
        assert!(ppu.take_nmi());
        assert!(!ppu.take_nmi());
    }

    #[test]
    fn reading_status_during_delay_suppresses_nmi() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::new(4);
        ppu.cpu_write(PpuRegister::Control.addr(), 0x80, &mut bus);

        run_until(&mut ppu, &mut bus, VBLANK_SCANLINE, 1);
        ppu.cpu_read(PpuRegister::Status.addr(), &mut bus);
        for _ in 0..8 {
            ppu.tick(&mut bus);
        }
        assert!(!ppu.take_nmi());
    }

    #[test]
    fn sprite_overflow_after_eight_matches() {
        let mut cart = cartridge(Mirroring::Horizontal);
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();
        for i in 0..9 {
            ppu.registers.oam[i * 4] = 10;
        }
        for i in 9..64 {
            ppu.registers.oam[i * 4] = 0xF0;
        }
        ppu.cpu_write(PpuRegister::Mask.addr(), 0x10, &mut bus);

        run_until(&mut ppu, &mut bus, 12, 257);
        assert_eq!(ppu.sprite_count, 8);
        assert!(ppu.registers.status.contains(Status::SPRITE_OVERFLOW));
    }

    #[test]
    fn sprite_zero_hit_over_opaque_background() {
        let mut cart = cartridge(Mirroring::Horizontal);
        // Tile 1: every pixel color 1.
        for row in 0..8 {
            cart.ppu_write(0x0010 + row, 0xFF);
        }
        let mut bus = PpuBus::new(&mut cart);
        let mut ppu = Ppu::default();

        // Fill nametable 0 with tile 1 and place sprite 0 at (20, 30).
        set_addr(&mut ppu, &mut bus, 0x2000);
        for _ in 0..960 {
            ppu.cpu_write(PpuRegister::Data.addr(), 0x01, &mut bus);
        }
        ppu.cpu_write(PpuRegister::OamAddr.addr(), 0, &mut bus);
        for byte in [30, 0x01, 0x00, 20] {
            ppu.cpu_write(PpuRegister::OamData.addr(), byte, &mut bus);
        }
        set_addr(&mut ppu, &mut bus, 0x0000);
        ppu.cpu_write(PpuRegister::Mask.addr(), 0x1E, &mut bus);

        run_until(&mut ppu, &mut bus, 40, 0);
        assert!(ppu.registers.status.contains(Status::SPRITE_ZERO_HIT));

        run_until(&mut ppu, &mut bus, PRE_RENDER_SCANLINE, 2);
        assert!(!ppu.registers.status.contains(Status::SPRITE_ZERO_HIT));
    }
}
