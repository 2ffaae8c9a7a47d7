//! Shared definitions for the NES memory map.
//!
//! Address constants for the CPU bus, the PPU address space and the APU
//! register window live here so the routing code in [`crate::bus`] and the
//! device models agree on a single layout.

/// CPU memory map details.
pub mod cpu {
    /// First address of the hardware stack page.
    pub const STACK_PAGE_START: u16 = 0x0100;

    /// NMI vector (`$FFFA`).
    pub const NMI_VECTOR: u16 = 0xFFFA;
    /// Reset vector (`$FFFC`).
    pub const RESET_VECTOR: u16 = 0xFFFC;
    /// IRQ/BRK vector (`$FFFE`).
    pub const IRQ_VECTOR: u16 = 0xFFFE;

    /// First internal RAM address (`$0000`).
    pub const INTERNAL_RAM_START: u16 = 0x0000;
    /// Last mirrored internal RAM address visible to the CPU (`$1FFF`).
    pub const INTERNAL_RAM_MIRROR_END: u16 = 0x1FFF;
    /// Size of the CPU internal RAM block (2 KiB mirrored through `$1FFF`).
    pub const INTERNAL_RAM_SIZE: usize = 0x0800;
    /// Mask applied to mirror CPU RAM accesses within `$0000-$1FFF`.
    pub const INTERNAL_RAM_MASK: u16 = (INTERNAL_RAM_SIZE as u16) - 1;

    /// First CPU address mapped to the PPU register mirror.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Last CPU address mirrored to the PPU register set.
    pub const PPU_REGISTER_END: u16 = 0x3FFF;

    /// First APU channel register (`$4000`).
    pub const APU_REGISTER_BASE: u16 = 0x4000;
    /// Final channel register before the OAM DMA port.
    pub const APU_CHANNEL_END: u16 = 0x4013;
    /// OAM DMA trigger (`$4014`).
    pub const OAM_DMA: u16 = 0x4014;
    /// APU status register (`$4015`).
    pub const APU_STATUS: u16 = 0x4015;
    /// Controller port 1 strobe/read address (`$4016`).
    pub const CONTROLLER_PORT_1: u16 = 0x4016;
    /// Controller port 2 read address, shared with the APU frame counter on writes (`$4017`).
    pub const CONTROLLER_PORT_2: u16 = 0x4017;

    /// PRG RAM window start address (`$6000`).
    pub const PRG_RAM_START: u16 = 0x6000;
    /// PRG RAM window end address (inclusive).
    pub const PRG_RAM_END: u16 = 0x7FFF;
    /// PRG ROM window start address (`$8000`).
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Last CPU address.
    pub const CPU_ADDR_END: u16 = 0xFFFF;
}

/// PPU register layout and VRAM mirror rules.
pub mod ppu {
    /// Mask for decoding register mirrors (`addr & 0x0007`).
    pub const REGISTER_SELECT_MASK: u16 = 0x0007;

    /// Size of the console's nametable RAM (CIRAM).
    pub const CIRAM_SIZE: usize = 0x0800;
    /// Address mask applied to every PPU access to wrap the 16 KiB space.
    pub const VRAM_MIRROR_MASK: u16 = 0x3FFF;

    /// Base address of the first pattern table.
    pub const PATTERN_TABLE_0: u16 = 0x0000;
    /// Base address of the second pattern table.
    pub const PATTERN_TABLE_1: u16 = 0x1000;
    /// Last address routed to cartridge CHR.
    pub const PATTERN_TABLE_END: u16 = 0x1FFF;
    /// Base address of nametable 0.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Base of the attribute table inside nametable 0.
    pub const ATTRIBUTE_TABLE_BASE: u16 = 0x23C0;
    /// Size of a single nametable in bytes.
    pub const NAMETABLE_SIZE: u16 = 0x0400;

    /// Palette RAM base address (`$3F00`).
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette RAM byte count (32 bytes mirrored every 32 bytes).
    pub const PALETTE_RAM_SIZE: usize = 0x20;

    /// Object Attribute Memory byte count.
    pub const OAM_RAM_SIZE: usize = 0x100;

    /// CPU-visible PPU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - PPUCTRL
        Control = 0x2000,
        /// `$2001` - PPUMASK
        Mask = 0x2001,
        /// `$2002` - PPUSTATUS
        Status = 0x2002,
        /// `$2003` - OAMADDR
        OamAddr = 0x2003,
        /// `$2004` - OAMDATA
        OamData = 0x2004,
        /// `$2005` - PPUSCROLL
        Scroll = 0x2005,
        /// `$2006` - PPUADDR
        Addr = 0x2006,
        /// `$2007` - PPUDATA
        Data = 0x2007,
    }

    impl Register {
        /// Raw address backing the register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves the canonical register for a CPU address in `$2000-$3FFF`.
        pub const fn from_cpu_addr(addr: u16) -> Self {
            match addr & REGISTER_SELECT_MASK {
                0 => Self::Control,
                1 => Self::Mask,
                2 => Self::Status,
                3 => Self::OamAddr,
                4 => Self::OamData,
                5 => Self::Scroll,
                6 => Self::Addr,
                _ => Self::Data,
            }
        }
    }
}

/// Audio Processing Unit (APU) register layout.
pub mod apu {
    /// `$4017` doubles as the frame counter register on writes.
    pub const FRAME_COUNTER: u16 = 0x4017;
    /// `$4015` status / channel enable register.
    pub const STATUS: u16 = 0x4015;

    /// CPU-visible APU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$4000` - Pulse channel 1: duty, envelope, length counter halt.
        Pulse1Control = 0x4000,
        /// `$4001` - Pulse channel 1: sweep unit configuration.
        Pulse1Sweep = 0x4001,
        /// `$4002` - Pulse channel 1: timer low byte.
        Pulse1TimerLow = 0x4002,
        /// `$4003` - Pulse channel 1: timer high 3 bits + length counter load.
        Pulse1TimerHigh = 0x4003,
        /// `$4004` - Pulse channel 2: duty, envelope, length counter halt.
        Pulse2Control = 0x4004,
        /// `$4005` - Pulse channel 2: sweep unit configuration.
        Pulse2Sweep = 0x4005,
        /// `$4006` - Pulse channel 2: timer low byte.
        Pulse2TimerLow = 0x4006,
        /// `$4007` - Pulse channel 2: timer high 3 bits + length counter load.
        Pulse2TimerHigh = 0x4007,
        /// `$4008` - Triangle channel: length counter halt + linear counter.
        TriangleControl = 0x4008,
        /// `$400A` - Triangle channel: timer low byte.
        TriangleTimerLow = 0x400A,
        /// `$400B` - Triangle channel: timer high 3 bits + length counter load.
        TriangleTimerHigh = 0x400B,
        /// `$400C` - Noise channel: envelope and length counter halt.
        NoiseControl = 0x400C,
        /// `$400E` - Noise channel: mode flag and period index.
        NoiseModeAndPeriod = 0x400E,
        /// `$400F` - Noise channel: length counter load.
        NoiseLength = 0x400F,
        /// `$4010` - DMC: IRQ enable, loop flag, and rate index.
        DmcControl = 0x4010,
        /// `$4011` - DMC: direct load value for the sample DAC.
        DmcDirectLoad = 0x4011,
        /// `$4012` - DMC: sample address.
        DmcSampleAddress = 0x4012,
        /// `$4013` - DMC: sample length.
        DmcSampleLength = 0x4013,
        /// `$4015` - APU status: channel enables.
        Status = 0x4015,
        /// `$4017` - Frame counter: mode select and IRQ inhibit.
        FrameCounter = 0x4017,
    }

    impl Register {
        /// Raw CPU address for this APU register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves a CPU address to an APU register.
        ///
        /// Returns `None` for the unused holes (`$4009`, `$400D`) and for
        /// addresses owned by other devices (`$4014`, `$4016`).
        pub const fn from_cpu_addr(addr: u16) -> Option<Self> {
            match addr {
                0x4000 => Some(Self::Pulse1Control),
                0x4001 => Some(Self::Pulse1Sweep),
                0x4002 => Some(Self::Pulse1TimerLow),
                0x4003 => Some(Self::Pulse1TimerHigh),
                0x4004 => Some(Self::Pulse2Control),
                0x4005 => Some(Self::Pulse2Sweep),
                0x4006 => Some(Self::Pulse2TimerLow),
                0x4007 => Some(Self::Pulse2TimerHigh),
                0x4008 => Some(Self::TriangleControl),
                0x400A => Some(Self::TriangleTimerLow),
                0x400B => Some(Self::TriangleTimerHigh),
                0x400C => Some(Self::NoiseControl),
                0x400E => Some(Self::NoiseModeAndPeriod),
                0x400F => Some(Self::NoiseLength),
                0x4010 => Some(Self::DmcControl),
                0x4011 => Some(Self::DmcDirectLoad),
                0x4012 => Some(Self::DmcSampleAddress),
                0x4013 => Some(Self::DmcSampleLength),
                0x4015 => Some(Self::Status),
                0x4017 => Some(Self::FrameCounter),
                _ => None,
            }
        }
    }
}
