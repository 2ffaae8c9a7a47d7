use std::{fs, path::Path};

use tracing::debug;

use crate::{
    cartridge::header::{CHR_BANK_SIZE, Header, Mirroring, NES_HEADER_LEN},
    error::{Error, Section},
    memory::cpu as cpu_mem,
    ram::cpu::PrgRam,
};

pub use mapper::Mapper;

pub mod header;
pub mod mapper;

pub const TRAINER_SIZE: usize = 512;

/// Byte arrays owned by a cartridge plus the live nametable layout.
///
/// Mappers only ever see this through `&Storage`/`&mut Storage`, which keeps
/// the banking state machines separate from the data they translate into.
#[derive(Debug, Clone)]
pub struct Storage {
    prg: Box<[u8]>,
    chr: Box<[u8]>,
    sram: PrgRam,
    mirroring: Mirroring,
}

impl Storage {
    pub fn new(prg: Box<[u8]>, chr: Box<[u8]>, mirroring: Mirroring) -> Self {
        Self {
            prg,
            chr,
            sram: PrgRam::new(),
            mirroring,
        }
    }

    pub fn prg_len(&self) -> usize {
        self.prg.len()
    }

    pub fn chr_len(&self) -> usize {
        self.chr.len()
    }

    /// Reads PRG at a physical offset; offsets past the end read as 0.
    pub fn prg(&self, offset: usize) -> u8 {
        self.prg.get(offset).copied().unwrap_or(0)
    }

    pub fn chr(&self, offset: usize) -> u8 {
        self.chr.get(offset).copied().unwrap_or(0)
    }

    pub fn set_chr(&mut self, offset: usize, value: u8) {
        if let Some(slot) = self.chr.get_mut(offset) {
            *slot = value;
        }
    }

    pub fn sram(&self, addr: u16) -> u8 {
        self.sram[(addr - cpu_mem::PRG_RAM_START) as usize]
    }

    pub fn set_sram(&mut self, addr: u16, value: u8) {
        self.sram[(addr - cpu_mem::PRG_RAM_START) as usize] = value;
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.mirroring = mirroring;
    }
}

#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    storage: Storage,
    mapper: Mapper,
}

impl Cartridge {
    /// Builds a cartridge from already sliced PRG/CHR data.
    ///
    /// An empty `chr` allocates one writable 8 KiB CHR RAM bank.
    pub fn new(header: Header, prg: Box<[u8]>, chr: Box<[u8]>) -> Result<Self, Error> {
        let chr = if chr.is_empty() {
            vec![0u8; CHR_BANK_SIZE].into_boxed_slice()
        } else {
            chr
        };
        let storage = Storage::new(prg, chr, header.mirroring);
        let mapper = Mapper::new(header.mapper, &storage)?;
        Ok(Self {
            header,
            storage,
            mapper,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mirroring(&self) -> Mirroring {
        self.storage.mirroring()
    }

    pub fn cpu_read(&self, addr: u16) -> u8 {
        self.mapper.cpu_read(&self.storage, addr)
    }

    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        self.mapper.cpu_write(&mut self.storage, addr, data);
    }

    pub fn ppu_read(&self, addr: u16) -> u8 {
        self.mapper.ppu_read(&self.storage, addr)
    }

    pub fn ppu_write(&mut self, addr: u16, data: u8) {
        self.mapper.ppu_write(&mut self.storage, addr, data);
    }

    /// Scanline hook; returns `true` when the board requests an IRQ.
    pub fn update_counter(&mut self) -> bool {
        self.mapper.update_counter()
    }

    pub fn has_battery(&self) -> bool {
        self.header.battery_backed_ram
    }

    /// Battery-backed RAM as seen at `$6000-$7FFF`.
    pub fn save_ram(&self) -> &[u8] {
        &self.storage.sram
    }

    /// Restores battery RAM from a persisted blob.
    ///
    /// Short blobs fill the start of RAM and leave the rest zeroed; extra
    /// bytes are ignored.
    pub fn load_save_ram(&mut self, data: &[u8]) {
        let sram = &mut self.storage.sram;
        sram.fill(0);
        let len = data.len().min(sram.len());
        sram[..len].copy_from_slice(&data[..len]);
    }
}

/// Load a cartridge from an in-memory byte slice.
pub fn load_cartridge(bytes: &[u8]) -> Result<Cartridge, Error> {
    let header_bytes = bytes.get(..NES_HEADER_LEN).ok_or(Error::TooShort {
        actual: bytes.len(),
    })?;
    let header = Header::parse(header_bytes)?;
    let (prg_rom, chr_rom) = slice_sections(bytes, &header)?;

    let cartridge = Cartridge::new(header, prg_rom, chr_rom)?;
    debug!(
        mapper = header.mapper,
        prg_banks = header.prg_banks,
        chr_banks = header.chr_banks,
        mirroring = ?header.mirroring,
        battery = header.battery_backed_ram,
        "cartridge loaded"
    );
    Ok(cartridge)
}

/// Load a cartridge directly from disk.
pub fn load_cartridge_from_file<P>(path: P) -> Result<Cartridge, Error>
where
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    load_cartridge(&bytes)
}

fn slice_sections(bytes: &[u8], header: &Header) -> Result<(Box<[u8]>, Box<[u8]>), Error> {
    let mut cursor = NES_HEADER_LEN;
    if header.trainer_present {
        // Trainer bytes are skipped; none of the supported boards map them.
        section(bytes, &mut cursor, TRAINER_SIZE, Section::Trainer)?;
    }

    let prg_rom = section(bytes, &mut cursor, header.prg_rom_size(), Section::PrgRom)?;
    let chr_rom = section(bytes, &mut cursor, header.chr_rom_size(), Section::ChrRom)?;

    Ok((prg_rom.into(), chr_rom.into()))
}

fn section<'a>(
    bytes: &'a [u8],
    cursor: &mut usize,
    len: usize,
    name: Section,
) -> Result<&'a [u8], Error> {
    let start = *cursor;
    let available = bytes.len().saturating_sub(start);
    let end = start
        .checked_add(len)
        .filter(|&end| end <= bytes.len())
        .ok_or(Error::SectionTooShort {
            section: name,
            expected: len,
            actual: available,
        })?;
    *cursor = end;
    Ok(&bytes[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_header(prg: u8, chr: u8, flags6: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; NES_HEADER_LEN];
        bytes[..4].copy_from_slice(b"NES\x1A");
        bytes[4] = prg;
        bytes[5] = chr;
        bytes[6] = flags6;
        bytes
    }

    #[test]
    fn loads_minimal_nrom_image() {
        let mut rom = base_header(2, 1, 0);
        rom.resize(NES_HEADER_LEN + 2 * 16 * 1024 + 8 * 1024, 0xEA);

        let cart = load_cartridge(&rom).expect("image loads");
        assert_eq!(cart.header().mapper, 0);
        assert_eq!(cart.cpu_read(0x8000), 0xEA);
        assert_eq!(cart.ppu_read(0x1FFF), 0xEA);
    }

    #[test]
    fn missing_chr_byte_fails() {
        let mut rom = base_header(2, 1, 0);
        rom.resize(NES_HEADER_LEN + 2 * 16 * 1024 + 8 * 1024 - 1, 0);

        let err = load_cartridge(&rom).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionTooShort {
                section: Section::ChrRom,
                expected: 8192,
                actual: 8191
            }
        ));
    }

    #[test]
    fn trainer_is_skipped_before_prg() {
        let mut rom = base_header(1, 1, 0b0000_0100);
        rom.extend(std::iter::repeat_n(0xFF, TRAINER_SIZE));
        rom.extend(std::iter::repeat_n(0x11, 16 * 1024));
        rom.extend(std::iter::repeat_n(0x22, 8 * 1024));

        let cart = load_cartridge(&rom).expect("image loads");
        assert_eq!(cart.cpu_read(0x8000), 0x11);
        assert_eq!(cart.ppu_read(0x0000), 0x22);
    }

    #[test]
    fn zero_chr_banks_allocate_writable_ram() {
        let mut rom = base_header(1, 0, 0);
        rom.resize(NES_HEADER_LEN + 16 * 1024, 0);

        let mut cart = load_cartridge(&rom).expect("image loads");
        cart.ppu_write(0x0123, 0x5A);
        assert_eq!(cart.ppu_read(0x0123), 0x5A);
    }

    #[test]
    fn unsupported_mapper_is_rejected() {
        let mut rom = base_header(1, 1, 0x50);
        rom.resize(NES_HEADER_LEN + 16 * 1024 + 8 * 1024, 0);

        let err = load_cartridge(&rom).unwrap_err();
        assert!(matches!(err, Error::UnsupportedMapper(5)));
    }

    #[test]
    fn save_ram_round_trips_and_tolerates_short_blobs() {
        let mut rom = base_header(1, 1, 0b0000_0010);
        rom.resize(NES_HEADER_LEN + 16 * 1024 + 8 * 1024, 0);
        let mut cart = load_cartridge(&rom).expect("image loads");
        assert!(cart.has_battery());

        cart.cpu_write(0x6000, 0x99);
        cart.load_save_ram(&[1, 2, 3]);
        assert_eq!(cart.cpu_read(0x6000), 1);
        assert_eq!(cart.cpu_read(0x6002), 3);
        assert_eq!(cart.cpu_read(0x6003), 0);
        assert_eq!(cart.save_ram().len(), 8 * 1024);
    }
}
