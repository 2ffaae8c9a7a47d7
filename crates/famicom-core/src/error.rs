use std::fmt;

use crate::cartridge::header::NES_HEADER_LEN;

/// Region of an iNES image that follows the header, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Trainer,
    PrgRom,
    ChrRom,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trainer => "trainer",
            Self::PrgRom => "PRG ROM",
            Self::ChrRom => "CHR ROM",
        })
    }
}

/// Why an image could not become a [`crate::cartridge::Cartridge`].
///
/// Loading stops at the first failure; no console is built from a bad image.
#[derive(Debug)]
pub enum Error {
    /// Fewer than [`NES_HEADER_LEN`] bytes were supplied.
    TooShort { actual: usize },
    /// The image does not start with `NES\x1A`.
    InvalidMagic,
    /// The image ends inside `section`.
    SectionTooShort {
        section: Section,
        expected: usize,
        actual: usize,
    },
    /// Mapper number outside NROM, MMC1, UxROM, CNROM, MMC3 and AxROM.
    UnsupportedMapper(u8),
    /// Reading the image from disk failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { actual } => {
                write!(f, "image is {actual} bytes, shorter than the {NES_HEADER_LEN}-byte iNES header")
            }
            Self::InvalidMagic => f.write_str("image does not start with the iNES signature"),
            Self::SectionTooShort {
                section,
                expected,
                actual,
            } => write!(f, "{section} truncated: {actual} of {expected} bytes present"),
            Self::UnsupportedMapper(id) => write!(f, "mapper {id} is not emulated"),
            Self::Io(err) => write!(f, "cannot read image: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Io(err) = self { Some(err) } else { None }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_section_names_the_region() {
        let err = Error::SectionTooShort {
            section: Section::ChrRom,
            expected: 8192,
            actual: 100,
        };
        assert_eq!(err.to_string(), "CHR ROM truncated: 100 of 8192 bytes present");
    }

    #[test]
    fn only_io_errors_have_a_source() {
        let io = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(std::error::Error::source(&io).is_some());
        assert!(std::error::Error::source(&Error::UnsupportedMapper(9)).is_none());
        assert_eq!(Error::UnsupportedMapper(9).to_string(), "mapper 9 is not emulated");
    }
}
