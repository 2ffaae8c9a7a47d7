use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use famicom_core::{
    Nes,
    cartridge::load_cartridge_from_file,
    controller::turbo_phase,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};
use ringbuf::{HeapCons, traits::Consumer};
use tracing::{debug, info, warn};

use crate::args::Args;

/// Frames between two periodic status lines.
const STATUS_LOG_INTERVAL: u64 = 4;

pub struct App {
    nes: Nes,
    audio: HeapCons<f32>,
    audio_dump: Option<BufWriter<File>>,
    save_path: PathBuf,
    seconds: f64,
    slice: f64,
    held: u8,
    turbo: u8,
    frame_dump: Option<PathBuf>,
    samples: u64,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        if args.slice.is_nan() || args.slice <= 0.0 {
            bail!("slice must be positive, got {}", args.slice);
        }

        let cartridge = load_cartridge_from_file(&args.rom)
            .with_context(|| format!("loading {}", args.rom.display()))?;
        let mut nes = Nes::with_config(cartridge, args.config());

        let save_path = args.rom.with_extension("srm");
        if nes.cartridge().has_battery() {
            load_save_ram(&mut nes, &save_path)?;
        }

        let audio = nes
            .take_audio_consumer()
            .context("audio consumer already taken")?;
        let audio_dump = args
            .audio_dump
            .as_deref()
            .map(|path| {
                File::create(path)
                    .map(BufWriter::new)
                    .with_context(|| format!("creating {}", path.display()))
            })
            .transpose()?;

        info!(
            rom = %args.rom.display(),
            mapper = nes.cartridge().header().mapper,
            seconds = args.seconds,
            fast_forward = args.fast_forward,
            "starting"
        );

        Ok(Self {
            held: args.held_buttons(),
            turbo: args.turbo_buttons(),
            nes,
            audio,
            audio_dump,
            save_path,
            seconds: args.seconds,
            slice: args.slice * args.fast_forward.max(1) as f64,
            frame_dump: args.frame_dump,
            samples: 0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut remaining = self.seconds;
        let mut last_logged = None;

        while remaining > 0.0 {
            let frame = self.nes.frame_count();
            let turbo = if turbo_phase(frame) { self.turbo } else { 0 };
            self.nes.set_buttons(0, self.held | turbo);

            let slice = self.slice.min(remaining);
            self.nes.advance(slice);
            remaining -= slice;

            self.drain_audio()?;

            let frame = self.nes.frame_count();
            if frame % STATUS_LOG_INTERVAL == 0 && last_logged != Some(frame) {
                last_logged = Some(frame);
                debug!(
                    frame,
                    pc = format_args!("{:#06X}", self.nes.cpu().pc()),
                    "status"
                );
            }
        }

        self.finish()
    }

    fn drain_audio(&mut self) -> Result<()> {
        for sample in self.audio.pop_iter() {
            self.samples += 1;
            if let Some(dump) = self.audio_dump.as_mut() {
                dump.write_all(&sample.to_le_bytes())?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(dump) = self.audio_dump.as_mut() {
            dump.flush().context("flushing audio dump")?;
        }

        if let Some(path) = &self.frame_dump {
            write_ppm(path, self.nes.frame())
                .with_context(|| format!("writing {}", path.display()))?;
        }

        if self.nes.cartridge().has_battery() {
            fs::write(&self.save_path, self.nes.cartridge().save_ram())
                .with_context(|| format!("writing {}", self.save_path.display()))?;
        }

        info!(
            frames = self.nes.frame_count(),
            cpu_cycles = self.nes.cpu().cycles(),
            samples = self.samples,
            dropped_samples = self.nes.apu().dropped_samples(),
            "finished"
        );
        Ok(())
    }
}

fn load_save_ram(nes: &mut Nes, path: &Path) -> Result<()> {
    match fs::read(path) {
        Ok(data) => {
            if data.len() < nes.cartridge().save_ram().len() {
                warn!(
                    path = %path.display(),
                    len = data.len(),
                    "save file is short, missing bytes start zeroed"
                );
            }
            nes.cartridge_mut().load_save_ram(&data);
            debug!(path = %path.display(), "save ram restored");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

/// Binary PPM (P6) of a `0xAABBGGRR` frame.
fn write_ppm(path: &Path, frame: &[u32]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n")?;
    for &pixel in frame {
        let [r, g, b, _] = pixel.to_le_bytes();
        out.write_all(&[r, g, b])?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_uses_red_from_low_byte() -> Result<()> {
        let path = std::env::temp_dir().join(format!("famicom-cli-{}.ppm", std::process::id()));
        let mut frame = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        frame[0] = 0xFF33_2211;
        write_ppm(&path, &frame)?;
        let bytes = fs::read(&path)?;
        fs::remove_file(&path)?;

        let header = format!("P6\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n");
        assert!(bytes.starts_with(header.as_bytes()));
        assert_eq!(&bytes[header.len()..header.len() + 3], &[0x11, 0x22, 0x33]);
        assert_eq!(bytes.len(), header.len() + SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        Ok(())
    }
}
