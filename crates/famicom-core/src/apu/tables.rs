//! Immutable lookup tables shared by the APU channels and mixer.

/// Length counter load values indexed by the upper five bits of the
/// length register.
pub(super) const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, //
    12, 16, 24, 18, 48, 20, 96, 22, 192, 24, 72, 26, 16, 28, 32, 30,
];

/// Pulse duty sequences (12.5%, 25%, 50%, 25% negated).
pub(super) const PULSE_DUTY_TABLE: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 0, 0],
    [1, 0, 0, 1, 1, 1, 1, 1],
];

pub(super) const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, //
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
];

/// NTSC noise timer periods in APU cycles.
pub(super) const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// NTSC DMC timer periods in APU cycles.
pub(super) const DMC_RATE_TABLE: [u16; 16] = [
    214, 190, 170, 160, 143, 127, 113, 107, 95, 80, 71, 64, 53, 42, 36, 27,
];

/// `95.52 / (8128 / n + 100)` for the summed pulse level `n`.
pub(super) static PULSE_MIX_TABLE: [f32; 31] = mix_table(95.52, 8128.0);

/// `163.67 / (24329 / n + 100)` for `3 * triangle + 2 * noise + dmc`.
pub(super) static TND_MIX_TABLE: [f32; 203] = mix_table(163.67, 24329.0);

const fn mix_table<const N: usize>(scale: f32, divisor: f32) -> [f32; N] {
    let mut table = [0.0; N];
    let mut n = 1;
    while n < N {
        table[n] = scale / (divisor / n as f32 + 100.0);
        n += 1;
    }
    table
}
