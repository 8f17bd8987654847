//! Reference palettes used when downgrading colors.
//!
//! The 16-color palettes differ between terminals; the values here are the
//! classic VGA set for standard terminals and the Windows 10 console set for
//! legacy Windows. The 256-color table is the xterm layout: 16 system colors,
//! a 6x6x6 cube and a 24-step gray ramp.

use super::ColorTriplet;

/// A fixed list of colors addressable by index.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colors: &'static [ColorTriplet],
}

impl Palette {
    pub const fn new(colors: &'static [ColorTriplet]) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ColorTriplet> {
        self.colors.get(index).copied()
    }

    /// Index of the entry closest to `color`.
    ///
    /// Distance is the "redmean" weighted Euclidean RGB metric, which tracks
    /// perceived difference better than plain Euclidean distance. Ties go to
    /// the lowest index.
    pub fn closest(&self, color: ColorTriplet) -> usize {
        let mut best = 0;
        let mut best_distance = u64::MAX;
        for (index, candidate) in self.colors.iter().enumerate() {
            let distance = redmean_distance(color, *candidate);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }
}

/// Squared redmean distance between two colors.
fn redmean_distance(a: ColorTriplet, b: ColorTriplet) -> u64 {
    let red_mean = (i64::from(a.red) + i64::from(b.red)) / 2;
    let red = i64::from(a.red) - i64::from(b.red);
    let green = i64::from(a.green) - i64::from(b.green);
    let blue = i64::from(a.blue) - i64::from(b.blue);
    let distance = (((512 + red_mean) * red * red) >> 8)
        + 4 * green * green
        + (((767 - red_mean) * blue * blue) >> 8);
    distance.unsigned_abs()
}

const fn rgb(red: u8, green: u8, blue: u8) -> ColorTriplet {
    ColorTriplet::new(red, green, blue)
}

const STANDARD_COLORS: [ColorTriplet; 16] = [
    rgb(0, 0, 0),
    rgb(170, 0, 0),
    rgb(0, 170, 0),
    rgb(170, 85, 0),
    rgb(0, 0, 170),
    rgb(170, 0, 170),
    rgb(0, 170, 170),
    rgb(170, 170, 170),
    rgb(85, 85, 85),
    rgb(255, 85, 85),
    rgb(85, 255, 85),
    rgb(255, 255, 85),
    rgb(85, 85, 255),
    rgb(255, 85, 255),
    rgb(85, 255, 255),
    rgb(255, 255, 255),
];

const WINDOWS_COLORS: [ColorTriplet; 16] = [
    rgb(12, 12, 12),
    rgb(197, 15, 31),
    rgb(19, 161, 14),
    rgb(193, 156, 0),
    rgb(0, 55, 218),
    rgb(136, 23, 152),
    rgb(58, 150, 221),
    rgb(204, 204, 204),
    rgb(118, 118, 118),
    rgb(231, 72, 86),
    rgb(22, 198, 12),
    rgb(249, 241, 165),
    rgb(59, 120, 255),
    rgb(180, 0, 158),
    rgb(97, 214, 214),
    rgb(242, 242, 242),
];

const EIGHT_BIT_SYSTEM_COLORS: [ColorTriplet; 16] = [
    rgb(0, 0, 0),
    rgb(128, 0, 0),
    rgb(0, 128, 0),
    rgb(128, 128, 0),
    rgb(0, 0, 128),
    rgb(128, 0, 128),
    rgb(0, 128, 128),
    rgb(192, 192, 192),
    rgb(128, 128, 128),
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(255, 255, 0),
    rgb(0, 0, 255),
    rgb(255, 0, 255),
    rgb(0, 255, 255),
    rgb(255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const fn build_eight_bit() -> [ColorTriplet; 256] {
    let mut table = [rgb(0, 0, 0); 256];
    let mut i = 0;
    while i < 16 {
        table[i] = EIGHT_BIT_SYSTEM_COLORS[i];
        i += 1;
    }
    let mut n = 0;
    while n < 216 {
        table[16 + n] = rgb(
            CUBE_LEVELS[n / 36],
            CUBE_LEVELS[(n / 6) % 6],
            CUBE_LEVELS[n % 6],
        );
        n += 1;
    }
    let mut g = 0;
    while g < 24 {
        let level = (8 + 10 * g) as u8;
        table[232 + g] = rgb(level, level, level);
        g += 1;
    }
    table
}

const EIGHT_BIT_COLORS: [ColorTriplet; 256] = build_eight_bit();

pub const STANDARD_PALETTE: Palette = Palette::new(&STANDARD_COLORS);
pub const WINDOWS_PALETTE: Palette = Palette::new(&WINDOWS_COLORS);
pub const EIGHT_BIT_PALETTE: Palette = Palette::new(&EIGHT_BIT_COLORS);
