use crate::clock::TimeOfDay;
use crate::config::DISPLAY_DEVICES;
use crate::font::{COLON, FONT};

/// Glyph indices for `HH:MM:SS`.
fn glyphs(time: &TimeOfDay) -> [u8; 8] {
    [
        time.hours() / 10,
        time.hours() % 10,
        COLON,
        time.minutes() / 10,
        time.minutes() % 10,
        COLON,
        time.seconds() / 10,
        time.seconds() % 10,
    ]
}

/// Prepares the 8x8 buffers for the chained MAX7219 devices using FC16 layout.
///
/// Glyphs are 3 columns wide with one blank column between them, laid out
/// left to right over a 32-column frame; device 0 holds the leftmost 8 columns.
pub fn prepare_buffer(time: &TimeOfDay) -> [[u8; 8]; DISPLAY_DEVICES] {
    let glyphs = glyphs(time);

    let mut fb_rows = [0u32; 8];
    let mut cursor = 0;

    for (i, &g) in glyphs.iter().enumerate() {
        for (r, row) in FONT[g as usize].iter().enumerate() {
            for (c, &lit) in row.iter().enumerate() {
                if lit != 0 {
                    fb_rows[r] |= 1 << (31 - (cursor + c));
                }
            }
        }
        cursor += 3;
        if i < glyphs.len() - 1 {
            cursor += 1;
        }
    }

    let mut device_buffers = [[0u8; 8]; DISPLAY_DEVICES];
    for (dev_idx, buffer) in device_buffers.iter_mut().enumerate() {
        let shift = 24 - (dev_idx * 8);
        for (r, byte) in buffer.iter_mut().enumerate() {
            *byte = ((fb_rows[r] >> shift) & 0xFF) as u8;
        }
    }

    device_buffers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_top_row() {
        let buffers = prepare_buffer(&TimeOfDay::MIDNIGHT);

        // "0 0" then a blank colon column, then the first minute digit.
        assert_eq!(buffers[0][0], 0b1110_1110);
        assert_eq!(buffers[1][0], 0b0000_1110);
    }

    #[test]
    fn colon_sits_between_hours_and_minutes() {
        let buffers = prepare_buffer(&TimeOfDay::MIDNIGHT);

        // Colon glyph starts at column 8 (device 1, MSB); its dot is column 9.
        assert_eq!(buffers[1][2] & 0b0100_0000, 0b0100_0000);
        assert_eq!(buffers[1][4] & 0b0100_0000, 0b0100_0000);
        assert_eq!(buffers[1][3] & 0b0100_0000, 0);
    }

    #[test]
    fn bottom_row_is_always_blank() {
        for elapsed in [0, 3_599, 45_296, 86_399] {
            let buffers = prepare_buffer(&TimeOfDay::from_elapsed(elapsed));
            assert!(buffers.iter().all(|b| b[7] == 0));
        }
    }

    #[test]
    fn seconds_reach_last_device() {
        let buffers = prepare_buffer(&TimeOfDay::from_elapsed(8));

        // Tens '0' at columns 24..=26, units '8' at 28..=30; '8' has a full middle row.
        assert_eq!(buffers[3][3], 0b1010_1110);
    }
}
