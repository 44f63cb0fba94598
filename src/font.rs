/// Index of the colon glyph in [`FONT`].
pub const COLON: u8 = 10;

/// 3x8 glyphs for the digits 0-9 followed by a colon. `FONT[glyph][row][col]`.
#[rustfmt::skip]
pub const FONT: [[[u8; 3]; 8]; 11] = [
    // 0
    [[1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 1
    [[0, 1, 0], [1, 1, 0], [0, 1, 0], [0, 1, 0], [0, 1, 0], [0, 1, 0], [1, 1, 1], [0, 0, 0]],
    // 2
    [[1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [1, 0, 0], [1, 0, 0], [1, 1, 1], [0, 0, 0]],
    // 3
    [[1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 4
    [[1, 0, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [0, 0, 1], [0, 0, 0]],
    // 5
    [[1, 1, 1], [1, 0, 0], [1, 0, 0], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 6
    [[1, 1, 1], [1, 0, 0], [1, 0, 0], [1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 7
    [[1, 1, 1], [0, 0, 1], [0, 0, 1], [0, 1, 0], [0, 1, 0], [0, 1, 0], [0, 1, 0], [0, 0, 0]],
    // 8
    [[1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 0]],
    // 9
    [[1, 1, 1], [1, 0, 1], [1, 0, 1], [1, 1, 1], [0, 0, 1], [0, 0, 1], [1, 1, 1], [0, 0, 0]],
    // :
    [[0, 0, 0], [0, 0, 0], [0, 1, 0], [0, 0, 0], [0, 1, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
];
