//! Synthetic pixel patterns for decoder and pixmap tests.

/// Horizontal/vertical RGB gradient.
pub fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 127) / (width + height)) as u8;
            pixels.extend_from_slice(&[r, g, b]);
        }
    }
    pixels
}

/// RGBA gradient with alpha falling off along x.
pub fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let a = 255 - ((x * 255) / width.max(1)) as u8;
            pixels.extend_from_slice(&[r, g, 128, a]);
        }
    }
    pixels
}

/// 2x2 checkerboard tiling, useful for exercising every filter's deltas.
pub fn checkerboard_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = (x / 2 + y / 2) % 2 == 0;
            let v = if on { 230 } else { 25 };
            pixels.extend_from_slice(&[v, v, v]);
        }
    }
    pixels
}

/// Dimension pairs that historically shake out stride and rounding bugs.
pub const EDGE_CASE_DIMENSIONS: &[(u32, u32)] = &[
    (1, 1),
    (1, 7),
    (7, 1),
    (2, 2),
    (3, 5),
    (16, 16),
    (17, 3),
    (31, 33),
];
