/// Parses `#rrggbb` (or `#rgb`) into linear-ish 0..1 floats.
pub fn hex_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v) / 255.0);
    match digits.len() {
        6 => Some([channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?]),
        3 => {
            let short = |i: usize| channel(&digits[i..=i].repeat(2));
            Some([short(0)?, short(1)?, short(2)?])
        }
        _ => None,
    }
}

/// [`hex_rgb`] with a neutral grey for malformed input.
pub fn rgb_or_grey(hex: &str) -> [f32; 3] {
    hex_rgb(hex).unwrap_or_else(|| {
        log::warn!("bad colour {hex:?}");
        [0.29, 0.29, 0.29]
    })
}
