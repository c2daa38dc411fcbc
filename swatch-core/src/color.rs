/// A straight-alpha 8 bit per channel color, packed as `0xAARRGGBB`.
///
/// Colors compare by value only. Two colors with the same bits are the same color.
#[repr(transparent)]
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, bytemuck::Pod, bytemuck::Zeroable, Default,
)]
pub struct Color(u32);
impl Color {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Wrap a packed `0xAARRGGBB` value as-is.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }
    /// Wrap a packed `0xRRGGBB` value, forcing the alpha channel opaque.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }
    #[must_use]
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
    /// Channels in `[r, g, b, a]` order, as most pixel buffers want them.
    #[must_use]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}
impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::from_argb(value)
    }
}
impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        value.argb()
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({self})")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, found {0}")]
    Length(usize),
    #[error("invalid hex digit")]
    Digit,
}
impl std::str::FromStr for Color {
    type Err = ColorParseError;
    /// Parse `#RRGGBB` or `#AARRGGBB`. The leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        // `from_str_radix` alone would accept a leading '+'.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit);
        }
        let value = || u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::Digit);
        match digits.len() {
            6 => Ok(Self::from_rgb(value()?)),
            8 => Ok(Self::from_argb(value()?)),
            len => Err(ColorParseError::Length(len)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Color, ColorParseError};
    #[test]
    fn channels() {
        let color = Color::from_channels(0x80, 0x12, 0x34, 0x56);
        assert_eq!(color.argb(), 0x8012_3456);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.red(), 0x12);
        assert_eq!(color.green(), 0x34);
        assert_eq!(color.blue(), 0x56);
        assert_eq!(color.to_rgba8(), [0x12, 0x34, 0x56, 0x80]);
    }
    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::from_rgb(0xFF0000).argb(), 0xFFFF_0000);
        // High byte is discarded, not merged.
        assert_eq!(Color::from_rgb(0x1200_FF00).argb(), 0xFF00_FF00);
    }
    #[test]
    fn parse() {
        assert_eq!("#FF0000".parse(), Ok(Color::from_rgb(0xFF0000)));
        assert_eq!("00ff00".parse(), Ok(Color::from_rgb(0x00FF00)));
        assert_eq!("#80FFFFFF".parse(), Ok(Color::from_argb(0x80FF_FFFF)));
        assert_eq!(
            "#FFF".parse::<Color>(),
            Err(ColorParseError::Length(3))
        );
        assert_eq!("#GG0000".parse::<Color>(), Err(ColorParseError::Digit));
        // Would be accepted by `from_str_radix` as a sign!
        assert!("+FFFFF".parse::<Color>().is_err());
    }
    #[test]
    fn display() {
        assert_eq!(Color::from_rgb(0xABCDEF).to_string(), "#FFABCDEF");
        assert_eq!(format!("{:?}", Color::TRANSPARENT), "Color(#00000000)");
        let round: Color = Color::from_argb(0x1234_5678).to_string().parse().unwrap();
        assert_eq!(round, Color::from_argb(0x1234_5678));
    }
}
