use crate::foundation::error::{ChoreoError, ChoreoResult};

pub use kurbo::Point;

/// A dancer's spot on the stage grid, in grid cells. Fractional values appear while
/// interpolating between formations.
pub type Position = Point;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

/// Whole second a timestamp falls into. Formation times are unique at this granularity.
pub fn floor_second(time: f64) -> u64 {
    time.floor().max(0.0) as u64
}

pub fn check_time(time: f64) -> ChoreoResult<f64> {
    if !time.is_finite() || time < 0.0 {
        return Err(ChoreoError::InvalidTime(time));
    }
    Ok(time)
}

/// Straight (non-premultiplied) RGB8, serialized as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub fn parse_hex(s: &str) -> ChoreoResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChoreoError::validation(format!(
                "color '{s}' is not of the form #RRGGBB"
            )));
        }
        let rgb = u32::from_str_radix(hex, 16)
            .map_err(|e| ChoreoError::validation(format!("color '{s}': {e}")))?;
        Ok(Self::from_u32(rgb))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ChoreoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
