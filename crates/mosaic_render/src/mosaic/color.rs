use std::fmt;
use std::str::FromStr;

/// An RGB color in the 0..=255 domain used by decoded pixels.
///
/// Equality is exact per channel; background detection relies on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Reads the color of one sample, ignoring any channel past the third.
    pub fn from_sample(sample: &[u8]) -> Self {
        Self([sample[0], sample[1], sample[2]])
    }

    /// Normalized form handed to drawing backends.
    pub fn to_ratio(self) -> [f32; 3] {
        self.0.map(|channel| channel as f32 / 255.0)
    }

    pub fn from_ratio(ratio: [f32; 3]) -> Self {
        Self(ratio.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self(channels)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r},{g},{b}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected a color as R,G,B with values in 0..=255, got {0:?}")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_owned());
        let mut channels = [0u8; 3];
        let mut parts = s.trim().trim_start_matches('(').trim_end_matches(')').split(',');
        for channel in &mut channels {
            let part = parts.next().ok_or_else(err)?;
            *channel = part.trim().parse().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self(channels))
    }
}
