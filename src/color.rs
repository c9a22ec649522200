//! Colour values for RGB LEDs hung off three driver channels.
//!
//! Plain `Copy` value types; the named colours are constants, not
//! process-wide state.

/// 8-bit-per-component colour, one PWM duty code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

pub const LIGHT_ORANGE: Hsl = Hsl::new(30.0, 1.0, 0.7);
pub const DARK_ORANGE: Hsl = Hsl::new(30.0, 1.0, 0.5);

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Same colour with a different hue, wrapped into `[0, 360)`.
    pub fn with_hue(self, hue: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            ..self
        }
    }

    /// Standard chroma/sextant conversion.  Components truncate toward zero.
    pub fn to_rgb(self) -> Rgb {
        let h = self.hue.rem_euclid(360.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = match (h / 60.0) as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let scale = |v: f32| ((v + m) * 255.0).clamp(0.0, 255.0) as u8;
        Rgb::new(scale(r1), scale(g1), scale(b1))
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}
