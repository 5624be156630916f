use crate::foundation::{config::ScaleKind, core::Rgb8};

/// Maps a normalized rate in `[0, 1]` to a color.
pub trait ColorRamp {
    /// Color for `rate` under the given distribution.
    fn color_at(&self, rate: f64, scale: ScaleKind) -> Rgb8;
}

impl<F> ColorRamp for F
where
    F: Fn(f64, ScaleKind) -> Rgb8,
{
    fn color_at(&self, rate: f64, scale: ScaleKind) -> Rgb8 {
        self(rate, scale)
    }
}

/// Cold-to-hot stops: blue, turquoise, green, yellow, red.
pub const HEAT_STOPS: [(f64, Rgb8); 5] = [
    (0.00, Rgb8::new(0, 0, 255)),
    (0.25, Rgb8::new(64, 224, 208)),
    (0.50, Rgb8::new(0, 128, 0)),
    (0.75, Rgb8::new(255, 255, 0)),
    (1.00, Rgb8::new(255, 0, 0)),
];

/// Piecewise gradient interpolated in CIE Lab.
///
/// Rates are clamped to `[0, 1]`. With [`ScaleKind::Log`] each segment is traversed in log
/// space; the segment anchored at 0 reaches its upper stop for any positive rate.
#[derive(Clone, Debug)]
pub struct LabRamp {
    stops: Vec<Stop>,
}

#[derive(Clone, Copy, Debug)]
struct Stop {
    at: f64,
    rgb: Rgb8,
    lab: Lab,
}

impl Default for LabRamp {
    fn default() -> Self {
        Self::new(&HEAT_STOPS)
    }
}

impl LabRamp {
    /// Build from `(breakpoint, color)` pairs sorted by ascending breakpoint.
    pub fn new(stops: &[(f64, Rgb8)]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|&(at, rgb)| Stop {
                    at,
                    rgb,
                    lab: Lab::from_rgb(rgb),
                })
                .collect(),
        }
    }
}

impl ColorRamp for LabRamp {
    fn color_at(&self, rate: f64, scale: ScaleKind) -> Rgb8 {
        let (first, last) = match self.stops.as_slice() {
            [] => return Rgb8::new(0, 0, 0),
            [only] => return only.rgb,
            [first, .., last] => (first, last),
        };
        let rate = if rate.is_nan() {
            first.at
        } else {
            rate.clamp(first.at, last.at)
        };

        // Segment whose upper breakpoint is the first one strictly above `rate`.
        let hi = self
            .stops
            .iter()
            .position(|s| s.at > rate)
            .unwrap_or(self.stops.len() - 1)
            .max(1);
        let lo = self.stops[hi - 1];
        let hi = self.stops[hi];
        let (a, b) = (lo.at, hi.at);

        let t = match scale {
            ScaleKind::Linear => (rate - a) / (b - a),
            ScaleKind::Log if a <= 0.0 => {
                if rate > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ScaleKind::Log => (rate.ln() - a.ln()) / (b.ln() - a.ln()),
        };
        if !t.is_finite() || t <= 0.0 {
            return lo.rgb;
        }
        if t >= 1.0 {
            return hi.rgb;
        }
        lo.lab.lerp(hi.lab, t).to_rgb()
    }
}

// D50 reference white, with sRGB primaries Bradford-adapted from D65.
const XN: f64 = 0.96422;
const YN: f64 = 1.0;
const ZN: f64 = 0.82521;
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Lab {
    l: f64,
    a: f64,
    b: f64,
}

impl Lab {
    fn from_rgb(c: Rgb8) -> Self {
        let r = srgb_to_linear(c.r);
        let g = srgb_to_linear(c.g);
        let b = srgb_to_linear(c.b);
        let y = xyz_to_lab((0.2225045 * r + 0.7168786 * g + 0.0606169 * b) / YN);
        let (x, z) = if r == g && g == b {
            (y, y)
        } else {
            (
                xyz_to_lab((0.4360747 * r + 0.3850649 * g + 0.1430804 * b) / XN),
                xyz_to_lab((0.0139322 * r + 0.0971045 * g + 0.7141733 * b) / ZN),
            )
        };
        Self {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    fn to_rgb(self) -> Rgb8 {
        let y = (self.l + 16.0) / 116.0;
        let x = XN * lab_to_xyz(y + self.a / 500.0);
        let z = ZN * lab_to_xyz(y - self.b / 200.0);
        let y = YN * lab_to_xyz(y);
        Rgb8::from_f64(
            linear_to_srgb(3.1338561 * x - 1.6168667 * y - 0.4906146 * z),
            linear_to_srgb(-0.9787684 * x + 1.9161415 * y + 0.0334540 * z),
            linear_to_srgb(0.0719453 * x - 0.2289914 * y + 1.4052427 * z),
        )
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let x = f64::from(c) / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(x: f64) -> f64 {
    255.0
        * if x <= 0.0031308 {
            12.92 * x
        } else {
            1.055 * x.powf(1.0 / 2.4) - 0.055
        }
}

fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

#[cfg(test)]
#[path = "../../tests/unit/color/ramp.rs"]
mod tests;
