use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signed sectional curvature of the ambient space.
///
/// `0` is Euclidean, `+1` spherical, `-1` hyperbolic. The classification
/// compares against zero exactly, so only the three canonical values are
/// meaningful even though the formulas accept any float.
///
/// Every curved-space operation takes the curvature as an explicit value.
/// A frame reads one snapshot from [`CurvatureState::frame`] and passes it
/// down, which keeps the view and projection of one frame consistent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "CurvatureRepr", into = "f32")]
pub struct Curvature(f32);

impl Curvature {
    pub const EUCLIDEAN: Self = Self(0.0);
    pub const SPHERICAL: Self = Self(1.0);
    pub const HYPERBOLIC: Self = Self(-1.0);

    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f32 {
        self.0
    }

    pub fn is_euclidean(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_spherical(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_hyperbolic(self) -> bool {
        self.0 < 0.0
    }

    /// `sin` in flat and spherical space, `sinh` in hyperbolic space.
    #[inline]
    pub fn sin(self, x: f32) -> f32 {
        if self.is_hyperbolic() { x.sinh() } else { x.sin() }
    }

    /// `cos` in flat and spherical space, `cosh` in hyperbolic space.
    #[inline]
    pub fn cos(self, x: f32) -> f32 {
        if self.is_hyperbolic() { x.cosh() } else { x.cos() }
    }

    /// `acos` in flat and spherical space, `acosh` in hyperbolic space.
    ///
    /// No clamping: arguments outside the domain give NaN.
    #[inline]
    pub fn acos(self, x: f32) -> f32 {
        if self.is_hyperbolic() { x.acosh() } else { x.acos() }
    }

    /// Sign of the `w` term in the ambient bilinear form.
    #[inline]
    pub fn w_sign(self) -> f32 {
        if self.is_hyperbolic() { -1.0 } else { 1.0 }
    }

    pub fn name(self) -> &'static str {
        if self.is_hyperbolic() {
            "hyperbolic"
        } else if self.is_spherical() {
            "spherical"
        } else {
            "euclidean"
        }
    }
}

impl fmt::Display for Curvature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (k={})", self.name(), self.0)
    }
}

impl FromStr for Curvature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "flat" | "euc" => Ok(Self::EUCLIDEAN),
            "spherical" | "sph" => Ok(Self::SPHERICAL),
            "hyperbolic" | "hyp" => Ok(Self::HYPERBOLIC),
            other => match other.parse::<f32>() {
                Ok(k) if k.is_finite() => Ok(Self(k)),
                _ => anyhow::bail!("unknown curvature {s:?}"),
            },
        }
    }
}

impl From<Curvature> for f32 {
    fn from(k: Curvature) -> f32 {
        k.0
    }
}

/// Accepts either a number or one of the geometry names.
#[derive(Deserialize)]
#[serde(untagged)]
enum CurvatureRepr {
    Value(f32),
    Named(String),
}

impl TryFrom<CurvatureRepr> for Curvature {
    type Error = anyhow::Error;

    fn try_from(repr: CurvatureRepr) -> Result<Self, Self::Error> {
        match repr {
            CurvatureRepr::Value(k) if k.is_finite() => Ok(Self(k)),
            CurvatureRepr::Value(k) => anyhow::bail!("curvature must be finite, got {k}"),
            CurvatureRepr::Named(name) => name.parse(),
        }
    }
}

/// The application's current curvature.
///
/// Single writer, written only between frames. Computations never read it
/// directly; they take the [`Curvature`] returned by [`CurvatureState::frame`].
#[derive(Debug, Clone, Default)]
pub struct CurvatureState {
    current: Curvature,
}

impl CurvatureState {
    pub fn new(initial: Curvature) -> Self {
        Self { current: initial }
    }

    pub fn get(&self) -> Curvature {
        self.current
    }

    pub fn set(&mut self, k: Curvature) {
        if k != self.current {
            tracing::info!(target: "curvature", from = %self.current, to = %k, "curvature changed");
        }
        self.current = k;
    }

    pub fn set_euclidean(&mut self) {
        self.set(Curvature::EUCLIDEAN);
    }

    pub fn set_spherical(&mut self) {
        self.set(Curvature::SPHERICAL);
    }

    pub fn set_hyperbolic(&mut self) {
        self.set(Curvature::HYPERBOLIC);
    }

    pub fn is_euclidean(&self) -> bool {
        self.current.is_euclidean()
    }

    pub fn is_spherical(&self) -> bool {
        self.current.is_spherical()
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.current.is_hyperbolic()
    }

    /// Snapshot for one frame of work.
    pub fn frame(&self) -> Curvature {
        self.current
    }
}
