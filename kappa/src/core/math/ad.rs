use glam::{Vec2, Vec3};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The derivative part of a [`Dual`]: a scalar for one parameter, a vector
/// of partials for several.
pub trait Derivative:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
{
    const ZERO: Self;
}

impl Derivative for f32 {
    const ZERO: Self = 0.0;
}

impl Derivative for Vec2 {
    const ZERO: Self = Vec2::ZERO;
}

impl Derivative for Vec3 {
    const ZERO: Self = Vec3::ZERO;
}

/// A Dual number for Forward-Mode Automatic Differentiation.
/// Represents values in the form `a + bε` where `ε² = 0`.
///
/// `der` holds the partial derivatives with respect to every seeded input,
/// so a single evaluation yields the full gradient.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual<D = f32> {
    /// The primal value (f(x))
    pub val: f32,
    /// The derivative value (∇f(x))
    pub der: D,
}

/// Dual number over two surface parameters `(u, v)`.
pub type Dual2 = Dual<Vec2>;

impl<D: Derivative> Dual<D> {
    pub const fn new(val: f32, der: D) -> Self {
        Self { val, der }
    }

    /// Creates a constant value (derivative = 0)
    pub const fn constant(val: f32) -> Self {
        Self { val, der: D::ZERO }
    }

    fn chain(self, val: f32, slope: f32) -> Self {
        Self::new(val, self.der * slope)
    }

    pub fn sin(self) -> Self {
        self.chain(self.val.sin(), self.val.cos())
    }

    pub fn cos(self) -> Self {
        self.chain(self.val.cos(), -self.val.sin())
    }

    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn sinh(self) -> Self {
        self.chain(self.val.sinh(), self.val.cosh())
    }

    pub fn cosh(self) -> Self {
        self.chain(self.val.cosh(), self.val.sinh())
    }

    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    pub fn exp(self) -> Self {
        let e = self.val.exp();
        self.chain(e, e)
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        self.chain(self.val.ln(), 1.0 / self.val)
    }

    /// Power by a constant exponent.
    pub fn powf(self, n: f32) -> Self {
        self.chain(self.val.powf(n), n * self.val.powf(n - 1.0))
    }
}

impl Dual<f32> {
    /// Creates a variable w.r.t which we are differentiating (seed = 1.0)
    pub const fn variable(val: f32) -> Self {
        Self { val, der: 1.0 }
    }
}

impl Dual2 {
    /// First surface parameter, seeded with `(1, 0)`.
    pub const fn u(val: f32) -> Self {
        Self { val, der: Vec2::X }
    }

    /// Second surface parameter, seeded with `(0, 1)`.
    pub const fn v(val: f32) -> Self {
        Self { val, der: Vec2::Y }
    }
}

impl<D: Derivative> Add for Dual<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.der + rhs.der)
    }
}

impl<D: Derivative> Sub for Dual<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.der - rhs.der)
    }
}

impl<D: Derivative> Mul for Dual<D> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Product rule: (a + bε)(c + dε) = ac + (ad + bc)ε
        Self::new(self.val * rhs.val, rhs.der * self.val + self.der * rhs.val)
    }
}

impl<D: Derivative> Div for Dual<D> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        numeric_check!(rhs.val != 0.0, "dual division by zero");
        // Quotient rule: (a/c) + ((b*c - a*d) / c^2)ε
        let val = self.val / rhs.val;
        let der = (self.der * rhs.val - rhs.der * self.val) / (rhs.val * rhs.val);
        Self::new(val, der)
    }
}

impl<D: Derivative> Neg for Dual<D> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.der)
    }
}

impl<D: Derivative> Add<f32> for Dual<D> {
    type Output = Self;
    fn add(self, rhs: f32) -> Self {
        Self::new(self.val + rhs, self.der)
    }
}

impl<D: Derivative> Sub<f32> for Dual<D> {
    type Output = Self;
    fn sub(self, rhs: f32) -> Self {
        Self::new(self.val - rhs, self.der)
    }
}

impl<D: Derivative> Mul<f32> for Dual<D> {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.val * rhs, self.der * rhs)
    }
}
