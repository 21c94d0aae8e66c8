/// State-vector amplitude.
///
/// The correction circuits only ever produce amplitudes in
/// `{0, ±1, ±1/√2, ±1/2, ...}`: H, CNOT and Toffoli are real and a phase
/// flip negates. The imaginary part is carried so the kernels stay valid
/// for any 2×2 unitary, but it stays zero for every circuit this crate
/// builds.
use std::ops::{Add, Mul, Neg};

/// Componentwise tolerance for amplitude equality.
const AMPLITUDE_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline(always)]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline(always)]
    pub const fn one() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Born-rule weight |α|².
    #[inline(always)]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Phase flip of a single amplitude.
impl Neg for Complex {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        (self.re - other.re).abs() < AMPLITUDE_EPSILON && (self.im - other.im).abs() < AMPLITUDE_EPSILON
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}
