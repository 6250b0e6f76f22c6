//! Dimension-tagged physical quantities over SI base units.
//!
//! Every scalar and 2D vector in the simulation carries a phantom dimension
//! marker, so mixing a velocity with a length is a compile error rather than
//! a silent unit bug. Only the physically meaningful cross-dimension
//! operators are implemented (velocity · time = length, force / mass =
//! acceleration, and so on).
//!
//! Values are stored in SI (meters, seconds, kilograms). Inner numeric loops
//! may drop to raw `f64`/`DVec2` through `value()`/`as_dvec2()` and rewrap
//! at the boundary.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use bevy::math::DVec2;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67430e-11;

/// Dimension markers. Uninhabited: they exist only as type parameters.
pub mod dim {
    pub enum Length {}
    pub enum Time {}
    pub enum Mass {}
    pub enum Velocity {}
    pub enum Acceleration {}
    pub enum Force {}
}

/// A scalar carrying a physical dimension. SI units.
pub struct Quantity<D> {
    value: f64,
    _dim: PhantomData<D>,
}

pub type Meters = Quantity<dim::Length>;
pub type Seconds = Quantity<dim::Time>;
pub type Kilograms = Quantity<dim::Mass>;
pub type MetersPerSecond = Quantity<dim::Velocity>;
pub type MetersPerSecondSquared = Quantity<dim::Acceleration>;
pub type Newtons = Quantity<dim::Force>;

impl<D> Quantity<D> {
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _dim: PhantomData,
        }
    }

    /// The raw SI value.
    pub fn value(self) -> f64 {
        self.value
    }

    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }
}

// Manual impls so `D` needs no bounds of its own.
impl<D> Clone for Quantity<D> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<D> Copy for Quantity<D> {}
impl<D> Default for Quantity<D> {
    fn default() -> Self {
        Self::new(0.0)
    }
}
impl<D> PartialEq for Quantity<D> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<D> PartialOrd for Quantity<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
impl<D> fmt::Debug for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl<D> Add for Quantity<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}
impl<D> Sub for Quantity<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}
impl<D> Neg for Quantity<D> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}
impl<D> Mul<f64> for Quantity<D> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}
impl<D> Mul<Quantity<D>> for f64 {
    type Output = Quantity<D>;
    fn mul(self, rhs: Quantity<D>) -> Quantity<D> {
        Quantity::new(self * rhs.value)
    }
}
impl<D> Div<f64> for Quantity<D> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs)
    }
}
/// Ratio of two same-dimension quantities is dimensionless.
impl<D> Div for Quantity<D> {
    type Output = f64;
    fn div(self, rhs: Self) -> f64 {
        self.value / rhs.value
    }
}

/// Magnitude along a unit direction.
impl<D> Mul<DVec2> for Quantity<D> {
    type Output = Vector2<D>;
    fn mul(self, dir: DVec2) -> Vector2<D> {
        Vector2::from_dvec2(dir * self.value)
    }
}

// Cross-dimension scalar algebra.
impl Mul<Seconds> for MetersPerSecond {
    type Output = Meters;
    fn mul(self, dt: Seconds) -> Meters {
        Meters::new(self.value * dt.value)
    }
}
impl Mul<Seconds> for MetersPerSecondSquared {
    type Output = MetersPerSecond;
    fn mul(self, dt: Seconds) -> MetersPerSecond {
        MetersPerSecond::new(self.value * dt.value)
    }
}
impl Div<Seconds> for Meters {
    type Output = MetersPerSecond;
    fn div(self, dt: Seconds) -> MetersPerSecond {
        MetersPerSecond::new(self.value / dt.value)
    }
}
impl Div<Seconds> for MetersPerSecond {
    type Output = MetersPerSecondSquared;
    fn div(self, dt: Seconds) -> MetersPerSecondSquared {
        MetersPerSecondSquared::new(self.value / dt.value)
    }
}
impl Div<Kilograms> for Newtons {
    type Output = MetersPerSecondSquared;
    fn div(self, mass: Kilograms) -> MetersPerSecondSquared {
        MetersPerSecondSquared::new(self.value / mass.value)
    }
}

/// A 2D vector carrying a physical dimension. SI units, world frame.
pub struct Vector2<D> {
    v: DVec2,
    _dim: PhantomData<D>,
}

pub type Position2 = Vector2<dim::Length>;
pub type Velocity2 = Vector2<dim::Velocity>;
pub type Acceleration2 = Vector2<dim::Acceleration>;
pub type Force2 = Vector2<dim::Force>;

impl<D> Vector2<D> {
    pub const ZERO: Self = Self {
        v: DVec2::ZERO,
        _dim: PhantomData,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            v: DVec2::new(x, y),
            _dim: PhantomData,
        }
    }

    pub const fn from_dvec2(v: DVec2) -> Self {
        Self {
            v,
            _dim: PhantomData,
        }
    }

    /// The raw SI components.
    pub fn as_dvec2(self) -> DVec2 {
        self.v
    }

    pub fn x(self) -> f64 {
        self.v.x
    }

    pub fn y(self) -> f64 {
        self.v.y
    }

    pub fn length(self) -> Quantity<D> {
        Quantity::new(self.v.length())
    }

    /// Squared SI magnitude (dimension squared, so returned raw).
    pub fn length_squared(self) -> f64 {
        self.v.length_squared()
    }

    pub fn distance(self, other: Self) -> Quantity<D> {
        Quantity::new(self.v.distance(other.v))
    }

    /// SI dot product (dimension squared, so returned raw).
    pub fn dot(self, other: Self) -> f64 {
        self.v.dot(other.v)
    }

    /// Scalar component along `dir`, which must be unit length.
    pub fn component_along(self, dir: DVec2) -> Quantity<D> {
        Quantity::new(self.v.dot(dir))
    }

    pub fn is_finite(self) -> bool {
        self.v.is_finite()
    }
}

impl<D> Clone for Vector2<D> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<D> Copy for Vector2<D> {}
impl<D> Default for Vector2<D> {
    fn default() -> Self {
        Self::ZERO
    }
}
impl<D> PartialEq for Vector2<D> {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v
    }
}
impl<D> fmt::Debug for Vector2<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.v.x, self.v.y)
    }
}

impl<D> Add for Vector2<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_dvec2(self.v + rhs.v)
    }
}
impl<D> AddAssign for Vector2<D> {
    fn add_assign(&mut self, rhs: Self) {
        self.v += rhs.v;
    }
}
impl<D> Sub for Vector2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_dvec2(self.v - rhs.v)
    }
}
impl<D> SubAssign for Vector2<D> {
    fn sub_assign(&mut self, rhs: Self) {
        self.v -= rhs.v;
    }
}
impl<D> Neg for Vector2<D> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_dvec2(-self.v)
    }
}
impl<D> Mul<f64> for Vector2<D> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::from_dvec2(self.v * rhs)
    }
}
impl<D> Mul<Vector2<D>> for f64 {
    type Output = Vector2<D>;
    fn mul(self, rhs: Vector2<D>) -> Vector2<D> {
        Vector2::from_dvec2(rhs.v * self)
    }
}
impl<D> Div<f64> for Vector2<D> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::from_dvec2(self.v / rhs)
    }
}

// Cross-dimension vector algebra.
impl Mul<Seconds> for Velocity2 {
    type Output = Position2;
    fn mul(self, dt: Seconds) -> Position2 {
        Position2::from_dvec2(self.v * dt.value())
    }
}
impl Mul<Seconds> for Acceleration2 {
    type Output = Velocity2;
    fn mul(self, dt: Seconds) -> Velocity2 {
        Velocity2::from_dvec2(self.v * dt.value())
    }
}
impl Div<Kilograms> for Force2 {
    type Output = Acceleration2;
    fn div(self, mass: Kilograms) -> Acceleration2 {
        Acceleration2::from_dvec2(self.v / mass.value())
    }
}
