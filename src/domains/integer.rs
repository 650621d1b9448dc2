use std::fmt::{Display, Error, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;
use rug::{ops::Pow, Complete, Integer as ArbitraryPrecisionInteger};

use crate::atom::Atom;

use super::{Ring, ToExpression};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

impl Hash for IntegerRing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // tag that separates integer-coefficient polynomials from other
        // domains in structural hashes
        state.write_u8(0);
    }
}

impl Display for IntegerRing {
    fn fmt(&self, _: &mut Formatter<'_>) -> Result<(), Error> {
        Ok(())
    }
}

/// An exact integer with a machine-word fast path.
///
/// `Large` never holds a value that fits in an `i64`: every operation demotes
/// through [Integer::from_large], so that the derived equality and hash see a
/// single canonical form.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Integer {
    Natural(i64),
    Large(ArbitraryPrecisionInteger),
}

macro_rules! from_with_cast {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                #[inline]
                fn from(value: $t) -> Self {
                    Integer::Natural(value as i64)
                }
            }
        )*
    };
}

from_with_cast!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(ArbitraryPrecisionInteger::from(value))
        }
    }
}

impl From<ArbitraryPrecisionInteger> for Integer {
    fn from(value: ArbitraryPrecisionInteger) -> Self {
        Integer::from_large(value)
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    /// Wrap an arbitrary-precision integer, demoting it to the machine-word
    /// representation when it fits.
    pub fn from_large(n: ArbitraryPrecisionInteger) -> Integer {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Natural(0))
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == std::cmp::Ordering::Less,
        }
    }

    /// Convert to a `u64` if the value is a natural number that fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Integer::Natural(n) => u64::try_from(*n).ok(),
            Integer::Large(r) => r.to_u64(),
        }
    }

    /// Exact non-negative integer power.
    pub fn pow(&self, e: u64) -> Integer {
        if e > u32::MAX as u64 {
            panic!("Power of exponentiation is larger than 2^32: {}", e);
        }
        let e = e as u32;

        match self {
            Integer::Natural(n) => {
                if let Some(pn) = n.checked_pow(e) {
                    Integer::Natural(pn)
                } else {
                    Integer::Large(ArbitraryPrecisionInteger::from(*n).pow(e))
                }
            }
            Integer::Large(r) => Integer::from_large(r.pow(e).into()),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        ArbitraryPrecisionInteger::from(*n1) + ArbitraryPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                Integer::from_large(ArbitraryPrecisionInteger::from(*n1) + r2)
            }
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from_large((r1 + r2).complete()),
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_sub(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        ArbitraryPrecisionInteger::from(*n1) - ArbitraryPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => {
                Integer::from_large(ArbitraryPrecisionInteger::from(*n1) - r2)
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                Integer::from_large(r1 - ArbitraryPrecisionInteger::from(*n2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from_large((r1 - r2).complete()),
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_mul(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        ArbitraryPrecisionInteger::from(*n1) * ArbitraryPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                Integer::from_large(ArbitraryPrecisionInteger::from(*n1) * r2)
            }
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from_large((r1 * r2).complete()),
        }
    }
}

impl Add for Integer {
    type Output = Integer;

    #[inline]
    fn add(self, rhs: Integer) -> Integer {
        &self + &rhs
    }
}

impl Sub for Integer {
    type Output = Integer;

    #[inline]
    fn sub(self, rhs: Integer) -> Integer {
        &self - &rhs
    }
}

impl Mul for Integer {
    type Output = Integer;

    #[inline]
    fn mul(self, rhs: Integer) -> Integer {
        &self * &rhs
    }
}

impl AddAssign<&Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: &Integer) {
        *self = &*self + rhs;
    }
}

impl SubAssign<&Integer> for Integer {
    #[inline]
    fn sub_assign(&mut self, rhs: &Integer) {
        *self = &*self - rhs;
    }
}

impl MulAssign<&Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: &Integer) {
        *self = &*self * rhs;
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Large(-ArbitraryPrecisionInteger::from(*n))
                }
            }
            Integer::Large(r) => Integer::from_large((-r).complete()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        -&self
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    fn zero(&self) -> Self::Element {
        Integer::Natural(0)
    }

    fn one(&self) -> Self::Element {
        Integer::Natural(1)
    }

    fn nth(&self, n: Integer) -> Self::Element {
        n
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        Integer::Natural(r)
    }
}

impl ToExpression for IntegerRing {
    fn to_expression(&self, element: &Self::Element) -> Atom {
        Atom::Num(element.clone())
    }
}

#[cfg(test)]
mod test {
    use rug::{ops::Pow, Integer as ArbitraryPrecisionInteger};

    use super::Integer;

    #[test]
    fn promotion_on_overflow() {
        let a = Integer::new(i64::MAX);
        let b = &a + &Integer::new(1);
        assert!(matches!(b, Integer::Large(_)));
        assert_eq!(
            b,
            Integer::from(ArbitraryPrecisionInteger::from(i64::MAX) + 1)
        );

        let c = &b - &Integer::new(1);
        assert_eq!(c, a);
        assert!(matches!(c, Integer::Natural(_)));
    }

    #[test]
    fn canonical_demotion() {
        // a large value that fits a machine word demotes on construction
        assert_eq!(
            Integer::from(ArbitraryPrecisionInteger::from(5)),
            Integer::new(5)
        );
        assert!(matches!(-Integer::new(i64::MIN), Integer::Large(_)));
        assert!(matches!(
            -(-Integer::new(i64::MIN)),
            Integer::Natural(i64::MIN)
        ));
    }

    #[test]
    fn exact_pow() {
        assert_eq!(Integer::new(2).pow(10), Integer::new(1024));
        assert_eq!(
            Integer::new(10).pow(30),
            Integer::from(ArbitraryPrecisionInteger::from(10).pow(30))
        );
        assert_eq!(Integer::new(-3).pow(3), Integer::new(-27));
        assert_eq!(Integer::new(0).pow(0), Integer::new(1));
    }

    #[test]
    fn to_u64() {
        assert_eq!(Integer::new(42).to_u64(), Some(42));
        assert_eq!(Integer::new(-1).to_u64(), None);
        assert_eq!(
            Integer::from(u64::MAX).to_u64(),
            Some(u64::MAX)
        );
    }
}
