//! Coefficient domains for polynomial terms.
//!
//! The core trait is [Ring], which has two binary operations, addition and
//! multiplication. Each ring has an associated element type, that should not
//! be confused with the ring type itself. For example:
//! - The ring of integers [Z](type@integer::Z) has elements of type
//!   [Integer](integer::Integer).
//! - The ring of general expressions [AtomField](atom::AtomField) has
//!   elements of type [Atom](crate::atom::Atom).
//!
//! The ring elements do not implement operations such as addition or
//! multiplication themselves; the ring does. The polynomial structures are
//! generic over the ring type.

pub mod atom;
pub mod integer;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::atom::Atom;
use integer::Integer;

/// A ring is a set with two binary operations, addition and multiplication.
///
/// Elements must carry structural equality and hashing, which the polynomial
/// types build their own canonical equality and hashing on.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    type Element: Clone + PartialEq + Eq + Hash + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: Integer) -> Self::Element;
    /// Exact exponentiation with a non-negative integer power.
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    /// Draw an element from `range`, for randomized tests.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;
}

/// A ring whose elements can be lifted into general expressions.
pub trait ToExpression: Ring {
    fn to_expression(&self, element: &Self::Element) -> Atom;
}
