//! The ring of general expressions.

use std::fmt::{Display, Error, Formatter};
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::atom::Atom;

use super::{integer::Integer, Ring, ToExpression};

/// The ring of general expressions.
///
/// Operations delegate to the expression constructors, so they perform the
/// same identity-preserving normalization. Zero detection is structural: a
/// coefficient that is symbolically zero without being the number zero is
/// not recognized, the same way the engine's expression polynomials behave.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AtomField;

impl Default for AtomField {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomField {
    pub const fn new() -> AtomField {
        AtomField
    }
}

impl Hash for AtomField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // tag that separates expression-coefficient polynomials from other
        // domains in structural hashes
        state.write_u8(1);
    }
}

impl Display for AtomField {
    fn fmt(&self, _: &mut Formatter<'_>) -> Result<(), Error> {
        Ok(())
    }
}

impl Ring for AtomField {
    type Element = Atom;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Atom::add(vec![a.clone(), b.clone()])
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Atom::mul(vec![a.clone(), b.clone()])
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Atom::mul(vec![Atom::new_num(-1), a.clone()])
    }

    fn zero(&self) -> Self::Element {
        Atom::new_num(0)
    }

    fn one(&self) -> Self::Element {
        Atom::new_num(1)
    }

    fn nth(&self, n: Integer) -> Self::Element {
        Atom::Num(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.npow(e)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        Atom::new_num(r)
    }
}

impl ToExpression for AtomField {
    fn to_expression(&self, element: &Self::Element) -> Atom {
        element.clone()
    }
}

#[cfg(test)]
mod test {
    use crate::atom::Atom;
    use crate::domains::Ring;
    use crate::state::State;

    use super::AtomField;

    #[test]
    fn ring_ops() {
        let field = AtomField::new();
        let x = Atom::new_var(State::get_symbol("f1"));

        assert_eq!(field.add(&x, &field.zero()), x);
        assert_eq!(field.mul(&x, &field.one()), x);
        assert!(AtomField::is_zero(&field.sub(&field.one(), &field.one())));
        assert_eq!(field.pow(&Atom::new_num(3), 4), Atom::new_num(81));
    }

    #[test]
    fn symbolic_coefficients_survive() {
        let field = AtomField::new();
        let x = Atom::new_var(State::get_symbol("f2"));

        // x + 1 is not a number, so it must stay structural
        let e = field.add(&x, &field.one());
        assert!(!AtomField::is_zero(&e));
        assert!(matches!(e, Atom::Add(_)));
    }
}
