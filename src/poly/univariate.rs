use crate::domains::Ring;
use crate::state::Symbol;

/// A dense univariate polynomial: `coefficients[i]` is the coefficient of
/// the variable raised to the power `i`. Trailing zero coefficients are
/// never stored.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Symbol,
    pub field: F,
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial.
    #[inline]
    pub fn new(field: &F, variable: Symbol) -> Self {
        Self {
            coefficients: vec![],
            variable,
            field: field.clone(),
        }
    }

    /// Constructs a polynomial from dense coefficients, where
    /// `coefficients[i]` belongs to the power `i`. Trailing zeros are
    /// truncated.
    pub fn from_coefficients(field: &F, variable: Symbol, mut coefficients: Vec<F::Element>) -> Self {
        while coefficients.last().map(F::is_zero).unwrap_or(false) {
            coefficients.pop();
        }

        Self {
            coefficients,
            variable,
            field: field.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The degree of the polynomial, where the zero polynomial has degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        if self.coefficients.is_empty() {
            0
        } else {
            self.coefficients.len() - 1
        }
    }

    /// Evaluate the polynomial exactly, using Horner's method.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();
        for c in self.coefficients.iter().rev() {
            self.field.mul_assign(&mut res, x);
            self.field.add_assign(&mut res, c);
        }
        res
    }
}

#[cfg(test)]
mod test {
    use crate::domains::integer::{Integer, Z};
    use crate::state::State;

    use super::UnivariatePolynomial;

    #[test]
    fn horner_evaluation() {
        let x = State::get_symbol("u_x");

        // 4 - x + 7*x^3
        let p = UnivariatePolynomial::from_coefficients(
            &Z,
            x,
            vec![4.into(), (-1).into(), 0.into(), 7.into()],
        );

        assert_eq!(p.degree(), 3);
        assert_eq!(p.evaluate(&Integer::new(0)), Integer::new(4));
        assert_eq!(p.evaluate(&Integer::new(2)), Integer::new(58));
        assert_eq!(p.evaluate(&Integer::new(-3)), Integer::new(-182));
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        let x = State::get_symbol("u_x");

        let p = UnivariatePolynomial::from_coefficients(
            &Z,
            x,
            vec![1.into(), 2.into(), 0.into(), 0.into()],
        );
        assert_eq!(p.degree(), 1);
        assert_eq!(p.coefficients.len(), 2);
    }

    #[test]
    fn zero_polynomial() {
        let x = State::get_symbol("u_x");

        let p = UnivariatePolynomial::from_coefficients(&Z, x, vec![0.into(), 0.into()]);
        assert!(p.is_zero());
        assert_eq!(p.degree(), 0);
        assert_eq!(p.evaluate(&Integer::new(9)), Integer::new(0));

        let q = UnivariatePolynomial::new(&Z, x);
        assert_eq!(p, q);
    }
}
