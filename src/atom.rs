//! General symbolic expressions.
//!
//! [Atom] is the expression tree that polynomial coefficients and
//! [to_expression](crate::poly::polynomial::MultivariatePolynomial::to_expression)
//! results live in. Construction performs only identity-preserving
//! normalization: numeric subterms fold, additive and multiplicative
//! identities collapse, and everything else is kept as written.

use std::fmt;

use ahash::HashMap;

use crate::domains::integer::Integer;
use crate::state::Symbol;

/// A general symbolic expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Atom {
    Num(Integer),
    Var(Symbol),
    /// A base raised to an exponent.
    Pow(Box<(Atom, Atom)>),
    Mul(Vec<Atom>),
    Add(Vec<Atom>),
}

/// An error from exact expression or polynomial evaluation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EvaluateError {
    /// The substitution map has no entry for this variable.
    MissingVariable(Symbol),
    /// An exponent is symbolic, negative, or too large for a machine word.
    NonNaturalExponent,
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluateError::MissingVariable(v) => {
                write!(f, "no value provided for variable {}", v.get_name())
            }
            EvaluateError::NonNaturalExponent => {
                f.write_str("exponent is not a non-negative machine-size integer")
            }
        }
    }
}

impl std::error::Error for EvaluateError {}

impl Atom {
    /// Create a number.
    pub fn new_num<T: Into<Integer>>(num: T) -> Atom {
        Atom::Num(num.into())
    }

    /// Create a variable.
    pub fn new_var(symbol: Symbol) -> Atom {
        Atom::Var(symbol)
    }

    /// Construct the n-ary sum of `terms`.
    ///
    /// Numeric terms are folded into a single number and a zero sum is
    /// dropped; the empty sum is the number zero. Non-numeric terms keep
    /// their order.
    pub fn add(terms: Vec<Atom>) -> Atom {
        let mut num = Integer::new(0);
        let mut args = Vec::with_capacity(terms.len());
        for t in terms {
            match t {
                Atom::Num(n) => num += &n,
                x => args.push(x),
            }
        }

        if !num.is_zero() {
            args.push(Atom::Num(num));
        }

        match args.len() {
            0 => Atom::new_num(0),
            1 => args.pop().unwrap(),
            _ => Atom::Add(args),
        }
    }

    /// Construct the n-ary product of `factors`.
    ///
    /// Numeric factors are folded into a single leading number, a zero factor
    /// annihilates the product and a unit factor is dropped; the empty
    /// product is the number one.
    pub fn mul(factors: Vec<Atom>) -> Atom {
        let mut num = Integer::new(1);
        let mut args = Vec::with_capacity(factors.len());
        for x in factors {
            match x {
                Atom::Num(n) => num *= &n,
                x => args.push(x),
            }
        }

        if num.is_zero() {
            return Atom::new_num(0);
        }

        if !num.is_one() || args.is_empty() {
            args.insert(0, Atom::Num(num));
        }

        match args.len() {
            1 => args.pop().unwrap(),
            _ => Atom::Mul(args),
        }
    }

    /// Construct `base` raised to `exponent`.
    ///
    /// A zero exponent yields one, a unit exponent yields the base, and a
    /// numeric base raised to a natural number is evaluated.
    pub fn pow(base: Atom, exponent: Atom) -> Atom {
        if let Atom::Num(e) = &exponent {
            if e.is_zero() {
                return Atom::new_num(1);
            }
            if e.is_one() {
                return base;
            }
            if let Atom::Num(b) = &base {
                if let Some(e) = e.to_u64() {
                    return Atom::Num(b.pow(e));
                }
            }
        }

        Atom::Pow(Box::new((base, exponent)))
    }

    /// Raise the expression to an integer power.
    pub fn npow<T: Into<Integer>>(&self, exponent: T) -> Atom {
        Atom::pow(self.clone(), Atom::Num(exponent.into()))
    }

    /// Returns `true` iff the expression is the number zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_zero())
    }

    /// Returns `true` iff the expression is the number one.
    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_one())
    }

    /// Evaluate the expression exactly by substituting an integer value for
    /// every variable.
    ///
    /// Fails when a variable is missing from `values` or when an exponent
    /// does not evaluate to a natural number.
    pub fn evaluate(&self, values: &HashMap<Symbol, Integer>) -> Result<Integer, EvaluateError> {
        match self {
            Atom::Num(n) => Ok(n.clone()),
            Atom::Var(v) => values
                .get(v)
                .cloned()
                .ok_or(EvaluateError::MissingVariable(*v)),
            Atom::Pow(p) => {
                let base = p.0.evaluate(values)?;
                let e = p
                    .1
                    .evaluate(values)?
                    .to_u64()
                    .ok_or(EvaluateError::NonNaturalExponent)?;
                Ok(base.pow(e))
            }
            Atom::Mul(args) => {
                let mut r = Integer::new(1);
                for x in args {
                    r *= &x.evaluate(values)?;
                }
                Ok(r)
            }
            Atom::Add(args) => {
                let mut r = Integer::new(0);
                for x in args {
                    r += &x.evaluate(values)?;
                }
                Ok(r)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use ahash::HashMap;

    use crate::domains::integer::Integer;
    use crate::state::State;

    use super::{Atom, EvaluateError};

    #[test]
    fn identities() {
        assert_eq!(Atom::add(vec![]), Atom::new_num(0));
        assert_eq!(Atom::mul(vec![]), Atom::new_num(1));

        let x = Atom::new_var(State::get_symbol("a1"));
        assert_eq!(Atom::add(vec![x.clone(), Atom::new_num(0)]), x);
        assert_eq!(Atom::mul(vec![x.clone(), Atom::new_num(1)]), x);
        assert_eq!(
            Atom::mul(vec![x.clone(), Atom::new_num(0)]),
            Atom::new_num(0)
        );
    }

    #[test]
    fn numeric_folding() {
        assert_eq!(
            Atom::add(vec![Atom::new_num(2), Atom::new_num(-2)]),
            Atom::new_num(0)
        );
        assert_eq!(
            Atom::mul(vec![Atom::new_num(2), Atom::new_num(3), Atom::new_num(-1)]),
            Atom::new_num(-6)
        );
        assert_eq!(Atom::new_num(2).npow(10), Atom::new_num(1024));
    }

    #[test]
    fn power_normalization() {
        let x = Atom::new_var(State::get_symbol("a2"));
        assert_eq!(x.npow(0), Atom::new_num(1));
        assert_eq!(x.npow(1), x);
        assert!(matches!(x.npow(3), Atom::Pow(_)));
    }

    #[test]
    fn evaluate() {
        let x = State::get_symbol("a3");
        let y = State::get_symbol("a4");

        // 2*x*y^3 + 5
        let e = Atom::add(vec![
            Atom::mul(vec![
                Atom::new_num(2),
                Atom::new_var(x),
                Atom::new_var(y).npow(3),
            ]),
            Atom::new_num(5),
        ]);

        let mut values = HashMap::default();
        values.insert(x, Integer::new(7));
        values.insert(y, Integer::new(-2));
        assert_eq!(e.evaluate(&values), Ok(Integer::new(-107)));

        values.remove(&y);
        assert_eq!(e.evaluate(&values), Err(EvaluateError::MissingVariable(y)));
    }
}
