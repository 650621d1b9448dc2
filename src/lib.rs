//! A sparse multivariate polynomial core for symbolic computation.
//!
//! Polynomials are immutable values over an ordered list of interned
//! variables, with exact coefficients drawn from a generic
//! [Ring](domains::Ring): arbitrary-precision integers
//! ([IntegerRing](domains::integer::IntegerRing)) or general symbolic
//! expressions ([AtomField](domains::atom::AtomField)). Two polynomials built
//! independently may reference different variable lists; the
//! [reconciliation engine](poly::reconcile) merges such lists into a common
//! ordered basis and supplies the translation vectors needed to remap
//! exponent vectors into it.
//!
//! For example:
//!
//! ```
//! use multipoly::domains::integer::Z;
//! use multipoly::poly::polynomial::MultivariatePolynomial;
//! use multipoly::state::State;
//!
//! let x = State::get_symbol("x");
//! let y = State::get_symbol("y");
//!
//! // 3*x + 5*y^2
//! let poly: MultivariatePolynomial<_, u16> = MultivariatePolynomial::from_terms(
//!     &Z,
//!     &[x, y],
//!     [(vec![1, 0], 3.into()), (vec![0, 2], 5.into())],
//! );
//!
//! let mut values = ahash::HashMap::default();
//! values.insert(x, 2.into());
//! values.insert(y, 3.into());
//! assert_eq!(poly.evaluate(&values).unwrap(), 51.into());
//! ```

pub mod atom;
pub mod domains;
pub mod poly;
pub mod state;
