use std::cmp::Ordering;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;

use ahash::{HashMap, RandomState};
use smallvec::{smallvec, SmallVec};

use crate::atom::{Atom, EvaluateError};
use crate::domains::{Ring, ToExpression};
use crate::state::Symbol;

use super::univariate::UnivariatePolynomial;
use super::{reconcile, Exponent, INLINED_EXPONENTS};

/// Multivariate polynomial with a sparse degree and variable dense representation.
///
/// The variable list is the coordinate basis for every exponent vector and is
/// always canonically sorted and duplicate-free. A polynomial is a value:
/// once constructed it is never mutated, and operations produce new values.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MultivariatePolynomial<F: Ring, E: Exponent = u16> {
    // Data format: the i-th monomial is stored as coefficients[i] and
    // exponents[i * nvars .. (i + 1) * nvars]. Terms are always expanded,
    // sorted lexicographically by the exponents and have nonzero coefficients.
    pub coefficients: Vec<F::Element>,
    pub exponents: Vec<E>,
    pub field: F,
    pub variables: Arc<Vec<Symbol>>,
}

impl<F: Ring, E: Exponent> MultivariatePolynomial<F, E> {
    /// Constructs a zero polynomial over a canonically sorted, duplicate-free
    /// variable list. Instead of using this constructor, prefer to create new
    /// polynomials from existing ones, so that the variable map and field are
    /// inherited.
    #[inline]
    pub fn new(field: &F, variables: Arc<Vec<Symbol>>) -> Self {
        debug_assert!(variables.windows(2).all(|w| w[0] < w[1]));

        Self {
            coefficients: vec![],
            exponents: vec![],
            field: field.clone(),
            variables,
        }
    }

    /// Constructs a polynomial from a term dictionary: pairs of an exponent
    /// vector over `variables` and a coefficient.
    ///
    /// The variable list may be given in any order; it is sorted into the
    /// canonical order and every exponent vector is permuted to match, so
    /// that structurally equal polynomials compare and hash equal however
    /// they were assembled. Terms with a zero coefficient are dropped and
    /// terms with equal exponent vectors are merged by addition.
    ///
    /// Panics when the variable list contains duplicates or when an exponent
    /// vector's length differs from the variable count.
    pub fn from_terms<I>(field: &F, variables: &[Symbol], terms: I) -> Self
    where
        I: IntoIterator<Item = (Vec<E>, F::Element)>,
    {
        let mut order: Vec<usize> = (0..variables.len()).collect();
        order.sort_by_key(|&i| variables[i]);

        let sorted: Vec<Symbol> = order.iter().map(|&i| variables[i]).collect();
        for w in sorted.windows(2) {
            if w[0] == w[1] {
                panic!("duplicate variable {} in variable list", w[0]);
            }
        }

        // map[i] is the sorted position of the i-th input variable
        let mut map = vec![0; variables.len()];
        for (new, &old) in order.iter().enumerate() {
            map[old] = new;
        }

        let mut poly = Self::new(field, Arc::new(sorted));
        let mut row: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); variables.len()];
        for (exponents, coefficient) in terms {
            if exponents.len() != variables.len() {
                panic!(
                    "exponent vector length mismatched: got {}, expected {}",
                    exponents.len(),
                    variables.len()
                );
            }

            for (i, e) in exponents.iter().enumerate() {
                row[map[i]] = *e;
            }
            poly.append_monomial(coefficient, &row);
        }
        poly
    }

    /// Constructs a zero polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a constant polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable map from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<E>) -> Self {
        debug_assert_eq!(self.nvars(), exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.field.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| x.is_zero())
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    /// Returns the slice for the exponents of the last monomial.
    #[inline]
    pub fn last_exponents(&self) -> &[E] {
        &self.exponents[(self.nterms() - 1) * self.nvars()..self.nterms() * self.nvars()]
    }

    /// Get a copy of the variable list.
    pub fn get_vars(&self) -> Arc<Vec<Symbol>> {
        self.variables.clone()
    }

    /// Get a reference to the variables list.
    pub fn get_vars_ref(&self) -> &[Symbol] {
        self.variables.as_ref()
    }

    /// Append a monomial to the back. It merges with the last monomial if the
    /// exponents are equal; the caller guarantees the exponents are not
    /// smaller than those of the last monomial.
    pub fn append_monomial_back(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }
        debug_assert_eq!(self.nvars(), exponents.len());

        let nterms = self.nterms();
        if nterms > 0 && exponents == self.last_exponents() {
            self.field
                .add_assign(&mut self.coefficients[nterms - 1], &coefficient);

            if F::is_zero(&self.coefficients[nterms - 1]) {
                self.coefficients.pop();
                self.exponents.truncate((nterms - 1) * self.nvars());
            }
        } else {
            debug_assert!(nterms == 0 || self.last_exponents() < exponents);
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
        }
    }

    /// Appends a monomial to the polynomial, keeping the terms sorted. A
    /// monomial with the same exponents is merged by addition and removed
    /// when the coefficients cancel.
    pub fn append_monomial(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // binary search for the insertion point
        let mut l = 0;
        let mut r = self.nterms();
        while l < r {
            let m = (l + r) / 2;
            match exponents.cmp(self.exponents(m)) {
                Ordering::Equal => {
                    self.field
                        .add_assign(&mut self.coefficients[m], &coefficient);
                    if F::is_zero(&self.coefficients[m]) {
                        // the coefficient cancelled; remove the monomial
                        self.coefficients.remove(m);
                        let i = m * self.nvars();
                        self.exponents.drain(i..i + self.nvars());
                    }
                    return;
                }
                Ordering::Greater => l = m + 1,
                Ordering::Less => r = m,
            }
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Unify the variable maps of two polynomials, i.e. rewrite a polynomial
    /// in `x` and one in `y` to two polynomials in `x` and `y`.
    ///
    /// Both polynomials end up over the canonically sorted union of their
    /// variable lists, produced by [reconcile].
    pub fn unify_variables(&mut self, other: &mut Self) {
        if self.variables == other.variables {
            return;
        }

        let merged = reconcile(&self.variables, &other.variables);
        let variables = Arc::new(merged.variables);
        self.apply_variable_map(variables.clone(), &merged.left);
        other.apply_variable_map(variables, &merged.right);
    }

    /// Scatter every exponent row through the translation vector `map`.
    /// The translation vector is strictly increasing and the columns it does
    /// not cover are zero in every term, so the term order is unchanged.
    fn apply_variable_map(&mut self, variables: Arc<Vec<Symbol>>, map: &[usize]) {
        debug_assert_eq!(map.len(), self.nvars());

        let nvars = variables.len();
        let mut exponents = vec![E::zero(); nvars * self.nterms()];
        for t in 0..self.nterms() {
            for (i, e) in self.exponents(t).iter().enumerate() {
                exponents[t * nvars + map[i]] = *e;
            }
        }

        self.exponents = exponents;
        self.variables = variables;
    }

    /// Convert a single-variable polynomial, wrapping each exponent into a
    /// one-entry exponent vector. An empty input yields the zero polynomial.
    pub fn from_univariate(poly: &UnivariatePolynomial<F>) -> MultivariatePolynomial<F, E> {
        let mut res = MultivariatePolynomial::new(&poly.field, Arc::new(vec![poly.variable]));
        for (e, coefficient) in poly.coefficients.iter().enumerate() {
            res.append_monomial_back(coefficient.clone(), &[E::from_u32(e as u32)]);
        }
        res
    }

    /// Convert the polynomial to a general expression: the sum over every
    /// term of its coefficient times the product of the variables raised to
    /// their exponents.
    ///
    /// A factor with exponent zero is omitted entirely and the zero
    /// polynomial yields the number zero.
    pub fn to_expression(&self) -> Atom
    where
        F: ToExpression,
    {
        let mut terms = Vec::with_capacity(self.nterms());
        for t in self {
            let mut factors = Vec::with_capacity(self.nvars() + 1);
            factors.push(self.field.to_expression(t.coefficient));

            for (v, e) in self.variables.iter().zip(t.exponents) {
                if !e.is_zero() {
                    factors.push(Atom::new_var(*v).npow(e.to_u32()));
                }
            }

            terms.push(Atom::mul(factors));
        }

        Atom::add(terms)
    }

    /// Evaluate the polynomial exactly by substituting a value for every
    /// variable in the variable list.
    ///
    /// Fails when `values` lacks an entry for any listed variable, even one
    /// that only occurs with exponent zero; a missing variable is never
    /// silently defaulted.
    pub fn evaluate(
        &self,
        values: &HashMap<Symbol, F::Element>,
    ) -> Result<F::Element, EvaluateError> {
        let vals: SmallVec<[&F::Element; INLINED_EXPONENTS]> = self
            .variables
            .iter()
            .map(|v| values.get(v).ok_or(EvaluateError::MissingVariable(*v)))
            .collect::<Result<_, _>>()?;

        let mut res = self.field.zero();
        for t in self {
            let mut term = t.coefficient.clone();
            for (&v, e) in vals.iter().zip(t.exponents) {
                if !e.is_zero() {
                    self.field
                        .mul_assign(&mut term, &self.field.pow(v, e.to_u32() as u64));
                }
            }
            self.field.add_assign(&mut res, &term);
        }
        Ok(res)
    }
}

impl<F: Ring, E: Exponent> Hash for MultivariatePolynomial<F, E> {
    /// A structural hash that is independent of the term iteration order:
    /// the coefficient ring is hashed as a type discriminant, the variables
    /// in list order, and then one local hash per term, folded symmetrically.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.variables.len().hash(state);
        for v in self.variables.iter() {
            v.hash(state);
        }

        // the per-term hashes are built with a fixed-key hasher and folded
        // with xor, so the container order can never leak into the result
        let build = RandomState::with_seeds(0, 0, 0, 0);
        let mut terms = 0u64;
        for t in self {
            let mut h = build.build_hasher();
            t.exponents.hash(&mut h);
            t.coefficient.hash(&mut h);
            terms ^= h.finish();
        }
        state.write_u64(terms);
    }
}

/// View of one monomial.
#[derive(Clone, Copy, Debug)]
pub struct MonomialView<'a, F: Ring, E: Exponent> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [E],
}

/// Iterator over the monomials of a polynomial.
pub struct MonomialViewIterator<'a, F: Ring, E: Exponent> {
    poly: &'a MultivariatePolynomial<F, E>,
    index: usize,
}

impl<'a, F: Ring, E: Exponent> Iterator for MonomialViewIterator<'a, F, E> {
    type Item = MonomialView<'a, F, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.poly.nterms() - self.index;
        (rest, Some(rest))
    }
}

impl<'a, F: Ring, E: Exponent> IntoIterator for &'a MultivariatePolynomial<F, E> {
    type Item = MonomialView<'a, F, E>;
    type IntoIter = MonomialViewIterator<'a, F, E>;

    fn into_iter(self) -> Self::IntoIter {
        MonomialViewIterator {
            poly: self,
            index: 0,
        }
    }
}
