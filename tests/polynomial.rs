use ahash::HashMap;

use multipoly::atom::{Atom, EvaluateError};
use multipoly::domains::integer::{Integer, Z};
use multipoly::poly::polynomial::MultivariatePolynomial;
use multipoly::poly::reconcile;
use multipoly::poly::univariate::UnivariatePolynomial;
use multipoly::state::State;

#[test]
fn reconcile_and_remap() {
    let w = State::get_symbol("i_w");
    let x = State::get_symbol("i_x");
    let y = State::get_symbol("i_y");
    let z = State::get_symbol("i_z");

    let r = reconcile(&[w, y], &[x, y, z]);
    assert_eq!(r.variables, vec![w, x, y, z]);
    assert_eq!(r.left, vec![0, 2]);
    assert_eq!(r.right, vec![1, 2, 3]);
    assert_eq!(r.len(), 4);

    // the translation vectors drive the polynomial remap
    let mut p1: MultivariatePolynomial<_, u16> = MultivariatePolynomial::from_terms(
        &Z,
        &[w, y],
        [(vec![3, 1], 2.into()), (vec![0, 2], 1.into())],
    );
    let mut p2 = MultivariatePolynomial::from_terms(
        &Z,
        &[x, y, z],
        [(vec![1, 1, 1], 4.into())],
    );

    let mut values = HashMap::default();
    values.insert(w, Integer::new(2));
    values.insert(x, Integer::new(3));
    values.insert(y, Integer::new(5));
    values.insert(z, Integer::new(7));

    let before = (
        p1.evaluate(&values).unwrap(),
        p2.evaluate(&values).unwrap(),
    );

    p1.unify_variables(&mut p2);
    assert_eq!(p1.get_vars_ref(), r.variables.as_slice());
    assert_eq!(p2.get_vars_ref(), r.variables.as_slice());
    assert_eq!(p1.evaluate(&values).unwrap(), before.0);
    assert_eq!(p2.evaluate(&values).unwrap(), before.1);
}

#[test]
fn univariate_conversion_round_trip() {
    let t = State::get_symbol("i_t");

    // 9 - 2*t^2 + t^5
    let u = UnivariatePolynomial::from_coefficients(
        &Z,
        t,
        vec![
            9.into(),
            0.into(),
            (-2).into(),
            0.into(),
            0.into(),
            1.into(),
        ],
    );
    let p = MultivariatePolynomial::<_, u16>::from_univariate(&u);

    for v in [-3i64, -1, 0, 2, 10] {
        let mut values = HashMap::default();
        values.insert(t, Integer::new(v));
        assert_eq!(p.evaluate(&values).unwrap(), u.evaluate(&Integer::new(v)));
    }
}

#[test]
fn expression_round_trip() {
    let x = State::get_symbol("i_x");
    let y = State::get_symbol("i_y");

    // 3*x + 5*y^2
    let p: MultivariatePolynomial<_, u16> = MultivariatePolynomial::from_terms(
        &Z,
        &[x, y],
        [(vec![1, 0], 3.into()), (vec![0, 2], 5.into())],
    );

    let e = p.to_expression();

    let mut values = HashMap::default();
    values.insert(x, Integer::new(2));
    values.insert(y, Integer::new(3));
    assert_eq!(p.evaluate(&values), Ok(Integer::new(51)));
    assert_eq!(e.evaluate(&values), Ok(Integer::new(51)));

    // the zero polynomial denotes the additive identity
    assert_eq!(p.zero().to_expression(), Atom::new_num(0));
}

#[test]
fn missing_variable_is_an_error() {
    let x = State::get_symbol("i_x");
    let z = State::get_symbol("i_z");

    let p: MultivariatePolynomial<_, u16> = MultivariatePolynomial::from_terms(
        &Z,
        &[x, z],
        [(vec![1, 1], 1.into())],
    );

    let mut values = HashMap::default();
    values.insert(x, Integer::new(5));
    assert_eq!(p.evaluate(&values), Err(EvaluateError::MissingVariable(z)));
}

#[test]
fn large_coefficients_stay_exact() {
    let x = State::get_symbol("i_x");

    // x^40 evaluated at 10 is exactly 10^40
    let p: MultivariatePolynomial<_, u16> =
        MultivariatePolynomial::from_terms(&Z, &[x], [(vec![40], 1.into())]);

    let mut values = HashMap::default();
    values.insert(x, Integer::new(10));

    let expected = Integer::new(10).pow(40);
    assert_eq!(p.evaluate(&values), Ok(expected));
}
