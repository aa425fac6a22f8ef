use super::{multiply, negate, unwrap_parens};
use crate::AlgebraError;
use crate::functions::convert::primitive_part;
use crate::functions::numeric::{minus_one_power, numeric_power};
use crate::rational::Rational;
use crate::syntax::{
  IMAGINARY_UNIT, Node, Symbol, make_function, make_integer, make_number,
};
use log::trace;
use num_integer::Integer;

/// `base^exponent` in canonical form.
pub fn power(base: Symbol, exponent: Symbol) -> Result<Symbol, AlgebraError> {
  let base = unwrap_parens(base)?;
  let exponent = unwrap_parens(exponent)?;
  trace!("power ({base})^({exponent})");
  if exponent.is_number() {
    return power_rational(base, &exponent.multiplier);
  }
  symbolic_power(base, exponent)
}

/// Raises each factor of a product, and its coefficient, to `exponent`.
/// Any other symbol is raised as a whole.
pub fn distribute_exponent(
  base: Symbol,
  exponent: Symbol,
) -> Result<Symbol, AlgebraError> {
  let Symbol { multiplier, node } = base;
  let Node::Multiplicative { factors } = node else {
    return power(Symbol { multiplier, node }, exponent);
  };
  let mut result = power(make_number(multiplier), exponent.clone())?;
  for factor in factors.into_values() {
    result = multiply(result, power(factor, exponent.clone())?)?;
  }
  Ok(result)
}

pub(crate) fn power_rational(
  base: Symbol,
  exponent: &Rational,
) -> Result<Symbol, AlgebraError> {
  if exponent.is_one() {
    return Ok(base);
  }
  if exponent.is_zero() {
    if base.is_zero() {
      return Err(AlgebraError::Indeterminate("0^0".to_string()));
    }
    return Ok(Symbol::one());
  }
  if base.is_number() {
    return numeric_power(&base.multiplier, exponent);
  }
  let Symbol { multiplier, node } = base;
  match node {
    Node::Multiplicative { .. } => distribute_exponent(
      Symbol { multiplier, node },
      make_number(exponent.clone()),
    ),
    Node::GeneralizedPower { base, exponent: inner } => {
      let coefficient = numeric_power(&multiplier, exponent)?;
      let combined = multiply(*inner, make_number(exponent.clone()))?;
      multiply(coefficient, make_generalized_power(*base, combined)?)
    }
    node => {
      let (content, body) = primitive_part(Symbol { multiplier, node });
      let coefficient = numeric_power(&content, exponent)?;
      multiply(coefficient, raise_rational(body, exponent)?)
    }
  }
}

/// Multiplies the rational power of `body` (multiplier 1) by `exponent`.
///
/// An even power taken to an even root of odd result loses its sign, so
/// `(x^2)^(1/2)` is `abs(x)`.
fn raise_rational(
  body: Symbol,
  exponent: &Rational,
) -> Result<Symbol, AlgebraError> {
  let (base, current) = body.split_power();
  let combined = &current * exponent;
  let loses_sign = current.numer().is_even()
    && exponent.denom().is_even()
    && combined.numer().is_odd();
  if loses_sign {
    return set_power(make_function("abs", vec![base]), combined);
  }
  set_power(base, combined)
}

fn set_power(
  mut base: Symbol,
  power: Rational,
) -> Result<Symbol, AlgebraError> {
  if power.is_zero() {
    return Ok(Symbol::one());
  }
  match &base.node {
    Node::Variable { name, .. } if name == IMAGINARY_UNIT => {
      return Ok(minus_one_power(&(power / Rational::from_integer(2))));
    }
    Node::Function { name, args, .. }
      if name == "abs"
        && args.len() == 1
        && power.is_integer()
        && power.numer().is_even() =>
    {
      return power_rational(args[0].clone(), &power);
    }
    _ => {}
  }
  base.set_rational_power(power);
  Ok(base)
}

fn symbolic_power(
  base: Symbol,
  exponent: Symbol,
) -> Result<Symbol, AlgebraError> {
  if base.is_zero() || base.is_one() {
    return Ok(base);
  }
  if matches!(base.node, Node::Multiplicative { .. }) {
    return distribute_exponent(base, exponent);
  }
  if base.is_number() {
    return symbolic_number_power(base.multiplier, exponent);
  }
  let (content, base) = primitive_part(base);
  if !content.is_one() {
    let coefficient = symbolic_number_power(content, exponent.clone())?;
    return multiply(coefficient, symbolic_power(base, exponent)?);
  }
  match base.node {
    Node::GeneralizedPower { base, exponent: inner } => {
      make_generalized_power(*base, multiply(*inner, exponent)?)
    }
    Node::Variable { name, .. } if name == IMAGINARY_UNIT => {
      let half = multiply(make_number(Rational::new(1, 2)), exponent)?;
      make_generalized_power(make_integer(-1), half)
    }
    node => {
      let (base, current) = Symbol::from_node(node).split_power();
      let combined = multiply(make_number(current), exponent)?;
      make_generalized_power(base, combined)
    }
  }
}

/// `value^exponent` for a symbolic exponent: the sign becomes a power of
/// `-1` and a fraction splits into numerator and denominator powers.
fn symbolic_number_power(
  value: Rational,
  exponent: Symbol,
) -> Result<Symbol, AlgebraError> {
  if value.is_zero() || value.is_one() {
    return Ok(make_number(value));
  }
  if value.is_negative() {
    let sign = make_generalized_power(make_integer(-1), exponent.clone())?;
    let magnitude = symbolic_number_power(value.abs(), exponent)?;
    return multiply(sign, magnitude);
  }
  if !value.is_integer() {
    let upper = Rational::from_bigint(value.numer().clone());
    let lower = Rational::from_bigint(value.denom().clone());
    let upper = symbolic_number_power(upper, exponent.clone())?;
    let lower = symbolic_number_power(lower, negate(exponent)?)?;
    return multiply(upper, lower);
  }
  make_generalized_power(make_number(value), exponent)
}

/// `base^exponent` with `base` at multiplier 1 and power 1 (or a number).
/// A numeric exponent is applied directly instead.
pub(crate) fn make_generalized_power(
  base: Symbol,
  exponent: Symbol,
) -> Result<Symbol, AlgebraError> {
  if exponent.is_number() {
    return power_rational(base, &exponent.multiplier);
  }
  if base.is_zero() || base.is_one() {
    return Ok(base);
  }
  Ok(Symbol::from_node(Node::GeneralizedPower {
    base: Box::new(base),
    exponent: Box::new(exponent),
  }))
}
