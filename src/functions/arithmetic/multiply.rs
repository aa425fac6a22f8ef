use super::{add, make_generalized_power, power_rational, scale, unwrap_parens};
use crate::AlgebraError;
use crate::functions::convert::{convert, primitive_part};
use crate::functions::keys::multiplicative_key;
use crate::functions::numeric::minus_one_power;
use crate::rational::Rational;
use crate::syntax::{Group, IMAGINARY_UNIT, Node, Symbol, make_number};
use log::trace;
use std::collections::BTreeMap;

/// `a * b` in canonical form.
///
/// Numbers fold into the other operand's multiplier. Otherwise both sides
/// are reduced to their primitive parts and their factors are merged by
/// base, adding exponents when bases coincide.
pub fn multiply(a: Symbol, b: Symbol) -> Result<Symbol, AlgebraError> {
  let a = unwrap_parens(a)?;
  let b = unwrap_parens(b)?;
  if a.is_zero() || b.is_zero() {
    return Ok(Symbol::zero());
  }
  let (a, b) = if a.group() > b.group() { (b, a) } else { (a, b) };
  trace!("multiply {a} * {b}");

  if a.is_number() {
    return Ok(scale(b, &a.multiplier));
  }
  let (content_a, a) = primitive_part(a);
  let (content_b, b) = primitive_part(b);
  let mut coefficient = content_a * content_b;
  let Node::Multiplicative { mut factors } =
    convert(b, Group::Multiplicative).node
  else {
    unreachable!("convert yields a product")
  };
  absorb_factor(&mut factors, &mut coefficient, a)?;
  Ok(collapse_product(factors, coefficient))
}

fn absorb_factor(
  factors: &mut BTreeMap<String, Symbol>,
  coefficient: &mut Rational,
  factor: Symbol,
) -> Result<(), AlgebraError> {
  if factor.is_number() {
    *coefficient = &*coefficient * &factor.multiplier;
    return Ok(());
  }
  let (content, factor) = primitive_part(factor);
  *coefficient = &*coefficient * &content;
  match factor.node {
    Node::Multiplicative { factors: inner } => {
      for child in inner.into_values() {
        absorb_factor(factors, coefficient, child)?;
      }
      Ok(())
    }
    node => {
      let factor = Symbol::from_node(node);
      let key = multiplicative_key(&factor);
      match factors.remove(&key) {
        Some(existing) => {
          let merged = merge_powers(existing, factor)?;
          absorb_factor(factors, coefficient, merged)
        }
        None => {
          factors.insert(key, factor);
          Ok(())
        }
      }
    }
  }
}

/// Product of two factors with the same base: `b^p * b^q = b^(p+q)`.
fn merge_powers(a: Symbol, b: Symbol) -> Result<Symbol, AlgebraError> {
  if let (Some(p), Some(q)) =
    (minus_one_exponent(&a), minus_one_exponent(&b))
  {
    return Ok(minus_one_power(&(p + q)));
  }
  let summed = a
    .rational_power()
    .zip(b.rational_power())
    .map(|(p, q)| p + q);
  if let Some(exponent) = summed {
    let (base, _) = a.split_power();
    return power_rational(base, &exponent);
  }
  let (base, p) = split_exponent(a);
  let (_, q) = split_exponent(b);
  make_generalized_power(base, add(p, q)?)
}

/// Rational exponent of `symbol` as a power of `-1`, reading `i` as
/// `(-1)^(1/2)`.
fn minus_one_exponent(symbol: &Symbol) -> Option<Rational> {
  match &symbol.node {
    Node::Variable { name, .. } if name == IMAGINARY_UNIT => {
      Some(Rational::new(1, 2))
    }
    Node::GeneralizedPower { base, exponent }
      if base.is_number()
        && base.multiplier == Rational::from_integer(-1)
        && exponent.is_number() =>
    {
      Some(exponent.multiplier.clone())
    }
    _ => None,
  }
}

fn split_exponent(symbol: Symbol) -> (Symbol, Symbol) {
  match symbol.node {
    Node::GeneralizedPower { base, exponent } => (*base, *exponent),
    node => {
      let (base, power) = Symbol::from_node(node).split_power();
      (base, make_number(power))
    }
  }
}

/// Builds a product from keyed factors and a coefficient, collapsing empty
/// and single-factor products.
pub(crate) fn collapse_product(
  factors: BTreeMap<String, Symbol>,
  coefficient: Rational,
) -> Symbol {
  if coefficient.is_zero() {
    return Symbol::zero();
  }
  if factors.len() > 1 {
    return Symbol::from_node(Node::Multiplicative { factors })
      .with_multiplier(coefficient);
  }
  match factors.into_values().next() {
    Some(only) => scale(only, &coefficient),
    None => make_number(coefficient),
  }
}
