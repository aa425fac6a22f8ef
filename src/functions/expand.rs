//! Multiplying out products of sums and integer powers of sums.

use super::arithmetic::{add, multiply, power, power_rational, scale};
use super::elementary::apply_function;
use crate::AlgebraError;
use crate::settings::Settings;
use crate::syntax::{Node, Symbol};
use log::trace;

/// Expands with the default [`Settings`].
pub fn expand(symbol: Symbol) -> Result<Symbol, AlgebraError> {
  expand_with(symbol, &Settings::default())
}

/// Distributes every product over the sums it contains and expands sums
/// raised to positive integer powers no larger than
/// `settings.max_expansion_power`. Function arguments and both sides of
/// generalized powers are expanded too.
pub fn expand_with(
  symbol: Symbol,
  settings: &Settings,
) -> Result<Symbol, AlgebraError> {
  let Symbol { multiplier, node } = symbol;
  let expanded = match node {
    Node::Number | Node::Variable { .. } => {
      return Ok(Symbol { multiplier, node });
    }
    Node::Function { name, args, power } => {
      let args = args
        .into_iter()
        .map(|arg| expand_with(arg, settings))
        .collect::<Result<Vec<_>, _>>()?;
      power_rational(apply_function(&name, args)?, &power)?
    }
    Node::GeneralizedPower { base, exponent } => power(
      expand_with(*base, settings)?,
      expand_with(*exponent, settings)?,
    )?,
    Node::Multiplicative { factors } => {
      let mut product = Symbol::one();
      for factor in factors.into_values() {
        let factor = expand_with(factor, settings)?;
        product = expand_product(product, factor, settings)?;
      }
      product
    }
    node @ (Node::Additive { .. } | Node::AdditivePoly { .. }) => {
      let (open, exponent) = Symbol::from_node(node).split_power();
      let mut sum = Symbol::zero();
      for term in open.sum_terms() {
        sum = add(sum, expand_with(term.clone(), settings)?)?;
      }
      let repeat = exponent
        .to_i64()
        .filter(|&n| n > 1 && n <= i64::from(settings.max_expansion_power));
      match repeat {
        Some(n) => {
          trace!("expanding ({sum})^{n}");
          let mut result = sum.clone();
          for _ in 1..n {
            result = expand_product(result, sum.clone(), settings)?;
          }
          result
        }
        None => power_rational(sum, &exponent)?,
      }
    }
  };
  Ok(scale(expanded, &multiplier))
}

fn expand_product(
  a: Symbol,
  b: Symbol,
  settings: &Settings,
) -> Result<Symbol, AlgebraError> {
  if a.is_open_sum() {
    let mut sum = Symbol::zero();
    for term in a.sum_terms() {
      sum = add(sum, expand_product(term.clone(), b.clone(), settings)?)?;
    }
    return Ok(sum);
  }
  if b.is_open_sum() {
    return expand_product(b, a, settings);
  }
  let product = multiply(a, b)?;
  if has_expandable_factor(&product, settings) {
    return expand_with(product, settings);
  }
  Ok(product)
}

/// A product that, after merging, holds a sum at a power `expand` would
/// multiply out.
fn has_expandable_factor(symbol: &Symbol, settings: &Settings) -> bool {
  let Node::Multiplicative { factors } = &symbol.node else {
    return false;
  };
  factors.values().any(|factor| match &factor.node {
    Node::Additive { power, .. } | Node::AdditivePoly { power, .. } => {
      let limit = i64::from(settings.max_expansion_power);
      power.to_i64().is_some_and(|n| n >= 1 && n <= limit)
    }
    _ => false,
  })
}
