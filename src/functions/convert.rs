//! Value-preserving transitions between groups.

use super::arithmetic::power_rational;
use super::keys::{additive_key, multiplicative_key, power_key};
use crate::AlgebraError;
use crate::rational::Rational;
use crate::syntax::{Group, Node, Symbol};
use num_integer::Integer;
use num_traits::One;
use std::collections::BTreeMap;

/// Converts `symbol` into the shape of `target` without changing its value.
///
/// Composite targets wrap the symbol as the sole child of a fresh container;
/// for a product the multiplier moves onto the container. The result may be
/// a single-child container, which is only meaningful as an intermediate
/// state inside a combinator. A closed sum is a single term, so it is
/// wrapped even when it already has the target group.
pub fn convert(symbol: Symbol, target: Group) -> Symbol {
  let closed_sum = matches!(target, Group::AdditivePoly | Group::Additive)
    && !(symbol.is_open_sum() && symbol.multiplier.is_one());
  if symbol.group() == target && !closed_sum {
    return symbol;
  }
  match target {
    Group::Number => Symbol::from_node(Node::Number)
      .with_multiplier(symbol.multiplier),
    Group::GeneralizedPower => to_generalized_power(symbol),
    Group::AdditivePoly => {
      let base = additive_key(&symbol);
      let mut terms = BTreeMap::new();
      terms.insert(power_key(&symbol), symbol);
      Symbol::from_node(Node::AdditivePoly {
        base,
        terms,
        power: Rational::one(),
      })
    }
    Group::Additive => {
      let mut terms = BTreeMap::new();
      terms.insert(additive_key(&symbol), symbol);
      Symbol::from_node(Node::Additive {
        terms,
        power: Rational::one(),
      })
    }
    Group::Multiplicative => {
      let multiplier = symbol.multiplier.clone();
      let child = symbol.with_multiplier(Rational::one());
      let mut factors = BTreeMap::new();
      factors.insert(multiplicative_key(&child), child);
      Symbol::from_node(Node::Multiplicative { factors })
        .with_multiplier(multiplier)
    }
    Group::Variable | Group::Function => {
      debug_assert!(false, "no transition into {target}");
      symbol
    }
  }
}

/// `b^p` becomes `GeneralizedPower(b, p)` with `p` held as a number symbol.
/// A number base keeps its value as the base; the rational 1 is left as is.
fn to_generalized_power(symbol: Symbol) -> Symbol {
  if symbol.is_one() {
    return symbol;
  }
  if symbol.is_number() {
    return Symbol::from_node(Node::GeneralizedPower {
      base: Box::new(symbol),
      exponent: Box::new(Symbol::one()),
    });
  }
  let multiplier = symbol.multiplier.clone();
  let (base, power) = symbol.with_multiplier(Rational::one()).split_power();
  Symbol::from_node(Node::GeneralizedPower {
    base: Box::new(base),
    exponent: Box::new(crate::syntax::make_number(power)),
  })
  .with_multiplier(multiplier)
}

/// Restores a generalized power whose exponent reduced to a number back to
/// its previous group.
pub fn demote(symbol: Symbol) -> Result<Symbol, AlgebraError> {
  let Symbol { multiplier, node } = symbol;
  match node {
    Node::GeneralizedPower { base, exponent } if exponent.is_number() => {
      let restored = power_rational(*base, &exponent.multiplier)?;
      Ok(super::arithmetic::scale(restored, &multiplier))
    }
    node => Ok(Symbol { multiplier, node }),
  }
}

/// Pushes the multiplier of an open sum down into its terms. Other symbols
/// are returned unchanged.
pub fn distribute_multiplier(symbol: Symbol) -> Symbol {
  if !symbol.is_open_sum() || symbol.multiplier.is_one() {
    return symbol;
  }
  let Symbol { multiplier, node } = symbol;
  let node = match node {
    Node::Additive { terms, power } => Node::Additive {
      terms: scale_terms(terms, &multiplier),
      power,
    },
    Node::AdditivePoly { base, terms, power } => Node::AdditivePoly {
      base,
      terms: scale_terms(terms, &multiplier),
      power,
    },
    _ => unreachable!("open sums are additive containers"),
  };
  Symbol::from_node(node)
}

fn scale_terms(
  terms: BTreeMap<String, Symbol>,
  multiplier: &Rational,
) -> BTreeMap<String, Symbol> {
  terms
    .into_iter()
    .map(|(key, term)| {
      let scaled = &term.multiplier * multiplier;
      (key, distribute_multiplier(term.with_multiplier(scaled)))
    })
    .collect()
}

/// Splits a symbol into its rational content and a remainder with
/// multiplier 1.
///
/// For an open sum the content is the gcd of the term coefficients over the
/// lcm of their denominators, signed so that the leading term of the
/// remainder is positive. This makes `2+2*x` and `1+x` share one base.
pub fn primitive_part(symbol: Symbol) -> (Rational, Symbol) {
  if symbol.is_number() {
    return (symbol.multiplier, Symbol::one());
  }
  if !symbol.is_open_sum() {
    let multiplier = symbol.multiplier.clone();
    return (multiplier, symbol.with_multiplier(Rational::one()));
  }
  let symbol = distribute_multiplier(symbol);
  let terms = symbol.sum_terms();
  let mut numer = num_bigint::BigInt::from(0);
  let mut denom = num_bigint::BigInt::one();
  for term in &terms {
    numer = numer.gcd(term.multiplier.numer());
    denom = denom.lcm(term.multiplier.denom());
  }
  let mut content = Rational::from_bigints(numer, denom);
  if terms.first().is_some_and(|t| t.multiplier.is_negative()) {
    content = -content;
  }
  if content.is_one() {
    return (content, symbol);
  }
  let Some(inverse) = content.invert() else {
    unreachable!("open sums hold no zero terms")
  };
  let scaled = symbol.with_multiplier(inverse);
  (content, distribute_multiplier(scaled))
}
