use super::unwrap_parens;
use crate::AlgebraError;
use crate::functions::convert::convert;
use crate::functions::keys::{additive_key, power_key};
use crate::syntax::{
  Group, Node, Symbol, collapse_poly, collapse_sum, make_number,
};
use log::trace;
use std::collections::BTreeMap;

/// `a + b` in canonical form.
///
/// The higher-group operand becomes the container. Like terms (equal
/// structure) merge their multipliers; terms sharing a base but not a power
/// are grouped under an additive-poly child.
pub fn add(a: Symbol, b: Symbol) -> Result<Symbol, AlgebraError> {
  let a = unwrap_parens(a)?;
  let b = unwrap_parens(b)?;
  if a.is_zero() {
    return Ok(b);
  }
  if b.is_zero() {
    return Ok(a);
  }
  let (a, b) = if a.group() < b.group() { (b, a) } else { (a, b) };
  trace!("add {a} + {b}");

  if a.is_number() {
    return Ok(make_number(a.multiplier + b.multiplier));
  }
  if a.node == b.node && !a.is_open_sum() {
    let multiplier = &a.multiplier + &b.multiplier;
    if multiplier.is_zero() {
      return Ok(Symbol::zero());
    }
    return Ok(a.with_multiplier(multiplier));
  }
  if a.is_open_additive() {
    return absorb_into_sum(a, b);
  }
  if b.is_open_additive() {
    return absorb_into_sum(b, a);
  }
  if a.is_open_poly() {
    return absorb_into_poly(a, b);
  }
  if b.is_open_poly() {
    return absorb_into_poly(b, a);
  }
  if additive_key(&a) == additive_key(&b) {
    return absorb_into_poly(convert(a, Group::AdditivePoly), b);
  }
  absorb_into_sum(convert(a, Group::Additive), b)
}

fn absorb_into_sum(sum: Symbol, term: Symbol) -> Result<Symbol, AlgebraError> {
  let Node::Additive { mut terms, .. } = sum.node else {
    unreachable!("expected an open additive container")
  };
  insert_term(&mut terms, term)?;
  Ok(collapse_sum(terms))
}

fn absorb_into_poly(
  poly: Symbol,
  term: Symbol,
) -> Result<Symbol, AlgebraError> {
  if additive_key(&poly) != additive_key(&term) {
    return absorb_into_sum(convert(poly, Group::Additive), term);
  }
  let Node::AdditivePoly { base, mut terms, .. } = poly.node else {
    unreachable!("expected an open additive-poly container")
  };
  insert_power_term(&mut terms, term)?;
  Ok(collapse_poly(base, terms))
}

/// Inserts `term` under its additive key, merging with any term already in
/// that slot. Open sums are flattened into their terms.
fn insert_term(
  terms: &mut BTreeMap<String, Symbol>,
  term: Symbol,
) -> Result<(), AlgebraError> {
  if term.is_zero() {
    return Ok(());
  }
  if term.is_open_additive() {
    let Node::Additive { terms: inner, .. } = term.node else {
      unreachable!()
    };
    for child in inner.into_values() {
      insert_term(terms, child)?;
    }
    return Ok(());
  }
  let key = additive_key(&term);
  match terms.remove(&key) {
    Some(existing) => insert_term(terms, add(existing, term)?),
    None => {
      terms.insert(key, term);
      Ok(())
    }
  }
}

fn insert_power_term(
  terms: &mut BTreeMap<String, Symbol>,
  term: Symbol,
) -> Result<(), AlgebraError> {
  if term.is_open_poly() {
    let Node::AdditivePoly { terms: inner, .. } = term.node else {
      unreachable!()
    };
    for child in inner.into_values() {
      insert_power_term(terms, child)?;
    }
    return Ok(());
  }
  let key = power_key(&term);
  let merged = match terms.remove(&key) {
    Some(existing) => add(existing, term)?,
    None => term,
  };
  if !merged.is_zero() {
    terms.insert(key, merged);
  }
  Ok(())
}
