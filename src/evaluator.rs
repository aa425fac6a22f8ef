use crate::functions::{
  add, apply_function, divide, multiply, negate, power, subtract,
};
use crate::rational::Rational;
use crate::settings::Settings;
use crate::syntax::{PARENS, Symbol, make_number, make_variable};
use crate::{AlgebraError, Rule};
use pest::iterators::Pair;
use std::collections::HashMap;

/// User bindings consulted before an identifier becomes a variable. Owned by
/// the caller and passed in explicitly.
pub type SymbolTable = HashMap<String, Symbol>;

/// Folds a parse tree into a canonical symbol, applying exactly one
/// combinator per operator.
pub struct Reducer<'a> {
  table: &'a SymbolTable,
  settings: &'a Settings,
}

impl<'a> Reducer<'a> {
  pub fn new(table: &'a SymbolTable, settings: &'a Settings) -> Self {
    Reducer { table, settings }
  }

  /// `depth` counts nested parentheses, call arguments and exponents.
  pub fn reduce(
    &self,
    pair: Pair<'_, Rule>,
    depth: usize,
  ) -> Result<Symbol, AlgebraError> {
    if depth > self.settings.max_depth {
      return Err(AlgebraError::TooDeep(self.settings.max_depth));
    }
    match pair.as_rule() {
      Rule::Program => {
        let expression = pair
          .into_inner()
          .find(|p| p.as_rule() == Rule::Expression)
          .ok_or(AlgebraError::EmptyInput)?;
        self.reduce(expression, depth)
      }
      Rule::Expression | Rule::Term => {
        let mut inner = pair.into_inner();
        let Some(first) = inner.next() else {
          return Err(AlgebraError::EmptyInput);
        };
        let mut acc = self.reduce(first, depth)?;
        while let Some(op) = inner.next() {
          let Some(operand) = inner.next() else {
            unreachable!("grammar pairs every operator with an operand")
          };
          let rhs = self.reduce(operand, depth)?;
          acc = match op.as_str() {
            "+" => add(acc, rhs)?,
            "-" => subtract(acc, rhs)?,
            "*" => multiply(acc, rhs)?,
            "/" => divide(acc, rhs)?,
            other => unreachable!("unknown operator {other}"),
          };
        }
        Ok(acc)
      }
      Rule::Unary | Rule::Exponent => {
        let mut negative = false;
        let mut operand = None;
        for child in pair.into_inner() {
          match child.as_rule() {
            Rule::Sign => negative ^= child.as_str() == "-",
            _ => operand = Some(child),
          }
        }
        let Some(operand) = operand else {
          unreachable!("a signed term always has an operand")
        };
        let value = self.reduce(operand, depth)?;
        if negative { negate(value) } else { Ok(value) }
      }
      Rule::Power => {
        let mut inner = pair.into_inner();
        let Some(base) = inner.next() else {
          unreachable!("a power always has a base")
        };
        let base = self.reduce(base, depth)?;
        match inner.next() {
          Some(exponent) => power(base, self.reduce(exponent, depth + 1)?),
          None => Ok(base),
        }
      }
      Rule::FunctionCall => {
        let mut inner = pair.into_inner();
        let Some(name) = inner.next() else {
          unreachable!("a call always has a name")
        };
        let args = inner
          .map(|arg| self.reduce(arg, depth + 1))
          .collect::<Result<Vec<_>, _>>()?;
        apply_function(name.as_str(), args)
      }
      Rule::Parenthesized => {
        let Some(inner) = pair.into_inner().next() else {
          return Err(AlgebraError::EmptyInput);
        };
        apply_function(PARENS, vec![self.reduce(inner, depth + 1)?])
      }
      Rule::Number => {
        let text = pair.as_str();
        Rational::parse_decimal(text).map(make_number).ok_or_else(|| {
          AlgebraError::NumericOverflow(format!("number literal {text}"))
        })
      }
      Rule::Identifier => match self.table.get(pair.as_str()) {
        Some(bound) => Ok(bound.clone()),
        None => make_variable(pair.as_str()),
      },
      rule => unreachable!("no reduction for {rule:?}"),
    }
  }
}

/// Deepest parenthesis nesting in `input`, checked before parsing so that
/// pathological input never reaches the recursive parser.
pub fn nesting_depth(input: &str) -> usize {
  let mut depth = 0usize;
  let mut deepest = 0;
  for c in input.chars() {
    match c {
      '(' => {
        depth += 1;
        deepest = deepest.max(depth);
      }
      ')' => depth = depth.saturating_sub(1),
      _ => {}
    }
  }
  deepest
}
