use log::debug;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod compiler;
pub mod evaluator;
pub mod functions;
pub mod rational;
pub mod settings;
pub mod syntax;

pub use compiler::{Compiled, build, numeric_value};
pub use evaluator::SymbolTable;
pub use functions::{
  add, contains, convert, distribute_exponent, distribute_multiplier, divide,
  equals, expand, free_variables, invert, is_constant, is_polynomial,
  multiply, negate, power, subtract,
};
pub use rational::Rational;
pub use settings::Settings;
pub use syntax::{
  Group, Node, Power, Symbol, make_function, make_integer, make_number,
  make_variable, to_text,
};

#[derive(Parser)]
#[grammar = "algebra.pest"]
pub struct AlgebraParser;

#[derive(Error, Debug)]
pub enum AlgebraError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("Division by zero: {0}")]
  DivisionByZero(String),
  #[error("Indeterminate expression: {0}")]
  Indeterminate(String),
  #[error("Invalid variable name: {0}")]
  InvalidVariableName(String),
  #[error("Numeric overflow: {0}")]
  NumericOverflow(String),
  #[error("Unknown function: {0}")]
  UnknownFunction(String),
  #[error("Unbound variable: {0}")]
  UnboundVariable(String),
  #[error("{name} expects {expected} argument(s), got {given}")]
  ArgumentCount {
    name: String,
    expected: usize,
    given: usize,
  },
  #[error("Not real-valued: {0}")]
  NotReal(String),
  #[error("Nesting deeper than {0} levels")]
  TooDeep(usize),
}

impl AlgebraParser {
  pub fn parse_program(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  AlgebraParser::parse_program(input)
}

/// Parses and reduces `input` with no bindings and default settings.
pub fn evaluate(input: &str) -> Result<Symbol, AlgebraError> {
  evaluate_with(input, &SymbolTable::new(), &Settings::default())
}

pub fn evaluate_with(
  input: &str,
  table: &SymbolTable,
  settings: &Settings,
) -> Result<Symbol, AlgebraError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(AlgebraError::EmptyInput);
  }
  if evaluator::nesting_depth(trimmed) > settings.max_depth {
    return Err(AlgebraError::TooDeep(settings.max_depth));
  }

  let mut pairs = parse(trimmed)?;
  let program = pairs.next().ok_or(AlgebraError::EmptyInput)?;
  let result = evaluator::Reducer::new(table, settings).reduce(program, 0)?;
  debug!("{trimmed} => {result} ({})", result.group());
  Ok(result)
}

/// Canonical text of `input`.
pub fn interpret(input: &str) -> Result<String, AlgebraError> {
  Ok(evaluate(input)?.to_string())
}
