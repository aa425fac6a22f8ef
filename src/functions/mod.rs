pub mod arithmetic;
pub mod convert;
pub mod elementary;
pub mod expand;
pub mod keys;
pub mod numeric;
pub mod predicates;
pub mod substitute;

pub use arithmetic::{
  add, distribute_exponent, divide, invert, multiply, negate, power, subtract,
};
pub use convert::{convert, demote, distribute_multiplier, primitive_part};
pub use elementary::apply_function;
pub use expand::{expand, expand_with};
pub use keys::{additive_key, key_for_group, multiplicative_key, power_key};
pub use numeric::numeric_power;
pub use predicates::{
  contains, equals, free_variables, is_constant, is_polynomial,
};
pub use substitute::{rename_function, substitute, update_hash};
