/// Limits applied while evaluating input. Passed explicitly to every entry
/// point that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Deepest parse-tree nesting accepted before evaluation is refused.
  pub max_depth: usize,
  /// Largest integer power of a sum that `expand` multiplies out.
  pub max_expansion_power: u32,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      max_depth: 256,
      max_expansion_power: 64,
    }
  }
}
