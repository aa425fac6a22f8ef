use super::*;
use symcanon::{contains, equals, free_variables, is_constant, is_polynomial};

mod predicates {
  use super::*;

  #[test]
  fn free_variables_are_sorted_and_skip_constants() {
    let symbol = evaluate("z*sin(y) + pi*x + i + e^w").unwrap();
    assert_eq!(free_variables(&symbol), vec!["w", "x", "y", "z"]);
    assert!(free_variables(&evaluate("pi + e + i").unwrap()).is_empty());
  }

  #[test]
  fn constants() {
    assert!(is_constant(&evaluate("3/4").unwrap()));
    assert!(is_constant(&evaluate("sqrt(2) + pi").unwrap()));
    assert!(is_constant(&evaluate("2^pi").unwrap()));
    assert!(!is_constant(&evaluate("2^x").unwrap()));
  }

  #[test]
  fn contains_searches_exponents_only_when_deep() {
    let symbol = evaluate("2^x * y").unwrap();
    assert!(contains(&symbol, "y", false));
    assert!(!contains(&symbol, "x", false));
    assert!(contains(&symbol, "x", true));
    assert!(contains(&evaluate("sin(x + 1)").unwrap(), "x", false));
    assert!(!contains(&evaluate("sin(x + 1)").unwrap(), "z", true));
  }

  mod polynomial {
    use super::*;

    fn check(input: &str, include_denominator: bool) -> bool {
      is_polynomial(&evaluate(input).unwrap(), include_denominator)
    }

    #[test]
    fn accepts_polynomials() {
      assert!(check("x^2 + 3*x + 1", false));
      assert!(check("x*y + y^3", false));
      assert!(check("(x + 1)^2", false));
      assert!(check("7", false));
      assert!(check("sqrt(2)*x", false));
    }

    #[test]
    fn rejects_non_polynomials() {
      assert!(!check("sin(x)", false));
      assert!(!check("sqrt(x)", false));
      assert!(!check("2^x", false));
      assert!(!check("(x + 1)^(-1)", false));
    }

    #[test]
    fn denominators_are_opt_in() {
      assert!(!check("x^-1 + 1", false));
      assert!(check("x^-1 + 1", true));
      assert!(check("x/y", true));
      assert!(!check("x^(1/2)", true));
    }

    #[test]
    fn sum_denominators_follow_the_same_rule() {
      assert!(check("(x + 1)^(-1)", true));
      assert!(check("y*(x + 1)^(-2) + x", true));
      assert!(!check("y*(x + 1)^(-2) + x", false));
      assert!(!check("(x + 1)^(1/2)", true));
    }
  }

  #[test]
  fn equality_is_structural() {
    let a = evaluate("x*y + 1").unwrap();
    let b = evaluate("1 + y*x").unwrap();
    assert!(equals(&a, &b));
    assert!(!equals(&a, &evaluate("x*y + 2").unwrap()));
  }
}
