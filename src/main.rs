use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use symcanon::functions::expand_with;
use symcanon::{
  Settings, SymbolTable, build, evaluate_with, free_variables, is_constant,
  is_polynomial,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Deepest nesting of parentheses, calls and exponents accepted
  #[arg(long, global = true, default_value_t = Settings::default().max_depth)]
  max_depth: usize,

  /// Largest power of a sum that `expand` multiplies out
  #[arg(
    long,
    global = true,
    default_value_t = Settings::default().max_expansion_power
  )]
  max_expansion: u32,
}

#[derive(Subcommand)]
enum Commands {
  /// Reduce an expression to canonical form
  Eval {
    /// The expression to evaluate
    expression: String,

    /// Print a JSON object instead of plain text
    #[arg(long)]
    json: bool,
  },
  /// Reduce an expression and multiply out products of sums
  Expand {
    /// The expression to expand
    expression: String,
  },
  /// Compile an expression and evaluate it numerically
  Build {
    /// The expression to compile
    expression: String,

    /// Variable binding such as `x=1.5`; repeat for several variables
    #[arg(long = "at", value_parser = parse_binding)]
    bindings: Vec<(String, f64)>,
  },
}

fn parse_binding(text: &str) -> Result<(String, f64), String> {
  let (name, value) = text
    .split_once('=')
    .ok_or_else(|| format!("expected name=value, got `{text}`"))?;
  let value = value
    .trim()
    .parse::<f64>()
    .map_err(|e| format!("bad value for {name}: {e}"))?;
  Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
    .init();

  let cli = Cli::parse();
  let settings = Settings {
    max_depth: cli.max_depth,
    max_expansion_power: cli.max_expansion,
  };
  let table = SymbolTable::new();

  match cli.command {
    Commands::Eval { expression, json } => {
      let result = evaluate_with(&expression, &table, &settings)
        .with_context(|| format!("evaluating `{expression}`"))?;
      if json {
        let summary = serde_json::json!({
          "text": result.to_string(),
          "group": result.group().name(),
          "free_variables": free_variables(&result),
          "constant": is_constant(&result),
          "polynomial": is_polynomial(&result, false),
        });
        println!("{summary}");
      } else {
        println!("{result}");
      }
    }
    Commands::Expand { expression } => {
      let result = evaluate_with(&expression, &table, &settings)
        .and_then(|symbol| expand_with(symbol, &settings))
        .with_context(|| format!("expanding `{expression}`"))?;
      println!("{result}");
    }
    Commands::Build {
      expression,
      bindings,
    } => {
      let symbol = evaluate_with(&expression, &table, &settings)
        .with_context(|| format!("evaluating `{expression}`"))?;
      let compiled = build(&symbol, None)
        .with_context(|| format!("compiling `{symbol}`"))?;
      let mut values = Vec::with_capacity(compiled.variables().len());
      for variable in compiled.variables() {
        match bindings.iter().find(|(name, _)| name == variable) {
          Some((_, value)) => values.push(*value),
          None => {
            bail!("no value given for `{variable}` (use --at {variable}=...)")
          }
        }
      }
      println!("{}", compiled.call(&values));
    }
  }
  Ok(())
}
