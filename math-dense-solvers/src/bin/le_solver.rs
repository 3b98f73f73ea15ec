//! Linear equation solver driver
//!
//! Reads or generates a system `A x = f`, then runs either the Gauss family
//! (solutions with both pivot policies, determinants, inverse, condition
//! number) or SOR on it and prints the results.
//!
//! Usage:
//!   cargo run --release --bin le-solver -- --method gauss -n 5 -m 3
//!   echo "4 1 1 3  1 2" | cargo run --bin le-solver -- --input stdin -n 2 --format nested
//!   cargo run --bin le-solver -- --config configs/sor.json

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use math_audio_dense_solvers::{
    Matrix, MatrixFormat, Method, PivotStrategy, RunConfig, analyze, determinant,
    generated_system, solve, sor,
};
use std::io::Read;
use std::path::PathBuf;

/// Where the system comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputMode {
    /// n*n coefficients of A then n values of f, whitespace separated
    Stdin,
    /// Built-in parametrised test system
    Generated,
}

#[derive(Parser, Debug)]
#[command(name = "le-solver", version, about = "Solve dense linear systems")]
struct Args {
    /// JSON run configuration; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Solver family: gauss or relaxation
    #[arg(long)]
    method: Option<Method>,

    /// Matrix output format: grid or nested
    #[arg(long)]
    format: Option<MatrixFormat>,

    /// Source of the system
    #[arg(long, value_enum, default_value_t = InputMode::Generated)]
    input: InputMode,

    /// System size
    #[arg(short = 'n', long = "size", default_value_t = 4)]
    size: usize,

    /// Parameter of the generated system
    #[arg(short = 'm', long = "param", default_value_t = 1)]
    param: usize,

    /// Use first-non-zero pivots for the primary Gauss run
    #[arg(long)]
    no_pivoting: bool,

    /// SOR relaxation factor
    #[arg(long)]
    omega: Option<f64>,

    /// SOR stopping threshold on the update norm
    #[arg(long)]
    precision: Option<f64>,

    /// Stop SOR after this many sweeps even if not converged
    #[arg(long)]
    max_sweeps: Option<usize>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RunConfig::default(),
        };
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_pivoting {
            config.pivoting = false;
        }
        if let Some(omega) = self.omega {
            config.omega = omega;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if self.max_sweeps.is_some() {
            config.max_sweeps = self.max_sweeps;
        }
        Ok(config)
    }
}

fn read_system(n: usize) -> Result<(Matrix, Matrix)> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading system from stdin")?;

    let values = text
        .split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("'{}' is not a number", tok))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != n * n + n {
        bail!(
            "expected {} numbers for a system of size {}, got {}",
            n * n + n,
            n,
            values.len()
        );
    }
    let a = Matrix::from_shape_vec(n, n, values[..n * n].to_vec())?;
    let f = Matrix::column(&values[n * n..])?;
    Ok((a, f))
}

fn run_gauss(a: &Matrix, f: &Matrix, config: &RunConfig) -> Result<()> {
    let options = config.analysis_options();
    let other = match options.pivoting {
        PivotStrategy::Partial => PivotStrategy::FirstNonZero,
        PivotStrategy::FirstNonZero => PivotStrategy::Partial,
    };

    let primary = analyze(a, Some(f), &options).context("Gauss analysis failed")?;
    let other_solution = solve(a, f, other)?;
    let other_det = determinant(a, other)?;

    if let Some(x) = &primary.solution {
        println!("\nSolution ({:?} pivoting):", options.pivoting);
        print!("{}", x.display(config.format));
    }
    println!("\nSolution ({:?} pivoting):", other);
    print!("{}", other_solution.display(config.format));

    if let Some(inv) = &primary.inverse {
        println!("\nInverse:");
        print!("{}", inv.display(config.format));
    }

    if let Some(det) = primary.determinant {
        println!("\nDeterminant ({:?} pivoting): {}", options.pivoting, det);
    }
    println!("Determinant ({:?} pivoting): {}", other, other_det);
    if let Some(cond) = primary.condition_number {
        println!("Condition number: {}", cond);
    }
    Ok(())
}

fn run_relaxation(a: &Matrix, f: &Matrix, config: &RunConfig) -> Result<()> {
    let sor_config = config.sor_config();
    if sor_config.max_sweeps.is_none() {
        log::debug!("SOR runs without a sweep cap");
    }

    let solution = sor(a, f, &sor_config).context("SOR failed")?;
    if !solution.converged {
        log::warn!(
            "SOR stopped after {} sweeps without converging (step {:e})",
            solution.sweeps,
            solution.step
        );
    }

    println!(
        "\nSolution by relaxation (omega = {}, {} sweeps):",
        sor_config.omega, solution.sweeps
    );
    print!("{}", solution.x.display(config.format));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.run_config()?;
    log::debug!("run configuration: {:?}", config);

    let (a, f) = match args.input {
        InputMode::Stdin => read_system(args.size)?,
        InputMode::Generated => generated_system(args.size, args.param)?,
    };

    println!("System matrix:");
    print!("{}", a.display(config.format));
    println!("\nRight-hand side:");
    print!("{}", f.display(config.format));

    match config.method {
        Method::Gauss => run_gauss(&a, &f, &config),
        Method::Relaxation => run_relaxation(&a, &f, &config),
    }
}
