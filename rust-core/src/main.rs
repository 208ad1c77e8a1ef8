use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;

use xtallography::config::{DEFAULT_MAX_INDEX, DEFAULT_SUPERCELL_TOLERANCE};
use xtallography::lattice::{
    conventional_cell, is_equivalent_unit_cell, is_supercell, parameter_names, Centering,
    LatticeConstants, LatticeSystem, Tolerance, UnitCell,
};

#[derive(Parser)]
#[command(name = "xtallography")]
#[command(about = "Standardize unit cells and compare crystal lattices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Relative tolerance for approximate comparisons
    #[arg(long, global = true)]
    rtol: Option<f64>,

    /// Absolute tolerance for approximate comparisons
    #[arg(long, global = true)]
    atol: Option<f64>,

    /// Number of threads to use for the supercell search (default: all available cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print derived quantities of a unit cell
    Info(CellArgs),
    /// Canonical cell within the cell's own lattice system
    Standardize(CellArgs),
    /// IUCr conventional cell, resolving limiting cases to higher symmetry
    Conventional(CellArgs),
    /// Check whether two unit cells describe the same lattice
    Equivalent {
        #[command(flatten)]
        test: CellArgs,
        #[command(flatten)]
        reference: ReferenceCellArgs,
    },
    /// Check whether the first lattice is a supercell of the reference lattice
    Supercell {
        #[command(flatten)]
        test: CellArgs,
        #[command(flatten)]
        reference: ReferenceCellArgs,
        /// Relative tolerance on the metric tensor entries
        #[arg(long, default_value_t = DEFAULT_SUPERCELL_TOLERANCE)]
        tol: f64,
        /// Largest absolute entry of the integer transformation
        #[arg(long, default_value_t = DEFAULT_MAX_INDEX)]
        max_index: i32,
    },
}

#[derive(Args)]
struct CellArgs {
    /// Lattice system (triclinic, monoclinic, orthorhombic, tetragonal, rhombohedral, hexagonal, cubic)
    #[arg(short, long)]
    system: LatticeSystem,
    /// Centering (primitive, body, face, base)
    #[arg(short, long, default_value = "primitive")]
    centering: Centering,
    /// Lattice parameters, comma separated; angles in degrees
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    params: Vec<f64>,
}

#[derive(Args)]
struct ReferenceCellArgs {
    /// Lattice system of the reference cell
    #[arg(long)]
    ref_system: LatticeSystem,
    /// Centering of the reference cell
    #[arg(long, default_value = "primitive")]
    ref_centering: Centering,
    /// Lattice parameters of the reference cell; angles in degrees
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    ref_params: Vec<f64>,
}

#[derive(Serialize)]
struct CellInfo {
    unit_cell: UnitCell,
    is_bravais_lattice: bool,
    volume: f64,
    primitive_volume: f64,
    surface_area: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    let tol = tolerance(cli.atol, cli.rtol)?;
    info!("Starting xtallography v{}", xtallography::VERSION);

    match cli.command {
        Commands::Info(cell) => {
            let unit_cell = unit_cell(cell.system, cell.centering, &cell.params)?;
            if !unit_cell.is_bravais_lattice() {
                warn!(
                    "{} with {} centering is not a Bravais lattice",
                    unit_cell.lattice_system(),
                    unit_cell.centering()
                );
            }
            print_json(&CellInfo {
                unit_cell,
                is_bravais_lattice: unit_cell.is_bravais_lattice(),
                volume: unit_cell.volume(),
                primitive_volume: unit_cell.primitive_volume(),
                surface_area: unit_cell.surface_area(),
            })
        }
        Commands::Standardize(cell) => {
            let unit_cell = unit_cell(cell.system, cell.centering, &cell.params)?;
            let standardized = unit_cell.standardize()?;
            info!("{} -> {}", unit_cell, standardized);
            print_json(&standardized)
        }
        Commands::Conventional(cell) => {
            let unit_cell = unit_cell(cell.system, cell.centering, &cell.params)?;
            let conventional = conventional_cell(&unit_cell, &tol)?;
            info!("{} -> {}", unit_cell, conventional);
            print_json(&conventional)
        }
        Commands::Equivalent { test, reference } => {
            let test = unit_cell(test.system, test.centering, &test.params)?;
            let reference = unit_cell(
                reference.ref_system,
                reference.ref_centering,
                &reference.ref_params,
            )?;
            let equivalent = is_equivalent_unit_cell(test, reference, &tol)?;
            info!("{} equivalent to {}: {}", test, reference, equivalent);
            print_json(&equivalent)
        }
        Commands::Supercell {
            test,
            reference,
            tol,
            max_index,
        } => {
            if test.centering != Centering::Primitive
                || reference.ref_centering != Centering::Primitive
            {
                warn!("Supercell search compares lattice constants only; centering is ignored");
            }
            let test = lattice_constants(test.system, &test.params)?;
            let reference = lattice_constants(reference.ref_system, &reference.ref_params)?;
            let found = is_supercell(&test, &reference, tol, max_index)?;
            info!("{} supercell of {}: {}", test, reference, found);
            print_json(&found)
        }
    }
}

fn tolerance(atol: Option<f64>, rtol: Option<f64>) -> Result<Tolerance> {
    let mut tol = Tolerance::default();
    if let Some(atol) = atol {
        tol = tol.with_atol(atol)?;
    }
    if let Some(rtol) = rtol {
        tol = tol.with_rtol(rtol)?;
    }
    Ok(tol)
}

/// Lattice constants from command-line parameters, converting angles from degrees.
fn lattice_constants(system: LatticeSystem, params: &[f64]) -> Result<LatticeConstants> {
    let names = parameter_names(system);
    if params.len() != names.len() {
        bail!(
            "{} lattice constants take {} parameters ({}), got {}",
            system,
            names.len(),
            names.join(", "),
            params.len()
        );
    }

    let values: Vec<f64> = names
        .iter()
        .zip(params)
        .map(|(name, &value)| match *name {
            "alpha" | "beta" | "gamma" => value.to_radians(),
            _ => value,
        })
        .collect();

    LatticeConstants::from_parameters(system, &values)
        .with_context(|| format!("invalid {} lattice constants {:?}", system, params))
}

fn unit_cell(system: LatticeSystem, centering: Centering, params: &[f64]) -> Result<UnitCell> {
    Ok(UnitCell::new(lattice_constants(system, params)?, centering))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
