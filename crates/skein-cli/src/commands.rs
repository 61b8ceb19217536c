//! Command implementations.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use skein_embed::cmr::{CmrOptions, compute_cmr};
use skein_embed::oct::exact::{ExactOctOptions, oct_embed_minimize, oct_embed_parameterized};
use skein_embed::oct::fast::{FastOctOptions, compute_fast_oct};
use skein_embed::oct::hybrid::compute_hybrid_oct;
use skein_embed::{EmbeddingAlgorithm, compute_klymko, compute_triad};
use skein_graph::{Chimera, Embedding, Graph};
use skein_place::{EmbeddingScheme, ReductionScheme, VirtualHardware};

use crate::io::{self, EmbeddingReport};
use crate::latex;

/// Where and how results are written.
pub struct OutputOptions {
    /// Prefix for the `.embedding`, `.vh`, `.timing`, `.tex` files.
    pub prefix: String,
    /// Also write a `.json` report.
    pub json: bool,
}

/// Run the CMR heuristic against an explicit hardware graph.
pub fn cmr(
    program_path: &str,
    hardware_path: &str,
    chimera: Chimera,
    seed: u64,
    tries: usize,
    output: &OutputOptions,
) -> Result<()> {
    let mut program = io::read_program(program_path)?;
    let hardware = io::read_hardware(hardware_path)?;
    debug!(
        program_n = program.n(),
        hardware_n = hardware.n(),
        diameter = hardware.diameter(),
        "inputs loaded"
    );
    let mut rng = StdRng::seed_from_u64(seed);

    let started = Instant::now();
    let phi = compute_cmr(&hardware, &mut program, &CmrOptions { tries }, &mut rng);
    let elapsed = started.elapsed();

    io::write_timing(&output.prefix, elapsed)?;
    io::write_embedding(&output.prefix, phi.embedding())?;
    latex::write_latex(&output.prefix, program.n(), &chimera, phi.embedding())?;
    if output.json {
        let report = EmbeddingReport::new(EmbeddingAlgorithm::Cmr, phi.embedding(), elapsed, None);
        io::write_json_report(&output.prefix, &report)?;
    }

    if phi.embedding().is_empty() {
        println!(
            "{} no valid embedding within {} tries",
            style("✗").red().bold(),
            tries
        );
    } else {
        print_summary(phi.embedding(), elapsed);
    }
    Ok(())
}

/// Run the exact OCT search (parameterized when `k` is given, minimizing
/// otherwise) and place the decomposition.
pub fn oct(
    program_path: &str,
    chimera: Chimera,
    k: Option<usize>,
    deadline: Option<u64>,
    reduce: bool,
    output: &OutputOptions,
) -> Result<()> {
    let program = io::read_program(program_path)?;
    debug!(program_n = program.n(), k = ?k, "program loaded");
    let options = exact_options(deadline);

    let started = Instant::now();
    let solution = match k {
        Some(k) => oct_embed_parameterized(&program, k, &options)?,
        None => oct_embed_minimize(&program, 0, &options)?,
    };
    let Some(solution) = solution else {
        io::write_timing(&output.prefix, started.elapsed())?;
        bail!("no odd cycle transversal found along this vertex ordering");
    };

    println!(
        "{} OCT of {} vertices",
        style("→").cyan().bold(),
        style(solution.len()).green()
    );
    place_and_write(
        &program,
        &chimera,
        &solution,
        reduce,
        EmbeddingAlgorithm::OctExact,
        output,
        started,
    )
}

/// Run the greedy OCT approximation and place the decomposition.
pub fn fast_oct(
    program_path: &str,
    chimera: Chimera,
    seed: u64,
    repeats: usize,
    reduce: bool,
    output: &OutputOptions,
) -> Result<()> {
    let program = io::read_program(program_path)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let started = Instant::now();
    let solution = compute_fast_oct(&program, &FastOctOptions { repeats }, &mut rng);

    println!(
        "{} approximate OCT of {} vertices",
        style("→").cyan().bold(),
        style(solution.len()).green()
    );
    place_and_write(
        &program,
        &chimera,
        &solution,
        reduce,
        EmbeddingAlgorithm::OctFast,
        output,
        started,
    )
}

/// Run the hybrid OCT pipeline and place the decomposition.
pub fn hybrid_oct(
    program_path: &str,
    chimera: Chimera,
    seed: u64,
    repeats: usize,
    deadline: Option<u64>,
    reduce: bool,
    output: &OutputOptions,
) -> Result<()> {
    let mut program = io::read_program(program_path)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let exact = exact_options(deadline);

    let started = Instant::now();
    let solution = compute_hybrid_oct(&mut program, &FastOctOptions { repeats }, &exact, &mut rng)?;
    let Some(solution) = solution else {
        io::write_timing(&output.prefix, started.elapsed())?;
        bail!("no odd cycle transversal found along this vertex ordering");
    };

    println!(
        "{} OCT of {} vertices",
        style("→").cyan().bold(),
        style(solution.len()).green()
    );
    place_and_write(
        &program,
        &chimera,
        &solution,
        reduce,
        EmbeddingAlgorithm::OctHybrid,
        output,
        started,
    )
}

/// TRIAD clique embedding; with `--reduce`, the native virtual-hardware
/// placement plus 2-exchange instead of the closed form.
pub fn triad(program_path: &str, chimera: Chimera, reduce: bool, output: &OutputOptions) -> Result<()> {
    let n = io::read_program_order(program_path)?;

    if reduce {
        let program = complete_graph(n);
        let started = Instant::now();
        let mut vh = VirtualHardware::new(n, chimera.c());
        if let Err(err) = vh.embed(
            &program,
            &chimera,
            EmbeddingScheme::Native,
            ReductionScheme::Full,
            &[],
        ) {
            io::write_timing(&output.prefix, started.elapsed())?;
            return Err(err).context("program does not fit the hardware");
        }
        vh.reduce();
        let phi = vh.embed_in_chimera(&chimera);
        let elapsed = started.elapsed();

        io::write_timing(&output.prefix, elapsed)?;
        io::write_virtual_hardware(&output.prefix, &vh)?;
        io::write_embedding(&output.prefix, &phi)?;
        latex::write_latex(&output.prefix, n, &chimera, &phi)?;
        if output.json {
            let report = EmbeddingReport::new(EmbeddingAlgorithm::Triad, &phi, elapsed, None);
            io::write_json_report(&output.prefix, &report)?;
        }
        print_summary(&phi, elapsed);
        return Ok(());
    }

    let started = Instant::now();
    let Some(phi) = compute_triad(&chimera, n) else {
        io::write_timing(&output.prefix, started.elapsed())?;
        bail!("clique on {n} vertices does not fit the hardware diagonal");
    };
    let elapsed = started.elapsed();

    io::write_timing(&output.prefix, elapsed)?;
    io::write_embedding(&output.prefix, &phi)?;
    latex::write_latex(&output.prefix, n, &chimera, &phi)?;
    if output.json {
        let report = EmbeddingReport::new(EmbeddingAlgorithm::Triad, &phi, elapsed, None);
        io::write_json_report(&output.prefix, &report)?;
    }
    print_summary(&phi, elapsed);
    Ok(())
}

/// Klymko clique embedding.
pub fn klymko(program_path: &str, chimera: Chimera, output: &OutputOptions) -> Result<()> {
    let n = io::read_program_order(program_path)?;

    let started = Instant::now();
    let Some(phi) = compute_klymko(&chimera, n) else {
        io::write_timing(&output.prefix, started.elapsed())?;
        bail!("clique on {n} vertices does not fit the hardware");
    };
    let elapsed = started.elapsed();

    io::write_timing(&output.prefix, elapsed)?;
    io::write_embedding(&output.prefix, &phi)?;
    latex::write_latex(&output.prefix, n, &chimera, &phi)?;
    if output.json {
        let report = EmbeddingReport::new(EmbeddingAlgorithm::Klymko, &phi, elapsed, None);
        io::write_json_report(&output.prefix, &report)?;
    }
    print_summary(&phi, elapsed);
    Ok(())
}

/// Shared tail of the OCT flavors: virtual hardware placement, optional
/// reduction, final coordinates, output files.
fn place_and_write(
    program: &Graph,
    chimera: &Chimera,
    solution: &[usize],
    reduce: bool,
    algorithm: EmbeddingAlgorithm,
    output: &OutputOptions,
    started: Instant,
) -> Result<()> {
    let reduction = if reduce {
        ReductionScheme::Full
    } else {
        ReductionScheme::None
    };

    let mut vh = VirtualHardware::new(program.n(), chimera.c());
    if let Err(err) = vh.embed(program, chimera, EmbeddingScheme::Oct, reduction, solution) {
        io::write_timing(&output.prefix, started.elapsed())?;
        return Err(err).context("decomposition does not fit the hardware");
    }
    if reduce {
        vh.reduce();
    }
    let phi = vh.embed_in_chimera(chimera);
    let elapsed = started.elapsed();

    io::write_timing(&output.prefix, elapsed)?;
    io::write_virtual_hardware(&output.prefix, &vh)?;
    io::write_embedding(&output.prefix, &phi)?;
    latex::write_latex(&output.prefix, program.n(), chimera, &phi)?;
    if output.json {
        let report = EmbeddingReport::new(algorithm, &phi, elapsed, Some(solution));
        io::write_json_report(&output.prefix, &report)?;
    }
    print_summary(&phi, elapsed);
    Ok(())
}

fn exact_options(deadline: Option<u64>) -> ExactOctOptions {
    ExactOctOptions {
        deadline: deadline.map(Duration::from_secs),
    }
}

fn complete_graph(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            g.connect(u, v).expect("vertex in range");
        }
    }
    g
}

fn print_summary(phi: &Embedding, elapsed: Duration) {
    println!(
        "{} embedded {} bags on {} qubits in {:.3}s",
        style("✓").green().bold(),
        phi.bags(),
        style(phi.qubits_used()).green(),
        elapsed.as_secs_f64()
    );
}
