//! Skein command-line interface
//!
//! Computes minor embeddings of program graphs onto Chimera quantum
//! annealing hardware. Each subcommand selects one embedding strategy;
//! results are written as `<prefix>.embedding`, `<prefix>.vh`,
//! `<prefix>.timing` and `<prefix>.tex` files next to an optional JSON
//! report.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skein_graph::Chimera;

mod commands;
mod io;
mod latex;

use commands::OutputOptions;

/// Skein - minor embeddings for Chimera quantum annealers
#[derive(Parser)]
#[command(name = "skein")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ChimeraArgs {
    /// Qubits per cell shore
    #[arg(short = 'c', long = "cell-size")]
    c: usize,

    /// Number of cell rows
    #[arg(short = 'm', long = "rows")]
    m: usize,

    /// Number of cell columns
    #[arg(short = 'n', long = "cols")]
    n: usize,
}

impl ChimeraArgs {
    fn chimera(&self) -> anyhow::Result<Chimera> {
        if self.c == 0 || self.m == 0 || self.n == 0 {
            anyhow::bail!("chimera dimensions must all be positive");
        }
        Ok(Chimera::new(self.c, self.m, self.n))
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output file prefix
    #[arg(short, long)]
    output: String,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    fn options(&self) -> OutputOptions {
        OutputOptions {
            prefix: self.output.clone(),
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// CMR randomized heuristic on an explicit hardware graph
    Cmr {
        /// Program graph file
        #[arg(short, long)]
        program: String,

        /// Hardware graph file
        #[arg(long)]
        hardware: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        /// PRNG seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Restart budget after the first attempt
        #[arg(short, long, default_value_t = 20)]
        tries: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Exact OCT decomposition via iterative compression
    Oct {
        /// Program graph file
        #[arg(short, long)]
        program: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        /// Target OCT size for the parameterized search; omit to minimize
        #[arg(short)]
        k: Option<usize>,

        /// Give up on the split enumeration after this many seconds
        #[arg(long)]
        deadline: Option<u64>,

        /// Optimize the placement with 2-exchange before embedding
        #[arg(long)]
        reduce: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Greedy 2-peel OCT approximation
    FastOct {
        /// Program graph file
        #[arg(short, long)]
        program: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        /// PRNG seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Number of peels to try
        #[arg(short, long, default_value_t = 10)]
        repeats: usize,

        /// Optimize the placement with 2-exchange before embedding
        #[arg(long)]
        reduce: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Greedy approximation feeding the exact minimizer
    HybridOct {
        /// Program graph file
        #[arg(short, long)]
        program: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        /// PRNG seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Number of peels to try in the approximation pass
        #[arg(short, long, default_value_t = 10)]
        repeats: usize,

        /// Give up on the split enumeration after this many seconds
        #[arg(long)]
        deadline: Option<u64>,

        /// Optimize the placement with 2-exchange before embedding
        #[arg(long)]
        reduce: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// TRIAD clique embedding along the grid diagonal
    Triad {
        /// Program file (only the vertex count is read)
        #[arg(short, long)]
        program: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        /// Place on virtual hardware and 2-exchange instead of the closed form
        #[arg(long)]
        reduce: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Klymko clique embedding with duplicated shores
    Klymko {
        /// Program file (only the vertex count is read)
        #[arg(short, long)]
        program: String,

        #[command(flatten)]
        chimera: ChimeraArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Cmr {
            program,
            hardware,
            chimera,
            seed,
            tries,
            output,
        } => commands::cmr(
            &program,
            &hardware,
            chimera.chimera()?,
            seed,
            tries,
            &output.options(),
        ),
        Commands::Oct {
            program,
            chimera,
            k,
            deadline,
            reduce,
            output,
        } => commands::oct(
            &program,
            chimera.chimera()?,
            k,
            deadline,
            reduce,
            &output.options(),
        ),
        Commands::FastOct {
            program,
            chimera,
            seed,
            repeats,
            reduce,
            output,
        } => commands::fast_oct(
            &program,
            chimera.chimera()?,
            seed,
            repeats,
            reduce,
            &output.options(),
        ),
        Commands::HybridOct {
            program,
            chimera,
            seed,
            repeats,
            deadline,
            reduce,
            output,
        } => commands::hybrid_oct(
            &program,
            chimera.chimera()?,
            seed,
            repeats,
            deadline,
            reduce,
            &output.options(),
        ),
        Commands::Triad {
            program,
            chimera,
            reduce,
            output,
        } => commands::triad(&program, chimera.chimera()?, reduce, &output.options()),
        Commands::Klymko {
            program,
            chimera,
            output,
        } => commands::klymko(&program, chimera.chimera()?, &output.options()),
    }
}
