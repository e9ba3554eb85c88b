use clap::{Parser, Subcommand};
use vnfbackup::{
    cost::DEFAULT_COST_SCALE,
    min_flow::ShortestPathMethod,
    model::BackupGraph,
    random_graph::{generate, ProbRange},
    solver::{AssignmentSolver, CycleCanceling, SolverConfig, SuccessiveShortestPaths},
    sweep::{sweep, SweepConfig},
};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the backup assignment of maximum availability
    Solve {
        /// Input graph JSON filename
        graph_json: std::path::PathBuf,
        /// Scale factor of log-costs
        #[clap(long, default_value_t = DEFAULT_COST_SCALE)]
        scale: f64,
        /// Use dijkstra with potentials instead of bellman-ford
        #[clap(long)]
        dijkstra: bool,
        /// Use the cycle canceling solver
        #[clap(long)]
        oracle: bool,
    },
    /// Generate a random graph JSON
    Generate {
        /// Number of VNFs
        #[clap(short = 'm')]
        m: usize,
        /// Number of servers
        #[clap(short = 'n')]
        n: usize,
        /// Capacity of each server
        #[clap(short = 'r', default_value_t = 1)]
        r: usize,
        /// Range of VNF failure probabilities "lo,hi"
        #[clap(long, default_value = "0.0,0.1")]
        vnf_prob: ProbRange,
        /// Range of server failure probabilities "lo,hi"
        #[clap(long, default_value = "0.0,0.1")]
        server_prob: ProbRange,
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
    /// Solve many random graphs and report the mean availability
    Sweep {
        /// Number of random graphs
        #[clap(long, default_value_t = 100)]
        n_sims: usize,
        #[clap(short = 'm')]
        m: usize,
        #[clap(short = 'n')]
        n: usize,
        #[clap(short = 'r', default_value_t = 1)]
        r: usize,
        #[clap(long, default_value = "0.0,0.1")]
        vnf_prob: ProbRange,
        #[clap(long, default_value = "0.0,0.1")]
        server_prob: ProbRange,
        #[clap(long, default_value_t = 0)]
        seed: u64,
        #[clap(long, default_value_t = DEFAULT_COST_SCALE)]
        scale: f64,
        #[clap(long)]
        dijkstra: bool,
        #[clap(long)]
        oracle: bool,
    },
}

fn solver_config(scale: f64, dijkstra: bool) -> SolverConfig {
    let method = if dijkstra {
        ShortestPathMethod::Dijkstra
    } else {
        ShortestPathMethod::BellmanFord
    };
    SolverConfig::new(scale, method)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    log::info!("opts={:?}", opts);
    log::info!("n_threads={}", rayon::current_num_threads());

    match opts.command {
        Commands::Solve {
            graph_json,
            scale,
            dijkstra,
            oracle,
        } => {
            let s = std::fs::read_to_string(&graph_json)?;
            let graph = BackupGraph::from_json_str(&s)?;
            let config = solver_config(scale, dijkstra);
            let solution = if oracle {
                CycleCanceling::new(config).solve(&graph)?
            } else {
                SuccessiveShortestPaths::new(config).solve(&graph)?
            };
            println!("{}", serde_json::to_string_pretty(&solution)?);
        }
        Commands::Generate {
            m,
            n,
            r,
            vnf_prob,
            server_prob,
            seed,
        } => {
            let graph = generate(m, n, r, vnf_prob, server_prob, seed)?;
            println!("{}", graph.to_json_string());
        }
        Commands::Sweep {
            n_sims,
            m,
            n,
            r,
            vnf_prob,
            server_prob,
            seed,
            scale,
            dijkstra,
            oracle,
        } => {
            let sweep_config = SweepConfig {
                n_sims,
                m,
                n,
                r,
                vnf_fail_prob: vnf_prob,
                server_fail_prob: server_prob,
                seed,
            };
            let config = solver_config(scale, dijkstra);
            let summary = if oracle {
                sweep(&CycleCanceling::new(config), &sweep_config)?
            } else {
                sweep(&SuccessiveShortestPaths::new(config), &sweep_config)?
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
