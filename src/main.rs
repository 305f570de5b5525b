mod args;
mod walk;

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dupfinder::report::{render_cluster_table, render_pair_table};
use dupfinder::{MatchConfig, ScanConfig};

use crate::args::{Cli, Commands, ScanArgs};
use crate::walk::gather_files;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(scan_args) => run_scan(scan_args),
    }
}

fn run_scan(args: ScanArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.path.is_dir(),
        "scan root {} is not a directory",
        args.path.display()
    );

    let files = gather_files(&args.path, &args.extensions());

    let scan_cfg = ScanConfig::new()
        .with_k(args.k)
        .with_min_tokens(args.min_tokens)
        .with_workers(args.workers);
    let match_cfg = MatchConfig::new()
        .with_threshold(args.threshold)
        .with_prefilter(args.prefilter)
        .with_minhash_perms(args.minhash_perms)
        .with_lsh_bands(args.lsh_bands)
        .with_exact_fallback_limit(args.exact_fallback_limit);

    let report = dupfinder::run(&files, &scan_cfg, &match_cfg, args.clusters)
        .context("duplicate scan failed")?;

    if args.clusters {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report.cluster_report())?);
        } else {
            print!(
                "{}",
                render_cluster_table(report.clusters.as_deref().unwrap_or_default())
            );
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&report.pairs)?);
    } else {
        print!("{}", render_pair_table(&report.pairs));
    }

    Ok(())
}
