// Depsack: Solving the Set-Union Knapsack Problem
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use depsack::io::{
    append_summary, export_json, load_problem, sanitize_for_filename, save_report,
    validate_solution,
};
use depsack::local_search::LocalSearch;
use depsack::random_provider::RandomProvider;
use depsack::{solve_with, Solution, SolverOptions, Stopper};

use clap::Parser;
use log::*;
use rand::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[clap(version = "0.1.0", author = "Tibor Schneider <tiborschneider@bluewin.ch>")]
struct CommandLineArguments {
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Parser, Debug)]
enum MainCommand {
    /// Solve a problem instance and write the CSV summary and the best-solution report
    Solve {
        /// Path to the problem file
        input: PathBuf,
        /// Wall-clock budget per repetition, in seconds
        #[clap(short = 't', long, default_value = "10")]
        max_time: f64,
        /// Master seed; random if not given
        #[clap(short, long)]
        seed: Option<u64>,
        /// Directory for the CSV summary and the reports
        #[clap(short, long, default_value = "reports")]
        output_dir: PathBuf,
        /// Number of independent repetitions (seeds derived from the master seed)
        #[clap(short, long, default_value = "1")]
        repetitions: usize,
        /// Skip the parallel GRASP pass
        #[clap(long)]
        no_grasp: bool,
        /// Skip the parallel GRASP+VNS pass
        #[clap(long)]
        no_grasp_vns: bool,
        /// Force the GRASP worker count (1 = deterministic)
        #[clap(long)]
        workers: Option<usize>,
        /// Additionally dump every portfolio as JSON
        #[clap(long)]
        json: bool,
    },
    /// Validate a solution report against its problem file
    Validate {
        /// Path to the problem file
        problem: PathBuf,
        /// Path to the report file
        report: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    match args.cmd {
        MainCommand::Solve {
            input,
            max_time,
            seed,
            output_dir,
            repetitions,
            no_grasp,
            no_grasp_vns,
            workers,
            json,
        } => {
            let seed = seed.unwrap_or_else(|| thread_rng().gen());
            let options = SolverOptions {
                run_grasp: !no_grasp,
                run_grasp_vns: !no_grasp_vns,
                workers,
                ..SolverOptions::default()
            };
            run_solve(&input, max_time, seed, &output_dir, repetitions, options, json)
        }
        MainCommand::Validate { problem, report } => {
            let result = validate_solution(&problem, &report)?;
            println!("{}", result);
            if !result.overall_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_solve(
    input: &Path,
    max_time: f64,
    seed: u64,
    output_dir: &Path,
    repetitions: usize,
    options: SolverOptions,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let instance = load_problem(input)?;
    info!(
        "loaded {:?}: {} packages, {} dependencies, capacity {}",
        input,
        instance.num_packages(),
        instance.num_dependencies(),
        instance.capacity()
    );

    let timestamp = format!("{}", SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs());
    let input_label = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("instance"));
    std::fs::create_dir_all(output_dir)?;
    let csv_path =
        output_dir.join(format!("summary_results-{}.csv", sanitize_for_filename(&timestamp)));

    let mut master = RandomProvider::new(seed);
    let budget = Duration::from_secs_f64(max_time);

    for repetition in 0..repetitions.max(1) {
        let repetition_seed = master.next_seed();
        info!("repetition {} with seed {}", repetition, repetition_seed);

        let solutions = solve_with(
            &instance,
            budget,
            repetition_seed,
            &timestamp,
            options.clone(),
            Stopper::new(),
        );
        print_results(&solutions);

        let file_label = format!("{}-{}", input_label, repetition);
        for solution in &solutions {
            append_summary(&csv_path, solution, &file_label)?;
        }

        if let Some(best) = solutions.iter().max_by_key(|s| s.benefit) {
            let path = save_report(best, output_dir, &input_label, &format!("{}", repetition))?;
            info!("best solution report written to {:?}", path);
        }
        if json {
            let json_path = output_dir.join(format!(
                "portfolio-{}-{}.json",
                sanitize_for_filename(&timestamp),
                repetition
            ));
            export_json(&json_path, &solutions)?;
        }
    }

    println!("CSV summary written to {:?}", csv_path);
    Ok(())
}

fn print_results(solutions: &[Solution]) {
    println!(
        "{:<45} {:>9} {:>6} {:>8} {:>12}",
        "Algorithm", "Packages", "Size", "Benefit", "Time"
    );
    for s in solutions {
        let label = if s.local_search == LocalSearch::None {
            s.algorithm.to_string()
        } else {
            format!("{} | {}", s.algorithm, s.local_search)
        };
        println!(
            "{:<45} {:>9} {:>6} {:>8} {:>11.3}s",
            label,
            s.num_packages(),
            s.size,
            s.benefit,
            s.wall_time.as_secs_f64()
        );
    }
}
