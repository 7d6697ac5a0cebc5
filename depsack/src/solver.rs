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

//! # Solver Façade
//!
//! [`solve`] runs the whole portfolio against one instance: one random bag, three greedy bags,
//! three semi-random greedy bags, then — starting from the best constructive result — one VND
//! pass and three VNS passes (one per local-search flavor), and optionally one GRASP and one
//! GRASP+VNS run. The wall-clock budget is divided evenly over the runs, with the constructive
//! runs additionally capped by an instance-size-dependent ceiling. Every produced bag becomes a
//! [`Solution`]; infeasible outcomes are discarded from the portfolio (and logged), so every
//! returned solution is feasible unless it explicitly says otherwise.

use crate::bag::Bag;
use crate::constructive::Constructive;
use crate::local_search::LocalSearch;
use crate::metaheuristics::{Grasp, GraspMode, Vnd, Vns};
use crate::model::ProblemInstance;
use crate::movements::Movement;
use crate::random_provider::RandomProvider;
use crate::repair::RepairStrategy;
use crate::Stopper;

use log::*;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// The algorithms of the portfolio, used as stable identifiers in reports and CSV rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Uniformly random construction.
    Random,
    /// Greedy construction by descending benefit.
    GreedyPackageBenefit,
    /// Greedy construction by descending benefit-to-size ratio.
    GreedyPackageBenefitRatio,
    /// Greedy construction by ascending standalone size.
    GreedyPackageSize,
    /// Semi-random greedy construction by descending benefit.
    RandomGreedyPackageBenefit,
    /// Semi-random greedy construction by descending benefit-to-size ratio.
    RandomGreedyPackageBenefitRatio,
    /// Semi-random greedy construction by ascending standalone size.
    RandomGreedyPackageSize,
    /// Variable Neighborhood Descent.
    Vnd,
    /// Variable Neighborhood Search.
    Vns,
    /// Parallel GRASP.
    Grasp,
    /// Parallel GRASP with VNS intensification.
    GraspVns,
    /// No algorithm (the empty bag).
    None,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Random => "RANDOM",
            Algorithm::GreedyPackageBenefit => "GREEDY_PACKAGE_BENEFIT",
            Algorithm::GreedyPackageBenefitRatio => "GREEDY_PACKAGE_BENEFIT_RATIO",
            Algorithm::GreedyPackageSize => "GREEDY_PACKAGE_SIZE",
            Algorithm::RandomGreedyPackageBenefit => "RANDOM_GREEDY_PACKAGE_BENEFIT",
            Algorithm::RandomGreedyPackageBenefitRatio => "RANDOM_GREEDY_PACKAGE_BENEFIT_RATIO",
            Algorithm::RandomGreedyPackageSize => "RANDOM_GREEDY_PACKAGE_SIZE",
            Algorithm::Vnd => "VND",
            Algorithm::Vns => "VNS",
            Algorithm::Grasp => "GRASP",
            Algorithm::GraspVns => "GRASP_VNS",
            Algorithm::None => "NONE",
        })
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Caller-facing knobs of the portfolio.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Run the parallel GRASP pass.
    pub run_grasp: bool,
    /// Run the parallel GRASP+VNS pass.
    pub run_grasp_vns: bool,
    /// Force the GRASP worker count; `Some(1)` makes the whole portfolio deterministic.
    pub workers: Option<usize>,
    /// Size of the restricted candidate list in the GRASP construction.
    pub rcl_size: usize,
    /// RCL threshold factor; negative means redrawn uniformly at every step.
    pub alpha: f64,
    /// Local-search stall cap (consecutive iterations without improvement).
    pub stall_cap: usize,
    /// Local-search total iteration cap, also the per-worker GRASP iteration cap.
    pub iteration_cap: usize,
    /// The neighborhood explored by the plain GRASP's local search.
    pub grasp_movement: Movement,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            run_grasp: true,
            run_grasp_vns: true,
            workers: None,
            rcl_size: 10,
            alpha: -1.0,
            stall_cap: 200,
            iteration_cap: 2000,
            grasp_movement: Movement::SwapRemove1Add1,
        }
    }
}

/// One produced solution, self-describing enough for reports and CSV rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// The algorithm that produced this solution.
    pub algorithm: Algorithm,
    /// The local-search flavor used, if any.
    pub local_search: LocalSearch,
    /// The neighborhood movement used, if any.
    pub movement: Movement,
    /// The repair strategy that restored feasibility, if any.
    pub repair: RepairStrategy,
    /// Package membership bit-vector, indexed by package id.
    pub packages: Vec<bool>,
    /// Dependency membership bit-vector, indexed by dependency id.
    pub dependencies: Vec<bool>,
    /// The union size of the selected dependencies.
    pub size: u64,
    /// The total benefit of the selected packages.
    pub benefit: u64,
    /// Wall-clock time spent producing this solution.
    pub wall_time: Duration,
    /// The RNG seed of the producing component.
    pub seed: u64,
    /// Free-form parameter string.
    pub params: String,
    /// Timestamp of the producing run.
    pub timestamp: String,
    /// Whether the solution respects the capacity. Infeasible solutions are excluded from the
    /// portfolio by [`solve`], but lower layers may still hand them out.
    pub feasible: bool,
}

impl Solution {
    /// Freeze a bag into a solution.
    pub fn from_bag(bag: &Bag, inst: &ProblemInstance) -> Self {
        let prov = bag.provenance();
        Self {
            algorithm: prov.algorithm,
            local_search: prov.local_search,
            movement: prov.movement,
            repair: prov.repair,
            packages: (0..inst.num_packages()).map(|p| bag.contains(p)).collect(),
            dependencies: (0..inst.num_dependencies()).map(|d| bag.refcount(d) > 0).collect(),
            size: bag.size(),
            benefit: bag.benefit(),
            wall_time: prov.wall_time,
            seed: prov.seed,
            params: prov.params.clone(),
            timestamp: prov.timestamp.clone(),
            feasible: bag.is_feasible(inst.capacity()),
        }
    }

    /// Number of selected packages.
    pub fn num_packages(&self) -> usize {
        self.packages.iter().filter(|&&b| b).count()
    }

    /// Number of dependencies in the union.
    pub fn num_dependencies(&self) -> usize {
        self.dependencies.iter().filter(|&&b| b).count()
    }
}

/// Run the full portfolio with default options and no external stop channel.
pub fn solve(
    inst: &ProblemInstance,
    budget: Duration,
    seed: u64,
    timestamp: &str,
) -> Vec<Solution> {
    solve_with(inst, budget, seed, timestamp, SolverOptions::default(), Stopper::new())
}

/// Run the full portfolio. Always returns at least one solution (the empty bag, if nothing
/// better was produced in time); every returned solution is either feasible or explicitly
/// flagged.
pub fn solve_with(
    inst: &ProblemInstance,
    budget: Duration,
    seed: u64,
    timestamp: &str,
    options: SolverOptions,
    abort: Stopper,
) -> Vec<Solution> {
    info!(
        "solving an instance with {} packages, {} dependencies, capacity {}",
        inst.num_packages(),
        inst.num_dependencies(),
        inst.capacity()
    );

    if inst.num_packages() == 0 {
        return vec![Solution::from_bag(&Bag::new(Algorithm::None, timestamp), inst)];
    }

    let mut abort = abort;
    let mut master = RandomProvider::new(seed);

    // 1 random + 3 greedy + 3 semi-random + 1 VND + 3 VNS, plus the optional GRASP passes
    let runs = 11 + options.run_grasp as u32 + options.run_grasp_vns as u32;
    let per_run = budget / runs;
    let constructive_ceiling = Duration::from_millis(25)
        + Duration::from_micros(2 * (inst.num_packages() + inst.num_dependencies()) as u64);
    let constructive_budget = per_run.min(constructive_ceiling);

    let mut bags: Vec<Bag> = Vec::with_capacity(runs as usize);

    let mut constructive =
        Constructive::new(inst, constructive_budget, master.next_seed(), timestamp);
    bags.push(constructive.random_bag(&mut abort));
    bags.extend(constructive.greedy_bags(&mut abort));
    bags.extend(constructive.semi_random_bags(&mut abort));

    // the best constructive bag seeds the improvement metaheuristics
    let mut best_initial = bags[0].clone();
    for bag in bags.iter().skip(1) {
        if bag.benefit() > best_initial.benefit() {
            best_initial = bag.clone();
        }
    }
    info!("best constructive benefit: {}", best_initial.benefit());

    let mut vnd = Vnd::new(per_run, master.next_seed())
        .with_caps(options.stall_cap, options.iteration_cap);
    bags.push(vnd.run(inst, &best_initial, &mut abort));

    for method in [
        LocalSearch::FirstImprovement,
        LocalSearch::BestImprovement,
        LocalSearch::RandomImprovement,
    ]
    .iter()
    {
        let mut vns = Vns::new(per_run, master.next_seed(), *method)
            .with_caps(options.stall_cap, options.iteration_cap);
        bags.push(vns.run(inst, &best_initial, &mut abort));
    }

    if options.run_grasp {
        let mut grasp = Grasp::new(
            per_run,
            master.next_seed(),
            options.rcl_size,
            options.alpha,
            GraspMode::LocalSearch,
        )
        .with_workers(options.workers);
        bags.push(grasp.run(
            inst,
            options.grasp_movement,
            options.stall_cap,
            options.iteration_cap,
            &abort,
            timestamp,
        ));
    }
    if options.run_grasp_vns {
        let mut grasp = Grasp::new(
            per_run,
            master.next_seed(),
            options.rcl_size,
            options.alpha,
            GraspMode::Vns,
        )
        .with_workers(options.workers);
        bags.push(grasp.run(
            inst,
            options.grasp_movement,
            options.stall_cap,
            options.iteration_cap,
            &abort,
            timestamp,
        ));
    }

    let mut solutions: Vec<Solution> = Vec::with_capacity(bags.len());
    let mut discarded = 0usize;
    for mut bag in bags {
        bag.provenance_mut().timestamp = timestamp.to_string();
        let solution = Solution::from_bag(&bag, inst);
        if solution.feasible {
            solutions.push(solution);
        } else {
            discarded += 1;
            warn!(
                "discarding an infeasible {} solution (size {} > capacity {})",
                solution.algorithm,
                solution.size,
                inst.capacity()
            );
        }
    }
    if discarded > 0 {
        info!("{} infeasible solutions were discarded from the portfolio", discarded);
    }
    if solutions.is_empty() {
        solutions.push(Solution::from_bag(&Bag::new(Algorithm::None, timestamp), inst));
    }

    info!(
        "portfolio of {} solutions, best benefit {}",
        solutions.len(),
        solutions.iter().map(|s| s.benefit).max().unwrap_or(0)
    );
    solutions
}
