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

use super::fixtures::*;
use crate::model::ProblemInstance;
use crate::solver::{solve, solve_with, Algorithm, SolverOptions};
use crate::Stopper;

use std::time::{Duration, Instant};

#[test]
fn empty_instance_yields_one_empty_solution() {
    let inst = ProblemInstance::new(100);
    let solutions = solve(&inst, Duration::from_millis(50), 1, "0");

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].algorithm, Algorithm::None);
    assert_eq!(solutions[0].benefit, 0);
    assert!(solutions[0].feasible);
}

#[test]
fn portfolio_contains_every_algorithm_family() {
    let inst = &*MEDIUM;
    let solutions = solve(inst, Duration::from_millis(400), 42, "2021-03-01 12:00:00");

    let produced: Vec<Algorithm> = solutions.iter().map(|s| s.algorithm).collect();
    for expected in [
        Algorithm::Random,
        Algorithm::GreedyPackageBenefit,
        Algorithm::GreedyPackageBenefitRatio,
        Algorithm::GreedyPackageSize,
        Algorithm::RandomGreedyPackageBenefit,
        Algorithm::RandomGreedyPackageBenefitRatio,
        Algorithm::RandomGreedyPackageSize,
        Algorithm::Vnd,
        Algorithm::Vns,
        Algorithm::Grasp,
        Algorithm::GraspVns,
    ]
    .iter()
    {
        assert!(produced.contains(expected), "missing {}", expected);
    }
    assert_eq!(produced.iter().filter(|&&a| a == Algorithm::Vns).count(), 3);
}

#[test]
fn every_returned_solution_is_feasible_and_self_consistent() {
    let inst = &*MEDIUM;
    let solutions = solve(inst, Duration::from_millis(300), 7, "0");

    for s in &solutions {
        assert!(s.feasible);
        assert!(s.size <= inst.capacity());

        // the bit-vectors agree with the scalar fields
        let benefit: u64 = s
            .packages
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(p, _)| inst.benefit(p))
            .sum();
        assert_eq!(benefit, s.benefit);
        let size: u64 = s
            .dependencies
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(d, _)| inst.size(d))
            .sum();
        assert_eq!(size, s.size);
    }
}

#[test]
fn improvement_solutions_never_fall_below_the_constructive_best() {
    let inst = &*MEDIUM;
    let solutions = solve(inst, Duration::from_millis(300), 3, "0");

    let constructive_best = solutions
        .iter()
        .filter(|s| {
            !matches!(
                s.algorithm,
                Algorithm::Vnd | Algorithm::Vns | Algorithm::Grasp | Algorithm::GraspVns
            )
        })
        .map(|s| s.benefit)
        .max()
        .unwrap();
    for s in solutions.iter().filter(|s| matches!(s.algorithm, Algorithm::Vnd | Algorithm::Vns)) {
        assert!(s.benefit >= constructive_best, "{} fell below the incumbent", s.algorithm);
    }
}

#[test]
fn single_worker_portfolio_is_deterministic() {
    let inst = &*MEDIUM;
    // small iteration caps and a generous budget: every phase terminates by its caps, so the
    // deadline never cuts a run short and both portfolios take the exact same path
    let options = SolverOptions {
        workers: Some(1),
        stall_cap: 10,
        iteration_cap: 20,
        ..SolverOptions::default()
    };

    let run = || {
        solve_with(
            inst,
            Duration::from_secs(60),
            42,
            "2021-03-01 12:00:00",
            options.clone(),
            Stopper::new(),
        )
        .into_iter()
        .map(|s| (s.algorithm, s.packages, s.dependencies, s.benefit, s.size))
        .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn solver_respects_the_budget() {
    let inst = &*MEDIUM;
    let budget = Duration::from_millis(100);

    let start = Instant::now();
    let solutions = solve(inst, budget, 9, "0");
    let elapsed = start.elapsed();

    assert!(!solutions.is_empty());
    assert!(
        elapsed < budget.mul_f64(1.5),
        "solver took {:?} for a budget of {:?}",
        elapsed,
        budget
    );
}

#[test]
fn stop_request_short_circuits_the_whole_portfolio() {
    let inst = &*MEDIUM;
    let stopper = Stopper::new();
    stopper.send_stop();

    let start = Instant::now();
    let solutions = solve_with(
        inst,
        Duration::from_secs(5),
        1,
        "0",
        SolverOptions::default(),
        stopper,
    );
    // all phases observe the stop flag and return early
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(!solutions.is_empty());
}

#[test]
fn grasp_passes_can_be_disabled() {
    let inst = &*MEDIUM;
    let options =
        SolverOptions { run_grasp: false, run_grasp_vns: false, ..SolverOptions::default() };
    let solutions =
        solve_with(inst, Duration::from_millis(200), 4, "0", options, Stopper::new());

    assert!(solutions
        .iter()
        .all(|s| !matches!(s.algorithm, Algorithm::Grasp | Algorithm::GraspVns)));
}
