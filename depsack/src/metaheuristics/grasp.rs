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

//! # GRASP and GRASP+VNS
//!
//! Multi-start randomized greedy search over parallel worker threads. The only shared mutable
//! state is the best-known bag behind a mutex and two relaxed atomic counters; everything else
//! (RNG stream, scratch buffers, local best) is owned by its worker. Shared-best updates are
//! monotone: a worker never installs a bag that is worse than the current shared best.

use super::vns;
use crate::bag::Bag;
use crate::constructive::rcl::{self, RclBuffers};
use crate::local_search::{LocalSearch, SearchEngine};
use crate::model::ProblemInstance;
use crate::movements::Movement;
use crate::random_provider::RandomProvider;
use crate::solver::Algorithm;
use crate::Stopper;

use log::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Sync the worker-local best into the shared best every N iterations.
const DEFAULT_SYNC_FREQ: u64 = 10;
/// Check the deadline and the stop flag every N iterations.
const DEFAULT_TIME_CHECK_FREQ: u64 = 10;
/// A constructed bag is only intensified when it still has room to grow (or already beats the
/// worker's local best).
const PROMISING_FILL: f64 = 0.95;

/// How a GRASP worker intensifies a freshly constructed bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraspMode {
    /// One best-improvement local search on the caller-chosen neighborhood.
    LocalSearch,
    /// A full VNS loop over all neighborhoods.
    Vns,
}

/// The parallel GRASP metaheuristic (plain, or with VNS intensification).
#[derive(Debug)]
pub struct Grasp {
    budget: Duration,
    rcl_size: usize,
    alpha: f64,
    mode: GraspMode,
    workers: Option<usize>,
    rng: RandomProvider,
}

impl Grasp {
    /// Create a GRASP run. A negative `alpha` redraws the RCL threshold factor uniformly at
    /// every construction step.
    pub fn new(budget: Duration, seed: u64, rcl_size: usize, alpha: f64, mode: GraspMode) -> Self {
        Self {
            budget,
            rcl_size: rcl_size.max(1),
            alpha,
            mode,
            workers: None,
            rng: RandomProvider::new(seed),
        }
    }

    /// Force the worker count instead of deriving it from the hardware and the instance.
    /// `Some(1)` gives a fully deterministic run.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    fn worker_count(&self, inst: &ProblemInstance) -> usize {
        if let Some(n) = self.workers {
            return n.max(1);
        }
        let mut n = num_cpus::get().max(1);
        n = n.min(inst.num_dependencies() / 100 + 1);
        n = n.min(inst.num_packages().max(1));
        if inst.num_packages() < 200 {
            n = n.min(2);
        }
        n
    }

    /// Run the workers until the budget or the per-worker iteration cap is exhausted, and return
    /// the best bag found by any of them.
    pub fn run(
        &mut self,
        inst: &ProblemInstance,
        movement: Movement,
        stall_cap: usize,
        iteration_cap: usize,
        abort: &Stopper,
        timestamp: &str,
    ) -> Bag {
        let algorithm = match self.mode {
            GraspMode::LocalSearch => Algorithm::Grasp,
            GraspMode::Vns => Algorithm::GraspVns,
        };
        if inst.num_packages() == 0 {
            return Bag::new(Algorithm::None, timestamp);
        }

        let start = Instant::now();
        let deadline = start + self.budget;
        let capacity = inst.capacity();

        let best: Mutex<Bag> = Mutex::new(Bag::new(algorithm, timestamp));
        let total_iterations = AtomicU64::new(0);
        let improvements = AtomicU64::new(0);

        let num_workers = self.worker_count(inst);
        let worker_seeds: Vec<u64> = (0..num_workers).map(|_| self.rng.next_seed()).collect();
        info!("spawning {} GRASP workers ({:?} mode)", num_workers, self.mode);

        let (mode, rcl_size, alpha) = (self.mode, self.rcl_size, self.alpha);
        let (best_ref, total_ref, improvements_ref) = (&best, &total_iterations, &improvements);

        thread::scope(|s| {
            for seed in worker_seeds {
                let mut abort = abort.clone();
                s.spawn(move || {
                    let mut engine = SearchEngine::new(seed);
                    let mut bufs = RclBuffers::new();
                    let mut alpha_used = alpha;
                    let mut local_best = best_ref.lock().unwrap().clone();
                    let mut local_iterations: u64 = 0;
                    let mut local_improvements: u64 = 0;

                    while (local_iterations as usize) < iteration_cap {
                        local_iterations += 1;

                        // 1. construction
                        let mut current = rcl::construction_phase(
                            inst,
                            engine.rng_mut(),
                            &mut bufs,
                            rcl_size,
                            alpha,
                            &mut alpha_used,
                            timestamp,
                        );
                        current.provenance_mut().seed = seed;

                        // 2. intensification
                        match mode {
                            GraspMode::LocalSearch => {
                                let promising = (current.size() as f64)
                                    < capacity as f64 * PROMISING_FILL
                                    || current.benefit() > local_best.benefit();
                                if promising {
                                    engine.local_search(
                                        &mut current,
                                        inst,
                                        movement,
                                        LocalSearch::BestImprovement,
                                        stall_cap,
                                        iteration_cap,
                                        deadline,
                                        &mut abort,
                                    );
                                }
                            }
                            GraspMode::Vns => {
                                vns::vns_loop(
                                    &mut current,
                                    inst,
                                    &mut engine,
                                    LocalSearch::BestImprovement,
                                    stall_cap,
                                    iteration_cap,
                                    deadline,
                                    &mut abort,
                                );
                            }
                        }

                        // 3. keep the worker-local best
                        if current.benefit() > local_best.benefit() {
                            local_best = current;
                            local_improvements += 1;
                        }

                        // 4. batched shared-best sync
                        if local_iterations % DEFAULT_SYNC_FREQ == 0 {
                            let mut shared = best_ref.lock().unwrap();
                            if local_best.benefit() > shared.benefit() {
                                *shared = local_best.clone();
                            }
                        }

                        // 5. periodic deadline and stop check
                        if local_iterations % DEFAULT_TIME_CHECK_FREQ == 0
                            && (Instant::now() >= deadline
                                || abort.try_is_stop().unwrap_or(false))
                        {
                            break;
                        }
                    }

                    // 6. final sync
                    {
                        let mut shared = best_ref.lock().unwrap();
                        if local_best.benefit() > shared.benefit() {
                            *shared = local_best.clone();
                        }
                    }
                    total_ref.fetch_add(local_iterations, Ordering::Relaxed);
                    improvements_ref.fetch_add(local_improvements, Ordering::Relaxed);
                });
            }
        });

        let iterations = total_iterations.load(Ordering::Relaxed);
        let improved = improvements.load(Ordering::Relaxed);
        info!("{} completed: {} iterations, {} improvements", algorithm, iterations, improved);

        let alpha_label =
            if self.alpha < 0.0 { "uniform".to_string() } else { format!("{:.2}", self.alpha) };
        let mut best = best.into_inner().unwrap();
        let prov = best.provenance_mut();
        prov.algorithm = algorithm;
        prov.local_search = LocalSearch::None;
        prov.movement = movement;
        prov.seed = self.rng.seed();
        prov.wall_time = start.elapsed();
        prov.params = format!(
            "Alpha: {} | Improvements: {} | RCL size: {} | Total iterations: {}",
            alpha_label, improved, self.rcl_size, iterations
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance() -> ProblemInstance {
        let mut inst = ProblemInstance::new(8);
        inst.push_package("P0", 4);
        inst.push_package("P1", 6);
        inst.push_package("P2", 5);
        inst.push_package("P3", 2);
        inst.push_dependency("D0", 4);
        inst.push_dependency("D1", 4);
        inst.push_dependency("D2", 3);
        inst.link(0, 0);
        inst.link(1, 1);
        inst.link(2, 1);
        inst.link(3, 2);
        inst
    }

    #[test]
    fn single_worker_grasp_is_deterministic() {
        let inst = small_instance();
        let run = |seed| {
            let mut grasp =
                Grasp::new(Duration::from_millis(100), seed, 5, 0.3, GraspMode::LocalSearch)
                    .with_workers(Some(1));
            let bag = grasp.run(
                &inst,
                Movement::SwapRemove1Add1,
                20,
                50,
                &Stopper::new(),
                "0",
            );
            (bag.members_sorted(), bag.benefit(), bag.size())
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn grasp_finds_a_feasible_solution() {
        let inst = small_instance();
        let mut grasp =
            Grasp::new(Duration::from_millis(100), 1, 5, -1.0, GraspMode::Vns).with_workers(None);
        let bag = grasp.run(&inst, Movement::Add, 20, 50, &Stopper::new(), "0");
        assert!(bag.is_feasible(inst.capacity()));
        assert!(bag.benefit() > 0);
        assert_eq!(bag.provenance().algorithm, Algorithm::GraspVns);
    }
}
