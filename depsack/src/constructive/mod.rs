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

//! # Constructive Heuristics
//!
//! Initial bags are built from an empty bag and a mutable candidate list:
//!
//! - **Random construction** draws a uniformly random remaining candidate and admits it only if
//!   it fits.
//! - **Greedy construction** pre-sorts the candidates by one of three orders (descending
//!   benefit, descending benefit-to-standalone-size ratio, ascending standalone size) and pops
//!   from the front.
//! - **Semi-random greedy construction** pre-sorts the same way but picks uniformly among the
//!   first [`SEMI_RANDOM_POOL`] remaining candidates.
//!
//! A picked candidate is admitted only if it fits next to the current union; a candidate that
//! does not fit is dropped for good. Every construction is followed by a short two-phase local
//! search (1↔1 swaps, then ejection chains) and a repair; the overall time budget is split
//! 80/10/10 over the three phases.
//!
//! The scored restricted-candidate-list construction used by the GRASP workers lives in
//! [`rcl`](self::rcl).

pub(crate) mod rcl;

use crate::bag::Bag;
use crate::local_search::{LocalSearch, SearchEngine};
use crate::model::{PackageId, ProblemInstance};
use crate::movements::Movement;
use crate::repair;
use crate::solver::Algorithm;
use crate::Stopper;

use log::*;
use std::time::{Duration, Instant};

/// Pool size of the semi-random picker: candidates are drawn uniformly from the first ten
/// remaining entries of the sorted list.
pub const SEMI_RANDOM_POOL: usize = 10;

/// Stall and iteration caps of the two post-construction search phases.
const POST_SEARCH_STALL: usize = 10;
const POST_SEARCH_ITERATIONS: usize = 20;

/// Share of the budget spent constructing; the two post-search phases get the rest, split
/// evenly.
const CONSTRUCTION_FRACTION: f64 = 0.8;

#[derive(Clone, Copy)]
enum Picker {
    Random,
    Top,
    SemiRandom(usize),
}

/// Builds initial bags for one problem instance under a per-run time budget.
pub struct Constructive<'a> {
    inst: &'a ProblemInstance,
    budget: Duration,
    engine: SearchEngine,
    timestamp: String,
}

impl<'a> Constructive<'a> {
    /// Create a builder with its own RNG stream.
    pub fn new(inst: &'a ProblemInstance, budget: Duration, seed: u64, timestamp: &str) -> Self {
        Self { inst, budget, engine: SearchEngine::new(seed), timestamp: timestamp.to_string() }
    }

    /// One bag built by uniformly random picks.
    pub fn random_bag(&mut self, abort: &mut Stopper) -> Bag {
        let candidates: Vec<PackageId> = (0..self.inst.num_packages()).collect();
        self.fill(candidates, Picker::Random, Algorithm::Random, abort)
    }

    /// Three greedy bags, one per sort order.
    pub fn greedy_bags(&mut self, abort: &mut Stopper) -> Vec<Bag> {
        vec![
            self.fill(
                self.sorted_by_benefit(),
                Picker::Top,
                Algorithm::GreedyPackageBenefit,
                abort,
            ),
            self.fill(
                self.sorted_by_ratio(),
                Picker::Top,
                Algorithm::GreedyPackageBenefitRatio,
                abort,
            ),
            self.fill(self.sorted_by_size(), Picker::Top, Algorithm::GreedyPackageSize, abort),
        ]
    }

    /// Three semi-random greedy bags, one per sort order.
    pub fn semi_random_bags(&mut self, abort: &mut Stopper) -> Vec<Bag> {
        let picker = Picker::SemiRandom(SEMI_RANDOM_POOL);
        vec![
            self.fill(
                self.sorted_by_benefit(),
                picker,
                Algorithm::RandomGreedyPackageBenefit,
                abort,
            ),
            self.fill(
                self.sorted_by_ratio(),
                picker,
                Algorithm::RandomGreedyPackageBenefitRatio,
                abort,
            ),
            self.fill(self.sorted_by_size(), picker, Algorithm::RandomGreedyPackageSize, abort),
        ]
    }

    /// Package ids by descending benefit (ties by id).
    pub fn sorted_by_benefit(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = (0..self.inst.num_packages()).collect();
        ids.sort_by_key(|&p| (std::cmp::Reverse(self.inst.benefit(p)), p));
        ids
    }

    /// Package ids by descending benefit-to-standalone-size ratio (ties by id). A package
    /// without dependencies counts its bare benefit as the ratio.
    pub fn sorted_by_ratio(&self) -> Vec<PackageId> {
        let ratio = |p: PackageId| -> f64 {
            let standalone = self.inst.standalone_size(p);
            if standalone > 0 {
                self.inst.benefit(p) as f64 / standalone as f64
            } else {
                self.inst.benefit(p) as f64
            }
        };
        let mut ids: Vec<PackageId> = (0..self.inst.num_packages()).collect();
        ids.sort_by(|&a, &b| {
            ratio(b).partial_cmp(&ratio(a)).expect("ratios are never NaN").then(a.cmp(&b))
        });
        ids
    }

    /// Package ids by ascending standalone size (ties by id).
    pub fn sorted_by_size(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = (0..self.inst.num_packages()).collect();
        ids.sort_by_key(|&p| (self.inst.standalone_size(p), p));
        ids
    }

    fn fill(
        &mut self,
        mut candidates: Vec<PackageId>,
        picker: Picker,
        algorithm: Algorithm,
        abort: &mut Stopper,
    ) -> Bag {
        let start = Instant::now();
        let mut bag = Bag::new(algorithm, &self.timestamp);
        bag.provenance_mut().seed = self.engine.seed();
        let capacity = self.inst.capacity();

        let construction_deadline = start + self.budget.mul_f64(CONSTRUCTION_FRACTION);
        let local1_deadline =
            start + self.budget.mul_f64(CONSTRUCTION_FRACTION + (1.0 - CONSTRUCTION_FRACTION) / 2.0);
        let local2_deadline = start + self.budget;

        while !candidates.is_empty() {
            if Instant::now() >= construction_deadline || abort.try_is_stop().unwrap_or(false) {
                break;
            }
            let p = match self.pick(picker, &mut candidates) {
                Some(p) => p,
                None => break,
            };
            let deps = self.inst.deps_of(p);
            if bag.can_add(self.inst, deps, capacity) {
                bag.add(self.inst, p, deps);
            }
        }

        self.engine.local_search(
            &mut bag,
            self.inst,
            Movement::SwapRemove1Add1,
            LocalSearch::FirstImprovement,
            POST_SEARCH_STALL,
            POST_SEARCH_ITERATIONS,
            local1_deadline,
            abort,
        );
        self.engine.local_search(
            &mut bag,
            self.inst,
            Movement::EjectionChain,
            LocalSearch::FirstImprovement,
            POST_SEARCH_STALL,
            POST_SEARCH_ITERATIONS,
            local2_deadline,
            abort,
        );
        repair::repair(&mut bag, self.inst, self.engine.rng_mut());

        bag.provenance_mut().wall_time = start.elapsed();
        debug!(
            "{} built a bag: {} packages, size {}, benefit {}",
            algorithm,
            bag.len(),
            bag.size(),
            bag.benefit()
        );
        bag
    }

    fn pick(&mut self, picker: Picker, candidates: &mut Vec<PackageId>) -> Option<PackageId> {
        if candidates.is_empty() {
            return None;
        }
        let idx = match picker {
            Picker::Random => self.engine.rng_mut().index(candidates.len()),
            Picker::Top => 0,
            Picker::SemiRandom(pool) => self.engine.rng_mut().index(pool.min(candidates.len())),
        };
        Some(candidates.remove(idx))
    }
}
