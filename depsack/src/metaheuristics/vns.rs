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

//! # Variable Neighborhood Search

use super::NEIGHBORHOODS;
use crate::bag::Bag;
use crate::local_search::{LocalSearch, SearchEngine};
use crate::model::ProblemInstance;
use crate::movements;
use crate::random_provider::RandomProvider;
use crate::repair;
use crate::solver::Algorithm;
use crate::Stopper;

use log::*;
use std::time::{Duration, Instant};

/// Perturb a bag: eject `min(k, |members|)` uniformly random members, then pull in up to `k`
/// random outside packages, each admitted only if it fits.
pub(crate) fn shake(
    bag: &Bag,
    k: usize,
    inst: &ProblemInstance,
    rng: &mut RandomProvider,
) -> Bag {
    let mut shaken = bag.clone();
    let mut outside = movements::outside_packages(&shaken, inst);

    for _ in 0..k.min(bag.len()) {
        let members = shaken.members_sorted();
        let victim = members[rng.index(members.len())];
        shaken.remove(inst, victim, inst.deps_of(victim));
    }

    rng.shuffle(&mut outside);
    let mut added = 0;
    for &q in &outside {
        if added >= k {
            break;
        }
        let deps = inst.deps_of(q);
        if shaken.can_add(inst, deps, inst.capacity()) {
            shaken.add(inst, q, deps);
            added += 1;
        }
    }

    shaken
}

/// The shared shake-repair-descend-repair loop, also used by the GRASP+VNS workers. Replaces
/// `best` in place whenever a round improves it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn vns_loop(
    best: &mut Bag,
    inst: &ProblemInstance,
    engine: &mut SearchEngine,
    method: LocalSearch,
    stall_cap: usize,
    iteration_cap: usize,
    deadline: Instant,
    abort: &mut Stopper,
) {
    let mut k = 0;
    while k < NEIGHBORHOODS.len() {
        if Instant::now() >= deadline || abort.try_is_stop().unwrap_or(false) {
            break;
        }

        let mut shaken = shake(best, k + 1, inst, engine.rng_mut());
        repair::repair(&mut shaken, inst, engine.rng_mut());
        engine.local_search(
            &mut shaken,
            inst,
            NEIGHBORHOODS[k],
            method,
            stall_cap,
            iteration_cap,
            deadline,
            abort,
        );
        shaken.provenance_mut().movement = NEIGHBORHOODS[k];
        repair::repair(&mut shaken, inst, engine.rng_mut());

        if shaken.benefit() > best.benefit() {
            trace!("VNS improved to {} with shake strength {}", shaken.benefit(), k + 1);
            *best = shaken;
            k = 0;
        } else {
            k += 1;
        }
    }
}

/// Variable Neighborhood Search with a configurable inner local-search flavor.
#[derive(Debug)]
pub struct Vns {
    budget: Duration,
    method: LocalSearch,
    stall_cap: usize,
    iteration_cap: usize,
    engine: SearchEngine,
}

impl Vns {
    /// Create a VNS run with the default local-search caps (200 stall / 2000 total).
    pub fn new(budget: Duration, seed: u64, method: LocalSearch) -> Self {
        Self {
            budget,
            method,
            stall_cap: 200,
            iteration_cap: 2000,
            engine: SearchEngine::new(seed),
        }
    }

    /// Override the local-search caps.
    pub fn with_caps(mut self, stall_cap: usize, iteration_cap: usize) -> Self {
        self.stall_cap = stall_cap;
        self.iteration_cap = iteration_cap;
        self
    }

    /// Search from the given incumbent. The returned bag never has a lower benefit than the
    /// incumbent.
    pub fn run(&mut self, inst: &ProblemInstance, initial: &Bag, abort: &mut Stopper) -> Bag {
        let start = Instant::now();
        let deadline = start + self.budget;
        let mut best = initial.clone();

        vns_loop(
            &mut best,
            inst,
            &mut self.engine,
            self.method,
            self.stall_cap,
            self.iteration_cap,
            deadline,
            abort,
        );

        let prov = best.provenance_mut();
        prov.algorithm = Algorithm::Vns;
        prov.local_search = self.method;
        prov.seed = self.engine.seed();
        prov.params = format!("k_max={}", NEIGHBORHOODS.len());
        prov.wall_time = start.elapsed();
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProblemInstance;

    fn shared_dep_instance() -> ProblemInstance {
        let mut inst = ProblemInstance::new(10);
        inst.push_package("P0", 20);
        inst.push_package("P1", 11);
        inst.push_package("P2", 11);
        inst.push_dependency("D0", 10);
        inst.push_dependency("D1", 5);
        inst.push_dependency("D2", 5);
        inst.link(0, 0);
        inst.link(1, 1);
        inst.link(2, 2);
        inst
    }

    #[test]
    fn shake_keeps_the_bag_feasible_and_bounded() {
        let inst = shared_dep_instance();
        let mut bag = Bag::new(Algorithm::None, "0");
        bag.add(&inst, 0, inst.deps_of(0));

        let mut rng = RandomProvider::new(3);
        for k in 1..=5 {
            let shaken = shake(&bag, k, &inst, &mut rng);
            assert!(shaken.is_feasible(inst.capacity()));
        }
    }

    #[test]
    fn vns_never_decreases_the_benefit() {
        let inst = shared_dep_instance();
        let mut start = Bag::new(Algorithm::None, "0");
        start.add(&inst, 0, inst.deps_of(0));

        let mut vns =
            Vns::new(Duration::from_millis(200), 7, LocalSearch::BestImprovement).with_caps(20, 50);
        let result = vns.run(&inst, &start, &mut Stopper::new());
        assert!(result.benefit() >= 20);
        assert!(result.is_feasible(inst.capacity()));
        assert_eq!(result.provenance().algorithm, Algorithm::Vns);
    }
}
