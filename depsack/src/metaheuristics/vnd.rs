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

//! # Variable Neighborhood Descent

use super::NEIGHBORHOODS;
use crate::bag::Bag;
use crate::local_search::{LocalSearch, SearchEngine};
use crate::model::ProblemInstance;
use crate::repair;
use crate::solver::Algorithm;
use crate::Stopper;

use log::*;
use std::time::{Duration, Instant};

/// Variable Neighborhood Descent over the fixed neighborhood order
/// [`NEIGHBORHOODS`](super::NEIGHBORHOODS).
#[derive(Debug)]
pub struct Vnd {
    budget: Duration,
    stall_cap: usize,
    iteration_cap: usize,
    engine: SearchEngine,
}

impl Vnd {
    /// Create a VND run with the default local-search caps (200 stall / 2000 total).
    pub fn new(budget: Duration, seed: u64) -> Self {
        Self { budget, stall_cap: 200, iteration_cap: 2000, engine: SearchEngine::new(seed) }
    }

    /// Override the local-search caps.
    pub fn with_caps(mut self, stall_cap: usize, iteration_cap: usize) -> Self {
        self.stall_cap = stall_cap;
        self.iteration_cap = iteration_cap;
        self
    }

    /// Descend from the given incumbent. The returned bag never has a lower benefit than the
    /// incumbent.
    pub fn run(&mut self, inst: &ProblemInstance, initial: &Bag, abort: &mut Stopper) -> Bag {
        let start = Instant::now();
        let deadline = start + self.budget;
        let mut best = initial.clone();

        let mut k = 0;
        while k < NEIGHBORHOODS.len() {
            if Instant::now() >= deadline || abort.try_is_stop().unwrap_or(false) {
                break;
            }

            let mut candidate = best.clone();
            self.engine.local_search(
                &mut candidate,
                inst,
                NEIGHBORHOODS[k],
                LocalSearch::BestImprovement,
                self.stall_cap,
                self.iteration_cap,
                deadline,
                abort,
            );
            candidate.provenance_mut().movement = NEIGHBORHOODS[k];
            repair::repair(&mut candidate, inst, self.engine.rng_mut());

            if candidate.benefit() > best.benefit() {
                trace!("VND improved to {} in neighborhood {}", candidate.benefit(), k);
                best = candidate;
                k = 0; // restart from the first neighborhood
            } else {
                k += 1; // move to the next neighborhood
            }
        }

        let prov = best.provenance_mut();
        prov.algorithm = Algorithm::Vnd;
        prov.local_search = LocalSearch::None;
        prov.seed = self.engine.seed();
        prov.params = format!("k_max={}", NEIGHBORHOODS.len());
        prov.wall_time = start.elapsed();
        best
    }
}
