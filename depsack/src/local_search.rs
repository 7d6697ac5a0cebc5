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

//! # Local Search
//!
//! The [`SearchEngine`] repeatedly invokes one neighborhood movement against a bag until one of
//! four conditions holds: the consecutive-no-improvement count reaches the stall cap, the total
//! iteration count reaches the iteration cap, the deadline passes, or a stop was requested. The
//! deadline is authoritative: it is checked on every iteration here, and the heavy candidate
//! scans inside the movements poll it as well.

use crate::bag::Bag;
use crate::model::ProblemInstance;
use crate::movements::{self, Movement};
use crate::random_provider::RandomProvider;
use crate::Stopper;

use log::*;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Instant;

/// The exploration strategy of a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalSearch {
    /// Accept the first improving feasible candidate, in a stable scan order.
    FirstImprovement,
    /// Scan all candidates and accept the largest improvement (ties: first seen).
    BestImprovement,
    /// Sample candidates uniformly, bounded, and accept the first improving one.
    RandomImprovement,
    /// Do not search.
    None,
}

impl fmt::Display for LocalSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalSearch::FirstImprovement => "FIRST_IMPROVEMENT",
            LocalSearch::BestImprovement => "BEST_IMPROVEMENT",
            LocalSearch::RandomImprovement => "RANDOM_IMPROVEMENT",
            LocalSearch::None => "NONE",
        })
    }
}

impl Serialize for LocalSearch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Drives neighborhood explorations against a bag, with its own RNG stream.
#[derive(Debug)]
pub struct SearchEngine {
    rng: RandomProvider,
}

impl SearchEngine {
    /// Create an engine with its own RNG stream derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: RandomProvider::new(seed) }
    }

    /// The seed of this engine's RNG stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The engine's RNG stream (shared with the stochastic repair policies).
    pub fn rng_mut(&mut self) -> &mut RandomProvider {
        &mut self.rng
    }

    /// Iterate the given movement with the given strategy until the stall cap, the iteration
    /// cap, the deadline, or a stop request is hit. The bag's benefit never decreases. Returns
    /// `true` iff at least one improving move was applied.
    #[allow(clippy::too_many_arguments)]
    pub fn local_search(
        &mut self,
        bag: &mut Bag,
        inst: &ProblemInstance,
        movement: Movement,
        method: LocalSearch,
        stall_cap: usize,
        iteration_cap: usize,
        deadline: Instant,
        abort: &mut Stopper,
    ) -> bool {
        let mut improved_once = false;
        let mut iterations = 0usize;
        let mut stalled = 0usize;
        let eval_limit = iteration_cap.max(movements::RANDOM_TRIALS) * 10;

        while iterations < iteration_cap {
            if Instant::now() >= deadline {
                trace!("local search on {} hit the deadline", movement);
                break;
            }
            if abort.try_is_stop().unwrap_or(false) {
                debug!("local search on {} was aborted", movement);
                break;
            }

            let improved = movements::explore(
                bag,
                inst,
                movement,
                method,
                &mut self.rng,
                eval_limit,
                deadline,
            );
            iterations += 1;

            if improved {
                improved_once = true;
                stalled = 0;
            } else {
                stalled += 1;
                if stalled >= stall_cap {
                    break;
                }
            }
        }

        trace!(
            "local search {} / {}: {} iterations, benefit {}",
            movement,
            method,
            iterations,
            bag.benefit()
        );
        improved_once
    }
}
