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

//! # Movements
//!
//! This module contains the neighborhood move operators over a [`Bag`]:
//!
//! - **ADD**: select one more package from outside the bag.
//! - **SWAP 1↔1**: replace one selected package by one outside package.
//! - **SWAP 1↔2**: replace one selected package by two outside packages.
//! - **SWAP 2↔1**: replace two selected packages by one outside package.
//! - **EJECTION CHAIN**: remove one selected package, then greedily refill the freed room with
//!   outside packages in order of descending benefit.
//!
//! Every operator follows the same *predict → compare → maybe-apply* shape: a candidate move is
//! accepted only if it strictly increases the benefit and the read-only `can_*` prediction on
//! the bag says the result stays within capacity. Each operator can be explored with a
//! first-improvement, best-improvement, or random-improvement strategy
//! (see [`LocalSearch`](crate::local_search::LocalSearch)):
//!
//! - *First-improvement* iterates the candidates in a stable order (ascending package ids) and
//!   applies the first accepting move.
//! - *Best-improvement* scans all candidates and applies the one with the largest benefit gain,
//!   preferring the candidate seen first on ties.
//! - *Random-improvement* samples candidates uniformly with replacement, bounded to
//!   `min(200, |in| · |out|)` trials, and applies the first accepting sample.
//!
//! An exploration mutates the bag only when it returns `true` (an accepting move was found and
//! applied); the scan itself is bounded by an evaluation limit and the caller's deadline.

mod add;
mod ejection_chain;
mod swap11;
mod swap12;
mod swap21;

use crate::bag::Bag;
use crate::local_search::LocalSearch;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Instant;

/// How often the heavy candidate scans poll the deadline.
pub(crate) const DEADLINE_STRIDE: usize = 256;

/// Upper bound on the number of samples drawn by a random-improvement exploration.
pub(crate) const RANDOM_TRIALS: usize = 200;

/// The neighborhood move families the local search can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Add one package from outside the bag.
    Add,
    /// Remove one selected package, add one outside package.
    SwapRemove1Add1,
    /// Remove one selected package, add two outside packages.
    SwapRemove1Add2,
    /// Remove two selected packages, add one outside package.
    SwapRemove2Add1,
    /// Remove one selected package, then greedily refill from outside.
    EjectionChain,
    /// No movement (constructive solutions).
    None,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Movement::Add => "ADD",
            Movement::SwapRemove1Add1 => "SWAP_REMOVE_1_ADD_1",
            Movement::SwapRemove1Add2 => "SWAP_REMOVE_1_ADD_2",
            Movement::SwapRemove2Add1 => "SWAP_REMOVE_2_ADD_1",
            Movement::EjectionChain => "EJECTION_CHAIN",
            Movement::None => "NONE",
        })
    }
}

impl Serialize for Movement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Perform one exploration of the given neighborhood with the given strategy. Returns `true` iff
/// an improving feasible move was found and applied to the bag.
pub(crate) fn explore(
    bag: &mut Bag,
    inst: &ProblemInstance,
    movement: Movement,
    method: LocalSearch,
    rng: &mut RandomProvider,
    eval_limit: usize,
    deadline: Instant,
) -> bool {
    match method {
        LocalSearch::None => false,
        LocalSearch::FirstImprovement => match movement {
            Movement::Add => add::first_improvement(bag, inst),
            Movement::SwapRemove1Add1 => swap11::first_improvement(bag, inst, eval_limit, deadline),
            Movement::SwapRemove1Add2 => swap12::first_improvement(bag, inst, eval_limit, deadline),
            Movement::SwapRemove2Add1 => swap21::first_improvement(bag, inst, eval_limit, deadline),
            Movement::EjectionChain => ejection_chain::first_improvement(bag, inst, deadline),
            Movement::None => false,
        },
        LocalSearch::BestImprovement => match movement {
            Movement::Add => add::best_improvement(bag, inst),
            Movement::SwapRemove1Add1 => swap11::best_improvement(bag, inst, eval_limit, deadline),
            Movement::SwapRemove1Add2 => swap12::best_improvement(bag, inst, eval_limit, deadline),
            Movement::SwapRemove2Add1 => swap21::best_improvement(bag, inst, eval_limit, deadline),
            Movement::EjectionChain => ejection_chain::best_improvement(bag, inst, deadline),
            Movement::None => false,
        },
        LocalSearch::RandomImprovement => match movement {
            Movement::Add => add::random_improvement(bag, inst, rng),
            Movement::SwapRemove1Add1 => swap11::random_improvement(bag, inst, rng),
            Movement::SwapRemove1Add2 => swap12::random_improvement(bag, inst, rng),
            Movement::SwapRemove2Add1 => swap21::random_improvement(bag, inst, rng),
            Movement::EjectionChain => ejection_chain::random_improvement(bag, inst, rng),
            Movement::None => false,
        },
    }
}

/// Collect all packages outside the bag, in ascending id order.
pub(crate) fn outside_packages(bag: &Bag, inst: &ProblemInstance) -> Vec<PackageId> {
    (0..inst.num_packages()).filter(|&p| !bag.contains(p)).collect()
}
