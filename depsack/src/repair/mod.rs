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

//! # Feasibility Repair
//!
//! An over-full bag is repaired by evicting packages one at a time until the union fits again.
//! Three eviction policies exist; [`repair`] runs each of them on its own clone of the bag and
//! keeps the feasible clone with the highest benefit (ties go to the earlier policy in the order
//! below). If no policy reaches feasibility, the least oversized clone is kept and `false` is
//! returned, so the caller can flag the result as infeasible.
//!
//! - **[`SMART`](smart)**: deterministic; evicts the member with the worst composite of
//!   efficiency (benefit per released size) and inefficiency (released size per benefit).
//! - **[`PROBABILISTIC_GREEDY`](probabilistic_greedy)**: ranks members from least to most
//!   efficient and samples the victim with probability proportional to the inverse rank.
//! - **[`TEMPERATURE_BIASED`](temperature_biased)**: samples the victim from a softmax over the
//!   members' inefficiency at a fixed temperature.
//!
//! The policies only ever see the *released* size of a member (the sizes of the dependencies it
//! holds the last reference to): evicting a package whose dependencies are all shared frees
//! nothing, no matter how large those dependencies are.
//!
//! Adding a policy means implementing [`EvictionPolicy`]; the harness does not change.

mod probabilistic_greedy;
mod smart;
mod temperature_biased;

pub(crate) use probabilistic_greedy::ProbabilisticGreedy;
pub(crate) use smart::Smart;
pub(crate) use temperature_biased::TemperatureBiased;

use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use log::*;
use serde::{Serialize, Serializer};
use std::fmt;

/// The available eviction policies, in tie-breaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairStrategy {
    /// Deterministic composite-score eviction.
    Smart,
    /// Inverse-rank sampling by efficiency.
    ProbabilisticGreedy,
    /// Softmax sampling by inefficiency.
    TemperatureBiased,
    /// No repair was necessary.
    None,
}

impl fmt::Display for RepairStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RepairStrategy::Smart => "SMART",
            RepairStrategy::ProbabilisticGreedy => "PROBABILISTIC_GREEDY",
            RepairStrategy::TemperatureBiased => "TEMPERATURE_BIASED",
            RepairStrategy::None => "NONE",
        })
    }
}

impl Serialize for RepairStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A victim-selection policy. The eviction loop itself is shared by all policies.
pub(crate) trait EvictionPolicy {
    /// The strategy identifier this policy implements.
    fn kind(&self) -> RepairStrategy;

    /// Pick the next member to evict, or `None` if the bag is empty.
    fn select_victim(
        &mut self,
        bag: &Bag,
        inst: &ProblemInstance,
        rng: &mut RandomProvider,
    ) -> Option<PackageId>;
}

/// Benefit gained per released size; infinite when nothing would be released.
pub(crate) fn efficiency(benefit: u64, released: u64) -> f64 {
    if released == 0 {
        f64::INFINITY
    } else {
        benefit as f64 / released as f64
    }
}

/// Released size per benefit; infinite for zero-benefit members holding sizable dependencies.
pub(crate) fn inefficiency(benefit: u64, released: u64) -> f64 {
    if benefit == 0 {
        if released == 0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        released as f64 / benefit as f64
    }
}

fn run_policy(
    bag: &mut Bag,
    inst: &ProblemInstance,
    capacity: u64,
    policy: &mut dyn EvictionPolicy,
    rng: &mut RandomProvider,
) {
    while bag.size() > capacity {
        match policy.select_victim(bag, inst, rng) {
            Some(victim) => {
                bag.remove(inst, victim, inst.deps_of(victim));
            }
            None => break,
        }
    }
}

/// Restore `size ≤ capacity` by evicting packages, testing all three policies on clones and
/// keeping the best feasible outcome. A bag that is already feasible is returned unchanged.
/// Returns `false` iff feasibility could not be restored; the bag then holds the least
/// oversized attempt.
pub fn repair(bag: &mut Bag, inst: &ProblemInstance, rng: &mut RandomProvider) -> bool {
    let capacity = inst.capacity();
    if bag.is_feasible(capacity) {
        return true;
    }
    debug!("repairing a bag of size {} (capacity {})", bag.size(), capacity);

    let mut policies: [Box<dyn EvictionPolicy>; 3] = [
        Box::new(Smart),
        Box::new(ProbabilisticGreedy),
        Box::new(TemperatureBiased),
    ];

    let mut best_feasible: Option<Bag> = None;
    let mut least_oversized: Option<Bag> = None;
    for policy in policies.iter_mut() {
        let mut clone = bag.clone();
        run_policy(&mut clone, inst, capacity, policy.as_mut(), rng);
        clone.provenance_mut().repair = policy.kind();
        if clone.is_feasible(capacity) {
            // strict comparison keeps the earlier policy on ties
            if best_feasible.as_ref().map(|b| clone.benefit() > b.benefit()).unwrap_or(true) {
                best_feasible = Some(clone);
            }
        } else if least_oversized.as_ref().map(|b| clone.size() < b.size()).unwrap_or(true) {
            least_oversized = Some(clone);
        }
    }

    match best_feasible {
        Some(repaired) => {
            *bag = repaired;
            true
        }
        None => {
            warn!(
                "no eviction policy restored feasibility (size {} > capacity {})",
                least_oversized.as_ref().map(|b| b.size()).unwrap_or_else(|| bag.size()),
                capacity
            );
            if let Some(attempt) = least_oversized {
                *bag = attempt;
            }
            false
        }
    }
}
