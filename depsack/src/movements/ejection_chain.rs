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

//! The ejection-chain neighborhood: tentatively eject one selected package, then greedily refill
//! the freed room with outside packages in order of descending benefit. The chain commits iff
//! the refilled bag beats the original benefit, and reverts otherwise.

use super::{outside_packages, RANDOM_TRIALS};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use std::time::Instant;

/// Outside packages sorted by descending benefit (ties by ascending id, for stability).
fn outside_by_benefit(bag: &Bag, inst: &ProblemInstance) -> Vec<PackageId> {
    let mut outside = outside_packages(bag, inst);
    outside.sort_by_key(|&p| (std::cmp::Reverse(inst.benefit(p)), p));
    outside
}

/// Run one chain rooted at `p_in` in place. Returns `true` and leaves the bag modified if the
/// chain improved the benefit; reverts the bag and returns `false` otherwise.
fn try_chain(
    bag: &mut Bag,
    inst: &ProblemInstance,
    p_in: PackageId,
    refill: &[PackageId],
) -> bool {
    let capacity = inst.capacity();
    let before = bag.benefit();

    bag.remove(inst, p_in, inst.deps_of(p_in));
    let mut added: Vec<PackageId> = Vec::new();
    for &q in refill {
        if q == p_in {
            continue;
        }
        let deps = inst.deps_of(q);
        if bag.can_add(inst, deps, capacity) && bag.add(inst, q, deps) {
            added.push(q);
        }
    }

    if bag.benefit() > before {
        debug_assert!(bag.invalid_members(inst).is_empty());
        return true;
    }

    // revert
    for &q in &added {
        bag.remove(inst, q, inst.deps_of(q));
    }
    bag.add(inst, p_in, inst.deps_of(p_in));
    false
}

pub(crate) fn first_improvement(bag: &mut Bag, inst: &ProblemInstance, deadline: Instant) -> bool {
    let inside = bag.members_sorted();
    if inside.is_empty() {
        return false;
    }
    let refill = outside_by_benefit(bag, inst);

    for &p_in in &inside {
        if Instant::now() >= deadline {
            return false;
        }
        if try_chain(bag, inst, p_in, &refill) {
            return true;
        }
    }
    false
}

pub(crate) fn best_improvement(bag: &mut Bag, inst: &ProblemInstance, deadline: Instant) -> bool {
    let inside = bag.members_sorted();
    if inside.is_empty() {
        return false;
    }
    let refill = outside_by_benefit(bag, inst);

    let mut best: Option<Bag> = None;
    for &p_in in &inside {
        if Instant::now() >= deadline {
            break;
        }
        let mut candidate = bag.clone();
        if try_chain(&mut candidate, inst, p_in, &refill) {
            let top = best.as_ref().map(|b| b.benefit()).unwrap_or_else(|| bag.benefit());
            if candidate.benefit() > top {
                best = Some(candidate);
            }
        }
    }
    match best {
        Some(improved) => {
            *bag = improved;
            true
        }
        None => false,
    }
}

pub(crate) fn random_improvement(
    bag: &mut Bag,
    inst: &ProblemInstance,
    rng: &mut RandomProvider,
) -> bool {
    let inside = bag.members_sorted();
    if inside.is_empty() {
        return false;
    }
    let refill = outside_by_benefit(bag, inst);

    let trials = RANDOM_TRIALS.min(inside.len());
    for _ in 0..trials {
        let p_in = inside[rng.index(inside.len())];
        if try_chain(bag, inst, p_in, &refill) {
            return true;
        }
    }
    false
}
