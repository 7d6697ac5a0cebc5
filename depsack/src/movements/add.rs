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

//! The ADD neighborhood: select one more package. A candidate improves iff its benefit is
//! positive; it is feasible iff it fits next to the current union.

use super::{outside_packages, RANDOM_TRIALS};
use crate::bag::Bag;
use crate::model::ProblemInstance;
use crate::random_provider::RandomProvider;

pub(crate) fn first_improvement(bag: &mut Bag, inst: &ProblemInstance) -> bool {
    let capacity = inst.capacity();
    for p in 0..inst.num_packages() {
        if bag.contains(p) || inst.benefit(p) == 0 {
            continue;
        }
        let deps = inst.deps_of(p);
        if bag.can_add(inst, deps, capacity) {
            bag.add(inst, p, deps);
            return true;
        }
    }
    false
}

pub(crate) fn best_improvement(bag: &mut Bag, inst: &ProblemInstance) -> bool {
    let capacity = inst.capacity();
    let mut best: Option<(u64, usize)> = None;
    for p in 0..inst.num_packages() {
        if bag.contains(p) || inst.benefit(p) == 0 {
            continue;
        }
        if bag.can_add(inst, inst.deps_of(p), capacity)
            && best.map(|(gain, _)| inst.benefit(p) > gain).unwrap_or(true)
        {
            best = Some((inst.benefit(p), p));
        }
    }
    match best {
        Some((_, p)) => {
            bag.add(inst, p, inst.deps_of(p));
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
    let capacity = inst.capacity();
    let outside = outside_packages(bag, inst);
    if outside.is_empty() {
        return false;
    }
    let trials = RANDOM_TRIALS.min(outside.len());
    for _ in 0..trials {
        let p = outside[rng.index(outside.len())];
        if inst.benefit(p) == 0 {
            continue;
        }
        let deps = inst.deps_of(p);
        if bag.can_add(inst, deps, capacity) {
            bag.add(inst, p, deps);
            return true;
        }
    }
    false
}
