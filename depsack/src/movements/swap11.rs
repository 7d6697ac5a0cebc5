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

//! The 1↔1 swap neighborhood: replace one selected package by one outside package with a higher
//! benefit, if the predicted union still fits.

use super::{outside_packages, DEADLINE_STRIDE, RANDOM_TRIALS};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use itertools::iproduct;
use std::time::Instant;

fn apply(bag: &mut Bag, inst: &ProblemInstance, p_in: PackageId, p_out: PackageId) {
    bag.remove(inst, p_in, inst.deps_of(p_in));
    bag.add(inst, p_out, inst.deps_of(p_out));
}

pub(crate) fn first_improvement(
    bag: &mut Bag,
    inst: &ProblemInstance,
    eval_limit: usize,
    deadline: Instant,
) -> bool {
    let capacity = inst.capacity();
    let inside = bag.members_sorted();
    let outside = outside_packages(bag, inst);
    if inside.is_empty() || outside.is_empty() {
        return false;
    }

    for (evals, (&p_in, &p_out)) in iproduct!(inside.iter(), outside.iter()).enumerate() {
        if evals >= eval_limit || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline) {
            break;
        }
        if inst.benefit(p_out) > inst.benefit(p_in)
            && bag.can_swap_1_1(inst, p_in, p_out, capacity)
        {
            apply(bag, inst, p_in, p_out);
            return true;
        }
    }
    false
}

pub(crate) fn best_improvement(
    bag: &mut Bag,
    inst: &ProblemInstance,
    eval_limit: usize,
    deadline: Instant,
) -> bool {
    let capacity = inst.capacity();
    let inside = bag.members_sorted();
    let outside = outside_packages(bag, inst);
    if inside.is_empty() || outside.is_empty() {
        return false;
    }

    let mut best: Option<(u64, PackageId, PackageId)> = None;
    for (evals, (&p_in, &p_out)) in iproduct!(inside.iter(), outside.iter()).enumerate() {
        if evals >= eval_limit || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline) {
            break;
        }
        if inst.benefit(p_out) <= inst.benefit(p_in) {
            continue;
        }
        let gain = inst.benefit(p_out) - inst.benefit(p_in);
        if best.map(|(g, _, _)| gain > g).unwrap_or(true)
            && bag.can_swap_1_1(inst, p_in, p_out, capacity)
        {
            best = Some((gain, p_in, p_out));
        }
    }
    match best {
        Some((_, p_in, p_out)) => {
            apply(bag, inst, p_in, p_out);
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
    let inside = bag.members_sorted();
    let outside = outside_packages(bag, inst);
    if inside.is_empty() || outside.is_empty() {
        return false;
    }

    let trials = RANDOM_TRIALS.min(inside.len() * outside.len());
    for _ in 0..trials {
        let p_in = inside[rng.index(inside.len())];
        let p_out = outside[rng.index(outside.len())];
        if inst.benefit(p_out) > inst.benefit(p_in)
            && bag.can_swap_1_1(inst, p_in, p_out, capacity)
        {
            apply(bag, inst, p_in, p_out);
            return true;
        }
    }
    false
}
