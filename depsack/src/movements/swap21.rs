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

//! The 2↔1 swap neighborhood: replace a pair of selected packages by one outside package whose
//! benefit exceeds their combined benefit. Useful when two cheap packages block a dependency
//! that one valuable package could reuse.

use super::{outside_packages, DEADLINE_STRIDE, RANDOM_TRIALS};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use std::time::Instant;

fn apply(bag: &mut Bag, inst: &ProblemInstance, p_a: PackageId, p_b: PackageId, p_out: PackageId) {
    bag.remove(inst, p_a, inst.deps_of(p_a));
    bag.remove(inst, p_b, inst.deps_of(p_b));
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
    if inside.len() < 2 || outside.is_empty() {
        return false;
    }

    let mut evals = 0usize;
    for i in 0..inside.len() {
        for j in (i + 1)..inside.len() {
            let (p_a, p_b) = (inside[i], inside[j]);
            let leaving = inst.benefit(p_a) + inst.benefit(p_b);
            for &p_out in &outside {
                if evals >= eval_limit
                    || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline)
                {
                    return false;
                }
                evals += 1;
                if inst.benefit(p_out) > leaving
                    && bag.can_swap_k_1(inst, &[p_a, p_b], p_out, capacity)
                {
                    apply(bag, inst, p_a, p_b, p_out);
                    return true;
                }
            }
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
    if inside.len() < 2 || outside.is_empty() {
        return false;
    }

    let mut best: Option<(u64, PackageId, PackageId, PackageId)> = None;
    let mut evals = 0usize;
    'scan: for i in 0..inside.len() {
        for j in (i + 1)..inside.len() {
            let (p_a, p_b) = (inside[i], inside[j]);
            let leaving = inst.benefit(p_a) + inst.benefit(p_b);
            for &p_out in &outside {
                if evals >= eval_limit
                    || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline)
                {
                    break 'scan;
                }
                evals += 1;
                if inst.benefit(p_out) <= leaving {
                    continue;
                }
                let gain = inst.benefit(p_out) - leaving;
                if best.map(|(g, _, _, _)| gain > g).unwrap_or(true)
                    && bag.can_swap_k_1(inst, &[p_a, p_b], p_out, capacity)
                {
                    best = Some((gain, p_a, p_b, p_out));
                }
            }
        }
    }
    match best {
        Some((_, p_a, p_b, p_out)) => {
            apply(bag, inst, p_a, p_b, p_out);
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
    if inside.len() < 2 || outside.is_empty() {
        return false;
    }

    let trials = RANDOM_TRIALS.min(inside.len() * outside.len());
    for _ in 0..trials {
        let p_a = inside[rng.index(inside.len())];
        let p_b = inside[rng.index(inside.len())];
        if p_a == p_b {
            continue;
        }
        let p_out = outside[rng.index(outside.len())];
        if inst.benefit(p_out) > inst.benefit(p_a) + inst.benefit(p_b)
            && bag.can_swap_k_1(inst, &[p_a, p_b], p_out, capacity)
        {
            apply(bag, inst, p_a, p_b, p_out);
            return true;
        }
    }
    false
}
