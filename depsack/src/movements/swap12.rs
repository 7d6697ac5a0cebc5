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

//! The 1↔2 swap neighborhood: replace one selected package by a pair of outside packages whose
//! combined benefit is higher.

use super::{outside_packages, DEADLINE_STRIDE, RANDOM_TRIALS};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

use std::time::Instant;

fn apply(bag: &mut Bag, inst: &ProblemInstance, p_in: PackageId, a: PackageId, b: PackageId) {
    bag.remove(inst, p_in, inst.deps_of(p_in));
    bag.add(inst, a, inst.deps_of(a));
    bag.add(inst, b, inst.deps_of(b));
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
    if inside.is_empty() || outside.len() < 2 {
        return false;
    }

    let mut evals = 0usize;
    for &p_in in &inside {
        for i in 0..outside.len() {
            for j in (i + 1)..outside.len() {
                if evals >= eval_limit
                    || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline)
                {
                    return false;
                }
                evals += 1;
                let (a, b) = (outside[i], outside[j]);
                if inst.benefit(a) + inst.benefit(b) > inst.benefit(p_in)
                    && bag.can_swap_1_k(inst, p_in, &[a, b], capacity)
                {
                    apply(bag, inst, p_in, a, b);
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
    if inside.is_empty() || outside.len() < 2 {
        return false;
    }

    let mut best: Option<(u64, PackageId, PackageId, PackageId)> = None;
    let mut evals = 0usize;
    'scan: for &p_in in &inside {
        for i in 0..outside.len() {
            for j in (i + 1)..outside.len() {
                if evals >= eval_limit
                    || (evals % DEADLINE_STRIDE == 0 && Instant::now() >= deadline)
                {
                    break 'scan;
                }
                evals += 1;
                let (a, b) = (outside[i], outside[j]);
                let incoming = inst.benefit(a) + inst.benefit(b);
                if incoming <= inst.benefit(p_in) {
                    continue;
                }
                let gain = incoming - inst.benefit(p_in);
                if best.map(|(g, _, _, _)| gain > g).unwrap_or(true)
                    && bag.can_swap_1_k(inst, p_in, &[a, b], capacity)
                {
                    best = Some((gain, p_in, a, b));
                }
            }
        }
    }
    match best {
        Some((_, p_in, a, b)) => {
            apply(bag, inst, p_in, a, b);
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
    if inside.is_empty() || outside.len() < 2 {
        return false;
    }

    let trials = RANDOM_TRIALS.min(inside.len() * outside.len());
    for _ in 0..trials {
        let p_in = inside[rng.index(inside.len())];
        let a = outside[rng.index(outside.len())];
        let b = outside[rng.index(outside.len())];
        if a == b {
            continue;
        }
        if inst.benefit(a) + inst.benefit(b) > inst.benefit(p_in)
            && bag.can_swap_1_k(inst, p_in, &[a, b], capacity)
        {
            apply(bag, inst, p_in, a, b);
            return true;
        }
    }
    false
}
