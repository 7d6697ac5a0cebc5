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

//! Stochastic rank-based eviction: members are ranked from least to most efficient, and the
//! victim is sampled with probability proportional to the inverse of its rank. The worst member
//! is the most likely victim, but any member can be chosen, which lets the harness escape
//! evictions the deterministic policy is blind to.

use super::{efficiency, EvictionPolicy, RepairStrategy};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

pub(crate) struct ProbabilisticGreedy;

impl EvictionPolicy for ProbabilisticGreedy {
    fn kind(&self) -> RepairStrategy {
        RepairStrategy::ProbabilisticGreedy
    }

    fn select_victim(
        &mut self,
        bag: &Bag,
        inst: &ProblemInstance,
        rng: &mut RandomProvider,
    ) -> Option<PackageId> {
        let mut ranked: Vec<(f64, u64, PackageId)> = bag
            .members_sorted()
            .into_iter()
            .map(|p| {
                let released = bag.release_size(inst, inst.deps_of(p));
                (efficiency(inst.benefit(p), released), inst.benefit(p), p)
            })
            .collect();
        if ranked.is_empty() {
            return None;
        }
        ranked.sort_by(|a, b| a.partial_cmp(b).expect("efficiencies are never NaN"));

        let weights: Vec<f64> = (0..ranked.len()).map(|rank| 1.0 / (rank + 1) as f64).collect();
        let total: f64 = weights.iter().sum();
        let mut roll = rng.float() * total;
        for (weight, &(_, _, p)) in weights.iter().zip(ranked.iter()) {
            roll -= weight;
            if roll <= 0.0 {
                return Some(p);
            }
        }
        ranked.last().map(|&(_, _, p)| p)
    }
}
