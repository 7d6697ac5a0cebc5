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

//! Softmax eviction: the victim is sampled with probability proportional to
//! `exp(inefficiency / T)` at a fixed temperature `T`. Sharper than the rank-based policy when
//! one member is clearly the worst, softer when the field is close.

use super::{inefficiency, EvictionPolicy, RepairStrategy};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

/// Sampling temperature. Exponents are clamped to keep the weights finite.
const TEMPERATURE: f64 = 0.6;
const MAX_EXPONENT: f64 = 50.0;

pub(crate) struct TemperatureBiased;

impl EvictionPolicy for TemperatureBiased {
    fn kind(&self) -> RepairStrategy {
        RepairStrategy::TemperatureBiased
    }

    fn select_victim(
        &mut self,
        bag: &Bag,
        inst: &ProblemInstance,
        rng: &mut RandomProvider,
    ) -> Option<PackageId> {
        let members = bag.members_sorted();
        if members.is_empty() {
            return None;
        }

        let weights: Vec<f64> = members
            .iter()
            .map(|&p| {
                let released = bag.release_size(inst, inst.deps_of(p));
                let x = inefficiency(inst.benefit(p), released) / TEMPERATURE;
                x.min(MAX_EXPONENT).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let mut roll = rng.float() * total;
        for (weight, &p) in weights.iter().zip(members.iter()) {
            roll -= weight;
            if roll <= 0.0 {
                return Some(p);
            }
        }
        members.last().copied()
    }
}
