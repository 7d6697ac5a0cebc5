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

//! Deterministic composite-score eviction: each member is scored
//! `efficiency − inefficiency`, and the lowest score is evicted first. Members that release
//! nothing score `+∞` (evicting them cannot help), zero-benefit members holding the last
//! reference to some dependency score `−∞` (evicting them is free). Ties are broken towards the
//! lower benefit, then the lower id.

use super::{efficiency, inefficiency, EvictionPolicy, RepairStrategy};
use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;

pub(crate) struct Smart;

/// The composite removal score of one member; lower means evicted earlier.
pub(crate) fn smart_score(benefit: u64, released: u64) -> f64 {
    match (released == 0, benefit == 0) {
        (true, true) => 0.0,
        (true, false) => f64::INFINITY,
        (false, true) => f64::NEG_INFINITY,
        (false, false) => efficiency(benefit, released) - inefficiency(benefit, released),
    }
}

impl EvictionPolicy for Smart {
    fn kind(&self) -> RepairStrategy {
        RepairStrategy::Smart
    }

    fn select_victim(
        &mut self,
        bag: &Bag,
        inst: &ProblemInstance,
        _rng: &mut RandomProvider,
    ) -> Option<PackageId> {
        bag.members_sorted()
            .into_iter()
            .map(|p| {
                let released = bag.release_size(inst, inst.deps_of(p));
                (smart_score(inst.benefit(p), released), inst.benefit(p), p)
            })
            .min_by(|a, b| a.partial_cmp(b).expect("smart scores are never NaN"))
            .map(|(_, _, p)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn score_orders_inefficient_members_first() {
        // benefit 1 for 3 released units is far worse than benefit 10 for 5
        assert!(smart_score(1, 3) < smart_score(10, 5));
        assert_approx_eq!(smart_score(10, 5), 2.0 - 0.5);
    }

    #[test]
    fn score_boundaries() {
        assert_eq!(smart_score(5, 0), f64::INFINITY);
        assert_eq!(smart_score(0, 5), f64::NEG_INFINITY);
        assert_eq!(smart_score(0, 0), 0.0);
    }
}
