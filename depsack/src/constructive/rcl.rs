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

//! Scored restricted-candidate-list construction, the construction phase of the GRASP workers.
//!
//! At every step, each addable candidate is scored by a composite of its benefit per *newly
//! added* union size and its normalized benefit; the score is infinite when the candidate adds
//! no size at all. The top `k` candidates by score form the pool; a threshold
//! `best − α · (best − worst)` cuts the pool down to the restricted candidate list, from which
//! the next package is drawn uniformly. A negative configured α means: redraw α uniformly from
//! `[0, 1)` at every step.

use crate::bag::Bag;
use crate::model::{PackageId, ProblemInstance};
use crate::random_provider::RandomProvider;
use crate::solver::Algorithm;

/// Weights of the two score components.
const RATIO_WEIGHT: f64 = 0.7;
const BENEFIT_WEIGHT: f64 = 0.3;
/// Normalization constant of the benefit component.
const BENEFIT_SCALE: f64 = 1000.0;

/// Scratch buffers reused across the iterations of one worker.
#[derive(Debug, Default)]
pub(crate) struct RclBuffers {
    scores: Vec<(PackageId, f64)>,
    rcl: Vec<PackageId>,
}

impl RclBuffers {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// The greedy score of one candidate against the current bag.
pub(crate) fn greedy_score(inst: &ProblemInstance, bag: &Bag, p: PackageId) -> f64 {
    let added = bag.added_size(inst, inst.deps_of(p));
    if added == 0 {
        return f64::INFINITY;
    }
    let benefit = inst.benefit(p) as f64;
    RATIO_WEIGHT * (benefit / added as f64) + BENEFIT_WEIGHT * (benefit / BENEFIT_SCALE)
}

/// Build one bag by repeated RCL draws. Writes the α actually used in the last step to
/// `alpha_used`.
pub(crate) fn construction_phase(
    inst: &ProblemInstance,
    rng: &mut RandomProvider,
    bufs: &mut RclBuffers,
    rcl_size: usize,
    alpha: f64,
    alpha_used: &mut f64,
    timestamp: &str,
) -> Bag {
    let mut bag = Bag::new(Algorithm::Grasp, timestamp);
    let capacity = inst.capacity();
    let n = inst.num_packages();
    let mut used = vec![false; n];

    loop {
        bufs.scores.clear();
        for p in 0..n {
            if !used[p] && bag.can_add(inst, inst.deps_of(p), capacity) {
                bufs.scores.push((p, greedy_score(inst, &bag, p)));
            }
        }
        if bufs.scores.is_empty() {
            break;
        }

        bufs.scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).expect("greedy scores are never NaN").then(a.0.cmp(&b.0))
        });
        let k = rcl_size.max(1).min(bufs.scores.len());
        let best = bufs.scores[0].1;
        let worst = bufs.scores[k - 1].1;

        let a = if alpha < 0.0 { rng.float() } else { alpha };
        *alpha_used = a;
        let mut threshold = best - a * (best - worst);
        if !threshold.is_finite() {
            // infinite scores in the pool: every pooled candidate qualifies
            threshold = worst;
        }

        bufs.rcl.clear();
        bufs.rcl.extend(
            bufs.scores[..k].iter().filter(|&&(_, s)| s >= threshold).map(|&(p, _)| p),
        );
        if bufs.rcl.is_empty() {
            break;
        }

        let chosen = bufs.rcl[rng.index(bufs.rcl.len())];
        let deps = inst.deps_of(chosen);
        if bag.can_add(inst, deps, capacity) {
            bag.add(inst, chosen, deps);
        }
        used[chosen] = true;
    }

    bag
}
