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

//! # Bag
//!
//! The [`Bag`] is the central mutable solution object: the set of selected packages, the union
//! of their required dependencies, and a per-dependency reference count. The reference counts
//! are what make [`add`](Bag::add) and [`remove`](Bag::remove) cost `O(|deps(p)|)`: a dependency
//! enters the union when its count rises from zero, and leaves it when its count drops back to
//! zero. The total union size and total benefit are cached and maintained incrementally.
//!
//! All mutating and predicting operations take the package's precomputed dependency list as an
//! argument; the bag never looks the adjacency up itself. The `can_*` predictions are strictly
//! read-only.

use crate::local_search::LocalSearch;
use crate::model::{DependencyId, PackageId, ProblemInstance};
use crate::movements::Movement;
use crate::repair::RepairStrategy;
use crate::solver::Algorithm;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Metadata recording how a bag was produced.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// The algorithm that produced this bag.
    pub algorithm: Algorithm,
    /// The local-search flavor used, if any.
    pub local_search: LocalSearch,
    /// The neighborhood movement used, if any.
    pub movement: Movement,
    /// The repair strategy that restored feasibility, if any.
    pub repair: RepairStrategy,
    /// Timestamp of the run that produced this bag.
    pub timestamp: String,
    /// Wall-clock time spent producing this bag.
    pub wall_time: Duration,
    /// The RNG seed of the producing component.
    pub seed: u64,
    /// Free-form parameter string (alpha, RCL size, iteration counts, ...).
    pub params: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::None,
            local_search: LocalSearch::None,
            movement: Movement::None,
            repair: RepairStrategy::None,
            timestamp: String::from("0000-00-00 00:00:00"),
            wall_time: Duration::from_secs(0),
            seed: 0,
            params: String::new(),
        }
    }
}

/// A working solution: the selected packages and the union of their dependencies.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    members: HashSet<PackageId>,
    union_deps: HashSet<DependencyId>,
    refcount: HashMap<DependencyId, u32>,
    size: u64,
    benefit: u64,
    provenance: Provenance,
}

impl Bag {
    /// Create a new, empty bag, ready to be filled by an algorithm.
    pub fn new(algorithm: Algorithm, timestamp: &str) -> Self {
        Self {
            provenance: Provenance {
                algorithm,
                timestamp: timestamp.to_string(),
                ..Provenance::default()
            },
            ..Self::default()
        }
    }

    /// The selected packages.
    pub fn members(&self) -> &HashSet<PackageId> {
        &self.members
    }

    /// The selected packages as a sorted vector. Neighborhood explorations iterate this to get a
    /// stable candidate order.
    pub fn members_sorted(&self) -> Vec<PackageId> {
        let mut v: Vec<PackageId> = self.members.iter().copied().collect();
        v.sort_unstable();
        v
    }

    /// The union of all dependencies required by the selected packages.
    pub fn deps(&self) -> &HashSet<DependencyId> {
        &self.union_deps
    }

    /// How many selected packages require dependency `d` (zero if `d` is not in the union).
    pub fn refcount(&self, d: DependencyId) -> u32 {
        self.refcount.get(&d).copied().unwrap_or(0)
    }

    /// The cached union size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The cached total benefit.
    pub fn benefit(&self) -> u64 {
        self.benefit
    }

    /// Number of selected packages.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no package is selected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether package `p` is selected.
    pub fn contains(&self, p: PackageId) -> bool {
        self.members.contains(&p)
    }

    /// Whether the bag fits into the given capacity.
    pub fn is_feasible(&self, capacity: u64) -> bool {
        self.size <= capacity
    }

    /// The provenance metadata of this bag.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Mutable access to the provenance metadata.
    pub fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    /// Select package `p` with dependency list `deps`. Duplicate adds are silent no-ops
    /// returning `false`.
    pub fn add(&mut self, inst: &ProblemInstance, p: PackageId, deps: &[DependencyId]) -> bool {
        if !self.members.insert(p) {
            return false;
        }
        for &d in deps {
            let rc = self.refcount.entry(d).or_insert(0);
            if *rc == 0 {
                self.union_deps.insert(d);
                self.size += inst.size(d);
            }
            *rc += 1;
        }
        self.benefit += inst.benefit(p);
        true
    }

    /// Deselect package `p` with dependency list `deps`. Missing removes are silent no-ops
    /// returning `false`.
    pub fn remove(&mut self, inst: &ProblemInstance, p: PackageId, deps: &[DependencyId]) -> bool {
        if !self.members.remove(&p) {
            return false;
        }
        for &d in deps {
            if let Some(rc) = self.refcount.get_mut(&d) {
                *rc -= 1;
                if *rc == 0 {
                    self.refcount.remove(&d);
                    self.union_deps.remove(&d);
                    self.size -= inst.size(d);
                }
            }
        }
        self.benefit -= inst.benefit(p);
        true
    }

    /// The size the union would grow by if a package with dependency list `deps` were added.
    pub fn added_size(&self, inst: &ProblemInstance, deps: &[DependencyId]) -> u64 {
        deps.iter().filter(|&&d| self.refcount(d) == 0).map(|&d| inst.size(d)).sum()
    }

    /// The size the union would shrink by if a selected package with dependency list `deps` were
    /// removed: the dependencies it holds the last reference to.
    pub fn release_size(&self, inst: &ProblemInstance, deps: &[DependencyId]) -> u64 {
        deps.iter().filter(|&&d| self.refcount(d) == 1).map(|&d| inst.size(d)).sum()
    }

    /// Whether a package with dependency list `deps` fits without exceeding `capacity`. Strictly
    /// read-only, `O(|deps|)`.
    pub fn can_add(&self, inst: &ProblemInstance, deps: &[DependencyId], capacity: u64) -> bool {
        self.size + self.added_size(inst, deps) <= capacity
    }

    /// Predict, without mutating, whether removing the selected `p_in` and adding the outside
    /// `p_out` keeps the union within `capacity`. Shared dependencies are handled exactly: a
    /// dependency of `p_out` only counts as new if its reference count would be zero *after* the
    /// removal of `p_in`.
    pub fn can_swap_1_1(
        &self,
        inst: &ProblemInstance,
        p_in: PackageId,
        p_out: PackageId,
        capacity: u64,
    ) -> bool {
        let deps_in = inst.deps_of(p_in);
        let deps_out = inst.deps_of(p_out);

        let mut new_size = self.size - self.release_size(inst, deps_in);
        for &d in deps_out {
            let held_by_in = deps_in.binary_search(&d).is_ok() as u32;
            if self.refcount(d).saturating_sub(held_by_in) == 0 {
                new_size += inst.size(d);
            }
        }
        new_size <= capacity
    }

    /// Predict, without mutating, whether removing the selected `p_in` and adding all of the
    /// outside packages `outs` keeps the union within `capacity`.
    pub fn can_swap_1_k(
        &self,
        inst: &ProblemInstance,
        p_in: PackageId,
        outs: &[PackageId],
        capacity: u64,
    ) -> bool {
        let deps_in = inst.deps_of(p_in);
        let mut new_size = self.size - self.release_size(inst, deps_in);

        // a dependency shared between two incoming packages is only paid once
        let mut counted: Vec<DependencyId> = Vec::new();
        for &q in outs {
            for &d in inst.deps_of(q) {
                let held_by_in = deps_in.binary_search(&d).is_ok() as u32;
                if self.refcount(d).saturating_sub(held_by_in) == 0 && !counted.contains(&d) {
                    counted.push(d);
                    new_size += inst.size(d);
                }
            }
        }
        new_size <= capacity
    }

    /// Predict, without mutating, whether removing all of the selected packages `ins` and adding
    /// the outside `p_out` keeps the union within `capacity`.
    pub fn can_swap_k_1(
        &self,
        inst: &ProblemInstance,
        ins: &[PackageId],
        p_out: PackageId,
        capacity: u64,
    ) -> bool {
        // per-dependency count of dropped references
        let mut dropped: Vec<(DependencyId, u32)> = Vec::new();
        for &q in ins {
            for &d in inst.deps_of(q) {
                match dropped.iter_mut().find(|(dep, _)| *dep == d) {
                    Some((_, n)) => *n += 1,
                    None => dropped.push((d, 1)),
                }
            }
        }

        let mut new_size = self.size;
        for &(d, n) in &dropped {
            if self.refcount(d) == n {
                new_size -= inst.size(d);
            }
        }
        for &d in inst.deps_of(p_out) {
            let n = dropped.iter().find(|(dep, _)| *dep == d).map(|&(_, n)| n).unwrap_or(0);
            if self.refcount(d).saturating_sub(n) == 0 {
                new_size += inst.size(d);
            }
        }
        new_size <= capacity
    }

    /// The selected packages whose dependency set is not fully contained in the current union.
    /// With consistent reference counts this is always empty; ejection-chain style moves use it
    /// to reconcile after temporarily breaking the invariant.
    pub fn invalid_members(&self, inst: &ProblemInstance) -> Vec<PackageId> {
        let mut invalid: Vec<PackageId> = self
            .members
            .iter()
            .copied()
            .filter(|&p| inst.deps_of(p).iter().any(|d| !self.union_deps.contains(d)))
            .collect();
        invalid.sort_unstable();
        invalid
    }
}
