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

//! # Metaheuristics
//!
//! Improvement procedures over an incumbent bag, each bounded by a wall-clock budget and a
//! [`Stopper`](crate::Stopper). The following metaheuristics exist:
//!
//! - **[`Vnd`]** (Variable Neighborhood Descent): deterministically cycles through the fixed
//!   neighborhood order below, running a best-improvement local search on a clone of the
//!   incumbent and repairing it. An improvement replaces the incumbent and restarts the cycle;
//!   otherwise the next neighborhood is tried. Stops after a full unproductive cycle.
//!
//! - **[`Vns`]** (Variable Neighborhood Search): like VND, but escapes local optima by *shaking*
//!   the incumbent first: `k` random members are ejected and up to `k` random outside packages
//!   pulled in, with `k` growing on every unproductive round. The shaken clone is repaired,
//!   descended with a local search on the `k`-th neighborhood, and repaired again.
//!
//! - **[`Grasp`]**: multi-start search over parallel workers. Every worker iteration builds a
//!   fresh bag with the scored RCL construction and intensifies it, either with a single
//!   best-improvement local search ([`GraspMode::LocalSearch`]) or with a full VNS loop
//!   ([`GraspMode::Vns`]). Workers keep a private best and periodically sync it into a
//!   mutex-guarded shared best; each worker owns an RNG stream derived from the master seed.

mod grasp;
mod vnd;
mod vns;

pub use grasp::{Grasp, GraspMode};
pub use vnd::Vnd;
pub use vns::Vns;

use crate::movements::Movement;

/// The neighborhood order used by VND and VNS.
pub const NEIGHBORHOODS: [Movement; 5] = [
    Movement::Add,
    Movement::SwapRemove1Add1,
    Movement::SwapRemove1Add2,
    Movement::SwapRemove2Add1,
    Movement::EjectionChain,
];
