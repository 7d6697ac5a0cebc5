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

//! Shared problem instances for the test modules.

use crate::model::ProblemInstance;

use lazy_static::lazy_static;

/// Three packages, two of them sharing one dependency:
/// `P0(10, {D0})`, `P1(7, {D0})`, `P2(1, {D1})`, `size(D0) = 5`, `size(D1) = 3`, `C = 6`.
pub fn shared_dependency_instance() -> ProblemInstance {
    let mut inst = ProblemInstance::new(6);
    inst.push_package("P0", 10);
    inst.push_package("P1", 7);
    inst.push_package("P2", 1);
    inst.push_dependency("D0", 5);
    inst.push_dependency("D1", 3);
    inst.link(0, 0);
    inst.link(1, 0);
    inst.link(2, 1);
    inst
}

/// The shared-dependency instance plus `P3(12, {D0})`, the profitable swap target.
pub fn swap_instance() -> ProblemInstance {
    let mut inst = shared_dependency_instance();
    let p3 = inst.push_package("P3", 12);
    inst.link(p3, 0);
    inst
}

/// One big package blocking the knapsack, two smaller ones that together beat it:
/// `P0(20, {D0(10)})`, `P1(11, {D1(5)})`, `P2(11, {D2(5)})`, `C = 10`.
pub fn ejection_instance() -> ProblemInstance {
    let mut inst = ProblemInstance::new(10);
    inst.push_package("P0", 20);
    inst.push_package("P1", 11);
    inst.push_package("P2", 11);
    inst.push_dependency("D0", 10);
    inst.push_dependency("D1", 5);
    inst.push_dependency("D2", 5);
    inst.link(0, 0);
    inst.link(1, 1);
    inst.link(2, 2);
    inst
}

fn medium_instance() -> ProblemInstance {
    // 24 packages over 12 dependencies with a deterministic overlap pattern
    let mut inst = ProblemInstance::new(60);
    for p in 0..24usize {
        inst.push_package(format!("P{}", p), (p as u64 * 7) % 23 + 1);
    }
    for d in 0..12usize {
        inst.push_dependency(format!("D{}", d), (d as u64 * 5) % 17 + 2);
    }
    for p in 0..24usize {
        inst.link(p, p % 12);
        inst.link(p, (p * 3 + 1) % 12);
        if p % 4 == 0 {
            inst.link(p, (p * 5 + 2) % 12);
        }
    }
    inst
}

lazy_static! {
    /// A mid-sized deterministic instance for the solver-level tests.
    pub static ref MEDIUM: ProblemInstance = medium_instance();
}
