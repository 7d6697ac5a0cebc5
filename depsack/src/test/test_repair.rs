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

use super::fixtures::*;
use crate::bag::Bag;
use crate::random_provider::RandomProvider;
use crate::repair::{repair, RepairStrategy};
use crate::solver::Algorithm;

use maplit::hashset;

#[test]
fn repair_keeps_a_feasible_bag_untouched() {
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));
    bag.add(&inst, 1, inst.deps_of(1));

    let before = bag.clone();
    let mut rng = RandomProvider::new(1);
    assert!(repair(&mut bag, &inst, &mut rng));
    assert_eq!(bag.members(), before.members());
    assert_eq!(bag.benefit(), before.benefit());
    assert_eq!(bag.provenance().repair, RepairStrategy::None);
}

#[test]
fn repair_evicts_the_least_efficient_member() {
    // {P0, P1, P2} has size 8 over capacity 6; P2 contributes 1 benefit for 3 released units
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    for p in 0..3 {
        bag.add(&inst, p, inst.deps_of(p));
    }
    assert_eq!(bag.size(), 8);

    let mut rng = RandomProvider::new(1);
    assert!(repair(&mut bag, &inst, &mut rng));
    assert_eq!(bag.members(), &hashset! {0, 1});
    assert_eq!(bag.benefit(), 17);
    assert_eq!(bag.size(), 5);
    assert_ne!(bag.provenance().repair, RepairStrategy::None);
}

#[test]
fn repair_handles_the_greedy_by_size_overshoot() {
    // {P2, P0}: size 8 over capacity 6; evicting P2 is the best repair
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 2, inst.deps_of(2));
    bag.add(&inst, 0, inst.deps_of(0));
    assert_eq!(bag.size(), 8);

    let mut rng = RandomProvider::new(1);
    assert!(repair(&mut bag, &inst, &mut rng));
    assert_eq!(bag.members(), &hashset! {0});
    assert_eq!(bag.benefit(), 10);
    assert_eq!(bag.size(), 5);
}

#[test]
fn repair_result_is_feasible_or_flagged_never_both() {
    // the medium instance with its capacity shrunk far below the full union size
    let inst = &*MEDIUM;
    let mut tight = crate::model::ProblemInstance::new(10);
    for p in inst.packages() {
        tight.push_package(p.name(), p.benefit());
    }
    for d in inst.dependencies() {
        tight.push_dependency(d.name(), d.size());
    }
    for (p, pkg) in inst.packages().iter().enumerate() {
        for &d in pkg.deps() {
            tight.link(p, d);
        }
    }

    let mut bag = Bag::new(Algorithm::None, "0");
    for p in 0..tight.num_packages() {
        bag.add(&tight, p, tight.deps_of(p));
    }
    assert!(bag.size() > tight.capacity());

    let mut rng = RandomProvider::new(5);
    let feasible = repair(&mut bag, &tight, &mut rng);
    assert_eq!(feasible, bag.is_feasible(tight.capacity()));
}

#[test]
fn repair_is_deterministic_for_a_fixed_seed() {
    let inst = &*MEDIUM;
    let run = |seed| {
        let mut bag = Bag::new(Algorithm::None, "0");
        for p in 0..inst.num_packages() {
            bag.add(inst, p, inst.deps_of(p));
        }
        let mut rng = RandomProvider::new(seed);
        repair(&mut bag, inst, &mut rng);
        (bag.members_sorted(), bag.benefit(), bag.size())
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn repair_empties_a_bag_rather_than_give_up() {
    // a single package that can never fit: repair must still terminate feasible (empty)
    let mut inst = crate::model::ProblemInstance::new(3);
    inst.push_package("P0", 5);
    inst.push_dependency("D0", 9);
    inst.link(0, 0);

    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));
    assert_eq!(bag.size(), 9);

    let mut rng = RandomProvider::new(2);
    assert!(repair(&mut bag, &inst, &mut rng));
    assert!(bag.is_empty());
    assert_eq!(bag.size(), 0);
}
