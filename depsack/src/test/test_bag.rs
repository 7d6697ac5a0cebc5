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
use crate::model::ProblemInstance;
use crate::solver::Algorithm;

use maplit::hashset;

/// Recompute size, benefit and every reference count from scratch and compare them with the
/// cached values.
fn assert_consistent(bag: &Bag, inst: &ProblemInstance) {
    let expected_benefit: u64 = bag.members().iter().map(|&p| inst.benefit(p)).sum();
    assert_eq!(bag.benefit(), expected_benefit);

    let expected_size: u64 = bag.deps().iter().map(|&d| inst.size(d)).sum();
    assert_eq!(bag.size(), expected_size);

    for d in 0..inst.num_dependencies() {
        let holders =
            bag.members().iter().filter(|&&p| inst.deps_of(p).contains(&d)).count() as u32;
        assert_eq!(bag.refcount(d), holders);
        assert_eq!(bag.deps().contains(&d), holders > 0);
    }
}

#[test]
fn add_and_remove_maintain_the_cached_sums() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");

    for p in 0..inst.num_packages() {
        assert!(bag.add(&inst, p, inst.deps_of(p)));
        assert_consistent(&bag, &inst);
    }
    assert_eq!(bag.benefit(), 30);
    assert_eq!(bag.size(), 8);

    assert!(bag.remove(&inst, 1, inst.deps_of(1)));
    assert_consistent(&bag, &inst);
    assert!(bag.remove(&inst, 2, inst.deps_of(2)));
    assert_consistent(&bag, &inst);
    assert_eq!(bag.size(), 5);

    assert!(bag.remove(&inst, 0, inst.deps_of(0)));
    assert!(bag.remove(&inst, 3, inst.deps_of(3)));
    assert!(bag.is_empty());
    assert_eq!(bag.size(), 0);
    assert_eq!(bag.benefit(), 0);
}

#[test]
fn duplicate_adds_and_missing_removes_are_no_ops() {
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");

    assert!(bag.add(&inst, 0, inst.deps_of(0)));
    assert!(!bag.add(&inst, 0, inst.deps_of(0)));
    assert_eq!(bag.benefit(), 10);
    assert_eq!(bag.refcount(0), 1);

    assert!(!bag.remove(&inst, 2, inst.deps_of(2)));
    assert_consistent(&bag, &inst);
}

#[test]
fn remove_after_add_is_the_identity() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));
    bag.add(&inst, 2, inst.deps_of(2));

    let reference = bag.clone();
    bag.add(&inst, 1, inst.deps_of(1));
    bag.remove(&inst, 1, inst.deps_of(1));

    assert_eq!(bag.members(), reference.members());
    assert_eq!(bag.deps(), reference.deps());
    assert_eq!(bag.size(), reference.size());
    assert_eq!(bag.benefit(), reference.benefit());
    assert_consistent(&bag, &inst);
}

#[test]
fn shared_dependency_is_paid_only_once() {
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");

    bag.add(&inst, 0, inst.deps_of(0));
    assert_eq!(bag.size(), 5);
    bag.add(&inst, 1, inst.deps_of(1));
    assert_eq!(bag.size(), 5);
    assert_eq!(bag.refcount(0), 2);
    assert_eq!(bag.members(), &hashset! {0, 1});

    // removing one of the two holders keeps the dependency in the union
    bag.remove(&inst, 0, inst.deps_of(0));
    assert_eq!(bag.size(), 5);
    assert_eq!(bag.refcount(0), 1);
}

#[test]
fn package_without_dependencies_changes_benefit_only() {
    let mut inst = ProblemInstance::new(4);
    inst.push_package("P0", 9);
    let mut bag = Bag::new(Algorithm::None, "0");

    bag.add(&inst, 0, inst.deps_of(0));
    assert_eq!(bag.benefit(), 9);
    assert_eq!(bag.size(), 0);
    assert!(bag.deps().is_empty());
}

#[test]
fn zero_capacity_admits_only_free_packages() {
    let mut inst = ProblemInstance::new(0);
    inst.push_package("P0", 5); // no dependencies
    inst.push_package("P1", 5);
    inst.push_package("P2", 5);
    inst.push_dependency("D0", 0);
    inst.push_dependency("D1", 1);
    inst.link(1, 0);
    inst.link(2, 1);

    let bag = Bag::new(Algorithm::None, "0");
    assert!(bag.can_add(&inst, inst.deps_of(0), 0));
    assert!(bag.can_add(&inst, inst.deps_of(1), 0)); // dependency of size 0
    assert!(!bag.can_add(&inst, inst.deps_of(2), 0));
}

#[test]
fn can_add_agrees_with_applying_the_add() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 2, inst.deps_of(2));

    for p in 0..inst.num_packages() {
        if bag.contains(p) {
            continue;
        }
        let predicted = bag.can_add(&inst, inst.deps_of(p), inst.capacity());
        let mut applied = bag.clone();
        applied.add(&inst, p, inst.deps_of(p));
        assert_eq!(predicted, applied.size() <= inst.capacity(), "package {}", p);
    }
}

#[test]
fn can_swap_1_1_handles_shared_dependencies() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));

    // P0 -> P3: both only hold D0, so the swap is size-neutral
    assert!(bag.can_swap_1_1(&inst, 0, 3, inst.capacity()));
    // P0 -> P2: D0 is released (5), D1 is added (3)
    assert!(bag.can_swap_1_1(&inst, 0, 2, inst.capacity()));

    // exhaustive agreement with actually applying the swap
    for p_in in bag.members_sorted() {
        for p_out in 0..inst.num_packages() {
            if bag.contains(p_out) {
                continue;
            }
            let predicted = bag.can_swap_1_1(&inst, p_in, p_out, inst.capacity());
            let mut applied = bag.clone();
            applied.remove(&inst, p_in, inst.deps_of(p_in));
            applied.add(&inst, p_out, inst.deps_of(p_out));
            assert_eq!(predicted, applied.size() <= inst.capacity());
        }
    }
}

#[test]
fn can_swap_1_k_counts_a_dependency_shared_by_both_incoming_packages_once() {
    let inst = ejection_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));

    // removing P0 releases D0 (10); P1 and P2 together add D1 + D2 (10)
    assert!(bag.can_swap_1_k(&inst, 0, &[1, 2], inst.capacity()));

    let mut applied = bag.clone();
    applied.remove(&inst, 0, inst.deps_of(0));
    applied.add(&inst, 1, inst.deps_of(1));
    applied.add(&inst, 2, inst.deps_of(2));
    assert_eq!(applied.size(), 10);
}

#[test]
fn can_swap_k_1_releases_only_unshared_dependencies() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));
    bag.add(&inst, 1, inst.deps_of(1));
    bag.add(&inst, 2, inst.deps_of(2));
    assert_eq!(bag.size(), 8);

    // removing P1 and P2 releases only D1: P0 still holds D0
    let predicted = bag.can_swap_k_1(&inst, &[1, 2], 3, inst.capacity());
    let mut applied = bag.clone();
    applied.remove(&inst, 1, inst.deps_of(1));
    applied.remove(&inst, 2, inst.deps_of(2));
    applied.add(&inst, 3, inst.deps_of(3));
    assert_eq!(predicted, applied.size() <= inst.capacity());
    assert_eq!(applied.size(), 5);
    assert!(predicted);
}

#[test]
fn invalid_members_is_empty_for_consistent_bags() {
    let inst = swap_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    for p in 0..inst.num_packages() {
        bag.add(&inst, p, inst.deps_of(p));
    }
    assert!(bag.invalid_members(&inst).is_empty());
}

#[test]
fn cloning_is_deep() {
    let inst = shared_dependency_instance();
    let mut bag = Bag::new(Algorithm::None, "0");
    bag.add(&inst, 0, inst.deps_of(0));

    let mut copy = bag.clone();
    copy.add(&inst, 1, inst.deps_of(1));
    copy.remove(&inst, 0, inst.deps_of(0));

    assert_eq!(bag.members(), &hashset! {0});
    assert_eq!(bag.refcount(0), 1);
    assert_eq!(copy.members(), &hashset! {1});
}
