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
use crate::constructive::{rcl, Constructive};
use crate::model::ProblemInstance;
use crate::random_provider::RandomProvider;
use crate::solver::Algorithm;
use crate::Stopper;

use maplit::hashset;
use std::time::Duration;

const BUDGET: Duration = Duration::from_millis(100);

#[test]
fn sort_orders_are_stable() {
    let inst = shared_dependency_instance();
    let builder = Constructive::new(&inst, BUDGET, 0, "0");

    assert_eq!(builder.sorted_by_benefit(), vec![0, 1, 2]);
    // ratios: P0 = 2.0, P1 = 1.4, P2 = 0.33
    assert_eq!(builder.sorted_by_ratio(), vec![0, 1, 2]);
    // standalone sizes: P2 = 3, P0 = 5, P1 = 5 (tie by id)
    assert_eq!(builder.sorted_by_size(), vec![2, 0, 1]);
}

#[test]
fn greedy_by_benefit_selects_the_sharing_pair() {
    let inst = shared_dependency_instance();
    let mut builder = Constructive::new(&inst, BUDGET, 0, "2021-03-01 12:00:00");
    let bags = builder.greedy_bags(&mut Stopper::new());

    let by_benefit = &bags[0];
    assert_eq!(by_benefit.provenance().algorithm, Algorithm::GreedyPackageBenefit);
    assert_eq!(by_benefit.members(), &hashset! {0, 1});
    assert_eq!(by_benefit.benefit(), 17);
    assert_eq!(by_benefit.size(), 5);
}

#[test]
fn greedy_by_size_ends_at_the_single_best_package() {
    // P2 is picked first and blocks the rest; the post-search swap upgrades it to P0
    let inst = shared_dependency_instance();
    let mut builder = Constructive::new(&inst, BUDGET, 0, "0");
    let bags = builder.greedy_bags(&mut Stopper::new());

    let by_size = &bags[2];
    assert_eq!(by_size.provenance().algorithm, Algorithm::GreedyPackageSize);
    assert_eq!(by_size.members(), &hashset! {0});
    assert_eq!(by_size.benefit(), 10);
    assert_eq!(by_size.size(), 5);
}

#[test]
fn every_constructive_bag_is_feasible() {
    let inst = &*MEDIUM;
    let mut builder = Constructive::new(inst, BUDGET, 3, "0");
    let mut abort = Stopper::new();

    let mut bags = vec![builder.random_bag(&mut abort)];
    bags.extend(builder.greedy_bags(&mut abort));
    bags.extend(builder.semi_random_bags(&mut abort));

    assert_eq!(bags.len(), 7);
    for bag in &bags {
        assert!(bag.is_feasible(inst.capacity()));
        assert!(bag.benefit() > 0);
    }
}

#[test]
fn random_construction_is_deterministic_per_seed() {
    let inst = &*MEDIUM;
    let run = |seed| {
        let mut builder = Constructive::new(inst, BUDGET, seed, "0");
        let bag = builder.random_bag(&mut Stopper::new());
        (bag.members_sorted(), bag.benefit())
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn construction_on_an_empty_instance_returns_an_empty_bag() {
    let inst = ProblemInstance::new(5);
    let mut builder = Constructive::new(&inst, BUDGET, 0, "0");
    let bag = builder.random_bag(&mut Stopper::new());
    assert!(bag.is_empty());
    assert_eq!(bag.size(), 0);
}

#[test]
fn rcl_construction_fills_the_bag_feasibly() {
    let inst = &*MEDIUM;
    let mut rng = RandomProvider::new(21);
    let mut bufs = rcl::RclBuffers::new();
    let mut alpha_used = 0.5;

    let bag = rcl::construction_phase(inst, &mut rng, &mut bufs, 10, 0.5, &mut alpha_used, "0");
    assert!(bag.is_feasible(inst.capacity()));
    assert!(bag.benefit() > 0);
    // every further candidate must be blocked now
    for p in 0..inst.num_packages() {
        if !bag.contains(p) {
            assert!(!bag.can_add(inst, inst.deps_of(p), inst.capacity()));
        }
    }
}

#[test]
fn rcl_construction_is_deterministic_per_seed() {
    let inst = &*MEDIUM;
    let run = |seed| {
        let mut rng = RandomProvider::new(seed);
        let mut bufs = rcl::RclBuffers::new();
        let mut alpha_used = -1.0;
        let bag =
            rcl::construction_phase(inst, &mut rng, &mut bufs, 10, -1.0, &mut alpha_used, "0");
        (bag.members_sorted(), alpha_used)
    };
    assert_eq!(run(8), run(8));
}
