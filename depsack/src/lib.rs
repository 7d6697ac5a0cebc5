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

#![deny(missing_docs)]

//! # Depsack: Solving the Set-Union Knapsack Problem
//!
//! This is a library for solving the *Set-Union Knapsack Problem* (SUKP): given a set of
//! packages, each providing an integer benefit and requiring a set of dependencies, and given a
//! set of dependencies, each occupying an integer size, select a subset of packages maximizing
//! the total benefit, such that the *union* of all required dependencies fits into a knapsack of
//! fixed capacity. Shared dependencies are paid only once, which is what makes the problem harder
//! than the classic 0/1 knapsack: the cost of a package depends on which packages are already
//! selected.
//!
//! ## Problem Statement
//! Given
//! - a set of packages $P$, with a benefit $b_p \geq 0$ for every $p \in P$,
//! - a set of dependencies $D$, with a size $s_d \geq 0$ for every $d \in D$,
//! - a relation $R \subseteq P \times D$ mapping packages to the dependencies they require,
//! - a capacity $C \geq 0$,
//!
//! find $S \subseteq P$ maximizing $\sum_{p \in S} b_p$ subject to
//! $\sum_{d \in \bigcup_{p \in S} R(p)} s_d \leq C$.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Model`](model)**: The problem instance, consisting of the [package](model::Package) and
//!   [dependency](model::Dependency) tables and the capacity. The two tables cross-reference
//!   each other by dense indices only.
//!
//! - **[`Bag`](bag::Bag)**: The central mutable solution object. It maintains the selected
//!   packages, the union of their dependencies with a per-dependency reference count, and the
//!   cached size and benefit, so that adding or removing a package costs `O(|deps(p)|)`.
//!
//! - **[`Movements`](movements)**: The neighborhood move operators over a bag (ADD, the three
//!   swap shapes, and the ejection chain), each explorable with a first-, best-, or
//!   random-improvement strategy.
//!
//! - **[`SearchEngine`](local_search::SearchEngine)**: Drives a single movement until an
//!   iteration cap, a stall cap, a deadline, or a stop request is reached.
//!
//! - **[`Repair`](repair)**: Restores feasibility of an over-full bag by evicting packages,
//!   testing three eviction policies on clones and keeping the best result.
//!
//! - **[`Constructive`](constructive)**: Random, greedy and semi-random greedy construction of
//!   initial bags, including the scored restricted-candidate-list construction used by GRASP.
//!
//! - **[`Metaheuristics`](metaheuristics)**: [`Vnd`](metaheuristics::Vnd),
//!   [`Vns`](metaheuristics::Vns) and the parallel [`Grasp`](metaheuristics::Grasp) (plain, or
//!   with a full VNS intensification per iteration).
//!
//! - **[`Solver`](solver)**: The portfolio façade [`solve`], running every constructive
//!   heuristic and metaheuristic on a time budget and returning the produced
//!   [`Solution`](solver::Solution)s.
//!
//! - **[`Io`](io)**: Loading problem instances from the text format, writing and re-reading
//!   solution reports, appending CSV summary rows, and validating a report against its instance.
//!
//! ## Usage
//!
//! ```
//! use depsack::model::ProblemInstance;
//! use depsack::solve;
//! use std::time::Duration;
//!
//! // two packages sharing one dependency
//! let mut instance = ProblemInstance::new(6);
//! instance.push_package("P0", 10);
//! instance.push_package("P1", 7);
//! instance.push_dependency("D0", 5);
//! instance.link(0, 0);
//! instance.link(1, 0);
//!
//! let solutions = solve(&instance, Duration::from_millis(100), 42, "2021-03-01 12:00:00");
//! assert!(solutions.iter().all(|s| s.feasible));
//! assert_eq!(solutions.iter().map(|s| s.benefit).max(), Some(17));
//! ```

// test modules
mod test;

mod error;

pub mod bag;
pub mod constructive;
pub mod io;
pub mod local_search;
pub mod metaheuristics;
pub mod model;
pub mod movements;
pub mod random_provider;
pub mod repair;
pub mod solver;

pub use error::Error;
pub use solver::{solve, solve_with, Solution, SolverOptions};

use std::sync::{Arc, RwLock};

/// How many [`Stopper::try_is_stop`] polls are skipped between two actual reads of the flag.
const STOP_POLL_STRIDE: usize = 9;

/// Cooperative cancellation channel between a launcher and the solver loops.
///
/// Cloning is cheap and every clone observes the same flag. The search loops hold a clone and
/// poll it through [`try_is_stop`](Self::try_is_stop); the launcher keeps another clone around
/// to call [`send_stop`](Self::send_stop) on, e.g. when the user cancels a run.
#[derive(Clone, Debug)]
pub struct Stopper {
    flag: Arc<RwLock<bool>>,
    polls: usize,
}

impl Default for Stopper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopper {
    /// Create a stopper with the flag cleared.
    pub fn new() -> Self {
        Self { flag: Arc::new(RwLock::new(false)), polls: 0 }
    }

    /// Raise the stop flag, blocking until the write lock is available. Every clone of this
    /// stopper sees the flag from its next successful read on.
    pub fn send_stop(&self) {
        *self.flag.write().unwrap() = true;
    }

    /// Cheap poll for the hot loops: only every `STOP_POLL_STRIDE`-th call actually touches the
    /// lock, and even then it never blocks. Returns `None` on the skipped calls and when the
    /// read lock is contended, so callers treat `None` as "keep going".
    pub fn try_is_stop(&mut self) -> Option<bool> {
        self.polls += 1;
        if self.polls >= STOP_POLL_STRIDE {
            self.polls = 0;
            self.flag.try_read().map(|stop| *stop).ok()
        } else {
            None
        }
    }

    /// Read the stop flag, blocking until the read lock is available.
    pub fn is_stop(&self) -> bool {
        *self.flag.read().unwrap()
    }
}
