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

//! # Problem Model
//!
//! This module contains the immutable problem instance: the package table, the dependency table,
//! and the capacity. Packages and dependencies reference each other through dense indices into
//! the two tables ([`PackageId`] and [`DependencyId`]); there are no cyclic ownership links. The
//! per-package dependency lists are kept sorted and deduplicated, so that the solver can pass
//! them around as contiguous slices and test membership by binary search.

/// Index of a package into [`ProblemInstance::packages`]
pub type PackageId = usize;
/// Index of a dependency into [`ProblemInstance::dependencies`]
pub type DependencyId = usize;

/// A package, with a benefit and the set of dependencies it requires.
///
/// Packages are immutable after the instance is loaded, and are compared by identity (their
/// [`PackageId`]), never by value.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    benefit: u64,
    deps: Vec<DependencyId>,
}

impl Package {
    /// Create a new package without any dependency requirements.
    pub fn new(name: impl Into<String>, benefit: u64) -> Self {
        Self { name: name.into(), benefit, deps: Vec::new() }
    }

    /// The human-readable name of the package.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The benefit gained by selecting this package.
    pub fn benefit(&self) -> u64 {
        self.benefit
    }

    /// The dependencies required by this package, sorted and deduplicated.
    pub fn deps(&self) -> &[DependencyId] {
        &self.deps
    }
}

/// A dependency, with a size and the (derived) set of packages requiring it.
#[derive(Debug, Clone)]
pub struct Dependency {
    name: String,
    size: u64,
    packages: Vec<PackageId>,
}

impl Dependency {
    /// Create a new dependency, not yet required by any package.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size, packages: Vec::new() }
    }

    /// The human-readable name of the dependency.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size this dependency occupies in the knapsack.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The packages requiring this dependency, sorted and deduplicated.
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }
}

/// A complete problem instance: capacity, package table, and dependency table.
///
/// The instance is built once (by [`crate::io::load_problem`] or programmatically through
/// [`push_package`](Self::push_package), [`push_dependency`](Self::push_dependency) and
/// [`link`](Self::link)) and afterwards consumed read-only by the solver.
#[derive(Debug, Clone, Default)]
pub struct ProblemInstance {
    capacity: u64,
    packages: Vec<Package>,
    dependencies: Vec<Dependency>,
}

impl ProblemInstance {
    /// Create an empty instance with the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self { capacity, packages: Vec::new(), dependencies: Vec::new() }
    }

    /// The knapsack capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The package table.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The dependency table.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Number of packages.
    pub fn num_packages(&self) -> usize {
        self.packages.len()
    }

    /// Number of dependencies.
    pub fn num_dependencies(&self) -> usize {
        self.dependencies.len()
    }

    /// The benefit of package `p`.
    pub fn benefit(&self, p: PackageId) -> u64 {
        self.packages[p].benefit
    }

    /// The size of dependency `d`.
    pub fn size(&self, d: DependencyId) -> u64 {
        self.dependencies[d].size
    }

    /// The sorted dependency list of package `p`. This is the precomputed adjacency the inner
    /// loops pass to the [`Bag`](crate::bag::Bag) operations.
    pub fn deps_of(&self, p: PackageId) -> &[DependencyId] {
        &self.packages[p].deps
    }

    /// The size package `p` would occupy on its own (the sum over all its dependencies,
    /// ignoring sharing).
    pub fn standalone_size(&self, p: PackageId) -> u64 {
        self.packages[p].deps.iter().map(|&d| self.dependencies[d].size).sum()
    }

    /// Append a package to the package table, returning its id.
    pub fn push_package(&mut self, name: impl Into<String>, benefit: u64) -> PackageId {
        self.packages.push(Package::new(name, benefit));
        self.packages.len() - 1
    }

    /// Append a dependency to the dependency table, returning its id.
    pub fn push_dependency(&mut self, name: impl Into<String>, size: u64) -> DependencyId {
        self.dependencies.push(Dependency::new(name, size));
        self.dependencies.len() - 1
    }

    /// Record that package `p` requires dependency `d`, maintaining both directions of the
    /// relation. Returns `false` (leaving the instance unchanged) if either index is out of
    /// range. Duplicate links are silently ignored.
    pub fn link(&mut self, p: PackageId, d: DependencyId) -> bool {
        if p >= self.packages.len() || d >= self.dependencies.len() {
            return false;
        }
        if let Err(pos) = self.packages[p].deps.binary_search(&d) {
            self.packages[p].deps.insert(pos, d);
        }
        if let Err(pos) = self.dependencies[d].packages.binary_search(&p) {
            self.dependencies[d].packages.insert(pos, p);
        }
        true
    }

    /// Check that the two stored directions of the package-dependency relation agree. Only used
    /// by tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        self.packages.iter().enumerate().all(|(p, pkg)| {
            pkg.deps.iter().all(|&d| self.dependencies[d].packages.binary_search(&p).is_ok())
        }) && self.dependencies.iter().enumerate().all(|(d, dep)| {
            dep.packages.iter().all(|&p| self.packages[p].deps.binary_search(&d).is_ok())
        })
    }
}
