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

//! Solution validation: re-read a report, recompute everything from the problem instance, and
//! compare.

use super::{load_problem, load_report, SolutionReport};
use crate::model::ProblemInstance;
use crate::Error;

use log::*;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// The complete outcome of validating one report against its problem instance.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Benefit recomputed from the selected packages.
    pub calculated_benefit: u64,
    /// Union weight recomputed from the selected packages' dependencies.
    pub true_weight: u64,
    /// Benefit claimed by the report.
    pub reported_benefit: u64,
    /// Union weight claimed by the report.
    pub reported_weight: u64,
    /// Number of selected packages.
    pub package_count: usize,
    /// Number of dependencies the report claims in the union.
    pub reported_dependency_count: usize,
    /// Number of dependencies actually required by the selected packages.
    pub true_required_dependency_count: usize,
    /// Whether the reported benefit matches the recomputed one.
    pub benefit_valid: bool,
    /// Whether the reported weight matches the recomputed one.
    pub weight_valid: bool,
    /// Whether the reported dependency set equals the union of the selected packages'
    /// dependencies.
    pub consistent: bool,
    /// Whether the recomputed weight respects the capacity.
    pub feasible: bool,
}

impl ValidationResult {
    /// A solution is valid overall when it is both consistent and feasible.
    pub fn overall_valid(&self) -> bool {
        self.consistent && self.feasible
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ValidationResult {{")?;
        writeln!(f, "  Overall Valid: {}", self.overall_valid())?;
        writeln!(f, "  consistent: {}", self.consistent)?;
        writeln!(f, "  feasible: {}", self.feasible)?;
        writeln!(f, "  benefit_valid: {}", self.benefit_valid)?;
        writeln!(f, "  weight_valid: {}", self.weight_valid)?;
        writeln!(f, "  calculated_benefit: {}", self.calculated_benefit)?;
        writeln!(f, "  true_weight: {}", self.true_weight)?;
        writeln!(f, "  package_count: {}", self.package_count)?;
        writeln!(f, "  true_required_dependency_count: {}", self.true_required_dependency_count)?;
        writeln!(f, "  reported_dependency_count: {}", self.reported_dependency_count)?;
        write!(f, "}}")
    }
}

/// Validate a report file against its problem file.
pub fn validate_solution(
    problem_path: impl AsRef<Path>,
    report_path: impl AsRef<Path>,
) -> Result<ValidationResult, Error> {
    let inst = load_problem(problem_path)?;
    let report = load_report(report_path)?;
    Ok(validate_report(&inst, &report))
}

/// Validate an already-parsed report against an already-loaded instance.
pub fn validate_report(inst: &ProblemInstance, report: &SolutionReport) -> ValidationResult {
    let mut result = ValidationResult {
        reported_benefit: report.reported_benefit,
        reported_weight: report.reported_weight,
        package_count: report.package_vector.len(),
        reported_dependency_count: report.dependency_vector.len(),
        ..ValidationResult::default()
    };

    let mut used_deps: BTreeSet<usize> = BTreeSet::new();
    for &p in &report.package_vector {
        if p < inst.num_packages() {
            result.calculated_benefit += inst.benefit(p);
            used_deps.extend(inst.deps_of(p).iter().copied());
        } else {
            warn!("package index {} not found in the problem instance", p);
        }
    }

    let reported_deps: BTreeSet<usize> = report
        .dependency_vector
        .iter()
        .copied()
        .filter(|&d| {
            let known = d < inst.num_dependencies();
            if !known {
                warn!("dependency index {} not found in the problem instance", d);
            }
            known
        })
        .collect();
    for &d in &reported_deps {
        if !used_deps.contains(&d) {
            warn!(
                "reported dependency {} is not required by any selected package",
                inst.dependencies()[d].name()
            );
        }
    }

    result.true_weight = used_deps.iter().map(|&d| inst.size(d)).sum();
    result.true_required_dependency_count = used_deps.len();
    result.benefit_valid = result.reported_benefit == result.calculated_benefit;
    result.weight_valid = result.reported_weight == result.true_weight;
    result.consistent = reported_deps == used_deps;
    result.feasible = result.true_weight <= inst.capacity();
    result
}
