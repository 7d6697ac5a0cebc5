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

//! Solution report writer and reader.
//!
//! A report is a block of key-value header lines followed by the package and dependency
//! membership bit-vectors. The writer emits the vectors without spaces (`[1,0,1]`); the reader
//! accepts them with or without spaces.

use super::sanitize_for_filename;
use crate::solver::Solution;
use crate::Error;

use itertools::Itertools;
use log::*;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// The fields of a re-read solution report that the validator needs.
#[derive(Debug, Clone, Default)]
pub struct SolutionReport {
    /// The benefit claimed by the report.
    pub reported_benefit: u64,
    /// The union weight claimed by the report.
    pub reported_weight: u64,
    /// Indices of the selected packages.
    pub package_vector: Vec<usize>,
    /// Indices of the dependencies claimed to be in the union.
    pub dependency_vector: Vec<usize>,
}

fn bit_vector(bits: &[bool]) -> String {
    format!("[{}]", bits.iter().map(|&b| if b { "1" } else { "0" }).join(","))
}

/// Write a detailed report for one solution into `dir`, returning the path of the written file.
pub fn save_report(
    solution: &Solution,
    dir: impl AsRef<Path>,
    input_label: &str,
    file_id: &str,
) -> Result<PathBuf, Error> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "report_{}-{}-{}-{}.txt",
        solution.benefit,
        solution.algorithm,
        solution.movement,
        sanitize_for_filename(file_id)
    ));

    let mut out = String::new();
    writeln!(out, "=== BAG REPORT ===").unwrap();
    writeln!(out, "Algorithm: {}", solution.algorithm).unwrap();
    writeln!(out, "Local Search: {}", solution.local_search).unwrap();
    writeln!(out, "Movement: {}", solution.movement).unwrap();
    writeln!(out, "Feasibility Strategy: {}", solution.repair).unwrap();
    writeln!(out, "Timestamp: {}", solution.timestamp).unwrap();
    writeln!(out, "Input File: {}-{}", input_label, file_id).unwrap();
    writeln!(out, "Processing Time (s): {}", solution.wall_time.as_secs_f64()).unwrap();
    writeln!(out, "Packages: {}", solution.num_packages()).unwrap();
    writeln!(out, "Dependencies: {}", solution.num_dependencies()).unwrap();
    writeln!(out, "Bag Weight: {}", solution.size).unwrap();
    writeln!(out, "Bag Benefit: {}", solution.benefit).unwrap();
    writeln!(out, "Seed: {}", solution.seed).unwrap();
    writeln!(out, "Metaheuristic Parameters: {}", solution.params).unwrap();
    writeln!(out, "Feasible: {}", solution.feasible).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "=== PACKAGES ===").unwrap();
    writeln!(out, "{}", bit_vector(&solution.packages)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "=== DEPENDENCIES ===").unwrap();
    writeln!(out, "{}", bit_vector(&solution.dependencies)).unwrap();

    fs::write(&path, out)?;
    debug!("wrote report {:?}", path);
    Ok(path)
}

/// Indices of the `1` bits of a serialized bit-vector. Brackets, commas and spaces are ignored,
/// so both `[1,0,1]` and `[1, 0, 1]` parse.
fn parse_bits(line: &str) -> Vec<usize> {
    let mut selected = Vec::new();
    let mut index = 0usize;
    for c in line.chars() {
        match c {
            '1' => {
                selected.push(index);
                index += 1;
            }
            '0' => index += 1,
            _ => {}
        }
    }
    selected
}

/// Read a solution report back from disk.
pub fn load_report(path: impl AsRef<Path>) -> Result<SolutionReport, Error> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut report = SolutionReport::default();
    let mut found_packages = false;
    let mut found_dependencies = false;

    let mut lines = content.lines();
    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }
        if let Some(value) = line.strip_prefix("Bag Benefit:") {
            report.reported_benefit = parse_number(value);
        } else if let Some(value) = line.strip_prefix("Bag Weight:") {
            report.reported_weight = parse_number(value);
        } else if line.contains("=== PACKAGES ===") {
            if let Some(bits) = next_content_line(&mut lines) {
                report.package_vector = parse_bits(bits);
                found_packages = true;
            }
        } else if line.contains("=== DEPENDENCIES ===") {
            if let Some(bits) = next_content_line(&mut lines) {
                report.dependency_vector = parse_bits(bits);
                found_dependencies = true;
            }
        }
    }

    if !found_packages {
        return Err(Error::MissingSection("=== PACKAGES ==="));
    }
    if !found_dependencies {
        return Err(Error::MissingSection("=== DEPENDENCIES ==="));
    }
    Ok(report)
}

fn next_content_line<'a>(lines: &mut std::str::Lines<'a>) -> Option<&'a str> {
    lines.find(|l| !l.trim().is_empty())
}

fn parse_number(value: &str) -> u64 {
    value.trim().parse().unwrap_or_else(|_| {
        warn!("could not parse report value: {}", value.trim());
        0
    })
}
