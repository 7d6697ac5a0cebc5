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

//! CSV summary appender and JSON portfolio export.

use crate::local_search::LocalSearch;
use crate::solver::Solution;
use crate::Error;

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Algorithm")]
    algorithm: String,
    #[serde(rename = "Movement")]
    movement: String,
    #[serde(rename = "Feasibility Strategy")]
    feasibility_strategy: String,
    #[serde(rename = "File")]
    file: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "Time(h:m:s.ms)")]
    time: String,
    #[serde(rename = "Packages")]
    packages: usize,
    #[serde(rename = "Dependencies")]
    dependencies: usize,
    #[serde(rename = "Weight")]
    weight: u64,
    #[serde(rename = "Benefit")]
    benefit: u64,
    #[serde(rename = "Seed")]
    seed: u64,
    #[serde(rename = "Params")]
    params: &'a str,
}

/// Format a duration as `h:m:s.ms`.
pub fn format_hms(d: Duration) -> String {
    let total_ms = d.as_millis();
    let (ms, total_s) = (total_ms % 1000, total_ms / 1000);
    let (s, total_m) = (total_s % 60, total_s / 60);
    let (m, h) = (total_m % 60, total_m / 60);
    format!("{}:{:02}:{:02}.{:03}", h, m, s, ms)
}

/// Append one row for the given solution to the CSV summary at `path`. The header is written
/// iff the file does not exist yet or is empty.
pub fn append_summary(
    path: impl AsRef<Path>,
    solution: &Solution,
    file_label: &str,
) -> Result<(), Error> {
    let path = path.as_ref();
    let write_header = !path.exists() || fs::metadata(path)?.len() == 0;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(write_header).from_writer(file);

    let algorithm = if solution.local_search == LocalSearch::None {
        solution.algorithm.to_string()
    } else {
        format!("{} | {}", solution.algorithm, solution.local_search)
    };
    writer.serialize(SummaryRow {
        algorithm,
        movement: solution.movement.to_string(),
        feasibility_strategy: solution.repair.to_string(),
        file: file_label,
        timestamp: &solution.timestamp,
        time: format_hms(solution.wall_time),
        packages: solution.num_packages(),
        dependencies: solution.num_dependencies(),
        weight: solution.size,
        benefit: solution.benefit,
        seed: solution.seed,
        params: &solution.params,
    })?;
    writer.flush()?;
    Ok(())
}

/// Write a whole portfolio as pretty-printed JSON.
pub fn export_json(path: impl AsRef<Path>, solutions: &[Solution]) -> Result<(), Error> {
    let serialized = serde_json::to_string_pretty(solutions)?;
    fs::write(path.as_ref(), serialized)?;
    Ok(())
}
