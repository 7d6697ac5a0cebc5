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

//! # Input / Output
//!
//! The thin I/O boundary around the solver:
//!
//! - [`load_problem`] reads the whitespace-separated problem format (header, benefits line,
//!   sizes line, edge pairs), tolerating bracketed tag lines, blank lines and a trailing `}`.
//! - [`save_report`] writes a solution report: key-value header lines plus the package and
//!   dependency membership bit-vectors; [`load_report`] reads one back, accepting bit-vectors
//!   with or without spaces.
//! - [`append_summary`] appends one CSV row per solution, writing the header only into an empty
//!   file; [`export_json`] dumps a whole portfolio for downstream tooling.
//! - [`validate_solution`] cross-checks a report against its problem file and reports the
//!   individual consistency and feasibility verdicts.

mod problem;
mod report;
mod summary;
mod validator;

pub use problem::{load_problem, parse_problem};
pub use report::{load_report, save_report, SolutionReport};
pub use summary::{append_summary, export_json, format_hms};
pub use validator::{validate_report, validate_solution, ValidationResult};

/// Make a timestamp or label safe for use in a file name.
pub fn sanitize_for_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => '_',
            ':' | '.' => '-',
            c => c,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
