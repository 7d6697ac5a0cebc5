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

//! Module containing all error types
//!
//! Errors only arise at the I/O boundary (loading a problem file, writing or reading a report,
//! appending to the CSV summary). The solver core never fails: move operators and repair report
//! their outcome through booleans and options.

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the filesystem
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The header line of a problem file could not be parsed
    #[error("Invalid problem header: {0}")]
    InvalidHeader(String),
    /// A section of a problem file contains fewer values than the header announced
    #[error("Section {section} is truncated: expected {expected} values, found {found}")]
    TruncatedSection {
        /// Name of the offending section
        section: &'static str,
        /// Number of values announced by the header
        expected: usize,
        /// Number of values actually found
        found: usize,
    },
    /// A value in a problem file could not be parsed as an unsigned integer
    #[error("Invalid value in section {section}: {value}")]
    InvalidValue {
        /// Name of the offending section
        section: &'static str,
        /// The offending token
        value: String,
    },
    /// A mandatory section of a report file is missing
    #[error("Report is missing the section: {0}")]
    MissingSection(&'static str),
    /// Error propagated from the CSV writer
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    /// Error propagated from the JSON serializer
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}
