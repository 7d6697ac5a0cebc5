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

//! Problem file loader.
//!
//! Expected format:
//!
//! ```text
//! <P> <D> <E> <C>              # packages, dependencies, edges, capacity
//! <benefit_0> ... <benefit_{P-1}>
//! <size_0> ... <size_{D-1}>
//! <p> <d>                      # one edge per line, 0-based
//! }                            # optional terminator
//! ```
//!
//! Bracketed tag lines and blank lines are ignored anywhere. Edges with out-of-range indices
//! are dropped with a warning; malformed edge lines are skipped.

use crate::model::ProblemInstance;
use crate::Error;

use log::*;
use std::fs;
use std::path::Path;

/// Load a problem instance from a file.
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemInstance, Error> {
    let path = path.as_ref();
    debug!("loading problem file {:?}", path);
    let content = fs::read_to_string(path)?;
    parse_problem(&content)
}

/// Parse a problem instance from its textual form.
pub fn parse_problem(content: &str) -> Result<ProblemInstance, Error> {
    let mut lines = content.lines().map(str::trim).filter(|l| {
        !l.is_empty() && !l.starts_with('[') && !l.starts_with('}')
    });

    let header = lines.next().ok_or_else(|| Error::InvalidHeader(String::from("empty file")))?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(Error::InvalidHeader(header.to_string()));
    }
    let num_packages = parse_count(fields[0], header)?;
    let num_dependencies = parse_count(fields[1], header)?;
    let num_edges = parse_count(fields[2], header)?;
    let capacity: u64 =
        fields[3].parse().map_err(|_| Error::InvalidHeader(header.to_string()))?;

    let mut inst = ProblemInstance::new(capacity);

    if num_packages > 0 {
        let benefits = parse_values(lines.next(), "benefits", num_packages)?;
        for (i, benefit) in benefits.into_iter().enumerate() {
            inst.push_package(format!("P{}", i), benefit);
        }
    }
    if num_dependencies > 0 {
        let sizes = parse_values(lines.next(), "sizes", num_dependencies)?;
        for (i, size) in sizes.into_iter().enumerate() {
            inst.push_dependency(format!("D{}", i), size);
        }
    }

    let mut edges = 0usize;
    for line in lines {
        let mut tokens = line.split_whitespace();
        let pair = match (tokens.next(), tokens.next()) {
            (Some(p), Some(d)) => p.parse::<usize>().ok().zip(d.parse::<usize>().ok()),
            _ => None,
        };
        match pair {
            Some((p, d)) => {
                if inst.link(p, d) {
                    edges += 1;
                } else {
                    warn!("dropping out-of-range edge: {} {}", p, d);
                }
            }
            None => debug!("skipping malformed edge line: {}", line),
        }
    }
    if edges != num_edges {
        debug!("header announced {} edges, kept {}", num_edges, edges);
    }

    debug_assert!(inst.is_consistent());
    Ok(inst)
}

fn parse_count(token: &str, header: &str) -> Result<usize, Error> {
    token.parse().map_err(|_| Error::InvalidHeader(header.to_string()))
}

fn parse_values(
    line: Option<&str>,
    section: &'static str,
    expected: usize,
) -> Result<Vec<u64>, Error> {
    let line = line.ok_or(Error::TruncatedSection { section, expected, found: 0 })?;
    let mut values = Vec::with_capacity(expected);
    for token in line.split_whitespace().take(expected) {
        values.push(token.parse::<u64>().map_err(|_| Error::InvalidValue {
            section,
            value: token.to_string(),
        })?);
    }
    if values.len() < expected {
        return Err(Error::TruncatedSection { section, expected, found: values.len() });
    }
    Ok(values)
}
