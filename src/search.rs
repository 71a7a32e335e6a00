//! Rank note files by how often a pattern occurs in them.
//!
//! Files are scored by the number of non-overlapping matches of a regular expression. Only files
//! with at least one match are kept; they are ordered by score, highest first, with ties left in
//! input order, and ranked from 1.

use regex::{Regex, RegexBuilder};
use std::{
    fmt::{Display, Formatter},
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{
    codec::{records, GraphDiagnostic},
    error::{try_push, JigError},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFormat {
    #[default]
    Table,
    Csv,
}

impl FromStr for SearchFormat {
    type Err = JigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "table" => Ok(SearchFormat::Table),
            "csv" => Ok(SearchFormat::Csv),
            other => Err(JigError::Command(format!(
                "unknown format '{other}' (expected 'table' or 'csv')"
            ))),
        }
    }
}

impl Display for SearchFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SearchFormat::Table => write!(f, "table"),
            SearchFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    pub score: usize,
    pub rank: usize,
}

#[derive(Debug, Default, Clone)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub diagnostics: Vec<GraphDiagnostic>,
}

#[derive(Debug, Clone)]
pub struct Searcher {
    pattern: Regex,
}

impl Searcher {
    pub fn new(pattern: &str, ignore_case: bool) -> Result<Self, JigError> {
        Ok(Searcher {
            pattern: RegexBuilder::new(pattern)
                .case_insensitive(ignore_case)
                .build()?,
        })
    }

    /// Number of non-overlapping matches in `content`.
    pub fn score(&self, content: &str) -> usize {
        self.pattern.find_iter(content).count()
    }

    /// Score every path read from `reader` (one per line) and rank the matches. Lines that are
    /// not valid UTF-8 are reported as malformed and skipped.
    pub fn rank_reader<R: BufRead>(&self, reader: R) -> Result<SearchResults, JigError> {
        let mut paths = Vec::new();
        let mut skipped = Vec::new();
        for record in records(reader) {
            let record = record?;
            match record.text().map(str::trim_end) {
                Some("") => {}
                Some(path) => try_push(&mut paths, path.to_string())?,
                None => try_push(
                    &mut skipped,
                    GraphDiagnostic::malformed(record.line, record.lossy()),
                )?,
            }
        }
        let mut results = self.rank_paths(&paths)?;
        results.diagnostics.try_reserve(skipped.len())?;
        results.diagnostics.splice(0..0, skipped);
        Ok(results)
    }

    pub fn rank_paths<S: AsRef<str>>(&self, paths: &[S]) -> Result<SearchResults, JigError> {
        let mut results = SearchResults::default();
        for path in paths {
            let path = path.as_ref();
            let content = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    try_push(
                        &mut results.diagnostics,
                        GraphDiagnostic::unreadable(path, e.to_string()),
                    )?;
                    continue;
                }
            };
            let score = self.score(&String::from_utf8_lossy(&content));
            if score > 0 {
                try_push(
                    &mut results.hits,
                    SearchHit {
                        path: path.to_string(),
                        score,
                        rank: 0,
                    },
                )?;
            }
        }

        // Stable, so equal scores keep input order
        results.hits.sort_by(|a, b| b.score.cmp(&a.score));
        for (pos, hit) in results.hits.iter_mut().enumerate() {
            hit.rank = pos + 1;
        }
        Ok(results)
    }
}

pub fn write_hits<W: Write>(
    out: &mut W,
    hits: &[SearchHit],
    format: SearchFormat,
) -> Result<(), JigError> {
    match format {
        SearchFormat::Table => {
            writeln!(out, "{:<5} {:<10} Path", "Rank", "Score")?;
            writeln!(out, "{}", "-".repeat(63))?;
            for hit in hits {
                writeln!(out, "{:<5} {:<10} {}", hit.rank, hit.score, hit.path)?;
            }
        }
        SearchFormat::Csv => {
            writeln!(out, "rank,score,path")?;
            for hit in hits {
                writeln!(out, "{},{},{}", hit.rank, hit.score, hit.path)?;
            }
        }
    }
    Ok(())
}
