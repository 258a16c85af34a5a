//! Include graph and config combining

use crate::config::{Config, Directive, Payload, Status};
use crate::error::{ErrorKind, ParseError};

/// Directed graph of "file includes file" edges, keyed by config index
#[derive(Debug, Clone, Default)]
pub struct IncludeGraph {
    edges: Vec<Vec<usize>>,
}

impl IncludeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        let needed = from.max(to) + 1;
        if self.edges.len() < needed {
            self.edges.resize_with(needed, Vec::new);
        }
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
        }
    }

    /// Collect the edges of an already parsed payload.
    ///
    /// Fails if an include points past the end of `payload.config`.
    pub fn from_payload(payload: &Payload) -> Result<Self, ParseError> {
        let mut graph = Self::new();
        for (idx, config) in payload.config.iter().enumerate() {
            collect_edges(&mut graph, payload, idx, &config.parsed)?;
        }
        Ok(graph)
    }

    /// Return the first cycle reachable from `start` as a list of config
    /// indices, first and last element equal.
    pub fn find_cycle(&self, start: usize) -> Option<Vec<usize>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        if start >= self.edges.len() {
            return None;
        }

        let mut marks = vec![Mark::New; self.edges.len()];
        // (node, next child position)
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::Active;

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let Some(&next) = self.edges[node].get(top.1) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;

            match marks[next] {
                Mark::Active => {
                    let from = stack.iter().position(|&(n, _)| n == next).unwrap_or(0);
                    let mut cycle: Vec<usize> = stack[from..].iter().map(|&(n, _)| n).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                Mark::New => {
                    marks[next] = Mark::Active;
                    stack.push((next, 0));
                }
                Mark::Done => {}
            }
        }

        None
    }
}

fn collect_edges(
    graph: &mut IncludeGraph,
    payload: &Payload,
    from: usize,
    block: &[Directive],
) -> Result<(), ParseError> {
    for stmt in block {
        if let Some(includes) = &stmt.includes {
            for &idx in includes {
                if idx >= payload.config.len() {
                    return Err(bad_index(idx, payload, from, stmt.line));
                }
                graph.add_edge(from, idx);
            }
        }
        if let Some(children) = &stmt.block {
            collect_edges(graph, payload, from, children)?;
        }
    }
    Ok(())
}

fn bad_index(idx: usize, payload: &Payload, from: usize, line: usize) -> ParseError {
    let mut err = ParseError::new(
        ErrorKind::Include,
        format!("include config with index: {}", idx),
    )
    .with_line(line);
    if let Some(config) = payload.config.get(from) {
        err = err.with_file(config.file.clone());
    }
    err
}

/// Build the error reported for an include cycle
pub fn cycle_error(files: &[&str]) -> ParseError {
    let mut err = ParseError::new(
        ErrorKind::Cycle,
        format!("include cycle detected: {}", files.join(" -> ")),
    );
    if let Some(first) = files.first() {
        err = err.with_file(first.to_string());
    }
    err
}

impl Payload {
    /// Inline every expanded include, producing a payload with one Config.
    ///
    /// The combined Config takes the entry file's name, fails if any source
    /// Config failed and carries every per-file error. Nodes are tagged with
    /// the file they came from.
    pub fn combined(&self) -> Result<Payload, ParseError> {
        let Some(entry) = self.config.first() else {
            return Ok(self.clone());
        };

        let graph = IncludeGraph::from_payload(self)?;
        if let Some(cycle) = graph.find_cycle(0) {
            let files: Vec<&str> = cycle
                .iter()
                .filter_map(|&i| self.config.get(i).map(|c| c.file.as_str()))
                .collect();
            return Err(cycle_error(&files));
        }

        let mut combined = Config::new(entry.file.clone());
        for config in &self.config {
            if config.status == Status::Failed {
                combined.status = Status::Failed;
            }
            combined.errors.extend(config.errors.iter().cloned());
        }
        combined.parsed = self.inline(0, &entry.parsed)?;

        Ok(Payload {
            status: self.status,
            errors: self.errors.clone(),
            config: vec![combined],
        })
    }

    fn inline(&self, idx: usize, block: &[Directive]) -> Result<Vec<Directive>, ParseError> {
        let file = &self.config[idx].file;
        let mut out = Vec::with_capacity(block.len());

        for stmt in block {
            if stmt.is_include() {
                for &child in stmt.includes.iter().flatten() {
                    let config = self
                        .config
                        .get(child)
                        .ok_or_else(|| bad_index(child, self, idx, stmt.line))?;
                    out.extend(self.inline(child, &config.parsed)?);
                }
                continue;
            }

            let mut stmt = stmt.clone();
            if stmt.file.is_none() {
                stmt.file = Some(file.clone());
            }
            if let Some(children) = stmt.block.take() {
                stmt.block = Some(self.inline(idx, &children)?);
            }
            out.push(stmt);
        }

        Ok(out)
    }
}
