//! File readers and writers for graphs, embeddings and reports.
//!
//! Input files are whitespace-separated integers. A program file starts with
//! the vertex count, followed by one ordering entry per vertex, followed by
//! edge pairs; a hardware file additionally carries the graph diameter right
//! after the vertex count. Both directions of every edge pair are inserted.

use std::fmt::Write as _;
use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use skein_embed::EmbeddingAlgorithm;
use skein_graph::{Embedding, Graph, Hardware};
use skein_place::VirtualHardware;

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            inner: source.split_whitespace(),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| anyhow!("unexpected end of file while reading {what}"))?;
        token
            .parse()
            .with_context(|| format!("invalid {what}: '{token}'"))
    }

    /// Next edge pair, or `None` at end of input.
    fn next_edge(&mut self) -> Result<Option<(usize, usize)>> {
        let Some(token) = self.inner.next() else {
            return Ok(None);
        };
        let u = token
            .parse()
            .with_context(|| format!("invalid edge endpoint: '{token}'"))?;
        let v = self.next_usize("edge endpoint")?;
        Ok(Some((u, v)))
    }
}

fn parse_graph(tokens: &mut Tokens<'_>) -> Result<Graph> {
    let n = tokens.next_usize("vertex count")?;
    let mut ordering = Vec::with_capacity(n);
    for _ in 0..n {
        ordering.push(tokens.next_usize("ordering entry")?);
    }

    let mut graph = Graph::new(n);
    graph
        .install_ordering(&ordering)
        .context("ordering section is not a permutation of the vertex set")?;
    while let Some((u, v)) = tokens.next_edge()? {
        graph
            .connect(u, v)
            .with_context(|| format!("edge ({u}, {v}) out of range"))?;
    }
    Ok(graph)
}

/// Read a program graph.
pub fn read_program(path: &str) -> Result<Graph> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read program file {path}"))?;
    parse_graph(&mut Tokens::new(&source))
        .with_context(|| format!("malformed program file {path}"))
}

/// Read only the vertex count of a program file (complete-graph embedders).
pub fn read_program_order(path: &str) -> Result<usize> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read program file {path}"))?;
    Tokens::new(&source).next_usize("vertex count")
}

/// Read a hardware graph with its diameter.
pub fn read_hardware(path: &str) -> Result<Hardware> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read hardware file {path}"))?;
    let mut tokens = Tokens::new(&source);
    let n = tokens.next_usize("vertex count")?;
    let diameter = tokens.next_usize("diameter")?;

    let mut ordering = Vec::with_capacity(n);
    for _ in 0..n {
        ordering.push(tokens.next_usize("ordering entry")?);
    }
    let mut graph = Graph::new(n);
    graph
        .install_ordering(&ordering)
        .context("ordering section is not a permutation of the vertex set")?;
    while let Some((u, v)) = tokens.next_edge()? {
        graph
            .connect(u, v)
            .with_context(|| format!("edge ({u}, {v}) out of range"))?;
    }
    Ok(Hardware::new(graph, diameter))
}

/// Write per-bag qubit lists to `<prefix>.embedding`.
pub fn write_embedding(prefix: &str, phi: &Embedding) -> Result<()> {
    let mut out = String::new();
    for bag in 0..phi.bags() {
        let vertices: Vec<String> = phi.bag_vertices(bag).map(|v| v.to_string()).collect();
        if vertices.is_empty() {
            writeln!(out, "{bag}:").expect("write to string");
        } else {
            writeln!(out, "{bag}: {}", vertices.join(", ")).expect("write to string");
        }
    }
    let path = format!("{prefix}.embedding");
    fs::write(&path, out).with_context(|| format!("failed to write {path}"))
}

/// Write `(partite, slot, vertex)` triples to `<prefix>.vh`.
pub fn write_virtual_hardware(prefix: &str, vh: &VirtualHardware) -> Result<()> {
    let mut out = String::new();
    writeln!(out, "{} {}", vh.partite(0).len(), vh.partite(1).len()).expect("write to string");
    for partite in 0..2 {
        for (slot, &vertex) in vh.partite(partite).iter().enumerate() {
            writeln!(out, "{partite} {slot} {vertex}").expect("write to string");
        }
    }
    let path = format!("{prefix}.vh");
    fs::write(&path, out).with_context(|| format!("failed to write {path}"))
}

/// Write elapsed seconds to `<prefix>.timing`.
pub fn write_timing(prefix: &str, elapsed: Duration) -> Result<()> {
    let path = format!("{prefix}.timing");
    fs::write(&path, format!("{:.6}\n", elapsed.as_secs_f64()))
        .with_context(|| format!("failed to write {path}"))
}

/// JSON report written next to the text outputs when `--json` is set.
#[derive(Debug, Serialize)]
pub struct EmbeddingReport<'a> {
    pub algorithm: EmbeddingAlgorithm,
    pub qubits_used: usize,
    pub elapsed_seconds: f64,
    pub bags: Vec<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oct_solution: Option<&'a [usize]>,
}

impl<'a> EmbeddingReport<'a> {
    pub fn new(
        algorithm: EmbeddingAlgorithm,
        phi: &Embedding,
        elapsed: Duration,
        oct_solution: Option<&'a [usize]>,
    ) -> Self {
        Self {
            algorithm,
            qubits_used: phi.qubits_used(),
            elapsed_seconds: elapsed.as_secs_f64(),
            bags: (0..phi.bags()).map(|b| phi.bag_vertices(b).collect()).collect(),
            oct_solution,
        }
    }
}

/// Write the report to `<prefix>.json`.
pub fn write_json_report(prefix: &str, report: &EmbeddingReport<'_>) -> Result<()> {
    let path = format!("{prefix}.json");
    let body = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(&path, body).with_context(|| format!("failed to write {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.txt");
        fs::write(&path, "3\n0 1 2\n0 1\n1 2\n0 2\n").unwrap();

        let g = read_program(path.to_str().unwrap()).unwrap();
        assert_eq!(g.n(), 3);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert!(g.has_edge(0, 2));
        assert_eq!(g.ordering(), &[0, 1, 2]);
    }

    #[test]
    fn test_parse_hardware_with_diameter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hw.txt");
        fs::write(&path, "4 2\n3 2 1 0\n0 1\n1 2\n2 3\n").unwrap();

        let hw = read_hardware(path.to_str().unwrap()).unwrap();
        assert_eq!(hw.n(), 4);
        assert_eq!(hw.diameter(), 2);
        assert_eq!(hw.graph().ordering(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_bad_ordering_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "3\n0 0 2\n").unwrap();
        assert!(read_program(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "5\n0 1 2\n").unwrap();
        assert!(read_program(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_write_embedding_format() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("out");
        let prefix = prefix.to_str().unwrap();

        let mut phi = Embedding::new(4, 2);
        phi.add_vertex(0, 1);
        phi.add_vertex(0, 3);
        write_embedding(prefix, &phi).unwrap();

        let body = fs::read_to_string(format!("{prefix}.embedding")).unwrap();
        assert_eq!(body, "0: 1, 3\n1:\n");
    }
}
