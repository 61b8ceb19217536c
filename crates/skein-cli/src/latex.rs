//! TikZ rendering of an embedding on the Chimera grid.

use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};

use skein_graph::{Chimera, Embedding};

/// Write a standalone TikZ picture of the grid to `<prefix>.tex`.
///
/// Qubits are drawn cell by cell, labelled with the bag that owns them (or
/// left blank); cell-internal, vertical and horizontal couplers are drawn
/// underneath.
pub fn write_latex(prefix: &str, bags: usize, chimera: &Chimera, phi: &Embedding) -> Result<()> {
    let c = chimera.c();
    let (m, n) = (chimera.m(), chimera.n());
    let cell_size = 2 * c;
    let mut out = String::new();

    out.push_str("\\documentclass[12pt]{standalone}\n");
    out.push_str("\\usepackage{tikz, amsmath, amssymb, graphics, setspace,xcolor}\n");
    out.push_str("\\usetikzlibrary{arrows,automata,positioning,shapes,fit}\n");
    out.push_str("\\begin{document}\n");
    out.push_str("\\begin{tikzpicture}\n");
    out.push_str("\\tikzstyle{every state}=[fill=white,draw=black,text=black]\n");

    // Vertices, labelled by owning bag.
    for row in 0..m {
        for col in 0..n {
            for vertex in 0..cell_size {
                let label = row * (n * cell_size) + col * cell_size + vertex;
                let x = col * 5 + 2 * (vertex / c);
                let y = row * 9 + 2 * (vertex % c);
                let owner = (0..bags).find(|&bag| phi.contains(bag, label));
                match owner {
                    Some(bag) => {
                        writeln!(out, "\\node [state] ({label}) at ({x}, -{y}) {{{bag}}};")
                    }
                    None => writeln!(out, "\\node [state] ({label}) at ({x}, -{y}) {{}};"),
                }
                .expect("write to string");
            }
        }
    }

    // Cell-internal couplers.
    for cell in (0..cell_size * m * n).step_by(cell_size) {
        for left in 0..c {
            for right in c..cell_size {
                writeln!(out, "\\path ({}) edge ({});", cell + left, cell + right)
                    .expect("write to string");
            }
        }
    }

    // Vertical couplers (left shores of stacked cells).
    for row in 0..m.saturating_sub(1) {
        for col in 0..n {
            for vertex in 0..c {
                let u = col * cell_size + row * cell_size * n + vertex;
                let v = col * cell_size + (row + 1) * cell_size * n + vertex;
                writeln!(out, "\\path [bend right] ({u}) edge ({v});").expect("write to string");
            }
        }
    }

    // Horizontal couplers (right shores of adjacent cells).
    for row in 0..m {
        for col in 0..n.saturating_sub(1) {
            for vertex in c..cell_size {
                let u = col * cell_size + row * cell_size * n + vertex;
                let v = (col + 1) * cell_size + row * cell_size * n + vertex;
                writeln!(out, "\\path [bend left] ({u}) edge ({v});").expect("write to string");
            }
        }
    }

    out.push_str("\\end{tikzpicture}\n");
    out.push_str("\\end{document}\n");

    let path = format!("{prefix}.tex");
    fs::write(&path, out).with_context(|| format!("failed to write {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_labels_owned_qubits() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("fig");
        let prefix = prefix.to_str().unwrap();

        let chimera = Chimera::new(2, 1, 1);
        let mut phi = Embedding::new(chimera.num_vertices(), 2);
        phi.add_vertex(0, 0);
        phi.add_vertex(1, 2);
        write_latex(prefix, 2, &chimera, &phi).unwrap();

        let body = fs::read_to_string(format!("{prefix}.tex")).unwrap();
        assert!(body.contains("\\node [state] (0) at (0, -0) {0};"));
        assert!(body.contains("\\node [state] (2) at (2, -0) {1};"));
        assert!(body.contains("\\node [state] (1) at (0, -2) {};"));
        // K_{2,2} cell has four internal couplers.
        assert_eq!(body.matches("\\path (").count(), 4);
    }
}
