//! Idealized bipartite slot model for planning Chimera placements.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use skein_embed::oct::common::compute_bipartitions;
use skein_graph::{Chimera, Embedding, Graph};

use crate::error::{PlaceError, PlaceResult};

/// How program vertices are assigned to the two partites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingScheme {
    /// Clique placement: every vertex sits on both partites.
    Native,
    /// OCT placement: transversal vertices sit on both partites, the
    /// bipartite shores on one each.
    Oct,
}

/// How OCT-internal edges are wired into the slot model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReductionScheme {
    /// Keep both directions of every OCT-internal edge. Conservative:
    /// consumes more span but needs no later optimization.
    None,
    /// Keep only the lexicographically first direction, assuming a
    /// reduction pass will tighten the spans afterwards.
    Full,
}

/// A placement of program vertices onto two ordered partites of slots.
///
/// Slot `i` of a partite corresponds to cell `i / c` of the matching Chimera
/// dimension. The placement cost of a slot is the width of the contiguous
/// cell span covering all of its opposite-partite neighbors; the sum over
/// all slots is `qubits_used`, the number of physical qubits the final
/// embedding will consume.
#[derive(Debug, Clone)]
pub struct VirtualHardware {
    /// Slot index -> program vertex, per partite.
    partites: [Vec<usize>; 2],
    /// Program vertex -> opposite-partite neighbors, per partite.
    neighbors: [Vec<Vec<usize>>; 2],
    /// Program vertex -> slot index, per partite. Inverse of `partites`,
    /// kept consistent by `evaluate`.
    positions: [Vec<usize>; 2],
    /// Slot index -> occupied cell span, per partite. `None` for slots
    /// whose vertex has no wired neighbor.
    spans: [Vec<Option<(usize, usize)>>; 2],
    distinct_vertices: usize,
    qubits_used: usize,
    chimera_c: usize,
}

impl VirtualHardware {
    /// Create an empty slot model for `size` program vertices on hardware
    /// with cell size `c`.
    pub fn new(size: usize, c: usize) -> Self {
        Self {
            partites: [Vec::new(), Vec::new()],
            neighbors: [vec![Vec::new(); size], vec![Vec::new(); size]],
            positions: [vec![0; size], vec![0; size]],
            spans: [vec![None; size], vec![None; size]],
            distinct_vertices: size,
            qubits_used: 0,
            chimera_c: c,
        }
    }

    /// Populate the slot model from a program graph.
    ///
    /// Expects a freshly constructed model; populating twice accumulates
    /// slots. `oct` is the transversal for [`EmbeddingScheme::Oct`] and
    /// ignored for [`EmbeddingScheme::Native`]. Fails with
    /// [`PlaceError::InsufficientCapacity`] when a partite would not fit its
    /// Chimera dimension. Finishes with an [`evaluate`](Self::evaluate)
    /// pass, so the model is immediately ready for
    /// [`reduce`](Self::reduce) or [`embed_in_chimera`](Self::embed_in_chimera).
    pub fn embed(
        &mut self,
        program: &Graph,
        chimera: &Chimera,
        scheme: EmbeddingScheme,
        reduction: ReductionScheme,
        oct: &[usize],
    ) -> PlaceResult<()> {
        match scheme {
            EmbeddingScheme::Native => self.embed_native(program, chimera)?,
            EmbeddingScheme::Oct => self.embed_oct(program, chimera, reduction, oct)?,
        }
        self.evaluate();
        debug!(
            scheme = ?scheme,
            qubits_used = self.qubits_used,
            "virtual hardware populated"
        );
        Ok(())
    }

    /// Clique placement: every vertex on both partites, each undirected edge
    /// wired once in its lexicographically first direction so evaluation
    /// does not double-count it.
    fn embed_native(&mut self, program: &Graph, chimera: &Chimera) -> PlaceResult<()> {
        let capacity = chimera.m().min(chimera.n()) * chimera.c();
        if program.n() > capacity {
            return Err(PlaceError::InsufficientCapacity {
                required: program.n(),
                available: capacity,
            });
        }

        for i in program.vertices() {
            self.partites[0].push(i);
            self.partites[1].push(i);
            for j in program.vertices() {
                if i <= j && program.has_edge(i, j) {
                    self.neighbors[0][i].push(j);
                    self.neighbors[1][i].push(j);
                }
            }
            // Self-reference pins every slot's span to its own cell.
            self.neighbors[0][i].push(i);
            self.neighbors[1][i].push(i);
        }
        Ok(())
    }

    /// OCT placement: transversal vertices duplicated on both partites, the
    /// 2-colored complement split across them.
    fn embed_oct(
        &mut self,
        program: &Graph,
        chimera: &Chimera,
        reduction: ReductionScheme,
        oct: &[usize],
    ) -> PlaceResult<()> {
        let mut in_oct = vec![false; program.n()];
        for &v in oct {
            in_oct[v] = true;
        }
        let vertices: Vec<usize> = program.vertices().filter(|&v| !in_oct[v]).collect();
        let (left, right) = compute_bipartitions(program, &vertices);

        let bigger_partite = left.len().max(right.len()) + oct.len();
        let smaller_partite = left.len().min(right.len()) + oct.len();
        let bigger_hardware = chimera.c() * chimera.m().max(chimera.n());
        let smaller_hardware = chimera.c() * chimera.m().min(chimera.n());
        if bigger_partite > bigger_hardware {
            return Err(PlaceError::InsufficientCapacity {
                required: bigger_partite,
                available: bigger_hardware,
            });
        }
        if smaller_partite > smaller_hardware {
            return Err(PlaceError::InsufficientCapacity {
                required: smaller_partite,
                available: smaller_hardware,
            });
        }

        for &v in oct {
            self.partites[0].push(v);
            self.partites[1].push(v);
        }
        for &v in &left {
            self.partites[0].push(v);
        }
        for &v in &right {
            self.partites[1].push(v);
        }

        for &u in &left {
            for &v in oct {
                if program.has_edge(u, v) {
                    self.neighbors[0][u].push(v);
                    self.neighbors[1][v].push(u);
                }
            }
            for &v in &right {
                if program.has_edge(u, v) {
                    self.neighbors[0][u].push(v);
                    self.neighbors[1][v].push(u);
                }
            }
        }
        for &u in &right {
            for &v in oct {
                if program.has_edge(u, v) {
                    self.neighbors[1][u].push(v);
                    self.neighbors[0][v].push(u);
                }
            }
        }

        // OCT-internal edges, plus the self-reference of each duplicate.
        for &u in oct {
            for &v in oct {
                let keep = match reduction {
                    ReductionScheme::Full => u == v || (u < v && program.has_edge(u, v)),
                    ReductionScheme::None => u == v || program.has_edge(u, v),
                };
                if keep {
                    self.neighbors[0][u].push(v);
                    self.neighbors[1][v].push(u);
                }
            }
        }
        Ok(())
    }

    /// Number of distinct program vertices the model was sized for.
    #[inline]
    pub fn distinct_vertices(&self) -> usize {
        self.distinct_vertices
    }

    /// Slots of one partite, in order.
    pub fn partite(&self, index: usize) -> &[usize] {
        &self.partites[index]
    }

    /// Current placement cost: total qubits the final embedding will use.
    #[inline]
    pub fn qubits_used(&self) -> usize {
        self.qubits_used
    }

    /// Recompute position maps, slot spans and the total cost from scratch.
    pub fn evaluate(&mut self) {
        self.qubits_used = 0;
        for partite in 0..2 {
            for (slot, &vertex) in self.partites[partite].iter().enumerate() {
                self.positions[partite][vertex] = slot;
                self.spans[partite][slot] = None;
            }
        }
        for partite in 0..2 {
            for slot in 0..self.partites[partite].len() {
                self.qubits_used += self.evaluate_slot(partite, slot);
            }
        }
    }

    /// Span of one slot: the contiguous cell range covering all of its
    /// vertex's opposite-partite neighbors. Returns the span width (the
    /// number of qubits the slot will occupy); a slot with no wired
    /// neighbor still occupies its home-cell qubit and scores 1.
    fn evaluate_slot(&mut self, partite: usize, slot: usize) -> usize {
        let vertex = self.partites[partite][slot];
        let opposite = 1 - partite;
        let mut span: Option<(usize, usize)> = None;
        for &neighbor in &self.neighbors[partite][vertex] {
            let cell = self.positions[opposite][neighbor] / self.chimera_c;
            span = Some(match span {
                None => (cell, cell),
                Some((low, high)) => (low.min(cell), high.max(cell)),
            });
        }
        self.spans[partite][slot] = span;
        span.map_or(1, |(low, high)| high - low + 1)
    }

    /// Best-improvement 2-exchange local search.
    ///
    /// Repeatedly evaluates every same-partite slot swap, applies the single
    /// best strictly improving one, and stops at a local optimum. The cost
    /// is a bounded non-negative integer that strictly decreases with every
    /// accepted swap, so this terminates; calling it again at the fixed
    /// point changes nothing.
    pub fn reduce(&mut self) {
        let mut last = self.qubits_used;
        self.apply_best_exchange();
        while self.qubits_used < last {
            trace!(qubits_used = self.qubits_used, "2-exchange improved");
            last = self.qubits_used;
            self.apply_best_exchange();
        }
        debug!(qubits_used = self.qubits_used, "2-exchange converged");
    }

    /// Try every same-partite pair swap and keep the best improving one.
    fn apply_best_exchange(&mut self) {
        let current = self.qubits_used;
        let mut best: Option<(usize, usize, usize, usize)> = None;

        for partite in 0..2 {
            for first in 0..self.partites[partite].len() {
                for second in (first + 1)..self.partites[partite].len() {
                    let score = self.exchange(partite, first, second);
                    let threshold = best.map_or(current, |(score, ..)| score);
                    if score < threshold {
                        best = Some((score, partite, first, second));
                    }
                    // Swap back; evaluation restores the previous state.
                    self.exchange(partite, first, second);
                }
            }
        }

        if let Some((_, partite, first, second)) = best {
            self.exchange(partite, first, second);
        }
    }

    /// Swap two slots of a partite, re-evaluate, and report the new cost.
    fn exchange(&mut self, partite: usize, first: usize, second: usize) -> usize {
        self.partites[partite].swap(first, second);
        self.evaluate();
        self.qubits_used
    }

    /// Materialize the placement as Chimera qubit assignments.
    ///
    /// Slot `i` of the left partite owns left-shore offset `i % c` of cell
    /// column `i / c` and extends down the rows of its span; the right
    /// partite mirrors this along rows. Isolated slots occupy the single
    /// row or column cell at the start of the grid.
    pub fn embed_in_chimera(&self, chimera: &Chimera) -> Embedding {
        let mut phi = Embedding::new(chimera.num_vertices(), self.distinct_vertices);
        let cell_jump = 2 * chimera.c();
        let row_jump = cell_jump * chimera.n();

        for (slot, &vertex) in self.partites[0].iter().enumerate() {
            let (low, high) = self.spans[0][slot].unwrap_or((0, 0));
            let mut qubit = (slot / chimera.c()) * cell_jump + slot % chimera.c() + low * row_jump;
            phi.add_vertex(vertex, qubit);
            for _ in low..high {
                qubit += row_jump;
                phi.add_vertex(vertex, qubit);
            }
        }

        for (slot, &vertex) in self.partites[1].iter().enumerate() {
            let (low, high) = self.spans[1][slot].unwrap_or((0, 0));
            let mut qubit = (slot / chimera.c()) * row_jump
                + slot % chimera.c()
                + chimera.c()
                + low * cell_jump;
            phi.add_vertex(vertex, qubit);
            for _ in low..high {
                qubit += cell_jump;
                phi.add_vertex(vertex, qubit);
            }
        }

        phi
    }
}
