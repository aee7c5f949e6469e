//! Plain-text edge lists.
//!
//! ```text
//! # a directed triangle with one extra isolated vertex
//! vertices 4
//! 0 1
//! 1 2
//! 2 0
//! ```
//!
//! Each non-blank, non-comment line is either `vertices N` or a `source target`
//! pair. The vertex count is the larger of the `vertices` directive and one
//! past the largest ID mentioned by an edge. Neither may exceed
//! [`MAX_VERTEX_COUNT`].

use csi_common::VertexId;
use tracing::debug;

use crate::{Graph, GraphError, GraphView};

/// Largest vertex count an edge list may ask for.
pub const MAX_VERTEX_COUNT: usize = 1 << 24;

/// Parses an edge list into a graph with unit payloads.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] naming the first malformed line.
pub fn parse_edge_list(text: &str) -> Result<Graph, GraphError> {
    let mut declared = 0usize;
    let mut edges: Vec<(usize, usize)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["vertices", n] => {
                declared = declared.max(parse_number(n, line_no, MAX_VERTEX_COUNT)?);
            }
            [s, t] => {
                edges.push((
                    parse_number(s, line_no, MAX_VERTEX_COUNT - 1)?,
                    parse_number(t, line_no, MAX_VERTEX_COUNT - 1)?,
                ));
            }
            _ => {
                return Err(GraphError::parse(
                    line_no,
                    format!("expected `source target` or `vertices N`, found `{line}`"),
                ));
            }
        }
    }

    let n_vertices = edges
        .iter()
        .map(|&(s, t)| s.max(t) + 1)
        .max()
        .unwrap_or(0)
        .max(declared);

    let mut g = Graph::with_capacity(n_vertices, edges.len());
    for _ in 0..n_vertices {
        g.insert_vertex(());
    }
    for (s, t) in edges {
        g.insert_edge(VertexId::from(s), VertexId::from(t), ())?;
    }
    debug!("parsed edge list: {} vertices, {} edges", n_vertices, g.edge_count());
    Ok(g)
}

fn parse_number(field: &str, line: usize, max: usize) -> Result<usize, GraphError> {
    let n: usize = field
        .parse()
        .map_err(|_| GraphError::parse(line, format!("`{field}` is not a vertex number")))?;
    if n > max {
        return Err(GraphError::parse(line, format!("{n} exceeds the limit of {max}")));
    }
    Ok(n)
}
