//! Line-oriented loaders and dumps for node and edge lists.
//!
//! Node lines read `<id> <weight>`. Edge lines read
//! `<id>,<id>,... <weight>`; edge ids are not part of the input and are
//! assigned sequentially in file order.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_core::NodeId;

use crate::hypergraph::WeightedHypergraph;
use crate::policy::RemovalPolicy;

/// Options applied while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Forces every node and edge weight to one.
    pub unweighted: bool,
}

/// Reads a strict-policy graph from a node source and an edge source.
pub fn read_hypergraph<N, E>(
    nodes: N,
    edges: E,
    options: LoadOptions,
) -> Result<WeightedHypergraph, DsloError>
where
    N: BufRead,
    E: BufRead,
{
    let mut graph = WeightedHypergraph::with_policy(RemovalPolicy::Strict);
    for (idx, line) in nodes.lines().enumerate() {
        let line = line.map_err(|err| read_failure(idx, err))?;
        let Some((id, weight)) = parse_node_line(&line, idx + 1)? else {
            continue;
        };
        let weight = if options.unweighted { 1.0 } else { weight };
        graph.add_node(id, weight)?;
    }
    for (idx, line) in edges.lines().enumerate() {
        let line = line.map_err(|err| read_failure(idx, err))?;
        let Some((members, weight)) = parse_edge_line(&line, idx + 1)? else {
            continue;
        };
        let weight = if options.unweighted { 1.0 } else { weight };
        graph.push_edge(&members, weight)?;
    }
    Ok(graph)
}

/// Loads a graph from a node file and an edge file.
pub fn load_hypergraph(
    node_path: &Path,
    edge_path: &Path,
    options: LoadOptions,
) -> Result<WeightedHypergraph, DsloError> {
    let nodes = open(node_path)?;
    let edges = open(edge_path)?;
    read_hypergraph(nodes, edges, options).map_err(|err| match err {
        DsloError::Io(info) => DsloError::Io(
            info.with_context("nodes", node_path.display())
                .with_context("edges", edge_path.display()),
        ),
        other => other,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, DsloError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| DsloError::io("open-input", path.display(), err))
}

fn read_failure(idx: usize, err: std::io::Error) -> DsloError {
    DsloError::Io(ErrorInfo::new("read-input", err.to_string()).with_context("line", idx + 1))
}

fn malformed(line_no: usize, line: &str, expected: &str) -> DsloError {
    DsloError::Io(
        ErrorInfo::new("malformed-line", format!("expected {expected}"))
            .with_context("line", line_no)
            .with_context("content", line.trim()),
    )
}

fn parse_node_line(line: &str, line_no: usize) -> Result<Option<(NodeId, f64)>, DsloError> {
    let mut fields = line.split_whitespace();
    let Some(id) = fields.next() else {
        return Ok(None);
    };
    let id = id
        .parse::<u64>()
        .map_err(|_| malformed(line_no, line, "`<id> <weight>`"))?;
    let weight = fields
        .next()
        .and_then(|field| field.parse::<f64>().ok())
        .ok_or_else(|| malformed(line_no, line, "`<id> <weight>`"))?;
    Ok(Some((NodeId::from_raw(id), weight)))
}

fn parse_edge_line(line: &str, line_no: usize) -> Result<Option<(Vec<NodeId>, f64)>, DsloError> {
    let mut fields = line.split_whitespace();
    let Some(members) = fields.next() else {
        return Ok(None);
    };
    let weight = fields
        .next()
        .and_then(|field| field.parse::<f64>().ok())
        .ok_or_else(|| malformed(line_no, line, "`<id,id,...> <weight>`"))?;
    let members = members
        .split(',')
        .filter(|field| !field.is_empty())
        .map(|field| field.parse::<u64>().map(NodeId::from_raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed(line_no, line, "comma separated node ids"))?;
    Ok(Some((members, weight)))
}

/// Renders one `<id> <weight>` line per node.
pub fn nodes_to_lines(graph: &WeightedHypergraph) -> String {
    let mut out = String::new();
    for (id, weight) in graph.nodes() {
        out.push_str(&format!("{id} {weight}\n"));
    }
    out
}

/// Renders one `<id,id,...> <weight>` line per edge.
pub fn edges_to_lines(graph: &WeightedHypergraph) -> String {
    let mut out = String::new();
    for (_, members, weight) in graph.edges() {
        let members: Vec<String> = members.iter().map(|node| node.to_string()).collect();
        out.push_str(&format!("{} {weight}\n", members.join(",")));
    }
    out
}

/// Writes a graph as a node file and an edge file readable by [`load_hypergraph`].
pub fn write_dump(
    graph: &WeightedHypergraph,
    node_path: &Path,
    edge_path: &Path,
) -> Result<(), DsloError> {
    write_file(node_path, &nodes_to_lines(graph))?;
    write_file(edge_path, &edges_to_lines(graph))
}

fn write_file(path: &Path, contents: &str) -> Result<(), DsloError> {
    let mut file = File::create(path).map_err(|err| DsloError::io("create-output", path.display(), err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| DsloError::io("write-output", path.display(), err))
}
