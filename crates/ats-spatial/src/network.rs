//! Path network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length`, geometry index)
//! are sorted by source node and indexed by `EdgeId`.  Iteration over a
//! node's outgoing edges is therefore a contiguous memory scan — ideal for
//! the router's inner loop.
//!
//! # Shared geometry
//!
//! [`PathNetworkBuilder::add_path`] registers one polyline per undirected
//! segment and two directed edges referencing it.  The movement engine picks
//! its traversal direction when it enters an edge, so the polyline's stored
//! orientation does not matter.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps planar coordinates to the nearest `NodeId`.
//! Used at bootstrap to snap building positions to path nodes.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ats_core::{EdgeId, NodeId, Point};

use crate::LengthIndexedLine;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D point with the associated
/// `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PathNetwork ───────────────────────────────────────────────────────────────

/// Directed path graph in CSR format plus shared segment geometry and a
/// spatial index for node snapping.
///
/// All per-edge fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`PathNetworkBuilder`].
pub struct PathNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each directed edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each directed edge.
    pub edge_to: Vec<NodeId>,

    /// Arc length of each directed edge in metres (equal for both
    /// directions of a segment).
    pub edge_length: Vec<f64>,

    /// Index into `geometries` for each directed edge.
    edge_geometry: Vec<u32>,

    /// One polyline per undirected segment, shared by its directed twins.
    geometries: Vec<LengthIndexedLine>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl PathNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        PathNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Position of `node`.
    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// The shared polyline geometry of `edge`.
    #[inline]
    pub fn geometry(&self, edge: EdgeId) -> &LengthIndexedLine {
        &self.geometries[self.edge_geometry[edge.index()] as usize]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest path node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: Point, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── PathNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`PathNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and undirected segments in any order.  `build()`
/// sorts the directed edges by source node, constructs the CSR arrays, and
/// bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use ats_core::Point;
/// use ats_spatial::PathNetworkBuilder;
///
/// let mut b = PathNetworkBuilder::new();
/// let a = b.add_node(Point::new(0.0, 0.0));
/// let c = b.add_node(Point::new(1_200.0, 0.0));
/// b.add_link(a, c); // straight segment, both directions
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2);
/// ```
pub struct PathNetworkBuilder {
    nodes: Vec<Point>,
    geometries: Vec<LengthIndexedLine>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    length: f64,
    geometry: u32,
}

impl PathNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            geometries: Vec::new(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and segments to reduce
    /// reallocations when bulk-loading from GIS layers.
    pub fn with_capacity(nodes: usize, segments: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            geometries: Vec::with_capacity(segments),
            raw_edges: Vec::with_capacity(segments * 2),
        }
    }

    /// Add a path node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add an undirected segment between `a` and `b` with explicit polyline
    /// geometry.  One endpoint vertex must equal `a`'s position and the
    /// other `b`'s — the movement engine snaps agents onto these vertices.
    ///
    /// Registers the geometry once and two directed edges referencing it.
    pub fn add_path(&mut self, a: NodeId, b: NodeId, vertices: Vec<Point>) {
        let line = LengthIndexedLine::new(vertices);
        debug_assert!(
            (line.start_point() == self.nodes[a.index()]
                && line.end_point() == self.nodes[b.index()])
                || (line.start_point() == self.nodes[b.index()]
                    && line.end_point() == self.nodes[a.index()]),
            "segment geometry must terminate at its endpoint nodes"
        );
        let length = line.length();
        let geometry = self.geometries.len() as u32;
        self.geometries.push(line);
        self.raw_edges.push(RawEdge { from: a, to: b, length, geometry });
        self.raw_edges.push(RawEdge { from: b, to: a, length, geometry });
    }

    /// Convenience: add a straight segment between `a` and `b`.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        let va = self.nodes[a.index()];
        let vb = self.nodes[b.index()];
        self.add_path(a, b, vec![va, vb]);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.geometries.len()
    }

    /// Consume the builder and produce a [`PathNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree
    /// bulk load.
    pub fn build(self) -> PathNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Sort directed edges by source node for CSR construction.
        let mut raw = self.raw_edges;
        raw.sort_unstable_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length:   Vec<f64>    = raw.iter().map(|e| e.length).collect();
        let edge_geometry: Vec<u32>    = raw.iter().map(|e| e.geometry).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        // Bulk-load R-tree for O(N log N) construction.
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.x, pos.y],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        PathNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            edge_geometry,
            geometries: self.geometries,
            spatial_idx,
        }
    }
}

impl Default for PathNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
