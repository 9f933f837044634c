//! Joining of split beam elements into physical members.
//!
//! Finite element models often split one physical member into several beam
//! elements. [`BeamJoiner`] recovers the members: two elements belong together
//! when they are collinear, share the same profile and meet at a node that
//! no other element touches.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, warn};

use crate::geometry::{Beam, BeamNumber, Node, NodeId, Point};

/// Default limit on the cross product magnitude of two collinear beams.
pub const DEFAULT_JOIN_TOLERANCE: f64 = 0.005;

/// Options controlling a [`BeamJoiner`] run.
#[derive(Clone, Debug)]
pub struct JoinOptions {
    /// Precomputed node table; built from the beam ends when `None`.
    pub node_table: Option<BTreeMap<NodeId, Node>>,
    /// Upper bound on `|d1 x d2|` for two beam directions to count as collinear.
    ///
    /// The directions are not normalised, so the bound scales with the
    /// product of the two beam lengths.
    pub tolerance: f64,
    /// Groups whose beams are joined; every beam is joined when empty.
    pub target_groups: HashSet<String>,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            node_table: None,
            tolerance: DEFAULT_JOIN_TOLERANCE,
            target_groups: HashSet::new(),
        }
    }
}

/// Disjoint sets of beam numbers.
///
/// Union always hangs the second root below the first; there is no rank or
/// size balancing.
#[derive(Debug, Default)]
struct UnionFind {
    /// Parent of every beam number; roots point at themselves.
    parent: HashMap<BeamNumber, BeamNumber>,
}

impl UnionFind {
    /// Create singleton sets for every beam number.
    fn new(beams: impl IntoIterator<Item = BeamNumber>) -> Self {
        Self {
            parent: beams.into_iter().map(|beam| (beam, beam)).collect(),
        }
    }

    /// Root of the set containing `beam`, compressing the path on the way.
    fn find(&mut self, beam: BeamNumber) -> BeamNumber {
        let mut root = beam;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = beam;
        while current != root {
            let next = self.parent.get(&current).copied().unwrap_or(root);
            self.parent.insert(current, root);
            current = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`.
    fn union(&mut self, x: BeamNumber, y: BeamNumber) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent.insert(root_y, root_x);
        }
    }
}

/// Groups collinear, singly connected beams of equal profile into members.
///
/// All derived tables are built eagerly when the joiner is created.
///
/// # Examples
/// ```
/// use beamx::{Beam, BeamJoiner};
///
/// let beams = vec![
///     Beam::new(1, [0.0, 0.0, 0.0], [10.0, 0.0, 0.0], "A", ""),
///     Beam::new(2, [10.0, 0.0, 0.0], [20.0, 0.0, 0.0], "A", ""),
///     Beam::new(3, [20.0, 0.0, 0.0], [30.0, 0.0, 0.0], "A", ""),
/// ];
/// let joiner = BeamJoiner::new(beams);
/// assert_eq!(joiner.member_numbers(), vec![vec![1, 2, 3]]);
/// ```
#[derive(Clone, Debug)]
pub struct BeamJoiner {
    /// Every beam of the model, used for connectivity.
    beams: Vec<Beam>,
    /// Node table keyed by 1-based id.
    nodes: BTreeMap<NodeId, Node>,
    /// Beams touching each node.
    node_elements: BTreeMap<NodeId, Vec<BeamNumber>>,
    /// Nodes at the ends of each beam.
    beam_nodes: BTreeMap<BeamNumber, Vec<NodeId>>,
    /// Beams with at least one end that matched no node.
    unresolved: Vec<BeamNumber>,
    /// Collinearity bound.
    tolerance: f64,
    /// Groups selected for joining.
    target_groups: HashSet<String>,
}

impl BeamJoiner {
    /// Create a joiner with [`JoinOptions::default`].
    #[must_use]
    pub fn new(model_beams: Vec<Beam>) -> Self {
        Self::with_options(model_beams, JoinOptions::default())
    }

    /// Create a joiner and build its node and adjacency tables.
    #[must_use]
    pub fn with_options(model_beams: Vec<Beam>, options: JoinOptions) -> Self {
        let nodes = options
            .node_table
            .unwrap_or_else(|| build_node_table(&model_beams));
        let mut joiner = Self {
            beams: model_beams,
            nodes,
            node_elements: BTreeMap::new(),
            beam_nodes: BTreeMap::new(),
            unresolved: Vec::new(),
            tolerance: options.tolerance,
            target_groups: options.target_groups,
        };
        joiner.build_adjacency();
        debug!(
            beams = joiner.beams.len(),
            nodes = joiner.nodes.len(),
            unresolved = joiner.unresolved.len(),
            "built beam adjacency"
        );
        joiner
    }

    /// Record which nodes every beam touches and which beams touch every node.
    fn build_adjacency(&mut self) {
        for beam in &self.beams {
            let mut start_found = false;
            let mut end_found = false;
            for (&id, node) in &self.nodes {
                let at_start = node.coincides_with(beam.start());
                let at_end = node.coincides_with(beam.end());
                start_found |= at_start;
                end_found |= at_end;
                if at_start || at_end {
                    let ends = self.beam_nodes.entry(beam.number()).or_default();
                    if !ends.contains(&id) {
                        ends.push(id);
                    }
                    self.node_elements
                        .entry(id)
                        .or_default()
                        .push(beam.number());
                }
            }
            if !(start_found && end_found) {
                warn!(
                    beam = beam.number(),
                    start_found, end_found, "beam end does not match any node"
                );
                self.unresolved.push(beam.number());
            }
        }
    }

    /// Node table keyed by 1-based id.
    #[must_use]
    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    /// Beams touching a node; empty for unknown ids.
    #[must_use]
    pub fn node_elements(&self, node: NodeId) -> &[BeamNumber] {
        self.node_elements.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes at the ends of a beam; empty when no end matched a node.
    #[must_use]
    pub fn beam_nodes(&self, beam: BeamNumber) -> &[NodeId] {
        self.beam_nodes.get(&beam).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Beams with an end that matched no node in the table.
    #[must_use]
    pub fn unresolved_beams(&self) -> &[BeamNumber] {
        &self.unresolved
    }

    /// Beams taking part in the joining, in model order.
    #[must_use]
    pub fn target_beams(&self) -> Vec<&Beam> {
        self.beams
            .iter()
            .filter(|beam| {
                self.target_groups.is_empty() || self.target_groups.contains(beam.group())
            })
            .collect()
    }

    /// Whether two beams continue each other as one member.
    fn continues(&self, first: &Beam, second: &Beam) -> bool {
        let collinear = first.direction().cross(&second.direction()).norm() < self.tolerance;
        if !collinear {
            return false;
        }
        let second_nodes = self.beam_nodes(second.number());
        let spliced = self.beam_nodes(first.number()).iter().any(|node| {
            second_nodes.contains(node) && self.node_elements(*node).len() == 2
        });
        spliced && first.profile() == second.profile()
    }

    /// Group the target beams into members.
    ///
    /// Groups are listed in the order their first beam appears in the model.
    /// Beams outside the target groups never appear in the output but still
    /// count towards the number of beams meeting at a node.
    #[must_use]
    pub fn group_collinear_beams(&self) -> Vec<Vec<Beam>> {
        let targets = self.target_beams();
        let mut sets = UnionFind::new(targets.iter().map(|beam| beam.number()));

        let count = targets.len();
        let step = (count / 100).max(1);
        for (i, first) in targets.iter().enumerate() {
            if i % step == 0 {
                debug!(done = i, total = count, "comparing target beams");
            }
            for second in &targets[i + 1..] {
                if self.continues(first, second) {
                    sets.union(first.number(), second.number());
                }
            }
        }

        let mut slots: HashMap<BeamNumber, usize> = HashMap::new();
        let mut groups: Vec<Vec<Beam>> = Vec::new();
        for beam in targets {
            let root = sets.find(beam.number());
            let slot = *slots.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(beam.clone());
        }
        debug!(members = groups.len(), "joined target beams");
        groups
    }

    /// Same as [`BeamJoiner::group_collinear_beams`] but with beam numbers only.
    #[must_use]
    pub fn member_numbers(&self) -> Vec<Vec<BeamNumber>> {
        self.group_collinear_beams()
            .iter()
            .map(|group| group.iter().map(Beam::number).collect())
            .collect()
    }

    /// Graph of nodes joined by beams.
    ///
    /// Graph node `k` holds node id `k + 1`. A beam becomes an edge only when
    /// its two ends resolve to different nodes; the first matching node is used
    /// for each end.
    #[must_use]
    pub fn connectivity_graph(&self) -> UnGraph<Node, BeamNumber> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.beams.len());
        let indices: BTreeMap<NodeId, NodeIndex> = self
            .nodes
            .iter()
            .map(|(&id, node)| (id, graph.add_node(*node)))
            .collect();

        for beam in &self.beams {
            let start = self.first_node_at(beam.start());
            let end = self.first_node_at(beam.end());
            if let (Some(start), Some(end)) = (start, end) {
                if start != end {
                    graph.add_edge(indices[&start], indices[&end], beam.number());
                }
            }
        }
        graph
    }

    /// First node id coinciding with `point`.
    fn first_node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.coincides_with(point))
            .map(|(&id, _)| id)
    }
}

/// Deduplicate beam ends into nodes numbered from 1 in first-seen order.
///
/// Every end is compared with each accepted node; the first coincident node
/// wins and nodes are never merged afterwards.
#[must_use]
pub fn build_node_table(beams: &[Beam]) -> BTreeMap<NodeId, Node> {
    let mut accepted: Vec<Node> = Vec::new();
    for beam in beams {
        for end in [beam.start(), beam.end()] {
            if !accepted.iter().any(|node| node.coincides_with(end)) {
                accepted.push(Node::from(end));
            }
        }
    }
    accepted
        .into_iter()
        .enumerate()
        .map(|(index, node)| (index + 1, node))
        .collect()
}
