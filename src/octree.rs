//! Octree over body positions for one simulation step.
//!
//! Nodes live in a single arena and refer to their children by [`NodeId`].
//! Rebuilding the tree clears the arena but keeps its allocation, so
//! discarding the previous step's tree costs nothing.
//!
//! Every node carries the total mass and the mass-weighted center of mass of
//! all bodies below it. A leaf holds exactly one body, except for cells whose
//! diagonal is shorter than the minimum distance: bodies sharing such a cell
//! are merged into one point mass. Internal nodes never hold a body directly.

use nalgebra::Vector3;
use tracing::{trace, warn};

use crate::{bodies::Body, gravity};

/// Hard limit on subdivision, only reached with a vanishing minimum distance.
/// Bodies still sharing a cell at this depth are merged.
pub const MAX_DEPTH: usize = 128;

/// Diagonal of a cube with half extent 1.
const CELL_DIAGONAL: f64 = 2. * 1.732_050_807_568_877_2;

/// The root cube is this much larger than the bounding box of all bodies,
/// so bodies on the boundary fall strictly inside.
const MARGIN: f64 = 1.1;

const ROOT: NodeId = NodeId(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub center: Vector3<f64>,
    pub half_extent: f64,
    pub total_mass: f64,
    pub center_of_mass: Vector3<f64>,
    children: [Option<NodeId>; 8],
    occupant: Option<usize>,
    is_leaf: bool,
}

impl Node {
    fn new(center: Vector3<f64>, half_extent: f64) -> Self {
        Self {
            center,
            half_extent,
            total_mass: 0.,
            center_of_mass: Vector3::zeros(),
            children: [None; 8],
            occupant: None,
            is_leaf: true,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_mass == 0.
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Edge length of the node's cube.
    #[must_use]
    pub fn size(&self) -> f64 {
        2. * self.half_extent
    }

    /// Index of the body held by a leaf.
    #[must_use]
    pub fn occupant(&self) -> Option<usize> {
        self.occupant
    }

    #[must_use]
    pub fn child(&self, octant: usize) -> Option<NodeId> {
        self.children[octant]
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    fn accumulate(&mut self, mass: f64, position: &Vector3<f64>) {
        let total_mass = self.total_mass + mass;
        self.center_of_mass =
            (self.center_of_mass * self.total_mass + position * mass) / total_mass;
        self.total_mass = total_mass;
    }
}

/// Octant of `position` relative to `center`.
///
/// Bit 0 is set for `x >= center.x`, bit 1 for `y`, bit 2 for `z`. A position
/// exactly on a dividing plane always goes to the upper side.
#[must_use]
pub fn octant(center: &Vector3<f64>, position: &Vector3<f64>) -> usize {
    usize::from(position.x >= center.x)
        | usize::from(position.y >= center.y) << 1
        | usize::from(position.z >= center.z) << 2
}

/// Center of the child cube in `octant` of a node at `center` with `half_extent`.
#[must_use]
pub fn octant_center(center: &Vector3<f64>, half_extent: f64, octant: usize) -> Vector3<f64> {
    let step = half_extent / 2.;
    let offset = |bit: usize| if octant & bit != 0 { step } else { -step };
    center + Vector3::new(offset(1), offset(2), offset(4))
}

/// Center and half extent of a cube enclosing every body.
fn bounding_cube(bodies: &[Body]) -> Option<(Vector3<f64>, f64)> {
    let first = bodies.first()?.position;
    let (v_min, v_max) = bodies.iter().fold((first, first), |(v_min, v_max), body| {
        (v_min.inf(&body.position), v_max.sup(&body.position))
    });

    let center = (v_min + v_max) / 2.;
    let size = (v_max - v_min).max() * MARGIN;
    let half_extent = if size > 0. { size / 2. } else { 1. };

    Some((center, half_extent))
}

#[derive(Clone, Debug, Default)]
pub struct Octree {
    nodes: Vec<Node>,
    min_distance: f64,
}

impl Octree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree over `bodies` for the default [`gravity::MIN_DISTANCE`].
    #[must_use]
    pub fn from_bodies(bodies: &[Body]) -> Self {
        let mut octree = Self::new();
        octree.build(bodies, gravity::MIN_DISTANCE);
        octree
    }

    /// Replace the tree with one built over the current body positions.
    ///
    /// Bodies without positive mass attract nothing and are left out.
    /// Cells are not split once their diagonal is below `min_distance`, so
    /// bodies merged into one leaf are all closer than `min_distance` to its
    /// center of mass and never feel that leaf.
    pub fn build(&mut self, bodies: &[Body], min_distance: f64) {
        self.nodes.clear();
        self.min_distance = min_distance;

        let Some((center, half_extent)) = bounding_cube(bodies) else {
            return;
        };
        self.nodes.push(Node::new(center, half_extent));

        let mut skipped = 0;
        for (index, body) in bodies.iter().enumerate() {
            if body.mass > 0. {
                self.insert(ROOT, index, bodies, 0);
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            warn!(skipped, "bodies without positive mass left out of the octree");
        }
        trace!(bodies = bodies.len(), nodes = self.nodes.len(), "octree built");
    }

    /// Drop all nodes, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, id: NodeId, index: usize, bodies: &[Body], depth: usize) {
        let body = &bodies[index];
        let min_distance = self.min_distance;
        let node = &mut self.nodes[id.0];

        if node.is_empty() {
            node.occupant = Some(index);
            node.total_mass = body.mass;
            node.center_of_mass = body.position;
            return;
        }

        node.accumulate(body.mass, &body.position);

        if depth >= MAX_DEPTH || node.half_extent * CELL_DIAGONAL < min_distance {
            return;
        }

        // Occupied leaf, push the old occupant down
        if let Some(previous) = node.occupant.take() {
            node.is_leaf = false;
            let child = self.child_for(id, &bodies[previous].position);
            self.insert(child, previous, bodies, depth + 1);
        }

        let child = self.child_for(id, &body.position);
        self.insert(child, index, bodies, depth + 1);
    }

    /// Child of `id` in the octant `position` falls under, created if absent.
    fn child_for(&mut self, id: NodeId, position: &Vector3<f64>) -> NodeId {
        let node = &self.nodes[id.0];
        let octant = octant(&node.center, position);
        if let Some(child) = node.children[octant] {
            return child;
        }

        let center = octant_center(&node.center, node.half_extent, octant);
        let half_extent = node.half_extent / 2.;

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::new(center, half_extent));
        self.nodes[id.0].children[octant] = Some(child);
        child
    }

    /// Barnes-Hut approximation of the gravitational acceleration at `position`.
    ///
    /// A node is used as a single point mass if it is a leaf or if
    /// `size / distance < theta`, otherwise its children are visited.
    /// Nodes whose center of mass is closer than `min_distance` contribute
    /// nothing, subtree included. This skips the body's own leaf, but also
    /// prunes an internal node whose center of mass happens to sit on the
    /// body, so even `theta = 0` is not always the exact pairwise sum.
    #[must_use]
    pub fn acceleration_on(
        &self,
        position: &Vector3<f64>,
        theta: f64,
        min_distance: f64,
    ) -> Vector3<f64> {
        if self.nodes.is_empty() {
            return Vector3::zeros();
        }
        self.acceleration_from(ROOT, position, theta, min_distance)
    }

    fn acceleration_from(
        &self,
        id: NodeId,
        position: &Vector3<f64>,
        theta: f64,
        min_distance: f64,
    ) -> Vector3<f64> {
        let node = &self.nodes[id.0];
        if node.is_empty() {
            return Vector3::zeros();
        }

        let distance = (node.center_of_mass - position).norm();
        if distance < min_distance {
            return Vector3::zeros();
        }

        if node.is_leaf || node.size() / distance < theta {
            // far field or a single body
            return gravity::acceleration(
                position,
                node.total_mass,
                &node.center_of_mass,
                min_distance,
            );
        }

        // near field, go deeper into tree
        let mut acc = Vector3::zeros();
        for child in node.children() {
            acc += self.acceleration_from(child, position, theta, min_distance);
        }
        acc
    }
}
