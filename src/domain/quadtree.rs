//! Barnes-Hut quadtree over one generation of planets.
//!
//! The tree only answers a geometric question: which other planets (or
//! aggregated clusters of far-away planets) influence a given target. The
//! actual gravity math lives with the step function in `universe`.

use super::{Planet, Point, Quadrant, Rect};

/// Opening threshold: a node whose size/distance ratio is below this is
/// treated as a single aggregated mass.
const THETA: f64 = 0.5;

/// Leaves deeper than this keep multiple bodies instead of subdividing,
/// so coincident positions cannot recurse forever.
const MAX_DEPTH: u32 = 32;

/// One source of gravitational influence on a target planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Influence {
    /// An individual planet, seen up close. Carries its generation index
    /// so the step function can track absorption candidates.
    Body { index: usize, pos: Point, mass: f64 },
    /// A far-away subtree collapsed to its center of mass.
    Cluster { com: Point, mass: f64 },
}

#[derive(Clone, Copy, Debug)]
struct BodyRef {
    index: usize,
    pos: Point,
    mass: f64,
}

/// Route by comparison against the region center so a body on a
/// floating-point boundary still lands in exactly one child.
fn quadrant_of(center: Point, pos: Point) -> Quadrant {
    match (pos.x >= center.x, pos.y >= center.y) {
        (false, false) => Quadrant::Nw,
        (true, false) => Quadrant::Ne,
        (false, true) => Quadrant::Sw,
        (true, true) => Quadrant::Se,
    }
}

struct QuadNode {
    region: Rect,
    depth: u32,
    /// Aggregated mass and center of mass of everything below this node.
    mass: f64,
    com: Point,
    /// Leaf payload. Internal nodes keep this empty.
    bodies: Vec<BodyRef>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(region: Rect, depth: u32) -> Self {
        Self {
            region,
            depth,
            mass: 0.0,
            com: region.center(),
            bodies: Vec::new(),
            children: None,
        }
    }

    fn aggregate(&mut self, body: BodyRef) {
        let mass = self.mass + body.mass;
        if self.mass == 0.0 {
            self.com = body.pos;
        } else {
            self.com = (self.com * self.mass + body.pos * body.mass) / mass;
        }
        self.mass = mass;
    }

    fn insert(&mut self, body: BodyRef) {
        self.aggregate(body);

        if self.children.is_some() {
            let q = quadrant_of(self.region.center(), body.pos);
            self.children.as_mut().unwrap()[q as usize].insert(body);
            return;
        }

        self.bodies.push(body);
        if self.bodies.len() > 1 && self.depth < MAX_DEPTH {
            self.subdivide();
        }
    }

    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            QuadNode::new(self.region.quadrant(Quadrant::Nw), depth),
            QuadNode::new(self.region.quadrant(Quadrant::Ne), depth),
            QuadNode::new(self.region.quadrant(Quadrant::Sw), depth),
            QuadNode::new(self.region.quadrant(Quadrant::Se), depth),
        ]));

        let center = self.region.center();
        let children = self.children.as_mut().unwrap();
        for body in self.bodies.drain(..) {
            let q = quadrant_of(center, body.pos);
            children[q as usize].insert(body);
        }
    }

    fn visit(&self, target: usize, target_pos: Point, f: &mut impl FnMut(Influence)) {
        if self.mass == 0.0 {
            return;
        }

        match &self.children {
            Some(children) => {
                let s = (self.region.width() + self.region.height()) / 2.0;
                let d = self.com.distance_to(target_pos);
                if d > 0.0 && s / d < THETA {
                    f(Influence::Cluster {
                        com: self.com,
                        mass: self.mass,
                    });
                    return;
                }
                for child in children.iter() {
                    child.visit(target, target_pos, f);
                }
            }
            None => {
                for body in &self.bodies {
                    if body.index != target {
                        f(Influence::Body {
                            index: body.index,
                            pos: body.pos,
                            mass: body.mass,
                        });
                    }
                }
            }
        }
    }
}

/// Quadtree built fresh from one generation and discarded after the step.
pub struct QuadTree {
    root: QuadNode,
}

impl QuadTree {
    pub fn build(planets: &[Planet], bounds: Rect) -> Self {
        let mut root = QuadNode::new(bounds, 0);
        for (index, planet) in planets.iter().enumerate() {
            root.insert(BodyRef {
                index,
                pos: planet.pos,
                mass: planet.mass,
            });
        }
        Self { root }
    }

    /// Total mass aggregated at the root.
    pub fn total_mass(&self) -> f64 {
        self.root.mass
    }

    /// Call `f` once for every influence acting on the planet at
    /// `target` index. Traversal order is deterministic (NW, NE, SW, SE),
    /// so force accumulation is reproducible.
    pub fn for_each_influence(&self, target: usize, target_pos: Point, mut f: impl FnMut(Influence)) {
        self.root.visit(target, target_pos, &mut f);
    }
}
