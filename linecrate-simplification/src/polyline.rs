//! Linked vertex list over one input polyline
//!
//! Nodes live in a fixed arena owned by the [`Polyline`]; `prev`/`next` are
//! arena indices. Removal splices a node out in O(1) and never reorders the
//! survivors.
//!
//! Open polylines keep their two endpoints. Loops (first id equal to last id)
//! drop the closing duplicate, link the remaining nodes into a cycle and make
//! every node removable; a `head` anchor marks where traversal starts.

/// One vertex of a polyline
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position in the arena, stable for the polyline's lifetime
    pub index: usize,
    /// Global point index
    pub point_id: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub removable: bool,
    live: bool,
}

impl Vertex {
    pub fn is_live(&self) -> bool {
        self.live
    }
}

/// Doubly-linked view over a polyline's point ids
#[derive(Debug, Clone)]
pub struct Polyline {
    vertices: Vec<Vertex>,
    is_loop: bool,
    head: usize,
    live_count: usize,
}

impl Polyline {
    /// Build the linked structure for `point_ids`
    pub fn new(point_ids: &[usize]) -> Self {
        let is_loop = point_ids.len() >= 2 && point_ids.first() == point_ids.last();
        let ids = if is_loop {
            &point_ids[..point_ids.len() - 1]
        } else {
            point_ids
        };
        let n = ids.len();

        let vertices = ids
            .iter()
            .enumerate()
            .map(|(idx, &point_id)| {
                let (prev, next) = if is_loop {
                    (Some((idx + n - 1) % n), Some((idx + 1) % n))
                } else {
                    (idx.checked_sub(1), (idx + 1 < n).then_some(idx + 1))
                };
                Vertex {
                    index: idx,
                    point_id,
                    prev,
                    next,
                    removable: is_loop || (idx != 0 && idx + 1 != n),
                    live: true,
                }
            })
            .collect();

        Self {
            vertices,
            is_loop,
            head: 0,
            live_count: n,
        }
    }

    /// Initial number of nodes
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Fewest nodes that must survive: 3 for a loop, 2 for an open line
    pub fn min_live(&self) -> usize {
        if self.is_loop {
            3
        } else {
            2
        }
    }

    /// Traversal start; always a live node
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Live neighbors of a node, when it has both
    pub fn neighbors(&self, index: usize) -> Option<(usize, usize)> {
        let vertex = &self.vertices[index];
        Some((vertex.prev?, vertex.next?))
    }

    /// Fraction of the original nodes removed so far.
    ///
    /// Loops count ring nodes, so the closing duplicate id is not part of the
    /// denominator: a 5-id square loop has 4 nodes and one removal is 0.25.
    pub fn reduction(&self) -> f64 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        1.0 - self.live_count as f64 / self.vertices.len() as f64
    }

    /// Splice node `index` out of the list.
    ///
    /// The node must be live and have live neighbors on both sides. Its own
    /// links are left stale.
    pub fn remove(&mut self, index: usize) {
        debug_assert!(self.vertices[index].live, "vertex {} already removed", index);
        let Some((prev, next)) = self.neighbors(index) else {
            debug_assert!(false, "vertex {} has no neighbor on one side", index);
            return;
        };
        self.vertices[prev].next = Some(next);
        self.vertices[next].prev = Some(prev);
        self.vertices[index].live = false;
        self.live_count -= 1;
        if self.head == index {
            self.head = next;
        }
    }

    /// Surviving node indices in walk order
    pub fn walk(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.live_count);
        if self.vertices.is_empty() {
            return order;
        }
        let mut current = Some(self.head);
        while let Some(idx) = current {
            order.push(idx);
            if order.len() == self.live_count {
                break;
            }
            current = self.vertices[idx].next;
        }
        order
    }

    /// Surviving point ids in walk order; loops repeat the head id at the end
    pub fn point_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .walk()
            .into_iter()
            .map(|idx| self.vertices[idx].point_id)
            .collect();
        if self.is_loop {
            if let Some(&first) = ids.first() {
                ids.push(first);
            }
        }
        ids
    }
}
