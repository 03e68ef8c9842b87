use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Directed graph backed by an adjacency map.
///
/// Each vertex of type `T` maps to the set of its outgoing neighbors.
/// Vertices are added implicitly when they appear in an edge, or explicitly
/// via [`add_vertex`](Self::add_vertex). Parallel edges collapse into one.
///
/// Used by `schedcheck_core` to represent the precedence graph between the
/// transactions of a schedule.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Maps each vertex to the set of vertices it has edges to.
    pub adj_map: HashMap<T, HashSet<T>>,
}

/// Per-vertex state of the cycle-detecting depth-first search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Visit {
    /// On the current recursion path.
    OnPath,
    /// Fully explored; no cycle reachable through it.
    Finished,
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Inserts a directed edge from `source` to `target`.
    ///
    /// Both vertices are added to the graph if not already present.
    pub fn add_edge(&mut self, source: T, target: T) {
        self.adj_map
            .entry(source)
            .or_default()
            .insert(target.clone());
        self.adj_map.entry(target).or_default();
    }

    /// Adds a vertex with no outgoing edges (if not already present).
    pub fn add_vertex(&mut self, source: T) {
        self.adj_map.entry(source).or_default();
    }

    /// Returns `true` if an edge from `source` to `target` exists.
    pub fn has_edge(&self, source: &T, target: &T) -> bool {
        self.adj_map
            .get(source)
            .is_some_and(|neighbor| neighbor.contains(target))
    }

    /// Iterates over the outgoing neighbors of `source`.
    pub fn successors<'a>(&'a self, source: &T) -> impl Iterator<Item = &'a T> + 'a {
        self.adj_map.get(source).into_iter().flatten()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj_map.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adj_map.values().map(HashSet::len).sum()
    }

    /// Searches for a cycle with a depth-first traversal.
    ///
    /// Every vertex is in one of three states: unvisited, on the current
    /// recursion path, or finished. Each vertex of `roots` that is still
    /// unvisited starts a new traversal; vertices not listed in `roots` are
    /// visited afterwards, smallest first, so the whole graph is always
    /// covered. Reaching a vertex that is on the current path closes a cycle.
    ///
    /// Successors are explored in `roots` order, then in ascending order, so
    /// the same graph and roots always yield the same cycle.
    ///
    /// Returns the vertices of the first cycle found, in path order (the
    /// last vertex has an edge back to the first), or `None` if acyclic.
    #[must_use]
    pub fn find_cycle<'a, I>(&self, roots: I) -> Option<Vec<T>>
    where
        T: Ord + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut rank: HashMap<T, usize> = HashMap::new();
        let mut order: Vec<T> = Vec::new();
        for root in roots {
            if !rank.contains_key(root) {
                rank.insert(root.clone(), order.len());
                order.push(root.clone());
            }
        }
        let mut rest: Vec<T> = self
            .adj_map
            .keys()
            .filter(|v| !rank.contains_key(*v))
            .cloned()
            .collect();
        rest.sort();
        order.extend(rest);

        let mut state: HashMap<T, Visit> = HashMap::with_capacity(self.adj_map.len());
        let mut path: Vec<T> = Vec::new();

        for root in &order {
            if state.contains_key(root) {
                continue;
            }
            if let Some(cycle) = self.find_cycle_helper(root, &rank, &mut state, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    /// Outgoing neighbors of `vertex`, ranked vertices first.
    fn ordered_successors(&self, vertex: &T, rank: &HashMap<T, usize>) -> Vec<&T>
    where
        T: Ord,
    {
        let mut next: Vec<&T> = self.successors(vertex).collect();
        next.sort_by(|a, b| {
            let rank_a = rank.get(*a).copied().unwrap_or(usize::MAX);
            let rank_b = rank.get(*b).copied().unwrap_or(usize::MAX);
            rank_a.cmp(&rank_b).then_with(|| a.cmp(b))
        });
        next
    }

    fn find_cycle_helper(
        &self,
        vertex: &T,
        rank: &HashMap<T, usize>,
        state: &mut HashMap<T, Visit>,
        path: &mut Vec<T>,
    ) -> Option<Vec<T>>
    where
        T: Ord,
    {
        state.insert(vertex.clone(), Visit::OnPath);
        path.push(vertex.clone());

        for neighbor in self.ordered_successors(vertex, rank) {
            match state.get(neighbor) {
                None => {
                    if let Some(cycle) = self.find_cycle_helper(neighbor, rank, state, path) {
                        return Some(cycle);
                    }
                }
                Some(Visit::OnPath) => {
                    let start = path.iter().rposition(|v| v == neighbor).unwrap_or(0);
                    return Some(path[start..].to_vec());
                }
                Some(Visit::Finished) => {}
            }
        }

        path.pop();
        state.insert(vertex.clone(), Visit::Finished);
        None
    }

    /// Detects if the graph contains a cycle.
    /// Time complexity: O(V log V + E log E)
    #[must_use]
    pub fn has_cycle(&self) -> bool
    where
        T: Ord,
    {
        self.find_cycle(core::iter::empty()).is_some()
    }

    /// Returns `true` if the graph has no cycles.
    #[must_use]
    pub fn is_acyclic(&self) -> bool
    where
        T: Ord,
    {
        !self.has_cycle()
    }

    /// Returns a topological ordering of the vertices if the graph is
    /// acyclic, or `None` if it contains a cycle.
    ///
    /// Uses Kahn's algorithm. Among the vertices ready at each step, the one
    /// listed first in `priority` is emitted first; vertices missing from
    /// `priority` come after all listed ones, smallest first. The result is
    /// deterministic for a given `priority`. Time complexity: O(V^2 + E).
    #[must_use]
    pub fn topological_order(&self, priority: &[T]) -> Option<Vec<T>>
    where
        T: Ord,
    {
        let mut vertices: Vec<T> = priority
            .iter()
            .filter(|v| self.adj_map.contains_key(*v))
            .cloned()
            .collect();
        let listed: HashSet<&T> = priority.iter().collect();
        let mut unlisted: Vec<T> = self
            .adj_map
            .keys()
            .filter(|v| !listed.contains(v))
            .cloned()
            .collect();
        unlisted.sort();
        vertices.extend(unlisted);

        let mut in_degree: HashMap<T, usize> = vertices.iter().map(|v| (v.clone(), 0)).collect();
        for neighbors in self.adj_map.values() {
            for neighbor in neighbors {
                *in_degree.entry(neighbor.clone()).or_insert(0) += 1;
            }
        }

        let mut result = Vec::with_capacity(vertices.len());
        let mut emitted: HashSet<T> = HashSet::with_capacity(vertices.len());

        while result.len() < vertices.len() {
            let next = vertices
                .iter()
                .find(|v| !emitted.contains(*v) && in_degree.get(*v) == Some(&0))?
                .clone();

            for neighbor in self.successors(&next) {
                if let Some(degree) = in_degree.get_mut(neighbor) {
                    *degree -= 1;
                }
            }
            emitted.insert(next.clone());
            result.push(next);
        }

        Some(result)
    }

    /// Returns all edges as a list of (source, target) pairs.
    #[must_use]
    pub fn to_edge_list(&self) -> Vec<(T, T)> {
        let mut edges = Vec::new();
        for (src, dsts) in &self.adj_map {
            for dst in dsts {
                edges.push((src.clone(), dst.clone()));
            }
        }
        edges
    }
}
