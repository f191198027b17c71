//! Working copy of a selected line's branch polylines.
//!
//! Path-edit gestures only ever touch the staged copy. The dataset sees the
//! edits when [`StagingBuffer::commit_into`] runs, and [`StagingBuffer::from_line`]
//! rebuilds a fresh copy for revert.

use indexmap::IndexMap;
use crate::models::{Line, Vertex};

/// Minimum number of vertices a branch polyline keeps.
pub const MIN_BRANCH_VERTICES: usize = 2;

/// Position of a vertex inside the staging buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRef {
    pub branch: String,
    pub index: usize,
}

impl VertexRef {
    #[must_use]
    pub fn new(branch: impl Into<String>, index: usize) -> Self {
        Self {
            branch: branch.into(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StagingBuffer {
    branches: IndexMap<String, Vec<Vertex>>,
}

impl StagingBuffer {
    /// Deep-copy every branch polyline of `line`.
    #[must_use]
    pub fn from_line(line: &Line) -> Self {
        let branches = line
            .branches
            .iter()
            .map(|(name, branch)| (name.clone(), branch.vertices.clone()))
            .collect();
        Self { branches }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branches(&self) -> impl Iterator<Item = (&str, &[Vertex])> {
        self.branches.iter().map(|(name, vertices)| (name.as_str(), vertices.as_slice()))
    }

    #[must_use]
    pub fn branch(&self, name: &str) -> Option<&[Vertex]> {
        self.branches.get(name).map(Vec::as_slice)
    }

    /// First vertex of the first branch.
    #[must_use]
    pub fn anchor(&self) -> Option<Vertex> {
        self.branches.values().next().and_then(|v| v.first().copied())
    }

    #[must_use]
    pub fn vertex(&self, at: &VertexRef) -> Option<Vertex> {
        self.branches.get(&at.branch)?.get(at.index).copied()
    }

    /// Predecessor and successor of a vertex along its polyline.
    #[must_use]
    pub fn neighbors(&self, at: &VertexRef) -> (Option<Vertex>, Option<Vertex>) {
        let Some(vertices) = self.branches.get(&at.branch) else {
            return (None, None);
        };
        let prev = at.index.checked_sub(1).and_then(|i| vertices.get(i)).copied();
        let next = vertices.get(at.index + 1).copied();
        (prev, next)
    }

    pub fn set_vertex(&mut self, at: &VertexRef, position: Vertex) -> bool {
        match self.branches.get_mut(&at.branch).and_then(|v| v.get_mut(at.index)) {
            Some(vertex) => {
                *vertex = position;
                true
            }
            None => false,
        }
    }

    /// Insert a vertex right after the vertex at `after`.
    pub fn insert_after(&mut self, after: &VertexRef, position: Vertex) -> Option<VertexRef> {
        let vertices = self.branches.get_mut(&after.branch)?;
        if after.index >= vertices.len() {
            return None;
        }
        vertices.insert(after.index + 1, position);
        Some(VertexRef::new(after.branch.clone(), after.index + 1))
    }

    /// Remove a vertex unless its branch would drop below two vertices.
    pub fn remove(&mut self, at: &VertexRef) -> bool {
        let Some(vertices) = self.branches.get_mut(&at.branch) else {
            return false;
        };
        if vertices.len() <= MIN_BRANCH_VERTICES || at.index >= vertices.len() {
            return false;
        }
        vertices.remove(at.index);
        true
    }

    /// Replace the polyline of every matching branch on `line` with the staged
    /// one. Returns how many branches were written.
    pub fn commit_into(&self, line: &mut Line) -> usize {
        let mut written = 0;
        for (name, vertices) in &self.branches {
            if let Some(branch) = line.branches.get_mut(name) {
                branch.vertices.clone_from(vertices);
                written += 1;
            }
        }
        written
    }
}
