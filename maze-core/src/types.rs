/// Identifier for a cell node: a grid cell centroid or a spring-network node.
///
/// This is an index into the owning structure and is only meaningful
/// within that instance.
pub type NodeId = usize;

/// Index into [`crate::mesh::MazeMesh::vertices`].
pub type VertexId = usize;

/// Index into [`crate::mesh::MazeMesh::faces`]. For grid mazes a face id is
/// also the [`NodeId`] of the cell it covers.
pub type FaceId = usize;

/// Index into [`crate::mesh::MazeMesh::loops`].
pub type LoopId = usize;
