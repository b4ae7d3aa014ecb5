//! Cave topology.
//!
//! Every cave has exactly three tunnels. The map itself carries no
//! hazards, so it is safe to send to clients.

use cavern_protocol::CaveId;
use serde::{Deserialize, Serialize};

/// Tunnels of the classic twenty-cave dodecahedron, zero-indexed.
const DODECAHEDRON: [[CaveId; 3]; 20] = [
    [1, 4, 7],
    [0, 2, 9],
    [1, 3, 11],
    [2, 4, 13],
    [0, 3, 5],
    [4, 6, 14],
    [5, 7, 16],
    [0, 6, 8],
    [7, 9, 17],
    [1, 8, 10],
    [9, 11, 18],
    [2, 10, 12],
    [11, 13, 19],
    [3, 12, 14],
    [5, 13, 15],
    [14, 16, 19],
    [6, 15, 17],
    [8, 16, 18],
    [10, 17, 19],
    [12, 15, 18],
];

/// One cave and where its tunnels lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cave {
    pub id: CaveId,
    pub tunnels: Vec<CaveId>,
}

/// The cave network of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveMap {
    caves: Vec<Cave>,
}

impl CaveMap {
    /// The map for a given size: the dodecahedron for 20 caves, a ring
    /// with opposite chords otherwise.
    pub fn for_size(caves: usize) -> Self {
        if caves == DODECAHEDRON.len() {
            Self::dodecahedron()
        } else {
            Self::ring_with_chords(caves)
        }
    }

    /// The classic twenty-cave map.
    pub fn dodecahedron() -> Self {
        let caves = DODECAHEDRON
            .iter()
            .enumerate()
            .map(|(id, tunnels)| Cave {
                id: id as CaveId,
                tunnels: tunnels.to_vec(),
            })
            .collect();
        Self { caves }
    }

    /// A ring where each cave also connects to the cave opposite it.
    ///
    /// Expects an even size of at least 4 (see
    /// [`CaveConfig::validate`](crate::CaveConfig::validate)); smaller
    /// sizes produce a degenerate but still well-formed map.
    pub fn ring_with_chords(size: usize) -> Self {
        let caves = (0..size)
            .map(|i| {
                let mut tunnels = vec![
                    ((i + 1) % size) as CaveId,
                    ((i + size - 1) % size) as CaveId,
                    ((i + size / 2) % size) as CaveId,
                ];
                tunnels.sort_unstable();
                tunnels.dedup();
                tunnels.retain(|&t| t as usize != i);
                Cave {
                    id: i as CaveId,
                    tunnels,
                }
            })
            .collect();
        Self { caves }
    }

    /// Number of caves.
    pub fn len(&self) -> usize {
        self.caves.len()
    }

    /// Returns `true` if the map has no caves.
    pub fn is_empty(&self) -> bool {
        self.caves.is_empty()
    }

    /// Returns `true` if `cave` is on the map.
    pub fn contains(&self, cave: CaveId) -> bool {
        (cave as usize) < self.caves.len()
    }

    /// The caves reachable in one step from `cave`. Empty if off the map.
    pub fn neighbours(&self, cave: CaveId) -> &[CaveId] {
        self.caves
            .get(cave as usize)
            .map(|c| c.tunnels.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if a tunnel joins `from` and `to`.
    pub fn is_adjacent(&self, from: CaveId, to: CaveId) -> bool {
        self.neighbours(from).contains(&to)
    }
}
