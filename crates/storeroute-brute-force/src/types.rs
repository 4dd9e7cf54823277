use crate::MAX_NODES;
use storeroute_core::NodeIndex;

/// Fixed-capacity node sequence used while unwinding the DP table.
#[derive(Clone, Copy, Debug)]
pub struct TourBuffer {
    pub nodes: [u8; MAX_NODES],
    pub len: u8,
}

impl Default for TourBuffer {
    fn default() -> Self {
        Self {
            nodes: [0; MAX_NODES],
            len: 0,
        }
    }
}

impl TourBuffer {
    pub fn push(&mut self, node: NodeIndex) {
        self.nodes[self.len as usize] = node as u8;
        self.len += 1;
    }

    pub fn to_vec(&self) -> Vec<NodeIndex> {
        self.nodes[..self.len as usize]
            .iter()
            .map(|&n| n as NodeIndex)
            .collect()
    }
}
