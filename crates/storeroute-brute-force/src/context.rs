use storeroute_core::{Cost, DistanceMatrix, NodeIndex, UNREACHABLE};

/// DP state for one Held-Karp solve.
///
/// Node 0 is the fixed start of every partial path; the subsets range over
/// nodes `1..n`, bit `k - 1` standing for node `k`.
pub struct HeldKarpContext<'a> {
    pub matrix: &'a DistanceMatrix,
    pub num_nodes: usize,
    /// Number of nodes that take part in subsets (all but node 0)
    pub n_free: usize,

    // Flattened memo tables indexed by `mask * n_free + (last - 1)`
    pub memo: Vec<Cost>,
    pub parent: Vec<u8>,

    pub full_mask: u32,
}

impl<'a> HeldKarpContext<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        let num_nodes = matrix.len();
        let n_free = num_nodes - 1;

        // Size: 2^n_free subsets * n_free possible last nodes
        let table_size = (1usize << n_free) * n_free;

        HeldKarpContext {
            matrix,
            num_nodes,
            n_free,
            memo: vec![UNREACHABLE; table_size],
            parent: vec![0; table_size],
            full_mask: ((1u64 << n_free) - 1) as u32,
        }
    }

    #[inline(always)]
    pub fn slot(&self, mask: u32, last: NodeIndex) -> usize {
        mask as usize * self.n_free + (last - 1)
    }
}
