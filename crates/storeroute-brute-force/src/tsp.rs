use super::context::HeldKarpContext;
use super::types::TourBuffer;
use storeroute_core::{Cost, NodeIndex, UNREACHABLE};

/// Fills the DP table: the cheapest open path from node 0 through exactly
/// the nodes of `mask`, ending at `last`.
pub fn fill_table(ctx: &mut HeldKarpContext) {
    let n_free = ctx.n_free;

    for last in 1..ctx.num_nodes {
        let slot = ctx.slot(1 << (last - 1), last);
        ctx.memo[slot] = ctx.matrix.get(0, last);
    }

    for mask in 1..=ctx.full_mask {
        for last in 1..=n_free {
            let last_bit = 1u32 << (last - 1);
            if mask & last_bit == 0 {
                continue;
            }
            let here = ctx.memo[ctx.slot(mask, last)];
            if here >= UNREACHABLE {
                continue;
            }

            for next in 1..=n_free {
                let next_bit = 1u32 << (next - 1);
                if mask & next_bit != 0 {
                    continue;
                }
                let step = ctx.matrix.get(last, next);
                if step >= UNREACHABLE {
                    continue;
                }
                let candidate = here.saturating_add(step);
                let slot = ctx.slot(mask | next_bit, next);
                if candidate < ctx.memo[slot] {
                    ctx.memo[slot] = candidate;
                    ctx.parent[slot] = last as u8;
                }
            }
        }
    }
}

/// Closes the cheapest full path back to node 0 and unwinds it.
///
/// Returns `None` when no Hamiltonian cycle exists.
pub fn best_tour(ctx: &HeldKarpContext) -> Option<(Cost, TourBuffer)> {
    let full = ctx.full_mask;

    let (best_last, best_cost) = (1..ctx.num_nodes)
        .map(|last| {
            let open = ctx.memo[ctx.slot(full, last)];
            (last, open.saturating_add(ctx.matrix.get(last, 0)))
        })
        .min_by_key(|&(last, cost)| (cost, last))?;
    if best_cost >= UNREACHABLE {
        return None;
    }

    // Unwind from the last node back towards node 0.
    let mut reversed = TourBuffer::default();
    let mut mask = full;
    let mut current: NodeIndex = best_last;
    while mask != 0 {
        reversed.push(current);
        let prev = ctx.parent[ctx.slot(mask, current)] as NodeIndex;
        mask &= !(1u32 << (current - 1));
        current = prev;
    }

    let mut tour = TourBuffer::default();
    tour.push(0);
    for i in (0..reversed.len as usize).rev() {
        tour.push(reversed.nodes[i] as NodeIndex);
    }
    Some((best_cost, tour))
}
