//! Removal of tiny same-color islands ("speckles") from a label grid.
//!
//! One row-major pass. Each component is flood filled with 4-adjacency and, if
//! it is smaller than the minimum size and touches another color, relabeled
//! right away to the most common label along its border. Later components see
//! those new labels. The pass is not repeated until nothing changes.

use crate::grid::LabelGrid;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_MIN_REGION_SIZE: usize = 4;

/// What a cleanup pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupStats {
    pub components: usize,
    pub relabeled_components: usize,
    pub relabeled_cells: usize,
}

/// Relabel every component smaller than `min_region_size` that borders
/// another label. Mutates `grid` in place.
pub fn remove_speckles(grid: &mut LabelGrid, min_region_size: usize) -> CleanupStats {
    let width = grid.width();
    let height = grid.height();
    let labels = grid.labels_mut();
    let n = labels.len();

    let mut stats = CleanupStats::default();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::<usize>::new();
    let mut region = Vec::<usize>::new();
    let mut border = Vec::<u16>::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        let target_label = labels[start];
        visited[start] = true;
        queue.clear();
        region.clear();
        border.clear();
        queue.push_back(start);
        region.push(start);
        stats.components += 1;

        while let Some(idx) = queue.pop_front() {
            let x = idx % width;
            let y = idx / width;

            // down, up, right, left
            let neighbors = [
                (y + 1 < height).then(|| idx + width),
                (y > 0).then(|| idx - width),
                (x + 1 < width).then(|| idx + 1),
                (x > 0).then(|| idx - 1),
            ];

            for nidx in neighbors.into_iter().flatten() {
                let nlabel = labels[nidx];
                if nlabel == target_label {
                    if !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back(nidx);
                        region.push(nidx);
                    }
                } else {
                    border.push(nlabel);
                }
            }
        }

        if region.len() < min_region_size {
            if let Some(new_label) = most_common_first_seen(&border) {
                for &idx in &region {
                    labels[idx] = new_label;
                }
                stats.relabeled_components += 1;
                stats.relabeled_cells += region.len();
            }
        }
    }

    stats
}

/// Most frequent value; among equally frequent values the one seen first.
fn most_common_first_seen(values: &[u16]) -> Option<u16> {
    let mut counts: Vec<(u16, u32)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(label, _)| *label == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(u16, u32)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
