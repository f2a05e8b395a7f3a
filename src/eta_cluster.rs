//! First clustering layer: combine neighbouring eta bins within one phi slice
use crate::grid::EtaPhiBin;

/// Clusters closer than this many eta bins are merged
pub const ETA_MERGE_DISTANCE: f64 = 1.5;

/// Cluster the eta bins of a single phi slice
///
/// Bins are consumed in the process and marked as used.
pub fn cluster_eta(slice: &mut [EtaPhiBin], eta_step: f64) -> Vec<EtaPhiBin> {
    let mut clusters = Vec::new();
    for idx in 0..slice.len() {
        if slice[idx].used {
            continue;
        }
        let pt = slice[idx].pt;
        let left_pt = if idx > 0 { unused_pt(slice, idx - 1) } else { 0. };
        let right_pt = unused_pt(slice, idx + 1);
        let right2_pt = if right_pt > 0. { unused_pt(slice, idx + 2) } else { 0. };

        if pt < left_pt || pt <= right_pt {
            // not a local maximum, but an unclaimed left neighbour
            // cannot join any later cluster
            if left_pt > 0. {
                clusters.push(slice[idx - 1].take());
            }
            continue;
        }

        let mut cluster = slice[idx].take();
        if left_pt > 0. {
            cluster.absorb(slice[idx - 1].take());
        }
        // leave the right neighbour to the next bin if that one is harder
        if right_pt > 0. && pt >= right2_pt {
            cluster.absorb(slice[idx + 1].take());
        }
        clusters.push(cluster);
    }
    merge_eta_neighbours(&mut clusters, eta_step);
    clusters
}

fn unused_pt(slice: &[EtaPhiBin], idx: usize) -> f64 {
    slice.get(idx).filter(|b| !b.used).map_or(0., |b| b.pt)
}

/// Merge adjacent clusters whose centres are too close in eta
///
/// Always merges the first close pair and then starts over, until no
/// close pair is left.
pub fn merge_eta_neighbours(clusters: &mut Vec<EtaPhiBin>, eta_step: f64) {
    let max_dist = ETA_MERGE_DISTANCE * eta_step;
    while let Some(m) = clusters
        .windows(2)
        .position(|pair| (pair[1].eta - pair[0].eta).abs() < max_dist)
    {
        let next = clusters.remove(m + 1);
        clusters[m].merge_eta(next);
    }
}
