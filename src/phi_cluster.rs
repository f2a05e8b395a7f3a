//! Second clustering layer: combine eta clusters across neighbouring phi slices
use log::trace;

use crate::grid::{Binning, EtaPhiBin};

/// Eta clusters in neighbouring slices within this many eta bins are combined
pub const ETA_MATCH_DISTANCE: f64 = 1.5;
/// Clusters with the same eta closer than this many phi bins are merged
pub const PHI_MERGE_DISTANCE: f64 = 1.5;
/// Phi separations above this value are treated as neighbours across ±π
pub const PHI_WRAP_DISTANCE: f64 = 6.0;

/// Combine the eta clusters of all phi slices into final clusters
///
/// `slices` holds the output of [cluster_eta](crate::eta_cluster::cluster_eta)
/// for each phi slice, in order of increasing phi.
pub fn cluster_phi(mut slices: Vec<Vec<EtaPhiBin>>, binning: &Binning) -> Vec<EtaPhiBin> {
    let eta_dist = ETA_MATCH_DISTANCE * binning.eta_step;
    let n_slices = slices.len();
    let mut clusters = Vec::new();
    for phi_idx in 0..n_slices {
        while let Some(seed_idx) = hardest_unused(&slices[phi_idx]) {
            let mut cluster = slices[phi_idx][seed_idx].take();
            if phi_idx + 1 == n_slices {
                clusters.push(cluster);
                continue;
            }
            let seed_eta = cluster.eta;
            let e0 = cluster.pt;
            let next = matching(&slices[phi_idx + 1], seed_eta, eta_dist);
            let e1 = total_pt(&slices[phi_idx + 1], &next);
            if e1 < e0 {
                absorb_all(&mut cluster, &mut slices[phi_idx + 1], &next);
                clusters.push(cluster);
                continue;
            }
            // the seed is softer than its neighbour, so the neighbour
            // becomes the centre if it is a maximum in phi
            let centre_phi = next.first().map(|&idx| slices[phi_idx + 1][idx].phi);
            if phi_idx + 2 == n_slices {
                cluster.phi = centre_phi.unwrap_or(cluster.phi);
                absorb_all(&mut cluster, &mut slices[phi_idx + 1], &next);
                clusters.push(cluster);
                continue;
            }
            let next2 = matching(&slices[phi_idx + 2], seed_eta, eta_dist);
            let e2 = total_pt(&slices[phi_idx + 2], &next2);
            if e2 < e1 {
                cluster.phi = centre_phi.unwrap_or(cluster.phi);
                absorb_all(&mut cluster, &mut slices[phi_idx + 1], &next);
                absorb_all(&mut cluster, &mut slices[phi_idx + 2], &next2);
            }
            clusters.push(cluster);
        }
    }
    trace!("{} clusters before merging in phi", clusters.len());
    merge_phi_neighbours(&mut clusters, binning.phi_step);
    clusters
}

// ties go to the last candidate
fn hardest_unused(clusters: &[EtaPhiBin]) -> Option<usize> {
    let mut max_pt = 0.;
    let mut res = None;
    for (idx, cluster) in clusters.iter().enumerate() {
        if !cluster.used && cluster.pt > 0. && cluster.pt >= max_pt {
            max_pt = cluster.pt;
            res = Some(idx);
        }
    }
    res
}

fn matching(slice: &[EtaPhiBin], eta: f64, max_dist: f64) -> Vec<usize> {
    slice
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.used && (c.eta - eta).abs() <= max_dist)
        .map(|(idx, _)| idx)
        .collect()
}

fn total_pt(slice: &[EtaPhiBin], indices: &[usize]) -> f64 {
    indices.iter().map(|&idx| slice[idx].pt).sum()
}

fn absorb_all(cluster: &mut EtaPhiBin, slice: &mut [EtaPhiBin], indices: &[usize]) {
    for &idx in indices {
        cluster.absorb(slice[idx].take());
    }
}

/// Merge clusters at the same eta that are neighbours in phi
///
/// The first mergeable pair is merged and the search starts over until
/// no such pair remains.
#[allow(clippy::float_cmp)]
pub fn merge_phi_neighbours(clusters: &mut Vec<EtaPhiBin>, phi_step: f64) {
    let max_dist = PHI_MERGE_DISTANCE * phi_step;
    let are_neighbours = |a: &EtaPhiBin, b: &EtaPhiBin| {
        let dphi = (a.phi - b.phi).abs();
        // eta centres are only ever copied from the grid, so exact
        // comparison is intended
        a.eta == b.eta && (dphi < max_dist || dphi > PHI_WRAP_DISTANCE)
    };
    loop {
        let pair = (0..clusters.len()).find_map(|m| {
            ((m + 1)..clusters.len())
                .find(|&n| are_neighbours(&clusters[m], &clusters[n]))
                .map(|n| (m, n))
        });
        let Some((m, n)) = pair else { break };
        let other = clusters.remove(n);
        clusters[m].merge_phi(other);
    }
}
