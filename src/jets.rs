use crate::config::Config;
use crate::track::{Selection, Track};
use crate::zbin::ZBinResult;

use jetty::PseudoJet;
use log::trace;
use serde::Serialize;

/// Clusters with more tracks than this are considered corrupted
pub const MAX_JET_TRACKS: usize = 5000;

/// A track jet
#[derive(Clone, Debug, Serialize)]
pub struct Jet<'a> {
    /// Four-momentum of a massless jet with the cluster pt and direction
    #[serde(skip)]
    pub p: PseudoJet,
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    /// Centre of the z window the jet was found in
    pub z_vertex: f64,
    pub tracks: Vec<&'a Track>,
    pub n_tracks: usize,
    pub n_displaced: usize,
    pub is_displaced: bool,
}

/// Turns the clusters of the best z window into jets
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct JetAssembler {
    min_pt: f64,
    min_displaced_tracks: usize,
}

impl JetAssembler {
    pub fn new(cfg: &Config) -> Self {
        Self {
            min_pt: cfg.pt_min,
            min_displaced_tracks: cfg.min_displaced_tracks,
        }
    }

    /// Construct jets, silently dropping malformed clusters
    pub fn assemble<'a>(&self, zbin: ZBinResult, tracks: &Selection<'a>) -> Vec<Jet<'a>> {
        let z_vertex = zbin.z_centre;
        let mut jets = Vec::with_capacity(zbin.clusters.len());
        for cluster in zbin.clusters {
            if cluster.pt <= self.min_pt
                || cluster.n_tracks < 1
                || cluster.n_tracks > MAX_JET_TRACKS
            {
                trace!("dropping cluster with pt {} and {} tracks", cluster.pt, cluster.n_tracks);
                continue;
            }
            let jet_tracks: Vec<_> = cluster
                .tracks
                .iter()
                .filter_map(|&id| tracks.track(id))
                .collect();
            if jet_tracks.is_empty() {
                continue;
            }
            let (pt, eta, phi) = (cluster.pt, cluster.eta, cluster.phi);
            let p = [
                pt * eta.cosh(),
                pt * phi.cos(),
                pt * phi.sin(),
                pt * eta.sinh(),
            ]
            .into();
            jets.push(Jet {
                p,
                pt,
                eta,
                phi,
                z_vertex,
                tracks: jet_tracks,
                n_tracks: cluster.n_tracks,
                n_displaced: cluster.n_displaced,
                is_displaced: cluster.n_displaced >= self.min_displaced_tracks,
            });
        }
        jets
    }
}
