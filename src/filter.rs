use crate::config::Config;
use crate::track::{Selection, Track};

use log::trace;

/// Track quality and vertex compatibility selection
#[derive(Clone, PartialEq, Debug)]
pub struct TrackFilter {
    cfg: Config,
}

impl TrackFilter {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn accept(&self, track: &Track, pv_z: f64) -> bool {
        let cfg = &self.cfg;
        track.n_ps_stubs >= cfg.min_ps_stubs
            && self.passes_quality_cuts(track)
            && (pv_z - track.z0).abs() <= cfg.max_dz_to_vertex
            && track.z0.abs() <= cfg.z_max
            && track.eta.abs() <= cfg.eta_max
            && track.pt >= cfg.pt_min
    }

    fn passes_quality_cuts(&self, track: &Track) -> bool {
        let cfg = &self.cfg;
        let Track { n_stubs, chi2dof, bend_chi2, .. } = *track;
        if !cfg.displaced {
            n_stubs >= 4 && bend_chi2 < cfg.bend_chi2_max && chi2dof < cfg.chi2dof_max
        } else if n_stubs == 4 {
            bend_chi2 < cfg.displaced_bend_4_max && chi2dof < cfg.displaced_chi2_4_max
        } else if n_stubs > 4 {
            bend_chi2 < cfg.displaced_bend_5_max && chi2dof < cfg.displaced_chi2_5_max
        } else {
            false
        }
    }

    /// Whether the track counts as displaced, independent of acceptance
    ///
    /// Unset or negative d0 cuts are disabled.
    pub fn is_displaced(&self, track: &Track) -> bool {
        let d0 = track.d0.abs();
        let exceeds = |cut: Option<f64>| cut.map_or(false, |cut| cut >= 0. && d0 > cut);
        (track.n_stubs >= 5 && exceeds(self.cfg.d0_cut_nstubs5))
            || (track.n_stubs == 4 && exceeds(self.cfg.d0_cut_nstubs4))
    }

    /// Select all accepted tracks, keeping their order
    pub fn select<'a>(&self, tracks: &'a [Track], pv_z: f64) -> Selection<'a> {
        let mut selection = Selection::new();
        for track in tracks {
            if self.accept(track, pv_z) {
                selection.push(track, self.is_displaced(track));
            }
        }
        trace!("selected {} of {} tracks", selection.len(), tracks.len());
        selection
    }
}
