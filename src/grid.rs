use std::f64::consts::PI;
use std::mem;

use crate::config::Config;
use crate::track::{Selection, TrackId};

/// Most z windows a single track may contribute to
pub const MAX_WINDOWS_PER_TRACK: u8 = 2;

/// Bin widths of the (z, phi, eta) grid
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Binning {
    pub eta_max: f64,
    pub z_max: f64,
    pub eta_bins: usize,
    pub phi_bins: usize,
    pub z_bins: usize,
    pub eta_step: f64,
    pub phi_step: f64,
    pub z_step: f64,
}

impl Binning {
    /// Requires a positive number of eta and phi bins
    pub fn new(cfg: &Config) -> Self {
        Self {
            eta_max: cfg.eta_max,
            z_max: cfg.z_max,
            eta_bins: cfg.eta_bins,
            phi_bins: cfg.phi_bins,
            z_bins: cfg.z_bins,
            eta_step: 2. * cfg.eta_max / cfg.eta_bins as f64,
            phi_step: 2. * PI / cfg.phi_bins as f64,
            z_step: 2. * cfg.z_max / (cfg.z_bins + 1) as f64,
        }
    }
}

/// A cell of the phi × eta grid, or a cluster built from such cells
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EtaPhiBin {
    pub eta: f64,
    pub phi: f64,
    /// Summed capped track pt
    pub pt: f64,
    pub n_tracks: usize,
    pub n_displaced: usize,
    pub tracks: Vec<TrackId>,
    /// Already absorbed into some cluster
    pub used: bool,
}

impl EtaPhiBin {
    pub fn new(eta: f64, phi: f64) -> Self {
        Self {
            eta,
            phi,
            ..Default::default()
        }
    }

    /// Move the content out into a fresh cluster and mark this bin as used
    pub fn take(&mut self) -> Self {
        self.used = true;
        Self {
            tracks: mem::take(&mut self.tracks),
            used: false,
            ..*self
        }
    }

    /// Add the content of `other`, keeping the current centre
    pub fn absorb(&mut self, other: Self) {
        self.pt += other.pt;
        self.n_tracks += other.n_tracks;
        self.n_displaced += other.n_displaced;
        self.tracks.extend(other.tracks);
    }

    /// Merge neighbours in eta; the centre moves to the harder cluster
    pub fn merge_eta(&mut self, other: Self) {
        if other.pt > self.pt {
            self.eta = other.eta;
        }
        self.absorb(other)
    }

    /// Merge neighbours in phi; the centre moves to the harder cluster
    pub fn merge_phi(&mut self, other: Self) {
        if other.pt > self.pt {
            self.phi = other.phi;
        }
        self.absorb(other)
    }
}

/// The inclusive z range of one window
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ZWindow {
    pub min: f64,
    pub max: f64,
}

impl ZWindow {
    pub fn contains(&self, z: f64) -> bool {
        self.min <= z && z <= self.max
    }

    pub fn centre(&self) -> f64 {
        (self.min + self.max) / 2.
    }
}

/// Bins indexed as `[phi][eta]`
#[derive(Clone, PartialEq, Debug)]
pub struct Grid {
    eta_step: f64,
    phi_step: f64,
    eta_centres: Vec<f64>,
    phi_centres: Vec<f64>,
    bins: Vec<Vec<EtaPhiBin>>,
}

impl Grid {
    pub fn new(binning: &Binning) -> Self {
        let eta_centres = centres(-binning.eta_max, binning.eta_step, binning.eta_bins);
        let phi_centres = centres(-PI, binning.phi_step, binning.phi_bins);
        let bins = phi_centres
            .iter()
            .map(|&phi| eta_centres.iter().map(|&eta| EtaPhiBin::new(eta, phi)).collect())
            .collect();
        Self {
            eta_step: binning.eta_step,
            phi_step: binning.phi_step,
            eta_centres,
            phi_centres,
            bins,
        }
    }

    /// Fill in all tracks inside the window
    ///
    /// `windows_used` counts for each track how many windows it has
    /// already been added to. Tracks at the limit are skipped.
    pub fn fill(
        &mut self,
        tracks: &Selection<'_>,
        window: ZWindow,
        windows_used: &mut [u8],
        pt_max: f64,
    ) {
        debug_assert_eq!(windows_used.len(), tracks.len());
        for (id, selected) in tracks.iter() {
            let track = selected.track;
            if windows_used[id.0] == MAX_WINDOWS_PER_TRACK || !window.contains(track.z0) {
                continue;
            }
            let Some(i) = find_bin(&self.phi_centres, self.phi_step, track.phi) else {
                continue;
            };
            let Some(j) = find_bin(&self.eta_centres, self.eta_step, track.eta) else {
                continue;
            };
            windows_used[id.0] += 1;
            let bin = &mut self.bins[i][j];
            bin.pt += track.pt.min(pt_max);
            bin.n_tracks += 1;
            if selected.displaced {
                bin.n_displaced += 1;
            }
            bin.tracks.push(id);
        }
    }

    pub fn phi_slices_mut(&mut self) -> impl Iterator<Item = &mut [EtaPhiBin]> {
        self.bins.iter_mut().map(|s| s.as_mut_slice())
    }

    pub fn bin(&self, phi_idx: usize, eta_idx: usize) -> Option<&EtaPhiBin> {
        self.bins.get(phi_idx)?.get(eta_idx)
    }
}

fn centres(start: f64, step: f64, n: usize) -> Vec<f64> {
    let mut res = Vec::with_capacity(n);
    let mut lower = start;
    for _ in 0..n {
        let upper = lower + step;
        res.push((lower + upper) / 2.);
        lower = upper;
    }
    res
}

// bins are half-open at the lower edge
fn find_bin(centres: &[f64], step: f64, x: f64) -> Option<usize> {
    centres
        .iter()
        .position(|&c| c - step / 2. < x && x <= c + step / 2.)
}
