use log::{debug, trace};

use crate::config::Config;
use crate::eta_cluster::cluster_eta;
use crate::grid::{Binning, EtaPhiBin, Grid, ZWindow};
use crate::phi_cluster::cluster_phi;
use crate::track::Selection;

/// Clustering outcome for a single z window
#[derive(Clone, PartialEq, Debug)]
pub struct ZBinResult {
    pub index: usize,
    pub z_centre: f64,
    pub ht: f64,
    pub clusters: Vec<EtaPhiBin>,
}

impl ZBinResult {
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }
}

/// Runs the clustering in each z window and keeps the one with the largest HT
#[derive(Clone, PartialEq, Debug)]
pub struct ZBinScanner {
    cfg: Config,
    binning: Binning,
}

impl ZBinScanner {
    /// Requires a configuration with nonzero eta and phi bins
    pub fn new(cfg: Config) -> Self {
        let binning = Binning::new(&cfg);
        Self { cfg, binning }
    }

    pub fn binning(&self) -> &Binning {
        &self.binning
    }

    /// The z windows in scanning order
    ///
    /// Consecutive windows overlap by half their width.
    pub fn windows(&self) -> impl Iterator<Item = ZWindow> + '_ {
        let step = self.binning.z_step;
        let mut min = -self.binning.z_max;
        (0..self.binning.z_bins).map(move |_| {
            let window = ZWindow { min, max: min + 2. * step };
            min += step;
            window
        })
    }

    /// Find the z window with the largest HT
    ///
    /// On equal HT the later window wins. Returns `None` only if there
    /// are no z bins.
    pub fn scan(&self, tracks: &Selection<'_>) -> Option<ZBinResult> {
        let mut windows_used = vec![0; tracks.len()];
        let mut best: Option<ZBinResult> = None;
        for (index, window) in self.windows().enumerate() {
            let clusters = self.cluster_window(tracks, window, &mut windows_used);
            let ht = self.ht(&clusters);
            debug!(
                "z bin {index} at z = {:.2}: {} clusters, HT = {ht}",
                window.centre(),
                clusters.len()
            );
            if best.as_ref().map_or(true, |best| ht >= best.ht) {
                best = Some(ZBinResult {
                    index,
                    z_centre: window.centre(),
                    ht,
                    clusters,
                });
            }
        }
        best
    }

    /// Cluster all tracks in a single z window
    pub fn cluster_window(
        &self,
        tracks: &Selection<'_>,
        window: ZWindow,
        windows_used: &mut [u8],
    ) -> Vec<EtaPhiBin> {
        let mut grid = Grid::new(&self.binning);
        grid.fill(tracks, window, windows_used, self.cfg.pt_max);
        let eta_clusters = grid
            .phi_slices_mut()
            .map(|slice| cluster_eta(slice, self.binning.eta_step))
            .collect();
        cluster_phi(eta_clusters, &self.binning)
    }

    /// Summed pt of all clusters passing the jet requirements
    pub fn ht(&self, clusters: &[EtaPhiBin]) -> f64 {
        clusters
            .iter()
            .filter(|c| self.counts_towards_ht(c))
            .map(|c| c.pt)
            .sum()
    }

    fn counts_towards_ht(&self, cluster: &EtaPhiBin) -> bool {
        let cfg = &self.cfg;
        if cluster.pt > cfg.min_jet_et_low_pt && cluster.n_tracks < cfg.low_pt_jet_min_tracks {
            trace!("too few tracks for {} GeV cluster", cluster.pt);
            return false;
        }
        if cluster.pt > cfg.min_jet_et_high_pt && cluster.n_tracks < cfg.high_pt_jet_min_tracks {
            trace!("too few tracks for {} GeV cluster", cluster.pt);
            return false;
        }
        cluster.pt > cfg.min_trk_jet_pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Track;

    fn cfg() -> Config {
        Config {
            z_max: 15.,
            z_bins: 5,
            ..Default::default()
        }
    }

    fn track(pt: f64, eta: f64, phi: f64, z0: f64) -> Track {
        Track { pt, eta, phi, z0, ..Default::default() }
    }

    fn selection(tracks: &[Track]) -> Selection<'_> {
        let mut sel = Selection::new();
        for t in tracks {
            sel.push(t, false);
        }
        sel
    }

    #[test]
    fn overlapping_windows() {
        let scanner = ZBinScanner::new(cfg());
        let windows: Vec<_> = scanner.windows().collect();
        assert_eq!(windows.len(), 5);
        assert!((windows[0].min + 15.).abs() < 1e-12);
        assert!((windows[0].max + 5.).abs() < 1e-12);
        assert!((windows[1].min + 10.).abs() < 1e-12);
        assert!((windows[4].max - 15.).abs() < 1e-9);
        assert!((windows[2].centre()).abs() < 1e-9);
    }

    #[test]
    fn no_z_bins() {
        let scanner = ZBinScanner::new(Config { z_bins: 0, ..cfg() });
        assert!(scanner.scan(&Selection::new()).is_none());
    }

    #[test]
    fn empty_selection_picks_last_window() {
        let scanner = ZBinScanner::new(cfg());
        let best = scanner.scan(&Selection::new()).unwrap();
        assert_eq!(best.ht, 0.);
        assert_eq!(best.index, 4);
        assert_eq!(best.n_clusters(), 0);
    }

    #[test]
    fn best_window_has_max_ht() {
        let tracks = [
            track(12., 0.1, 0.1, -12.),
            track(8., 1.0, -2.0, 7.),
            track(9., 1.0, -2.0, 7.),
        ];
        let sel = selection(&tracks);
        let scanner = ZBinScanner::new(cfg());
        let best = scanner.scan(&sel).unwrap();
        // the last two windows both contain the harder pair, and later
        // windows win ties
        assert_eq!(best.ht, 17.);
        assert_eq!(best.index, 4);
        assert!((best.z_centre - 10.).abs() < 1e-9);

        let mut used = vec![0; sel.len()];
        for window in scanner.windows() {
            let clusters = scanner.cluster_window(&sel, window, &mut used);
            assert!(scanner.ht(&clusters) <= best.ht);
        }
    }

    #[test]
    fn track_multiplicity_requirements() {
        let scanner = ZBinScanner::new(cfg());
        let c = |pt, n_tracks| EtaPhiBin { pt, n_tracks, ..Default::default() };
        assert!(scanner.counts_towards_ht(&c(10., 1)));
        assert!(!scanner.counts_towards_ht(&c(4., 1)));
        assert!(!scanner.counts_towards_ht(&c(60., 1)));
        assert!(scanner.counts_towards_ht(&c(60., 2)));
        assert!(!scanner.counts_towards_ht(&c(120., 2)));
        assert!(scanner.counts_towards_ht(&c(120., 3)));
        assert_eq!(scanner.ht(&[c(10., 1), c(60., 1), c(120., 3)]), 130.);
    }
}
