use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Number of {0} bins has to be positive")]
    NoBins(&'static str),
    #[error("{name} has to be positive and finite, but is {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Track selection and clustering parameters
///
/// The field aliases accept the parameter names of the trigger
/// configuration files.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "trk_zMax")]
    pub z_max: f64,
    /// Maximum contribution of a single track to the cluster pt
    #[serde(alias = "trk_ptMax")]
    pub pt_max: f64,
    #[serde(alias = "trk_ptMin")]
    pub pt_min: f64,
    #[serde(alias = "trk_etaMax")]
    pub eta_max: f64,
    #[serde(alias = "trk_chi2dofMax")]
    pub chi2dof_max: f64,
    #[serde(alias = "trk_bendChi2Max")]
    pub bend_chi2_max: f64,
    #[serde(alias = "trk_nPSStubMin")]
    pub min_ps_stubs: usize,
    /// Minimum cluster pt counting towards HT
    #[serde(alias = "minTrkJetpT")]
    pub min_trk_jet_pt: f64,
    #[serde(alias = "minJetEtLowPt")]
    pub min_jet_et_low_pt: f64,
    #[serde(alias = "minJetEtHighPt")]
    pub min_jet_et_high_pt: f64,
    #[serde(alias = "etaBins")]
    pub eta_bins: usize,
    #[serde(alias = "phiBins")]
    pub phi_bins: usize,
    #[serde(alias = "zBins")]
    pub z_bins: usize,
    /// |d0| above which a four-stub track counts as displaced
    #[serde(alias = "d0_cutNStubs4")]
    pub d0_cut_nstubs4: Option<f64>,
    /// |d0| above which a track with five or more stubs counts as displaced
    #[serde(alias = "d0_cutNStubs5")]
    pub d0_cut_nstubs5: Option<f64>,
    #[serde(alias = "lowpTJetMinTrackMultiplicity")]
    pub low_pt_jet_min_tracks: usize,
    #[serde(alias = "highpTJetMinTrackMultiplicity")]
    pub high_pt_jet_min_tracks: usize,
    pub displaced: bool,
    #[serde(alias = "nStubs4DisplacedChi2")]
    pub displaced_chi2_4_max: f64,
    #[serde(alias = "nStubs5DisplacedChi2")]
    pub displaced_chi2_5_max: f64,
    #[serde(alias = "nStubs4Displacedbend")]
    pub displaced_bend_4_max: f64,
    #[serde(alias = "nStubs5Displacedbend")]
    pub displaced_bend_5_max: f64,
    #[serde(alias = "nDisplacedTracks")]
    pub min_displaced_tracks: usize,
    #[serde(alias = "MaxDzTrackPV")]
    pub max_dz_to_vertex: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            z_max: 15.,
            pt_max: 200.,
            pt_min: 2.,
            eta_max: 2.4,
            chi2dof_max: 10.,
            bend_chi2_max: 2.2,
            min_ps_stubs: 0,
            min_trk_jet_pt: 5.,
            min_jet_et_low_pt: 50.,
            min_jet_et_high_pt: 100.,
            eta_bins: 24,
            phi_bins: 27,
            z_bins: 60,
            d0_cut_nstubs4: None,
            d0_cut_nstubs5: None,
            low_pt_jet_min_tracks: 2,
            high_pt_jet_min_tracks: 3,
            displaced: false,
            displaced_chi2_4_max: 5.,
            displaced_chi2_5_max: 2.75,
            displaced_bend_4_max: 1.7,
            displaced_bend_5_max: 3.5,
            min_displaced_tracks: 2,
            max_dz_to_vertex: 1.,
        }
    }
}

impl Config {
    /// Settings for the extended (displaced) jet collection
    pub fn extended() -> Self {
        Self {
            displaced: true,
            d0_cut_nstubs4: Some(0.15),
            d0_cut_nstubs5: Some(0.5),
            max_dz_to_vertex: 15.,
            ..Default::default()
        }
    }

    /// Check the preconditions of the clustering
    ///
    /// The clustering itself assumes a validated configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eta_bins == 0 {
            return Err(ConfigError::NoBins("eta"));
        }
        if self.phi_bins == 0 {
            return Err(ConfigError::NoBins("phi"));
        }
        for (name, value) in [
            ("z_max", self.z_max),
            ("eta_max", self.eta_max),
            ("pt_max", self.pt_max),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
