use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A reconstructed track as seen by the jet finder
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct Track {
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle in (-π, π]
    pub phi: f64,
    /// Longitudinal impact parameter
    pub z0: f64,
    /// Transverse impact parameter
    pub d0: f64,
    /// Fit χ² per degree of freedom
    pub chi2dof: f64,
    /// Stub bend consistency χ²
    pub bend_chi2: f64,
    /// Total number of stubs
    pub n_stubs: usize,
    /// Number of stubs in pixel-strip modules
    pub n_ps_stubs: usize,
}

/// Index of a track in a [Selection]
///
/// Clusters refer to tracks only through this index and never own them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize)]
pub struct TrackId(pub usize);

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SelectedTrack<'a> {
    pub track: &'a Track,
    pub displaced: bool,
}

/// The tracks accepted by the track filter, in input order
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Selection<'a> {
    tracks: Vec<SelectedTrack<'a>>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, track: &'a Track, displaced: bool) -> TrackId {
        let id = TrackId(self.tracks.len());
        self.tracks.push(SelectedTrack { track, displaced });
        id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &SelectedTrack<'a>)> {
        self.tracks.iter().enumerate().map(|(n, t)| (TrackId(n), t))
    }

    /// Look up the original track behind an id
    pub fn track(&self, id: TrackId) -> Option<&'a Track> {
        self.tracks.get(id.0).map(|t| t.track)
    }
}

impl<'a> Index<TrackId> for Selection<'a> {
    type Output = SelectedTrack<'a>;

    fn index(&self, id: TrackId) -> &Self::Output {
        &self.tracks[id.0]
    }
}
