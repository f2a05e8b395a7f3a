use serde::{Deserialize, Serialize};

use crate::stub::{count_ps_stubs, Stub, StubClassifier};
use crate::track::Track;

/// Input for a single bunch crossing
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Event {
    pub tracks: Vec<Track>,
    /// Position of the primary vertex along the beam line
    pub primary_vertex_z: f64,
}

impl Event {
    pub fn new(tracks: Vec<Track>, primary_vertex_z: f64) -> Self {
        Self { tracks, primary_vertex_z }
    }
}

/// A track together with its stubs, before PS stub counting
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct RawTrack {
    #[serde(flatten)]
    pub track: Track,
    #[serde(default)]
    pub stubs: Vec<Stub>,
}

impl RawTrack {
    /// Fill in the stub counts from the attached stubs
    ///
    /// Tracks without stub information are passed through unchanged.
    pub fn into_track<C: StubClassifier + ?Sized>(self, classifier: &C) -> Track {
        let RawTrack { mut track, stubs } = self;
        if !stubs.is_empty() {
            track.n_stubs = stubs.len();
            track.n_ps_stubs = count_ps_stubs(&stubs, classifier);
        }
        track
    }
}

/// Event with stub information, as read by the command line tool
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct RawEvent {
    pub tracks: Vec<RawTrack>,
    pub primary_vertex_z: f64,
}

impl RawEvent {
    pub fn into_event<C: StubClassifier + ?Sized>(self, classifier: &C) -> Event {
        let tracks = self
            .tracks
            .into_iter()
            .map(|t| t.into_track(classifier))
            .collect();
        Event::new(tracks, self.primary_vertex_z)
    }
}
