//! Track jets for the level-one trigger.
//!
//! Tracks passing a quality selection are filled into overlapping
//! windows along the beam line. In each window, tracks are binned in
//! pseudorapidity and azimuth and clustered in two layers: first along
//! eta within each phi slice, then across neighbouring phi slices. The
//! window with the largest scalar sum of jet transverse momenta (HT) is
//! taken to contain the primary interaction, and its clusters are
//! returned as jets.
//!
//! ```no_run
//! use trackjets::{Config, Event, TrackJetProducer};
//!
//! let producer = TrackJetProducer::new(Config::default()).unwrap();
//! let event = Event::default();
//! for jet in producer.produce(&event).jets {
//!     println!("{} {} {}", jet.pt, jet.eta, jet.phi);
//! }
//! ```
#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod eta_cluster;
pub mod event;
pub mod filter;
pub mod grid;
pub mod jets;
pub mod phi_cluster;
pub mod producer;
pub mod stub;
pub mod track;
pub mod zbin;

pub use config::{Config, ConfigError};
pub use event::{Event, RawEvent};
pub use jets::Jet;
pub use producer::{Collection, TrackJetProducer, TrackJets};
pub use track::{Track, TrackId};
