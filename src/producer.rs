use log::debug;
use serde::Serialize;
use strum::{Display, EnumIter};

use crate::config::{Config, ConfigError};
use crate::event::Event;
use crate::filter::TrackFilter;
use crate::jets::{Jet, JetAssembler};
use crate::zbin::ZBinScanner;

#[derive(
    Display, EnumIter, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize,
)]
pub enum Collection {
    #[strum(to_string = "L1TrackJets")]
    #[serde(rename = "L1TrackJets")]
    Prompt,
    #[strum(to_string = "L1TrackJetsExtended")]
    #[serde(rename = "L1TrackJetsExtended")]
    Extended,
}

/// Jets found in one event
#[derive(Clone, Debug, Serialize)]
pub struct TrackJets<'a> {
    pub collection: Collection,
    /// Centre of the selected z window, if any
    pub z_vertex: Option<f64>,
    pub jets: Vec<Jet<'a>>,
}

/// Track jet finder: select tracks, scan z windows, build jets
#[derive(Clone, PartialEq, Debug)]
pub struct TrackJetProducer {
    collection: Collection,
    filter: TrackFilter,
    scanner: ZBinScanner,
    assembler: JetAssembler,
}

impl TrackJetProducer {
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let collection = if cfg.displaced {
            Collection::Extended
        } else {
            Collection::Prompt
        };
        Ok(Self {
            collection,
            assembler: JetAssembler::new(&cfg),
            filter: TrackFilter::new(cfg.clone()),
            scanner: ZBinScanner::new(cfg),
        })
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn produce<'a>(&self, event: &'a Event) -> TrackJets<'a> {
        let tracks = self.filter.select(&event.tracks, event.primary_vertex_z);
        let mut res = TrackJets {
            collection: self.collection,
            z_vertex: None,
            jets: Vec::new(),
        };
        if tracks.is_empty() {
            debug!("no tracks pass the selection");
            return res;
        }
        if let Some(best) = self.scanner.scan(&tracks) {
            debug!(
                "best z bin {} at z = {:.2} with HT = {}",
                best.index, best.z_centre, best.ht
            );
            res.z_vertex = Some(best.z_centre);
            res.jets = self.assembler.assemble(best, &tracks);
        }
        debug!("{} jets in {}", res.jets.len(), res.collection);
        res
    }
}
