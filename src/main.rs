//! Find track jets in events stored as JSON.
//!
//! # How to use
//!
//!     trackjets EVENTFILE...
//!
//! Each event file should contain a list of events, each with a
//! `primary_vertex_z` and a list of `tracks`. Tracks may carry their
//! `stubs`, in which case the stub counts are derived from them. For
//! each event, one line of JSON with the jets is written to standard
//! output.
mod opt;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::opt::Opt;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use trackjets::stub::PsModuleClassifier;
use trackjets::{Config, RawEvent, TrackJetProducer};

fn main() -> Result<()> {
    let opt = Opt::parse();

    let env = Env::default().filter_or("TRACKJETS_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    let cfg = if let Some(path) = &opt.config {
        load_config(path)?
    } else if opt.extended {
        Config::extended()
    } else {
        Config::default()
    };
    debug!("Configuration: {cfg:?}");
    let producer = TrackJetProducer::new(cfg).context("Invalid configuration")?;
    let classifier = PsModuleClassifier::default();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut nevents = 0;
    for file in &opt.files {
        debug!("Reading events from {file:?}");
        let events: Vec<RawEvent> = read_json(file)?;
        for event in events {
            let event = event.into_event(&classifier);
            let jets = producer.produce(&event);
            serde_json::to_writer(&mut out, &jets)?;
            writeln!(out)?;
            nevents += 1;
        }
    }
    out.flush()?;
    info!("Processed {nevents} events");
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    read_json(path).with_context(|| format!("Failed to load configuration from {path:?}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {path:?}"))
}
