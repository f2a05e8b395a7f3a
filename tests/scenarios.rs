use std::collections::HashSet;

use trackjets::{Collection, Config, Event, Track, TrackJetProducer};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn track(pt: f64, eta: f64, phi: f64, z0: f64) -> Track {
    Track {
        pt,
        eta,
        phi,
        z0,
        d0: 0.,
        chi2dof: 1.,
        bend_chi2: 1.,
        n_stubs: 5,
        n_ps_stubs: 3,
    }
}

#[test]
fn single_track() {
    init_log();
    let producer = TrackJetProducer::new(Config::default()).unwrap();
    let event = Event::new(vec![track(10., 0., 0., 0.)], 0.);
    let res = producer.produce(&event);
    assert_eq!(res.collection, Collection::Prompt);
    assert_eq!(res.jets.len(), 1);
    let jet = &res.jets[0];
    assert_eq!(jet.pt, 10.);
    // eta = 0 lies on a bin edge
    assert!(jet.eta.abs() <= 0.1 + 1e-9);
    assert!(jet.phi.abs() < 1e-9);
    assert_eq!(jet.n_tracks, 1);
    assert_eq!(jet.tracks, [&event.tracks[0]]);
    assert!(!jet.is_displaced);
    assert!(jet.z_vertex.abs() < 0.5);
    assert_eq!(res.z_vertex, Some(jet.z_vertex));
}

#[test]
fn track_pt_is_capped() {
    init_log();
    // single-track clusters of any pt count towards HT
    let cfg = Config {
        min_jet_et_low_pt: 1000.,
        min_jet_et_high_pt: 1000.,
        ..Default::default()
    };
    let producer = TrackJetProducer::new(cfg.clone()).unwrap();
    let event = Event::new(vec![track(2. * cfg.pt_max, 1.05, 0.5, 0.)], 0.);
    let res = producer.produce(&event);
    assert_eq!(res.jets.len(), 1);
    assert_eq!(res.jets[0].pt, cfg.pt_max);
}

#[test]
fn neighbouring_eta_bins() {
    init_log();
    let producer = TrackJetProducer::new(Config::default()).unwrap();
    let event = Event::new(vec![track(3., 0.69, 1., 0.1), track(10., 0.51, 1., 0.1)], 0.);
    let res = producer.produce(&event);
    assert_eq!(res.jets.len(), 1);
    let jet = &res.jets[0];
    assert_eq!(jet.pt, 13.);
    assert_eq!(jet.n_tracks, 2);
    assert!((jet.eta - 0.5).abs() < 1e-9);
}

#[test]
fn nothing_selected() {
    init_log();
    let producer = TrackJetProducer::new(Config::default()).unwrap();
    let event = Event::default();
    let res = producer.produce(&event);
    assert!(res.jets.is_empty());

    let event = Event::new(vec![Track { chi2dof: 100., ..track(10., 0., 0., 0.) }], 0.);
    assert!(producer.produce(&event).jets.is_empty());
}

#[test]
fn displaced_jet() {
    init_log();
    let cfg = Config::extended();
    let producer = TrackJetProducer::new(cfg.clone()).unwrap();
    let displaced = |pt| Track {
        n_stubs: 4,
        d0: 0.5,
        bend_chi2: 0.5,
        chi2dof: 0.5,
        ..track(pt, -1.33, 2.2, 3.)
    };
    let event = Event::new(vec![displaced(10.), displaced(8.)], 3.);
    let res = producer.produce(&event);
    assert_eq!(res.collection, Collection::Extended);
    assert_eq!(res.jets.len(), 1);
    let jet = &res.jets[0];
    assert_eq!(jet.n_displaced, 2);
    assert_eq!(cfg.min_displaced_tracks, 2);
    assert!(jet.is_displaced);

    let event = Event::new(vec![displaced(10.), Track { d0: 0., ..displaced(8.) }], 3.);
    let res = producer.produce(&event);
    assert_eq!(res.jets[0].n_displaced, 1);
    assert!(!res.jets[0].is_displaced);
}

#[test]
fn jets_come_from_the_hardest_z_window() {
    init_log();
    let cfg = Config { max_dz_to_vertex: 30., ..Default::default() };
    let producer = TrackJetProducer::new(cfg).unwrap();
    let event = Event::new(
        vec![
            track(15., -0.5, 0.3, -10.),
            track(15., -0.5, 0.3, -10.),
            track(12., 1.5, -2.5, 5.),
            track(8., 1.5, -2.5, 5.),
        ],
        0.,
    );
    let res = producer.produce(&event);
    assert_eq!(res.jets.len(), 1);
    assert_eq!(res.jets[0].pt, 30.);
    assert!((res.jets[0].z_vertex + 10.).abs() < 1.);
}

// deterministic pseudo-random numbers in [0, 1)
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[test]
fn jets_are_consistent() {
    use std::f64::consts::PI;

    init_log();
    let cfg = Config {
        max_dz_to_vertex: 30.,
        z_bins: 20,
        ..Default::default()
    };
    let producer = TrackJetProducer::new(cfg.clone()).unwrap();
    let mut rng = Lcg(42);
    for _ in 0..20 {
        let mut tracks = Vec::new();
        // a few collimated sprays on top of soft noise
        for _ in 0..4 {
            let (eta, phi, z) = (
                4. * rng.next() - 2.,
                2. * PI * rng.next() - PI,
                20. * rng.next() - 10.,
            );
            for _ in 0..6 {
                tracks.push(track(
                    2. + 30. * rng.next(),
                    eta + 0.3 * (rng.next() - 0.5),
                    phi + 0.3 * (rng.next() - 0.5),
                    z + 0.2 * (rng.next() - 0.5),
                ));
            }
        }
        for _ in 0..40 {
            tracks.push(track(
                2. + 3. * rng.next(),
                4.8 * rng.next() - 2.4,
                2. * PI * rng.next() - PI,
                30. * rng.next() - 15.,
            ));
        }
        let event = Event::new(tracks, 0.);
        let res = producer.produce(&event);

        let mut seen = HashSet::new();
        for jet in &res.jets {
            assert!(jet.pt > cfg.pt_min);
            assert!(jet.n_tracks >= 1 && jet.n_tracks <= 5000);
            assert_eq!(jet.n_tracks, jet.tracks.len());
            assert_eq!(jet.is_displaced, jet.n_displaced >= cfg.min_displaced_tracks);
            let pt: f64 = jet.tracks.iter().map(|t| t.pt.min(cfg.pt_max)).sum();
            assert!((pt - jet.pt).abs() < 1e-9 * pt);
            for &t in &jet.tracks {
                assert!(seen.insert(t as *const Track), "track in two jets");
                assert!((t.z0 - jet.z_vertex).abs() <= 30. / 21. + 1e-9);
            }
        }
        assert!(seen.len() <= event.tracks.len());
    }
}
