use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Display, EnumIter, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize,
)]
pub enum Subdetector {
    /// Outer barrel
    #[strum(to_string = "TOB")]
    Barrel,
    /// Endcap discs
    #[strum(to_string = "TID")]
    Endcap,
    /// Anything outside the outer tracker
    #[strum(to_string = "other")]
    Other,
}

/// Location of a single track stub
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub struct Stub {
    pub subdetector: Subdetector,
    /// Barrel layer, counting from the beam line
    pub layer: u32,
    /// Endcap ring, counting from the beam line
    pub ring: u32,
}

/// Decides whether a stub sits in a pixel-strip (PS) module
pub trait StubClassifier {
    fn is_ps(&self, stub: &Stub) -> bool;
}

/// Classifies by position: the inner barrel layers and endcap rings carry PS modules
#[derive(Copy, Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct PsModuleClassifier {
    pub max_barrel_layer: u32,
    pub max_endcap_ring: u32,
}

impl Default for PsModuleClassifier {
    fn default() -> Self {
        Self {
            max_barrel_layer: 3,
            max_endcap_ring: 9,
        }
    }
}

impl StubClassifier for PsModuleClassifier {
    fn is_ps(&self, stub: &Stub) -> bool {
        match stub.subdetector {
            Subdetector::Barrel => stub.layer <= self.max_barrel_layer,
            Subdetector::Endcap => stub.ring <= self.max_endcap_ring,
            Subdetector::Other => false,
        }
    }
}

impl<F: Fn(&Stub) -> bool> StubClassifier for F {
    fn is_ps(&self, stub: &Stub) -> bool {
        self(stub)
    }
}

pub fn count_ps_stubs<C: StubClassifier + ?Sized>(stubs: &[Stub], classifier: &C) -> usize {
    stubs.iter().filter(|s| classifier.is_ps(s)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(subdetector: Subdetector, layer: u32, ring: u32) -> Stub {
        Stub { subdetector, layer, ring }
    }

    #[test]
    fn default_ps_layers() {
        let stubs = [
            stub(Subdetector::Barrel, 1, 0),
            stub(Subdetector::Barrel, 3, 0),
            stub(Subdetector::Barrel, 4, 0),
            stub(Subdetector::Endcap, 0, 9),
            stub(Subdetector::Endcap, 0, 10),
            stub(Subdetector::Other, 1, 1),
        ];
        assert_eq!(count_ps_stubs(&stubs, &PsModuleClassifier::default()), 3);
    }

    #[test]
    fn closure_classifier() {
        let stubs = [stub(Subdetector::Barrel, 6, 0), stub(Subdetector::Endcap, 0, 15)];
        let everything = |_: &Stub| true;
        assert_eq!(count_ps_stubs(&stubs, &everything), 2);
    }

    #[test]
    fn subdetector_names() {
        assert_eq!(Subdetector::Barrel.to_string(), "TOB");
        assert_eq!(Subdetector::Endcap.to_string(), "TID");
    }
}
