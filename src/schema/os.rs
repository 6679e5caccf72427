//! OS detection records.

use crate::schema::port::Cpe;
use crate::schema::scalar::{Accuracy, PortState, Protocol};

record! {
    pub struct Os = "os" {
        attributes {}
        children {
            /// Ports the fingerprint was taken against
            ports_used: many PortUsed,
            matches: many OsMatch,
            fingerprints: many OsFingerprint,
        }
    }
}

impl Os {
    /// The match with the highest accuracy, first one on ties
    pub fn best_match(&self) -> Option<&OsMatch> {
        self.matches
            .iter()
            .reduce(|best, candidate| {
                if candidate.accuracy > best.accuracy {
                    candidate
                } else {
                    best
                }
            })
    }
}

record! {
    pub struct PortUsed = "portused" {
        attributes {
            state: required PortState = "state",
            proto: required Protocol = "proto",
            port_id: required u16 = "portid",
        }
        children {}
    }
}

record! {
    pub struct OsMatch = "osmatch" {
        attributes {
            name: required String = "name",
            accuracy: required Accuracy = "accuracy",
            line: optional u32 = "line",
        }
        children {
            classes: many OsClass,
        }
    }
}

record! {
    pub struct OsClass = "osclass" {
        attributes {
            class_type: optional String = "type",
            vendor: optional String = "vendor",
            family: optional String = "osfamily",
            generation: optional String = "osgen",
            accuracy: optional Accuracy = "accuracy",
        }
        children {
            cpes: many Cpe,
        }
    }
}

record! {
    pub struct OsFingerprint = "osfingerprint" {
        attributes {
            fingerprint: required String = "fingerprint",
        }
        children {}
    }
}
