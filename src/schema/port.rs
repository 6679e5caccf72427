//! Port table records.

use crate::schema::scalar::{PortState, Protocol, ServiceMethod};
use crate::schema::script::Script;

record! {
    pub struct Ports = "ports" {
        attributes {}
        children {
            /// Summaries of ports not listed individually
            extra_ports: many ExtraPorts,
            ports: many Port,
        }
    }
}

impl Ports {
    /// Look up a port by number and protocol
    pub fn find(&self, port_id: u16, protocol: Protocol) -> Option<&Port> {
        self.ports
            .iter()
            .find(|port| port.port_id == port_id && port.protocol == protocol)
    }
}

record! {
    pub struct ExtraPorts = "extraports" {
        attributes {
            state: required PortState = "state",
            count: required u32 = "count",
        }
        children {
            reasons: many ExtraReasons,
        }
    }
}

record! {
    pub struct ExtraReasons = "extrareasons" {
        attributes {
            reason: required String = "reason",
            count: required u32 = "count",
            proto: optional String = "proto",
            ports: optional String = "ports",
        }
        children {}
    }
}

record! {
    pub struct Port = "port" {
        attributes {
            protocol: required Protocol = "protocol",
            port_id: required u16 = "portid",
        }
        children {
            state: one State,
            owner: one Owner,
            service: one Service,
            scripts: many Script,
        }
    }
}

impl Port {
    pub fn is_open(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.state == PortState::Open)
    }
}

record! {
    pub struct State = "state" {
        attributes {
            state: required PortState = "state",
            reason: optional String = "reason",
            reason_ttl: optional u32 = "reason_ttl",
            reason_ip: optional String = "reason_ip",
        }
        children {}
    }
}

record! {
    /// Process owner reported by ident
    pub struct Owner = "owner" {
        attributes {
            name: required String = "name",
        }
        children {}
    }
}

record! {
    /// Service detection result
    pub struct Service = "service" {
        attributes {
            name: optional String = "name",
            product: optional String = "product",
            version: optional String = "version",
            extra_info: optional String = "extrainfo",
            hostname: optional String = "hostname",
            os_type: optional String = "ostype",
            device_type: optional String = "devicetype",
            service_fp: optional String = "servicefp",
            tunnel: optional String = "tunnel",
            method: optional ServiceMethod = "method",
            /// Detection confidence, 0 to 10
            confidence: optional u8 = "conf",
            rpc_num: optional String = "rpcnum",
            low_ver: optional String = "lowver",
            high_ver: optional String = "highver",
            proto: optional String = "proto",
        }
        children {
            cpes: many Cpe,
        }
    }
}

record! {
    /// A Common Platform Enumeration name, e.g. `cpe:/a:apache:http_server:2.4.41`
    pub struct Cpe = "cpe" {
        attributes {}
        children {
            value: text String,
        }
    }
}
