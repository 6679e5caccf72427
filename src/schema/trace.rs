//! Traceroute records.

use crate::schema::scalar::{Decimal, Protocol};

record! {
    /// Route to the host; hops keep document order, which need not follow TTL
    pub struct Trace = "trace" {
        attributes {
            port: optional u16 = "port",
            proto: optional Protocol = "proto",
        }
        children {
            hops: many Hop,
        }
    }
}

record! {
    pub struct Hop = "hop" {
        attributes {
            ttl: required u32 = "ttl",
            ip_addr: optional String = "ipaddr",
            /// Round-trip time in milliseconds
            rtt: optional Decimal = "rtt",
            host: optional String = "host",
        }
        children {}
    }
}
