//! Per-host records.

use crate::schema::os::Os;
use crate::schema::port::Ports;
use crate::schema::scalar::{AddressType, HostState, HostnameType};
use crate::schema::script::ScriptGroup;
use crate::schema::timestamp::Timestamp;
use crate::schema::trace::Trace;

record! {
    /// Everything learned about one scanned host
    pub struct Host {
        attributes {
            start_time: optional Timestamp = "starttime",
            end_time: optional Timestamp = "endtime",
            comment: optional String = "comment",
        }
        children {
            status: one Status,
            /// Never empty
            addresses: some Address,
            hostnames: one Hostnames,
            ports: one Ports,
            os: one Os,
            uptime: one Uptime,
            distance: one Distance,
            tcp_sequence: one TcpSequence,
            ip_id_sequence: one IpIdSequence,
            tcp_ts_sequence: one TcpTsSequence,
            host_scripts: one ScriptGroup,
            trace: one Trace,
            times: one Times,
        }
    }
}

impl Host {
    /// First address of the host, normally its IP
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses.first().map(|address| address.addr.as_str())
    }
}

record! {
    /// A host announced during discovery, before it is scanned
    pub struct HostHint {
        attributes {}
        children {
            status: one Status,
            addresses: some Address,
            hostnames: one Hostnames,
        }
    }
}

record! {
    pub struct Status = "status" {
        attributes {
            state: required HostState = "state",
            reason: optional String = "reason",
            reason_ttl: optional u32 = "reason_ttl",
        }
        children {}
    }
}

record! {
    pub struct Address = "address" {
        attributes {
            addr: required String = "addr",
            addr_type: optional AddressType = "addrtype",
            /// Hardware vendor, MAC addresses only
            vendor: optional String = "vendor",
        }
        children {}
    }
}

record! {
    pub struct Hostnames = "hostnames" {
        attributes {}
        children {
            hostnames: many Hostname,
        }
    }
}

record! {
    pub struct Hostname = "hostname" {
        attributes {
            name: optional String = "name",
            name_type: optional HostnameType = "type",
        }
        children {}
    }
}

record! {
    pub struct Uptime = "uptime" {
        attributes {
            seconds: required u64 = "seconds",
            last_boot: optional String = "lastboot",
        }
        children {}
    }
}

record! {
    /// Network distance in hops
    pub struct Distance = "distance" {
        attributes {
            value: required u32 = "value",
        }
        children {}
    }
}

record! {
    pub struct TcpSequence = "tcpsequence" {
        attributes {
            index: required u32 = "index",
            difficulty: optional String = "difficulty",
            values: optional String = "values",
        }
        children {}
    }
}

record! {
    pub struct IpIdSequence = "ipidsequence" {
        attributes {
            class: optional String = "class",
            values: optional String = "values",
        }
        children {}
    }
}

record! {
    pub struct TcpTsSequence = "tcptssequence" {
        attributes {
            class: optional String = "class",
            values: optional String = "values",
        }
        children {}
    }
}

record! {
    /// Round-trip timing estimates in microseconds
    pub struct Times = "times" {
        attributes {
            srtt: optional i64 = "srtt",
            rttvar: optional i64 = "rttvar",
            timeout: optional i64 = "to",
        }
        children {}
    }
}
