//! The root record and run-level events.

use crate::output::XmlWriter;
use crate::parser::{decode_record, Node};
use crate::schema::host::{Host, HostHint};
use crate::schema::scalar::{Decimal, Protocol, ScanType};
use crate::schema::script::ScriptGroup;
use crate::schema::timestamp::{Timestamp, ZonedTimestamp};
use crate::schema::{Child, Record};
use crate::utils::config::DecodeOptions;
use crate::utils::error::DecodeError;
use serde::Serialize;

record! {
    /// One completed scan invocation
    pub struct Run {
        attributes {
            /// Scanner name, normally `nmap`
            scanner: optional String = "scanner",
            /// Full command line
            args: optional String = "args",
            /// Scan start, with its `startstr` twin
            start: zoned ZonedTimestamp = "start" / "startstr",
            version: optional String = "version",
            profile_name: optional String = "profile_name",
            xml_output_version: optional String = "xmloutputversion",
        }
        children {
            scan_info: many ScanInfo,
            verbose: one Verbose,
            debugging: one Debugging,
            /// Hosts and lifecycle events in document order
            items: many RunItem,
            stats: one Stats,
        }
        extra {
            /// Markup before the root element, kept verbatim
            prolog: String,
            /// Markup after the root element, kept verbatim
            epilog: String,
        }
    }
}

impl Run {
    pub fn hosts(&self) -> impl Iterator<Item = &Host> + '_ {
        self.items.iter().filter_map(|item| match item {
            RunItem::Host(host) => Some(host),
            _ => None,
        })
    }

    pub fn hosts_mut(&mut self) -> impl Iterator<Item = &mut Host> + '_ {
        self.items.iter_mut().filter_map(|item| match item {
            RunItem::Host(host) => Some(host),
            _ => None,
        })
    }

    pub fn task_begins(&self) -> impl Iterator<Item = &Task> + '_ {
        self.items.iter().filter_map(|item| match item {
            RunItem::TaskBegin(task) => Some(task),
            _ => None,
        })
    }

    pub fn task_progress(&self) -> impl Iterator<Item = &TaskProgress> + '_ {
        self.items.iter().filter_map(|item| match item {
            RunItem::TaskProgress(progress) => Some(progress),
            _ => None,
        })
    }

    pub fn task_ends(&self) -> impl Iterator<Item = &Task> + '_ {
        self.items.iter().filter_map(|item| match item {
            RunItem::TaskEnd(task) => Some(task),
            _ => None,
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> + '_ {
        self.items.iter().filter_map(|item| match item {
            RunItem::Target(target) => Some(target),
            _ => None,
        })
    }
}

/// A child of `<nmaprun>` whose position among its siblings matters
///
/// Hosts and task events interleave in the order the scan produced them,
/// so they share one ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunItem {
    Target(Target),
    TaskBegin(Task),
    TaskProgress(TaskProgress),
    TaskEnd(Task),
    HostHint(HostHint),
    PreScript(ScriptGroup),
    PostScript(ScriptGroup),
    Host(Host),
    Output(Output),
}

impl RunItem {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Target(_) => "target",
            Self::TaskBegin(_) => "taskbegin",
            Self::TaskProgress(_) => "taskprogress",
            Self::TaskEnd(_) => "taskend",
            Self::HostHint(_) => "hosthint",
            Self::PreScript(_) => "prescript",
            Self::PostScript(_) => "postscript",
            Self::Host(_) => "host",
            Self::Output(_) => "output",
        }
    }
}

impl Child for RunItem {
    fn accepts(tag: &str) -> bool {
        matches!(
            tag,
            "target"
                | "taskbegin"
                | "taskprogress"
                | "taskend"
                | "hosthint"
                | "prescript"
                | "postscript"
                | "host"
                | "output"
        )
    }

    fn decode(node: &Node, path: String, options: &DecodeOptions) -> Result<Self, DecodeError> {
        let item = match node.name.as_str() {
            "target" => Self::Target(decode_record(node, path, options)?),
            "taskbegin" => Self::TaskBegin(decode_record(node, path, options)?),
            "taskprogress" => Self::TaskProgress(decode_record(node, path, options)?),
            "taskend" => Self::TaskEnd(decode_record(node, path, options)?),
            "hosthint" => Self::HostHint(decode_record(node, path, options)?),
            "prescript" => Self::PreScript(decode_record(node, path, options)?),
            "postscript" => Self::PostScript(decode_record(node, path, options)?),
            "host" => Self::Host(decode_record(node, path, options)?),
            "output" => Self::Output(decode_record(node, path, options)?),
            other => {
                return Err(DecodeError::Schema {
                    path,
                    message: format!("<{}> is not a run item", other),
                })
            }
        };
        Ok(item)
    }

    fn encode(&self, writer: &mut XmlWriter) {
        writer.open(self.tag());
        match self {
            Self::Target(target) => target.encode_body(writer),
            Self::TaskBegin(task) | Self::TaskEnd(task) => task.encode_body(writer),
            Self::TaskProgress(progress) => progress.encode_body(writer),
            Self::HostHint(hint) => hint.encode_body(writer),
            Self::PreScript(group) | Self::PostScript(group) => group.encode_body(writer),
            Self::Host(host) => host.encode_body(writer),
            Self::Output(output) => output.encode_body(writer),
        }
        writer.close();
    }
}

record! {
    /// Scan configuration: scan type, protocol and the ports considered
    pub struct ScanInfo = "scaninfo" {
        attributes {
            scan_type: optional ScanType = "type",
            scan_flags: optional String = "scanflags",
            protocol: optional Protocol = "protocol",
            num_services: optional u32 = "numservices",
            /// Port ranges, e.g. `1-1027,1029-1033`
            services: optional String = "services",
        }
        children {}
    }
}

record! {
    pub struct Verbose = "verbose" {
        attributes {
            level: optional i32 = "level",
        }
        children {}
    }
}

record! {
    pub struct Debugging = "debugging" {
        attributes {
            level: optional i32 = "level",
        }
        children {}
    }
}

record! {
    /// A target specification from the command line
    pub struct Target {
        attributes {
            specification: required String = "specification",
            status: optional String = "status",
            reason: optional String = "reason",
        }
        children {}
    }
}

record! {
    /// A scan phase starting (`<taskbegin>`) or ending (`<taskend>`)
    pub struct Task {
        attributes {
            task: required String = "task",
            time: optional Timestamp = "time",
            /// Free-form summary, end events only
            extra_info: optional String = "extrainfo",
        }
        children {}
    }
}

record! {
    /// A progress sample of a running scan phase
    pub struct TaskProgress {
        attributes {
            task: required String = "task",
            time: optional Timestamp = "time",
            percent: optional Decimal = "percent",
            /// Estimated seconds left
            remaining: optional u64 = "remaining",
            /// Estimated completion time
            etc: optional Timestamp = "etc",
        }
        children {}
    }
}

record! {
    /// Interactive output captured into the report
    pub struct Output {
        attributes {
            output_type: optional String = "type",
        }
        children {
            text: text String,
        }
    }
}

record! {
    /// Final statistics, `<runstats>`
    pub struct Stats = "runstats" {
        attributes {}
        children {
            finished: one Finished,
            hosts: one HostStats,
        }
    }
}

record! {
    pub struct Finished = "finished" {
        attributes {
            /// Scan end, with its `timestr` twin
            time: zoned ZonedTimestamp = "time" / "timestr",
            summary: optional String = "summary",
            /// Elapsed seconds
            elapsed: optional Decimal = "elapsed",
            exit: optional String = "exit",
            error_msg: optional String = "errormsg",
        }
        children {}
    }
}

record! {
    pub struct HostStats = "hosts" {
        attributes {
            up: optional u32 = "up",
            down: optional u32 = "down",
            total: optional u32 = "total",
        }
        children {}
    }
}
