use crate::schema::{HostState, Run, RunItem};
use crate::utils::config::DecodeOptions;
use std::fmt;
use std::path::PathBuf;

/// Arguments for the check command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Report to check
    pub input: PathBuf,

    /// Accept pretty-printed reports and skip unknown content
    pub lenient: bool,
}

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Report to read
    pub input: PathBuf,

    /// Destination file
    pub output: PathBuf,

    pub format: OutputFormat,

    /// Accept pretty-printed reports and skip unknown content
    pub lenient: bool,
}

/// Output format of the convert command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical XML
    #[default]
    Xml,
    /// JSON export of the decoded graph
    Json,
}

pub(crate) fn decode_options(lenient: bool) -> DecodeOptions {
    if lenient {
        DecodeOptions::lenient()
    } else {
        DecodeOptions::strict()
    }
}

/// Counts describing a decoded run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub hosts: usize,
    pub hosts_up: usize,
    pub ports: usize,
    pub open_ports: usize,
    pub tasks: usize,
    pub scripts: usize,
}

impl RunSummary {
    pub fn from_run(run: &Run) -> Self {
        let mut summary = Self::default();

        for item in &run.items {
            match item {
                RunItem::Host(host) => {
                    summary.hosts += 1;
                    if host
                        .status
                        .as_ref()
                        .is_some_and(|status| status.state == HostState::Up)
                    {
                        summary.hosts_up += 1;
                    }
                    if let Some(ports) = &host.ports {
                        summary.ports += ports.ports.len();
                        summary.open_ports += ports.ports.iter().filter(|p| p.is_open()).count();
                        summary.scripts += ports.ports.iter().map(|p| p.scripts.len()).sum::<usize>();
                    }
                    if let Some(group) = &host.host_scripts {
                        summary.scripts += group.scripts.len();
                    }
                }
                RunItem::TaskEnd(_) => summary.tasks += 1,
                RunItem::PreScript(group) | RunItem::PostScript(group) => {
                    summary.scripts += group.scripts.len();
                }
                _ => {}
            }
        }

        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Hosts: {} ({} up)", self.hosts, self.hosts_up)?;
        writeln!(f, "  Ports: {} ({} open)", self.ports, self.open_ports)?;
        writeln!(f, "  Completed tasks: {}", self.tasks)?;
        write!(f, "  Scripts: {}", self.scripts)
    }
}
