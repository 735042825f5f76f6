use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use issue_bridge_core::config::BridgeConfig;
use issue_bridge_core::host::{load_execution_snapshot, Execution, Generation};
use issue_bridge_core::model::{Issue, PrioritySummary};
use issue_bridge_core::services::provider::IssueProvider;
use issue_bridge_core::services::registry::{provider_registry_from_config, ProviderRegistry};
use serde::Serialize;

/// Header describing the execution a report was computed for.
#[derive(Debug, Serialize)]
pub struct ExecutionHeader {
    pub execution: String,
    pub generation: Generation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl ExecutionHeader {
    fn of(execution: &dyn Execution) -> Self {
        Self {
            execution: execution.id().to_string(),
            generation: execution.generation(),
            started_at: execution.started_at(),
        }
    }

    fn print(&self) {
        match self.started_at {
            Some(ts) => println!(
                "Execution: {} ({}, started {})",
                self.execution,
                self.generation,
                ts.to_rfc3339()
            ),
            None => println!("Execution: {} ({})", self.execution, self.generation),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OriginIssues {
    pub origin: String,
    pub origin_plugin_name: String,
    pub summary: PrioritySummary,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Serialize)]
pub struct IssueReport {
    #[serde(flatten)]
    pub header: ExecutionHeader,
    pub origins: Vec<OriginIssues>,
}

#[derive(Debug, Serialize)]
pub struct OriginFixedIssues {
    pub origin: String,
    pub supported: bool,
    /// `None` when the provider cannot compute fixed issues.
    pub fixed_issues: Option<Vec<Issue>>,
}

#[derive(Debug, Serialize)]
pub struct FixedIssueReport {
    #[serde(flatten)]
    pub header: ExecutionHeader,
    pub origins: Vec<OriginFixedIssues>,
}

/// Pick the origins a command should report on.
///
/// An explicit origin must be registered and enabled. Without one, the
/// configured default origin is used, or every registered origin.
pub fn select_origins(
    registry: &ProviderRegistry,
    config: &BridgeConfig,
    origin: Option<&str>,
) -> Result<Vec<String>> {
    let requested = origin.or(config.default_origin.as_deref());
    match requested {
        Some(o) if !config.is_enabled(o) => {
            Err(anyhow!("Origin '{}' is disabled by configuration", o))
        }
        Some(o) if registry.get(o).is_none() => Err(anyhow!(
            "Unknown origin '{}'. Known origins: {}",
            o,
            registry.origins().join(", ")
        )),
        Some(o) => Ok(vec![o.to_string()]),
        None => Ok(registry.origins()),
    }
}

fn lookup<'r>(registry: &'r ProviderRegistry, origin: &str) -> Result<&'r dyn IssueProvider> {
    registry
        .get(origin)
        .ok_or_else(|| anyhow!("Issue provider '{}' disappeared from the registry", origin))
}

fn load_execution(path: &Path) -> Result<Box<dyn Execution>> {
    let snapshot = load_execution_snapshot(path)?;
    let execution = snapshot
        .into_execution()
        .with_context(|| format!("Invalid execution snapshot at {}", path.display()))?;
    Ok(execution)
}

/// Existing issues of the execution stored at `path`, per selected origin.
///
/// With no explicit or configured origin, every enabled provider reports.
pub fn collect_issue_report(
    path: &Path,
    origin: Option<&str>,
    config: &BridgeConfig,
) -> Result<IssueReport> {
    let execution = load_execution(path)?;
    let registry = provider_registry_from_config(config)?;
    let selected = select_origins(&registry, config, origin)?;
    let by_origin = if origin.or(config.default_origin.as_deref()).is_none() {
        registry.existing_issues_by_origin(execution.as_ref())?
    } else {
        let mut by_origin = BTreeMap::new();
        for origin in selected {
            let issues = lookup(&registry, &origin)?.existing_issues(execution.as_ref())?;
            by_origin.insert(origin, issues);
        }
        by_origin
    };

    let mut origins = Vec::with_capacity(by_origin.len());
    for (origin, issues) in by_origin {
        let provider = lookup(&registry, &origin)?;
        origins.push(OriginIssues {
            origin_plugin_name: provider.origin_plugin_name().to_string(),
            summary: PrioritySummary::from_issues(&issues),
            origin,
            issues,
        });
    }
    Ok(IssueReport { header: ExecutionHeader::of(execution.as_ref()), origins })
}

/// Fixed issues of the execution stored at `path`, per selected origin.
pub fn collect_fixed_issue_report(
    path: &Path,
    origin: Option<&str>,
    config: &BridgeConfig,
) -> Result<FixedIssueReport> {
    let execution = load_execution(path)?;
    let registry = provider_registry_from_config(config)?;
    let mut origins = Vec::new();
    for origin in select_origins(&registry, config, origin)? {
        let provider = lookup(&registry, &origin)?;
        origins.push(OriginFixedIssues {
            origin,
            supported: provider.can_provide_fixed_issues(),
            fixed_issues: provider.fixed_issues(execution.as_ref())?,
        });
    }
    Ok(FixedIssueReport { header: ExecutionHeader::of(execution.as_ref()), origins })
}

/// Print existing issues for an execution snapshot.
pub fn issues_command(
    path: &Path,
    origin: Option<&str>,
    config: &BridgeConfig,
    json: bool,
) -> Result<()> {
    let report = collect_issue_report(path, origin, config)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize issues to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    report.header.print();
    for entry in &report.origins {
        let s = entry.summary;
        println!(
            "{} ({}): {} issue(s) [high: {}, normal: {}, low: {}]",
            entry.origin,
            entry.origin_plugin_name,
            s.total(),
            s.high,
            s.normal,
            s.low
        );
        for issue in &entry.issues {
            println!("  - [{}] {} {}", issue.priority, issue.context_hash, issue.message);
        }
    }

    Ok(())
}

/// Print fixed issues for an execution snapshot, or say the provider cannot compute them.
pub fn fixed_issues_command(
    path: &Path,
    origin: Option<&str>,
    config: &BridgeConfig,
    json: bool,
) -> Result<()> {
    let report = collect_fixed_issue_report(path, origin, config)?;

    if json {
        let serialized = serde_json::to_string_pretty(&report)
            .context("Failed to serialize fixed issues to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    report.header.print();
    for entry in &report.origins {
        match &entry.fixed_issues {
            None => println!("{}: fixed issues not supported", entry.origin),
            Some(fixed) => {
                println!("{}: {} fixed issue(s)", entry.origin, fixed.len());
                for issue in fixed {
                    println!("  - [{}] {} {}", issue.priority, issue.context_hash, issue.message);
                }
            }
        }
    }

    Ok(())
}
