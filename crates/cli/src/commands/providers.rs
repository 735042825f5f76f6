use anyhow::Result;
use issue_bridge_core::config::BridgeConfig;
use issue_bridge_core::services::provider::{IssueProvider, ProviderInfo};
use issue_bridge_core::services::registry::provider_registry_from_config;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProviderEntry {
    #[serde(flatten)]
    pub info: ProviderInfo,
    pub fixed_issues: bool,
}

/// Providers enabled by `config`, sorted by origin.
pub fn provider_entries(config: &BridgeConfig) -> Result<Vec<ProviderEntry>> {
    let registry = provider_registry_from_config(config)?;
    let entries = registry
        .origins()
        .into_iter()
        .filter_map(|origin| registry.get(&origin))
        .map(|provider| ProviderEntry {
            info: provider.info().clone(),
            fixed_issues: provider.can_provide_fixed_issues(),
        })
        .collect();
    Ok(entries)
}

/// List issue providers known to this binary.
pub fn list_providers_command(config: &BridgeConfig, json: bool) -> Result<()> {
    let entries = provider_entries(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Providers: (none)");
        return Ok(());
    }

    println!("Providers:");
    for entry in entries {
        let info = &entry.info;
        println!("- {}: {}", info.origin, info.origin_plugin_name);
        println!(
            "    project page: {}, build page: {}, fixed issues: {}",
            info.project_result_url_name.as_deref().unwrap_or("-"),
            info.build_result_url_name.as_deref().unwrap_or("-"),
            if entry.fixed_issues { "yes" } else { "no" }
        );
    }

    Ok(())
}
