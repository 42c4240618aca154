use crate::args::Command;
use anyhow::Context;
use pgate_kernel::domain::config::AppConfig;
use pgate_resolver::{Catalog, ConfigPlatform, FeatureResolver, ProfileGroup, ProfileId, resolve_flag};
use std::fmt::Write;
use tracing::debug;

/// Runs `command` against the platform section of `cfg` and returns the text to print.
///
/// # Errors
/// Returns an error if the output cannot be serialized.
pub fn execute(command: &Command, cfg: &AppConfig) -> anyhow::Result<String> {
    let platform = ConfigPlatform::from(&cfg.platform);
    debug!(package = platform.package(), "Platform stores loaded");

    match command {
        Command::Resolve { remove, supplemental_bits, json } => {
            resolve(&platform, remove, supplemental_bits, *json)
        },
        Command::Catalog {} => Ok(catalog(&Catalog::builtin())),
        Command::Flag { name, default } => {
            let value = resolve_flag(&platform.context(), name, *default);
            Ok(format!("{name} = {value}"))
        },
        Command::Group { group } => Ok(group_members(*group)),
    }
}

fn resolve(
    platform: &ConfigPlatform,
    remove: &[ProfileId],
    supplemental_bits: &[u32],
    json: bool,
) -> anyhow::Result<String> {
    let resolver = FeatureResolver::default();
    resolver.resolve(Some(&platform.context()));
    resolver.remove_entries(remove.iter().copied());
    for &bit in supplemental_bits {
        resolver.add_supplemental_bit(bit);
    }

    let snapshot = resolver.snapshot();
    if json {
        return serde_json::to_string_pretty(&snapshot).context("Failed to serialize resolution");
    }

    let enabled: Vec<&str> = snapshot.enabled.iter().map(|id| id.as_ref()).collect();
    Ok(format!(
        "enabled: {}\nmask: {:#x}\nsupplemental: {:#x}\ngd_up_to_scanning_layer: {}",
        enabled.join(", "),
        snapshot.mask.bits(),
        snapshot.supplemental.bits(),
        snapshot.gd_up_to_scanning_layer,
    ))
}

fn catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for entry in catalog {
        let bit = entry.bit.lowest_index().map_or_else(|| "-".to_owned(), |i| i.to_string());
        let flag = entry.flag.map_or_else(|| "-".to_owned(), |f| f.to_string());
        let _ = writeln!(out, "{:<28} {bit:>2}  {}  {flag}", entry.id.as_ref(), entry.default);
    }
    out.truncate(out.trim_end().len());
    out
}

fn group_members(group: ProfileGroup) -> String {
    let mut members: Vec<ProfileId> =
        FeatureResolver::default().group_members(group).into_iter().collect();
    members.sort_unstable();
    members.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join("\n")
}
