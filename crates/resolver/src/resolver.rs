use crate::catalog::{Catalog, DefaultSource, FeatureEntry, OverridePolicy, RESOURCE_GD_SCANNING};
use crate::flags::{parse_property_bool, resolve_flag};
use crate::sources::ResolverContext;
use fxhash::FxHashSet;
use parking_lot::RwLock;
use pgate_domain::{ProfileGroup, ProfileId, ProfileMask};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ResolvedState {
    enabled: Vec<ProfileId>,
    supplemental: ProfileMask,
    gd_up_to_scanning_layer: bool,
}

/// Point-in-time view of the resolver state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub enabled: Vec<ProfileId>,
    pub mask: ProfileMask,
    pub supplemental: ProfileMask,
    pub gd_up_to_scanning_layer: bool,
}

/// Decides which catalog profiles are enabled and keeps the result.
///
/// The state starts empty. [`FeatureResolver::resolve`] recomputes it from scratch,
/// [`FeatureResolver::remove_entries`] and [`FeatureResolver::add_supplemental_bit`]
/// adjust it afterwards. All methods take `&self`; the state sits behind a lock so
/// the resolver can be shared across threads once built.
#[derive(Debug, Default)]
pub struct FeatureResolver {
    catalog: Catalog,
    state: RwLock<ResolvedState>,
}

impl FeatureResolver {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, state: RwLock::default() }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Runs a resolution pass and replaces the enabled set.
    ///
    /// For each catalog entry, in order:
    /// 1. the base value comes from its resource or property default;
    /// 2. its feature flag, if any, is applied according to its [`OverridePolicy`];
    /// 3. presence in the component override list forces it on;
    /// 4. a set bit in the disabled mask vetoes it regardless of the above.
    ///
    /// Without a context, or without a resource accessor, nothing changes.
    #[instrument(skip_all, fields(catalog = self.catalog.len()))]
    pub fn resolve(&self, ctx: Option<&ResolverContext<'_>>) {
        let Some(ctx) = ctx.filter(|c| c.has_resources()) else {
            warn!("Resources unavailable, keeping the current profile set");
            return;
        };

        let forced = forced_profiles(ctx);
        let disabled = ctx.disabled_mask();

        let mut enabled = Vec::with_capacity(self.catalog.len());
        for entry in &self.catalog {
            let mut supported = base_support(ctx, entry);

            if let Some(flag) = entry.flag {
                match flag.policy {
                    OverridePolicy::Replace => {
                        supported = resolve_flag(ctx, flag.name, supported);
                    },
                    OverridePolicy::UpgradeOnly => {
                        if !supported && resolve_flag(ctx, flag.name, false) {
                            info!(profile = %entry.id, flag = flag.name, "Feature flag enables support");
                            supported = true;
                        }
                    },
                }
            }

            if forced.as_ref().is_some_and(|ids| ids.contains(&entry.id)) {
                info!(profile = %entry.id, "Enabled by components configuration");
                supported = true;
            }

            if !supported {
                continue;
            }

            if disabled.intersects(entry.bit) {
                debug!(profile = %entry.id, "Disabled by profile mask");
                continue;
            }

            info!(profile = %entry.id, "Adding profile");
            enabled.push(entry.id);
        }

        let gd_up_to_scanning_layer = ctx.resource(RESOURCE_GD_SCANNING).unwrap_or(false);

        let mut state = self.state.write();
        state.enabled = enabled;
        state.gd_up_to_scanning_layer = gd_up_to_scanning_layer;
    }

    /// Enabled profiles in catalog order.
    #[must_use]
    pub fn enabled_set(&self) -> Vec<ProfileId> {
        self.state.read().enabled.clone()
    }

    #[must_use]
    pub fn is_enabled(&self, id: ProfileId) -> bool {
        self.state.read().enabled.contains(&id)
    }

    /// Bits of every enabled profile combined with the supplemental mask.
    ///
    /// An enabled id that is missing from the catalog contributes nothing and is logged.
    #[must_use]
    pub fn compute_bitmask(&self) -> ProfileMask {
        self.mask_of_state(&self.state.read())
    }

    fn mask_of_state(&self, state: &ResolvedState) -> ProfileMask {
        state.enabled.iter().fold(state.supplemental, |mask, &id| match self.catalog.mask_of(id) {
            Some(bit) => mask | bit,
            None => {
                warn!(profile = %id, "Could not find profile bit mask");
                mask
            },
        })
    }

    #[must_use]
    pub fn supplemental_mask(&self) -> ProfileMask {
        self.state.read().supplemental
    }

    /// Static membership of `group`, independent of what is enabled.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn group_members(&self, group: ProfileGroup) -> FxHashSet<ProfileId> {
        group.members().iter().copied().collect()
    }

    /// Retracts profiles that turned out to be non-functional after resolution.
    ///
    /// Survivors keep their relative order.
    pub fn remove_entries<I>(&self, ids: I)
    where
        I: IntoIterator<Item = ProfileId>,
    {
        let ids: FxHashSet<ProfileId> = ids.into_iter().collect();
        if ids.is_empty() {
            return;
        }

        self.state.write().enabled.retain(|id| {
            let remove = ids.contains(id);
            if remove {
                info!(profile = %id, "Removed from supported list");
            }
            !remove
        });
    }

    /// Records a capability enabled outside the catalog by setting bit `index`.
    ///
    /// Positions that do not fit the 64-bit mask are ignored.
    pub fn add_supplemental_bit(&self, index: u32) {
        let Some(bit) = ProfileMask::from_index(index) else {
            warn!(index, "Supplemental bit index out of range");
            return;
        };
        self.state.write().supplemental |= bit;
    }

    #[must_use]
    pub fn gd_enabled_up_to_scanning_layer(&self) -> bool {
        self.state.read().gd_up_to_scanning_layer
    }

    #[must_use]
    pub fn snapshot(&self) -> Resolution {
        let state = self.state.read();
        Resolution {
            enabled: state.enabled.clone(),
            mask: self.mask_of_state(&state),
            supplemental: state.supplemental,
            gd_up_to_scanning_layer: state.gd_up_to_scanning_layer,
        }
    }
}

fn base_support(ctx: &ResolverContext<'_>, entry: &FeatureEntry) -> bool {
    match entry.default {
        DefaultSource::Resource(key) => ctx.resource(key).unwrap_or_else(|| {
            debug!(profile = %entry.id, resource = key, "Resource missing, treating as unsupported");
            false
        }),
        DefaultSource::Property(name) => {
            ctx.property(name).and_then(|value| parse_property_bool(&value)).unwrap_or(false)
        },
    }
}

fn forced_profiles(ctx: &ResolverContext<'_>) -> Option<FxHashSet<ProfileId>> {
    let names = ctx.enabled_components()?;
    Some(
        names
            .iter()
            .filter_map(|name| {
                ProfileId::from_str(name)
                    .inspect_err(|_| debug!(component = %name, "Ignoring unknown component override"))
                    .ok()
            })
            .collect(),
    )
}
