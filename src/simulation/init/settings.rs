use std::sync::Arc;

use crate::domain::config::SimConfig;
use crate::domain::fields::FieldCatalog;

use super::SimulatorCore;

pub(super) fn set_config(core: &mut SimulatorCore, config: SimConfig) {
    core.config = config;
}

pub(super) fn set_ignore_ttl(core: &mut SimulatorCore, ignore: bool) {
    core.config.ignore_ttl = ignore;
}

pub(super) fn load_field_bundle_json(core: &mut SimulatorCore, json: &str) -> Result<(), String> {
    let catalog = FieldCatalog::from_bundle_json(json)?;
    core.fields = Arc::new(catalog);
    Ok(())
}
