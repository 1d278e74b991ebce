use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One exported symbol of one virtual module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExportRecord {
    /// Declared and defined inside the module.
    NamedExport { name: String },
    /// The module's default export, naming the locally bound identifier.
    DefaultExport { name: String },
    /// Re-exported from another module path. `alias` is only set when the
    /// imported name differs from the locally visible one.
    ReExport {
        name: String,
        from: String,
        #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(rename = "linkId", default, skip_serializing_if = "Option::is_none")]
        link_id: Option<u32>,
    },
    /// Live binding imported through an accessor. Its value can change after
    /// import time, so consumers keep it out of further bundling.
    GlobalBinding {
        name: String,
        from: String,
        #[serde(rename = "linkId", default, skip_serializing_if = "Option::is_none")]
        link_id: Option<u32>,
    },
}

impl ExportRecord {
    pub fn name(&self) -> &str {
        match self {
            ExportRecord::NamedExport { name }
            | ExportRecord::DefaultExport { name }
            | ExportRecord::ReExport { name, .. }
            | ExportRecord::GlobalBinding { name, .. } => name,
        }
    }

    pub fn is_global_binding(&self) -> bool {
        matches!(self, ExportRecord::GlobalBinding { .. })
    }
}

/// Virtual module path (relative to the package root) to its exports, in
/// source order.
pub type ModuleList = IndexMap<String, Vec<ExportRecord>>;

/// Package name to the symbols it exports outside the module system.
pub type PackageScopeExports = IndexMap<String, IndexSet<String>>;

/// Virtual directory every package's modules are installed under.
pub const PACKAGE_ROOT_PREFIX: &str = "/node_modules/meteor/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub name: String,
    pub modules: ModuleList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_module_path: Option<String>,
    pub package_scope_exports: PackageScopeExports,
}

impl PackageMetadata {
    /// The `modules` key of the main module, if the package declares one that
    /// lives under its own virtual root.
    pub fn main_module_key(&self) -> Option<&str> {
        let main = self.main_module_path.as_deref()?;
        let rest = main.strip_prefix(PACKAGE_ROOT_PREFIX)?;
        let key = rest.strip_prefix(self.name.as_str())?.strip_prefix('/')?;
        (!key.is_empty()).then_some(key)
    }

    pub fn global_bindings(&self) -> impl Iterator<Item = (&str, &ExportRecord)> {
        self.modules.iter().flat_map(|(path, records)| {
            records
                .iter()
                .filter(|record| record.is_global_binding())
                .map(move |record| (path.as_str(), record))
        })
    }
}
