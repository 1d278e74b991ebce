use std::path::Path;

use oxc_ast::ast::{CallExpression, VariableDeclarator};
use oxc_ast_visit::{Visit, walk};

use crate::error::ExtractError;
use crate::model::{ModuleList, PackageMetadata, PackageScopeExports};

use super::Convention;
use super::ast_utils::Defect;
use super::installer::{InstalledPackage, recognize_installer};
use super::main_module::recognize_main_module;
use super::package_scope::{PackageDefinition, recognize_package_define};

/// Partial result of one recognizer for one node.
#[derive(Debug)]
pub(crate) enum Partial {
    Installed(InstalledPackage),
    Defined(PackageDefinition),
    MainModule(String),
}

type CallRecognizer = fn(&CallExpression<'_>, &Convention) -> Result<Option<Partial>, Defect>;

/// Tried in order; the first match claims the node.
const CALL_RECOGNIZERS: [CallRecognizer; 2] = [installer_partial, package_define_partial];

fn installer_partial(
    call: &CallExpression<'_>,
    convention: &Convention,
) -> Result<Option<Partial>, Defect> {
    recognize_installer(call, convention).map(|found| found.map(Partial::Installed))
}

fn package_define_partial(
    call: &CallExpression<'_>,
    convention: &Convention,
) -> Result<Option<Partial>, Defect> {
    recognize_package_define(call, convention).map(|found| found.map(Partial::Defined))
}

#[derive(Debug, Default)]
pub(crate) struct MetadataBuilder {
    name: Option<String>,
    modules: ModuleList,
    main_module_path: Option<String>,
    package_scope_exports: PackageScopeExports,
}

impl MetadataBuilder {
    pub(crate) fn merge(&mut self, partial: Partial) -> Result<(), Defect> {
        match partial {
            Partial::Installed(package) => {
                self.name = Some(package.name);
                for (path, records) in package.modules {
                    if self.modules.contains_key(&path) {
                        return Err(Defect::DuplicateModulePath(path));
                    }
                    self.modules.insert(path, records);
                }
            }
            Partial::Defined(definition) => {
                if let Some(exports) = definition.exports {
                    self.package_scope_exports
                        .insert(definition.name.clone(), exports);
                }
                self.name = Some(definition.name);
            }
            Partial::MainModule(path) => self.main_module_path = Some(path),
        }
        Ok(())
    }

    pub(crate) fn finish(self, bundle_path: &Path) -> Result<PackageMetadata, ExtractError> {
        let Some(name) = self.name.filter(|name| !name.is_empty()) else {
            return Err(ExtractError::MissingName {
                path: bundle_path.to_path_buf(),
            });
        };
        if self.modules.is_empty() && self.package_scope_exports.is_empty() {
            return Err(ExtractError::Empty {
                path: bundle_path.to_path_buf(),
            });
        }
        Ok(PackageMetadata {
            name,
            modules: self.modules,
            main_module_path: self.main_module_path,
            package_scope_exports: self.package_scope_exports,
        })
    }
}

/// Runs the recognizers over every visited node and folds their results into
/// one builder. Stops recording at the first defect.
pub(crate) struct BundleCollector<'c> {
    convention: &'c Convention,
    builder: MetadataBuilder,
    defect: Option<Defect>,
}

impl<'c> BundleCollector<'c> {
    pub(crate) fn new(convention: &'c Convention) -> Self {
        Self {
            convention,
            builder: MetadataBuilder::default(),
            defect: None,
        }
    }

    pub(crate) fn into_result(self) -> Result<MetadataBuilder, Defect> {
        match self.defect {
            Some(defect) => Err(defect),
            None => Ok(self.builder),
        }
    }

    fn accept(&mut self, partial: Partial) {
        if let Err(defect) = self.builder.merge(partial) {
            self.defect = Some(defect);
        }
    }

    fn recognize_call(&self, call: &CallExpression<'_>) -> Result<Option<Partial>, Defect> {
        for recognize in CALL_RECOGNIZERS {
            if let Some(partial) = recognize(call, self.convention)? {
                return Ok(Some(partial));
            }
        }
        Ok(None)
    }
}

impl<'a> Visit<'a> for BundleCollector<'_> {
    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.defect.is_some() {
            return;
        }
        match self.recognize_call(it) {
            Ok(Some(partial)) => {
                // The installer argument is fully consumed; module bodies are
                // not revisited by the other recognizers.
                let consumed = matches!(partial, Partial::Installed(_));
                self.accept(partial);
                if consumed {
                    return;
                }
            }
            Ok(None) => {}
            Err(defect) => {
                self.defect = Some(defect);
                return;
            }
        }
        walk::walk_call_expression(self, it);
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if self.defect.is_some() {
            return;
        }
        if let Some(path) = recognize_main_module(it) {
            self.accept(Partial::MainModule(path));
        }
        walk::walk_variable_declarator(self, it);
    }
}
