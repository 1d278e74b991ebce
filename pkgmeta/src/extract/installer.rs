use oxc_ast::ast::{CallExpression, Expression, ObjectExpression};

use crate::model::ModuleList;

use super::Convention;
use super::ast_utils::{
    Defect, argument_expr, defect, function_statements, plain_property, property_key_name,
    unparen,
};
use super::exports::recognize_statement;

/// Fixed directories between the installer root and the package directory.
const PACKAGE_ROOT_SEGMENTS: [&str; 2] = ["node_modules", "meteor"];

#[derive(Debug)]
pub(crate) struct InstalledPackage {
    pub(crate) name: String,
    pub(crate) modules: ModuleList,
}

/// `meteorInstall({ node_modules: { meteor: { "<name>": { ...tree } } } })`
pub(crate) fn recognize_installer(
    call: &CallExpression<'_>,
    convention: &Convention,
) -> Result<Option<InstalledPackage>, Defect> {
    let Expression::Identifier(callee) = unparen(&call.callee) else {
        return Ok(None);
    };
    if callee.name.as_str() != convention.installer_ident() {
        return Ok(None);
    }
    let tree = call
        .arguments
        .first()
        .ok_or_else(|| defect(call, "installer call requires a module tree argument"))?;
    let Expression::ObjectExpression(root) = argument_expr(tree)? else {
        return Err(defect(tree, "installer argument must be an object literal"));
    };

    let mut dir: &ObjectExpression<'_> = root;
    for expected in PACKAGE_ROOT_SEGMENTS {
        let (key, next) = first_directory(dir)?;
        if key != expected {
            return Err(defect(
                dir,
                format!("expected `{expected}` in the installer prefix, found `{key}`"),
            ));
        }
        dir = next;
    }
    let (name, package_dir) = first_directory(dir)?;

    let mut modules = ModuleList::new();
    walk_directory(package_dir, "", &mut modules, convention)?;
    Ok(Some(InstalledPackage {
        name: name.to_string(),
        modules,
    }))
}

fn first_directory<'b, 'a>(
    dir: &'b ObjectExpression<'a>,
) -> Result<(&'b str, &'b ObjectExpression<'a>), Defect> {
    let first = dir
        .properties
        .first()
        .ok_or_else(|| defect(dir, "installer prefix directory is empty"))?;
    let prop = plain_property(first)?;
    let key = property_key_name(prop)?;
    match unparen(&prop.value) {
        Expression::ObjectExpression(next) => Ok((key, &**next)),
        other => Err(defect(
            other,
            format!("installer prefix entry `{key}` must be an object literal"),
        )),
    }
}

fn walk_directory(
    dir: &ObjectExpression<'_>,
    prefix: &str,
    modules: &mut ModuleList,
    convention: &Convention,
) -> Result<(), Defect> {
    for kind in &dir.properties {
        let prop = plain_property(kind)?;
        let key = property_key_name(prop)?;
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}/{key}")
        };

        if let Expression::ObjectExpression(subdir) = unparen(&prop.value) {
            walk_directory(subdir, &path, modules, convention)?;
            continue;
        }
        let Some(statements) = function_statements(&prop.value) else {
            return Err(defect(
                &prop.value,
                format!("module tree entry `{path}` is neither a directory nor a module body"),
            ));
        };

        let mut records = Vec::new();
        for statement in statements {
            records.extend(recognize_statement(statement, convention)?);
        }
        if modules.contains_key(&path) {
            return Err(Defect::DuplicateModulePath(path));
        }
        modules.insert(path, records);
    }
    Ok(())
}
