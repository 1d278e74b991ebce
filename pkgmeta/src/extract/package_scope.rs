use indexmap::IndexSet;
use oxc_ast::ast::{CallExpression, Expression};

use super::Convention;
use super::ast_utils::{Defect, argument_expr, defect, identifier_method_call, object_keys};

const DEFINE_METHOD: &str = "_define";

#[derive(Debug)]
pub(crate) struct PackageDefinition {
    pub(crate) name: String,
    pub(crate) exports: Option<IndexSet<String>>,
}

/// `Package._define("<name>", moduleExports, { ...packageExports })`.
///
/// Core packages without a module system pass only two arguments, in which
/// case a second argument written as an object literal carries the package
/// exports. `Package._define("<name>", exports)` from a modules-only package
/// contributes just the name.
pub(crate) fn recognize_package_define(
    call: &CallExpression<'_>,
    convention: &Convention,
) -> Result<Option<PackageDefinition>, Defect> {
    let Some((object, method)) = identifier_method_call(call) else {
        return Ok(None);
    };
    if object != convention.registry_ident() || method != DEFINE_METHOD {
        return Ok(None);
    }

    let args = &call.arguments[..];
    let name_arg = args
        .first()
        .ok_or_else(|| defect(call, "_define() requires a package name"))?;
    let Expression::StringLiteral(name) = argument_expr(name_arg)? else {
        return Err(defect(name_arg, "_define() package name must be a string literal"));
    };

    let exports_arg = match args {
        [_, legacy] if matches!(argument_expr(legacy)?, Expression::ObjectExpression(_)) => {
            Some(legacy)
        }
        _ => args.get(2),
    };
    let exports = match exports_arg {
        None => None,
        Some(arg) => match argument_expr(arg)? {
            Expression::ObjectExpression(obj) => Some(
                object_keys(obj)?
                    .into_iter()
                    .map(str::to_string)
                    .collect::<IndexSet<_>>(),
            ),
            _ => return Err(defect(arg, "_define() package exports must be an object literal")),
        },
    };

    Ok(Some(PackageDefinition {
        name: name.value.to_string(),
        exports,
    }))
}
