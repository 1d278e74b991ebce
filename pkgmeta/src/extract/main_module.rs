use oxc_ast::ast::{BindingPatternKind, Expression, VariableDeclarator};

use super::ast_utils::{argument_expr, unparen};

/// `var exports = require("/node_modules/meteor/<name>/<path>")`
pub(crate) fn recognize_main_module(decl: &VariableDeclarator<'_>) -> Option<String> {
    let BindingPatternKind::BindingIdentifier(ident) = &decl.id.kind else {
        return None;
    };
    if ident.name.as_str() != "exports" {
        return None;
    }
    let Expression::CallExpression(call) = unparen(decl.init.as_ref()?) else {
        return None;
    };
    let Expression::Identifier(callee) = unparen(&call.callee) else {
        return None;
    };
    if callee.name.as_str() != "require" {
        return None;
    }
    match argument_expr(call.arguments.first()?).ok()? {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}
