use oxc_ast::ast::{
    CallExpression, Expression, NumericLiteral, ObjectExpression, PropertyKind, Statement,
    UnaryOperator,
};

use crate::model::ExportRecord;

use super::Convention;
use super::ast_utils::{
    Defect, argument_expr, defect, function_statements, identifier_method_call, object_keys,
    plain_property, property_key_name, unparen,
};

/// Export records declared by one statement of a module body, in source
/// order. Statements without export semantics yield nothing.
pub(crate) fn recognize_statement(
    statement: &Statement<'_>,
    convention: &Convention,
) -> Result<Vec<ExportRecord>, Defect> {
    let Statement::ExpressionStatement(stmt) = statement else {
        return Ok(vec![]);
    };
    match unparen(&stmt.expression) {
        Expression::CallExpression(call) => recognize_module_api_call(call, convention),
        Expression::UnaryExpression(unary)
            if matches!(unary.operator, UnaryOperator::LogicalNot) =>
        {
            let Some(statements) = wrapped_function_statements(&unary.argument) else {
                return Ok(vec![]);
            };
            let mut records = Vec::new();
            for inner in statements {
                records.extend(recognize_statement(inner, convention)?);
            }
            Ok(records)
        }
        _ => Ok(vec![]),
    }
}

fn recognize_module_api_call(
    call: &CallExpression<'_>,
    convention: &Convention,
) -> Result<Vec<ExportRecord>, Defect> {
    let Some((binding, method)) = identifier_method_call(call) else {
        return Ok(vec![]);
    };
    if !convention.is_module_binding(binding) {
        return Ok(vec![]);
    }
    match method {
        "export" => named_exports(call),
        "exportDefault" => default_export(call).map(|record| vec![record]),
        "link" => link_records(call),
        _ => Ok(vec![]),
    }
}

/// Body of `!function () { ... }()` or `!function () { ... }.call(this, ...)`.
fn wrapped_function_statements<'b, 'a>(
    argument: &'b Expression<'a>,
) -> Option<&'b [Statement<'a>]> {
    let Expression::CallExpression(call) = unparen(argument) else {
        return None;
    };
    match unparen(&call.callee) {
        Expression::StaticMemberExpression(member)
            if matches!(member.property.name.as_str(), "call" | "apply") =>
        {
            function_statements(&member.object)
        }
        callee => function_statements(callee),
    }
}

fn named_exports(call: &CallExpression<'_>) -> Result<Vec<ExportRecord>, Defect> {
    let exports = call
        .arguments
        .first()
        .ok_or_else(|| defect(call, "export() requires an object argument"))?;
    let Expression::ObjectExpression(obj) = argument_expr(exports)? else {
        return Err(defect(exports, "export() argument must be an object literal"));
    };
    Ok(object_keys(obj)?
        .into_iter()
        .map(|name| ExportRecord::NamedExport {
            name: name.to_string(),
        })
        .collect())
}

fn default_export(call: &CallExpression<'_>) -> Result<ExportRecord, Defect> {
    let value = call
        .arguments
        .first()
        .ok_or_else(|| defect(call, "exportDefault() requires an identifier argument"))?;
    match argument_expr(value)? {
        Expression::Identifier(ident) => Ok(ExportRecord::DefaultExport {
            name: ident.name.to_string(),
        }),
        _ => Err(defect(value, "exportDefault() argument must be an identifier")),
    }
}

fn link_records(call: &CallExpression<'_>) -> Result<Vec<ExportRecord>, Defect> {
    let [source, bindings, rest @ ..] = &call.arguments[..] else {
        return Ok(vec![]);
    };
    let Expression::StringLiteral(source_lit) = argument_expr(source)? else {
        return Err(defect(source, "link() source must be a string literal"));
    };
    let Expression::ObjectExpression(bindings_obj) = argument_expr(bindings)? else {
        return Err(defect(bindings, "link() bindings must be an object literal"));
    };
    let link_id = match rest.first() {
        None => None,
        Some(id_arg) => match argument_expr(id_arg)? {
            Expression::NumericLiteral(lit) => Some(link_id_value(lit)?),
            _ => return Err(defect(id_arg, "link() id must be a numeric literal")),
        },
    };
    link_bindings(bindings_obj, source_lit.value.as_str(), link_id)
}

fn link_bindings(
    bindings: &ObjectExpression<'_>,
    from: &str,
    link_id: Option<u32>,
) -> Result<Vec<ExportRecord>, Defect> {
    let mut records = Vec::with_capacity(bindings.properties.len());
    for kind in &bindings.properties {
        let prop = plain_property(kind)?;
        let name = property_key_name(prop)?.to_string();
        if prop.method || !matches!(prop.kind, PropertyKind::Init) {
            records.push(ExportRecord::GlobalBinding {
                name,
                from: from.to_string(),
                link_id,
            });
            continue;
        }
        let record = match unparen(&prop.value) {
            Expression::StringLiteral(imported) => {
                let imported = imported.value.as_str();
                ExportRecord::ReExport {
                    alias: (imported != name).then(|| imported.to_string()),
                    name,
                    from: from.to_string(),
                    link_id,
                }
            }
            Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_) => {
                ExportRecord::GlobalBinding {
                    name,
                    from: from.to_string(),
                    link_id,
                }
            }
            other => {
                return Err(defect(
                    other,
                    "link() binding must be a string literal or an accessor function",
                ));
            }
        };
        records.push(record);
    }
    Ok(records)
}

fn link_id_value(lit: &NumericLiteral<'_>) -> Result<u32, Defect> {
    let value = lit.value;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(defect(lit, "link() id must be a non-negative integer"));
    }
    Ok(value as u32)
}
