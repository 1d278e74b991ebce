use oxc_ast::ast::{
    Argument, CallExpression, Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind,
    PropertyKey, Statement,
};
use oxc_span::{GetSpan, Span};

/// A recognizer matched the outer pattern of a node but something inside it
/// had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Defect {
    Shape { message: String, span: Span },
    DuplicateModulePath(String),
}

pub(crate) fn defect(node: &impl GetSpan, message: impl Into<String>) -> Defect {
    Defect::Shape {
        message: message.into(),
        span: node.span(),
    }
}

pub(crate) fn unparen<'b, 'a>(mut expr: &'b Expression<'a>) -> &'b Expression<'a> {
    while let Expression::ParenthesizedExpression(inner) = expr {
        expr = &inner.expression;
    }
    expr
}

pub(crate) fn argument_expr<'b, 'a>(arg: &'b Argument<'a>) -> Result<&'b Expression<'a>, Defect> {
    arg.as_expression()
        .map(unparen)
        .ok_or_else(|| defect(arg, "spread arguments are not supported"))
}

/// `<object>.<property>(...)` where `<object>` is a plain identifier.
pub(crate) fn identifier_method_call<'b>(call: &'b CallExpression<'_>) -> Option<(&'b str, &'b str)> {
    let Expression::StaticMemberExpression(member) = unparen(&call.callee) else {
        return None;
    };
    let Expression::Identifier(object) = unparen(&member.object) else {
        return None;
    };
    Some((object.name.as_str(), member.property.name.as_str()))
}

pub(crate) fn property_key_name<'b>(prop: &'b ObjectProperty<'_>) -> Result<&'b str, Defect> {
    if prop.computed {
        return Err(defect(&prop.key, "computed property keys are not supported"));
    }
    match &prop.key {
        PropertyKey::StaticIdentifier(ident) => Ok(ident.name.as_str()),
        PropertyKey::StringLiteral(lit) => Ok(lit.value.as_str()),
        other => Err(defect(other, "property key must be an identifier or string literal")),
    }
}

pub(crate) fn plain_property<'b, 'a>(
    kind: &'b ObjectPropertyKind<'a>,
) -> Result<&'b ObjectProperty<'a>, Defect> {
    match kind {
        ObjectPropertyKind::ObjectProperty(prop) => Ok(&**prop),
        ObjectPropertyKind::SpreadProperty(spread) => {
            Err(defect(&**spread, "spread properties are not supported"))
        }
    }
}

/// Keys of an object literal in source order.
pub(crate) fn object_keys<'b>(obj: &'b ObjectExpression<'_>) -> Result<Vec<&'b str>, Defect> {
    obj.properties
        .iter()
        .map(|kind| plain_property(kind).and_then(property_key_name))
        .collect()
}

/// Statements of a function or arrow function value.
pub(crate) fn function_statements<'b, 'a>(expr: &'b Expression<'a>) -> Option<&'b [Statement<'a>]> {
    match unparen(expr) {
        Expression::FunctionExpression(func) => Some(
            func.body
                .as_ref()
                .map(|body| &body.statements[..])
                .unwrap_or_default(),
        ),
        Expression::ArrowFunctionExpression(arrow) => Some(&arrow.body.statements[..]),
        _ => None,
    }
}
