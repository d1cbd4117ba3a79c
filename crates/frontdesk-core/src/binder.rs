//! Binding query parameters to an operation's declared parameters.

use frontdesk_model::{BoundArguments, ParamSpec};
use serde_json::Value;

use crate::query::QueryParams;

/// Produce one argument per declared parameter, in declaration order.
///
/// For each parameter:
///
/// - a query value with the same name wins; array parameters wrap a scalar
///   value into a one-element list
/// - otherwise the declared default is used
/// - otherwise `null`, or `[]` for array parameters
///
/// Values are not coerced beyond the array wrapping.
///
/// # Examples
///
/// ```
/// use frontdesk_core::binder::bind;
/// use frontdesk_core::query::parse_query;
/// use frontdesk_model::ParamSpec;
/// use serde_json::json;
///
/// let params = [ParamSpec::required("id"), ParamSpec::array("tags")];
/// let args = bind(&params, &parse_query("tags=a&id=7"));
/// assert_eq!(args.into_inner(), vec![json!("7"), json!(["a"])]);
/// ```
#[must_use]
pub fn bind(params: &[ParamSpec], query: &QueryParams) -> BoundArguments {
    params
        .iter()
        .map(|param| bind_one(param, query))
        .collect::<Vec<_>>()
        .into()
}

fn bind_one(param: &ParamSpec, query: &QueryParams) -> Value {
    if let Some(value) = query.get(&param.name) {
        return if param.is_array && !is_sequence(value) {
            Value::Array(vec![value.clone()])
        } else {
            value.clone()
        };
    }

    match (&param.default, param.is_array) {
        (Some(default), _) => default.clone(),
        (None, true) => Value::Array(Vec::new()),
        (None, false) => Value::Null,
    }
}

/// Lists and bracket-keyed maps both count as sequences.
fn is_sequence(value: &Value) -> bool {
    value.is_array() || value.is_object()
}
