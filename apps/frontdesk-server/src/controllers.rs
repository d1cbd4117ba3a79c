//! Demo controllers served by the binary.

use anyhow::bail;
use frontdesk_core::{Controller, RequestContext, Routable};
use frontdesk_model::{BoundArguments, ControllerDescriptor, OperationSpec, ParamSpec, Reply};

/// The default controller: reachable at `/` and `/{operation}`.
#[derive(Debug, Default)]
pub struct DefaultPage;

impl Routable for DefaultPage {
    fn descriptor() -> ControllerDescriptor {
        ControllerDescriptor::new("DefaultPage")
            .operation(OperationSpec::public("index"))
            .operation(
                OperationSpec::public("args")
                    .param(ParamSpec::required("userId"))
                    .param(ParamSpec::required("userName")),
            )
    }
}

impl Controller for DefaultPage {
    fn invoke(
        &mut self,
        operation: &OperationSpec,
        args: BoundArguments,
        _ctx: &RequestContext,
    ) -> anyhow::Result<Reply> {
        match operation.name.as_str() {
            "index" => Ok(Reply::text("You're accessing the index!")),
            "args" => {
                let user_id = args.str(0).map_or(0, leading_int);
                let user_name = args.str(1).unwrap_or_default();
                Ok(Reply::text(format!(
                    "Your user ID is: {user_id}, user name: {user_name}"
                )))
            }
            other => bail!("DefaultPage has no operation {other}"),
        }
    }
}

/// Greetings at `/greeting/{operation}`.
#[derive(Debug, Default)]
pub struct Greeting;

impl Routable for Greeting {
    fn descriptor() -> ControllerDescriptor {
        ControllerDescriptor::new("Greeting")
            .operation(OperationSpec::public("index"))
            .operation(OperationSpec::public("hello").param(ParamSpec::optional("name", "world")))
            .operation(OperationSpec::public("tags").param(ParamSpec::array("tags")))
    }
}

impl Controller for Greeting {
    fn invoke(
        &mut self,
        operation: &OperationSpec,
        args: BoundArguments,
        ctx: &RequestContext,
    ) -> anyhow::Result<Reply> {
        match operation.name.as_str() {
            "index" => Ok(Reply::text(format!("Greetings via {}", ctx.method()))),
            "hello" => {
                let name = args.str(0).unwrap_or("world");
                Ok(Reply::text(format!("Hello, {name}!")))
            }
            "tags" => {
                let tags = args.get(0).cloned().unwrap_or_default();
                Reply::json(&serde_json::json!({ "tags": tags })).map_err(Into::into)
            }
            other => bail!("Greeting has no operation {other}"),
        }
    }
}

/// Parse the leading decimal integer of `s`, or 0 when there is none.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
