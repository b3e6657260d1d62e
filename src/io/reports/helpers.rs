use handlebars::Handlebars;
use handlebars::{Helper, HelperResult, RenderContext, RenderError};

use crate::analysis::interpretation::format_p_value;

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;

/// Register all Handlebars helpers used by lifeboat reports.
pub fn register_helpers(handlebars: &mut Handlebars<'static>) {
    register_format_helper(handlebars);
    register_p_value_helper(handlebars);
    register_percentage_helper(handlebars);

    // Helper: CSS class for a significance decision
    register_string_transform_helper(handlebars, "significance_class", |value| {
        match value {
            "significant" => "sig",
            "not_significant" => "not-sig",
            _ => "undetermined",
        }
        .to_string()
    });
}

fn register_string_transform_helper<F>(handlebars: &mut Handlebars<'static>, name: &'static str, transform: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    handlebars.register_helper(
        name,
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  _: &handlebars::Context,
                  _: &mut RenderContext,
                  out: &mut dyn handlebars::Output|
                  -> HelperResult {
                let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                out.write(&transform(value))?;
                Ok(())
            },
        ),
    );
}

/// Fixed-decimal number; `null` renders as `n/a`
fn register_format_helper(handlebars: &mut Handlebars<'static>) {
    handlebars.register_helper(
        "format",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &handlebars::Context,
             _: &mut RenderContext,
             out: &mut dyn handlebars::Output|
             -> HelperResult {
                let param = h
                    .param(0)
                    .ok_or_else(|| RenderError::new("format helper requires a parameter"))?;
                let decimals = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(4) as usize;
                let rendered = match param.value().as_f64() {
                    Some(value) => format!("{value:.decimals$}"),
                    None => "n/a".to_string(),
                };
                out.write(&rendered)?;
                Ok(())
            },
        ),
    );
}

fn register_p_value_helper(handlebars: &mut Handlebars<'static>) {
    handlebars.register_helper(
        "format_p",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &handlebars::Context,
             _: &mut RenderContext,
             out: &mut dyn handlebars::Output|
             -> HelperResult {
                let rendered = match h.param(0).and_then(|v| v.value().as_f64()) {
                    Some(p) => format_p_value(p),
                    None => "n/a".to_string(),
                };
                out.write(&rendered)?;
                Ok(())
            },
        ),
    );
}

fn register_percentage_helper(handlebars: &mut Handlebars<'static>) {
    handlebars.register_helper(
        "percentage",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &handlebars::Context,
             _: &mut RenderContext,
             out: &mut dyn handlebars::Output|
             -> HelperResult {
                let value = h.param(0).and_then(|v| v.value().as_f64()).ok_or_else(|| {
                    RenderError::new("percentage helper requires a numeric parameter")
                })?;
                out.write(&format!("{:.1}", value * 100.0))?;
                Ok(())
            },
        ),
    );
}
