use handlebars::Handlebars;
use tracing::warn;

pub(super) const HTML_TEMPLATE_NAME: &str = "default_html";
pub(super) const MARKDOWN_TEMPLATE_NAME: &str = "markdown_report";

pub(super) fn register_builtin_templates(handlebars: &mut Handlebars<'static>) {
    if let Err(err) = handlebars
        .register_template_string(HTML_TEMPLATE_NAME, include_str!("./default_report.hbs"))
    {
        warn!("Failed to register HTML report template: {}", err);
    }

    if let Err(err) = handlebars.register_template_string(
        MARKDOWN_TEMPLATE_NAME,
        include_str!("./default_markdown.hbs"),
    ) {
        warn!("Failed to register Markdown report template: {}", err);
    }
}
