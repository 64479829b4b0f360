//! HTML views.
//!
//! Templates live in `templates/` and are compiled into the binary. Every page
//! template extends `layout.html`; `failure.html` and `order_placed.html` are
//! standalone fragments. Autoescaping is on for all of them (`.html`).

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading or rendering templates.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("products.html", include_str!("../../templates/products.html")),
    ("product_detail.html", include_str!("../../templates/product_detail.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("profile_updated.html", include_str!("../../templates/profile_updated.html")),
    ("cart.html", include_str!("../../templates/cart.html")),
    ("order_placed.html", include_str!("../../templates/order_placed.html")),
    ("addresses.html", include_str!("../../templates/addresses.html")),
    ("addresses_edit.html", include_str!("../../templates/addresses_edit.html")),
    ("vouchers.html", include_str!("../../templates/vouchers.html")),
    ("orders.html", include_str!("../../templates/orders.html")),
    ("admin_products.html", include_str!("../../templates/admin_products.html")),
    ("admin_product_edit.html", include_str!("../../templates/admin_product_edit.html")),
    ("admin_orders.html", include_str!("../../templates/admin_orders.html")),
    ("admin_reports.html", include_str!("../../templates/admin_reports.html")),
    ("panel.html", include_str!("../../templates/panel.html")),
    ("failure.html", include_str!("../../templates/failure.html")),
];

/// The compiled template set.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile every bundled template. Syntax errors surface here, at startup.
    pub fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ViewError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_layout_wraps_pages() {
        let views = Views::new().unwrap();
        let html = views
            .render("home.html", context! { title => "E-Commerce Lab", connected => true })
            .unwrap();
        assert!(html.contains("<title>E-Commerce Lab</title>"));
        assert!(html.contains("Database Connected"));
    }

    #[test]
    fn test_output_is_escaped() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                "failure.html",
                context! { prefix => "Error: ", message => "<script>alert(1)</script>" },
            )
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template() {
        let views = Views::new().unwrap();
        assert!(views.render("missing.html", context! {}).is_err());
    }
}
