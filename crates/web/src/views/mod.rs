//! HTML views rendered with minijinja.
//!
//! Templates are compiled into the binary and loaded once at startup, so a
//! broken template stops the server from booting instead of failing a request.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// Every template the server knows about, as `(name, source)`.
const TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    (
        "products/index.html",
        include_str!("../../templates/products/index.html"),
    ),
    (
        "products/show.html",
        include_str!("../../templates/products/show.html"),
    ),
    (
        "products/new.html",
        include_str!("../../templates/products/new.html"),
    ),
    (
        "products/edit.html",
        include_str!("../../templates/products/edit.html"),
    ),
    (
        "products/_form.html",
        include_str!("../../templates/products/_form.html"),
    ),
    (
        "session/new.html",
        include_str!("../../templates/session/new.html"),
    ),
];

/// A renderable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    ProductsIndex,
    ProductsShow,
    ProductsNew,
    ProductsEdit,
    SessionNew,
}

impl View {
    #[must_use]
    pub(crate) const fn template(self) -> &'static str {
        match self {
            Self::ProductsIndex => "products/index.html",
            Self::ProductsShow => "products/show.html",
            Self::ProductsNew => "products/new.html",
            Self::ProductsEdit => "products/edit.html",
            Self::SessionNew => "session/new.html",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ViewError {
    #[error("failed to load template: {0}")]
    Load(#[source] minijinja::Error),

    #[error("failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

#[derive(Debug)]
pub(crate) struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile every template.
    pub(crate) fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(ViewError::Load)?;
        }

        Ok(Self { env })
    }

    /// Render a view to an HTML string.
    pub(crate) fn render<C: Serialize>(&self, view: View, context: C) -> Result<String, ViewError> {
        let template = view.template();

        self.env
            .get_template(template)
            .and_then(|compiled| compiled.render(context))
            .map_err(|source| ViewError::Render { template, source })
    }
}
