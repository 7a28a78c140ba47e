//! HTML form helpers shared by handlers.

use salvo::prelude::*;

use crate::extensions::*;

/// Hidden form field carrying the verb a POST stands in for.
pub(crate) const METHOD_FIELD: &str = "_method";

/// Lowercased `_method` value of a submitted form, if any.
///
/// # Errors
///
/// Responds 400 when the body is not a form.
pub(crate) async fn overridden_method(req: &mut Request) -> Result<Option<String>, StatusError> {
    let form = req.form_data().await.or_400("could not parse form")?;

    Ok(form
        .fields
        .get(METHOD_FIELD)
        .map(|method| method.trim().to_ascii_lowercase())
        .filter(|method| !method.is_empty()))
}
