use wasm_bindgen::prelude::*;

/// Re-renders JSON text, compact or pretty printed.
#[wasm_bindgen]
pub fn format(text: &str, pretty: bool) -> Result<String, JsError> {
    let value = crate::from_text(text)?;

    Ok(crate::to_text(&value, pretty))
}
