use crate::constants::DEFAULT_DATASET_FILENAME;
use crate::models::Dataset;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Serialize a dataset to pretty-printed JSON
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn serialize_dataset(dataset: &Dataset) -> Result<String, String> {
    serde_json::to_string_pretty(dataset).map_err(|e| format!("Failed to serialize dataset: {e}"))
}

/// Parse a dataset from JSON text
///
/// Missing collections and optional fields fall back to their defaults; no
/// further validation happens.
///
/// # Errors
/// Returns an error if the text is not a JSON dataset
pub fn deserialize_dataset(text: &str) -> Result<Dataset, String> {
    serde_json::from_str(text).map_err(|e| format!("Failed to parse dataset: {e}"))
}

/// Create the download filename for a dataset loaded from `source_name`
#[must_use]
pub fn create_export_filename(source_name: Option<&str>) -> String {
    let stem = source_name
        .map(|name| {
            std::path::Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
        })
        .filter(|stem| !stem.trim().is_empty());

    match stem {
        Some(stem) => format!("{stem}.json"),
        None => DEFAULT_DATASET_FILENAME.to_string(),
    }
}

/// Status line shown after a save
#[must_use]
pub fn saved_message(filename: &str, at: chrono::DateTime<chrono::Local>) -> String {
    format!("Saved {filename} at {}", at.format("%H:%M:%S"))
}

/// Trigger a browser download of text as a file
///
/// # Errors
/// Returns an error if blob creation, URL generation, or DOM manipulation fails
pub fn trigger_download(text: &str, filename: &str, mime_type: &str) -> Result<(), String> {
    let uint8_array = js_sys::Uint8Array::from(text.as_bytes());
    let array = js_sys::Array::new();
    array.push(&uint8_array);

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &blob_options)
        .map_err(|_| "Failed to create blob")?;

    let window = web_sys::window().ok_or("No window available")?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL")?;

    let document = window.document().ok_or("No document available")?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "Failed to create anchor element")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast to anchor element")?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);

    Ok(())
}

/// Read a browser file as text and hand the result to `on_done`
///
/// # Errors
/// Returns an error if the `FileReader` cannot be created or started. Read
/// failures after that are reported through `on_done`.
pub fn read_file_as_text(
    file: &web_sys::File,
    on_done: impl FnOnce(Result<String, String>) + 'static,
) -> Result<(), String> {
    let reader = web_sys::FileReader::new().map_err(|_| "Failed to create FileReader")?;
    let reader_clone = reader.clone();

    let onload = Closure::once(move |_: web_sys::Event| {
        let text = reader_clone
            .result()
            .ok()
            .and_then(|result| result.as_string())
            .ok_or_else(|| "Failed to read file".to_string());
        on_done(text);
    });

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    reader.read_as_text(file).map_err(|_| "Failed to start reading file".to_string())
}
