mod file;

pub use file::{
    create_export_filename, deserialize_dataset, read_file_as_text, saved_message, serialize_dataset,
    trigger_download,
};
