//! Word document parsing module.

mod docx;
mod options;
mod properties;
mod styles;

pub use docx::DocxParser;
pub use options::{ErrorMode, ParseOptions};
pub use properties::parse_core_properties;
pub use styles::StyleSheet;

use quick_xml::events::BytesStart;

/// Extract an attribute value by qualified key from an element.
pub(crate) fn get_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(std::result::Result::ok)
        .find(|a| a.key.as_ref() == key)
        .map(|attr| match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}
