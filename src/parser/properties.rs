//! Core document properties (`docProps/core.xml`).

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::Metadata;

#[derive(Clone, Copy)]
enum Field {
    Title,
    Creator,
    LastModifiedBy,
    Created,
    Modified,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"dc:title" => Some(Field::Title),
            b"dc:creator" => Some(Field::Creator),
            b"cp:lastModifiedBy" => Some(Field::LastModifiedBy),
            b"dcterms:created" => Some(Field::Created),
            b"dcterms:modified" => Some(Field::Modified),
            _ => None,
        }
    }
}

/// Parse `docProps/core.xml` into [`Metadata`].
///
/// Blank values are treated as absent; timestamps that are not RFC 3339
/// are dropped.
pub fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut metadata = Metadata::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => field = Field::from_name(e.name().as_ref()),
            Ok(Event::Text(t)) => {
                let Some(f) = field else { continue };
                let value = t.unescape().map_err(Error::from)?;
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                match f {
                    Field::Title => metadata.title = Some(value.to_string()),
                    Field::Creator => metadata.author = Some(value.to_string()),
                    Field::LastModifiedBy => metadata.last_modified_by = Some(value.to_string()),
                    Field::Created => metadata.created = parse_timestamp(value),
                    Field::Modified => metadata.modified = parse_timestamp(value),
                }
            }
            Ok(Event::End(_)) => field = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "docProps/core.xml at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(metadata)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
