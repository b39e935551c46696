//! Plug-and-Play twin traversal and component-scoped envelopes, ported
//! from `original_source/sdk/src/azure/iot/az_iot_pnp_client_twin.c`.

use az_json::{JsonTokenKind, Reader, Writer};

use crate::error::ProtocolError;
use crate::hub::TwinResponseType;

const DESIRED_KEY: &str = "desired";
const DESIRED_VERSION_MARKER: &str = "$version";
const COMPONENT_MARKER_KEY: &str = "__t";
const COMPONENT_MARKER_VALUE: &str = "c";

/// One property found while traversing a twin document. `component_name`
/// is empty when the property belongs to the root component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentProperty<'a> {
    pub component_name: &'a str,
    pub property_name: &'a str,
    /// A reader cursor positioned on the property value's first token —
    /// the caller reads it (`current()`, `next_token()`, `skip_children()`)
    /// without this traversal ever materializing the value itself.
    pub value: Reader<'a>,
}

/// A pull-based, allocation-free walk over a twin payload's non-`$version`/
/// `__t` properties, layered entirely on top of [`Reader`] exactly the way
/// [`crate::pointer`]'s resolver is — no document model, no buffering of
/// properties not yet visited.
///
/// `component_name` sticks across calls to [`Self::next_property`] the same
/// way the ported C API's out-parameter does: it is only reassigned when
/// the cursor is back at the root-level "is this a component name" depth,
/// so every property found while still inside a matched component keeps
/// reporting that component's name without this type re-deriving it from
/// scratch each call.
pub struct ComponentPropertyReader<'a, 'k> {
    reader: Reader<'a>,
    response_type: TwinResponseType,
    known_components: &'k [&'k str],
    component_name: &'a str,
    started: bool,
}

impl<'a, 'k> ComponentPropertyReader<'a, 'k> {
    pub fn new(
        payload: &'a [u8],
        response_type: TwinResponseType,
        known_components: &'k [&'k str],
    ) -> Self {
        ComponentPropertyReader {
            reader: Reader::new(payload),
            response_type,
            known_components,
            component_name: "",
            started: false,
        }
    }

    /// Returns the next property, or `None` once the `DesiredPatch` object
    /// (or the `Get` response's `desired` sub-object) has been fully read.
    pub fn next_property(&mut self) -> Result<Option<ComponentProperty<'a>>, ProtocolError> {
        if !self.started {
            self.started = true;
            if self.reader.next_token()? != JsonTokenKind::BeginObject {
                return Err(ProtocolError::UnexpectedChar);
            }
            if self.response_type == TwinResponseType::Get {
                enter_named_object(&mut self.reader, DESIRED_KEY)?;
            }
            self.reader.next_token()?;
        }

        let root_depth = root_object_depth(self.response_type);
        loop {
            self.skip_markers(root_depth)?;
            if self.reader.current().kind == JsonTokenKind::EndObject {
                if self.reader.depth() == root_depth - 1 {
                    return Ok(None);
                }
                self.reader.next_token()?;
                continue;
            }
            break;
        }

        if self.reader.depth() == root_depth {
            let candidate = token_str(&self.reader)?;
            self.component_name = "";
            if self.known_components.contains(&candidate) {
                self.reader.next_token()?;
                if self.reader.current().kind != JsonTokenKind::BeginObject {
                    return Err(ProtocolError::UnexpectedChar);
                }
                self.reader.next_token()?;
                self.skip_markers(root_depth)?;
                self.component_name = candidate;
            }
        }

        if self.reader.current().kind != JsonTokenKind::PropertyName {
            return Err(ProtocolError::UnexpectedChar);
        }
        let property_name = token_str(&self.reader)?;
        self.reader.next_token()?;
        let value = self.reader;
        self.reader.skip_children()?;
        self.reader.next_token()?;

        Ok(Some(ComponentProperty {
            component_name: self.component_name,
            property_name,
            value,
        }))
    }

    /// Skips `$version` at `root_depth` and `__t` at `root_depth + 1`,
    /// leaving the reader positioned on the first non-marker property name
    /// (or on whatever non-property token follows, e.g. `EndObject`).
    fn skip_markers(&mut self, root_depth: u32) -> Result<(), ProtocolError> {
        loop {
            if self.reader.current().kind != JsonTokenKind::PropertyName {
                return Ok(());
            }
            let marker = match self.reader.depth() {
                d if d == root_depth => DESIRED_VERSION_MARKER,
                d if d == root_depth + 1 => COMPONENT_MARKER_KEY,
                _ => return Ok(()),
            };
            if token_str(&self.reader)? != marker {
                return Ok(());
            }
            self.reader.next_token()?;
            self.reader.next_token()?;
        }
    }
}

fn root_object_depth(response_type: TwinResponseType) -> u32 {
    match response_type {
        TwinResponseType::Get => 2,
        TwinResponseType::DesiredPatch | TwinResponseType::ReportedAck => 1,
    }
}

/// Finds `key`'s object value at the current nesting level and descends
/// into it, skipping every other sibling property.
fn enter_named_object(reader: &mut Reader<'_>, key: &str) -> Result<(), ProtocolError> {
    loop {
        match reader.next_token()? {
            JsonTokenKind::EndObject => return Err(ProtocolError::ItemNotFound),
            JsonTokenKind::PropertyName => {
                let name = token_str(reader)?;
                let value_kind = reader.next_token()?;
                if name == key {
                    if value_kind != JsonTokenKind::BeginObject {
                        return Err(ProtocolError::UnexpectedChar);
                    }
                    return Ok(());
                }
                if value_kind.is_container_start() {
                    reader.skip_children()?;
                }
            }
            _ => return Err(ProtocolError::UnexpectedChar),
        }
    }
}

fn token_str<'a>(reader: &Reader<'a>) -> Result<&'a str, ProtocolError> {
    std::str::from_utf8(reader.current().slice).map_err(|_| ProtocolError::UnexpectedChar)
}

/// Writes the component-scoped envelope `{"<component>":{"__t":"c", ...}}`
/// for outbound telemetry/reported properties, pairing with the read-side
/// [`ComponentPropertyReader`]. `write_body` receives the writer already
/// positioned inside the component's object (after the `__t` marker) so it
/// can add the component's own properties.
pub fn write_component_envelope(
    writer: &mut Writer<'_>,
    component_name: &str,
    write_body: impl FnOnce(&mut Writer<'_>) -> Result<(), az_json::JsonError>,
) -> Result<(), az_json::JsonError> {
    writer.begin_object()?;
    writer.property_name(component_name)?;
    writer.begin_object()?;
    writer.property_name(COMPONENT_MARKER_KEY)?;
    writer.string(COMPONENT_MARKER_VALUE)?;
    write_body(writer)?;
    writer.end_object()?;
    writer.end_object()
}

/// Writes a property ack envelope: `{"value":<value>,"ac":<ack_code>,"av":<ack_version>[,"ad":"<desc>"]}`,
/// the response a device sends back for a writable property update.
pub fn write_property_ack(
    writer: &mut Writer<'_>,
    value_raw: &str,
    ack_code: u16,
    ack_version: i64,
    ack_description: Option<&str>,
) -> Result<(), az_json::JsonError> {
    writer.begin_object()?;
    writer.property_name("value")?;
    writer.raw_value(value_raw)?;
    writer.property_name("ac")?;
    writer.number_raw(&ack_code.to_string())?;
    writer.property_name("av")?;
    writer.number_raw(&ack_version.to_string())?;
    if let Some(description) = ack_description {
        writer.property_name("ad")?;
        writer.string(description)?;
    }
    writer.end_object()
}
