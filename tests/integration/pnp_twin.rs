//! PnP desired-properties traversal followed by writing the property-ack
//! envelope a device sends back, against the shared fixture's patch
//! touching one component (`sensor`) and one root-level property.

use az_iot_protocol::{write_property_ack, ComponentProperty, ComponentPropertyReader, TwinResponseType};
use az_json::Writer;
use az_test_support::PNP_DESIRED_PATCH_DOCUMENT;

fn collect_properties(document: &str) -> Vec<ComponentProperty<'_>> {
    let mut reader =
        ComponentPropertyReader::new(document.as_bytes(), TwinResponseType::DesiredPatch, &["sensor"]);
    let mut out = Vec::new();
    while let Some(property) = reader.next_property().unwrap() {
        out.push(property);
    }
    out
}

#[test]
fn desired_patch_separates_component_and_root_properties() {
    let properties = collect_properties(PNP_DESIRED_PATCH_DOCUMENT);

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].component_name, "sensor");
    assert_eq!(properties[0].property_name, "brightness");
    assert_eq!(properties[0].value.current().slice, b"80");
    assert_eq!(properties[1].component_name, "");
    assert_eq!(properties[1].property_name, "targetTemperature");
    assert_eq!(properties[1].value.current().slice, b"21");
}

#[test]
fn root_property_ack_is_written_with_the_patch_version() {
    let properties = collect_properties(PNP_DESIRED_PATCH_DOCUMENT);
    let target_temperature = properties
        .iter()
        .find(|p| p.property_name == "targetTemperature")
        .unwrap();

    let mut buf = [0u8; 128];
    let mut writer = Writer::new(&mut buf);
    write_property_ack(
        &mut writer,
        std::str::from_utf8(target_temperature.value.current().slice).unwrap(),
        200,
        4,
        None,
    )
    .unwrap();
    assert_eq!(writer.get_written(), br#"{"value":21,"ac":200,"av":4}"#);
}
