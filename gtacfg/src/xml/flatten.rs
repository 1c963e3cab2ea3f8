use log::trace;

use crate::{
    data::{
        entry::FlatEntry,
        model::{FlatModel, PATH_DELIMITER},
        value::SettingValue,
    },
    error::XmlError,
    xml::{
        HARDWARE_TAG, VALUE_ATTRIBUTE,
        tree::{Document, Element},
    },
};

/// Flatten a parsed document into path-keyed entries.
///
/// Every element below the root produces an entry:
///
/// - an element carrying the value attribute becomes a typed entry at its
///   dotted path, with the type inferred from the raw attribute string;
/// - the hardware description element becomes a read-only text entry keyed
///   by its tag name alone;
/// - any other element becomes a container entry, unless its path is already
///   taken.
///
/// Children are visited in every case. Siblings that share a tag name map to
/// the same path, the later one winning.
pub fn flatten(doc: &Document) -> FlatModel {
    let mut model = FlatModel::new();
    for child in doc.root().elements() {
        visit(child, child.name().to_string(), &mut model);
    }
    model
}

/// Parse `text` and flatten it.
pub fn flatten_str(text: &str) -> Result<FlatModel, XmlError> {
    Ok(flatten(&Document::parse(text)?))
}

fn visit(node: &Element, path: String, model: &mut FlatModel) {
    if let Some(raw) = node.attribute(VALUE_ATTRIBUTE) {
        let value = SettingValue::infer(&raw);
        trace!("{path} = {value:?}");
        model.insert(path.clone(), FlatEntry::new(value));
    } else if node.name() == HARDWARE_TAG {
        model.insert(node.name(), FlatEntry::readonly_text(node.text_content()));
    } else {
        model.insert_container(path.clone());
    }

    for child in node.elements() {
        let child_path = format!("{path}{PATH_DELIMITER}{}", child.name());
        visit(child, child_path, model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value::ValueKind;

    #[test]
    fn test_value_attribute_scenario() {
        let model = flatten_str(r#"<Settings><graphics value="2"/></Settings>"#).unwrap();
        assert_eq!(model.len(), 1);
        let entry = model.get("graphics").unwrap();
        assert_eq!(entry.value, SettingValue::Number(2.0));
        assert_eq!(entry.kind(), ValueKind::Number);
        assert_eq!(entry.original_value, Some(SettingValue::Number(2.0)));
        assert!(!entry.readonly);
    }

    #[test]
    fn test_nested_paths_and_containers() {
        let model = flatten_str(
            r#"<Settings>
                <graphics>
                    <Tessellation value="2"/>
                    <DoF value="false"/>
                    <DX_Version value="DX_11"/>
                </graphics>
                <system><numReplayBlocks value="36"/></system>
            </Settings>"#,
        )
        .unwrap();

        assert_eq!(
            model.paths().collect::<Vec<_>>(),
            [
                "graphics",
                "graphics.DX_Version",
                "graphics.DoF",
                "graphics.Tessellation",
                "system",
                "system.numReplayBlocks",
            ]
        );
        assert!(model.get("graphics").unwrap().is_container());
        assert_eq!(
            model.get("graphics.DoF").unwrap().value,
            SettingValue::Bool(false)
        );
        assert_eq!(
            model.get("graphics.DX_Version").unwrap().value,
            SettingValue::Text("DX_11".into())
        );
    }

    #[test]
    fn test_hardware_description_keyed_by_tag() {
        let text = "<Settings><video>\
                    <VideoCardDescription>NVIDIA GTX 1080</VideoCardDescription>\
                    </video></Settings>";
        let model = flatten_str(text).unwrap();
        let entry = model.get(HARDWARE_TAG).unwrap();
        assert_eq!(entry.value, SettingValue::Text("NVIDIA GTX 1080".into()));
        assert!(entry.readonly);
        assert!(!model.contains("video.VideoCardDescription"));
    }

    #[test]
    fn test_value_nodes_keep_children() {
        let model = flatten_str(r#"<S><a value="1"><b value="true"/></a></S>"#).unwrap();
        assert_eq!(model.get("a").unwrap().value, SettingValue::Number(1.0));
        assert_eq!(model.get("a.b").unwrap().value, SettingValue::Bool(true));
    }

    #[test]
    fn test_duplicate_siblings_last_wins() {
        let model = flatten_str(r#"<S><a value="1"/><a value="2"/></S>"#).unwrap();
        assert_eq!(model.get("a").unwrap().value, SettingValue::Number(2.0));
    }

    #[test]
    fn test_container_does_not_overwrite() {
        let model = flatten_str(r#"<S><a value="1"/><a><b/></a></S>"#).unwrap();
        assert_eq!(model.get("a").unwrap().value, SettingValue::Number(1.0));
        assert!(model.get("a.b").unwrap().is_container());
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let text =
            r#"<S><x><y value="0.5"/></x><VideoCardDescription>gpu</VideoCardDescription></S>"#;
        assert_eq!(flatten_str(text).unwrap(), flatten_str(text).unwrap());
    }

    #[test]
    fn test_root_without_children() {
        assert!(flatten_str("<Settings/>").unwrap().is_empty());
    }
}
