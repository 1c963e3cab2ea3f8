use log::debug;

use crate::{
    data::{entry::FlatEntry, model::FlatModel, model::PATH_DELIMITER, value::SettingValue},
    error::XmlError,
    xml::{
        HARDWARE_TAG, VALUE_ATTRIBUTE, XML_DECLARATION,
        tree::{Document, Element},
    },
};

/// Output of [`rehydrate_with_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rehydrated {
    /// Updated document text, always starting with an XML declaration.
    pub text: String,
    /// Paths that did not resolve to an element of the original document.
    pub skipped: Vec<String>,
}

/// Write the values of `model` back onto a fresh parse of `original`.
///
/// Paths that do not resolve are skipped silently; use
/// [`rehydrate_with_report`] to learn which ones.
pub fn rehydrate(model: &FlatModel, original: &str) -> Result<String, XmlError> {
    rehydrate_with_report(model, original).map(|r| r.text)
}

/// Like [`rehydrate`], also returning the paths that were skipped.
///
/// Fails only when `original` does not parse.
pub fn rehydrate_with_report(model: &FlatModel, original: &str) -> Result<Rehydrated, XmlError> {
    let mut doc = Document::parse(original)?;
    let mut skipped = Vec::new();

    for (path, entry) in model {
        if path == HARDWARE_TAG {
            match doc.root_mut().find_mut(HARDWARE_TAG) {
                Some(element) => write_text(element, entry),
                None => skipped.push(path.clone()),
            }
            continue;
        }

        match resolve(doc.root_mut(), path) {
            Some(element) => write_value(element, entry),
            None => {
                debug!("skipping unresolved path `{path}`");
                skipped.push(path.clone());
            }
        }
    }

    let mut text = doc.to_xml_string()?;
    if !text.starts_with("<?xml") {
        text.insert_str(0, XML_DECLARATION);
    }
    Ok(Rehydrated { text, skipped })
}

/// Walk `path` from `root`, taking the first child with each segment's name.
fn resolve<'a>(root: &'a mut Element, path: &str) -> Option<&'a mut Element> {
    path.split(PATH_DELIMITER)
        .try_fold(root, |node, segment| node.child_mut(segment))
}

fn write_value(element: &mut Element, entry: &FlatEntry) {
    if entry.is_container() {
        return;
    }
    let Some(current) = element.attribute(VALUE_ATTRIBUTE) else {
        return;
    };
    // An unchanged value keeps its original spelling ("007", "1.000000").
    if SettingValue::infer(&current) == entry.value {
        return;
    }
    element.set_attribute(VALUE_ATTRIBUTE, &entry.value.to_string());
}

fn write_text(element: &mut Element, entry: &FlatEntry) {
    let text = entry.value.to_string();
    if element.text_content() != text {
        element.set_text_content(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::flatten::flatten_str;

    #[test]
    fn test_edit_scenario() {
        let original = r#"<Settings><graphics value="2"/></Settings>"#;
        let mut model = flatten_str(original).unwrap();
        model
            .set_value("graphics", SettingValue::Number(3.0))
            .unwrap();

        let out = rehydrate(&model, original).unwrap();
        assert_eq!(
            out,
            format!(r#"{XML_DECLARATION}<Settings><graphics value="3"/></Settings>"#)
        );
    }

    #[test]
    fn test_declaration_not_duplicated() {
        let original = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<S><a value=\"1\"/></S>";
        let model = flatten_str(original).unwrap();
        assert_eq!(rehydrate(&model, original).unwrap(), original);
    }

    #[test]
    fn test_boolean_serialization() {
        let original = r#"<S><a value="false"/><b value="true"/></S>"#;
        let mut model = flatten_str(original).unwrap();
        model.set_value("a", SettingValue::Bool(true)).unwrap();
        model.set_value("b", SettingValue::Bool(false)).unwrap();

        let out = rehydrate(&model, original).unwrap();
        assert!(out.ends_with(r#"<S><a value="true"/><b value="false"/></S>"#));
    }

    #[test]
    fn test_unchanged_values_keep_spelling() {
        let original = r#"<S><a value="007"/><b value="1.000000"/></S>"#;
        let model = flatten_str(original).unwrap();
        let out = rehydrate(&model, original).unwrap();
        assert_eq!(out, format!("{XML_DECLARATION}{original}"));
    }

    #[test]
    fn test_unresolved_path_is_skipped() {
        let original = r#"<S><g><a value="1"/></g></S>"#;
        let model = flatten_str(original).unwrap();

        let mut drifted = model.clone();
        drifted.insert("g.missing", FlatEntry::new(SettingValue::Number(5.0)));
        drifted.insert("nowhere.a", FlatEntry::new(SettingValue::Number(5.0)));

        let report = rehydrate_with_report(&drifted, original).unwrap();
        assert_eq!(report.text, rehydrate(&model, original).unwrap());
        assert_eq!(report.skipped, ["g.missing", "nowhere.a"]);
    }

    #[test]
    fn test_container_and_valueless_nodes_untouched() {
        let original = r#"<S><g><a/></g></S>"#;
        let mut model = flatten_str(original).unwrap();
        // a node without the value attribute is left alone
        model.insert("g.a", FlatEntry::new(SettingValue::Number(1.0)));
        let out = rehydrate(&model, original).unwrap();
        assert_eq!(out, format!("{XML_DECLARATION}{original}"));
    }

    #[test]
    fn test_first_duplicate_sibling_is_written() {
        let original = r#"<S><a value="1"/><a value="2"/></S>"#;
        let mut model = flatten_str(original).unwrap();
        model.set_value("a", SettingValue::Number(9.0)).unwrap();
        let out = rehydrate(&model, original).unwrap();
        assert!(out.ends_with(r#"<S><a value="9"/><a value="2"/></S>"#));
    }

    #[test]
    fn test_hardware_description_text() {
        let original = "<Settings><video>\
                        <VideoCardDescription>NVIDIA GTX 1080</VideoCardDescription>\
                        </video></Settings>";
        let mut model = flatten_str(original).unwrap();
        model.insert(HARDWARE_TAG, FlatEntry::readonly_text("AMD RX 580"));

        let out = rehydrate(&model, original).unwrap();
        assert!(out.contains("<VideoCardDescription>AMD RX 580</VideoCardDescription>"));
    }

    #[test]
    fn test_hardware_description_missing_is_skipped() {
        let original = "<S/>";
        let mut model = FlatModel::new();
        model.insert(HARDWARE_TAG, FlatEntry::readonly_text("gpu"));
        let report = rehydrate_with_report(&model, original).unwrap();
        assert_eq!(report.skipped, [HARDWARE_TAG]);
        assert_eq!(report.text, format!("{XML_DECLARATION}<S/>"));
    }

    #[test]
    fn test_parse_failure_is_an_error() {
        assert!(rehydrate(&FlatModel::new(), "<S>").is_err());
    }
}
