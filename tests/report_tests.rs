//! # Report Tests
//!
//! Loading stored variants from disk and rendering the check report.

use recipe_composer::report::{load_variant_file, render_report};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_variant(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_load_and_report_incomplete_variant() {
    let file = write_variant(
        r#"{
            "name": "Large",
            "type": "size",
            "sizeMultiplier": 1.5,
            "recipeId": ["r1"],
            "ingredients": [
                {
                    "sourceType": "inventory",
                    "sourceId": "flour-id",
                    "name": "Flour",
                    "quantity": 2,
                    "unit": "kg",
                    "convertToUnit": "g"
                },
                { "sourceType": "inventory", "sourceId": "", "quantity": null, "unit": "" }
            ]
        }"#,
    );

    let composer = load_variant_file(file.path()).unwrap();
    assert_eq!(composer.name(), "Large");
    assert_eq!(composer.ingredients().len(), 2);

    let report = render_report(&composer, None);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Variant: Large (size)");
    assert_eq!(lines[1], "Applies to: r1");
    assert!(lines[2].starts_with("1. 2 kg Flour"));
    assert_eq!(lines[3], "   convertible to: g, kg, oz, lb");
    assert!(lines[4].starts_with("2. "));
    assert!(lines[4].ends_with("missing: Item not selected, Quantity, Unit"));
    assert_eq!(*lines.last().unwrap(), "1 ingredient is incomplete");
}

#[test]
fn test_report_ready_in_french() {
    let file = write_variant(
        r#"{
            "Name": "Croûte fine",
            "Type": "crust",
            "CrustType": "thin",
            "Metadata": { "AppliesTo": ["r1"] }
        }"#,
    );

    let composer = load_variant_file(file.path()).unwrap();
    let report = render_report(&composer, Some("fr"));
    assert!(report.starts_with("Variante : Croûte fine (crust)"));
    assert!(report.contains("Aucun ingrédient supplémentaire"));
    assert!(report.ends_with("Prêt à enregistrer"));
}

#[test]
fn test_load_rejects_invalid_files() {
    let file = write_variant("not json");
    let err = load_variant_file(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("is not valid JSON"));

    let file = write_variant(r#"{ "name": "x", "type": "topping" }"#);
    assert!(load_variant_file(file.path()).is_err());

    let missing = std::path::Path::new("/nonexistent/variant.json");
    assert!(load_variant_file(missing).is_err());
}
