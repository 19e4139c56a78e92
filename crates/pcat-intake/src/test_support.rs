use pcat_core::{parse_rules, Category, Rules, PRODUCT_CATEGORY};

use crate::mapping::{ImageMapping, MappingEntry, ProductImages};
use crate::spreadsheet::Spreadsheet;

pub(crate) fn rules() -> Rules {
    parse_rules(include_str!("../../../config/rules.yaml")).unwrap()
}

pub(crate) fn product_category(id: &str) -> Category {
    Category {
        id: Some(id.to_string()),
        title: Some("Фет бърнъри".to_string()),
        kind: Some(PRODUCT_CATEGORY.to_string()),
        products: Some(Vec::new()),
        ..Category::default()
    }
}

/// Rows for archives 24527 and 31 from the supplier sheet.
pub(crate) fn sheet() -> Spreadsheet {
    let rows = [
        ["Product", "Image", "Price", "Label"],
        [
            "Nutriversum Thermo Caps [120 капсули] [30 Дози]",
            "https://cdn.example.bg/p24527/main.jpg",
            "45,90 лв.",
            "https://cdn.example.bg/p24527/supp-factsf9e51.jpg",
        ],
        [
            "Nutrex Lipo 6 [120 капсули] [60 дози]",
            "https://cdn.example.bg/p31/main.jpg",
            "по запитване",
            "",
        ],
    ];
    Spreadsheet::from_records(
        rows.iter()
            .map(|r| r.iter().map(|c| (*c).to_string()).collect()),
        "test",
    )
    .unwrap()
}

/// Public base the tests link extracted images under.
pub(crate) const IMAGES_BASE_URL: &str = "/images/products";

pub(crate) fn mapping_with(ids: &[&str]) -> ImageMapping {
    let mut mapping = ImageMapping::default();
    for id in ids {
        let dir = format!("product_{id}");
        mapping.insert(
            *id,
            MappingEntry {
                product_name: format!("product_{id}"),
                product_dir: dir.clone(),
                images: ProductImages {
                    main: vec![format!("{dir}/front.jpg"), format!("{dir}/side.jpg")],
                    label: vec![format!("{dir}/supp-facts.jpg")],
                },
            },
        );
    }
    mapping
}
