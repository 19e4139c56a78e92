use pcat_core::{parse_rules, Category, Product, Rules, PRODUCT_CATEGORY};

pub(crate) fn rules() -> Rules {
    parse_rules(include_str!("../../../config/rules.yaml")).unwrap()
}

pub(crate) fn product(id: &str, name: &str) -> Product {
    let mut product = Product {
        product_id: id.to_string(),
        ..Product::default()
    };
    product.public_data.name.set(name.to_string());
    product
}

pub(crate) fn category(id: &str, title: &str, products: Vec<Product>) -> Category {
    Category {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        kind: Some(PRODUCT_CATEGORY.to_string()),
        products: Some(products),
        ..Category::default()
    }
}
