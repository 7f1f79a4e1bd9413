//! Read the product fixtures in testdata/products and map them.

use catalog_csv::{CsvConfig, CsvRecordReader, ProductCsvWriter};
use catalog_mapping::{MappingConfiguration, ProductMapper};
use catalog_model::{Decimal, Product, ProductField};
use std::path::PathBuf;

fn fixture(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata/products")
        .join(file_name)
}

fn read_products(file_name: &str, mapping: &MappingConfiguration) -> Vec<Product> {
    let path = fixture(file_name);
    let reader = CsvRecordReader::from_path(&path, &CsvConfig::for_mapping(mapping))
        .unwrap_or_else(|err| panic!("failed to open {}: {}", path.display(), err));
    let mapper = ProductMapper::new(mapping);
    reader
        .map(|record| mapper.map_record(&record.expect("fixture rows are well formed")))
        .collect()
}

#[test]
fn property_values_are_mapped() {
    let mapping = MappingConfiguration::default_configuration()
        .with_csv_columns(["Sku"])
        .with_property_columns(["ProductProperty", "ProductProperty_Multivalue"])
        .with_delimiter(',');

    let products = read_products("product-propertyvalues.csv", &mapping);
    assert_eq!(products.len(), 2);

    let first: Vec<_> = products[0]
        .property_values
        .iter()
        .map(|p| (p.property_name.as_str(), p.value.as_str()))
        .collect();
    assert_eq!(
        first,
        vec![
            ("ProductProperty", "Product-1-propertyvalue-test"),
            (
                "ProductProperty_Multivalue",
                "Product-1-multivalue-1, Product-1-multivalue-2"
            ),
        ]
    );

    let last: Vec<_> = products[1]
        .property_values
        .iter()
        .map(|p| (p.property_name.as_str(), p.value.as_str()))
        .collect();
    assert_eq!(
        last,
        vec![
            ("ProductProperty", "Product-2-propertyvalue-test"),
            (
                "ProductProperty_Multivalue",
                "Product-2-multivalue-1, Product-2-multivalue-1, Product-2-multivalue-3"
            ),
        ]
    );
}

#[test]
fn product_properties_are_mapped() {
    let mapping = MappingConfiguration::default_configuration();
    let product = &read_products("product-productproperties.csv", &mapping)[0];

    assert_eq!(product.id, "429408");
    assert_eq!(product.sku, "CBLK21113");
    assert_eq!(product.name, "cblk21113-product-1");
    assert_eq!(product.category_id, "catId_1");
    assert_eq!(product.gtin, "GTIN_Value");
    assert_eq!(product.main_product_id, "mainprod_123");
    assert_eq!(product.vendor, "Vendor_value");
    assert_eq!(product.product_type, "ProductType_value");
    assert_eq!(product.shipping_type, "ShippingType_value");
    assert_eq!(product.download_type, "DownloadType_value");
    assert!(product.has_user_agreement);
    assert!(product.is_buyable);
    assert!(product.track_inventory);
}

#[test]
fn price_and_quantity_are_mapped() {
    let mapping = MappingConfiguration::default_configuration();
    let product = &read_products("product-productproperties-priceQuantity.csv", &mapping)[0];

    assert_eq!(product.list_price, "123.4");
    assert_eq!(product.price.list, Decimal::new(1234, 1));
    assert_eq!(product.sale_price, "456.7");
    assert_eq!(product.price.sale, Decimal::new(4567, 1));
    assert_eq!(product.currency, "EUR");
    assert_eq!(product.price.currency, "EUR");
    assert_eq!(product.quantity, "5");
    assert_eq!(product.inventory.in_stock_quantity, 5);
}

#[test]
fn seo_info_is_mapped() {
    let mapping = MappingConfiguration::default_configuration();
    let product = &read_products("product-productproperties-seoInfo.csv", &mapping)[0];

    assert_eq!(product.seo_url, "seo-slug-url");
    assert_eq!(product.seo_info.semantic_url, "seo-slug-url");
    assert_eq!(product.seo_title, "Seo_Title_Value");
    assert_eq!(product.seo_info.page_title, "Seo_Title_Value");
    assert_eq!(product.seo_description, "Seo_Descr_Value");
    assert_eq!(product.seo_info.meta_description, "Seo_Descr_Value");
}

#[test]
fn review_is_mapped() {
    let mapping = MappingConfiguration::default_configuration();
    let product = &read_products("product-productproperties-review.csv", &mapping)[0];

    assert_eq!(product.review, "Review_Content");
    assert_eq!(product.editorial_review.content, "Review_Content");
    assert_eq!(product.review_type, "ReviewType_Value");
    assert_eq!(product.editorial_review.review_type, "ReviewType_Value");
}

#[test]
fn category_path_is_mapped() {
    let mapping = MappingConfiguration::default_configuration();
    let product = &read_products("product-productproperties-categoryPath.csv", &mapping)[0];

    assert_eq!(product.category_path, "TestCategory1");
    assert_eq!(product.category.path, "TestCategory1");
}

#[test]
fn default_category_path_is_mapped() {
    let default_value = "Custom_category_path_value";
    let mut mapping = MappingConfiguration::default_configuration();
    let category_path = mapping
        .property_map_mut(ProductField::CategoryPath)
        .expect("CategoryPath entry");
    category_path.csv_column_name = None;
    category_path.custom_value = Some(default_value.to_string());

    let product = &read_products("product-productproperties-noCategoryPath.csv", &mapping)[0];

    assert_eq!(product.category_path, default_value);
    assert_eq!(product.category.path, default_value);
}

#[test]
fn semicolon_file_with_dirty_price() {
    let mapping = MappingConfiguration::default_configuration()
        .with_delimiter(';')
        .with_property_columns(["Color_Multivalue"]);
    let products = read_products("product-semicolon.csv", &mapping);

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Semicolon product");
    assert_eq!(products[0].price.list, Decimal::new(1999, 2));
    assert_eq!(products[0].property_values[0].value, "red, green");
    assert_eq!(products[1].list_price, "oops");
    assert_eq!(products[1].price.list, Decimal::ZERO);
    assert!(products[1].property_values.is_empty());
}

#[test]
fn exported_products_read_back_identically() -> anyhow::Result<()> {
    let mut mapping = MappingConfiguration::default_configuration();
    mapping.auto_map(&["Sku", "Name", "ListPrice", "Currency", "IsBuyable", "Color_Multivalue"]);

    let source = "Sku,Name,ListPrice,Currency,IsBuyable,Color_Multivalue\n\
                  X1,\"First, quoted\",10.50,EUR,True,\"red, blue\"\n\
                  X2,Second,,USD,no,\n";
    let mapper = ProductMapper::new(&mapping);
    let original: Vec<Product> = CsvRecordReader::from_reader(source.as_bytes(), &CsvConfig::default())?
        .map(|record| record.map(|r| mapper.map_record(&r)))
        .collect::<Result<_, _>>()?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("export.csv");
    ProductCsvWriter::new(&mapping).write_path(&path, &original)?;

    let reread: Vec<Product> = CsvRecordReader::from_path(&path, &CsvConfig::default())?
        .map(|record| record.map(|r| mapper.map_record(&r)))
        .collect::<Result<_, _>>()?;

    // Flags are written in normalized form, everything else verbatim
    assert_eq!(reread, original);
    assert_eq!(reread[0].price.list, Decimal::new(1050, 2));
    assert!(reread[0].is_buyable);
    assert!(!reread[1].is_buyable);
    Ok(())
}
