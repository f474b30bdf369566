//! Integration tests for the catalog query engine against the sample
//! fixture set (four categories, eight products priced in RWF).

use testresult::TestResult;

use shopfront::{
    fixtures::Fixture,
    products::Product,
    query::{CatalogQuery, CategorySelection, FilterConfig, PriceRange, SortKey},
};

fn ids(products: &[&Product<'_>]) -> Vec<String> {
    products.iter().map(|product| product.id.clone()).collect()
}

#[test]
fn default_config_returns_catalog_order() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let result = query.run(&FilterConfig::default());

    assert_eq!(ids(&result), ["1", "2", "3", "4", "5", "6", "7", "8"]);

    Ok(())
}

#[test]
fn electronics_under_price_cap_sorted_by_price() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    // Excludes the 1,850,000 RWF laptop; the printer (450,000) comes
    // before the camera (1,200,000).
    let config = FilterConfig {
        categories: CategorySelection::from_ids(&["electronics"]),
        price: PriceRange::new(0, 1_500_000)?,
        sort: SortKey::PriceAscending,
    };

    assert_eq!(ids(&query.run(&config)), ["1", "3"]);

    Ok(())
}

#[test]
fn wider_price_cap_includes_the_laptop() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let config = FilterConfig {
        categories: CategorySelection::from_ids(&["electronics"]),
        price: PriceRange::new(0, 2_000_000)?,
        sort: SortKey::PriceAscending,
    };

    assert_eq!(ids(&query.run(&config)), ["1", "3", "2"]);

    Ok(())
}

#[test]
fn empty_category_selection_equals_price_only_filter() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let price = PriceRange::new(10_000, 40_000)?;

    let unselected = query.run(&FilterConfig {
        price,
        ..FilterConfig::default()
    });
    let all_selected = query.run(&FilterConfig {
        categories: CategorySelection::from_ids(&["printing", "office", "electronics", "branding"]),
        price,
        ..FilterConfig::default()
    });

    assert_eq!(ids(&unselected), ids(&all_selected));
    assert_eq!(ids(&unselected), ["4", "5", "6", "8"]);

    Ok(())
}

#[test]
fn price_sorts_reverse_each_other_without_ties() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    // Sample prices are all distinct, so descending is exactly the
    // reverse of ascending.
    let ascending = query.run(&FilterConfig {
        sort: SortKey::PriceAscending,
        ..FilterConfig::default()
    });
    let descending = query.run(&FilterConfig {
        sort: SortKey::PriceDescending,
        ..FilterConfig::default()
    });

    let mut reversed = ids(&descending);
    reversed.reverse();

    assert_eq!(ids(&ascending), reversed);

    Ok(())
}

#[test]
fn rating_sort_puts_highest_rated_first() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let result = query.run(&FilterConfig {
        sort: SortKey::RatingDescending,
        ..FilterConfig::default()
    });

    // 4.9 ties (laptop, business cards) keep catalog order.
    assert_eq!(ids(&result), ["2", "4", "1", "6", "3", "7", "5", "8"]);

    Ok(())
}

#[test]
fn impossible_price_range_yields_empty_result() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let config = FilterConfig {
        price: PriceRange::new(3_000_000, 4_000_000)?,
        ..FilterConfig::default()
    };

    assert!(query.run(&config).is_empty());

    Ok(())
}

#[test]
fn price_bounds_are_inclusive() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    // Bounds land exactly on the t-shirt (8,000) and banner (35,000) prices.
    let config = FilterConfig {
        price: PriceRange::new(8_000, 35_000)?,
        ..FilterConfig::default()
    };

    assert_eq!(ids(&query.run(&config)), ["4", "5", "6", "7", "8"]);

    Ok(())
}

#[test]
fn toggling_a_category_off_restores_the_full_set() -> TestResult {
    let catalog = Fixture::from_set("sample")?.catalog()?;
    let query = CatalogQuery::new(&catalog);

    let mut config = FilterConfig::default();

    config.categories.toggle("office");
    assert_eq!(ids(&query.run(&config)), ["5", "8"]);

    config.categories.toggle("office");
    assert_eq!(query.run(&config).len(), 8);

    Ok(())
}
