use crate::config::SelectorRules;
use crate::error::CrawlError;
use crate::parsers::{DetailExtractor, RawPage};

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.flipkart.com/libas-dress/p/itm1";

    fn extract(body: &str) -> crate::results::ProductRecord {
        let page = RawPage::new(URL, format!("<html><body>{}</body></html>", body));
        DetailExtractor::default().extract_details(&page).unwrap()
    }

    #[test]
    fn test_full_product_page() {
        let html = r#"
            <a class="_2whKao" href="/">Home</a>
            <a class="_2whKao" href="/clothing">Clothing</a>
            <a class="_2whKao" href="/dresses">Women's Dresses</a>
            <span class="mEh187">Libas</span>
            <span class="VU-ZEz">Women Fit and Flare Blue Dress</span>
            <div class="Nx9bqj">₹899</div>
            <div class="yRaY8j">₹2,499</div>
            <div class="XQDdHH _1Quie7">4.1<img src="star.svg"></div>
            <span class="_2_R_DZ"><span>8,310 Ratings</span> <span>&amp;</span> <span>1,204 Reviews</span></span>
        "#;
        let record = extract(html);

        assert_eq!(record.name.as_deref(), Some("Women Fit and Flare Blue Dress"));
        assert_eq!(record.brand.as_deref(), Some("Libas"));
        assert_eq!(record.category_type.as_deref(), Some("Women's Dresses"));
        assert_eq!(record.sale_price, Some(899.0));
        assert_eq!(record.mrp, Some(2499.0));
        assert_eq!(record.rating, Some(4.1));
        assert_eq!(record.review_count, Some(1204));
        assert_eq!(record.source_url, URL);
    }

    #[test]
    fn test_second_priority_selector_is_used() {
        let record = extract(r#"<span class="B_NuCI">Only Old Markup</span>"#);
        assert_eq!(record.name.as_deref(), Some("Only Old Markup"));

        let record = extract(r#"<h1 class="yhB1nd">Third Variant</h1>"#);
        assert_eq!(record.name.as_deref(), Some("Third Variant"));

        let record = extract(r#"<div class="yRaY8j">₹1,299.00</div>"#);
        assert_eq!(record.mrp, Some(1299.0));
    }

    #[test]
    fn test_first_rule_wins_over_later_ones() {
        let html = r#"
            <h1 class="yhB1nd">Third</h1>
            <span class="B_NuCI">Second</span>
            <span class="VU-ZEz">First</span>"#;
        assert_eq!(extract(html).name.as_deref(), Some("First"));
    }

    #[test]
    fn test_empty_first_rule_falls_through() {
        let html = r#"<span class="VU-ZEz">   </span><span class="B_NuCI">Second</span>"#;
        assert_eq!(extract(html).name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_brand_falls_back_to_first_word_of_name() {
        let record = extract(r#"<span class="VU-ZEz">Sassafras Women Maxi Dress</span>"#);
        assert_eq!(record.brand.as_deref(), Some("Sassafras"));
    }

    #[test]
    fn test_everything_missing_degrades_to_none() {
        let record = extract("<p>Something went wrong</p>");
        assert_eq!(record.name, None);
        assert_eq!(record.brand, None);
        assert_eq!(record.category_type, None);
        assert_eq!(record.mrp, None);
        assert_eq!(record.sale_price, None);
        assert_eq!(record.rating, None);
        assert_eq!(record.review_count, None);
        assert_eq!(record.source_url, URL);
    }

    #[test]
    fn test_category_from_name_keyword_order() {
        let record = extract(r#"<span class="VU-ZEz">Women Bodycon Midi Dress</span>"#);
        assert_eq!(record.category_type.as_deref(), Some("Midi"));

        let record = extract(r#"<span class="VU-ZEz">Women Midi Maxi Dress</span>"#);
        assert_eq!(record.category_type.as_deref(), Some("Maxi"));
    }

    #[test]
    fn test_single_breadcrumb_uses_keyword_fallback() {
        let html = r#"
            <a class="_2whKao" href="/">Home</a>
            <span class="VU-ZEz">Women Gown</span>"#;
        assert_eq!(extract(html).category_type.as_deref(), Some("Gown"));
    }

    #[test]
    fn test_rating_with_extra_text_is_rejected() {
        let record = extract(r#"<div class="_3LWZlK">4.3 out of 5</div>"#);
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_reviews_without_reviews_token() {
        let record = extract(r#"<span class="_2_R_DZ">1,204 ratings</span>"#);
        assert_eq!(record.review_count, None);
    }

    #[test]
    fn test_blank_page_is_an_error() {
        let page = RawPage::new(URL, "  \n ");
        let err = DetailExtractor::default().extract_details(&page).unwrap_err();
        assert!(matches!(err, CrawlError::EmptyPage { .. }));
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let rules = SelectorRules {
            rating: vec!["div[".to_string()],
            ..SelectorRules::default()
        };
        let err = DetailExtractor::new(&rules).unwrap_err();
        assert!(matches!(err, CrawlError::Selector { .. }));
    }
}
