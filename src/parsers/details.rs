use crate::config::SelectorRules;
use crate::error::CrawlError;
use crate::parsers::clean;
use crate::parsers::{RawPage, compile_selector, element_text};
use crate::results::ProductRecord;
use scraper::{Html, Selector};

/// Ordered selectors for one field; the first one with text wins
#[derive(Debug)]
struct FallbackChain {
    rules: Vec<Selector>,
}

impl FallbackChain {
    fn compile(selectors: &[String]) -> Result<Self, CrawlError> {
        let rules = selectors
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Text of the first match of the first rule that yields any
    fn resolve(&self, doc: &Html) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            doc.select(rule)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
    }
}

/// Extracts a [`ProductRecord`] from a rendered product page
#[derive(Debug)]
pub struct DetailExtractor {
    name: FallbackChain,
    brand: FallbackChain,
    breadcrumb: Selector,
    sale_price: FallbackChain,
    mrp: FallbackChain,
    rating: FallbackChain,
    reviews: FallbackChain,
    category_keywords: Vec<String>,
}

impl Default for DetailExtractor {
    fn default() -> Self {
        Self::new(&SelectorRules::default()).expect("Default selectors should be valid")
    }
}

impl DetailExtractor {
    /// Compile every selector up front so a bad rule fails before crawling
    pub fn new(rules: &SelectorRules) -> Result<Self, CrawlError> {
        Ok(Self {
            name: FallbackChain::compile(&rules.name)?,
            brand: FallbackChain::compile(&rules.brand)?,
            breadcrumb: compile_selector(&rules.breadcrumb)?,
            sale_price: FallbackChain::compile(&rules.sale_price)?,
            mrp: FallbackChain::compile(&rules.mrp)?,
            rating: FallbackChain::compile(&rules.rating)?,
            reviews: FallbackChain::compile(&rules.reviews)?,
            category_keywords: rules.category_keywords.clone(),
        })
    }

    /// Build a record from the page. Missing fields are left as `None`; only a
    /// page with no markup at all is an error.
    pub fn extract_details(&self, page: &RawPage) -> Result<ProductRecord, CrawlError> {
        if page.html.trim().is_empty() {
            return Err(CrawlError::EmptyPage {
                url: page.url.clone(),
            });
        }

        let doc = Html::parse_document(&page.html);
        if !doc.errors.is_empty() {
            ::log::trace!("{} recovered {} markup errors", page.url, doc.errors.len());
        }

        let name = self.name.resolve(&doc);
        let brand = self
            .brand
            .resolve(&doc)
            .or_else(|| name.as_deref().and_then(clean::first_token));
        let category_type = self.category(&doc, name.as_deref());

        Ok(ProductRecord {
            mrp: self.mrp.resolve(&doc).as_deref().and_then(clean::clean_money),
            sale_price: self
                .sale_price
                .resolve(&doc)
                .as_deref()
                .and_then(clean::clean_money),
            rating: self.rating.resolve(&doc).as_deref().and_then(clean::clean_rating),
            review_count: self
                .reviews
                .resolve(&doc)
                .as_deref()
                .and_then(clean::clean_review_count),
            name,
            brand,
            category_type,
            source_url: page.url.clone(),
        })
    }

    /// Last breadcrumb entry when the trail has two or more links, else a
    /// keyword from the name
    fn category(&self, doc: &Html, name: Option<&str>) -> Option<String> {
        let trail = doc.select(&self.breadcrumb).collect::<Vec<_>>();
        if trail.len() >= 2 {
            return trail
                .last()
                .map(|a| element_text(*a))
                .filter(|text| !text.is_empty());
        }

        name.and_then(|n| clean::match_keyword(n, &self.category_keywords))
    }
}
