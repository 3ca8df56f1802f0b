use super::fake::{FakeFetcher, href};
use crate::Products;
use crate::error::CrawlError;
use crate::output::{CsvSink, Sink};
use crate::results::{COLUMNS, ProductRecord};

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps records in memory
    #[derive(Default)]
    struct VecSink {
        rows: Vec<ProductRecord>,
        writes: usize,
    }

    impl Sink for VecSink {
        fn write_all(&mut self, records: &[ProductRecord]) -> Result<(), CrawlError> {
            self.rows.extend_from_slice(records);
            self.writes += 1;
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn products(target_rows: usize) -> Products {
        let config = Products::new().config().clone().without_delays();
        Products::new()
            .with_config(config)
            .with_target_rows(target_rows)
    }

    #[tokio::test]
    async fn test_crawl_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/raw/women_dresses_raw.csv");
        let mut sink = CsvSink::new(&path);

        let summary = products(3)
            .run_with(FakeFetcher::endless(), &mut sink)
            .await
            .unwrap();
        assert_eq!(summary.records.len(), 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(lines.count(), 3);
    }

    #[tokio::test]
    async fn test_nothing_saved_after_fatal_error() {
        let mut fetcher = FakeFetcher::new(|_| vec![href("a")]);
        fetcher
            .lost_session
            .insert("https://www.flipkart.com/a/p/itm1".to_string());

        let mut sink = VecSink::default();
        let result = products(10).run_with(fetcher, &mut sink).await;

        assert!(result.is_err());
        assert_eq!(sink.writes, 0);
    }

    #[tokio::test]
    async fn test_bad_selector_fails_before_fetching() {
        let mut config = Products::new().config().clone().without_delays();
        config.selectors.name = vec!["span[".to_string()];

        let mut sink = VecSink::default();
        let result = Products::new()
            .with_config(config)
            .run_with(FakeFetcher::endless(), &mut sink)
            .await;

        assert!(matches!(result, Err(CrawlError::Selector { .. })));
        assert!(sink.rows.is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let products = Products::new()
            .with_query("kurta set")
            .with_max_pages(3)
            .with_target_rows(50)
            .with_output_path("out/kurtas.csv")
            .with_webdriver_url("http://localhost:9515");

        let config = products.config();
        assert_eq!(config.query, "kurta set");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.target_rows, 50);
        assert_eq!(config.output_path, std::path::PathBuf::from("out/kurtas.csv"));
        assert_eq!(config.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn test_config_str() {
        let products = Products::new()
            .with_config_str(r#"{"query": "saree", "max_pages": 4}"#)
            .unwrap();
        assert_eq!(products.config().query, "saree");
        assert_eq!(products.config().max_pages, 4);
        assert!(Products::new().with_config_str("not json").is_err());
    }
}
