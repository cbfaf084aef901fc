use crate::config::profile::SelectorConfig;
use crate::core::{PageParser, StockRecord};
use crate::utils::error::{Result, ScrapeError};
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::SelectorError {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Parser for "product form list" pages: each product is a run of
/// `group_size` sibling columns inside a row container.
#[derive(Debug)]
pub struct ProductFormParser {
    row: Selector,
    header: Option<Selector>,
    column: Selector,
    quantity_input: Selector,
    quantity_attr: String,
    group_size: usize,
    code_column: usize,
    quantity_column: usize,
}

impl ProductFormParser {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        let header = match config.header.trim() {
            "" => None,
            selector => Some(compile(selector)?),
        };

        Ok(Self {
            row: compile(&config.row)?,
            header,
            column: compile(&config.column)?,
            quantity_input: compile(&config.quantity_input)?,
            quantity_attr: config.quantity_attr.clone(),
            group_size: config.group_size.max(1),
            code_column: config.code_column,
            quantity_column: config.quantity_column,
        })
    }

    /// True for header cells and anything nested in one, up to `row`.
    fn in_header(&self, element: ElementRef, row: ElementRef) -> bool {
        let Some(header) = &self.header else {
            return false;
        };
        if header.matches(&element) {
            return true;
        }
        element
            .ancestors()
            .take_while(|node| node.id() != row.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| header.matches(&ancestor))
    }

    fn product_code<'a>(column: ElementRef<'a>) -> Option<&'a str> {
        column.text().flat_map(str::split_whitespace).next()
    }

    fn quantity<'a>(&self, column: ElementRef<'a>) -> Option<&'a str> {
        column
            .select(&self.quantity_input)
            .next()
            .and_then(|input| input.value().attr(&self.quantity_attr))
    }
}

impl PageParser for ProductFormParser {
    fn parse(&self, html: &str, source_url: &str, scraped_at: DateTime<Utc>) -> Vec<StockRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for row in document.select(&self.row) {
            let columns: Vec<ElementRef> = row
                .select(&self.column)
                .filter(|column| !self.in_header(*column, row))
                .collect();

            for (index, group) in columns.chunks(self.group_size).enumerate() {
                let Some(code) = group.get(self.code_column).and_then(|c| Self::product_code(*c))
                else {
                    continue;
                };

                let raw_quantity = group
                    .get(self.quantity_column)
                    .and_then(|column| self.quantity(*column));

                match raw_quantity.map(|q| q.trim().parse::<u64>()) {
                    Some(Ok(quantity)) => {
                        records.push(StockRecord::new(code, quantity, source_url, scraped_at));
                    }
                    Some(Err(_)) => {
                        tracing::warn!(
                            "⚠️ {}: group {} ({}) has non-numeric quantity {:?}, skipping",
                            source_url,
                            index,
                            code,
                            raw_quantity.unwrap_or_default()
                        );
                    }
                    None => {
                        tracing::warn!(
                            "⚠️ {}: group {} ({}) has no quantity field, skipping",
                            source_url,
                            index,
                            code
                        );
                    }
                }
            }
        }

        tracing::debug!("Parsed {} records from {}", records.len(), source_url);
        records
    }
}
