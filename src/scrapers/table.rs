use crate::scrapers::markup::MarkupNode;
use tracing::{debug, warn};

/// Substrings that only show up inside the tips table markup
pub const TABLE_MARKERS: &[&str] = &["predictionsTable", "betting-tips"];

/// Header and separator rows have fewer cells than this
pub const MIN_ROW_CELLS: usize = 5;

/// Find the rows of the predictions table.
///
/// Uses the first table whose markup carries one of [`TABLE_MARKERS`]. When
/// no table matches, every row in the document is considered instead. In both
/// cases only rows with at least [`MIN_ROW_CELLS`] cells are kept; an empty
/// result means the page had nothing to scrape.
pub fn locate_rows<N: MarkupNode>(document: &N) -> Vec<N> {
    let candidates = match find_predictions_table(document) {
        Some(table) => {
            debug!("Found predictions table");
            query_or_empty(&table, "tr")
        }
        None => {
            warn!("Could not find predictions table on the page, scanning all rows");
            query_or_empty(document, "tr")
        }
    };

    candidates
        .into_iter()
        .filter(|row| cell_count(row) >= MIN_ROW_CELLS)
        .collect()
}

fn find_predictions_table<N: MarkupNode>(document: &N) -> Option<N> {
    query_or_empty(document, "table").into_iter().find(|table| {
        let markup = table.inner_markup();
        TABLE_MARKERS.iter().any(|marker| markup.contains(marker))
    })
}

fn cell_count<N: MarkupNode>(row: &N) -> usize {
    query_or_empty(row, "td").len()
}

fn query_or_empty<N: MarkupNode>(node: &N, selector: &str) -> Vec<N> {
    node.query(selector).unwrap_or_else(|e| {
        debug!("Query '{}' failed: {}", selector, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn row(cells: usize, label: &str) -> String {
        let tds: String = (0..cells).map(|i| format!("<td>{}{}</td>", label, i)).collect();
        format!("<tr>{}</tr>", tds)
    }

    #[test]
    fn test_locate_rows_in_marked_table() {
        let html = format!(
            "<html><body>\
             <table><tr><td>menu</td></tr>{}</table>\
             <table><tr class='predictionsTable'><th>Time</th></tr>{}{}{}</table>\
             </body></html>",
            row(6, "other"),
            row(10, "tip"),
            row(3, "short"),
            row(5, "tip"),
        );
        let doc = Html::parse_document(&html);
        let rows = locate_rows(&doc.root_element());

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.text_content().starts_with("tip0")));
    }

    #[test]
    fn test_locate_rows_marker_in_inner_markup() {
        // The marker sits on a cell, not on the table itself
        let html = format!(
            "<table>{}</table><table><tr><td class='betting-tips'>x</td></tr>{}</table>",
            row(5, "first"),
            row(7, "second"),
        );
        let doc = Html::parse_document(&html);
        let rows = locate_rows(&doc.root_element());

        assert_eq!(rows.len(), 1);
        assert!(rows[0].text_content().starts_with("second0"));
    }

    #[test]
    fn test_locate_rows_falls_back_to_whole_document() {
        let html = format!(
            "<table>{}{}</table><table>{}</table>",
            row(5, "a"),
            row(2, "b"),
            row(8, "c"),
        );
        let doc = Html::parse_document(&html);
        let rows = locate_rows(&doc.root_element());

        assert_eq!(rows.len(), 2);
        assert!(rows[0].text_content().starts_with("a0"));
        assert!(rows[1].text_content().starts_with("c0"));
    }

    #[test]
    fn test_locate_rows_nothing_found() {
        let html = format!("<p>no tables</p><table>{}</table>", row(4, "x"));
        let doc = Html::parse_document(&html);
        assert!(locate_rows(&doc.root_element()).is_empty());

        let doc = Html::parse_document("");
        assert!(locate_rows(&doc.root_element()).is_empty());
    }

    #[test]
    fn test_marked_table_without_data_rows_is_empty() {
        // A matching table restricts the search even if it has no usable rows
        let html = format!(
            "<table><tr class='predictionsTable'><th>h</th></tr>{}</table><table>{}</table>",
            row(2, "x"),
            row(9, "y"),
        );
        let doc = Html::parse_document(&html);
        assert!(locate_rows(&doc.root_element()).is_empty());
    }
}
