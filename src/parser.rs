//! Turns a delimiter-separated completion into gift cards.
//!
//! Each segment between `%%%` markers is one suggestion. Within a segment,
//! every line is classified by its label and folded into an accumulator;
//! the last line carrying a given label wins.

use log::{debug, info};

use crate::model::{image_lookup_url, GiftSuggestion, DEFAULT_IMAGE_LOOKUP_TEMPLATE};

pub const SUGGESTION_DELIMITER: &str = "%%%";

const PRODUCT_NAME_LABEL: &str = "Product Name:";
const DESCRIPTION_LABEL: &str = "Description:";
const URL_LABEL: &str = "URL:";

/// A single trimmed line of a suggestion segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    ProductName(&'a str),
    Description(&'a str),
    Url(&'a str),
    Unrecognized,
}

impl<'a> ParsedLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(PRODUCT_NAME_LABEL) {
            ParsedLine::ProductName(rest.trim())
        } else if let Some(rest) = line.strip_prefix(DESCRIPTION_LABEL) {
            ParsedLine::Description(rest.trim())
        } else if let Some(rest) = line.strip_prefix(URL_LABEL) {
            ParsedLine::Url(rest.trim())
        } else {
            ParsedLine::Unrecognized
        }
    }
}

#[derive(Debug, Default)]
struct SuggestionFields<'a> {
    product_name: &'a str,
    description: &'a str,
    url: &'a str,
}

impl<'a> SuggestionFields<'a> {
    fn apply(mut self, line: ParsedLine<'a>) -> Self {
        match line {
            ParsedLine::ProductName(value) => self.product_name = value,
            ParsedLine::Description(value) => self.description = value,
            ParsedLine::Url(value) => self.url = value,
            ParsedLine::Unrecognized => {}
        }
        self
    }
}

/// Parser for model responses, carrying the image lookup template
#[derive(Debug, Clone)]
pub struct ResponseParser {
    image_lookup_template: String,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_LOOKUP_TEMPLATE)
    }
}

impl ResponseParser {
    pub fn new(image_lookup_template: impl Into<String>) -> Self {
        Self {
            image_lookup_template: image_lookup_template.into(),
        }
    }

    /// Parse a raw completion. Never fails; missing labels become empty strings.
    pub fn parse(&self, raw: &str) -> Vec<GiftSuggestion> {
        let suggestions: Vec<GiftSuggestion> = raw
            .split(SUGGESTION_DELIMITER)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .enumerate()
            .map(|(index, segment)| self.parse_segment(index, segment))
            .collect();

        info!("Parsed {} gift suggestions", suggestions.len());
        suggestions
    }

    fn parse_segment(&self, index: usize, segment: &str) -> GiftSuggestion {
        let fields = segment
            .lines()
            .map(ParsedLine::classify)
            .fold(SuggestionFields::default(), SuggestionFields::apply);

        if fields.product_name.is_empty() {
            debug!("Suggestion {} has no product name", index);
        }

        GiftSuggestion {
            index,
            product_name: fields.product_name.to_string(),
            description: fields.description.to_string(),
            url: fields.url.to_string(),
            image_url: image_lookup_url(&self.image_lookup_template, fields.product_name),
        }
    }
}

/// Parse with the default image lookup template.
pub fn parse_suggestions(raw: &str) -> Vec<GiftSuggestion> {
    ResponseParser::default().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        assert_eq!(
            ParsedLine::classify("  Product Name:  Echo Dot "),
            ParsedLine::ProductName("Echo Dot")
        );
        assert_eq!(
            ParsedLine::classify("Description: nice"),
            ParsedLine::Description("nice")
        );
        assert_eq!(
            ParsedLine::classify("URL: https://x.test"),
            ParsedLine::Url("https://x.test")
        );
        assert_eq!(ParsedLine::classify("Price: 20"), ParsedLine::Unrecognized);
        assert_eq!(ParsedLine::classify(""), ParsedLine::Unrecognized);
    }

    #[test]
    fn test_labels_are_case_sensitive_prefixes() {
        assert_eq!(
            ParsedLine::classify("product name: lower"),
            ParsedLine::Unrecognized
        );
        assert_eq!(
            ParsedLine::classify("1. Product Name: numbered"),
            ParsedLine::Unrecognized
        );
    }

    #[test]
    fn test_two_suggestions_in_order() {
        let raw = "Product Name: A\nDescription: B\nURL: C%%%Product Name: D\nDescription: E\nURL: F";
        let gifts = parse_suggestions(raw);

        assert_eq!(gifts.len(), 2);
        assert_eq!(gifts[0].index, 0);
        assert_eq!(gifts[0].product_name, "A");
        assert_eq!(gifts[0].description, "B");
        assert_eq!(gifts[0].url, "C");
        assert_eq!(gifts[1].index, 1);
        assert_eq!(gifts[1].product_name, "D");
        assert_eq!(gifts[1].description, "E");
        assert_eq!(gifts[1].url, "F");
    }

    #[test]
    fn test_whitespace_segments_are_dropped() {
        assert!(parse_suggestions("   %%%   ").is_empty());
        assert!(parse_suggestions("").is_empty());
        assert!(parse_suggestions("%%%%%%\n%%%").is_empty());
    }

    #[test]
    fn test_index_skips_empty_segments() {
        let gifts = parse_suggestions("%%%\nProduct Name: First\n%%%  %%%Product Name: Second%%%");
        assert_eq!(gifts.len(), 2);
        assert_eq!(gifts[0].index, 0);
        assert_eq!(gifts[1].index, 1);
        assert_eq!(gifts[1].product_name, "Second");
    }

    #[test]
    fn test_no_delimiter_single_record() {
        let gifts = parse_suggestions("Product Name: Solo\nDescription: only one");
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].product_name, "Solo");

        let again = parse_suggestions(&format!(
            "Product Name: {}\nDescription: {}",
            gifts[0].product_name, gifts[0].description
        ));
        assert_eq!(again.len(), 1);
        assert_eq!(again[0], gifts[0]);
    }

    #[test]
    fn test_last_label_wins() {
        let gifts = parse_suggestions("Product Name: Old\nProduct Name: New\nURL: u1\nURL: u2");
        assert_eq!(gifts[0].product_name, "New");
        assert_eq!(gifts[0].url, "u2");
    }

    #[test]
    fn test_malformed_segment_has_blank_fields() {
        let gifts = parse_suggestions("Here are some ideas I came up with!");
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].product_name, "");
        assert_eq!(gifts[0].description, "");
        assert_eq!(gifts[0].url, "");
        assert_eq!(
            gifts[0].image_url,
            "https://source.unsplash.com/featured/?gift,"
        );
    }

    #[test]
    fn test_url_label_keeps_colons_in_value() {
        let gifts = parse_suggestions("URL: https://www.amazon.sa/dp/B07FZ8S74R");
        assert_eq!(gifts[0].url, "https://www.amazon.sa/dp/B07FZ8S74R");
    }

    #[test]
    fn test_image_url_from_product_name() {
        let gifts = parse_suggestions("Product Name: Echo Dot\nDescription: speaker");
        assert!(gifts[0].image_url.contains("Echo"));
        assert!(!gifts[0].image_url.contains("Dot"));
    }

    #[test]
    fn test_custom_image_template() {
        let parser = ResponseParser::new("https://img.test/{token}.png");
        let gifts = parser.parse("Product Name: Yoga Mat");
        assert_eq!(gifts[0].image_url, "https://img.test/Yoga.png");
    }

    #[test]
    fn test_crlf_lines() {
        let gifts = parse_suggestions("Product Name: Mug\r\nDescription: Ceramic\r\nURL: u\r\n");
        assert_eq!(gifts[0].product_name, "Mug");
        assert_eq!(gifts[0].description, "Ceramic");
        assert_eq!(gifts[0].url, "u");
    }
}
