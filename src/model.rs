use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image lookup used when no template is configured. `{token}` is replaced
/// with the percent-encoded first word of the product name.
pub const DEFAULT_IMAGE_LOOKUP_TEMPLATE: &str = "https://source.unsplash.com/featured/?gift,{token}";

/// Messaging deep link the share text is appended to
pub const DEFAULT_SHARE_BASE_URL: &str = "https://api.whatsapp.com/send?text=";

/// A single gift card parsed from a model response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GiftSuggestion {
    /// Zero-based position among the non-empty response segments
    pub index: usize,
    pub product_name: String,
    pub description: String,
    pub url: String,
    /// Derived from the product name, never fetched
    pub image_url: String,
}

impl GiftSuggestion {
    /// Build the messaging deep link carrying the product text.
    pub fn share_url(&self, base_url: &str) -> String {
        let text = format!("{} - {} {}", self.product_name, self.description, self.url);
        format!("{}{}", base_url, urlencoding::encode(&text))
    }
}

/// Build the image lookup URL for a product name.
///
/// Only the first whitespace-delimited word is used. An empty name still
/// yields a URL with an empty token.
pub fn image_lookup_url(template: &str, product_name: &str) -> String {
    let token = product_name.split_whitespace().next().unwrap_or("");
    template.replace("{token}", &urlencoding::encode(token))
}

/// Event the gifts are meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Occasion {
    Eid,
    Graduation,
    Retirement,
    Promotion,
    Marriage,
}

/// Recipient's age bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum GiftCategory {
    Tech,
    Fashion,
    Home,
    Sports,
    Books,
    Other,
}

impl Occasion {
    pub const ALL: [Occasion; 5] = [
        Occasion::Eid,
        Occasion::Graduation,
        Occasion::Retirement,
        Occasion::Promotion,
        Occasion::Marriage,
    ];
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Child,
        AgeGroup::Teen,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];
}

impl GiftCategory {
    pub const ALL: [GiftCategory; 6] = [
        GiftCategory::Tech,
        GiftCategory::Fashion,
        GiftCategory::Home,
        GiftCategory::Sports,
        GiftCategory::Books,
        GiftCategory::Other,
    ];
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Occasion::Eid => "Eid",
            Occasion::Graduation => "Graduation",
            Occasion::Retirement => "Retirement",
            Occasion::Promotion => "Promotion",
            Occasion::Marriage => "Marriage",
        };
        f.write_str(label)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeGroup::Child => "Child (0-12)",
            AgeGroup::Teen => "Teen (13-18)",
            AgeGroup::Adult => "Adult (19-64)",
            AgeGroup::Senior => "Senior (65+)",
        };
        f.write_str(label)
    }
}

impl fmt::Display for GiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GiftCategory::Tech => "Tech",
            GiftCategory::Fashion => "Fashion",
            GiftCategory::Home => "Home",
            GiftCategory::Sports => "Sports",
            GiftCategory::Books => "Books",
            GiftCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Case-insensitive lookup against the first word of each display label,
/// so both `teen` and `Teen (13-18)` resolve.
fn parse_label<T: fmt::Display + Copy>(input: &str, options: &[T], kind: &str) -> Result<T, String> {
    let wanted = input.trim().to_lowercase();
    options
        .iter()
        .copied()
        .find(|option| {
            let label = option.to_string().to_lowercase();
            label == wanted || label.split_whitespace().next() == Some(wanted.as_str())
        })
        .ok_or_else(|| {
            let names: Vec<String> = options.iter().map(|o| o.to_string()).collect();
            format!("unknown {kind} '{input}', expected one of: {}", names.join(", "))
        })
}

impl FromStr for Occasion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &Occasion::ALL, "occasion")
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &AgeGroup::ALL, "age group")
    }
}

impl FromStr for GiftCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, &GiftCategory::ALL, "category")
    }
}

/// Form state collected before a request is made
#[derive(Debug, Clone, Default)]
pub struct GiftRequest {
    pub chat_text: String,
    pub num_gifts: u32,
    /// Raw budget text as entered; blank means no bound
    pub min_budget: Option<String>,
    pub max_budget: Option<String>,
    pub occasion: Option<Occasion>,
    pub age_group: Option<AgeGroup>,
    pub category: Option<GiftCategory>,
}
