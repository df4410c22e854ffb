use crate::model::GiftSuggestion;

/// Render gift cards as numbered text blocks, each with its share link.
pub fn format_cards(gifts: &[GiftSuggestion], share_base_url: &str) -> String {
    if gifts.is_empty() {
        return "No gift suggestions were returned. Try again with a longer chat.".to_string();
    }

    gifts
        .iter()
        .map(|gift| format_card(gift, share_base_url))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_card(gift: &GiftSuggestion, share_base_url: &str) -> String {
    let mut card = format!("{}. {}", gift.index + 1, or_placeholder(&gift.product_name));
    if !gift.description.is_empty() {
        card.push_str(&format!("\n   {}", gift.description));
    }
    if !gift.url.is_empty() {
        card.push_str(&format!("\n   Product: {}", gift.url));
    }
    card.push_str(&format!("\n   Image:   {}", gift.image_url));
    card.push_str(&format!("\n   Share:   {}", gift.share_url(share_base_url)));
    card
}

fn or_placeholder(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed gift)"
    } else {
        name
    }
}

/// Render gift cards as a JSON array, with share links included.
pub fn format_json(
    gifts: &[GiftSuggestion],
    share_base_url: &str,
) -> Result<String, serde_json::Error> {
    let cards: Vec<serde_json::Value> = gifts
        .iter()
        .map(|gift| -> Result<serde_json::Value, serde_json::Error> {
            let mut card = serde_json::to_value(gift)?;
            card["share_url"] = serde_json::Value::String(gift.share_url(share_base_url));
            Ok(card)
        })
        .collect::<Result<_, _>>()?;

    serde_json::to_string_pretty(&cards)
}
