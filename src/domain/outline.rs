//! Presentation outlines and extraction of outlines from model replies.

use serde_json::Value;

use crate::domain::AppError;

/// One planned slide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineItem {
    pub title: String,
    pub points: Vec<String>,
}

impl OutlineItem {
    pub fn new(title: impl Into<String>, points: Vec<String>) -> Self {
        Self { title: title.into(), points }
    }
}

/// Ordered slides; the order is the slide order of the deck.
pub type Outline = Vec<OutlineItem>;

/// Extract an outline from a raw model reply.
///
/// The reply may carry commentary around the JSON array and may be wrapped in a
/// code fence. Everything from the first `[` to the last `]` is parsed; the
/// result must be an array of objects.
pub fn parse_outline_response(raw: &str) -> Result<Outline, AppError> {
    let unfenced = strip_code_fence(raw.trim());

    let (start, end) = match (unfenced.find('['), unfenced.rfind(']')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(AppError::OutlineParse(
                "no JSON array found in model response".to_string(),
            ));
        }
    };
    let json = &unfenced[start..=end];

    let value: Value = serde_json::from_str(json)
        .map_err(|e| AppError::OutlineParse(format!("invalid JSON: {}", e)))?;

    let Value::Array(elements) = value else {
        return Err(AppError::OutlineParse("expected a JSON array".to_string()));
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(_) => Ok(outline_item_from_value(element)),
            other => Err(AppError::OutlineParse(format!(
                "element {} is not an object: {}",
                index, other
            ))),
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

fn outline_item_from_value(value: &Value) -> OutlineItem {
    let title = value.get("title").and_then(Value::as_str).unwrap_or_default().to_string();

    let points = value
        .get("points")
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(|point| match point {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    Value::Bool(flag) => Some(flag.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    OutlineItem { title, points }
}
