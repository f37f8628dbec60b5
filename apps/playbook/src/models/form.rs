use serde::{Deserialize, Serialize};

/// Customer query categories offered by the form.
///
/// The serde names are the display labels, so form posts and JSON bodies carry
/// exactly what the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryType {
    #[default]
    #[serde(rename = "Late Delivery")]
    LateDelivery,
    #[serde(rename = "Billing Issues")]
    BillingIssues,
    #[serde(rename = "Technical Glitches")]
    TechnicalGlitches,
    #[serde(rename = "Product Defect")]
    ProductDefect,
    #[serde(rename = "Refund Request")]
    RefundRequest,
    Other,
}

impl QueryType {
    pub const ALL: [QueryType; 6] = [
        QueryType::LateDelivery,
        QueryType::BillingIssues,
        QueryType::TechnicalGlitches,
        QueryType::ProductDefect,
        QueryType::RefundRequest,
        QueryType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QueryType::LateDelivery => "Late Delivery",
            QueryType::BillingIssues => "Billing Issues",
            QueryType::TechnicalGlitches => "Technical Glitches",
            QueryType::ProductDefect => "Product Defect",
            QueryType::RefundRequest => "Refund Request",
            QueryType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Friendly,
    Formal,
    Empathetic,
    Apologetic,
    Neutral,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Friendly,
        Tone::Formal,
        Tone::Empathetic,
        Tone::Apologetic,
        Tone::Neutral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
            Tone::Empathetic => "Empathetic",
            Tone::Apologetic => "Apologetic",
            Tone::Neutral => "Neutral",
        }
    }
}

/// Ticket priority. Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Everything the user enters before pressing "Generate".
///
/// `custom_query` only matters when `query_type` is [`QueryType::Other`];
/// the prompt builder ignores it otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub query_type: QueryType,
    #[serde(default)]
    pub custom_query: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub read_aloud: bool,
}

impl FormInput {
    /// Presence check gating the generate action.
    pub fn has_product(&self) -> bool {
        !self.product.trim().is_empty()
    }
}

/// Raw urlencoded body of the page's generate form.
///
/// Checkboxes are only sent when ticked, so `read_aloud` arrives as `Some("on")`
/// or not at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub query_type: QueryType,
    #[serde(default)]
    pub custom_query: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub priority: Priority,
    pub read_aloud: Option<String>,
}

impl From<GenerateForm> for FormInput {
    fn from(form: GenerateForm) -> Self {
        FormInput {
            product: form.product,
            company: form.company,
            query_type: form.query_type,
            custom_query: form.custom_query,
            tone: form.tone,
            priority: form.priority,
            read_aloud: form.read_aloud.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_deserializes_from_display_label() {
        let q: QueryType = serde_json::from_str("\"Refund Request\"").unwrap();
        assert_eq!(q, QueryType::RefundRequest);
        assert_eq!(q.label(), "Refund Request");
    }

    #[test]
    fn test_labels_match_serde_names() {
        for q in QueryType::ALL {
            let json = serde_json::to_string(&q).unwrap();
            assert_eq!(json, format!("\"{}\"", q.label()));
        }
        for t in Tone::ALL {
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.label()));
        }
        for p in Priority::ALL {
            assert_eq!(serde_json::to_string(&p).unwrap(), format!("\"{}\"", p.label()));
        }
    }

    #[test]
    fn test_priority_is_ordered() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_form_input_defaults_match_form() {
        let input: FormInput = serde_json::from_str(r#"{"product": "SmartHome App"}"#).unwrap();
        assert_eq!(input.query_type, QueryType::LateDelivery);
        assert_eq!(input.tone, Tone::Friendly);
        assert_eq!(input.priority, Priority::Medium);
        assert!(!input.read_aloud);
        assert!(input.company.is_empty());
    }

    #[test]
    fn test_missing_product_deserializes_as_absent() {
        let input: FormInput = serde_json::from_str(r#"{"company": "HomeTech"}"#).unwrap();
        assert!(input.product.is_empty());
        assert!(!input.has_product());
    }

    #[test]
    fn test_whitespace_product_is_absent() {
        let input = FormInput {
            product: "   ".to_string(),
            ..Default::default()
        };
        assert!(!input.has_product());
    }

    #[test]
    fn test_checkbox_maps_to_read_aloud() {
        let form = GenerateForm {
            product: "App".to_string(),
            read_aloud: Some("on".to_string()),
            ..Default::default()
        };
        let input = FormInput::from(form);
        assert!(input.read_aloud);

        let input = FormInput::from(GenerateForm::default());
        assert!(!input.read_aloud);
    }
}
