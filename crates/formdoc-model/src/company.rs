use serde::{Deserialize, Serialize};

/// Company branding printed in document headers and footers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub vat_number: String,
    /// Operator/approval certificate number.
    #[serde(alias = "easaNumber")]
    pub approval_number: String,
    /// Legal text printed bottom-left on every page.
    #[serde(alias = "legalFooter")]
    pub legal_text: String,
    /// Logo as a `data:` URL or bare base64 payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl CompanySettings {
    /// Address, contact and registration numbers joined on one line, or
    /// `None` when all of them are blank.
    pub fn registration_line(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        for value in [&self.address, &self.contact] {
            let value = value.trim();
            if !value.is_empty() {
                parts.push(value.to_string());
            }
        }
        if !self.vat_number.trim().is_empty() {
            parts.push(format!("VAT: {}", self.vat_number.trim()));
        }
        if !self.approval_number.trim().is_empty() {
            parts.push(format!("Approval: {}", self.approval_number.trim()));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }

    pub fn visible_legal_text(&self) -> Option<&str> {
        Some(self.legal_text.trim()).filter(|text| !text.is_empty())
    }
}
