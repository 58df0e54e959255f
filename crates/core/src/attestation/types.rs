//! Attestation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dons_shared::types::DonationId;

/// The document variants that can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationKind {
    /// One attestation covering every donation of a donor for one year.
    SingleYear,
    /// One attestation for exactly one donation.
    SingleDonation,
    /// One thank-you letter per donation, over any mix of donors and years.
    Thanks,
}

impl AttestationKind {
    /// Returns the identifier used in file names and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleYear => "single_year",
            Self::SingleDonation => "single_donation",
            Self::Thanks => "thanks",
        }
    }
}

impl std::fmt::Display for AttestationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named fields consumed by the document template.
///
/// Built fresh for each document and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationContext {
    /// Opening salutation ("Chère Madame").
    pub salutation: String,
    /// Donor full name.
    pub full_name: String,
    /// Address slot 1: complement.
    pub address_l1: String,
    /// Address slot 2: street and number.
    pub address_l2: String,
    /// Address slot 3: second complement.
    pub address_l3: String,
    /// Address slot 4: postal code and city.
    pub address_l4: String,
    /// Non-empty address lines, in slot order.
    pub address: Vec<String>,
    /// Generation date ("mars 2024").
    pub date: String,
    /// Amount covered by the document.
    pub total_amount: Decimal,
    /// `total_amount` formatted for printing.
    pub total_amount_str: String,
    /// Currency code printed next to the amount ("CHF").
    pub currency: String,
    /// Year covered by the document.
    pub current_year: i32,
    /// The year before `current_year`.
    pub previous_year: i32,
    /// Complement text of the (first) donation.
    pub complement: String,
}

/// The result of the build phase.
///
/// `content` goes to the renderer; `to_mark` goes to
/// [`AttestationService::commit`](super::AttestationService::commit) once the
/// document exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationDraft<T> {
    /// Which document this draft is for.
    pub kind: AttestationKind,
    /// Context or contexts to render.
    pub content: T,
    /// Donations to flag as sent after rendering. Never contains a donation
    /// that was already flagged when the draft was built.
    pub to_mark: Vec<DonationId>,
}

impl AttestationDraft<AttestationContext> {
    /// Returns the draft content as a slice of contexts.
    #[must_use]
    pub fn contexts(&self) -> &[AttestationContext] {
        std::slice::from_ref(&self.content)
    }
}

impl AttestationDraft<Vec<AttestationContext>> {
    /// Returns the draft content as a slice of contexts.
    #[must_use]
    pub fn contexts(&self) -> &[AttestationContext] {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(year: i32) -> AttestationContext {
        AttestationContext {
            salutation: "Cher Docteur".to_string(),
            full_name: "Dr Paul Martin".to_string(),
            address_l1: String::new(),
            address_l2: "Rue du Lac 12".to_string(),
            address_l3: String::new(),
            address_l4: "1000 Lausanne".to_string(),
            address: vec!["Rue du Lac 12".to_string(), "1000 Lausanne".to_string()],
            date: "mars 2024".to_string(),
            total_amount: Decimal::new(123_450, 2),
            total_amount_str: "1'234.50".to_string(),
            currency: "CHF".to_string(),
            current_year: year,
            previous_year: year - 1,
            complement: String::new(),
        }
    }

    #[test]
    fn test_context_serializes_named_fields() {
        let json = serde_json::to_value(context(2023)).unwrap();
        assert_eq!(json["salutation"], "Cher Docteur");
        assert_eq!(json["address_l4"], "1000 Lausanne");
        assert_eq!(json["total_amount"], "1234.50");
        assert_eq!(json["total_amount_str"], "1'234.50");
        assert_eq!(json["currency"], "CHF");
        assert_eq!(json["previous_year"], 2022);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_value(AttestationKind::SingleDonation).unwrap();
        assert_eq!(json, "single_donation");
        assert_eq!(AttestationKind::Thanks.to_string(), "thanks");
    }

    #[test]
    fn test_draft_contexts_as_slice() {
        let id = DonationId::new();
        let single = AttestationDraft {
            kind: AttestationKind::SingleYear,
            content: context(2024),
            to_mark: vec![id],
        };
        assert_eq!(single.contexts().len(), 1);

        let batch = AttestationDraft {
            kind: AttestationKind::Thanks,
            content: vec![context(2023), context(2024)],
            to_mark: vec![id],
        };
        assert_eq!(batch.contexts()[1].current_year, 2024);
    }
}
