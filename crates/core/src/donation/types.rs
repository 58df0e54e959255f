//! Donation domain types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dons_shared::types::{
    AddressId, AmountFormat, DonationId, DonationTypeId, DonorTypeId, PartyId,
};

/// Postal address of a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Address ID.
    pub id: AddressId,
    /// Street name.
    pub street: Option<String>,
    /// Street number.
    pub street_number: Option<String>,
    /// First complement line, printed above the street.
    pub complement: Option<String>,
    /// Second complement line, printed below the street.
    pub complement2: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// City.
    pub city: Option<String>,
}

/// A contact known to the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Party ID.
    pub id: PartyId,
    /// Full name, including any title ("Madame Anne Dupont").
    pub name: String,
    /// Addresses in host order; the first one is used on documents.
    pub addresses: Vec<Address>,
}

impl Party {
    /// Returns the full name as printed on documents.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.name.trim()
    }

    /// Returns the address used on documents.
    #[must_use]
    pub fn primary_address(&self) -> Option<&Address> {
        self.addresses.first()
    }
}

/// Donor extension of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorProfile {
    /// The party this profile extends.
    pub party_id: PartyId,
    /// Donor classification.
    pub donor_type: Option<DonorTypeId>,
    /// Whether the party is flagged as a donor.
    pub is_donor: bool,
}

/// Donor classification (private person, company, foundation...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorType {
    /// Donor type ID.
    pub id: DonorTypeId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
}

/// Type of donation.
///
/// Types can be deactivated; existing donations keep referencing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationType {
    /// Donation type ID.
    pub id: DonationTypeId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Whether the type is offered for new donations.
    pub active: bool,
}

/// A single dated gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    /// Donation ID.
    pub id: DonationId,
    /// Reference number.
    pub number: Option<String>,
    /// Date of the gift. The donation year is derived from it.
    pub date: NaiveDate,
    /// Donation type.
    pub donation_type: DonationTypeId,
    /// The donating party.
    pub donor: PartyId,
    /// Amount in the configured currency.
    pub amount: Decimal,
    /// Internal notes.
    pub notes: Option<String>,
    /// Free text printed on the documents.
    pub complement: Option<String>,
    /// Set once a document covering this donation has been produced.
    pub attestation_sent: bool,
    /// The donor asked not to receive an attestation.
    pub no_attestation: bool,
}

impl Donation {
    /// Returns the calendar year of the donation.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Returns the amount formatted for display.
    #[must_use]
    pub fn formatted_amount(&self, format: &AmountFormat) -> String {
        format.format(self.amount)
    }

    /// Returns true if an attestation still has to be sent for this donation.
    #[must_use]
    pub fn awaits_attestation(&self) -> bool {
        !self.attestation_sent && !self.no_attestation
    }

    /// Returns the complement text, empty when absent.
    #[must_use]
    pub fn complement_text(&self) -> &str {
        self.complement.as_deref().unwrap_or_default()
    }
}

/// A party seen as a donor: the party, its donor profile and every donation it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// The underlying party.
    pub party: Party,
    /// Donor extension, if the party has one.
    pub profile: Option<DonorProfile>,
    /// All donations owned by the party.
    pub donations: Vec<Donation>,
}

impl Donor {
    /// Returns the donor's party ID.
    #[must_use]
    pub fn id(&self) -> PartyId {
        self.party.id
    }

    /// Returns the donor classification, if any.
    #[must_use]
    pub fn donor_type(&self) -> Option<DonorTypeId> {
        self.profile.as_ref().and_then(|p| p.donor_type)
    }

    /// Iterates over the donations made in `year`.
    pub fn donations_in_year(&self, year: i32) -> impl Iterator<Item = &Donation> {
        self.donations.iter().filter(move |d| d.year() == year)
    }

    /// Returns the number of donations made in `year`.
    #[must_use]
    pub fn donation_count_in_year(&self, year: i32) -> usize {
        self.donations_in_year(year).count()
    }

    /// Returns the total amount donated in `year`.
    #[must_use]
    pub fn total_in_year(&self, year: i32) -> Decimal {
        self.donations_in_year(year).map(|d| d.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn donation(donor: PartyId, date: (i32, u32, u32), amount: Decimal) -> Donation {
        Donation {
            id: DonationId::new(),
            number: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            donation_type: DonationTypeId::new(),
            donor,
            amount,
            notes: None,
            complement: None,
            attestation_sent: false,
            no_attestation: false,
        }
    }

    fn donor() -> Donor {
        let party = Party {
            id: PartyId::new(),
            name: "  Madame Anne Dupont ".to_string(),
            addresses: vec![],
        };
        let id = party.id;
        Donor {
            party,
            profile: Some(DonorProfile {
                party_id: id,
                donor_type: Some(DonorTypeId::from_uuid(uuid::Uuid::nil())),
                is_donor: true,
            }),
            donations: vec![
                donation(id, (2024, 12, 1), dec!(100)),
                donation(id, (2024, 3, 15), dec!(50.5)),
                donation(id, (2023, 6, 1), dec!(20)),
            ],
        }
    }

    #[test]
    fn test_year_derived_from_date() {
        let d = donation(PartyId::new(), (2021, 1, 31), dec!(1));
        assert_eq!(d.year(), 2021);
    }

    #[test]
    fn test_totals_per_year() {
        let donor = donor();
        assert_eq!(donor.total_in_year(2024), dec!(150.5));
        assert_eq!(donor.total_in_year(2023), dec!(20));
        assert_eq!(donor.total_in_year(2022), Decimal::ZERO);
        assert_eq!(donor.donation_count_in_year(2024), 2);
        assert_eq!(donor.donation_count_in_year(2022), 0);
    }

    #[test]
    fn test_full_name_trimmed() {
        assert_eq!(donor().party.full_name(), "Madame Anne Dupont");
    }

    #[test]
    fn test_donor_type_from_profile() {
        let mut donor = donor();
        assert!(donor.donor_type().is_some());
        donor.profile = None;
        assert!(donor.donor_type().is_none());
    }

    #[test]
    fn test_awaits_attestation() {
        let mut d = donation(PartyId::new(), (2024, 1, 1), dec!(10));
        assert!(d.awaits_attestation());
        d.no_attestation = true;
        assert!(!d.awaits_attestation());
        d.no_attestation = false;
        d.attestation_sent = true;
        assert!(!d.awaits_attestation());
    }

    #[test]
    fn test_formatted_amount() {
        let d = donation(PartyId::new(), (2024, 1, 1), dec!(2500));
        assert_eq!(d.formatted_amount(&AmountFormat::default()), "2'500.00");
        assert_eq!(d.complement_text(), "");
    }
}
