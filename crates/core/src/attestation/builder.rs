//! Context building for attestation documents.
//!
//! The builder is pure: it validates the selected donations, computes the
//! amounts and returns a draft listing the donations to mark. Nothing is
//! mutated until the caller commits the draft.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use dons_shared::types::{AmountFormat, DonationId};

use crate::donation::{Donation, Donor, Party};

use super::address::AddressBlock;
use super::calendar::format_month_year;
use super::error::{AttestationError, ValidationReason};
use super::salutation::Salutation;
use super::types::{AttestationContext, AttestationDraft, AttestationKind};

/// Builds attestation contexts with a fixed amount format.
#[derive(Debug, Clone, Default)]
pub struct AttestationBuilder {
    format: AmountFormat,
}

impl AttestationBuilder {
    /// Creates a builder printing amounts with `format`.
    #[must_use]
    pub const fn new(format: AmountFormat) -> Self {
        Self { format }
    }

    /// Builds the yearly attestation of one donor.
    ///
    /// The selected donations only determine the year: the total covers
    /// every donation of the donor in that year, and all of those that are
    /// not yet flagged are listed for marking.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Validation` if the selection is empty,
    /// belongs to another donor, spans several years, if the donor's
    /// address is missing or incomplete, or if the donor has no donation in
    /// the selected year.
    pub fn single_year(
        &self,
        donor: &Donor,
        selected: &[Donation],
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<AttestationContext>, AttestationError> {
        let first = selected
            .first()
            .ok_or(ValidationReason::NoDonationSelected)?;

        if selected.iter().any(|d| d.donor != donor.id()) {
            return Err(ValidationReason::MultipleDonors.into());
        }

        let years: BTreeSet<i32> = selected.iter().map(Donation::year).collect();
        if years.len() != 1 {
            return Err(ValidationReason::MultipleYears.into());
        }
        let year = first.year();

        let block = AddressBlock::from_addresses(&donor.party.addresses)?;

        let covered: Vec<&Donation> = donor.donations_in_year(year).collect();
        if covered.is_empty() {
            return Err(ValidationReason::NoDonationForYear(year).into());
        }

        let total: Decimal = covered.iter().map(|d| d.amount).sum();
        let to_mark = covered
            .iter()
            .filter(|d| !d.attestation_sent)
            .map(|d| d.id)
            .collect();

        Ok(AttestationDraft {
            kind: AttestationKind::SingleYear,
            content: self.context(
                &donor.party,
                block,
                generated_on,
                year,
                total,
                first.complement_text(),
            ),
            to_mark,
        })
    }

    /// Builds the attestation of exactly one donation, with its own year and amount.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Validation` unless exactly one donation of
    /// `party` is given and the party's address is complete.
    pub fn single_donation(
        &self,
        party: &Party,
        selected: &[Donation],
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<AttestationContext>, AttestationError> {
        let donation = match selected {
            [] => return Err(ValidationReason::NoDonationSelected.into()),
            [donation] => donation,
            _ => {
                return Err(ValidationReason::SingleDonationExpected {
                    count: selected.len(),
                }
                .into());
            }
        };

        if donation.donor != party.id {
            return Err(ValidationReason::DonorMismatch(donation.id).into());
        }

        let block = AddressBlock::from_addresses(&party.addresses)?;
        let to_mark = if donation.attestation_sent {
            Vec::new()
        } else {
            vec![donation.id]
        };

        Ok(AttestationDraft {
            kind: AttestationKind::SingleDonation,
            content: self.context(
                party,
                block,
                generated_on,
                donation.year(),
                donation.amount,
                donation.complement_text(),
            ),
            to_mark,
        })
    }

    /// Builds one thank-you context per donation, in input order.
    ///
    /// Donations may belong to different donors and years; nothing is
    /// aggregated.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Validation` if the batch is empty, if a
    /// donation is paired with a party that does not own it, or if any
    /// donor's address is missing or incomplete. No context is returned
    /// when any entry fails.
    pub fn thanks(
        &self,
        entries: &[(&Party, &Donation)],
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<Vec<AttestationContext>>, AttestationError> {
        if entries.is_empty() {
            return Err(ValidationReason::NoDonationSelected.into());
        }

        let mut contexts = Vec::with_capacity(entries.len());
        let mut to_mark = Vec::new();
        let mut seen: HashSet<DonationId> = HashSet::with_capacity(entries.len());

        for (party, donation) in entries {
            if donation.donor != party.id {
                return Err(ValidationReason::DonorMismatch(donation.id).into());
            }

            let block = AddressBlock::from_addresses(&party.addresses)?;
            contexts.push(self.context(
                party,
                block,
                generated_on,
                donation.year(),
                donation.amount,
                donation.complement_text(),
            ));

            if !donation.attestation_sent && seen.insert(donation.id) {
                to_mark.push(donation.id);
            }
        }

        Ok(AttestationDraft {
            kind: AttestationKind::Thanks,
            content: contexts,
            to_mark,
        })
    }

    fn context(
        &self,
        party: &Party,
        block: AddressBlock,
        generated_on: NaiveDate,
        year: i32,
        total: Decimal,
        complement: &str,
    ) -> AttestationContext {
        let full_name = party.full_name();
        let address = block.compact();
        let [address_l1, address_l2, address_l3, address_l4] = block.into_lines();

        AttestationContext {
            salutation: Salutation::from_full_name(full_name).to_string(),
            full_name: full_name.to_string(),
            address_l1,
            address_l2,
            address_l3,
            address_l4,
            address,
            date: format_month_year(generated_on),
            total_amount: total,
            total_amount_str: self.format.format(total),
            currency: self.format.currency.to_string(),
            current_year: year,
            previous_year: year - 1,
            complement: complement.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donation::{Address, DonorProfile};
    use dons_shared::types::{Currency, DonationTypeId, PartyId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn party(name: &str) -> Party {
        Party {
            id: PartyId::new(),
            name: name.to_string(),
            addresses: vec![Address {
                street: Some("Avenue de la Gare".to_string()),
                street_number: Some("5".to_string()),
                postal_code: Some("1950".to_string()),
                city: Some("Sion".to_string()),
                ..Address::default()
            }],
        }
    }

    fn donation(party: &Party, on: NaiveDate, amount: Decimal) -> Donation {
        Donation {
            id: DonationId::new(),
            number: None,
            date: on,
            donation_type: DonationTypeId::new(),
            donor: party.id,
            amount,
            notes: None,
            complement: None,
            attestation_sent: false,
            no_attestation: false,
        }
    }

    fn donor(party: Party, donations: Vec<Donation>) -> Donor {
        let party_id = party.id;
        Donor {
            party,
            profile: Some(DonorProfile {
                party_id,
                donor_type: None,
                is_donor: true,
            }),
            donations,
        }
    }

    #[test]
    fn test_single_year_totals_whole_year() {
        let p = party("Madame Anne Dupont");
        let mut d1 = donation(&p, date(2024, 2, 1), dec!(1000));
        d1.complement = Some("Merci pour le soutien".to_string());
        let d2 = donation(&p, date(2024, 9, 1), dec!(234.5));
        let d3 = donation(&p, date(2023, 9, 1), dec!(99));
        let donor = donor(p, vec![d1.clone(), d2.clone(), d3]);

        let draft = AttestationBuilder::default()
            .single_year(&donor, &[d1.clone()], date(2025, 1, 15))
            .unwrap();

        let ctx = &draft.content;
        assert_eq!(draft.kind, AttestationKind::SingleYear);
        assert_eq!(ctx.total_amount, dec!(1234.5));
        assert_eq!(ctx.total_amount_str, "1'234.50");
        assert_eq!(ctx.current_year, 2024);
        assert_eq!(ctx.previous_year, 2023);
        assert_eq!(ctx.salutation, "Chère Madame");
        assert_eq!(ctx.full_name, "Madame Anne Dupont");
        assert_eq!(ctx.date, "janvier 2025");
        assert_eq!(ctx.complement, "Merci pour le soutien");
        assert_eq!(ctx.address_l2, "Avenue de la Gare 5");
        assert_eq!(ctx.address_l4, "1950 Sion");
        assert_eq!(ctx.address, vec!["Avenue de la Gare 5", "1950 Sion"]);
        assert_eq!(draft.to_mark, vec![d1.id, d2.id]);
    }

    #[test]
    fn test_single_year_skips_already_sent_when_marking() {
        let p = party("Monsieur Favre");
        let mut sent = donation(&p, date(2024, 1, 1), dec!(10));
        sent.attestation_sent = true;
        let open = donation(&p, date(2024, 5, 1), dec!(20));
        let donor = donor(p, vec![sent.clone(), open.clone()]);

        let draft = AttestationBuilder::default()
            .single_year(&donor, &[sent], date(2025, 1, 1))
            .unwrap();

        assert_eq!(draft.content.total_amount, dec!(30));
        assert_eq!(draft.to_mark, vec![open.id]);
    }

    #[test]
    fn test_single_year_rejects_mixed_years() {
        let p = party("Madame Dupont");
        let d1 = donation(&p, date(2023, 12, 31), dec!(10));
        let d2 = donation(&p, date(2024, 1, 1), dec!(10));
        let donor = donor(p, vec![d1.clone(), d2.clone()]);

        let err = AttestationBuilder::default()
            .single_year(&donor, &[d1, d2], date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::MultipleYears)
        ));
    }

    #[test]
    fn test_single_year_rejects_other_donor() {
        let p = party("Madame Dupont");
        let other = party("Monsieur Favre");
        let foreign = donation(&other, date(2024, 1, 1), dec!(10));
        let donor = donor(p, vec![]);

        let err = AttestationBuilder::default()
            .single_year(&donor, &[foreign], date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::MultipleDonors)
        ));
    }

    #[test]
    fn test_single_year_rejects_empty_selection() {
        let donor = donor(party("Madame Dupont"), vec![]);
        let err = AttestationBuilder::default()
            .single_year(&donor, &[], date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::NoDonationSelected)
        ));
    }

    #[test]
    fn test_single_year_no_donation_in_donor_record() {
        let p = party("Madame Dupont");
        let selected = donation(&p, date(2024, 1, 1), dec!(10));
        let donor = donor(p, vec![]);

        let err = AttestationBuilder::default()
            .single_year(&donor, &[selected], date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::NoDonationForYear(2024))
        ));
    }

    #[test]
    fn test_single_year_requires_address() {
        let mut p = party("Madame Dupont");
        p.addresses.clear();
        let d = donation(&p, date(2024, 1, 1), dec!(10));
        let donor = donor(p, vec![d.clone()]);

        let err = AttestationBuilder::default()
            .single_year(&donor, &[d], date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::MissingAddress)
        ));
    }

    #[test]
    fn test_single_donation_uses_own_amount() {
        let p = party("Dr Martin");
        let d = donation(&p, date(2022, 7, 1), dec!(75));

        let draft = AttestationBuilder::default()
            .single_donation(&p, std::slice::from_ref(&d), date(2024, 3, 2))
            .unwrap();

        assert_eq!(draft.kind, AttestationKind::SingleDonation);
        assert_eq!(draft.content.total_amount_str, "75.00");
        assert_eq!(draft.content.current_year, 2022);
        assert_eq!(draft.content.previous_year, 2021);
        assert_eq!(draft.content.salutation, "Cher Docteur");
        assert_eq!(draft.content.date, "mars 2024");
        assert_eq!(draft.to_mark, vec![d.id]);
    }

    #[test]
    fn test_single_donation_already_sent_marks_nothing() {
        let p = party("Dr Martin");
        let mut d = donation(&p, date(2022, 7, 1), dec!(75));
        d.attestation_sent = true;

        let draft = AttestationBuilder::default()
            .single_donation(&p, &[d], date(2024, 3, 2))
            .unwrap();
        assert!(draft.to_mark.is_empty());
    }

    #[test]
    fn test_single_donation_rejects_several() {
        let p = party("Dr Martin");
        let d1 = donation(&p, date(2022, 7, 1), dec!(75));
        let d2 = donation(&p, date(2022, 8, 1), dec!(75));

        let err = AttestationBuilder::default()
            .single_donation(&p, &[d1, d2], date(2024, 3, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::SingleDonationExpected { count: 2 })
        ));
    }

    #[test]
    fn test_single_donation_incomplete_address() {
        let mut p = party("Dr Martin");
        p.addresses[0].street_number = None;
        let d = donation(&p, date(2022, 7, 1), dec!(75));

        let err = AttestationBuilder::default()
            .single_donation(&p, &[d], date(2024, 3, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::IncompleteAddress)
        ));
    }

    #[test]
    fn test_thanks_one_context_per_donation_in_order() {
        let a = party("Madame Dupont");
        let b = party("Unknown Name");
        let d1 = donation(&a, date(2023, 5, 1), dec!(50));
        let d2 = donation(&b, date(2024, 5, 1), dec!(75));

        let draft = AttestationBuilder::default()
            .thanks(&[(&a, &d1), (&b, &d2)], date(2024, 6, 1))
            .unwrap();

        assert_eq!(draft.kind, AttestationKind::Thanks);
        let contexts = draft.contexts();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].current_year, 2023);
        assert_eq!(contexts[0].total_amount, dec!(50));
        assert_eq!(contexts[0].salutation, "Chère Madame");
        assert_eq!(contexts[1].current_year, 2024);
        assert_eq!(contexts[1].total_amount, dec!(75));
        assert_eq!(contexts[1].salutation, "Cher Monsieur, Madame");
        assert_eq!(draft.to_mark, vec![d1.id, d2.id]);
    }

    #[test]
    fn test_thanks_duplicate_donation_marked_once() {
        let a = party("Madame Dupont");
        let d1 = donation(&a, date(2023, 5, 1), dec!(50));

        let draft = AttestationBuilder::default()
            .thanks(&[(&a, &d1), (&a, &d1)], date(2024, 6, 1))
            .unwrap();
        assert_eq!(draft.content.len(), 2);
        assert_eq!(draft.to_mark, vec![d1.id]);
    }

    #[test]
    fn test_thanks_fails_on_any_incomplete_address() {
        let a = party("Madame Dupont");
        let mut b = party("Monsieur Favre");
        b.addresses[0].street = None;
        let d1 = donation(&a, date(2023, 5, 1), dec!(50));
        let d2 = donation(&b, date(2024, 5, 1), dec!(75));

        let err = AttestationBuilder::default()
            .thanks(&[(&a, &d1), (&b, &d2)], date(2024, 6, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::IncompleteAddress)
        ));
    }

    #[test]
    fn test_thanks_rejects_mismatched_pair() {
        let a = party("Madame Dupont");
        let b = party("Monsieur Favre");
        let d = donation(&b, date(2023, 5, 1), dec!(50));

        let err = AttestationBuilder::default()
            .thanks(&[(&a, &d)], date(2024, 6, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Validation(ValidationReason::DonorMismatch(id)) if id == d.id
        ));
    }

    #[test]
    fn test_custom_amount_format() {
        let p = party("Madame Dupont");
        let d = donation(&p, date(2024, 1, 1), dec!(1234.5));
        let builder = AttestationBuilder::new(AmountFormat {
            thousands_separator: " ".to_string(),
            decimal_separator: ",".to_string(),
            currency: Currency::Eur,
            ..AmountFormat::default()
        });

        let draft = builder.single_donation(&p, &[d], date(2024, 2, 1)).unwrap();
        assert_eq!(draft.content.total_amount_str, "1 234,50");
        assert_eq!(draft.content.currency, "EUR");
    }
}
