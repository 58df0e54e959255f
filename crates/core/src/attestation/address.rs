//! Four-line postal address block.

use crate::donation::Address;

use super::error::ValidationReason;

/// The address as printed on a document: four fixed slots.
///
/// 1. complement
/// 2. street and street number
/// 3. second complement
/// 4. postal code and city
///
/// Absent slots hold an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBlock {
    lines: [String; 4],
}

impl AddressBlock {
    /// Builds the block, requiring both the street and the street number.
    pub fn from_address(address: &Address) -> Result<Self, ValidationReason> {
        let street = present(address.street.as_deref()).ok_or(ValidationReason::IncompleteAddress)?;
        let number =
            present(address.street_number.as_deref()).ok_or(ValidationReason::IncompleteAddress)?;

        let locality = [address.postal_code.as_deref(), address.city.as_deref()]
            .into_iter()
            .filter_map(present)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self {
            lines: [
                present(address.complement.as_deref())
                    .unwrap_or_default()
                    .to_string(),
                format!("{street} {number}"),
                present(address.complement2.as_deref())
                    .unwrap_or_default()
                    .to_string(),
                locality,
            ],
        })
    }

    /// Builds the block from a party's first address.
    pub fn from_addresses(addresses: &[Address]) -> Result<Self, ValidationReason> {
        addresses
            .first()
            .ok_or(ValidationReason::MissingAddress)
            .and_then(Self::from_address)
    }

    /// Returns the non-empty lines in slot order.
    #[must_use]
    pub fn compact(&self) -> Vec<String> {
        self.lines.iter().filter(|l| !l.is_empty()).cloned().collect()
    }

    /// Consumes the block, returning the four slots.
    #[must_use]
    pub fn into_lines(self) -> [String; 4] {
        self.lines
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
