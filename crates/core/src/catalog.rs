//! Slot catalog vocabulary: valid sizes and vehicle types.
//!
//! Slots and vehicles share the same `size` / `vehicle_type` vocabulary; a
//! slot is compatible with a vehicle when both values match exactly (the
//! `"any"` vehicle type is a concrete slot category, not a wildcard —
//! matching is literal string equality throughout).

use crate::error::CoreError;

pub const SLOT_SIZES: &[&str] = &["small", "medium", "large"];
pub const VEHICLE_TYPES: &[&str] = &["car", "taxi", "truck", "any"];

/// Trim and lowercase a size value, rejecting anything outside the catalog.
pub fn normalize_size(raw: &str) -> Result<String, CoreError> {
    let value = raw.trim().to_lowercase();
    if !SLOT_SIZES.contains(&value.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid size: {value}. Must be one of {}",
            SLOT_SIZES.join(", ")
        )));
    }
    Ok(value)
}

/// Trim and lowercase a vehicle type, rejecting anything outside the catalog.
pub fn normalize_vehicle_type(raw: &str) -> Result<String, CoreError> {
    let value = raw.trim().to_lowercase();
    if !VEHICLE_TYPES.contains(&value.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid vehicle type: {value}. Must be one of {}",
            VEHICLE_TYPES.join(", ")
        )));
    }
    Ok(value)
}

/// Trim a free-form required field (slot number, location, plate number).
///
/// Returns `Validation` if the trimmed value is empty.
pub fn require_trimmed(raw: &str, field: &str) -> Result<String, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_trimmed_and_lowercased() {
        assert_eq!(normalize_size("  Medium ").unwrap(), "medium");
    }

    #[test]
    fn unknown_size_is_rejected() {
        let err = normalize_size("gigantic").unwrap_err();
        assert!(err.to_string().contains("Invalid size: gigantic"));
    }

    #[test]
    fn vehicle_type_is_trimmed_and_lowercased() {
        assert_eq!(normalize_vehicle_type("TAXI").unwrap(), "taxi");
        assert_eq!(normalize_vehicle_type(" any").unwrap(), "any");
    }

    #[test]
    fn unknown_vehicle_type_is_rejected() {
        assert!(normalize_vehicle_type("bicycle").is_err());
    }

    #[test]
    fn required_field_rejects_blank() {
        assert!(require_trimmed("   ", "Slot number").is_err());
        assert_eq!(require_trimmed(" A-12 ", "Slot number").unwrap(), "A-12");
    }
}
