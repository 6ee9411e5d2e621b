//! Standard deduction, Schedule A itemized deductions, and the decision
//! between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Phase, codes};
use crate::models::{DeductionPreference, FilingStatus, ItemizedProfile, TaxpayerProfile};
use crate::money::{Cents, add_cents, format_cents_as_dollars, max0, multiply_cents};
use crate::tables::{FederalTables, ItemizedLimits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDeduction {
    pub base: Cents,
    /// Boxes checked for age 65+ or blindness, taxpayer and spouse.
    pub additional_boxes: u32,
    pub additional_amount: Cents,
    /// The base was reduced under the dependent-filer limit.
    pub dependent_limited: bool,
    pub amount: Cents,
}

/// Standard deduction for the return, including age and blindness add-ons.
///
/// A filer who can be claimed as someone else's dependent is limited to the
/// larger of the floor amount or earned income plus the add-on, never more
/// than the regular base.
pub fn standard_deduction(
    tables: &FederalTables,
    profile: &TaxpayerProfile,
    tax_year: i32,
    earned_income: Cents,
) -> StandardDeduction {
    let status = profile.filing_status;
    let regular_base = tables.standard_deduction.get(status);

    let dependent_limited = profile.primary.can_be_claimed_as_dependent;
    let base = if dependent_limited {
        let limit = tables
            .dependent_standard_deduction_floor
            .max(max0(earned_income).saturating_add(tables.dependent_earned_income_addon));
        regular_base.min(limit)
    } else {
        regular_base
    };

    let mut additional_boxes = 0;
    for person in std::iter::once(&profile.primary).chain(profile.joint_spouse()) {
        additional_boxes += u32::from(person.is_65_or_older(tax_year));
        additional_boxes += u32::from(person.is_blind);
    }
    let additional_amount =
        tables.additional_standard_deduction.get(status) * i64::from(additional_boxes);

    StandardDeduction {
        base,
        additional_boxes,
        additional_amount,
        dependent_limited,
        amount: base + additional_amount,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemizedBreakdown {
    pub salt_before_cap: Cents,
    pub salt_deducted: Cents,
    pub medical_expenses: Cents,
    pub medical_floor: Cents,
    pub medical_deducted: Cents,
    pub mortgage_interest: Cents,
    pub charitable_contributions: Cents,
    pub charitable_deducted: Cents,
    /// Contributions above the AGI limit, carried to later years.
    pub charitable_carryover: Cents,
    pub casualty_loss: Cents,
    pub other: Cents,
    pub total: Cents,
}

/// Schedule A with the SALT cap, the medical floor and the charitable limit.
pub fn itemized_deductions(
    itemized: &ItemizedProfile,
    agi: Cents,
    casualty_loss: Cents,
    status: FilingStatus,
    limits: &ItemizedLimits,
    diagnostics: &mut Diagnostics,
) -> ItemizedBreakdown {
    let agi = max0(agi);

    let salt_before_cap = max0(itemized.salt_before_cap());
    let salt_deducted = salt_before_cap.min(limits.salt_cap.get(status));

    let medical_expenses = max0(itemized.medical_expenses);
    let medical_floor = multiply_cents(agi, limits.medical_floor_rate);
    let medical_deducted = max0(medical_expenses - medical_floor);

    let charitable_contributions = max0(itemized.charitable_contributions);
    let charitable_limit = multiply_cents(agi, limits.charitable_agi_limit);
    let charitable_deducted = charitable_contributions.min(charitable_limit);
    let charitable_carryover = charitable_contributions - charitable_deducted;
    if charitable_carryover > 0 {
        diagnostics.warn(
            codes::CHARITABLE_LIMITED,
            Phase::Deductions,
            format!(
                "charitable contributions limited to {} of AGI; {} carries forward",
                limits.charitable_agi_limit,
                format_cents_as_dollars(charitable_carryover)
            ),
        );
    }

    let mortgage_interest = max0(itemized.mortgage_interest);
    let other = max0(itemized.other_itemized);
    let casualty_loss = max0(casualty_loss);

    let total = add_cents(&[
        salt_deducted,
        medical_deducted,
        mortgage_interest,
        charitable_deducted,
        casualty_loss,
        other,
    ]);

    ItemizedBreakdown {
        salt_before_cap,
        salt_deducted,
        medical_expenses,
        medical_floor,
        medical_deducted,
        mortgage_interest,
        charitable_contributions,
        charitable_deducted,
        charitable_carryover,
        casualty_loss,
        other,
        total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionType {
    Standard,
    Itemized,
}

/// Why the deduction type was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionReason {
    /// The chosen deduction is strictly larger.
    Larger,
    /// Both are equal; ties go to the standard deduction.
    Tie,
    /// The filer forced this type.
    Forced,
    /// Married filing separately and the spouse itemizes.
    SpouseItemizes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionDecision {
    pub deduction_type: DeductionType,
    pub reason: DeductionReason,
    pub amount: Cents,
    pub standard: Cents,
    pub itemized: Cents,
}

/// Picks standard or itemized.
///
/// Without a preference the larger wins and a tie goes to standard. A forced
/// preference is always honored; if it costs the filer money a warning says
/// so. A separately filing spouse whose spouse itemizes must itemize.
pub fn choose_deduction(
    standard: Cents,
    itemized: Cents,
    preference: DeductionPreference,
    spouse_itemizes_mfs: bool,
    diagnostics: &mut Diagnostics,
) -> DeductionDecision {
    let standard = max0(standard);
    let itemized = max0(itemized);

    let (deduction_type, reason) = if spouse_itemizes_mfs {
        diagnostics.warn(
            codes::SPOUSE_ITEMIZES,
            Phase::Deductions,
            "spouse itemizes on a separate return; the standard deduction is not allowed",
        );
        (DeductionType::Itemized, DeductionReason::SpouseItemizes)
    } else {
        match preference {
            DeductionPreference::ForceStandard => {
                (DeductionType::Standard, DeductionReason::Forced)
            }
            DeductionPreference::ForceItemized => {
                (DeductionType::Itemized, DeductionReason::Forced)
            }
            DeductionPreference::Auto if itemized > standard => {
                (DeductionType::Itemized, DeductionReason::Larger)
            }
            DeductionPreference::Auto if itemized == standard => {
                (DeductionType::Standard, DeductionReason::Tie)
            }
            DeductionPreference::Auto => (DeductionType::Standard, DeductionReason::Larger),
        }
    };

    let (amount, alternative) = match deduction_type {
        DeductionType::Standard => (standard, itemized),
        DeductionType::Itemized => (itemized, standard),
    };
    if reason == DeductionReason::Forced && amount < alternative {
        diagnostics.warn(
            codes::FORCED_DEDUCTION_COSTS_MORE,
            Phase::Deductions,
            format!(
                "forced {:?} deduction of {} is smaller than the {} alternative",
                deduction_type,
                format_cents_as_dollars(amount),
                format_cents_as_dollars(alternative)
            ),
        );
    }

    debug!(?deduction_type, ?reason, amount, "deduction chosen");

    DeductionDecision {
        deduction_type,
        reason,
        amount,
        standard,
        itemized,
    }
}
