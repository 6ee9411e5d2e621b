use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Age on December 31 of `tax_year`.
///
/// A person born on January 1 is treated as reaching that age on the
/// preceding December 31, so someone born 1960-01-01 is 65 for 2024.
pub fn age_at_year_end(
    birth_date: NaiveDate,
    tax_year: i32,
) -> i32 {
    let age = tax_year.saturating_sub(birth_date.year());
    if birth_date.month() == 1 && birth_date.day() == 1 {
        age.saturating_add(1)
    } else {
        age
    }
}

/// Demographic facts about the taxpayer or spouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub birth_date: Option<NaiveDate>,
    pub is_blind: bool,
    /// Someone else can claim this person as a dependent.
    pub can_be_claimed_as_dependent: bool,
}

impl Person {
    pub fn age(
        &self,
        tax_year: i32,
    ) -> Option<i32> {
        self.birth_date.map(|d| age_at_year_end(d, tax_year))
    }

    pub fn is_65_or_older(
        &self,
        tax_year: i32,
    ) -> bool {
        self.age(tax_year).is_some_and(|age| age >= 65)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependentKind {
    QualifyingChild,
    QualifyingRelative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub kind: DependentKind,
    /// `None` when only a legacy dependent count was supplied.
    pub birth_date: Option<NaiveDate>,
    pub months_lived_with_taxpayer: u8,
    pub is_full_time_student: bool,
    pub is_permanently_disabled: bool,
    pub has_ssn: bool,
}

impl Dependent {
    /// A qualifying child whose age is unknown; used when resolving a
    /// legacy dependent count.
    pub fn child_of_unknown_age() -> Self {
        Self {
            kind: DependentKind::QualifyingChild,
            birth_date: None,
            months_lived_with_taxpayer: 12,
            is_full_time_student: false,
            is_permanently_disabled: false,
            has_ssn: true,
        }
    }

    pub fn age(
        &self,
        tax_year: i32,
    ) -> Option<i32> {
        self.birth_date.map(|d| age_at_year_end(d, tax_year))
    }

    fn lived_with_taxpayer_over_half_year(&self) -> bool {
        self.months_lived_with_taxpayer > 6
    }

    /// Qualifying child for the Child Tax Credit: under 17 at year end,
    /// resident more than half the year and holding an SSN. Unknown ages
    /// are assumed to qualify.
    pub fn is_ctc_child(
        &self,
        tax_year: i32,
    ) -> bool {
        self.kind == DependentKind::QualifyingChild
            && self.has_ssn
            && self.lived_with_taxpayer_over_half_year()
            && self.age(tax_year).is_none_or(|age| age < 17)
    }

    /// Qualifying child for the Earned Income Credit: under 19, under 24 if a
    /// full-time student, or any age if permanently disabled.
    pub fn is_eitc_child(
        &self,
        tax_year: i32,
    ) -> bool {
        if self.kind != DependentKind::QualifyingChild || !self.lived_with_taxpayer_over_half_year()
        {
            return false;
        }
        match self.age(tax_year) {
            None => true,
            Some(_) if self.is_permanently_disabled => true,
            Some(age) if self.is_full_time_student => age < 24,
            Some(age) => age < 19,
        }
    }
}

/// Where the taxpayer lives on the last day of the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    /// Two-letter postal code, e.g. `MD`.
    pub state: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxpayerProfile {
    pub filing_status: FilingStatus,
    pub primary: Person,
    pub spouse: Option<Person>,
    pub dependents: Vec<Dependent>,
    pub location: Location,
}

impl TaxpayerProfile {
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            primary: Person::default(),
            spouse: None,
            dependents: Vec::new(),
            location: Location::default(),
        }
    }

    /// The spouse, but only when the spouse is on this return.
    pub fn joint_spouse(&self) -> Option<&Person> {
        if self.filing_status.is_joint() {
            self.spouse.as_ref()
        } else {
            None
        }
    }

    /// Taxpayer plus spouse on a joint return.
    pub fn filer_count(&self) -> u32 {
        if self.filing_status.is_joint() { 2 } else { 1 }
    }

    pub fn ctc_children(
        &self,
        tax_year: i32,
    ) -> usize {
        self.dependents
            .iter()
            .filter(|d| d.is_ctc_child(tax_year))
            .count()
    }

    pub fn eitc_children(
        &self,
        tax_year: i32,
    ) -> usize {
        self.dependents
            .iter()
            .filter(|d| d.is_eitc_child(tax_year))
            .count()
    }

    /// Dependents that qualify for the $500 credit for other dependents.
    pub fn other_dependents(
        &self,
        tax_year: i32,
    ) -> usize {
        self.dependents.len() - self.ctc_children(tax_year)
    }
}
