use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::MarriedJointly,
        Self::MarriedSeparately,
        Self::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedJointly => "MFJ",
            Self::MarriedSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    /// Parses either the short code (`MFJ`) or the serialized name
    /// (`marriedJointly`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "S" | "single" => Some(Self::Single),
            "MFJ" | "marriedJointly" => Some(Self::MarriedJointly),
            "MFS" | "marriedSeparately" => Some(Self::MarriedSeparately),
            "HOH" | "headOfHousehold" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Whether a spouse is part of this return.
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::MarriedJointly)
    }

    pub fn is_married(&self) -> bool {
        matches!(self, Self::MarriedJointly | Self::MarriedSeparately)
    }
}

/// One value per filing status, the shape most statutory tables take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerFilingStatus<T> {
    pub single: T,
    pub married_jointly: T,
    pub married_separately: T,
    pub head_of_household: T,
}

impl<T: Copy> PerFilingStatus<T> {
    /// Same value for every status.
    pub const fn uniform(value: T) -> Self {
        Self {
            single: value,
            married_jointly: value,
            married_separately: value,
            head_of_household: value,
        }
    }

    pub fn get(
        &self,
        status: FilingStatus,
    ) -> T {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::MarriedJointly => self.married_jointly,
            FilingStatus::MarriedSeparately => self.married_separately,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }
}

impl<T> PerFilingStatus<T> {
    pub fn get_ref(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedJointly => &self.married_jointly,
            FilingStatus::MarriedSeparately => &self.married_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get_ref(status)))
    }
}
