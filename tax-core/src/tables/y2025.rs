//! Tax year 2025 (Rev. Proc. 2024-40 amounts).

use rust_decimal_macros::dec;

use super::{
    AmtParameters, CapitalGainBreakpoints, ChildTaxCreditParameters, EducationParameters,
    EitcParameters, EitcSchedule, FederalTables, ItemizedLimits, QbiParameters,
    SelfEmploymentRates, SurtaxThreshold,
};
use crate::models::{PerFilingStatus, schedule};
use crate::money::dollars;

pub(super) fn tables() -> FederalTables {
    FederalTables {
        tax_year: 2025,
        brackets: PerFilingStatus {
            single: schedule(&[
                (dollars(11_925), dec!(0.10)),
                (dollars(48_475), dec!(0.12)),
                (dollars(103_350), dec!(0.22)),
                (dollars(197_300), dec!(0.24)),
                (dollars(250_525), dec!(0.32)),
                (dollars(626_350), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            married_jointly: schedule(&[
                (dollars(23_850), dec!(0.10)),
                (dollars(96_950), dec!(0.12)),
                (dollars(206_700), dec!(0.22)),
                (dollars(394_600), dec!(0.24)),
                (dollars(501_050), dec!(0.32)),
                (dollars(751_600), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            married_separately: schedule(&[
                (dollars(11_925), dec!(0.10)),
                (dollars(48_475), dec!(0.12)),
                (dollars(103_350), dec!(0.22)),
                (dollars(197_300), dec!(0.24)),
                (dollars(250_525), dec!(0.32)),
                (dollars(375_800), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            head_of_household: schedule(&[
                (dollars(17_000), dec!(0.10)),
                (dollars(64_850), dec!(0.12)),
                (dollars(103_350), dec!(0.22)),
                (dollars(197_300), dec!(0.24)),
                (dollars(250_500), dec!(0.32)),
                (dollars(626_350), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
        },
        standard_deduction: PerFilingStatus {
            single: dollars(15_000),
            married_jointly: dollars(30_000),
            married_separately: dollars(15_000),
            head_of_household: dollars(22_500),
        },
        additional_standard_deduction: PerFilingStatus {
            single: dollars(2_000),
            married_jointly: dollars(1_600),
            married_separately: dollars(1_600),
            head_of_household: dollars(2_000),
        },
        dependent_standard_deduction_floor: dollars(1_350),
        dependent_earned_income_addon: dollars(450),
        capital_gains: CapitalGainBreakpoints {
            zero_rate_max: PerFilingStatus {
                single: dollars(48_350),
                married_jointly: dollars(96_700),
                married_separately: dollars(48_350),
                head_of_household: dollars(64_750),
            },
            fifteen_rate_max: PerFilingStatus {
                single: dollars(533_400),
                married_jointly: dollars(600_050),
                married_separately: dollars(300_000),
                head_of_household: dollars(566_700),
            },
            fifteen_rate: dec!(0.15),
            twenty_rate: dec!(0.20),
        },
        capital_loss_limit: PerFilingStatus {
            single: dollars(3_000),
            married_jointly: dollars(3_000),
            married_separately: dollars(1_500),
            head_of_household: dollars(3_000),
        },
        self_employment: SelfEmploymentRates {
            ss_wage_base: dollars(176_100),
            ss_rate: dec!(0.124),
            medicare_rate: dec!(0.029),
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.50),
            min_net_earnings: dollars(400),
        },
        additional_medicare: SurtaxThreshold {
            rate: dec!(0.009),
            threshold: PerFilingStatus {
                single: dollars(200_000),
                married_jointly: dollars(250_000),
                married_separately: dollars(125_000),
                head_of_household: dollars(200_000),
            },
        },
        net_investment_income: SurtaxThreshold {
            rate: dec!(0.038),
            threshold: PerFilingStatus {
                single: dollars(200_000),
                married_jointly: dollars(250_000),
                married_separately: dollars(125_000),
                head_of_household: dollars(200_000),
            },
        },
        qbi: QbiParameters {
            rate: dec!(0.20),
            threshold: PerFilingStatus {
                single: dollars(197_300),
                married_jointly: dollars(394_600),
                married_separately: dollars(197_300),
                head_of_household: dollars(197_300),
            },
            phase_in_range: PerFilingStatus {
                single: dollars(50_000),
                married_jointly: dollars(100_000),
                married_separately: dollars(50_000),
                head_of_household: dollars(50_000),
            },
            wage_rate: dec!(0.50),
            alt_wage_rate: dec!(0.25),
            ubia_rate: dec!(0.025),
        },
        eitc: EitcParameters {
            schedules: [
                EitcSchedule {
                    phase_in_rate: dec!(0.0765),
                    earned_income_amount: dollars(8_490),
                    max_credit: dollars(649),
                    phase_out_rate: dec!(0.0765),
                    phase_out_start: dollars(10_620),
                    phase_out_start_joint: dollars(17_730),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.34),
                    earned_income_amount: dollars(12_730),
                    max_credit: dollars(4_328),
                    phase_out_rate: dec!(0.1598),
                    phase_out_start: dollars(23_350),
                    phase_out_start_joint: dollars(30_470),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.40),
                    earned_income_amount: dollars(17_880),
                    max_credit: dollars(7_152),
                    phase_out_rate: dec!(0.2106),
                    phase_out_start: dollars(23_350),
                    phase_out_start_joint: dollars(30_470),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.45),
                    earned_income_amount: dollars(17_880),
                    max_credit: dollars(8_046),
                    phase_out_rate: dec!(0.2106),
                    phase_out_start: dollars(23_350),
                    phase_out_start_joint: dollars(30_470),
                },
            ],
            investment_income_limit: dollars(11_950),
            childless_min_age: 25,
            childless_max_age: 64,
        },
        child_tax_credit: ChildTaxCreditParameters {
            per_child: dollars(2_000),
            per_other_dependent: dollars(500),
            refundable_max_per_child: dollars(1_700),
            earned_income_floor: dollars(2_500),
            refundable_rate: dec!(0.15),
            phase_out_threshold: PerFilingStatus {
                single: dollars(200_000),
                married_jointly: dollars(400_000),
                married_separately: dollars(200_000),
                head_of_household: dollars(200_000),
            },
            phase_out_step: dollars(1_000),
            phase_out_reduction: dollars(50),
        },
        education: EducationParameters {
            aotc_full_rate_expenses: dollars(2_000),
            aotc_partial_rate_expenses: dollars(2_000),
            aotc_partial_rate: dec!(0.25),
            aotc_refundable_rate: dec!(0.40),
            llc_expense_cap: dollars(10_000),
            llc_rate: dec!(0.20),
            phase_out_start: PerFilingStatus {
                single: dollars(80_000),
                married_jointly: dollars(160_000),
                married_separately: 0,
                head_of_household: dollars(80_000),
            },
            phase_out_end: PerFilingStatus {
                single: dollars(90_000),
                married_jointly: dollars(180_000),
                married_separately: 0,
                head_of_household: dollars(90_000),
            },
        },
        itemized: ItemizedLimits {
            salt_cap: PerFilingStatus {
                single: dollars(10_000),
                married_jointly: dollars(10_000),
                married_separately: dollars(5_000),
                head_of_household: dollars(10_000),
            },
            medical_floor_rate: dec!(0.075),
            charitable_agi_limit: dec!(0.60),
            casualty_per_event_floor: dollars(100),
            casualty_agi_floor_rate: dec!(0.10),
        },
        ftc_simplified_limit: PerFilingStatus {
            single: dollars(300),
            married_jointly: dollars(600),
            married_separately: dollars(300),
            head_of_household: dollars(300),
        },
        amt: AmtParameters {
            exemption: PerFilingStatus {
                single: dollars(88_100),
                married_jointly: dollars(137_000),
                married_separately: dollars(68_500),
                head_of_household: dollars(88_100),
            },
            phase_out_start: PerFilingStatus {
                single: dollars(626_350),
                married_jointly: dollars(1_252_700),
                married_separately: dollars(626_350),
                head_of_household: dollars(626_350),
            },
            phase_out_rate: dec!(0.25),
            rate_breakpoint: PerFilingStatus {
                single: dollars(239_100),
                married_jointly: dollars(239_100),
                married_separately: dollars(119_550),
                head_of_household: dollars(239_100),
            },
            low_rate: dec!(0.26),
            high_rate: dec!(0.28),
        },
    }
}
