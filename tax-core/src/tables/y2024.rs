//! Tax year 2024 (Rev. Proc. 2023-34 amounts).

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
        tax_year: 2024,
        brackets: PerFilingStatus {
            single: schedule(&[
                (dollars(11_600), dec!(0.10)),
                (dollars(47_150), dec!(0.12)),
                (dollars(100_525), dec!(0.22)),
                (dollars(191_950), dec!(0.24)),
                (dollars(243_725), dec!(0.32)),
                (dollars(609_350), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            married_jointly: schedule(&[
                (dollars(23_200), dec!(0.10)),
                (dollars(94_300), dec!(0.12)),
                (dollars(201_050), dec!(0.22)),
                (dollars(383_900), dec!(0.24)),
                (dollars(487_450), dec!(0.32)),
                (dollars(731_200), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            married_separately: schedule(&[
                (dollars(11_600), dec!(0.10)),
                (dollars(47_150), dec!(0.12)),
                (dollars(100_525), dec!(0.22)),
                (dollars(191_950), dec!(0.24)),
                (dollars(243_725), dec!(0.32)),
                (dollars(365_600), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
            head_of_household: schedule(&[
                (dollars(16_550), dec!(0.10)),
                (dollars(63_100), dec!(0.12)),
                (dollars(100_500), dec!(0.22)),
                (dollars(191_950), dec!(0.24)),
                (dollars(243_700), dec!(0.32)),
                (dollars(609_350), dec!(0.35)),
                (0, dec!(0.37)),
            ]),
        },
        standard_deduction: PerFilingStatus {
            single: dollars(14_600),
            married_jointly: dollars(29_200),
            married_separately: dollars(14_600),
            head_of_household: dollars(21_900),
        },
        additional_standard_deduction: PerFilingStatus {
            single: dollars(1_950),
            married_jointly: dollars(1_550),
            married_separately: dollars(1_550),
            head_of_household: dollars(1_950),
        },
        dependent_standard_deduction_floor: dollars(1_300),
        dependent_earned_income_addon: dollars(450),
        capital_gains: CapitalGainBreakpoints {
            zero_rate_max: PerFilingStatus {
                single: dollars(47_025),
                married_jointly: dollars(94_050),
                married_separately: dollars(47_025),
                head_of_household: dollars(63_000),
            },
            fifteen_rate_max: PerFilingStatus {
                single: dollars(518_900),
                married_jointly: dollars(583_750),
                married_separately: dollars(291_850),
                head_of_household: dollars(551_350),
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
            ss_wage_base: dollars(168_600),
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
                single: dollars(191_950),
                married_jointly: dollars(383_900),
                married_separately: dollars(191_950),
                head_of_household: dollars(191_950),
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
                    earned_income_amount: dollars(8_260),
                    max_credit: dollars(632),
                    phase_out_rate: dec!(0.0765),
                    phase_out_start: dollars(10_330),
                    phase_out_start_joint: dollars(17_250),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.34),
                    earned_income_amount: dollars(12_390),
                    max_credit: dollars(4_213),
                    phase_out_rate: dec!(0.1598),
                    phase_out_start: dollars(22_720),
                    phase_out_start_joint: dollars(29_640),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.40),
                    earned_income_amount: dollars(17_400),
                    max_credit: dollars(6_960),
                    phase_out_rate: dec!(0.2106),
                    phase_out_start: dollars(22_720),
                    phase_out_start_joint: dollars(29_640),
                },
                EitcSchedule {
                    phase_in_rate: dec!(0.45),
                    earned_income_amount: dollars(17_400),
                    max_credit: dollars(7_830),
                    phase_out_rate: dec!(0.2106),
                    phase_out_start: dollars(22_720),
                    phase_out_start_joint: dollars(29_640),
                },
            ],
            investment_income_limit: dollars(11_600),
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
                single: dollars(85_700),
                married_jointly: dollars(133_300),
                married_separately: dollars(66_650),
                head_of_household: dollars(85_700),
            },
            phase_out_start: PerFilingStatus {
                single: dollars(609_350),
                married_jointly: dollars(1_218_700),
                married_separately: dollars(609_350),
                head_of_household: dollars(609_350),
            },
            phase_out_rate: dec!(0.25),
            rate_breakpoint: PerFilingStatus {
                single: dollars(232_600),
                married_jointly: dollars(232_600),
                married_separately: dollars(116_300),
                head_of_household: dollars(232_600),
            },
            low_rate: dec!(0.26),
            high_rate: dec!(0.28),
        },
    }
}
