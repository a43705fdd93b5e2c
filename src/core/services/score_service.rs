//! Client reliability scoring.
//!
//! A heuristic 0..=100 rating built from three weighted components:
//! punctuality (50), paid volume (30), and account tenure (20). Pure
//! function of its inputs, recomputed per call.

use chrono::NaiveDate;

use crate::domain::{Contract, Installment};
use crate::utils::{dates, money};

/// Five score bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    VeryGood,
    Fair,
    Watch,
    Critical,
}

impl Tier {
    pub fn from_score(score: u32) -> Self {
        match score {
            90..=u32::MAX => Tier::Excellent,
            70..=89 => Tier::VeryGood,
            50..=69 => Tier::Fair,
            30..=49 => Tier::Watch,
            _ => Tier::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent payer",
            Tier::VeryGood => "Very good payer",
            Tier::Fair => "Fair payer",
            Tier::Watch => "Needs attention",
            Tier::Critical => "Critical",
        }
    }

    pub fn stars(&self) -> u8 {
        match self {
            Tier::Excellent => 5,
            Tier::VeryGood => 4,
            Tier::Fair => 3,
            Tier::Watch => 2,
            Tier::Critical => 1,
        }
    }

    /// Severity color token, consumed by presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::Excellent => "#2ecc71",
            Tier::VeryGood => "#3498db",
            Tier::Fair => "#f1c40f",
            Tier::Watch => "#e67e22",
            Tier::Critical => "#e74c3c",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: u32,
    pub tier: Tier,
    /// Human-readable notes explaining each component's contribution.
    pub rationale: Vec<String>,
    pub total_paid: f64,
}

pub struct ScoreService;

impl ScoreService {
    pub fn score(
        client_name: &str,
        contracts: &[Contract],
        installments: &[Installment],
        today: NaiveDate,
    ) -> ScoreResult {
        let own_contracts: Vec<&Contract> = contracts
            .iter()
            .filter(|c| c.client_name == client_name)
            .collect();
        if own_contracts.is_empty() {
            return ScoreResult {
                score: 0,
                tier: Tier::Critical,
                rationale: vec!["No contracts on record for this client".to_string()],
                total_paid: 0.0,
            };
        }

        let own: Vec<&Installment> = installments
            .iter()
            .filter(|inst| inst.client_name == client_name)
            .collect();

        let mut rationale = Vec::new();
        let paid: Vec<&&Installment> = own.iter().filter(|inst| inst.is_paid()).collect();
        let overdue_count = own.iter().filter(|inst| inst.is_overdue(today)).count();

        // Punctuality, max 50.
        let punctuality: u32 = if paid.is_empty() && overdue_count == 0 {
            rationale.push("No billing history yet".to_string());
            50
        } else if overdue_count > 0 {
            let penalty = (overdue_count as u32 * 15).min(40);
            let pts = 30u32.saturating_sub(penalty);
            rationale.push(format!(
                "{overdue_count} installment(s) currently overdue"
            ));
            pts
        } else {
            let on_time = paid.iter().filter(|inst| inst.paid_on_time()).count();
            let ratio = on_time as f64 / paid.len() as f64;
            rationale.push(format!(
                "{on_time} of {} payments made on time",
                paid.len()
            ));
            (50.0 * ratio).round() as u32
        };

        // Volume, max 30.
        let total_paid: f64 = paid.iter().map(|inst| inst.amount).sum();
        let volume: u32 = if total_paid > 15_000.0 {
            30
        } else if total_paid > 5_000.0 {
            20
        } else if total_paid > 1_000.0 {
            10
        } else {
            5
        };
        rationale.push(format!("Total paid: {}", money::format_brl(total_paid)));

        // Tenure, max 20.
        let earliest = own_contracts
            .iter()
            .map(|c| c.start_date)
            .min()
            .unwrap_or(today);
        let months = dates::whole_months_between(earliest, today).max(0);
        let tenure: u32 = if months >= 24 {
            20
        } else if months >= 12 {
            15
        } else if months >= 6 {
            10
        } else {
            5
        };
        rationale.push(format!("Client for {months} month(s)"));

        let score = (punctuality + volume + tenure).min(100);
        ScoreResult {
            score,
            tier: Tier::from_score(score),
            rationale,
            total_paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContractStatus, FeeType, InstallmentStatus};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract(client: &str, start: NaiveDate) -> Contract {
        Contract {
            id: "CNT_0001".into(),
            client_id: Uuid::new_v4(),
            client_name: client.into(),
            phone: None,
            legal_area: "Civil".into(),
            fee_type: FeeType::Monthly,
            acquisition_channel: "Referral".into(),
            payment_method: "Pix".into(),
            responsible: None,
            total_value: 1200.0,
            installment_count: 12,
            start_date: start,
            status: ContractStatus::Active,
        }
    }

    fn installment(
        client: &str,
        amount: f64,
        due: NaiveDate,
        paid_on: Option<NaiveDate>,
    ) -> Installment {
        Installment {
            id: "CNT_0001_P1".into(),
            contract_id: "CNT_0001".into(),
            client_name: client.into(),
            sequence: 1,
            amount,
            due_date: due,
            status: if paid_on.is_some() {
                InstallmentStatus::Paid
            } else {
                InstallmentStatus::Open
            },
            payment_date: paid_on,
            fee_type: FeeType::Monthly,
        }
    }

    #[test]
    fn unknown_client_scores_zero() {
        let result = ScoreService::score("Nobody", &[], &[], date(2025, 3, 1));
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, Tier::Critical);
        assert_eq!(result.total_paid, 0.0);
    }

    #[test]
    fn single_on_time_payment_earns_full_punctuality() {
        // One installment, paid before its due date, evaluated soon after.
        let today = date(2025, 1, 20);
        let contracts = vec![contract("Ana", date(2025, 1, 10))];
        let installments = vec![installment(
            "Ana",
            100.0,
            date(2025, 1, 10),
            Some(date(2025, 1, 5)),
        )];
        let result = ScoreService::score("Ana", &contracts, &installments, today);
        // 50 punctuality + 5 volume + 5 tenure.
        assert_eq!(result.score, 60);
        assert_eq!(result.tier, Tier::Fair);
    }

    #[test]
    fn three_overdue_installments_zero_punctuality() {
        let today = date(2025, 3, 1);
        let contracts = vec![contract("Breno", date(2025, 1, 1))];
        let installments = vec![
            installment("Breno", 100.0, date(2025, 2, 19), None),
            installment("Breno", 100.0, date(2025, 2, 9), None),
            installment("Breno", 100.0, date(2025, 1, 20), None),
        ];
        let result = ScoreService::score("Breno", &contracts, &installments, today);
        // Punctuality max(0, 30 - min(40, 45)) = 0; volume 5; tenure 5.
        assert_eq!(result.score, 10);
        assert_eq!(result.tier, Tier::Critical);
    }

    #[test]
    fn no_billing_history_gets_benefit_of_the_doubt() {
        let today = date(2025, 3, 1);
        let contracts = vec![contract("Clara", date(2025, 2, 20))];
        let installments = vec![installment("Clara", 100.0, date(2025, 3, 20), None)];
        let result = ScoreService::score("Clara", &contracts, &installments, today);
        // 50 + 5 + 5: nothing paid, nothing overdue yet.
        assert_eq!(result.score, 60);
        assert!(result
            .rationale
            .iter()
            .any(|line| line.contains("No billing history")));
    }

    #[test]
    fn volume_and_tenure_lift_the_score() {
        let today = date(2027, 6, 1);
        let contracts = vec![contract("Diego", date(2025, 1, 10))];
        let installments = vec![installment(
            "Diego",
            20_000.0,
            date(2025, 2, 10),
            Some(date(2025, 2, 10)),
        )];
        let result = ScoreService::score("Diego", &contracts, &installments, today);
        // 50 punctuality + 30 volume + 20 tenure (29 months).
        assert_eq!(result.score, 100);
        assert_eq!(result.tier, Tier::Excellent);
        assert_eq!(result.tier.stars(), 5);
    }

    #[test]
    fn score_stays_within_bounds() {
        let today = date(2025, 3, 1);
        let contracts = vec![contract("Eva", date(2000, 1, 1))];
        let cases = [
            vec![],
            vec![installment("Eva", 50_000.0, date(2024, 1, 1), Some(date(2024, 1, 1)))],
            vec![installment("Eva", 50.0, date(2024, 1, 1), None)],
        ];
        for installments in cases {
            let result = ScoreService::score("Eva", &contracts, &installments, today);
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn tier_bands_match_thresholds() {
        assert_eq!(Tier::from_score(95), Tier::Excellent);
        assert_eq!(Tier::from_score(90), Tier::Excellent);
        assert_eq!(Tier::from_score(89), Tier::VeryGood);
        assert_eq!(Tier::from_score(70), Tier::VeryGood);
        assert_eq!(Tier::from_score(50), Tier::Fair);
        assert_eq!(Tier::from_score(30), Tier::Watch);
        assert_eq!(Tier::from_score(29), Tier::Critical);
    }
}
