//! Loan status lifecycle and the daily overdue sweep
//!
//! A loan starts `inday`. The sweep moves overdue loans to `late`; owners
//! can write any status afterwards. Which loans count as overdue is decided by
//! a [`SweepRule`], because two readings of the legacy condition exist.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::{
    config::LifecycleConfig,
    error::{AppError, AppResult},
    models::{Loan, LoanStatus},
    repository::LoanStore,
};

use super::loans::LoansService;

/// Which overdue loans the sweep promotes to `late`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepRule {
    /// Overdue `inday` loans not yet returned become `late`
    PromoteInday,
    /// Legacy condition: overdue loans whose status is neither `late` nor
    /// `inday` become `late`. An `inday` loan is never promoted.
    SkipInday,
}

pub const DEFAULT_SWEEP_RULE: SweepRule = SweepRule::PromoteInday;

impl Default for SweepRule {
    fn default() -> Self {
        DEFAULT_SWEEP_RULE
    }
}

impl SweepRule {
    pub fn is_eligible(&self, loan: &Loan, now: DateTime<Utc>) -> bool {
        if loan.final_date >= now {
            return false;
        }

        match self {
            SweepRule::PromoteInday => {
                loan.status == LoanStatus::InDay && loan.real_final_date.is_none()
            }
            SweepRule::SkipInday => !matches!(loan.status, LoanStatus::InDay | LoanStatus::Late),
        }
    }
}

/// Status every new loan starts with
pub fn initial_status() -> LoanStatus {
    LoanStatus::InDay
}

/// Outcome of one sweep run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Overdue candidates looked at
    pub examined: usize,
    /// Loans moved to `late`
    pub promoted: usize,
    /// Eligible loans whose status changed before the update landed
    pub skipped_concurrent: usize,
}

/// Promote every eligible overdue loan to `late`.
///
/// Each update is conditional on the status read, so a concurrent manual edit
/// wins over the sweep.
pub async fn advance_overdue(
    store: &dyn LoanStore,
    rule: SweepRule,
    now: DateTime<Utc>,
) -> AppResult<SweepReport> {
    let candidates = store.list_overdue(now).await?;
    let mut report = SweepReport {
        examined: candidates.len(),
        ..Default::default()
    };

    for loan in candidates.iter().filter(|loan| rule.is_eligible(loan, now)) {
        if store
            .compare_and_set_status(&loan.id, &loan.status, &LoanStatus::Late)
            .await?
        {
            tracing::debug!(loan_id = %loan.id, from = %loan.status, "Loan marked late");
            report.promoted += 1;
        } else {
            report.skipped_concurrent += 1;
        }
    }

    Ok(report)
}

/// Parse an `HH:MM` fire time
pub fn parse_run_at(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Internal(format!("Invalid lifecycle.run_at value: {}", value)))
}

/// Next instant strictly after `now` at `run_at` (UTC)
pub fn next_run_after(now: DateTime<Utc>, run_at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(run_at).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Start the background sweeper. Fires once a day at `config.run_at`.
pub fn spawn_sweeper(loans: LoansService, config: &LifecycleConfig) -> AppResult<JoinHandle<()>> {
    let run_at = parse_run_at(&config.run_at)?;
    let run_on_startup = config.run_on_startup;

    tracing::info!(
        "Overdue sweep scheduled daily at {} UTC ({:?})",
        run_at.format("%H:%M"),
        loans.sweep_rule()
    );

    Ok(tokio::spawn(async move {
        if run_on_startup {
            run_sweep(&loans).await;
        }

        loop {
            let now = Utc::now();
            let next = next_run_after(now, run_at);
            let wait = (next - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
            run_sweep(&loans).await;
        }
    }))
}

async fn run_sweep(loans: &LoansService) {
    match loans.advance_overdue(Utc::now()).await {
        Ok(report) => tracing::info!(
            examined = report.examined,
            promoted = report.promoted,
            skipped_concurrent = report.skipped_concurrent,
            "Overdue sweep finished"
        ),
        Err(e) => tracing::error!("Overdue sweep failed: {}", e),
    }
}
