//! Loan management service

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        loan::{LoanRequest, LoanStatusRequest},
        Identity, Loan,
    },
    repository::Repository,
};

use super::{
    lifecycle::{self, SweepReport, SweepRule},
    passwords,
    policy::{authorize, Action, Denial, Grant, Resource},
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    sweep_rule: SweepRule,
}

impl LoansService {
    pub fn new(repository: Repository, sweep_rule: SweepRule) -> Self {
        Self {
            repository,
            sweep_rule,
        }
    }

    pub fn sweep_rule(&self) -> SweepRule {
        self.sweep_rule
    }

    /// Register a loan owned by the calling user. Status always starts `inday`.
    pub async fn create(&self, identity: &Identity, request: LoanRequest) -> AppResult<Loan> {
        let grant = authorize(identity, Action::Create, Resource::Loan(None))?;
        let owner = owner_of(&grant)?;
        let fields = request.into_fields()?;

        let id = passwords::generate_id();
        let loan = self
            .repository
            .loans
            .create(&id, owner, &fields, &lifecycle::initial_status())
            .await?;

        tracing::info!(loan_id = %loan.id, owner = %owner, "Loan created");
        Ok(loan)
    }

    /// Loans owned by the calling user
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<Loan>> {
        let grant = authorize(identity, Action::List, Resource::Loan(None))?;
        self.repository.loans.list_by_owner(owner_of(&grant)?).await
    }

    pub async fn get(&self, identity: &Identity, id: &str) -> AppResult<Loan> {
        self.find_owned(identity, Action::Read, id).await
    }

    /// Replace the descriptive fields and dates. Status is left alone.
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        request: LoanRequest,
    ) -> AppResult<()> {
        self.find_owned(identity, Action::Update, id).await?;
        let fields = request.into_fields()?;

        if !self.repository.loans.update_details(id, &fields).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Owner-driven status write; any non-empty value is accepted
    pub async fn update_status(
        &self,
        identity: &Identity,
        id: &str,
        request: LoanStatusRequest,
    ) -> AppResult<()> {
        self.find_owned(identity, Action::UpdateStatus, id).await?;
        let status = request.into_status()?;

        if !self.repository.loans.update_status(id, &status).await? {
            return Err(not_found(id));
        }

        tracing::debug!(loan_id = %id, status = %status, "Loan status set by owner");
        Ok(())
    }

    pub async fn delete(&self, identity: &Identity, id: &str) -> AppResult<()> {
        self.find_owned(identity, Action::Delete, id).await?;

        if !self.repository.loans.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(loan_id = %id, "Loan deleted");
        Ok(())
    }

    /// Run one overdue sweep with the configured rule
    pub async fn advance_overdue(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        lifecycle::advance_overdue(self.repository.loans.as_ref(), self.sweep_rule, now).await
    }

    /// Authorize, fetch, then apply the ownership constraint
    async fn find_owned(&self, identity: &Identity, action: Action, id: &str) -> AppResult<Loan> {
        let grant = authorize(identity, action, Resource::Loan(Some(id)))?;

        let loan = self
            .repository
            .loans
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        grant.check_owner(&loan.borrowed_by)?;
        Ok(loan)
    }
}

/// Loan grants are always owner-scoped
fn owner_of(grant: &Grant) -> AppResult<&str> {
    grant.owner().ok_or_else(|| Denial::MustBeUser.into())
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Loan with id {} not found", id))
}
