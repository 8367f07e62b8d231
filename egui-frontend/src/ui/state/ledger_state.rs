//! # Ledger State Module
//!
//! Client-side copy of the transactions and summary for the selected period.
//!
//! ## Superseded responses
//! Transactions and summary are fetched independently and may come back in any
//! order. Each fetch carries a [`RefreshTicket`] taken when the call was issued.
//! A result is applied only when:
//! - its period is still the selected period,
//! - its session epoch is still the current one, and
//! - it is newer than the last applied result of the same kind.
//!
//! Anything else is dropped, so the visible list and summary always belong to
//! the latest requested period no matter how responses interleave.
//!
//! Refreshes still waiting on the backend are counted separately, so a failed
//! load shows as finished rather than pending forever.

use shared::{MonthlySummary, Period, Transaction};

/// Identifies one refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub sequence: u64,
    pub period: Period,
    pub epoch: u64,
}

/// Read-model for one period's transactions and totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub transactions: Vec<Transaction>,
    pub summary: Option<MonthlySummary>,

    /// Period the current transactions were loaded for
    transactions_period: Option<Period>,
    /// Period the current summary was loaded for
    summary_period: Option<Period>,

    transactions_sequence: u64,
    summary_sequence: u64,

    /// Refreshes issued but not yet answered
    in_flight: u32,
}

impl LedgerState {
    fn accepts(ticket: &RefreshTicket, last_applied: u64, period: Period, epoch: u64) -> bool {
        ticket.period == period && ticket.epoch == epoch && ticket.sequence > last_applied
    }

    /// Apply a transaction list if the ticket is still current. Returns whether it was applied.
    pub fn apply_transactions(
        &mut self,
        ticket: RefreshTicket,
        selected: Period,
        epoch: u64,
        transactions: Vec<Transaction>,
    ) -> bool {
        if !Self::accepts(&ticket, self.transactions_sequence, selected, epoch) {
            return false;
        }
        self.transactions = transactions;
        self.transactions_period = Some(ticket.period);
        self.transactions_sequence = ticket.sequence;
        true
    }

    /// Apply a summary if the ticket is still current. Returns whether it was applied.
    pub fn apply_summary(
        &mut self,
        ticket: RefreshTicket,
        selected: Period,
        epoch: u64,
        summary: MonthlySummary,
    ) -> bool {
        if !Self::accepts(&ticket, self.summary_sequence, selected, epoch) {
            return false;
        }
        self.summary = Some(summary);
        self.summary_period = Some(ticket.period);
        self.summary_sequence = ticket.sequence;
        true
    }

    /// True when what is shown was not loaded for `selected`, either because a
    /// refresh is pending or because it failed
    pub fn is_stale(&self, selected: Period) -> bool {
        self.transactions_period != Some(selected) || self.summary_period != Some(selected)
    }

    pub fn begin_refresh(&mut self) {
        self.in_flight += 1;
    }

    /// Called once per [`begin_refresh`](Self::begin_refresh), whether the fetch succeeded or not
    pub fn finish_refresh(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight > 0
    }

    pub fn transactions_period(&self) -> Option<Period> {
        self.transactions_period
    }

    pub fn summary_period(&self) -> Option<Period> {
        self.summary_period
    }

    /// Summary for display; zero totals until one has been loaded
    pub fn summary_or_default(&self) -> MonthlySummary {
        self.summary.unwrap_or_default()
    }

    /// Drop everything without fetching. Sequence numbers are kept so results
    /// requested before the clear can never be applied afterwards, and so is the
    /// in-flight count since those requests will still finish.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.summary = None;
        self.transactions_period = None;
        self.summary_period = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use shared::TransactionSource;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn ticket(sequence: u64, period: Period) -> RefreshTicket {
        RefreshTicket { sequence, period, epoch: 1 }
    }

    fn transaction(id: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount,
            store: None,
            description: None,
            category_id: None,
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            source: TransactionSource::Manual,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn summary(balance: f64) -> MonthlySummary {
        MonthlySummary {
            income: balance.max(0.0),
            expenses: (-balance).max(0.0),
            balance,
            transaction_count: 1,
        }
    }

    #[test]
    fn test_result_for_selected_period_is_applied() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);

        assert!(ledger.apply_transactions(ticket(1, march), march, 1, vec![transaction("t1", 5.0)]));
        assert!(ledger.apply_summary(ticket(1, march), march, 1, summary(5.0)));
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.summary_or_default().balance, 5.0);
        assert!(!ledger.is_stale(march));
    }

    #[test]
    fn test_result_for_previously_selected_period_is_dropped() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);
        let april = period(2024, 4);

        // April was selected after the March request went out
        assert!(!ledger.apply_transactions(ticket(1, march), april, 1, vec![transaction("t1", 5.0)]));
        assert!(!ledger.apply_summary(ticket(1, march), april, 1, summary(5.0)));
        assert!(ledger.transactions.is_empty());
        assert!(ledger.summary.is_none());
        assert!(ledger.is_stale(april));
    }

    #[test]
    fn test_older_result_for_same_period_does_not_overwrite_newer() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);

        assert!(ledger.apply_transactions(
            ticket(2, march),
            march,
            1,
            vec![transaction("t1", 5.0), transaction("t2", -3.0)]
        ));
        assert!(!ledger.apply_transactions(ticket(1, march), march, 1, vec![transaction("t1", 5.0)]));
        assert_eq!(ledger.transactions.len(), 2);

        assert!(ledger.apply_summary(ticket(2, march), march, 1, summary(2.0)));
        assert!(!ledger.apply_summary(ticket(1, march), march, 1, summary(5.0)));
        assert_eq!(ledger.summary_or_default().balance, 2.0);
    }

    #[test]
    fn test_result_from_previous_session_is_dropped() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);

        assert!(!ledger.apply_transactions(ticket(1, march), march, 2, vec![transaction("t1", 5.0)]));
    }

    #[test]
    fn test_clear_keeps_sequence_guard() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);

        assert!(ledger.apply_transactions(ticket(3, march), march, 1, vec![transaction("t1", 5.0)]));
        ledger.clear();
        assert!(ledger.transactions.is_empty());
        assert!(ledger.summary.is_none());
        assert_eq!(ledger.summary_or_default(), MonthlySummary::default());

        assert!(!ledger.apply_transactions(ticket(2, march), march, 1, vec![transaction("t1", 5.0)]));
        assert!(ledger.apply_transactions(ticket(4, march), march, 1, vec![]));
        assert_eq!(ledger.transactions_period(), Some(march));
    }

    #[test]
    fn test_refreshing_tracks_unanswered_requests() {
        let mut ledger = LedgerState::default();
        assert!(!ledger.is_refreshing());

        ledger.begin_refresh();
        ledger.begin_refresh();
        ledger.finish_refresh();
        assert!(ledger.is_refreshing());

        // Still counted across a sign-out
        ledger.clear();
        assert!(ledger.is_refreshing());

        ledger.finish_refresh();
        assert!(!ledger.is_refreshing());
        ledger.finish_refresh();
        assert!(!ledger.is_refreshing());
    }

    #[test]
    fn test_failed_first_load_is_stale_but_not_refreshing() {
        let mut ledger = LedgerState::default();
        let march = period(2024, 3);

        ledger.begin_refresh();
        ledger.finish_refresh();

        assert!(ledger.is_stale(march));
        assert!(!ledger.is_refreshing());
    }
}
