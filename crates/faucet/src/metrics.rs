//! Prometheus counters for contract reads and submitted transactions

use prometheus::{opts, Encoder, IntCounterVec, Registry, TextEncoder};

#[derive(Clone)]
pub struct FaucetMetrics {
    registry: Registry,
    pub reads_total: IntCounterVec,
    pub read_failures_total: IntCounterVec,
    pub transactions_total: IntCounterVec,
    pub transaction_failures_total: IntCounterVec,
}

impl FaucetMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let reads_total = IntCounterVec::new(
            opts!("mtk_faucet_contract_reads_total", "Contract reads issued"),
            &["function"],
        )?;
        let read_failures_total = IntCounterVec::new(
            opts!("mtk_faucet_contract_read_failures_total", "Contract reads that failed"),
            &["function"],
        )?;
        let transactions_total = IntCounterVec::new(
            opts!("mtk_faucet_transactions_total", "Transactions submitted"),
            &["action"],
        )?;
        let transaction_failures_total = IntCounterVec::new(
            opts!("mtk_faucet_transaction_failures_total", "Transactions that failed or reverted"),
            &["action"],
        )?;

        registry.register(Box::new(reads_total.clone()))?;
        registry.register(Box::new(read_failures_total.clone()))?;
        registry.register(Box::new(transactions_total.clone()))?;
        registry.register(Box::new(transaction_failures_total.clone()))?;

        Ok(Self {
            registry,
            reads_total,
            read_failures_total,
            transactions_total,
            transaction_failures_total,
        })
    }

    pub fn record_read(&self, function: &str, ok: bool) {
        self.reads_total.with_label_values(&[function]).inc();
        if !ok {
            self.read_failures_total.with_label_values(&[function]).inc();
        }
    }

    pub fn record_transaction(&self, action: &str, ok: bool) {
        self.transactions_total.with_label_values(&[action]).inc();
        if !ok {
            self.transaction_failures_total.with_label_values(&[action]).inc();
        }
    }

    /// Text exposition format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_show_up_in_output() {
        let metrics = FaucetMetrics::new().unwrap();
        metrics.record_read("owner", true);
        metrics.record_read("decimals", false);
        metrics.record_transaction("drip", true);

        let text = metrics.gather().unwrap();
        assert!(text.contains("mtk_faucet_contract_reads_total{function=\"owner\"} 1"));
        assert!(text.contains("mtk_faucet_contract_read_failures_total{function=\"decimals\"} 1"));
        assert!(text.contains("mtk_faucet_transactions_total{action=\"drip\"} 1"));
        assert_eq!(metrics.transaction_failures_total.with_label_values(&["drip"]).get(), 0);
    }
}
