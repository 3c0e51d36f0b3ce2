use std::collections::{BTreeMap, HashMap};

use tally_core::{DaySummary, MatchedPair, Money, Source, Transaction, TxDate};

/// Groups transactions by day, pairs bank and ledger rows of equal amount,
/// and returns one summary per day, newest first.
pub fn reconcile_days(transactions: &[Transaction]) -> Vec<DaySummary> {
    let mut by_date: BTreeMap<&TxDate, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_date.entry(tx.date()).or_default().push(tx);
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, day)| summarize_day(date, &day))
        .collect()
}

fn summarize_day(date: &TxDate, day: &[&Transaction]) -> DaySummary {
    let bank: Vec<&Transaction> = day
        .iter()
        .copied()
        .filter(|t| t.source() == Source::Bank)
        .collect();
    let external: Vec<&Transaction> = day
        .iter()
        .copied()
        .filter(|t| t.source() == Source::Ledger)
        .collect();

    let pairs = pair_by_amount(&bank, &external);

    let mut bank_used = vec![false; bank.len()];
    let mut external_used = vec![false; external.len()];
    let matched_pairs = pairs
        .iter()
        .map(|&(b, e)| {
            bank_used[b] = true;
            external_used[e] = true;
            MatchedPair {
                bank: bank[b].clone(),
                external: external[e].clone(),
            }
        })
        .collect();

    DaySummary::new(
        date.clone(),
        matched_pairs,
        leftovers(&bank, &bank_used),
        leftovers(&external, &external_used),
        Money::total(bank.iter().map(|t| t.amount())),
        Money::total(external.iter().map(|t| t.amount())),
    )
}

/// Index pairs `(bank, external)`. Buckets are visited in the order each
/// amount first appears on the bank side; inside a bucket the i-th bank row
/// takes the i-th ledger row.
fn pair_by_amount(bank: &[&Transaction], external: &[&Transaction]) -> Vec<(usize, usize)> {
    let bank_buckets = bucket_by_amount(bank);
    let external_buckets: HashMap<Money, Vec<usize>> = bucket_by_amount(external).into_iter().collect();

    let mut pairs = Vec::new();
    for (amount, bank_idx) in bank_buckets {
        let Some(external_idx) = external_buckets.get(&amount) else {
            continue;
        };
        pairs.extend(bank_idx.into_iter().zip(external_idx.iter().copied()));
    }
    pairs
}

/// Buckets by amount, ordered by first encounter, members in input order.
fn bucket_by_amount(txs: &[&Transaction]) -> Vec<(Money, Vec<usize>)> {
    let mut slots: HashMap<Money, usize> = HashMap::new();
    let mut buckets: Vec<(Money, Vec<usize>)> = Vec::new();
    for (idx, tx) in txs.iter().enumerate() {
        let amount = tx.amount().round();
        let slot = *slots.entry(amount).or_insert_with(|| {
            buckets.push((amount, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(idx);
    }
    buckets
}

fn leftovers(txs: &[&Transaction], used: &[bool]) -> Vec<Transaction> {
    txs.iter()
        .zip(used)
        .filter(|(_, &taken)| !taken)
        .map(|(tx, _)| (*tx).clone())
        .collect()
}
