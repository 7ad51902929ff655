//! Remote-wins merge of two quote collections keyed by text.

use std::collections::HashMap;

use crate::quotes::Quote;

/// Merges `local` into `remote`.
///
/// Every remote record is inserted first, so remote always wins a text
/// collision. Local records follow only if their text is not present yet.
/// Output order is the remote records in their given order, then the
/// surviving local records in their original order. A text repeated inside
/// one side keeps the position of its first occurrence; for remote the last
/// value wins, for local the first one does.
pub fn merge_quotes(local: &[Quote], remote: &[Quote]) -> Vec<Quote> {
    let mut merged: Vec<Quote> = Vec::with_capacity(local.len() + remote.len());
    let mut index_by_text: HashMap<&str, usize> = HashMap::new();

    for quote in remote {
        match index_by_text.get(quote.text.as_str()) {
            Some(&idx) => merged[idx] = quote.clone(),
            None => {
                index_by_text.insert(quote.text.as_str(), merged.len());
                merged.push(quote.clone());
            }
        }
    }

    for quote in local {
        if !index_by_text.contains_key(quote.text.as_str()) {
            index_by_text.insert(quote.text.as_str(), merged.len());
            merged.push(quote.clone());
        }
    }

    merged
}
