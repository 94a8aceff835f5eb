//! PendingSet - 号機に割り当て済みで未処理のリクエスト集合
//!
//! # 不変条件
//! - 同じ `StopKey`（origin, destination）は 1 件まで。重複 insert は no-op。
//! - 挿入順を保持する（FCFS と SSTF のタイブレークに使う）。
//!
//! 件数は高々数十なので Vec の線形走査で十分。

use super::request::{Request, StopKey};

#[derive(Debug, Clone, Default)]
pub struct PendingSet {
    requests: Vec<Request>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an equal stop is already pending. Returns `true` if inserted.
    pub fn insert(&mut self, request: Request) -> bool {
        if self.contains_key(&request.key()) {
            return false;
        }
        self.requests.push(request);
        true
    }

    pub fn contains_key(&self, key: &StopKey) -> bool {
        self.requests.iter().any(|r| r.key() == *key)
    }

    /// Remove and return the request with `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &StopKey) -> Option<Request> {
        let index = self.requests.iter().position(|r| r.key() == *key)?;
        Some(self.requests.remove(index))
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn oldest(&self) -> Option<&Request> {
        self.requests.first()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl FromIterator<Request> for PendingSet {
    fn from_iter<I: IntoIterator<Item = Request>>(iter: I) -> Self {
        let mut set = PendingSet::new();
        for request in iter {
            set.insert(request);
        }
        set
    }
}
