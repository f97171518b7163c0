#![allow(dead_code)]

use nodefetch::{EndpointPicker, FetchError, Result, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum Behavior {
    Json(Value),
    Status(u16),
    Refuse,
    Hang,
    Delay(Duration, Value),
}

/// In-memory transport: each URL answers with a fixed behavior.
/// Unknown URLs are refused.
#[derive(Clone, Default)]
pub struct FakeTransport {
    routes: HashMap<String, Behavior>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, behavior: Behavior) -> Self {
        self.routes.insert(url.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(url.to_string());
        let behavior = self.routes.get(url).cloned().unwrap_or(Behavior::Refuse);

        match behavior {
            Behavior::Json(body) => Ok(body),
            Behavior::Status(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
                reason: "Service Unavailable".to_string(),
            }),
            Behavior::Refuse => Err(FetchError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
            Behavior::Hang => std::future::pending().await,
            Behavior::Delay(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
        }
    }
}

/// Cycles through a fixed list of indices.
pub struct CyclePicker {
    order: Vec<usize>,
    next: AtomicUsize,
}

impl CyclePicker {
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            next: AtomicUsize::new(0),
        }
    }
}

impl EndpointPicker for CyclePicker {
    fn pick(&self, len: usize) -> usize {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.order[i % self.order.len()] % len
    }
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
